use chrono::{DateTime, Utc};
use serde::Serialize;

use models::point::{Banner, RefreshmentPoint};

use crate::errors::ServiceError;
use crate::facade::RemoteFacade;
use crate::ops;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BannerInfo {
    pub id: String,
    pub image_path: String,
    pub inserted_at: DateTime<Utc>,
}

impl From<Banner> for BannerInfo {
    fn from(b: Banner) -> Self {
        Self { id: b.id, image_path: b.image_path, inserted_at: b.inserted_at }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointDetails {
    pub id: String,
    pub name: String,
    pub city: String,
    pub rating: f32,
    pub price_tier: u8,
    pub banners: Vec<BannerInfo>,
    pub free_banner_slots: usize,
}

impl From<RefreshmentPoint> for PointDetails {
    fn from(p: RefreshmentPoint) -> Self {
        let free_banner_slots = p.max_banners.saturating_sub(p.banners.len());
        Self {
            id: p.id,
            name: p.name,
            city: p.city,
            rating: p.rating,
            price_tier: p.price_tier,
            banners: p.banners.into_iter().map(BannerInfo::from).collect(),
            free_banner_slots,
        }
    }
}

#[derive(Clone)]
pub struct RefreshmentPointService {
    facade: RemoteFacade<RefreshmentPoint>,
}

impl RefreshmentPointService {
    pub fn new(facade: RemoteFacade<RefreshmentPoint>) -> Self { Self { facade } }

    pub fn facade(&self) -> &RemoteFacade<RefreshmentPoint> { &self.facade }

    pub async fn fetch(&self, id: &str) -> Result<PointDetails, ServiceError> {
        self.facade.fetch(ops::VIEW_POINT, id).await.map(PointDetails::from)
    }

    pub async fn update_rating(&self, id: &str, rating: f32, confirmed: bool) -> Result<PointDetails, ServiceError> {
        self.facade
            .modify(ops::RATE_POINT, id, confirmed, |point| {
                point.rating = rating;
                Ok(point.clone())
            })
            .await
            .map(PointDetails::from)
    }

    /// Attach a banner. Refused once the point has used all of its banner slots.
    /// The image path is checked with the rest of the draft.
    pub async fn insert_banner(
        &self,
        point_id: &str,
        banner_id: &str,
        image_path: &str,
        confirmed: bool,
    ) -> Result<PointDetails, ServiceError> {
        let banner = Banner::new(banner_id, image_path);
        self.facade
            .modify(ops::INSERT_BANNER, point_id, confirmed, |point| {
                if point.banner(&banner.id).is_some() {
                    return Err(ServiceError::conflict(format!("banner {} already exists", banner.id)));
                }
                if !point.has_banner_slot() {
                    return Err(ServiceError::conflict(format!(
                        "refreshment point {} has reached the maximum number of banners ({})",
                        point.id, point.max_banners
                    )));
                }
                point.banners.push(banner);
                Ok(point.clone())
            })
            .await
            .map(PointDetails::from)
    }

    pub async fn delete_banner(&self, point_id: &str, banner_id: &str, confirmed: bool) -> Result<PointDetails, ServiceError> {
        self.facade
            .modify(ops::DELETE_BANNER, point_id, confirmed, |point| {
                let before = point.banners.len();
                point.banners.retain(|b| b.id != banner_id);
                if point.banners.len() == before {
                    return Err(ServiceError::not_found("banner", banner_id));
                }
                Ok(point.clone())
            })
            .await
            .map(PointDetails::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::test_support::facade_for;

    fn point_with_slots(max: usize) -> RefreshmentPoint {
        let mut p = RefreshmentPoint::new("RP01", "Trattoria", "Rome", 4.0, 2);
        p.max_banners = max;
        p
    }

    #[tokio::test]
    async fn banner_limit_is_enforced() {
        let (facade, _) = facade_for(vec![point_with_slots(2)]);
        let svc = RefreshmentPointService::new(facade);

        svc.insert_banner("RP01", "B1", "one.png", true).await.unwrap();
        let details = svc.insert_banner("RP01", "B2", "two.jpg", true).await.unwrap();
        assert_eq!(details.free_banner_slots, 0);

        let err = svc.insert_banner("RP01", "B3", "three.png", true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(svc.fetch("RP01").await.unwrap().banners.len(), 2);

        svc.delete_banner("RP01", "B1", true).await.unwrap();
        svc.insert_banner("RP01", "B3", "three.png", true).await.unwrap();
    }

    #[tokio::test]
    async fn banner_input_is_checked() {
        let (facade, _) = facade_for(vec![point_with_slots(5)]);
        let svc = RefreshmentPointService::new(facade);

        let err = svc.insert_banner("RP01", "B1", "notes.txt", true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        svc.insert_banner("RP01", "B1", "a.png", true).await.unwrap();
        let err = svc.insert_banner("RP01", "B1", "b.png", true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        let err = svc.delete_banner("RP01", "NOPE", true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = svc.insert_banner("RP99", "B9", "a.png", true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn rating_outside_range_is_rejected() {
        let (facade, _) = facade_for(vec![point_with_slots(5)]);
        let svc = RefreshmentPointService::new(facade);
        assert_eq!(svc.update_rating("RP01", 5.5, true).await.unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(svc.update_rating("RP01", 3.5, true).await.unwrap().rating, 3.5);
    }

    #[tokio::test]
    async fn invalid_input_under_forced_failure_is_an_interruption() {
        let (facade, switch) = facade_for(vec![point_with_slots(5)]);
        let svc = RefreshmentPointService::new(facade);
        switch.set(true);

        let err = svc.update_rating("RP01", 9.0, true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConnectionInterrupted);
        let err = svc.insert_banner("RP01", "B1", "notes.txt", true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConnectionInterrupted);

        switch.set(false);
        let point = svc.fetch("RP01").await.unwrap();
        assert_eq!(point.rating, 4.0);
        assert!(point.banners.is_empty());
    }
}
