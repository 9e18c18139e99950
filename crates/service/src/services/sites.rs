use serde::Serialize;

use models::site::{CulturalHeritage, SitePatch};

use crate::errors::ServiceError;
use crate::facade::RemoteFacade;
use crate::ops;

/// Everything shown on a site's detail card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDetails {
    pub id: String,
    pub name: String,
    pub city: String,
    pub category: String,
    pub description: String,
    pub opening_hours: String,
}

impl From<CulturalHeritage> for SiteDetails {
    fn from(s: CulturalHeritage) -> Self {
        Self {
            id: s.id,
            name: s.name,
            city: s.city,
            category: s.category,
            description: s.description,
            opening_hours: s.opening_hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
    pub id: String,
    pub name: String,
    pub city: String,
}

impl From<CulturalHeritage> for SiteSummary {
    fn from(s: CulturalHeritage) -> Self {
        Self { id: s.id, name: s.name, city: s.city }
    }
}

#[derive(Clone)]
pub struct SiteService {
    facade: RemoteFacade<CulturalHeritage>,
}

impl SiteService {
    pub fn new(facade: RemoteFacade<CulturalHeritage>) -> Self { Self { facade } }

    pub fn facade(&self) -> &RemoteFacade<CulturalHeritage> { &self.facade }

    pub async fn fetch_details(&self, id: &str) -> Result<SiteDetails, ServiceError> {
        self.facade.fetch(ops::VIEW_SITE, id).await.map(SiteDetails::from)
    }

    /// Sites whose name or city contains `query`; an empty query lists all.
    pub async fn search(&self, query: &str) -> Result<Vec<SiteSummary>, ServiceError> {
        let found = self.facade.search(ops::SEARCH_SITES, |s| s.matches(query)).await?;
        Ok(found.into_iter().map(SiteSummary::from).collect())
    }

    pub async fn update(&self, id: &str, patch: SitePatch, confirmed: bool) -> Result<SiteDetails, ServiceError> {
        self.facade
            .modify(ops::UPDATE_SITE, id, confirmed, |site| {
                patch.apply(site);
                Ok(site.clone())
            })
            .await
            .map(SiteDetails::from)
    }

    pub async fn delete(&self, id: &str, confirmed: bool) -> Result<SiteSummary, ServiceError> {
        self.facade.delete(ops::DELETE_SITE, id, confirmed).await.map(SiteSummary::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::test_support::facade_for;
    use models::seed;

    #[tokio::test]
    async fn colosseum_scenario() {
        let (facade, switch) = facade_for(vec![CulturalHeritage::new("CG001", "Colosseum", "Rome")]);
        let svc = SiteService::new(facade);

        let details = svc.fetch_details("CG001").await.unwrap();
        assert_eq!(details.name, "Colosseum");
        assert_eq!(details.city, "Rome");

        assert_eq!(svc.fetch_details("XXXX").await.unwrap_err().kind(), ErrorKind::NotFound);

        switch.set(true);
        let err = svc.fetch_details("CG001").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConnectionInterrupted);
        let stored = svc.facade().store().get("CG001").await.unwrap();
        assert_eq!(stored, CulturalHeritage::new("CG001", "Colosseum", "Rome"));
    }

    #[tokio::test]
    async fn search_and_update() {
        let (facade, _) = facade_for(seed::sites());
        let svc = SiteService::new(facade);

        let hits = svc.search("rome").await.unwrap();
        assert_eq!(hits.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), vec!["CG001"]);
        assert_eq!(svc.search("").await.unwrap().len(), 3);

        let patch = SitePatch { opening_hours: Some("09:00-17:00".into()), ..Default::default() };
        let err = svc.update("CG002", patch.clone(), false).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotConfirmed);

        let updated = svc.update("CG002", patch, true).await.unwrap();
        assert_eq!(updated.opening_hours, "09:00-17:00");
        assert_eq!(svc.fetch_details("CG002").await.unwrap(), updated);
    }
}
