use chrono::{DateTime, Utc};
use serde::Serialize;

use models::convention::{Convention, ConventionStatus};

use crate::errors::ServiceError;
use crate::facade::RemoteFacade;
use crate::ops;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConventionDetails {
    pub id: String,
    pub point_id: String,
    pub terms: String,
    pub status: ConventionStatus,
    pub decided_at: Option<DateTime<Utc>>,
}

impl From<Convention> for ConventionDetails {
    fn from(c: Convention) -> Self {
        Self { id: c.id, point_id: c.point_id, terms: c.terms, status: c.status, decided_at: c.decided_at }
    }
}

#[derive(Clone)]
pub struct ConventionService {
    facade: RemoteFacade<Convention>,
}

impl ConventionService {
    pub fn new(facade: RemoteFacade<Convention>) -> Self { Self { facade } }

    pub fn facade(&self) -> &RemoteFacade<Convention> { &self.facade }

    pub async fn fetch(&self, id: &str) -> Result<ConventionDetails, ServiceError> {
        self.facade.fetch(ops::VIEW_CONVENTION, id).await.map(ConventionDetails::from)
    }

    /// Conventions of one refreshment point, decided and pending.
    pub async fn history(&self, point_id: &str) -> Result<Vec<ConventionDetails>, ServiceError> {
        let found = self.facade.search(ops::CONVENTION_HISTORY, |c| c.point_id == point_id).await?;
        Ok(found.into_iter().map(ConventionDetails::from).collect())
    }

    pub async fn activate(&self, id: &str, confirmed: bool) -> Result<ConventionDetails, ServiceError> {
        self.decide(ops::ACTIVATE_CONVENTION, id, ConventionStatus::Approved, confirmed).await
    }

    pub async fn reject(&self, id: &str, confirmed: bool) -> Result<ConventionDetails, ServiceError> {
        self.decide(ops::REJECT_CONVENTION, id, ConventionStatus::Rejected, confirmed).await
    }

    async fn decide(&self, op: &str, id: &str, to: ConventionStatus, confirmed: bool) -> Result<ConventionDetails, ServiceError> {
        self.facade
            .modify(op, id, confirmed, |c| {
                // a decided convention is final; surface that as a state conflict
                c.decide(to, Utc::now()).map_err(|e| ServiceError::conflict(e.to_string()))?;
                Ok(c.clone())
            })
            .await
            .map(ConventionDetails::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::test_support::facade_for;
    use models::seed;

    #[tokio::test]
    async fn pending_convention_is_activated_once() {
        let (facade, _) = facade_for(seed::conventions());
        let svc = ConventionService::new(facade);

        let c = svc.activate("CV001", true).await.unwrap();
        assert_eq!(c.status, ConventionStatus::Approved);
        assert!(c.decided_at.is_some());

        assert_eq!(svc.reject("CV001", true).await.unwrap_err().kind(), ErrorKind::Conflict);
        assert_eq!(svc.fetch("CV001").await.unwrap().status, ConventionStatus::Approved);
    }

    #[tokio::test]
    async fn history_filters_by_point() {
        let mut records = seed::conventions();
        records.push(Convention::pending("CV003", "RP001", "late-night menu"));
        let (facade, _) = facade_for(records);
        let svc = ConventionService::new(facade);

        svc.reject("CV003", true).await.unwrap();
        let history = svc.history("RP001").await.unwrap();
        let ids: Vec<_> = history.iter().map(|c| (c.id.as_str(), c.status)).collect();
        assert_eq!(ids, vec![("CV001", ConventionStatus::Pending), ("CV003", ConventionStatus::Rejected)]);
        assert!(svc.history("RP404").await.unwrap().is_empty());
    }
}
