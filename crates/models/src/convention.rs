use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, require, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConventionStatus {
    Pending,
    Approved,
    Rejected,
}

/// A convention between the agency and a refreshment point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Convention {
    pub id: String,
    /// Id of the refreshment point this convention belongs to.
    pub point_id: String,
    pub terms: String,
    pub status: ConventionStatus,
    pub decided_at: Option<DateTime<Utc>>,
}

impl Convention {
    pub fn pending(id: &str, point_id: &str, terms: &str) -> Self {
        Self {
            id: id.to_string(),
            point_id: point_id.to_string(),
            terms: terms.to_string(),
            status: ConventionStatus::Pending,
            decided_at: None,
        }
    }

    /// Move a pending convention to `to`. Decided conventions are final.
    pub fn decide(&mut self, to: ConventionStatus, at: DateTime<Utc>) -> Result<(), ModelError> {
        if self.status != ConventionStatus::Pending {
            return Err(ModelError::invalid(format!(
                "convention {} already {:?}",
                self.id, self.status
            )));
        }
        if to == ConventionStatus::Pending {
            return Err(ModelError::invalid("cannot move a convention back to pending"));
        }
        self.status = to;
        self.decided_at = Some(at);
        Ok(())
    }
}

impl Record for Convention {
    const KIND: &'static str = "convention";

    fn id(&self) -> &str { &self.id }

    fn validate(&self) -> Result<(), ModelError> {
        require("id", &self.id)?;
        require("point_id", &self.point_id)?;
        match (self.status, self.decided_at) {
            (ConventionStatus::Pending, Some(_)) => Err(ModelError::invalid("pending convention has a decision date")),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_moves_once() {
        let mut c = Convention::pending("CV1", "RP01", "10% discount");
        c.decide(ConventionStatus::Approved, Utc::now()).unwrap();
        assert_eq!(c.status, ConventionStatus::Approved);
        assert!(c.decided_at.is_some());
        assert!(c.decide(ConventionStatus::Rejected, Utc::now()).is_err());
        assert_eq!(c.status, ConventionStatus::Approved);
    }

    #[test]
    fn cannot_decide_to_pending() {
        let mut c = Convention::pending("CV1", "RP01", "");
        assert!(c.decide(ConventionStatus::Pending, Utc::now()).is_err());
        assert!(c.decided_at.is_none());
    }

    #[test]
    fn status_serializes_upper_case() {
        let json = serde_json::to_string(&ConventionStatus::Approved).unwrap();
        assert_eq!(json, "\"APPROVED\"");
    }
}
