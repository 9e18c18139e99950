use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, require, Record};

/// A tourist account; `active` gates whether the tourist may log in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouristAccount {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub active: bool,
}

impl TouristAccount {
    pub fn new(id: &str, username: &str, full_name: &str, email: &str, active: bool) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            active,
        }
    }
}

impl Record for TouristAccount {
    const KIND: &'static str = "tourist account";

    fn id(&self) -> &str { &self.id }

    fn validate(&self) -> Result<(), ModelError> {
        require("id", &self.id)?;
        require("username", &self.username)?;
        if !self.email.contains('@') {
            return Err(ModelError::invalid("email must contain '@'"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_without_at_sign_is_rejected() {
        let acc = TouristAccount::new("T01", "mrossi", "Mario Rossi", "mrossi.example.com", true);
        assert!(acc.validate().is_err());
        let acc = TouristAccount::new("T01", "mrossi", "Mario Rossi", "mrossi@example.com", true);
        assert!(acc.validate().is_ok());
    }
}
