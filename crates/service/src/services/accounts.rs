use serde::Serialize;
use tracing::info;

use models::account::TouristAccount;

use crate::errors::ServiceError;
use crate::facade::RemoteFacade;
use crate::ops;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountDetails {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub active: bool,
}

impl From<TouristAccount> for AccountDetails {
    fn from(a: TouristAccount) -> Self {
        Self { id: a.id, username: a.username, full_name: a.full_name, email: a.email, active: a.active }
    }
}

#[derive(Clone)]
pub struct AccountService {
    facade: RemoteFacade<TouristAccount>,
}

impl AccountService {
    pub fn new(facade: RemoteFacade<TouristAccount>) -> Self { Self { facade } }

    pub fn facade(&self) -> &RemoteFacade<TouristAccount> { &self.facade }

    pub async fn fetch(&self, id: &str) -> Result<AccountDetails, ServiceError> {
        self.facade.fetch(ops::VIEW_ACCOUNT, id).await.map(AccountDetails::from)
    }

    pub async fn activate(&self, id: &str, confirmed: bool) -> Result<AccountDetails, ServiceError> {
        self.set_active(ops::ACTIVATE_ACCOUNT, id, true, confirmed).await
    }

    pub async fn deactivate(&self, id: &str, confirmed: bool) -> Result<AccountDetails, ServiceError> {
        self.set_active(ops::DEACTIVATE_ACCOUNT, id, false, confirmed).await
    }

    async fn set_active(&self, op: &str, id: &str, active: bool, confirmed: bool) -> Result<AccountDetails, ServiceError> {
        let account = self
            .facade
            .modify(op, id, confirmed, |acc| {
                if acc.active == active {
                    let state = if active { "active" } else { "inactive" };
                    return Err(ServiceError::conflict(format!("account {} is already {state}", acc.id)));
                }
                acc.active = active;
                Ok(acc.clone())
            })
            .await?;
        info!(account_id = %account.id, active, "account status changed");
        Ok(account.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::test_support::facade_for;
    use models::seed;

    #[tokio::test]
    async fn activation_round() {
        let (facade, _) = facade_for(seed::accounts());
        let svc = AccountService::new(facade);

        // T002 starts inactive
        assert!(!svc.fetch("T002").await.unwrap().active);
        assert!(svc.activate("T002", true).await.unwrap().active);
        assert_eq!(svc.activate("T002", true).await.unwrap_err().kind(), ErrorKind::Conflict);

        assert!(!svc.deactivate("T002", true).await.unwrap().active);
        assert!(!svc.fetch("T002").await.unwrap().active);
    }

    #[tokio::test]
    async fn connection_loss_keeps_status() {
        let (facade, switch) = facade_for(seed::accounts());
        let svc = AccountService::new(facade);
        switch.set(true);
        let err = svc.deactivate("T001", true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConnectionInterrupted);
        switch.set(false);
        assert!(svc.fetch("T001").await.unwrap().active);
    }
}
