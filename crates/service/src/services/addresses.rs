use serde::Serialize;

use models::address::Address;

use crate::errors::ServiceError;
use crate::facade::RemoteFacade;
use crate::ops;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressDetails {
    pub id: String,
    pub full_address: String,
    pub associated_classes: Vec<String>,
}

impl From<Address> for AddressDetails {
    fn from(a: Address) -> Self {
        Self { full_address: a.full_address(), id: a.id, associated_classes: a.associated_classes }
    }
}

#[derive(Clone)]
pub struct AddressService {
    facade: RemoteFacade<Address>,
}

impl AddressService {
    pub fn new(facade: RemoteFacade<Address>) -> Self { Self { facade } }

    pub fn facade(&self) -> &RemoteFacade<Address> { &self.facade }

    pub async fn fetch(&self, id: &str) -> Result<AddressDetails, ServiceError> {
        self.facade.fetch(ops::VIEW_ADDRESS, id).await.map(AddressDetails::from)
    }

    pub async fn list(&self) -> Result<Vec<AddressDetails>, ServiceError> {
        let all = self.facade.search(ops::LIST_ADDRESSES, |_| true).await?;
        Ok(all.into_iter().map(AddressDetails::from).collect())
    }

    /// Delete an address. Classes still held there must be removed first.
    pub async fn delete(&self, id: &str, confirmed: bool) -> Result<AddressDetails, ServiceError> {
        self.facade
            .delete_if(ops::DELETE_ADDRESS, id, confirmed, |a| {
                if a.associated_classes.is_empty() {
                    Ok(())
                } else {
                    Err(ServiceError::conflict(format!(
                        "unable to delete the address, delete the associated classes and try again ({})",
                        a.associated_classes.join(", ")
                    )))
                }
            })
            .await
            .map(AddressDetails::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::test_support::facade_for;
    use models::seed;

    #[tokio::test]
    async fn address_with_classes_is_kept() {
        let (facade, _) = facade_for(seed::addresses());
        let svc = AddressService::new(facade);

        let err = svc.delete("1", true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("ClassA"));
        assert!(svc.fetch("1").await.is_ok());

        let removed = svc.delete("2", true).await.unwrap();
        assert_eq!(removed.full_address, "456 Oak Ave, 90001 Los Angeles, USA");
        assert_eq!(svc.fetch("2").await.unwrap_err().kind(), ErrorKind::NotFound);

        let ids: Vec<_> = svc.list().await.unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
