use std::sync::Arc;

use configs::FacadeConfig;
use models::{seed, Record};

use crate::facade::RemoteFacade;
use crate::failure::{policy_from_config, FailureInjectionPolicy};
use crate::latency::LatencyProfile;
use crate::services::{
    accounts::AccountService, addresses::AddressService, conventions::ConventionService,
    points::RefreshmentPointService, report_cards::ReportCardService, sites::SiteService,
};
use crate::storage::MemoryStore;

/// Every domain service, sharing one failure policy and latency profile.
#[derive(Clone)]
pub struct Services {
    pub sites: SiteService,
    pub accounts: AccountService,
    pub points: RefreshmentPointService,
    pub conventions: ConventionService,
    pub addresses: AddressService,
    pub report_cards: ReportCardService,
}

impl Services {
    /// Build services over freshly seeded stores.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::{failure::NeverFail, latency::LatencyProfile, Services};
    /// let services = Services::seeded(Arc::new(NeverFail), LatencyProfile::none());
    /// let site = tokio_test::block_on(services.sites.fetch_details("CG001")).unwrap();
    /// assert_eq!(site.name, "Colosseum");
    /// ```
    pub fn seeded(policy: Arc<dyn FailureInjectionPolicy>, latency: LatencyProfile) -> Self {
        fn facade<V: Record>(
            records: Vec<V>,
            policy: &Arc<dyn FailureInjectionPolicy>,
            latency: &LatencyProfile,
        ) -> RemoteFacade<V> {
            RemoteFacade::new(Arc::new(MemoryStore::from_records(records)), Arc::clone(policy), latency.clone())
        }

        Self {
            sites: SiteService::new(facade(seed::sites(), &policy, &latency)),
            accounts: AccountService::new(facade(seed::accounts(), &policy, &latency)),
            points: RefreshmentPointService::new(facade(seed::points(), &policy, &latency)),
            conventions: ConventionService::new(facade(seed::conventions(), &policy, &latency)),
            addresses: AddressService::new(facade(seed::addresses(), &policy, &latency)),
            report_cards: ReportCardService::new(facade(seed::report_cards(), &policy, &latency)),
        }
    }

    pub fn from_config(cfg: &FacadeConfig) -> Self {
        Self::seeded(policy_from_config(cfg), LatencyProfile::from_config(cfg))
    }
}
