//! Operation names shared by the facade (latency overrides, logging) and the
//! dispatcher (command parsing, re-entrancy slots).

pub const VIEW_SITE: &str = "view-site";
pub const SEARCH_SITES: &str = "search-sites";
pub const UPDATE_SITE: &str = "update-site";
pub const DELETE_SITE: &str = "delete-site";

pub const VIEW_ACCOUNT: &str = "view-account";
pub const ACTIVATE_ACCOUNT: &str = "activate-account";
pub const DEACTIVATE_ACCOUNT: &str = "deactivate-account";

pub const VIEW_POINT: &str = "view-point";
pub const RATE_POINT: &str = "rate-point";
pub const INSERT_BANNER: &str = "insert-banner";
pub const DELETE_BANNER: &str = "delete-banner";

pub const VIEW_CONVENTION: &str = "view-convention";
pub const CONVENTION_HISTORY: &str = "convention-history";
pub const ACTIVATE_CONVENTION: &str = "activate-convention";
pub const REJECT_CONVENTION: &str = "reject-convention";

pub const VIEW_ADDRESS: &str = "view-address";
pub const LIST_ADDRESSES: &str = "list-addresses";
pub const DELETE_ADDRESS: &str = "delete-address";

pub const VIEW_REPORT_CARD: &str = "view-report-card";
pub const LIST_REPORT_CARDS: &str = "list-report-cards";

pub const ALL: &[&str] = &[
    VIEW_SITE, SEARCH_SITES, UPDATE_SITE, DELETE_SITE,
    VIEW_ACCOUNT, ACTIVATE_ACCOUNT, DEACTIVATE_ACCOUNT,
    VIEW_POINT, RATE_POINT, INSERT_BANNER, DELETE_BANNER,
    VIEW_CONVENTION, CONVENTION_HISTORY, ACTIVATE_CONVENTION, REJECT_CONVENTION,
    VIEW_ADDRESS, LIST_ADDRESSES, DELETE_ADDRESS,
    VIEW_REPORT_CARD, LIST_REPORT_CARDS,
];

/// Operations that change stored state and therefore take a confirmation flag.
pub const MUTATING: &[&str] = &[
    UPDATE_SITE, DELETE_SITE,
    ACTIVATE_ACCOUNT, DEACTIVATE_ACCOUNT,
    RATE_POINT, INSERT_BANNER, DELETE_BANNER,
    ACTIVATE_CONVENTION, REJECT_CONVENTION,
    DELETE_ADDRESS,
];

pub fn is_mutating(operation: &str) -> bool {
    MUTATING.contains(&operation)
}
