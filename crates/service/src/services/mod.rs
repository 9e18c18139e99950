//! Domain services: typed use-case operations over the facade, returning DTOs.

pub mod sites;
pub mod accounts;
pub mod points;
pub mod conventions;
pub mod addresses;
pub mod report_cards;
