//! Start-up data for the demo stores.

use crate::{
    account::TouristAccount,
    address::Address,
    convention::Convention,
    point::{Banner, RefreshmentPoint},
    report_card::ReportCard,
    site::CulturalHeritage,
};

pub fn sites() -> Vec<CulturalHeritage> {
    vec![
        CulturalHeritage::new("CG001", "Colosseum", "Rome")
            .with_category("monument")
            .with_description("Flavian amphitheatre")
            .with_opening_hours("08:30-19:15"),
        CulturalHeritage::new("CG002", "Uffizi Gallery", "Florence")
            .with_category("museum")
            .with_opening_hours("08:15-18:30"),
        CulturalHeritage::new("CG003", "Pompeii", "Naples").with_category("archaeological site"),
    ]
}

pub fn accounts() -> Vec<TouristAccount> {
    vec![
        TouristAccount::new("T001", "mrossi", "Mario Rossi", "mario.rossi@example.com", true),
        TouristAccount::new("T002", "lbianchi", "Laura Bianchi", "laura.bianchi@example.com", false),
    ]
}

pub fn points() -> Vec<RefreshmentPoint> {
    let mut trattoria = RefreshmentPoint::new("RP001", "Trattoria da Enzo", "Rome", 4.5, 2);
    trattoria.banners.push(Banner::new("BN001", "banners/enzo-summer.png"));
    vec![trattoria, RefreshmentPoint::new("RP002", "Caffe Gilli", "Florence", 4.0, 3)]
}

pub fn conventions() -> Vec<Convention> {
    vec![
        Convention::pending("CV001", "RP001", "10% discount for tour groups"),
        Convention::pending("CV002", "RP002", "free coffee with museum ticket"),
    ]
}

pub fn addresses() -> Vec<Address> {
    vec![
        Address::new("1", "123 Main St", "New York", "10001", "USA").with_class("ClassA"),
        Address::new("2", "456 Oak Ave", "Los Angeles", "90001", "USA"),
        Address::new("3", "789 Pine Rd", "Chicago", "60601", "USA")
            .with_class("ClassB")
            .with_class("ClassC"),
    ]
}

pub fn report_cards() -> Vec<ReportCard> {
    vec![
        ReportCard::new("RC001", "S001", "Anna Verdi", "2023/2024")
            .with_grade("mathematics", 8.0)
            .with_grade("italian", 7.5),
        ReportCard::new("RC002", "S001", "Anna Verdi", "2024/2025").with_grade("mathematics", 9.0),
        ReportCard::new("RC003", "S002", "Luca Neri", "2024/2025").with_grade("history", 6.0),
    ]
}
