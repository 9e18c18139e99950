use std::str::FromStr;

use serde::Serialize;

use models::site::SitePatch;
use service::errors::ServiceError;
use service::ops;
use service::services::{
    accounts::AccountDetails, addresses::AddressDetails, conventions::ConventionDetails, points::PointDetails,
    report_cards::ReportCardView, sites::{SiteDetails, SiteSummary},
};
use service::Services;

use crate::errors::DispatchError;

/// A typed request for one facade call. Mutating variants carry the
/// caller's confirmation flag.
#[derive(Debug, Clone)]
pub enum Operation {
    ViewSite { id: String },
    SearchSites { query: String },
    UpdateSite { id: String, patch: SitePatch, confirmed: bool },
    DeleteSite { id: String, confirmed: bool },
    ViewAccount { id: String },
    ActivateAccount { id: String, confirmed: bool },
    DeactivateAccount { id: String, confirmed: bool },
    ViewPoint { id: String },
    RatePoint { id: String, rating: f32, confirmed: bool },
    InsertBanner { point_id: String, banner_id: String, image_path: String, confirmed: bool },
    DeleteBanner { point_id: String, banner_id: String, confirmed: bool },
    ViewConvention { id: String },
    ConventionHistory { point_id: String },
    ActivateConvention { id: String, confirmed: bool },
    RejectConvention { id: String, confirmed: bool },
    ViewAddress { id: String },
    ListAddresses,
    DeleteAddress { id: String, confirmed: bool },
    ViewReportCard { id: String },
    ListReportCards { student_id: String },
}

/// Successful result of an operation, serialised for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Site(SiteDetails),
    Sites(Vec<SiteSummary>),
    SiteRemoved(SiteSummary),
    Account(AccountDetails),
    Point(PointDetails),
    Convention(ConventionDetails),
    Conventions(Vec<ConventionDetails>),
    Address(AddressDetails),
    Addresses(Vec<AddressDetails>),
    ReportCard(ReportCardView),
    ReportCards(Vec<ReportCardView>),
}

struct Args<'a> {
    operation: &'static str,
    items: Vec<&'a str>,
    confirmed: bool,
}

impl<'a> Args<'a> {
    /// For mutating operations a trailing `yes`/`y`/`--yes` is the
    /// confirmation flag. Read operations keep every argument.
    fn new(operation: &'static str, raw: &[&'a str]) -> Self {
        let mut items = raw.to_vec();
        let confirmed = ops::is_mutating(operation) && matches!(items.last(), Some(&("yes" | "y" | "--yes")));
        if confirmed {
            items.pop();
        }
        Self { operation, items, confirmed }
    }

    fn required(&self, index: usize, name: &'static str) -> Result<String, DispatchError> {
        self.items
            .get(index)
            .map(|s| s.to_string())
            .ok_or(DispatchError::MissingArgument { operation: self.operation, name })
    }

    fn rest(&self, from: usize) -> String {
        self.items.get(from..).map(|s| s.join(" ")).unwrap_or_default()
    }

    fn invalid(&self, name: &'static str, value: &str) -> DispatchError {
        DispatchError::InvalidArgument { operation: self.operation, name, value: value.to_string() }
    }
}

/// Patch values are single words: `_` stands for a space and `\_` for a
/// literal underscore.
fn decode_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'_') => {
                chars.next();
                out.push('_');
            }
            '_' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}

fn canonical(name: &str) -> Option<&'static str> {
    ops::ALL.iter().copied().find(|op| *op == name)
}

impl Operation {
    /// Map `invoke(operationName, params)` onto a typed operation.
    pub fn parse(name: &str, args: &[&str]) -> Result<Self, DispatchError> {
        let op = canonical(name).ok_or_else(|| DispatchError::UnknownOperation(name.to_string()))?;
        let a = Args::new(op, args);
        let parsed = match op {
            ops::VIEW_SITE => Operation::ViewSite { id: a.required(0, "id")? },
            ops::SEARCH_SITES => Operation::SearchSites { query: a.rest(0) },
            ops::UPDATE_SITE => {
                let id = a.required(0, "id")?;
                let mut patch = SitePatch::default();
                if a.items.len() < 2 {
                    return Err(DispatchError::MissingArgument { operation: op, name: "field=value" });
                }
                for pair in &a.items[1..] {
                    let (field, value) = pair.split_once('=').ok_or_else(|| a.invalid("field=value", pair))?;
                    let value = Some(decode_value(value));
                    match field {
                        "name" => patch.name = value,
                        "city" => patch.city = value,
                        "category" => patch.category = value,
                        "description" => patch.description = value,
                        "opening_hours" | "hours" => patch.opening_hours = value,
                        _ => return Err(a.invalid("field", field)),
                    }
                }
                Operation::UpdateSite { id, patch, confirmed: a.confirmed }
            }
            ops::DELETE_SITE => Operation::DeleteSite { id: a.required(0, "id")?, confirmed: a.confirmed },
            ops::VIEW_ACCOUNT => Operation::ViewAccount { id: a.required(0, "id")? },
            ops::ACTIVATE_ACCOUNT => Operation::ActivateAccount { id: a.required(0, "id")?, confirmed: a.confirmed },
            ops::DEACTIVATE_ACCOUNT => Operation::DeactivateAccount { id: a.required(0, "id")?, confirmed: a.confirmed },
            ops::VIEW_POINT => Operation::ViewPoint { id: a.required(0, "id")? },
            ops::RATE_POINT => {
                let id = a.required(0, "id")?;
                let raw = a.required(1, "rating")?;
                let rating = raw.parse::<f32>().map_err(|_| a.invalid("rating", &raw))?;
                Operation::RatePoint { id, rating, confirmed: a.confirmed }
            }
            ops::INSERT_BANNER => Operation::InsertBanner {
                point_id: a.required(0, "point_id")?,
                banner_id: a.required(1, "banner_id")?,
                image_path: a.required(2, "image_path")?,
                confirmed: a.confirmed,
            },
            ops::DELETE_BANNER => Operation::DeleteBanner {
                point_id: a.required(0, "point_id")?,
                banner_id: a.required(1, "banner_id")?,
                confirmed: a.confirmed,
            },
            ops::VIEW_CONVENTION => Operation::ViewConvention { id: a.required(0, "id")? },
            ops::CONVENTION_HISTORY => Operation::ConventionHistory { point_id: a.required(0, "point_id")? },
            ops::ACTIVATE_CONVENTION => Operation::ActivateConvention { id: a.required(0, "id")?, confirmed: a.confirmed },
            ops::REJECT_CONVENTION => Operation::RejectConvention { id: a.required(0, "id")?, confirmed: a.confirmed },
            ops::VIEW_ADDRESS => Operation::ViewAddress { id: a.required(0, "id")? },
            ops::LIST_ADDRESSES => Operation::ListAddresses,
            ops::DELETE_ADDRESS => Operation::DeleteAddress { id: a.required(0, "id")?, confirmed: a.confirmed },
            ops::VIEW_REPORT_CARD => Operation::ViewReportCard { id: a.required(0, "id")? },
            ops::LIST_REPORT_CARDS => Operation::ListReportCards { student_id: a.required(0, "student_id")? },
            other => return Err(DispatchError::UnknownOperation(other.to_string())),
        };
        Ok(parsed)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::ViewSite { .. } => ops::VIEW_SITE,
            Operation::SearchSites { .. } => ops::SEARCH_SITES,
            Operation::UpdateSite { .. } => ops::UPDATE_SITE,
            Operation::DeleteSite { .. } => ops::DELETE_SITE,
            Operation::ViewAccount { .. } => ops::VIEW_ACCOUNT,
            Operation::ActivateAccount { .. } => ops::ACTIVATE_ACCOUNT,
            Operation::DeactivateAccount { .. } => ops::DEACTIVATE_ACCOUNT,
            Operation::ViewPoint { .. } => ops::VIEW_POINT,
            Operation::RatePoint { .. } => ops::RATE_POINT,
            Operation::InsertBanner { .. } => ops::INSERT_BANNER,
            Operation::DeleteBanner { .. } => ops::DELETE_BANNER,
            Operation::ViewConvention { .. } => ops::VIEW_CONVENTION,
            Operation::ConventionHistory { .. } => ops::CONVENTION_HISTORY,
            Operation::ActivateConvention { .. } => ops::ACTIVATE_CONVENTION,
            Operation::RejectConvention { .. } => ops::REJECT_CONVENTION,
            Operation::ViewAddress { .. } => ops::VIEW_ADDRESS,
            Operation::ListAddresses => ops::LIST_ADDRESSES,
            Operation::DeleteAddress { .. } => ops::DELETE_ADDRESS,
            Operation::ViewReportCard { .. } => ops::VIEW_REPORT_CARD,
            Operation::ListReportCards { .. } => ops::LIST_REPORT_CARDS,
        }
    }

    /// Run the operation against the services. Mutations commit as the
    /// final step, so dropping this future either commits fully or not at all.
    pub async fn execute(self, services: &Services) -> Result<Output, ServiceError> {
        let out = match self {
            Operation::ViewSite { id } => Output::Site(services.sites.fetch_details(&id).await?),
            Operation::SearchSites { query } => Output::Sites(services.sites.search(&query).await?),
            Operation::UpdateSite { id, patch, confirmed } => Output::Site(services.sites.update(&id, patch, confirmed).await?),
            Operation::DeleteSite { id, confirmed } => Output::SiteRemoved(services.sites.delete(&id, confirmed).await?),
            Operation::ViewAccount { id } => Output::Account(services.accounts.fetch(&id).await?),
            Operation::ActivateAccount { id, confirmed } => Output::Account(services.accounts.activate(&id, confirmed).await?),
            Operation::DeactivateAccount { id, confirmed } => {
                Output::Account(services.accounts.deactivate(&id, confirmed).await?)
            }
            Operation::ViewPoint { id } => Output::Point(services.points.fetch(&id).await?),
            Operation::RatePoint { id, rating, confirmed } => {
                Output::Point(services.points.update_rating(&id, rating, confirmed).await?)
            }
            Operation::InsertBanner { point_id, banner_id, image_path, confirmed } => Output::Point(
                services.points.insert_banner(&point_id, &banner_id, &image_path, confirmed).await?,
            ),
            Operation::DeleteBanner { point_id, banner_id, confirmed } => {
                Output::Point(services.points.delete_banner(&point_id, &banner_id, confirmed).await?)
            }
            Operation::ViewConvention { id } => Output::Convention(services.conventions.fetch(&id).await?),
            Operation::ConventionHistory { point_id } => Output::Conventions(services.conventions.history(&point_id).await?),
            Operation::ActivateConvention { id, confirmed } => {
                Output::Convention(services.conventions.activate(&id, confirmed).await?)
            }
            Operation::RejectConvention { id, confirmed } => Output::Convention(services.conventions.reject(&id, confirmed).await?),
            Operation::ViewAddress { id } => Output::Address(services.addresses.fetch(&id).await?),
            Operation::ListAddresses => Output::Addresses(services.addresses.list().await?),
            Operation::DeleteAddress { id, confirmed } => Output::Address(services.addresses.delete(&id, confirmed).await?),
            Operation::ViewReportCard { id } => Output::ReportCard(services.report_cards.fetch(&id).await?),
            Operation::ListReportCards { student_id } => {
                Output::ReportCards(services.report_cards.list_for_student(&student_id).await?)
            }
        };
        Ok(out)
    }
}

/// Parse a whole command line: `<operation> [args...] [yes]`.
impl FromStr for Operation {
    type Err = DispatchError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| DispatchError::UnknownOperation(String::new()))?;
        let args: Vec<&str> = words.collect();
        Operation::parse(name, &args)
    }
}
