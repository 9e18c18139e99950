use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, require, Record};

/// An ETOUR cultural heritage site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CulturalHeritage {
    pub id: String,
    pub name: String,
    pub city: String,
    pub category: String,
    pub description: String,
    pub opening_hours: String,
}

impl CulturalHeritage {
    pub fn new(id: &str, name: &str, city: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            category: String::new(),
            description: String::new(),
            opening_hours: String::new(),
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_opening_hours(mut self, hours: &str) -> Self {
        self.opening_hours = hours.to_string();
        self
    }

    /// Case-insensitive match on name or city.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty() || self.name.to_lowercase().contains(&q) || self.city.to_lowercase().contains(&q)
    }
}

impl Record for CulturalHeritage {
    const KIND: &'static str = "cultural heritage";

    fn id(&self) -> &str { &self.id }

    fn validate(&self) -> Result<(), ModelError> {
        require("id", &self.id)?;
        require("name", &self.name)?;
        require("city", &self.city)
    }
}

/// Partial update for a site; `None` leaves the field untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SitePatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub opening_hours: Option<String>,
}

impl SitePatch {
    pub fn apply(&self, site: &mut CulturalHeritage) {
        if let Some(v) = &self.name { site.name = v.clone(); }
        if let Some(v) = &self.city { site.city = v.clone(); }
        if let Some(v) = &self.category { site.category = v.clone(); }
        if let Some(v) = &self.description { site.description = v.clone(); }
        if let Some(v) = &self.opening_hours { site.opening_hours = v.clone(); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let site = CulturalHeritage::new("CG009", "  ", "Rome");
        assert_eq!(site.validate(), Err(ModelError::invalid("name required")));
    }

    #[test]
    fn matches_name_or_city_ignoring_case() {
        let site = CulturalHeritage::new("CG001", "Colosseum", "Rome");
        assert!(site.matches("colos"));
        assert!(site.matches("ROME"));
        assert!(site.matches(""));
        assert!(!site.matches("Florence"));
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut site = CulturalHeritage::new("CG001", "Colosseum", "Rome").with_category("monument");
        SitePatch { opening_hours: Some("09:00-19:00".into()), ..Default::default() }.apply(&mut site);
        assert_eq!(site.opening_hours, "09:00-19:00");
        assert_eq!(site.category, "monument");
        assert_eq!(site.name, "Colosseum");
    }
}
