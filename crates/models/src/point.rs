use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, require, Record};

pub const DEFAULT_MAX_BANNERS: usize = 5;
pub const RATING_RANGE: std::ops::RangeInclusive<f32> = 0.0..=5.0;
pub const PRICE_TIER_RANGE: std::ops::RangeInclusive<u8> = 1..=4;

const IMAGE_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".gif"];

/// An ETOUR refreshment point (restaurant, bar, ...) and the banners it shows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefreshmentPoint {
    pub id: String,
    pub name: String,
    pub city: String,
    pub rating: f32,
    pub price_tier: u8,
    pub banners: Vec<Banner>,
    pub max_banners: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub id: String,
    pub image_path: String,
    pub inserted_at: DateTime<Utc>,
}

impl Banner {
    pub fn new(id: &str, image_path: &str) -> Self {
        Self { id: id.to_string(), image_path: image_path.to_string(), inserted_at: Utc::now() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        require("banner id", &self.id)?;
        let lower = self.image_path.to_lowercase();
        if !IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            return Err(ModelError::invalid(format!(
                "banner image must be one of {}",
                IMAGE_EXTENSIONS.join(", ")
            )));
        }
        Ok(())
    }
}

impl RefreshmentPoint {
    pub fn new(id: &str, name: &str, city: &str, rating: f32, price_tier: u8) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            rating,
            price_tier,
            banners: Vec::new(),
            max_banners: DEFAULT_MAX_BANNERS,
        }
    }

    pub fn has_banner_slot(&self) -> bool {
        self.banners.len() < self.max_banners
    }

    pub fn banner(&self, banner_id: &str) -> Option<&Banner> {
        self.banners.iter().find(|b| b.id == banner_id)
    }
}

pub fn check_rating(rating: f32) -> Result<(), ModelError> {
    if !RATING_RANGE.contains(&rating) {
        return Err(ModelError::invalid(format!("rating {rating} outside 0.0..=5.0")));
    }
    Ok(())
}

pub fn check_price_tier(tier: u8) -> Result<(), ModelError> {
    if !PRICE_TIER_RANGE.contains(&tier) {
        return Err(ModelError::invalid(format!("price tier {tier} outside 1..=4")));
    }
    Ok(())
}

impl Record for RefreshmentPoint {
    const KIND: &'static str = "refreshment point";

    fn id(&self) -> &str { &self.id }

    fn validate(&self) -> Result<(), ModelError> {
        require("id", &self.id)?;
        require("name", &self.name)?;
        check_rating(self.rating)?;
        check_price_tier(self.price_tier)?;
        if self.banners.len() > self.max_banners {
            return Err(ModelError::invalid("more banners than max_banners"));
        }
        self.banners.iter().try_for_each(Banner::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_and_tier_bounds() {
        assert!(check_rating(0.0).is_ok());
        assert!(check_rating(5.0).is_ok());
        assert!(check_rating(5.1).is_err());
        assert!(check_rating(-0.1).is_err());
        assert!(check_rating(f32::NAN).is_err());
        assert!(check_price_tier(1).is_ok());
        assert!(check_price_tier(4).is_ok());
        assert!(check_price_tier(0).is_err());
        assert!(check_price_tier(5).is_err());
    }

    #[test]
    fn banner_requires_image_extension() {
        assert!(Banner::new("B1", "promo.PNG").validate().is_ok());
        assert!(Banner::new("B1", "promo.txt").validate().is_err());
    }

    #[test]
    fn slot_accounting_follows_max_banners() {
        let mut point = RefreshmentPoint::new("RP01", "Trattoria", "Rome", 4.0, 2);
        point.max_banners = 1;
        assert!(point.has_banner_slot());
        point.banners.push(Banner::new("B1", "a.png"));
        assert!(!point.has_banner_slot());
        assert!(point.banner("B1").is_some());
        point.banners.push(Banner::new("B2", "b.png"));
        assert!(point.validate().is_err());
    }
}
