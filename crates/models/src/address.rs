use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, require, Record};

/// A SMOS school address; classes held there reference it by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
    pub associated_classes: Vec<String>,
}

impl Address {
    pub fn new(id: &str, street: &str, city: &str, zip_code: &str, country: &str) -> Self {
        Self {
            id: id.to_string(),
            street: street.to_string(),
            city: city.to_string(),
            zip_code: zip_code.to_string(),
            country: country.to_string(),
            associated_classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.associated_classes.push(class.to_string());
        self
    }

    pub fn full_address(&self) -> String {
        format!("{}, {} {}, {}", self.street, self.zip_code, self.city, self.country)
    }
}

impl Record for Address {
    const KIND: &'static str = "address";

    fn id(&self) -> &str { &self.id }

    fn validate(&self) -> Result<(), ModelError> {
        require("id", &self.id)?;
        require("street", &self.street)?;
        require("city", &self.city)
    }
}
