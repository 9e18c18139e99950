use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, require, Record};

pub const MAX_GRADE: f32 = 10.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub subject: String,
    pub value: f32,
}

/// A SMOS student report card for one school year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportCard {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub school_year: String,
    pub grades: Vec<Grade>,
}

impl ReportCard {
    pub fn new(id: &str, student_id: &str, student_name: &str, school_year: &str) -> Self {
        Self {
            id: id.to_string(),
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
            school_year: school_year.to_string(),
            grades: Vec::new(),
        }
    }

    pub fn with_grade(mut self, subject: &str, value: f32) -> Self {
        self.grades.push(Grade { subject: subject.to_string(), value });
        self
    }

    /// Mean of all grades, `None` for an empty card.
    pub fn average(&self) -> Option<f32> {
        if self.grades.is_empty() {
            return None;
        }
        Some(self.grades.iter().map(|g| g.value).sum::<f32>() / self.grades.len() as f32)
    }
}

impl Record for ReportCard {
    const KIND: &'static str = "report card";

    fn id(&self) -> &str { &self.id }

    fn validate(&self) -> Result<(), ModelError> {
        require("id", &self.id)?;
        require("student_id", &self.student_id)?;
        for g in &self.grades {
            if !(0.0..=MAX_GRADE).contains(&g.value) {
                return Err(ModelError::invalid(format!("grade for {} outside 0..=10", g.subject)));
            }
        }
        Ok(())
    }
}
