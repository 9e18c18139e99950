use serde::Serialize;

use models::report_card::{Grade, ReportCard};

use crate::errors::ServiceError;
use crate::facade::RemoteFacade;
use crate::ops;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCardView {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub school_year: String,
    pub grades: Vec<Grade>,
    pub average: Option<f32>,
}

impl From<ReportCard> for ReportCardView {
    fn from(r: ReportCard) -> Self {
        Self {
            average: r.average(),
            id: r.id,
            student_id: r.student_id,
            student_name: r.student_name,
            school_year: r.school_year,
            grades: r.grades,
        }
    }
}

#[derive(Clone)]
pub struct ReportCardService {
    facade: RemoteFacade<ReportCard>,
}

impl ReportCardService {
    pub fn new(facade: RemoteFacade<ReportCard>) -> Self { Self { facade } }

    pub fn facade(&self) -> &RemoteFacade<ReportCard> { &self.facade }

    pub async fn fetch(&self, id: &str) -> Result<ReportCardView, ServiceError> {
        self.facade.fetch(ops::VIEW_REPORT_CARD, id).await.map(ReportCardView::from)
    }

    /// All report cards of a student; an unknown student is `NotFound`.
    pub async fn list_for_student(&self, student_id: &str) -> Result<Vec<ReportCardView>, ServiceError> {
        let cards = self.facade.search(ops::LIST_REPORT_CARDS, |r| r.student_id == student_id).await?;
        if cards.is_empty() {
            return Err(ServiceError::not_found("student", student_id));
        }
        Ok(cards.into_iter().map(ReportCardView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::test_support::facade_for;
    use models::seed;

    #[tokio::test]
    async fn cards_per_student() {
        let (facade, _) = facade_for(seed::report_cards());
        let svc = ReportCardService::new(facade);

        let cards = svc.list_for_student("S001").await.unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].school_year, "2023/2024");
        assert_eq!(cards[0].average, Some(7.75));

        assert_eq!(svc.list_for_student("S999").await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(svc.fetch("RC003").await.unwrap().student_name, "Luca Neri");
    }
}
