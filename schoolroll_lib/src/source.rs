//! Backend seams used by the controllers.
//!
//! Controllers are generic over these traits so they can be driven by the
//! real [`Client`] or by an in-memory stand-in.

use schoolroll_api::types::{
    ClassAnalytics, FinancialSummary, PaginatedResponse, StudentRecord,
};
use schoolroll_api::{Client, Error, FinancialQuery, ListQuery, Resource};

use crate::form::FormDraft;

/// Paged listing and deletion of one collection.
#[allow(async_fn_in_trait)]
pub trait ListSource<R: Resource> {
    async fn fetch_page(
        &self,
        query: &ListQuery<R::SortBy>,
    ) -> Result<PaginatedResponse<R>, Error>;

    async fn delete(&self, id: &str) -> Result<(), Error>;
}

/// Loading and saving single records of the collection a draft belongs to.
#[allow(async_fn_in_trait)]
pub trait RecordSource<D: FormDraft> {
    async fn fetch_one(&self, id: &str) -> Result<D::Record, Error>;

    async fn create(&self, draft: &D) -> Result<(), Error>;

    async fn update(&self, id: &str, draft: &D) -> Result<(), Error>;
}

/// The student-to-class relationship endpoints.
#[allow(async_fn_in_trait)]
pub trait EnrolmentSource {
    async fn assign(&self, student_id: &str, class_id: &str) -> Result<(), Error>;

    async fn unassign(&self, student_id: &str) -> Result<(), Error>;
}

/// The read-only analytics endpoints.
#[allow(async_fn_in_trait)]
pub trait AnalyticsSource {
    async fn class_analytics(&self, class_id: &str) -> Result<ClassAnalytics, Error>;

    async fn financials(&self, query: &FinancialQuery) -> Result<FinancialSummary, Error>;
}

impl<R: Resource> ListSource<R> for Client {
    async fn fetch_page(
        &self,
        query: &ListQuery<R::SortBy>,
    ) -> Result<PaginatedResponse<R>, Error> {
        self.list::<R>(query).await
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        Client::delete::<R>(self, id).await.map(|_| ())
    }
}

impl<D: FormDraft> RecordSource<D> for Client {
    async fn fetch_one(&self, id: &str) -> Result<D::Record, Error> {
        self.get::<D::Record>(id).await
    }

    async fn create(&self, draft: &D) -> Result<(), Error> {
        Client::create::<D::Record, D>(self, draft).await.map(|_| ())
    }

    async fn update(&self, id: &str, draft: &D) -> Result<(), Error> {
        Client::update::<D::Record, D>(self, id, draft)
            .await
            .map(|_| ())
    }
}

impl EnrolmentSource for Client {
    async fn assign(&self, student_id: &str, class_id: &str) -> Result<(), Error> {
        self.assign_student_to_class(student_id, class_id)
            .await
            .map(|_| ())
    }

    async fn unassign(&self, student_id: &str) -> Result<(), Error> {
        self.unassign_student_from_class(student_id)
            .await
            .map(|_| ())
    }
}

impl AnalyticsSource for Client {
    async fn class_analytics(&self, class_id: &str) -> Result<ClassAnalytics, Error> {
        self.get_class_analytics(class_id).await
    }

    async fn financials(&self, query: &FinancialQuery) -> Result<FinancialSummary, Error> {
        self.get_financial_analytics(query).await
    }
}

/// Marker for list sources that can also move students between classes.
pub trait StudentListSource: ListSource<StudentRecord> + EnrolmentSource {}

impl<T: ListSource<StudentRecord> + EnrolmentSource> StudentListSource for T {}
