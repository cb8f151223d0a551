//! Library layer for Schoolroll: list and form controllers, validation, and
//! analytics views over the backend API.
//!
//! Controllers are generic over the backend seams in [`source`], implemented
//! by [`schoolroll_api::Client`] and by in-memory stand-ins in tests.

pub mod analytics;
pub mod config;
mod draft;
pub mod error;
pub mod form;
pub mod list;
pub mod source;
pub mod validation;

pub use schoolroll_api;
pub use schoolroll_api::types;
pub use schoolroll_api::{
    Client, ClassQuery, FinancialPeriod, FinancialQuery, ListQuery, PageLimit, Query,
    Resource, SortDirection, SortKey, StudentQuery, TeacherQuery,
};

pub use analytics::{month_name, year_options, ClassAnalyticsView, FinancialView};
pub use config::Config;
pub use draft::calendar_date;
pub use error::SchoolError;
pub use form::{FormController, FormDraft, SubmitOutcome};
pub use list::{FetchTicket, ListController};
pub use source::{AnalyticsSource, EnrolmentSource, ListSource, RecordSource, StudentListSource};
pub use validation::{evaluate, FieldErrors, Rule};
