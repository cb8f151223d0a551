//! Typed client for the school-management backend REST API.

mod client;
mod errors;
mod query;
mod resource;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{
    ClassQuery, FinancialPeriod, FinancialQuery, ListQuery, PageLimit, Query, QueryCommon,
    SortDirection, SortKey, StudentQuery, TeacherQuery,
};
pub use self::resource::Resource;
