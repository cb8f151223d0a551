use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
///
/// The backend names the row array after the collection on some deployments
/// (`classes`, `teachers`, `students`); those names are accepted as aliases
/// for `items`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    #[serde(alias = "classes", alias = "teachers", alias = "students")]
    pub items: Vec<T>,
    #[serde(default = "default_total_pages")]
    pub total_pages: i64,
}

fn default_total_pages() -> i64 {
    1
}

/// Structured error body returned by the backend on non-success statuses.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
