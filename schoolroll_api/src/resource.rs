//! The [`Resource`] trait shared by classes, teachers and students.

use std::fmt::{Debug, Display};

use serde::de::DeserializeOwned;

/// A CRUD collection exposed by the backend under `/{entity}s`.
pub trait Resource: DeserializeOwned {
    /// Collection path relative to the API base, e.g. `/classes`.
    const PATH: &'static str;
    /// Lower-case singular noun, used in user-facing messages.
    const SINGULAR: &'static str;
    /// Lower-case plural noun, used in user-facing messages.
    const PLURAL: &'static str;
    /// Extra query parameters always sent with list requests.
    const LIST_PARAMS: &'static [(&'static str, &'static str)] = &[];

    /// Columns the list endpoint can sort by.
    type SortBy: Copy + PartialEq + Display + Debug;

    /// Backend-assigned identifier.
    fn id(&self) -> &str;

    /// Path of a single record.
    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}
