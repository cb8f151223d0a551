use std::fmt::Display;

use url::Url;

use crate::types::{ClassSortBy, StudentSortBy, TeacherSortBy};

use super::{
    common::{QueryCommon, SortDirection, SortKey},
    Query,
};

/// Query for one page of a CRUD list endpoint, generic over the sort column type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery<F> {
    pub common: QueryCommon,
    /// Active sort. `None` leaves ordering to the backend.
    pub sort: Option<SortKey<F>>,
}

pub type ClassQuery = ListQuery<ClassSortBy>;
pub type TeacherQuery = ListQuery<TeacherSortBy>;
pub type StudentQuery = ListQuery<StudentSortBy>;

impl<F> Default for ListQuery<F> {
    fn default() -> Self {
        Self {
            common: QueryCommon::default(),
            sort: None,
        }
    }
}

impl<F: Display> Query for ListQuery<F> {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        let sort_by = match &self.sort {
            Some(key) => key.to_string(),
            None => String::new(),
        };
        url.query_pairs_mut().append_pair("sortBy", &sort_by);
        url
    }
}

impl<F: Copy + PartialEq> ListQuery<F> {
    pub fn with_sort(mut self, sort: SortKey<F>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_sort_by(mut self, field: F, direction: SortDirection) -> Self {
        self.sort = Some(SortKey { field, direction });
        self
    }

    /// The `sortBy` value as sent on the wire.
    pub fn sort_by(&self) -> String
    where
        F: Display,
    {
        self.sort.map(|key| key.to_string()).unwrap_or_default()
    }
}
