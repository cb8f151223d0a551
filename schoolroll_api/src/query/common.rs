//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields,
//! page limits and sort keys.

use std::fmt;
use std::str::FromStr;

use url::Url;

/// Trait implemented by list query builders. Provides URL serialization and
/// shared builder methods for pagination and filtering.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page number (1-indexed).
    fn with_page(mut self, page: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = page;
        self
    }

    /// Sets the number of rows per page.
    fn with_limit(mut self, limit: PageLimit) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = limit;
        self
    }

    /// Sets the free-text name filter. Matching happens server-side.
    fn with_filter(mut self, filter: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().filter = filter.to_string();
        self
    }
}

/// Rows per page. The backend and the list screens only offer these three sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageLimit {
    #[default]
    Ten = 10,
    TwentyFive = 25,
    Fifty = 50,
}

impl PageLimit {
    pub const ALL: [PageLimit; 3] = [PageLimit::Ten, PageLimit::TwentyFive, PageLimit::Fifty];

    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for PageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

impl TryFrom<u32> for PageLimit {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(PageLimit::Ten),
            25 => Ok(PageLimit::TwentyFive),
            50 => Ok(PageLimit::Fifty),
            _ => Err(format!(
                "unsupported page size {}. Valid values: 10, 25, 50",
                value
            )),
        }
    }
}

impl FromStr for PageLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("page size '{}' is not a number", s))?;
        PageLimit::try_from(n)
    }
}

/// Sort order for list results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order. Sent as the bare field name.
    #[default]
    Asc,
    /// Descending order. Sent as the field name prefixed with `-`.
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// A sort column plus direction, rendered on the wire as `field` or `-field`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortKey<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// The key that results from activating `field` while `current` is in effect.
    ///
    /// Activating the current column flips its direction; any other column
    /// starts ascending. Once a column is active there is no way back to the
    /// unsorted state.
    pub fn toggle(current: Option<Self>, field: F) -> Self {
        match current {
            Some(key) if key.field == field => Self {
                field,
                direction: key.direction.reversed(),
            },
            _ => Self::asc(field),
        }
    }
}

impl<F: fmt::Display> fmt::Display for SortKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.field),
            SortDirection::Desc => write!(f, "-{}", self.field),
        }
    }
}

impl<F> FromStr for SortKey<F>
where
    F: FromStr<Err = String>,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix('-') {
            Some(field) => Ok(SortKey {
                field: field.parse()?,
                direction: SortDirection::Desc,
            }),
            None => Ok(SortKey {
                field: s.parse()?,
                direction: SortDirection::Asc,
            }),
        }
    }
}

/// Fields shared by all list queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryCommon {
    /// Page number (1-indexed). Defaults to 1.
    pub page: u32,
    /// Rows per page. Defaults to 10.
    pub limit: PageLimit,
    /// Name filter. Empty means no filtering.
    pub filter: String,
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            page: 1,
            limit: PageLimit::default(),
            filter: String::new(),
        }
    }
}

impl QueryCommon {
    /// Appends the pagination and filter parameters to the URL.
    ///
    /// The filter is always sent, empty or not, matching what the list
    /// endpoints expect.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("page", &self.page.to_string())
            .append_pair("limit", &self.limit.to_string())
            .append_pair("filter", &self.filter);
        url
    }
}
