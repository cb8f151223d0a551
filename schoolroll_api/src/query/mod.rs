mod common;
pub use self::common::{PageLimit, Query, QueryCommon, SortDirection, SortKey};

mod list;
pub use self::list::{ClassQuery, ListQuery, StudentQuery, TeacherQuery};

mod financial;
pub use self::financial::{FinancialPeriod, FinancialQuery};
