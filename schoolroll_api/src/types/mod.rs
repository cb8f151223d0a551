mod meta;
pub use self::meta::{ErrorBody, PaginatedResponse};

mod reference;
pub use self::reference::EntityRef;

mod class;
pub use self::class::{ClassDraft, ClassID, ClassRecord, ClassSortBy};

mod teacher;
pub use self::teacher::{TeacherDraft, TeacherGender, TeacherID, TeacherRecord, TeacherSortBy};

mod student;
pub use self::student::{StudentDraft, StudentGender, StudentID, StudentRecord, StudentSortBy};

mod analytics;
pub use self::analytics::{ClassAnalytics, FinancialSummary, GenderDistribution};
