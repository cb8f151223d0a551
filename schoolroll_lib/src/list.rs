//! Paged, filtered, sortable list controller.

use schoolroll_api::types::{EntityRef, PaginatedResponse, StudentRecord};
use schoolroll_api::{Error, ListQuery, PageLimit, Resource, SortKey};

use crate::error::SchoolError;
use crate::source::{ListSource, StudentListSource};

/// Handle for one dispatched list fetch.
///
/// Only the completion of the most recently dispatched ticket is applied;
/// anything older is discarded when it lands.
#[derive(Debug, Clone)]
pub struct FetchTicket<F> {
    seq: u64,
    query: ListQuery<F>,
}

impl<F> FetchTicket<F> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The query state at dispatch time.
    pub fn query(&self) -> &ListQuery<F> {
        &self.query
    }
}

/// Owns the query state of one list screen and the rows it produced.
pub struct ListController<R: Resource, S> {
    source: S,
    query: ListQuery<R::SortBy>,
    rows: Vec<R>,
    total_pages: u32,
    loading: bool,
    error: Option<String>,
    dispatched: u64,
}

impl<R, S> ListController<R, S>
where
    R: Resource,
    S: ListSource<R>,
{
    /// Page 1, ten rows, no filter, backend order. Nothing is fetched yet.
    pub fn new(source: S) -> Self {
        Self::with_query(source, ListQuery::default())
    }

    pub fn with_query(source: S, query: ListQuery<R::SortBy>) -> Self {
        Self {
            source,
            query,
            rows: Vec::new(),
            total_pages: 1,
            loading: false,
            error: None,
            dispatched: 0,
        }
    }

    pub fn query(&self) -> &ListQuery<R::SortBy> {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.query.common.page
    }

    pub fn limit(&self) -> PageLimit {
        self.query.common.limit
    }

    pub fn filter(&self) -> &str {
        &self.query.common.filter
    }

    pub fn sort(&self) -> Option<SortKey<R::SortBy>> {
        self.query.sort
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Always at least 1.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Banner text of the last failed fetch or mutation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Drops the displayed rows, e.g. after a failed fetch the caller no
    /// longer wants stale rows on screen.
    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Marks a fetch of the current query as dispatched and returns its ticket.
    pub fn begin_fetch(&mut self) -> FetchTicket<R::SortBy> {
        self.dispatched += 1;
        self.loading = true;
        tracing::debug!(
            "Fetching {} #{} (page {}, limit {}, filter '{}', sortBy '{}')",
            R::PLURAL,
            self.dispatched,
            self.query.common.page,
            self.query.common.limit,
            self.query.common.filter,
            self.query.sort_by()
        );
        FetchTicket {
            seq: self.dispatched,
            query: self.query.clone(),
        }
    }

    /// Applies the result of a dispatched fetch.
    ///
    /// Returns `Ok(false)` when a newer fetch has been dispatched since the
    /// ticket was issued; the result is then dropped and the busy indicator
    /// stays set for the newer fetch. A failure sets the banner and keeps the
    /// previous rows.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket<R::SortBy>,
        result: Result<PaginatedResponse<R>, Error>,
    ) -> Result<bool, SchoolError> {
        if ticket.seq != self.dispatched {
            tracing::warn!(
                "Discarding stale {} fetch #{} (latest is #{})",
                R::PLURAL,
                ticket.seq,
                self.dispatched
            );
            return Ok(false);
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.rows = page.items;
                self.total_pages = u32::try_from(page.total_pages.max(1)).unwrap_or(u32::MAX);
                self.error = None;
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Fetching {} failed: {}", R::PLURAL, e);
                self.error = Some(format!("Error fetching {}", R::PLURAL));
                Err(e.into())
            }
        }
    }

    /// Re-fetches with the current state unchanged.
    pub async fn refresh(&mut self) -> Result<(), SchoolError> {
        let ticket = self.begin_fetch();
        let result = self.source.fetch_page(&ticket.query).await;
        self.complete_fetch(ticket, result).map(|_| ())
    }

    pub async fn set_filter(&mut self, filter: &str) -> Result<(), SchoolError> {
        self.query.common.filter = filter.to_string();
        self.query.common.page = 1;
        self.refresh().await
    }

    pub async fn set_limit(&mut self, limit: PageLimit) -> Result<(), SchoolError> {
        self.query.common.limit = limit;
        self.query.common.page = 1;
        self.refresh().await
    }

    /// Moves to `page`. Keeping it within `1..=total_pages` is up to the caller.
    pub async fn set_page(&mut self, page: u32) -> Result<(), SchoolError> {
        self.query.common.page = page;
        self.refresh().await
    }

    /// Sorts by `field`, flipping direction when it is already the sort column.
    pub async fn toggle_sort(&mut self, field: R::SortBy) -> Result<(), SchoolError> {
        self.query.sort = Some(SortKey::toggle(self.query.sort, field));
        self.refresh().await
    }

    /// Deletes a record, then resynchronises with the backend.
    ///
    /// When the deleted row was the last one on a page past the first, the
    /// controller steps back a page before re-fetching.
    pub async fn delete(&mut self, id: &str) -> Result<(), SchoolError> {
        if let Err(e) = self.source.delete(id).await {
            tracing::error!("Deleting {} {} failed: {}", R::SINGULAR, id, e);
            self.error = Some(format!("Error deleting {}", R::SINGULAR));
            return Err(e.into());
        }

        let before = self.rows.len();
        self.rows.retain(|row| row.id() != id);
        let removed = self.rows.len() < before;
        if removed && self.rows.is_empty() && self.query.common.page > 1 {
            self.query.common.page -= 1;
        }
        self.refresh().await
    }
}

impl<S> ListController<StudentRecord, S>
where
    S: StudentListSource,
{
    /// Puts a student in `class`, updating the row before the backend answers.
    /// The previous class is restored if the call fails.
    pub async fn assign_class(
        &mut self,
        student_id: &str,
        class: EntityRef,
    ) -> Result<(), SchoolError> {
        let class_id = class.id.clone();
        let previous = self.swap_class(student_id, Some(class));
        let result = self.source.assign(student_id, &class_id).await;
        self.settle_enrolment(student_id, previous, result, "Error assigning student to class")
    }

    /// Removes a student from their class, optimistically like
    /// [`assign_class`](Self::assign_class).
    pub async fn unassign_class(&mut self, student_id: &str) -> Result<(), SchoolError> {
        let previous = self.swap_class(student_id, None);
        let result = self.source.unassign(student_id).await;
        self.settle_enrolment(
            student_id,
            previous,
            result,
            "Error unassigning student from class",
        )
    }

    /// Sets the class of the student's row, returning what it was. `None` when
    /// the student is not on the current page.
    fn swap_class(
        &mut self,
        student_id: &str,
        class: Option<EntityRef>,
    ) -> Option<Option<EntityRef>> {
        self.rows
            .iter_mut()
            .find(|row| row.id == student_id)
            .map(|row| std::mem::replace(&mut row.class, class))
    }

    fn settle_enrolment(
        &mut self,
        student_id: &str,
        previous: Option<Option<EntityRef>>,
        result: Result<(), Error>,
        fallback: &str,
    ) -> Result<(), SchoolError> {
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                if let Some(previous) = previous {
                    tracing::warn!("Reverting class of student {} after failure", student_id);
                    self.swap_class(student_id, previous);
                }
                let err = SchoolError::from(e);
                self.error = Some(err.user_message(fallback));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use schoolroll_api::types::{ClassRecord, ClassSortBy, StudentGender, StudentSortBy};
    use schoolroll_api::SortDirection;

    use super::*;
    use crate::source::EnrolmentSource;

    /// Serves queued pages and records every query it was asked for.
    struct FakeList<R> {
        pages: RefCell<VecDeque<Result<PaginatedResponse<R>, Error>>>,
        queries: RefCell<Vec<String>>,
        deleted: RefCell<Vec<String>>,
        fail_delete: bool,
        fail_enrolment: bool,
        enrolment_calls: RefCell<Vec<String>>,
    }

    impl<R> FakeList<R> {
        fn new() -> Self {
            Self {
                pages: RefCell::new(VecDeque::new()),
                queries: RefCell::new(Vec::new()),
                deleted: RefCell::new(Vec::new()),
                fail_delete: false,
                fail_enrolment: false,
                enrolment_calls: RefCell::new(Vec::new()),
            }
        }

        fn push_page(&self, items: Vec<R>, total_pages: u32) {
            self.pages
                .borrow_mut()
                .push_back(Ok(PaginatedResponse {
                    items,
                    total_pages: i64::from(total_pages),
                }));
        }

        fn push_failure(&self) {
            self.pages.borrow_mut().push_back(Err(Error::RequestFailed));
        }

        fn last_query(&self) -> String {
            self.queries.borrow().last().cloned().unwrap_or_default()
        }
    }

    impl<R: Resource> ListSource<R> for FakeList<R> {
        async fn fetch_page(
            &self,
            query: &ListQuery<R::SortBy>,
        ) -> Result<PaginatedResponse<R>, Error> {
            self.queries.borrow_mut().push(format!(
                "page={}&limit={}&filter={}&sortBy={}",
                query.common.page,
                query.common.limit,
                query.common.filter,
                query.sort_by()
            ));
            self.pages
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(Error::Decode("no page queued".to_string())))
        }

        async fn delete(&self, id: &str) -> Result<(), Error> {
            if self.fail_delete {
                return Err(Error::HttpStatus {
                    status: 500,
                    body: String::new(),
                    message: None,
                });
            }
            self.deleted.borrow_mut().push(id.to_string());
            Ok(())
        }
    }

    impl EnrolmentSource for FakeList<StudentRecord> {
        async fn assign(&self, student_id: &str, class_id: &str) -> Result<(), Error> {
            self.enrolment_calls
                .borrow_mut()
                .push(format!("assign {} {}", student_id, class_id));
            if self.fail_enrolment {
                return Err(Error::HttpStatus {
                    status: 400,
                    body: r#"{"message":"Class is full"}"#.to_string(),
                    message: Some("Class is full".to_string()),
                });
            }
            Ok(())
        }

        async fn unassign(&self, student_id: &str) -> Result<(), Error> {
            self.enrolment_calls
                .borrow_mut()
                .push(format!("unassign {}", student_id));
            if self.fail_enrolment {
                return Err(Error::RequestFailed);
            }
            Ok(())
        }
    }

    fn class(id: &str, name: &str) -> ClassRecord {
        ClassRecord {
            id: id.to_string(),
            name: name.to_string(),
            year: 2024,
            teacher: None,
            student_fees: 100.0,
            student_limit: 30,
            students: Vec::new(),
        }
    }

    fn student(id: &str, class: Option<EntityRef>) -> StudentRecord {
        StudentRecord {
            id: id.to_string(),
            name: format!("Student {}", id),
            gender: StudentGender::Female,
            dob: "2014-12-09T00:00:00.000Z".to_string(),
            contact: "5550001111".to_string(),
            fees_paid: 0.0,
            class,
        }
    }

    #[tokio::test]
    async fn refresh_loads_rows_and_pages() {
        let source = FakeList::new();
        source.push_page(vec![class("c1", "A"), class("c2", "B")], 4);
        let mut list: ListController<ClassRecord, _> = ListController::new(source);

        list.refresh().await.unwrap();
        assert_eq!(list.rows().len(), 2);
        assert_eq!(list.total_pages(), 4);
        assert!(!list.is_loading());
        assert_eq!(list.source().last_query(), "page=1&limit=10&filter=&sortBy=");
    }

    #[tokio::test]
    async fn zero_total_pages_reads_as_one() {
        let source = FakeList::new();
        source.push_page(Vec::new(), 0);
        let mut list: ListController<ClassRecord, _> = ListController::new(source);
        list.refresh().await.unwrap();
        assert_eq!(list.total_pages(), 1);
    }

    #[tokio::test]
    async fn filter_and_limit_reset_page() {
        let source = FakeList::new();
        for _ in 0..4 {
            source.push_page(vec![class("c1", "A")], 5);
        }
        let mut list: ListController<ClassRecord, _> = ListController::new(source);

        list.set_page(3).await.unwrap();
        assert_eq!(list.page(), 3);
        list.set_filter("grade").await.unwrap();
        assert_eq!(list.page(), 1);
        assert_eq!(list.source().last_query(), "page=1&limit=10&filter=grade&sortBy=");

        list.set_page(4).await.unwrap();
        assert_eq!(list.page(), 4);
        list.set_limit(PageLimit::Fifty).await.unwrap();
        assert_eq!(list.page(), 1);
        assert_eq!(list.limit(), PageLimit::Fifty);
    }

    #[tokio::test]
    async fn toggle_sort_cycles_on_same_column() {
        let source = FakeList::new();
        for _ in 0..4 {
            source.push_page(Vec::new(), 1);
        }
        let mut list: ListController<ClassRecord, _> = ListController::new(source);

        list.toggle_sort(ClassSortBy::Name).await.unwrap();
        assert_eq!(list.query().sort_by(), "name");
        list.toggle_sort(ClassSortBy::Name).await.unwrap();
        assert_eq!(list.query().sort_by(), "-name");
        list.toggle_sort(ClassSortBy::Name).await.unwrap();
        assert_eq!(list.query().sort_by(), "name");
        list.toggle_sort(ClassSortBy::Year).await.unwrap();
        assert_eq!(list.sort(), Some(SortKey::asc(ClassSortBy::Year)));
    }

    #[tokio::test]
    async fn other_column_after_descending_starts_ascending() {
        let source = FakeList::new();
        for _ in 0..2 {
            source.push_page(Vec::new(), 1);
        }
        let query = ListQuery::default().with_sort_by(StudentSortBy::FeesPaid, SortDirection::Desc);
        let mut list: ListController<StudentRecord, _> = ListController::with_query(source, query);

        list.toggle_sort(StudentSortBy::Name).await.unwrap();
        assert_eq!(list.query().sort_by(), "name");
        list.toggle_sort(StudentSortBy::Name).await.unwrap();
        assert_eq!(list.source().last_query(), "page=1&limit=10&filter=&sortBy=-name");
    }

    #[tokio::test]
    async fn failed_fetch_keeps_rows_and_sets_banner() {
        let source = FakeList::new();
        source.push_page(vec![class("c1", "A")], 2);
        source.push_failure();
        source.push_page(vec![class("c3", "C")], 2);
        let mut list: ListController<ClassRecord, _> = ListController::new(source);

        list.refresh().await.unwrap();
        assert!(list.set_page(2).await.is_err());
        assert_eq!(list.error(), Some("Error fetching classes"));
        assert_eq!(list.rows()[0].id, "c1");
        assert!(!list.is_loading());

        list.refresh().await.unwrap();
        assert!(list.error().is_none());
        assert_eq!(list.rows()[0].id, "c3");
    }

    #[tokio::test]
    async fn clear_rows_drops_stale_rows() {
        let source = FakeList::new();
        source.push_page(vec![class("c1", "A")], 1);
        let mut list: ListController<ClassRecord, _> = ListController::new(source);
        list.refresh().await.unwrap();
        list.clear_rows();
        assert!(list.rows().is_empty());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut list: ListController<ClassRecord, _> = ListController::new(FakeList::new());

        let first = list.begin_fetch();
        let second = list.begin_fetch();
        assert!(second.seq() > first.seq());

        let applied = list
            .complete_fetch(
                second,
                Ok(PaginatedResponse {
                    items: vec![class("new", "Newer")],
                    total_pages: 1,
                }),
            )
            .unwrap();
        assert!(applied);

        let applied = list
            .complete_fetch(
                first,
                Ok(PaginatedResponse {
                    items: vec![class("old", "Older")],
                    total_pages: 9,
                }),
            )
            .unwrap();
        assert!(!applied);
        assert_eq!(list.rows()[0].id, "new");
        assert_eq!(list.total_pages(), 1);
    }

    #[test]
    fn stale_completion_keeps_busy_until_latest_lands() {
        let mut list: ListController<ClassRecord, _> = ListController::new(FakeList::new());
        let first = list.begin_fetch();
        let second = list.begin_fetch();

        assert!(!list.complete_fetch(first, Err(Error::RequestFailed)).unwrap());
        assert!(list.is_loading());
        assert!(list.error().is_none());

        list.complete_fetch(
            second,
            Ok(PaginatedResponse {
                items: Vec::new(),
                total_pages: 1,
            }),
        )
        .unwrap();
        assert!(!list.is_loading());
    }

    #[test]
    fn ticket_captures_query_at_dispatch() {
        let mut list: ListController<ClassRecord, _> = ListController::new(FakeList::new());
        let ticket = list.begin_fetch();
        assert_eq!(ticket.query().common.page, 1);
    }

    #[tokio::test]
    async fn deleting_only_row_on_page_three_moves_to_page_two() {
        let source = FakeList::new();
        source.push_page(vec![class("c21", "Last")], 3);
        source.push_page(vec![class("c11", "X"), class("c12", "Y")], 2);
        let mut list: ListController<ClassRecord, _> = ListController::new(source);
        list.set_page(3).await.unwrap();

        list.delete("c21").await.unwrap();
        assert_eq!(list.page(), 2);
        assert_eq!(list.source().deleted.borrow().as_slice(), ["c21"]);
        assert_eq!(list.source().last_query(), "page=2&limit=10&filter=&sortBy=");
        assert_eq!(list.rows().len(), 2);
    }

    #[tokio::test]
    async fn deleting_with_rows_left_keeps_page() {
        let source = FakeList::new();
        source.push_page(vec![class("c1", "A"), class("c2", "B")], 3);
        source.push_page(vec![class("c2", "B"), class("c3", "C")], 3);
        let mut list: ListController<ClassRecord, _> = ListController::new(source);
        list.set_page(3).await.unwrap();

        list.delete("c1").await.unwrap();
        assert_eq!(list.page(), 3);
        assert_eq!(list.source().queries.borrow().len(), 2);
        assert_eq!(list.source().last_query(), "page=3&limit=10&filter=&sortBy=");
    }

    #[tokio::test]
    async fn deleting_only_row_on_first_page_stays() {
        let source = FakeList::new();
        source.push_page(vec![class("c1", "A")], 1);
        source.push_page(Vec::new(), 1);
        let mut list: ListController<ClassRecord, _> = ListController::new(source);
        list.refresh().await.unwrap();

        list.delete("c1").await.unwrap();
        assert_eq!(list.page(), 1);
        assert!(list.rows().is_empty());
    }

    #[tokio::test]
    async fn failed_delete_sets_banner_and_keeps_rows() {
        let mut source = FakeList::new();
        source.fail_delete = true;
        source.push_page(vec![class("c1", "A")], 1);
        let mut list: ListController<ClassRecord, _> = ListController::new(source);
        list.refresh().await.unwrap();

        assert!(list.delete("c1").await.is_err());
        assert_eq!(list.error(), Some("Error deleting class"));
        assert_eq!(list.rows().len(), 1);
        assert_eq!(list.source().queries.borrow().len(), 1);
    }

    #[tokio::test]
    async fn assign_updates_row_in_place() {
        let source = FakeList::new();
        source.push_page(vec![student("s1", None)], 1);
        let mut list: ListController<StudentRecord, _> = ListController::new(source);
        list.refresh().await.unwrap();

        list.assign_class("s1", EntityRef::named("c101", "Grade 5 - Blue"))
            .await
            .unwrap();
        assert_eq!(
            list.rows()[0].class.as_ref().map(|c| c.label()),
            Some("Grade 5 - Blue")
        );
        assert_eq!(
            list.source().enrolment_calls.borrow().as_slice(),
            ["assign s1 c101"]
        );
    }

    #[tokio::test]
    async fn failed_assign_restores_previous_class() {
        let mut source = FakeList::new();
        source.fail_enrolment = true;
        let original = EntityRef::named("c100", "Grade 4");
        source.push_page(vec![student("s1", Some(original.clone()))], 1);
        let mut list: ListController<StudentRecord, _> = ListController::new(source);
        list.refresh().await.unwrap();

        let err = list
            .assign_class("s1", EntityRef::named("c101", "Grade 5"))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Api(_)));
        assert_eq!(list.rows()[0].class, Some(original));
        assert_eq!(list.error(), Some("Class is full"));
    }

    #[tokio::test]
    async fn failed_unassign_restores_class_with_fallback_banner() {
        let mut source = FakeList::new();
        source.fail_enrolment = true;
        let original = EntityRef::named("c100", "Grade 4");
        source.push_page(vec![student("s1", Some(original.clone()))], 1);
        let mut list: ListController<StudentRecord, _> = ListController::new(source);
        list.refresh().await.unwrap();

        assert!(list.unassign_class("s1").await.is_err());
        assert_eq!(list.rows()[0].class, Some(original));
        assert_eq!(list.error(), Some("Error unassigning student from class"));
    }

    #[tokio::test]
    async fn unassign_student_off_page_still_calls_backend() {
        let source = FakeList::new();
        source.push_page(vec![student("s1", None)], 1);
        let mut list: ListController<StudentRecord, _> = ListController::new(source);
        list.refresh().await.unwrap();

        list.unassign_class("s9").await.unwrap();
        assert_eq!(
            list.source().enrolment_calls.borrow().as_slice(),
            ["unassign s9"]
        );
    }
}
