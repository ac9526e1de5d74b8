//! Store helpers for filtering, sorting and paging in process

use crate::core::entity::Student;
use crate::core::filter::Predicate;
use crate::core::query::{Page, PageRequest, SortDirection, SortSpec};
use std::cmp::Ordering;

/// Trait for stores that evaluate listings in process
///
/// Implement `list_all`; the filtering, ordering and slicing come for free.
pub trait QueryableStore: Send + Sync {
    /// Get all records (unfiltered, unsorted)
    fn list_all(&self) -> Vec<Student>;

    /// Keep the records matching `predicate`
    fn apply_filters(&self, data: Vec<Student>, predicate: &Predicate) -> Vec<Student> {
        data.into_iter().filter(|s| predicate.matches(s)).collect()
    }

    /// Order records by `sort`, ties broken by ascending id
    ///
    /// A missing gpa sorts last ascending and first descending.
    fn apply_sort(&self, mut data: Vec<Student>, sort: &SortSpec) -> Vec<Student> {
        data.sort_by(|a, b| compare(a, b, sort));
        data
    }

    /// Filter, sort and cut out the requested page
    fn query(&self, predicate: &Predicate, page: &PageRequest) -> Page<Student> {
        let matching = self.apply_filters(self.list_all(), predicate);
        let total = matching.len();
        let items = self
            .apply_sort(matching, &page.sort)
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();

        Page::new(items, total)
    }
}

fn compare(a: &Student, b: &Student, sort: &SortSpec) -> Ordering {
    let ordering = a
        .field_value(sort.field)
        .compare(&b.field_value(sort.field));
    let ordering = match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };
    ordering.then(a.id.cmp(&b.id))
}
