//! Page requests, sorting, and the `Page`/`Slice` result shapes.
//!
//! Page numbers are zero-based. A `Page` carries the total number of
//! elements and therefore usually costs a count query; a `Slice` only knows
//! whether another slice follows, which it learns by fetching one extra row.

use std::str::FromStr;

use anyhow::Result;
use sea_orm::{EntityTrait, QueryOrder, Select};
use serde::{Deserialize, Serialize};

use crate::error::RepositoryError;

/// SQLite binds LIMIT and OFFSET as signed 64-bit integers.
pub const MAX_ROWS: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

impl From<Direction> for sea_orm::Order {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => sea_orm::Order::Asc,
            Direction::Desc => sea_orm::Order::Desc,
        }
    }
}

/// A single sort criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sort by each of `properties` in the given direction, in order.
    pub fn by<I, S>(direction: Direction, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            orders: properties
                .into_iter()
                .map(|property| SortOrder {
                    property: property.into(),
                    direction,
                })
                .collect(),
        }
    }

    /// Append the criteria of `other` after this sort's criteria.
    pub fn and(mut self, other: Sort) -> Self {
        self.orders.extend(other.orders);
        self
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// Add `ORDER BY` clauses for every criterion, resolving property names
    /// against the entity's columns.
    pub fn apply<E>(&self, mut select: Select<E>) -> Result<Select<E>>
    where
        E: EntityTrait,
        E::Column: FromStr,
    {
        for order in &self.orders {
            let column = E::Column::from_str(&order.property)
                .map_err(|_| RepositoryError::UnknownSortProperty(order.property.clone()))?;
            select = select.order_by(column, order.direction.into());
        }
        Ok(select)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u64,
    size: u64,
    sort: Sort,
}

impl PageRequest {
    pub fn of(page: u64, size: u64) -> Result<Self> {
        Self::of_sorted(page, size, Sort::unsorted())
    }

    pub fn of_sorted(page: u64, size: u64, sort: Sort) -> Result<Self> {
        if size == 0 {
            return Err(RepositoryError::InvalidPageRequest("page size must not be less than one".to_string()).into());
        }
        if size > MAX_ROWS {
            return Err(RepositoryError::InvalidPageRequest(format!("page size {} exceeds {}", size, MAX_ROWS)).into());
        }
        // The end of the page, not just its start, must stay bindable.
        let end = page.checked_add(1).and_then(|pages| pages.checked_mul(size));
        if end.map_or(true, |end| end > MAX_ROWS) {
            return Err(RepositoryError::InvalidPageRequest(format!("offset of page {} overflows", page)).into());
        }
        Ok(Self { page, size, sort })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        self.page * self.size
    }

    /// The following page; fails when its offset would not be bindable.
    pub fn next(&self) -> Result<Self> {
        Self::of_sorted(self.page.saturating_add(1), self.size, self.sort.clone())
    }

    pub fn previous_or_first(&self) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            size: self.size,
            sort: self.sort.clone(),
        }
    }

    /// Row limit for fetching one row past the page, used by slices.
    pub fn overfetch_limit(&self) -> u64 {
        self.size.saturating_add(1).min(MAX_ROWS)
    }

    /// Work out the total element count from the content alone when the
    /// content proves it, so the count query can be skipped.
    ///
    /// Returns `None` when the page is full (or empty past the first page)
    /// and only a count query can tell.
    pub fn known_total(&self, content_len: usize) -> Option<u64> {
        let len = content_len as u64;
        if self.offset() == 0 {
            if len < self.size {
                return Some(len);
            }
            return None;
        }
        if len != 0 && len < self.size {
            return Some(self.offset() + len);
        }
        None
    }
}

/// One page of results plus the total number of matching elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 1;
        }
        self.total_elements.div_ceil(self.size)
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    /// Convert the content while keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

/// A page of results that only knows whether more results follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice<T> {
    pub content: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub has_next: bool,
}

impl<T> Slice<T> {
    /// Build a slice from rows fetched with `limit = size + 1`. The extra
    /// row, if present, is dropped and only signals `has_next`.
    pub fn from_overfetched(mut rows: Vec<T>, request: &PageRequest) -> Self {
        let has_next = rows.len() as u64 > request.size();
        rows.truncate(request.size() as usize);
        Self {
            content: rows,
            number: request.page(),
            size: request.size(),
            has_next,
        }
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn map<U, F>(self, f: F) -> Slice<U>
    where
        F: FnMut(T) -> U,
    {
        Slice {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            has_next: self.has_next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_rejects_zero_size() {
        let err = PageRequest::of(0, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::InvalidPageRequest(_))
        ));
    }

    #[test]
    fn test_offset_and_navigation() {
        let request = PageRequest::of(2, 3).unwrap();
        assert_eq!(request.offset(), 6);
        assert_eq!(request.next().unwrap().page(), 3);
        assert_eq!(request.previous_or_first().page(), 1);
        assert_eq!(PageRequest::of(0, 3).unwrap().previous_or_first().page(), 0);
    }

    #[test]
    fn test_page_request_rejects_unbindable_sizes() {
        for (page, size) in [(0, u64::MAX), (0, MAX_ROWS + 1), (1, MAX_ROWS), (2, MAX_ROWS / 2)] {
            let err = PageRequest::of(page, size).unwrap_err();
            assert!(
                matches!(err.downcast_ref::<RepositoryError>(), Some(RepositoryError::InvalidPageRequest(_))),
                "page {} size {} should be rejected",
                page,
                size
            );
        }

        let widest = PageRequest::of(0, MAX_ROWS).unwrap();
        assert_eq!(widest.overfetch_limit(), MAX_ROWS);
        assert!(widest.next().is_err());
        assert_eq!(PageRequest::of(0, 3).unwrap().overfetch_limit(), 4);
    }

    #[test]
    fn test_known_total() {
        let first = PageRequest::of(0, 3).unwrap();
        assert_eq!(first.known_total(2), Some(2));
        assert_eq!(first.known_total(3), None);

        let third = PageRequest::of(2, 3).unwrap();
        assert_eq!(third.known_total(1), Some(7));
        assert_eq!(third.known_total(0), None);
        assert_eq!(third.known_total(3), None);
    }

    #[test]
    fn test_page_metadata() {
        let request = PageRequest::of(0, 3).unwrap();
        let page = Page::new(vec![1, 2, 3], &request, 5);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.number_of_elements(), 3);
        assert!(page.is_first());
        assert!(page.has_next());
        assert!(!page.is_last());
        assert!(!page.has_previous());

        let last = Page::new(vec![4, 5], &request.next().unwrap(), 5);
        assert!(last.is_last());
        assert!(last.has_previous());
    }

    #[test]
    fn test_page_map_keeps_metadata() {
        let request = PageRequest::of(1, 2).unwrap();
        let page = Page::new(vec![1, 2], &request, 9).map(|n| n.to_string());
        assert_eq!(page.content, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_elements, 9);
    }

    #[test]
    fn test_empty_page_has_no_pages() {
        let request = PageRequest::of(0, 10).unwrap();
        let page: Page<i32> = Page::new(Vec::new(), &request, 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.is_last());
    }

    #[test]
    fn test_slice_from_overfetched() {
        let request = PageRequest::of(0, 3).unwrap();
        let slice = Slice::from_overfetched(vec![1, 2, 3, 4], &request);
        assert_eq!(slice.content, vec![1, 2, 3]);
        assert!(slice.has_next);

        let slice = Slice::from_overfetched(vec![1, 2], &request);
        assert_eq!(slice.content, vec![1, 2]);
        assert!(!slice.has_next);
    }

    #[test]
    fn test_sort_by_and_chain() {
        let sort = Sort::by(Direction::Desc, ["username"]).and(Sort::by(Direction::Asc, ["id"]));
        assert_eq!(sort.orders().len(), 2);
        assert_eq!(sort.orders()[0].property, "username");
        assert_eq!(sort.orders()[1].direction, Direction::Asc);
        assert!(Sort::unsorted().is_unsorted());
    }
}
