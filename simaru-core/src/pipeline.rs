//! Client-side list pipeline: filter, sort, paginate.
//!
//! Every view recomputes its listing from current state by running the
//! collection through [`apply`]. The pipeline is pure; nothing is cached
//! between recomputations.

use std::cmp::Ordering;

use simaru_domain::{Booking, Room, User};

/// Page size used by the user table.
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Text fields the search box matches against, case-insensitively.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Three-way comparison on one of the entity's sortable fields.
pub trait SortKey {
    type Field: Copy + PartialEq + Default;

    fn compare(&self, other: &Self, field: Self::Field) -> Ordering;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserField {
    #[default]
    Id,
    Name,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomField {
    #[default]
    Id,
    Name,
    Capacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingField {
    #[default]
    Id,
    Date,
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email]
    }
}

impl SortKey for User {
    type Field = UserField;

    fn compare(&self, other: &Self, field: UserField) -> Ordering {
        match field {
            UserField::Id => self.id.cmp(&other.id),
            UserField::Name => self.name.cmp(&other.name),
            UserField::Email => self.email.cmp(&other.email),
        }
    }
}

impl Searchable for Room {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }
}

impl SortKey for Room {
    type Field = RoomField;

    fn compare(&self, other: &Self, field: RoomField) -> Ordering {
        match field {
            RoomField::Id => self.id.cmp(&other.id),
            RoomField::Name => self.name.cmp(&other.name),
            RoomField::Capacity => self.capacity.cmp(&other.capacity),
        }
    }
}

impl Searchable for Booking {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.user]
    }
}

impl SortKey for Booking {
    type Field = BookingField;

    fn compare(&self, other: &Self, field: BookingField) -> Ordering {
        match field {
            BookingField::Id => self.id.cmp(&other.id),
            BookingField::Date => self.booking_date.cmp(&other.booking_date),
        }
    }
}

/// View state driving the pipeline for one listing.
#[derive(Debug, Clone)]
pub struct ListState<F> {
    pub search: String,
    pub sort_by: F,
    pub direction: SortDirection,
    pub page: usize,
    pub page_size: usize,
}

impl<F: Copy + PartialEq + Default> ListState<F> {
    pub fn new(page_size: usize) -> Self {
        ListState {
            search: String::new(),
            sort_by: F::default(),
            direction: SortDirection::Ascending,
            page: 1,
            page_size,
        }
    }

    /// Unpaginated listing (the rooms card grid).
    pub fn unpaged() -> Self {
        Self::new(usize::MAX)
    }

    /// Changing the search term jumps back to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Same field flips direction; a new field resets to ascending.
    pub fn toggle_sort(&mut self, field: F) {
        if self.sort_by == field {
            self.direction = self.direction.flip();
        } else {
            self.sort_by = field;
            self.direction = SortDirection::Ascending;
            self.page = 1;
        }
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }
}

impl<F: Copy + PartialEq + Default> Default for ListState<F> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One page of a derived listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub items: Vec<T>,
    /// Clamped page index, always in `[1, max(1, total_pages)]`.
    pub page: usize,
    /// Zero when the filter matched nothing.
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> PageView<T> {
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

/// Run the full pipeline: search filter AND `extra` predicate, stable sort,
/// clamped pagination.
pub fn apply<T, F>(items: &[T], state: &ListState<F>, extra: impl Fn(&T) -> bool) -> PageView<T>
where
    T: Searchable + SortKey<Field = F> + Clone,
    F: Copy,
{
    let needle = state.search.to_lowercase();
    let mut filtered: Vec<T> = items
        .iter()
        .filter(|item| {
            let matches_search = needle.is_empty()
                || item
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle));
            matches_search && extra(item)
        })
        .cloned()
        .collect();

    // Vec::sort_by is stable, so ties keep their relative order.
    filtered.sort_by(|a, b| {
        let ordering = a.compare(b, state.sort_by);
        match state.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    paginate(filtered, state.page, state.page_size)
}

/// Slice an already-filtered collection into the requested page, clamping
/// the index so a delete or narrower filter can never leave the view on an
/// out-of-bounds page.
pub fn paginate<T>(filtered: Vec<T>, page: usize, page_size: usize) -> PageView<T> {
    let total_items = filtered.len();
    let total_pages = total_items.div_ceil(page_size.max(1));
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1).saturating_mul(page_size);
    let items = filtered.into_iter().skip(start).take(page_size).collect();

    PageView {
        items,
        page,
        total_pages,
        total_items,
    }
}
