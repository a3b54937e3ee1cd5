//! Pagination state for GitHub list endpoints.
//!
//! GitHub caps list endpoints at 100 items per page and advertises further
//! pages through the `Link` response header. `PageInfo` records where a
//! response sits in that sequence so callers can walk it lazily.

/// Largest page size GitHub accepts on list endpoints.
pub const MAX_PER_PAGE: u8 = 100;

/// Position of one fetched page within a paginated listing.
///
/// # Example
///
/// ```
/// use github_activity::github::pagination::PageInfo;
///
/// let info = PageInfo::new(2, 100).with_has_next(true);
/// assert!(!info.is_first_page());
/// assert_eq!(info.next_page(), Some(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page number (1-based).
    current_page: u32,
    /// Items requested per page.
    per_page: u8,
    /// Whether GitHub advertised a following page.
    has_next: bool,
}

impl PageInfo {
    /// Creates page info for a page with no known successor.
    #[must_use]
    pub const fn new(current_page: u32, per_page: u8) -> Self {
        Self {
            current_page,
            per_page,
            has_next: false,
        }
    }

    /// Sets whether there is a next page.
    #[must_use]
    pub const fn with_has_next(mut self, has_next: bool) -> Self {
        self.has_next = has_next;
        self
    }

    /// Returns the current page number (1-based).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the number of items requested per page.
    #[must_use]
    pub const fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Returns true if more pages exist after the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Returns true if this is the first page.
    #[must_use]
    pub const fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    /// Returns the number of the following page, if GitHub advertised one.
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        if self.has_next {
            self.current_page.checked_add(1)
        } else {
            None
        }
    }
}

/// Rejects page numbers and sizes GitHub would refuse.
///
/// # Errors
///
/// Returns [`IntakeError::InvalidPagination`](super::IntakeError::InvalidPagination)
/// when `page` is zero or `per_page` falls outside `1..=100`.
pub fn validate_pagination_params(page: u32, per_page: u8) -> Result<(), super::IntakeError> {
    if page == 0 {
        return Err(super::IntakeError::InvalidPagination {
            message: "page must be at least 1".to_owned(),
        });
    }

    if per_page == 0 {
        return Err(super::IntakeError::InvalidPagination {
            message: "per_page must be at least 1".to_owned(),
        });
    }

    if per_page > MAX_PER_PAGE {
        return Err(super::IntakeError::InvalidPagination {
            message: format!("per_page must not exceed {MAX_PER_PAGE}"),
        });
    }

    Ok(())
}
