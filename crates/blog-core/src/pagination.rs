//! Length-aware pagination.

/// One page of a larger, ordered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub per_page: u64,
    /// 1-based page number.
    pub current_page: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, per_page: u64, current_page: u64) -> Self {
        Self {
            items,
            total,
            per_page: per_page.max(1),
            current_page: current_page.max(1),
        }
    }

    /// Last page number; at least 1 even when there are no items.
    pub fn last_page(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    /// 1-based index of the first item on this page, `None` when the page is empty.
    pub fn from(&self) -> Option<u64> {
        if self.items.is_empty() {
            return None;
        }
        Some(
            (self.current_page - 1)
                .saturating_mul(self.per_page)
                .saturating_add(1),
        )
    }

    /// 1-based index of the last item on this page, `None` when the page is empty.
    pub fn to(&self) -> Option<u64> {
        self.from()
            .map(|from| from.saturating_add(self.items.len() as u64 - 1))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
        }
    }
}
