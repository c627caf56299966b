// SPDX-License-Identifier: Apache-2.0

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: usize,
    pub size: usize,
}

impl PageRequest {
    #[must_use]
    pub fn new(number: usize, size: usize) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        (self.number - 1) * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub number: usize,
    pub current: bool,
}

/// One page of results plus the totals the pagination bar renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: usize) -> Self {
        Self {
            items,
            number: request.number,
            total_items,
            total_pages: total_items.div_ceil(request.size),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.number <= 1
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.number >= self.total_pages
    }

    #[must_use]
    pub fn has_pages(&self) -> bool {
        self.total_pages > 1
    }

    #[must_use]
    pub fn previous(&self) -> usize {
        self.number.saturating_sub(1).max(1)
    }

    #[must_use]
    pub fn next(&self) -> usize {
        (self.number + 1).min(self.total_pages.max(1))
    }

    #[must_use]
    pub fn page_links(&self) -> Vec<PageLink> {
        (1..=self.total_pages)
            .map(|number| PageLink {
                number,
                current: number == self.number,
            })
            .collect()
    }

}
