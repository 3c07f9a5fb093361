//! Page requests and pages returned by paged store queries.

use serde::{Deserialize, Serialize};

/// Zero-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn of(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Number of matching rows skipped before this page starts.
    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }

    /// Replaces a zero size with the default and caps it at the maximum.
    pub fn clamped(self, limits: PageLimits) -> Self {
        let size = if self.size == 0 { limits.default_size } else { self.size };
        Self {
            page: self.page,
            size: size.min(limits.max_size),
        }
    }
}

/// Bounds applied to caller-supplied page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: 12,
            max_size: 100,
        }
    }
}

/// One slice of a filtered, identifier-ordered result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: usize) -> Self {
        let total_pages = if request.size == 0 {
            0
        } else {
            total_elements.div_ceil(request.size as usize) as u32
        };
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements: total_elements as u64,
            total_pages,
        }
    }

    #[cfg(test)]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[cfg(test)]
    pub fn is_last(&self) -> bool {
        self.number + 1 >= self.total_pages
    }
}
