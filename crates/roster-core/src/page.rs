use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageWindowError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Identifies one slice of the remote collection.
///
/// The offset sent to the server is always `page_index * page_size` and the
/// limit is always `page_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    page_index: usize,
    page_size: NonZeroUsize,
}

impl PageWindow {
    pub fn new(page_index: usize, page_size: usize) -> Result<Self, PageWindowError> {
        let page_size = NonZeroUsize::new(page_size).ok_or(PageWindowError::ZeroPageSize)?;
        Ok(Self {
            page_index,
            page_size,
        })
    }

    /// First page for the given size.
    pub fn first(page_size: NonZeroUsize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn skip(&self) -> usize {
        self.page_index.saturating_mul(self.page_size.get())
    }

    pub fn limit(&self) -> usize {
        self.page_size.get()
    }

    /// The following page with the same size.
    pub fn next(&self) -> Self {
        Self {
            page_index: self.page_index.saturating_add(1),
            page_size: self.page_size,
        }
    }

    /// Same size, different index.
    pub fn with_index(&self, page_index: usize) -> Self {
        Self {
            page_index,
            page_size: self.page_size,
        }
    }

    pub fn is_first(&self) -> bool {
        self.page_index == 0
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::first(NonZeroUsize::new(crate::DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

/// One page of the remote collection.
///
/// The upstream API names the list after the collection (`"users"`), generic
/// deployments use `"items"`; both decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    #[serde(alias = "users", default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: usize,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }
}
