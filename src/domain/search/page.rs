use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::sort::Sort;
use crate::domain::errors::{RepositoryError, RepositoryResult};

/// Default and maximum page sizes applied to incoming page requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            default_size: 20,
            max_size: 2000,
        }
    }
}

/// Raw `?page=&size=&sort=` query parameters, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

/// A validated request for one page of results
///
/// `page` is a zero-based index. The offset is computed once at construction
/// so an overflowing `page * size` is rejected up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    offset: i64,
    sort: Sort,
}

impl PageRequest {
    /// Creates an unsorted page request
    ///
    /// # Errors
    /// `InvalidArgument` when `size` is zero or the offset does not fit in i64.
    pub fn new(page: u32, size: u32) -> RepositoryResult<Self> {
        if size == 0 {
            return Err(RepositoryError::invalid_argument(
                "Page size must not be less than one",
            ));
        }

        let offset = i64::try_from(u64::from(page) * u64::from(size)).map_err(|_| {
            RepositoryError::invalid_argument(format!(
                "Page offset out of range: page {} with size {}",
                page, size
            ))
        })?;

        Ok(Self {
            page,
            size,
            offset,
            sort: Sort::unsorted(),
        })
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Validates raw query parameters
    ///
    /// Missing values fall back to page 0 and `settings.default_size`. Sizes
    /// above `settings.max_size` are clamped; negative values are rejected.
    pub fn from_params(params: &PageParams, settings: &PageSettings) -> RepositoryResult<Self> {
        let page = match params.page {
            None => 0,
            Some(page) if page < 0 => {
                return Err(RepositoryError::invalid_argument(
                    "Page index must not be less than zero",
                ))
            }
            Some(page) => u32::try_from(page).map_err(|_| {
                RepositoryError::invalid_argument(format!("Page index out of range: {}", page))
            })?,
        };

        let size = match params.size {
            None => settings.default_size,
            Some(size) if size < 1 => {
                return Err(RepositoryError::invalid_argument(
                    "Page size must not be less than one",
                ))
            }
            Some(size) => u32::try_from(size)
                .unwrap_or(u32::MAX)
                .min(settings.max_size),
        };

        let sort = match params.sort.as_deref() {
            Some(expression) => Sort::parse(expression)?,
            None => Sort::unsorted(),
        };

        Ok(Self::new(page, size)?.with_sort(sort))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Derives the total row count from the content page when possible
    ///
    /// Returns `None` when only a count query can tell the total:
    /// - first page shorter than `size`: the page holds every row;
    /// - later page with 1..size-1 rows: it is the last page, so the total is
    ///   `offset + rows`;
    /// - a full page, or an empty page past the first: unknown.
    ///
    /// The derived total describes the snapshot the content query saw. Under
    /// concurrent writes it may differ from what a count query would return a
    /// moment later; that approximation is accepted.
    pub fn derive_total(&self, content_len: usize) -> Option<u64> {
        let len = content_len as u64;
        let size = u64::from(self.size);

        if self.offset == 0 {
            return (len < size).then_some(len);
        }

        if len != 0 && len < size {
            return Some(self.offset as u64 + len);
        }

        None
    }
}

/// One page of results plus totals
///
/// Serializes as `content`, `totalElements`, `totalPages`, `size`, `number`,
/// `numberOfElements`, `first`, `last`, `empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    content: Vec<T>,
    number: u32,
    size: u32,
    total_elements: u64,
}

impl<T> Page<T> {
    /// Assembles a page
    ///
    /// `total_elements` is raised to at least the rows already known to
    /// exist (`offset + content.len()`), so a count taken from a slightly
    /// older snapshot never reports fewer rows than the page shows.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let seen = request.offset() as u64 + content.len() as u64;
        let total_elements = if content.is_empty() {
            total_elements
        } else {
            total_elements.max(seen)
        };

        Self {
            content,
            number: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.size.max(1)))
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.number) + 1 >= self.total_pages()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Page", 9)?;
        state.serialize_field("content", &self.content)?;
        state.serialize_field("totalElements", &self.total_elements)?;
        state.serialize_field("totalPages", &self.total_pages())?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("number", &self.number)?;
        state.serialize_field("numberOfElements", &self.number_of_elements())?;
        state.serialize_field("first", &self.is_first())?;
        state.serialize_field("last", &self.is_last())?;
        state.serialize_field("empty", &self.is_empty())?;
        state.end()
    }
}
