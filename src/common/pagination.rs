use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_ELEMENTS_PER_PAGE: i64 = 10;
pub const MAX_ELEMENTS_PER_PAGE: i64 = 50;

#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size, capped at 50. Zero or less returns every row.
    #[serde(default = "default_elements_per_page")]
    pub elements_per_page: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_elements_per_page() -> i64 {
    DEFAULT_ELEMENTS_PER_PAGE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            elements_per_page: DEFAULT_ELEMENTS_PER_PAGE,
        }
    }
}

impl PaginationQuery {
    pub fn new(page: i64, elements_per_page: i64) -> Self {
        Self {
            page,
            elements_per_page,
        }
        .normalized()
    }

    /// Clamps the page size to the maximum and the page number to 1.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            elements_per_page: self.elements_per_page.min(MAX_ELEMENTS_PER_PAGE),
        }
    }

    pub fn window(&self) -> Option<PageWindow> {
        PageWindow::new(self.page, self.elements_per_page)
    }

    pub fn total_pages(&self, count: i64) -> i64 {
        total_pages(count, self.elements_per_page)
    }
}

/// Skip/take bounds of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

impl PageWindow {
    /// `None` when the page size asks for everything.
    pub fn new(page: i64, elements_per_page: i64) -> Option<Self> {
        if elements_per_page <= 0 {
            return None;
        }
        Some(Self {
            offset: (page.max(1) - 1).saturating_mul(elements_per_page),
            limit: elements_per_page,
        })
    }

    pub fn first(limit: i64) -> Self {
        Self { offset: 0, limit }
    }

    /// Applies the window to rows already in memory.
    pub fn slice<T>(&self, rows: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(0);
        rows.into_iter().skip(offset).take(limit).collect()
    }
}

pub fn total_pages(count: i64, elements_per_page: i64) -> i64 {
    if elements_per_page <= 0 {
        return if count > 0 { 1 } else { 0 };
    }
    (count + elements_per_page - 1) / elements_per_page
}

/// One page of read-shapes plus the page count for the header.
#[derive(Debug)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total_pages: i64,
}

impl<T> Paged<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
        }
    }
}
