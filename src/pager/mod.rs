use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageState {
    current: usize,
    page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    pub fn set(&mut self, page: usize) {
        self.current = page.max(1);
    }

    pub fn prev(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    pub fn next(&mut self) {
        self.current += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub number: usize,
    pub current: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PagerControls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub buttons: Vec<PageButton>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> PageView<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn controls(&self) -> Option<PagerControls> {
        if self.total_pages <= 1 {
            return None;
        }
        Some(PagerControls {
            prev_enabled: self.page > 1,
            next_enabled: self.page < self.total_pages,
            buttons: (1..=self.total_pages)
                .map(|number| PageButton {
                    number,
                    current: number == self.page,
                })
                .collect(),
        })
    }
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

// Slices `list` for `page`. A page past the end of a non-empty list falls
// back to page 1.
pub fn paginate<T>(list: &[T], page: usize, page_size: usize) -> PageView<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(list.len(), page_size);
    let page = page.max(1);
    let items = slice_page(list, page, page_size);
    if items.is_empty() && !list.is_empty() && page != 1 {
        tracing::debug!(page, total_pages, "stale page index, clamping to page 1");
        return paginate(list, 1, page_size);
    }
    PageView {
        items,
        page,
        total_pages,
        total_items: list.len(),
    }
}

fn slice_page<T>(list: &[T], page: usize, page_size: usize) -> &[T] {
    let start = (page - 1).saturating_mul(page_size);
    if start >= list.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(list.len());
    &list[start..end]
}
