use serde::Serialize;

use crate::filter::{self, Facet, FacetOptions, QueryState};
use crate::model::Pack;
use crate::pager::{self, PageState, PagerControls};
use crate::store::PackStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Search(String),
    Resolution(Facet),
    Type(Facet),
    Featured(Facet),
    GoToPage(usize),
    PrevPage,
    NextPage,
}

impl Event {
    pub fn refilters(&self) -> bool {
        matches!(
            self,
            Event::Search(_) | Event::Resolution(_) | Event::Type(_) | Event::Featured(_)
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PackPage<'a> {
    pub packs: Vec<&'a Pack>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub controls: Option<PagerControls>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionSummary {
    pub query: QueryState,
    pub page: usize,
    pub page_size: usize,
    pub matched: usize,
    pub total: usize,
}

#[derive(Clone, Debug)]
pub struct Browser {
    store: PackStore,
    query: QueryState,
    filtered: Vec<usize>,
    page: PageState,
}

impl Browser {
    pub fn new(store: PackStore, page_size: usize) -> Self {
        Self::with_query(store, QueryState::default(), page_size)
    }

    pub fn with_query(store: PackStore, query: QueryState, page_size: usize) -> Self {
        let filtered = filter::apply(store.packs(), &query);
        Self {
            store,
            query,
            filtered,
            page: PageState::new(page_size),
        }
    }

    pub fn store(&self) -> &PackStore {
        &self.store
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Pack> + '_ {
        self.filtered.iter().filter_map(|&i| self.store.get(i))
    }

    pub fn matched(&self) -> usize {
        self.filtered.len()
    }

    pub fn facet_options(&self) -> FacetOptions {
        FacetOptions::collect(self.store.packs())
    }

    pub fn handle(&mut self, event: Event) {
        tracing::debug!(?event, "browser event");
        let refilter = event.refilters();
        match event {
            Event::Search(text) => self.query.free_text = text,
            Event::Resolution(facet) => self.query.resolution = facet,
            Event::Type(facet) => self.query.pack_type = facet,
            Event::Featured(facet) => self.query.featured = facet,
            Event::GoToPage(n) => self.page.set(n),
            Event::PrevPage if self.can_step(|c| c.prev_enabled) => self.page.prev(),
            Event::NextPage if self.can_step(|c| c.next_enabled) => self.page.next(),
            Event::PrevPage | Event::NextPage => {
                tracing::debug!(page = self.page.current(), "pager button disabled, ignored");
            }
        }
        if refilter {
            self.filtered = filter::apply(self.store.packs(), &self.query);
            self.page.reset();
        }
        self.settle_page();
    }

    fn can_step(&self, enabled: impl Fn(&PagerControls) -> bool) -> bool {
        self.current_page().controls.as_ref().is_some_and(enabled)
    }

    fn settle_page(&mut self) {
        let view = pager::paginate(&self.filtered, self.page.current(), self.page.page_size());
        if view.page != self.page.current() {
            self.page.set(view.page);
        }
    }

    pub fn current_page(&self) -> PackPage<'_> {
        let view = pager::paginate(&self.filtered, self.page.current(), self.page.page_size());
        PackPage {
            packs: view.items.iter().filter_map(|&i| self.store.get(i)).collect(),
            page: view.page,
            total_pages: view.total_pages,
            total_items: view.total_items,
            controls: view.controls(),
        }
    }

    pub fn detail(&self, id: &str) -> Option<&Pack> {
        self.store.find_by_id(id)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            query: self.query.clone(),
            page: self.page.current(),
            page_size: self.page.page_size(),
            matched: self.filtered.len(),
            total: self.store.len(),
        }
    }
}
