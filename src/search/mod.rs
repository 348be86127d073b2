pub mod fetch;
pub mod render;
pub mod sort;

use std::collections::BTreeSet;

use crate::model::IndexEntry;
use render::Render;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Date,
    Title,
    Author,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// The checked category boxes. Nothing checked means nothing is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection(BTreeSet<String>);

impl CategorySelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CategorySelection(categories.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains(category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Flip one checkbox.
    pub fn toggle(&mut self, category: &str) {
        if !self.0.remove(category) {
            self.0.insert(category.to_string());
        }
    }

    /// The "select/deselect all" control: clears when anything is checked,
    /// otherwise checks every known category.
    pub fn toggle_all<I, S>(&mut self, known: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.0.is_empty() {
            *self = Self::all(known);
        } else {
            self.0.clear();
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub query: String,
    pub categories: CategorySelection,
    pub sort: SortKey,
    pub direction: Direction,
}

/// The loaded index. Read-only once built; every query is a full pass.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    entries: Vec<IndexEntry>,
}

impl SearchContext {
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        SearchContext { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .map(|e| e.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Filter by query and category, then sort (stable).
    pub fn apply(&self, filters: &Filters) -> Vec<&IndexEntry> {
        let needle = filters.query.trim().to_lowercase();
        let mut list: Vec<&IndexEntry> = self
            .entries
            .iter()
            .filter(|e| filters.categories.contains(&e.category) && matches_query(e, &needle))
            .collect();
        list.sort_by(|a, b| sort::compare(a, b, filters.sort, filters.direction));
        list
    }
}

/// Case-insensitive substring of title, excerpt or the space-joined tags.
/// `needle` is already trimmed and lowercased.
fn matches_query(e: &IndexEntry, needle: &str) -> bool {
    needle.is_empty()
        || e.title.to_lowercase().contains(needle)
        || e.excerpt.to_lowercase().contains(needle)
        || e.tags.join(" ").to_lowercase().contains(needle)
}

/// Search page controller: every input event recomputes the list and
/// hands it to the renderer.
pub struct SearchPage<R: Render> {
    ctx: SearchContext,
    filters: Filters,
    renderer: R,
}

impl<R: Render> SearchPage<R> {
    /// Opens with every category checked and renders once.
    pub fn new(ctx: SearchContext, renderer: R) -> Self {
        let categories = CategorySelection::all(ctx.categories());
        let filters = Filters {
            categories,
            ..Filters::default()
        };
        Self::with_filters(ctx, filters, renderer)
    }

    pub fn with_filters(ctx: SearchContext, filters: Filters, renderer: R) -> Self {
        let mut page = SearchPage {
            ctx,
            filters,
            renderer,
        };
        page.refresh();
        page
    }

    pub fn refresh(&mut self) {
        let results = self.ctx.apply(&self.filters);
        self.renderer.render(&results);
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.query = query.into();
        self.refresh();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.filters.sort = key;
        self.refresh();
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.filters.direction = direction;
        self.refresh();
    }

    pub fn toggle_category(&mut self, category: &str) {
        self.filters.categories.toggle(category);
        self.refresh();
    }

    pub fn toggle_all_categories(&mut self) {
        let known: Vec<String> = self.ctx.categories().into_iter().map(String::from).collect();
        self.filters.categories.toggle_all(known);
        self.refresh();
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
