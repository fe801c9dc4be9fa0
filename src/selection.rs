//! Selection result modal: list of lasso-selected entries with drill-down.
//!
//! The modal is a view model over one [`SelectionResult`]. It never edits
//! the entry list and owns no map state; closing it only asks the owner to
//! clear the drawn shape through [`ModalEffect::ClearShape`].

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::entry::{EntryKind, GeoEntry};
use crate::format;
use crate::geo::LatLng;

/// Entries enclosed by a completed lasso gesture, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionResult {
    entries: Vec<GeoEntry>,
}

impl SelectionResult {
    #[must_use]
    pub fn new(entries: Vec<GeoEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[GeoEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GeoEntry> {
        self.entries.get(index)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }
}

impl FromIterator<GeoEntry> for SelectionResult {
    fn from_iter<I: IntoIterator<Item = GeoEntry>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Request from the modal to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEffect {
    /// Remove the lasso shape from the map.
    ClearShape,
}

/// Which sub-view the modal shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalView {
    #[default]
    Closed,
    List(SelectionResult),
    /// One entry of `result` shown inline; `index` is always in range.
    Detail { result: SelectionResult, index: usize },
}

#[derive(Debug, Clone, Default)]
pub struct SelectionModal {
    view: ModalView,
}

impl SelectionModal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn view(&self) -> &ModalView {
        &self.view
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self.view, ModalView::Closed)
    }

    /// The result being shown, in either sub-view.
    #[must_use]
    pub fn result(&self) -> Option<&SelectionResult> {
        match &self.view {
            ModalView::Closed => None,
            ModalView::List(result) | ModalView::Detail { result, .. } => Some(result),
        }
    }

    /// Show `result` as a list, replacing whatever was open.
    pub fn open(&mut self, result: SelectionResult) {
        self.view = ModalView::List(result);
    }

    /// Drill into row `index`. Returns `false` (and changes nothing) when
    /// the modal is closed or the index is out of range.
    pub fn view_detail(&mut self, index: usize) -> bool {
        if self.result().is_none_or(|result| index >= result.len()) {
            return false;
        }
        let (ModalView::List(result) | ModalView::Detail { result, .. }) = std::mem::take(&mut self.view) else {
            return false;
        };
        self.view = ModalView::Detail { result, index };
        true
    }

    /// Return from the detail view to the full list.
    pub fn back_to_list(&mut self) {
        if let ModalView::Detail { result, .. } = &mut self.view {
            let result = std::mem::take(result);
            self.view = ModalView::List(result);
        }
    }

    /// Close from any sub-view. `None` when already closed.
    pub fn dismiss(&mut self) -> Option<ModalEffect> {
        if matches!(std::mem::take(&mut self.view), ModalView::Closed) {
            return None;
        }
        Some(ModalEffect::ClearShape)
    }

    #[must_use]
    pub fn heading(&self) -> String {
        format::selection_heading(self.result().map_or(0, SelectionResult::len))
    }

    #[must_use]
    pub fn rows(&self, href_template: &str) -> Vec<SelectionRow> {
        self.result().map_or_else(Vec::new, |result| {
            result
                .entries()
                .iter()
                .map(|e| SelectionRow::from_entry(e, href_template))
                .collect()
        })
    }

    /// The entry shown in the detail view.
    #[must_use]
    pub fn detail(&self, href_template: &str) -> Option<EntryDetail> {
        let ModalView::Detail { result, index } = &self.view else {
            return None;
        };
        result.get(*index).map(|e| EntryDetail::from_entry(e, href_template))
    }
}

/// One list row.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRow {
    pub id: String,
    pub title: String,
    pub kind: EntryKind,
    pub kind_label: &'static str,
    pub date: String,
    pub href: String,
}

impl SelectionRow {
    #[must_use]
    pub fn from_entry(entry: &GeoEntry, href_template: &str) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            kind: entry.kind,
            kind_label: format::kind_label(entry.kind),
            date: format::short_date(&entry.created_at),
            href: format::entry_href(href_template, &entry.id),
        }
    }
}

/// What the detail view shows below the header.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailBody {
    /// Full text of a text entry (may be empty).
    Text(String),
    /// Media entries link out to the full entry page.
    Media { kind: EntryKind },
}

/// Inline detail view of one selected entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDetail {
    pub id: String,
    pub title: String,
    pub date: String,
    pub kind: EntryKind,
    pub kind_label: &'static str,
    pub visibility_label: &'static str,
    pub coordinates: LatLng,
    pub coordinates_label: String,
    pub coordinates_link: String,
    pub body: DetailBody,
    pub href: String,
}

impl EntryDetail {
    #[must_use]
    pub fn from_entry(entry: &GeoEntry, href_template: &str) -> Self {
        let body = if entry.kind.has_media() {
            DetailBody::Media { kind: entry.kind }
        } else {
            DetailBody::Text(entry.text_body.clone().unwrap_or_default())
        };
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            date: format::long_date(&entry.created_at),
            kind: entry.kind,
            kind_label: format::kind_label(entry.kind),
            visibility_label: format::visibility_label(entry.is_public),
            coordinates: entry.coordinates,
            coordinates_label: format::coordinates_label(entry.coordinates),
            coordinates_link: format::coordinates_link(entry.coordinates, 15),
            body,
            href: format::entry_href(href_template, &entry.id),
        }
    }
}
