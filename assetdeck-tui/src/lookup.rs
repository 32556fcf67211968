//! Dependent lookup widget state.
//!
//! A lookup owns its own reference collection (all locations, or all device
//! users), fetched independently of the host form. Typing filters the
//! collection in memory by substring match on the composed label; selecting
//! an entry hands its id to the host form and clears the query.

use assetdeck_core::filter;

/// One selectable entry: a foreign key and the label it filters by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupEntry {
    pub id: i64,
    pub label: String,
}

/// State of one lookup widget.
#[derive(Debug, Default)]
pub struct Lookup {
    items: Vec<LookupEntry>,
    /// The lookup's own search query, independent of the host form.
    pub query: String,
    /// Cursor into the filtered set.
    pub cursor: usize,
    /// True until the reference collection arrives.
    pub loading: bool,
}

impl Lookup {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Replace the reference collection wholesale.
    pub fn set_items(&mut self, items: Vec<LookupEntry>) {
        self.items = items;
        self.loading = false;
        self.cursor = 0;
    }

    /// The current filtered view: every entry whose label contains the
    /// query, case-insensitively. No cap — reference collections are small.
    pub fn filtered(&self) -> Vec<&LookupEntry> {
        self.items
            .iter()
            .filter(|entry| filter::matches(&entry.label, &self.query))
            .collect()
    }

    pub fn input(&mut self, c: char) {
        self.query.push(c);
        self.cursor = 0;
    }

    pub fn backspace(&mut self) {
        self.query.pop();
        self.cursor = 0;
    }

    pub fn select_next(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.cursor = self.cursor.checked_sub(1).unwrap_or(len - 1);
        }
    }

    /// Take the entry under the cursor, clearing the query.
    ///
    /// Returns the id the host form stores in its foreign-key field; the
    /// query reset leaves the widget ready for the next search.
    pub fn take_selection(&mut self) -> Option<i64> {
        let id = self.filtered().get(self.cursor).map(|entry| entry.id)?;
        self.query.clear();
        self.cursor = 0;
        Some(id)
    }

    /// Label for a previously selected id, for display next to the field.
    pub fn label_of(&self, id: i64) -> Option<&str> {
        self.items
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_with(labels: &[(i64, &str)]) -> Lookup {
        let mut lookup = Lookup::new();
        lookup.set_items(
            labels
                .iter()
                .map(|(id, label)| LookupEntry {
                    id: *id,
                    label: label.to_string(),
                })
                .collect(),
        );
        lookup
    }

    #[test]
    fn typing_filters_by_composed_label() {
        let mut lookup = lookup_with(&[
            (1, "LIB - Floor 2, Room 204"),
            (2, "SCI - Floor 1, Room 101"),
        ]);
        for c in "lib".chars() {
            lookup.input(c);
        }
        let filtered = lookup.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn selection_returns_id_and_clears_query() {
        let mut lookup = lookup_with(&[(1, "Ada Lovelace <ada@example.edu>")]);
        for c in "ada".chars() {
            lookup.input(c);
        }
        assert_eq!(lookup.take_selection(), Some(1));
        assert!(lookup.query.is_empty());
    }

    #[test]
    fn selection_on_empty_filter_is_none() {
        let mut lookup = lookup_with(&[(1, "LIB - Floor 2, Room 204")]);
        for c in "xyz".chars() {
            lookup.input(c);
        }
        assert_eq!(lookup.take_selection(), None);
        // The query survives a failed selection.
        assert_eq!(lookup.query, "xyz");
    }

    #[test]
    fn cursor_wraps_over_filtered_set() {
        let mut lookup = lookup_with(&[(1, "a"), (2, "b"), (3, "c")]);
        lookup.select_prev();
        assert_eq!(lookup.cursor, 2);
        lookup.select_next();
        assert_eq!(lookup.cursor, 0);
    }
}
