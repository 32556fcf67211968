//! Case-insensitive substring filtering for list views and lookup widgets.
//!
//! Both client-side filter strategies in the app reduce to the same
//! predicate: does any of a row's fields (or its composed label) contain
//! the query as a case-insensitive substring? An empty query matches
//! everything, and filtering is idempotent.

/// True when `haystack` contains `query` as a case-insensitive substring.
/// An empty query always matches.
pub fn matches(haystack: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&query.to_lowercase())
}

/// True when any of `fields` matches `query`.
pub fn any_field_matches(fields: &[&str], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    fields.iter().any(|field| matches(field, query))
}

/// Filter `items` down to those whose fields match `query`.
///
/// Returns clones so the caller can hand the result straight to a list
/// widget; collections here are reference-sized, not datasets.
pub fn filter_items<T, F>(items: &[T], query: &str, fields: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Vec<String>,
{
    items
        .iter()
        .filter(|item| {
            let fields = fields(item);
            let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
            any_field_matches(&refs, query)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_insensitive() {
        assert!(matches("Dell Latitude", "dell"));
        assert!(matches("dell latitude", "DELL"));
        assert!(!matches("HP EliteBook", "dell"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches("anything", ""));
        assert!(any_field_matches(&[], ""));
    }

    #[test]
    fn dell_query_selects_only_dell() {
        let rows = vec![("Dell", 1), ("HP", 2)];
        let filtered = filter_items(&rows, "dell", |row| vec![row.0.to_string()]);
        assert_eq!(filtered, vec![("Dell", 1)]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let rows = vec![
            "Latitude 5440".to_string(),
            "EliteBook 840".to_string(),
            "latitude 7390".to_string(),
        ];
        let once = filter_items(&rows, "lat", |row| vec![row.clone()]);
        let twice = filter_items(&once, "lat", |row| vec![row.clone()]);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn any_field_checks_each_field_independently() {
        // Matches asset tag even though the name does not contain the query.
        assert!(any_field_matches(&["MacBook Pro", "IT-0042", "Apple"], "it-00"));
        assert!(!any_field_matches(&["MacBook Pro", "IT-0042", "Apple"], "dell"));
    }
}
