//! Calendar lookup over the store.

use std::sync::Arc;

use tracing::info;

use crate::store::{CalendarHandle, EventStore};

/// Resolves calendar names and identifiers to store handles.
#[derive(Clone)]
pub struct CalendarDirectory {
    store: Arc<dyn EventStore>,
}

impl CalendarDirectory {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        CalendarDirectory { store }
    }

    /// Display titles of every calendar, in store enumeration order.
    pub fn list_names(&self) -> Vec<String> {
        self.store
            .calendars()
            .into_iter()
            .map(|calendar| calendar.title)
            .collect()
    }

    /// First calendar whose title equals `name` exactly. Case-sensitive, no
    /// normalization; absence is not an error.
    pub fn find_by_name(&self, name: &str) -> Option<CalendarHandle> {
        let found = self
            .store
            .calendars()
            .into_iter()
            .find(|calendar| calendar.title == name);
        if found.is_none() {
            info!("Calendar '{name}' not found");
        }
        found
    }

    /// First calendar with the given store identifier.
    pub fn find_by_id(&self, identifier: &str) -> Option<CalendarHandle> {
        let found = self
            .store
            .calendars()
            .into_iter()
            .find(|calendar| calendar.identifier == identifier);
        if found.is_none() {
            info!("Calendar '{identifier}' not found");
        }
        found
    }

    /// The store's own default calendar for new events; this layer applies no
    /// preference of its own.
    pub fn default_for_new_events(&self) -> CalendarHandle {
        self.store.default_calendar_for_new_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryEventStore;

    fn make_directory(titles: &[&str]) -> CalendarDirectory {
        CalendarDirectory::new(Arc::new(MemoryEventStore::with_calendars(titles)))
    }

    #[test]
    fn test_list_names_preserves_store_order() {
        let directory = make_directory(&["Work", "Personal", "Family"]);
        assert_eq!(directory.list_names(), vec!["Work", "Personal", "Family"]);
    }

    #[test]
    fn test_find_by_name_is_exact_and_case_sensitive() {
        let directory = make_directory(&["Work"]);
        assert!(directory.find_by_name("Work").is_some());
        assert!(directory.find_by_name("work").is_none());
        assert!(directory.find_by_name("Wor").is_none());
    }

    #[test]
    fn test_find_by_name_returns_first_match_on_duplicates() {
        let store = Arc::new(MemoryEventStore::with_calendars(&["Shared", "Shared"]));
        let directory = CalendarDirectory::new(store.clone());

        let first = store.calendars().into_iter().next().unwrap();
        let found = directory.find_by_name("Shared").unwrap();
        assert_eq!(found.identifier, first.identifier);
    }

    #[test]
    fn test_find_by_id_resolves_store_identifier() {
        let store = Arc::new(MemoryEventStore::with_calendars(&["Work"]));
        let directory = CalendarDirectory::new(store.clone());

        let handle = store.calendars().into_iter().next().unwrap();
        assert_eq!(
            directory.find_by_id(&handle.identifier).map(|c| c.title),
            Some("Work".to_string())
        );
        assert!(directory.find_by_id("missing").is_none());
    }

    #[test]
    fn test_default_delegates_to_store_policy() {
        let directory = make_directory(&["Personal", "Work"]);
        assert_eq!(directory.default_for_new_events().title, "Personal");
    }
}
