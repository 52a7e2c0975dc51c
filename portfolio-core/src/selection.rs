//! The single selected stack/skill tag shared by the filter chips, the skill
//! list and the skill sphere.

use log::debug;

use crate::matcher::{normalize, normalized_eq, selection_matches};

/// Handle returned by [`SelectionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(Option<&str>)>;

/// Holds at most one selected tag. Selecting the current tag again clears it.
#[derive(Default)]
pub struct SelectionStore {
    selected: Option<String>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Toggle `tag`: clears the selection if `tag` is already selected
    /// (compared by normalized equality), selects it otherwise. A blank tag
    /// means "nothing selected" and clears.
    pub fn select(&mut self, tag: &str) -> Option<&str> {
        if normalize(tag).is_empty() {
            self.clear();
            return None;
        }
        let next = match &self.selected {
            Some(cur) if normalized_eq(cur, tag) => None,
            _ => Some(tag.to_string()),
        };
        debug!("selection: {:?} -> {:?}", self.selected, next);
        self.selected = next;
        self.notify();
        self.selected()
    }

    /// Unconditionally clear the selection.
    pub fn clear(&mut self) {
        if self.selected.take().is_some() {
            debug!("selection cleared");
            self.notify();
        }
    }

    /// Fuzzy highlight flag for a rendered chip or pill.
    pub fn is_highlighted(&self, label: &str) -> bool {
        selection_matches(self.selected(), label)
    }

    /// Register a listener called synchronously after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(Option<&str>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let current = self.selected.as_deref();
        for (_, listener) in self.listeners.iter_mut() {
            listener(current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn starts_empty() {
        let store = SelectionStore::new();
        assert_eq!(store.selected(), None);
        assert!(!store.is_highlighted("React"));
    }

    #[test]
    fn selecting_twice_clears() {
        let mut store = SelectionStore::new();
        assert_eq!(store.select("React"), Some("React"));
        assert_eq!(store.select("React"), None);
    }

    #[test]
    fn toggle_uses_normalized_equality() {
        let mut store = SelectionStore::new();
        store.select("React Native");
        assert_eq!(store.select("react  native"), None);
    }

    #[test]
    fn blank_tag_clears() {
        let mut store = SelectionStore::new();
        store.select("React");
        assert_eq!(store.select(" "), None);
        assert_eq!(store.select(""), None);
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn selecting_a_related_tag_replaces() {
        let mut store = SelectionStore::new();
        store.select("React");
        assert_eq!(store.select("React Native"), Some("React Native"));
    }

    #[test]
    fn highlight_is_fuzzy() {
        let mut store = SelectionStore::new();
        store.select("Tailwind");
        assert!(store.is_highlighted("Tailwind CSS"));
        assert!(!store.is_highlighted("TypeScript"));
    }

    #[test]
    fn listeners_see_every_change_in_order() {
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::default();
        let mut store = SelectionStore::new();
        let sink = seen.clone();
        store.subscribe(move |v| sink.borrow_mut().push(v.map(str::to_string)));

        store.select("AWS");
        store.select("Nginx");
        store.clear();
        store.clear();

        assert_eq!(
            *seen.borrow(),
            vec![Some("AWS".to_string()), Some("Nginx".to_string()), None]
        );
    }

    #[test]
    fn unsubscribed_listener_is_silent() {
        let hits = Rc::new(RefCell::new(0));
        let mut store = SelectionStore::new();
        let h = hits.clone();
        let id = store.subscribe(move |_| *h.borrow_mut() += 1);
        store.select("Git");
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.select("Docker");
        assert_eq!(*hits.borrow(), 1);
    }
}
