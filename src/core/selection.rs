use crate::core::SelectionStore;
use crate::domain::model::Product;
use crate::utils::error::Result;

/// The ordered, name-unique set of selected products, kept write-through
/// consistent with a durable store: every mutation overwrites the full
/// serialized snapshot before returning.
pub struct SelectionState<S: SelectionStore> {
    items: Vec<Product>,
    store: S,
}

impl<S: SelectionStore> SelectionState<S> {
    pub fn new(store: S) -> Self {
        Self {
            items: Vec::new(),
            store,
        }
    }

    /// Reads the durable slot. An absent slot yields an empty selection; a
    /// malformed one is logged and reset to empty. Never returns an error.
    pub async fn hydrate(&mut self) {
        self.items = match self.store.load().await {
            Ok(Some(encoded)) => match serde_json::from_str::<Vec<Product>>(&encoded) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!("Stored selection is malformed, resetting: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read stored selection, starting empty: {}", e);
                Vec::new()
            }
        };
    }

    /// Appends a snapshot of `product` if no entry with its name exists,
    /// otherwise removes the existing entry. Returns the new membership state.
    pub async fn toggle(&mut self, product: Product) -> Result<bool> {
        let selected = match self.items.iter().position(|p| p.name == product.name) {
            Some(index) => {
                self.items.remove(index);
                false
            }
            None => {
                self.items.push(product);
                true
            }
        };
        self.persist().await?;
        Ok(selected)
    }

    /// Positional removal. Out-of-range indices are a caller bug; they are
    /// logged and leave both the selection and the store untouched. Returns
    /// whether an element was removed.
    pub async fn remove_at(&mut self, index: usize) -> Result<bool> {
        if index >= self.items.len() {
            tracing::warn!(
                "remove_at({}) out of range for selection of length {}",
                index,
                self.items.len()
            );
            return Ok(false);
        }
        self.items.remove(index);
        self.persist().await?;
        Ok(true)
    }

    /// Removal by the catalog's natural key. Returns whether an entry with
    /// that name was present.
    pub async fn remove_named(&mut self, name: &str) -> Result<bool> {
        match self.items.iter().position(|p| p.name == name) {
            Some(index) => {
                self.items.remove(index);
                self.persist().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn clear(&mut self) -> Result<()> {
        self.items.clear();
        self.persist().await
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|p| p.name.clone()).collect()
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.items.iter().any(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    async fn persist(&self) -> Result<()> {
        let encoded = serde_json::to_string(&self.items)?;
        self.store.save(&encoded).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStore {
        slot: Arc<Mutex<Option<String>>>,
        writes: Arc<Mutex<Vec<String>>>,
    }

    impl MockStore {
        fn with_slot(encoded: &str) -> Self {
            Self {
                slot: Arc::new(Mutex::new(Some(encoded.to_string()))),
                writes: Arc::new(Mutex::new(Vec::new())),
            }
        }

        async fn slot(&self) -> Option<String> {
            self.slot.lock().await.clone()
        }

        async fn write_count(&self) -> usize {
            self.writes.lock().await.len()
        }
    }

    impl SelectionStore for MockStore {
        async fn load(&self) -> Result<Option<String>> {
            Ok(self.slot.lock().await.clone())
        }

        async fn save(&self, encoded: &str) -> Result<()> {
            *self.slot.lock().await = Some(encoded.to_string());
            self.writes.lock().await.push(encoded.to_string());
            Ok(())
        }
    }

    fn product(name: &str) -> Product {
        Product {
            name: name.to_string(),
            brand: "Test Brand".to_string(),
            category: "cleanser".to_string(),
            image: format!("https://img.example.com/{}.png", name),
            description: format!("Description of {}", name),
        }
    }

    async fn stored_names(store: &MockStore) -> Vec<String> {
        let encoded = store.slot().await.expect("slot should be written");
        let items: Vec<Product> = serde_json::from_str(&encoded).unwrap();
        items.into_iter().map(|p| p.name).collect()
    }

    #[tokio::test]
    async fn test_toggle_appends_then_removes() {
        let store = MockStore::default();
        let mut selection = SelectionState::new(store.clone());

        assert!(selection.toggle(product("A")).await.unwrap());
        assert_eq!(selection.names(), vec!["A"]);

        assert!(!selection.toggle(product("A")).await.unwrap());
        assert!(selection.is_empty());

        // Both mutations wrote through; the slot now reflects the empty set.
        assert_eq!(store.write_count().await, 2);
        assert_eq!(store.slot().await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_toggle_parity_determines_length() {
        let store = MockStore::default();
        let mut selection = SelectionState::new(store);

        // A toggled twice (even), B once, C three times (odd), D once.
        for name in ["A", "B", "C", "A", "C", "D", "C"] {
            selection.toggle(product(name)).await.unwrap();
        }

        assert_eq!(selection.len(), 3);
        assert_eq!(selection.names(), vec!["B", "C", "D"]);
    }

    #[tokio::test]
    async fn test_toggle_matches_by_name_not_snapshot() {
        let store = MockStore::default();
        let mut selection = SelectionState::new(store);

        selection.toggle(product("A")).await.unwrap();

        // Same name, different fields: still a removal.
        let mut changed = product("A");
        changed.brand = "Another Brand".to_string();
        assert!(!selection.toggle(changed).await.unwrap());
        assert!(selection.is_empty());
    }

    #[tokio::test]
    async fn test_insertion_order_preserved() {
        let store = MockStore::default();
        let mut selection = SelectionState::new(store);

        for name in ["C", "A", "B"] {
            selection.toggle(product(name)).await.unwrap();
        }

        assert_eq!(selection.names(), vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_remove_at_shifts_remaining_left() {
        let store = MockStore::default();
        let mut selection = SelectionState::new(store.clone());

        for name in ["A", "B", "C"] {
            selection.toggle(product(name)).await.unwrap();
        }

        assert!(selection.remove_at(1).await.unwrap());
        assert_eq!(selection.names(), vec!["A", "C"]);
        assert_eq!(stored_names(&store).await, vec!["A", "C"]);

        // A fresh state hydrated from the same store sees the same sequence.
        let mut rehydrated = SelectionState::new(store);
        rehydrated.hydrate().await;
        assert_eq!(rehydrated.names(), vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_remove_at_out_of_range_is_noop() {
        let store = MockStore::default();
        let mut selection = SelectionState::new(store.clone());

        selection.toggle(product("A")).await.unwrap();
        let writes_before = store.write_count().await;

        assert!(!selection.remove_at(5).await.unwrap());
        assert_eq!(selection.names(), vec!["A"]);
        // No state change means no store write either.
        assert_eq!(store.write_count().await, writes_before);
    }

    #[tokio::test]
    async fn test_remove_named() {
        let store = MockStore::default();
        let mut selection = SelectionState::new(store);

        for name in ["A", "B", "C"] {
            selection.toggle(product(name)).await.unwrap();
        }

        assert!(selection.remove_named("B").await.unwrap());
        assert_eq!(selection.names(), vec!["A", "C"]);
        assert!(!selection.remove_named("B").await.unwrap());
        assert_eq!(selection.names(), vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_every_mutation_round_trips_through_store() {
        let store = MockStore::default();
        let mut selection = SelectionState::new(store.clone());

        selection.toggle(product("A")).await.unwrap();
        assert_eq!(stored_names(&store).await, selection.names());

        selection.toggle(product("B")).await.unwrap();
        assert_eq!(stored_names(&store).await, selection.names());

        selection.remove_at(0).await.unwrap();
        assert_eq!(stored_names(&store).await, selection.names());
    }

    #[tokio::test]
    async fn test_clear_then_hydrate_does_not_resurrect() {
        let store = MockStore::default();
        let mut selection = SelectionState::new(store.clone());

        selection.toggle(product("A")).await.unwrap();
        selection.toggle(product("B")).await.unwrap();
        selection.clear().await.unwrap();
        assert!(selection.is_empty());

        let mut rehydrated = SelectionState::new(store);
        rehydrated.hydrate().await;
        assert!(rehydrated.is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_absent_slot_yields_empty() {
        let store = MockStore::default();
        let mut selection = SelectionState::new(store);
        selection.hydrate().await;
        assert!(selection.is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_malformed_slot_resets_to_empty() {
        let store = MockStore::with_slot("not json at all {");
        let mut selection = SelectionState::new(store);
        selection.hydrate().await;
        assert!(selection.is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_restores_full_snapshots() {
        let store = MockStore::default();
        let mut selection = SelectionState::new(store.clone());
        selection.toggle(product("A")).await.unwrap();

        let mut rehydrated = SelectionState::new(store);
        rehydrated.hydrate().await;

        assert_eq!(rehydrated.items(), selection.items());
        assert_eq!(rehydrated.items()[0].brand, "Test Brand");
    }
}
