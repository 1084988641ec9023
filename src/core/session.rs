use crate::core::render::render;
use crate::core::selection::SelectionState;
use crate::core::{CatalogSource, Presenter, RoutineGenerator, SelectionStore};
use crate::domain::model::{Product, RoutinePane, UiEvent};
use crate::utils::error::Result;
use std::collections::HashSet;

/// Shown until the first category is chosen.
pub const PLACEHOLDER_MESSAGE: &str = "Select a category to view products";

/// Shown when the catalog cannot be fetched; the prior product list is kept.
pub const CATALOG_ERROR_MESSAGE: &str = "Could not load the catalog. Try another category.";

/// The single user-visible message for any completion failure.
pub const FALLBACK_MESSAGE: &str = "Sorry, something went wrong. Please try again.";

/// Event-driven engine for the widget: routes user events into selection
/// mutations and collaborator calls, then rebuilds and commits the projection.
/// All state lives here or in `SelectionState`; the presenter holds none.
pub struct Session<S, C, G, P>
where
    S: SelectionStore,
    C: CatalogSource,
    G: RoutineGenerator,
    P: Presenter,
{
    selection: SelectionState<S>,
    catalog: C,
    generator: G,
    presenter: P,
    products: Vec<Product>,
    category: Option<String>,
    expanded: HashSet<String>,
    routine: RoutinePane,
    status: Option<String>,
}

impl<S, C, G, P> Session<S, C, G, P>
where
    S: SelectionStore,
    C: CatalogSource,
    G: RoutineGenerator,
    P: Presenter,
{
    pub fn new(selection: SelectionState<S>, catalog: C, generator: G, presenter: P) -> Self {
        Self {
            selection,
            catalog,
            generator,
            presenter,
            products: Vec::new(),
            category: None,
            expanded: HashSet::new(),
            routine: RoutinePane::Empty,
            status: Some(PLACEHOLDER_MESSAGE.to_string()),
        }
    }

    /// Hydrates the selection from the durable store and commits the first
    /// frame. Call once before handling events.
    pub async fn start(&mut self) {
        self.selection.hydrate().await;
        tracing::debug!("Hydrated {} selected products", self.selection.len());
        self.commit();
    }

    pub async fn handle(&mut self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::CategoryChanged(category) => self.change_category(category).await,
            UiEvent::CardClicked(name) => self.toggle_card(&name).await?,
            UiEvent::DetailsToggled(name) => self.toggle_details(&name),
            UiEvent::ChipRemoved(name) => {
                self.selection.remove_named(&name).await?;
                self.commit();
            }
            UiEvent::ClearAll => {
                self.selection.clear().await?;
                self.commit();
            }
            UiEvent::GenerateRoutine => self.generate_routine().await,
        }
        Ok(())
    }

    pub fn selection(&self) -> &SelectionState<S> {
        &self.selection
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Fetches the catalog fresh and filters by exact category match. A fetch
    /// failure keeps the prior product list and surfaces a status line; it
    /// never escapes the event loop.
    async fn change_category(&mut self, category: String) {
        match self.catalog.fetch_products().await {
            Ok(products) => {
                self.products = products
                    .into_iter()
                    .filter(|p| p.category == category)
                    .collect();
                tracing::debug!(
                    "Category '{}': {} products",
                    category,
                    self.products.len()
                );
                self.category = Some(category);
                self.status = None;
            }
            Err(e) => {
                tracing::warn!("Catalog fetch failed: {}", e);
                self.status = Some(CATALOG_ERROR_MESSAGE.to_string());
            }
        }
        self.commit();
    }

    async fn toggle_card(&mut self, name: &str) -> Result<()> {
        // Snapshot the product as displayed; a later catalog change must not
        // rewrite an already-selected entry.
        let Some(product) = self.products.iter().find(|p| p.name == name).cloned() else {
            tracing::warn!("Click on unknown product card '{}'", name);
            return Ok(());
        };
        self.selection.toggle(product).await?;
        self.commit();
        Ok(())
    }

    /// Expand/collapse of one card's description block. Ephemeral display
    /// state only; never persisted and never touches the selection.
    fn toggle_details(&mut self, name: &str) {
        if !self.expanded.remove(name) {
            self.expanded.insert(name.to_string());
        }
        self.commit();
    }

    async fn generate_routine(&mut self) {
        self.routine = RoutinePane::Pending;
        self.commit();

        let names = self.selection.names();
        self.routine = match self.generator.generate(&names).await {
            Ok(text) => RoutinePane::Text(text),
            Err(e) => {
                tracing::warn!("Routine generation failed: {}", e);
                RoutinePane::Text(FALLBACK_MESSAGE.to_string())
            }
        };
        self.commit();
    }

    fn commit(&mut self) {
        let view = render(
            &self.products,
            self.selection.items(),
            &self.expanded,
            &self.routine,
            self.status.as_deref(),
        );
        self.presenter.commit(&view);
    }
}
