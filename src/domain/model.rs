use serde::{Deserialize, Serialize};

/// One catalog entry. `name` is the catalog's natural key; a selected product
/// is stored as a full snapshot of these fields, not a reference back into the
/// catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub image: String,
    pub description: String,
}

/// The catalog document shape: `{ "products": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    pub products: Vec<Product>,
}

/// User interactions surfaced by the display layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    CategoryChanged(String),
    CardClicked(String),
    DetailsToggled(String),
    ChipRemoved(String),
    ClearAll,
    GenerateRoutine,
}

/// State of the routine pane.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutinePane {
    Empty,
    Pending,
    Text(String),
}

/// One rendered catalog card.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub name: String,
    pub brand: String,
    pub selected: bool,
    /// `Some` when the details block is expanded for this card.
    pub description: Option<String>,
}

/// Full projection of the widget: no independent state, rebuilt from scratch
/// after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub status: Option<String>,
    pub cards: Vec<ProductCard>,
    pub chips: Vec<String>,
    pub routine: RoutinePane,
}

/// Chat wire types for the completion endpoint
/// (OpenAI-chat-completion-shaped contract).
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}
