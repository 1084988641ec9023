pub mod render;
pub mod selection;
pub mod session;

pub use crate::domain::model::{Product, RoutinePane, UiEvent, ViewModel};
pub use crate::domain::ports::{
    CatalogSource, ConfigProvider, Presenter, RoutineGenerator, SelectionStore,
};
pub use crate::utils::error::Result;
