use crate::domain::model::{Product, ProductCard, RoutinePane, ViewModel};
use std::collections::HashSet;

/// Builds the full projection from current state. Pure: no display surface is
/// touched here; committing the frame is the `Presenter`'s job.
pub fn render(
    products: &[Product],
    selection: &[Product],
    expanded: &HashSet<String>,
    routine: &RoutinePane,
    status: Option<&str>,
) -> ViewModel {
    let cards = products
        .iter()
        .map(|product| ProductCard {
            name: product.name.clone(),
            brand: product.brand.clone(),
            selected: selection.iter().any(|p| p.name == product.name),
            description: expanded
                .contains(&product.name)
                .then(|| product.description.clone()),
        })
        .collect();

    ViewModel {
        status: status.map(str::to_string),
        cards,
        chips: selection.iter().map(|p| p.name.clone()).collect(),
        routine: routine.clone(),
    }
}
