//! Custom actions for the catalog actor.

/// Reads on a listed meal. The engines never change a listing.
#[derive(Debug, Clone)]
pub enum MealAction {
    /// Reads a [`MealInfo`](crate::model::MealInfo) snapshot.
    Find,
}
