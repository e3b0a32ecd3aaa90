//! Custom actions for the Product actor.

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Returns the current stock level without modifying it.
    CheckStock,
}
