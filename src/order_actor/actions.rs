//! Custom actions for the Order actor.

use crate::model::OrderStatus;

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to a new status. Answers `true` when the status changed and `false`
    /// when the order already had it.
    ChangeStatus(OrderStatus),
}
