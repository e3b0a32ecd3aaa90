//! Custom actions for the Payment actor. Each answers with the link's status afterwards.

#[derive(Debug, Clone)]
pub enum PaymentAction {
    GetStatus,
    /// Settles a pending link. Settling a paid link again does nothing.
    MarkPaid,
    /// Cancels a pending link. Cancelling twice does nothing.
    Cancel { reason: String },
}
