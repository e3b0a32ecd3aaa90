//! [`ActorEntity`] implementation for [`PaymentLink`].

use super::actions::PaymentAction;
use super::error::PaymentError;
use crate::framework::ActorEntity;
use crate::model::{OrderCode, PaymentLink, PaymentLinkCreate, PaymentStatus};
use async_trait::async_trait;
use chrono::Utc;
use std::convert::Infallible;

/// QR payload the shopper scans. Carries everything a banking app needs to prefill a transfer.
pub fn qr_payload(order_code: OrderCode, amount: u64, description: &str) -> String {
    format!("PAYQR|{order_code}|{amount}|{description}")
}

#[async_trait]
impl ActorEntity for PaymentLink {
    type Id = OrderCode;
    type Create = PaymentLinkCreate;
    type Update = Infallible;
    type Action = PaymentAction;
    type ActionResult = PaymentStatus;
    type Context = ();
    type Error = PaymentError;

    fn from_create_params(order_code: OrderCode, params: PaymentLinkCreate) -> Result<Self, Self::Error> {
        if params.amount == 0 {
            return Err(PaymentError::InvalidAmount(params.amount));
        }
        Ok(Self {
            order_code,
            amount: params.amount,
            qr_code: qr_payload(order_code, params.amount, &params.description),
            description: params.description,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
            cancellation_reason: None,
        })
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: PaymentAction,
        _ctx: &(),
    ) -> Result<PaymentStatus, Self::Error> {
        match (action, self.status) {
            (PaymentAction::GetStatus, status) => Ok(status),
            (PaymentAction::MarkPaid, PaymentStatus::Pending) => {
                self.status = PaymentStatus::Paid;
                Ok(self.status)
            }
            (PaymentAction::MarkPaid, PaymentStatus::Paid) => Ok(self.status),
            (PaymentAction::Cancel { reason }, PaymentStatus::Pending) => {
                self.status = PaymentStatus::Cancelled;
                self.cancellation_reason = Some(reason);
                Ok(self.status)
            }
            (PaymentAction::Cancel { .. }, PaymentStatus::Cancelled) => Ok(self.status),
            (_, status) => Err(PaymentError::AlreadyFinal(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> PaymentLink {
        PaymentLink::from_create_params(
            OrderCode(1700000000123),
            PaymentLinkCreate {
                amount: 200,
                description: "AutoParts Checkout".into(),
            },
        )
        .unwrap()
    }

    #[test]
    fn zero_amount_is_refused() {
        let result = PaymentLink::from_create_params(
            OrderCode(1),
            PaymentLinkCreate {
                amount: 0,
                description: String::new(),
            },
        );
        assert_eq!(result, Err(PaymentError::InvalidAmount(0)));
    }

    #[test]
    fn qr_payload_names_code_and_amount() {
        assert_eq!(link().qr_code, "PAYQR|1700000000123|200|AutoParts Checkout");
    }

    #[tokio::test]
    async fn paid_links_cannot_be_cancelled() {
        let mut link = link();
        assert_eq!(
            link.handle_action(PaymentAction::MarkPaid, &()).await,
            Ok(PaymentStatus::Paid)
        );
        assert_eq!(
            link.handle_action(PaymentAction::MarkPaid, &()).await,
            Ok(PaymentStatus::Paid)
        );
        assert_eq!(
            link.handle_action(
                PaymentAction::Cancel {
                    reason: "late".into()
                },
                &()
            )
            .await,
            Err(PaymentError::AlreadyFinal(PaymentStatus::Paid))
        );
    }

    #[tokio::test]
    async fn cancel_is_idempotent() {
        let mut link = link();
        let cancel = || PaymentAction::Cancel {
            reason: "expired".into(),
        };
        assert_eq!(link.handle_action(cancel(), &()).await, Ok(PaymentStatus::Cancelled));
        assert_eq!(link.handle_action(cancel(), &()).await, Ok(PaymentStatus::Cancelled));
        assert_eq!(link.cancellation_reason.as_deref(), Some("expired"));
        assert_eq!(
            link.handle_action(PaymentAction::MarkPaid, &()).await,
            Err(PaymentError::AlreadyFinal(PaymentStatus::Cancelled))
        );
    }
}
