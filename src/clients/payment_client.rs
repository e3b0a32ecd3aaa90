//! # Payment Client
//!
//! Talks to the gateway simulator. Implements [`PaymentStatusService`], so the poller can run
//! against it exactly as it would against the real gateway.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{OrderCode, PaymentLink, PaymentLinkCreate, PaymentStatus};
use crate::payment_actor::{PaymentAction, PaymentError};
use crate::services::PaymentStatusService;
use async_trait::async_trait;
use tracing::{debug, instrument};

const USER_CANCELLED: &str = "User cancelled";

#[derive(Clone)]
pub struct PaymentClient {
    inner: ResourceClient<PaymentLink>,
}

impl PaymentClient {
    pub fn new(inner: ResourceClient<PaymentLink>) -> Self {
        Self { inner }
    }

    /// Opens a payment link for `order_code` and returns it. A code that already has a link
    /// fails with [`PaymentError::DuplicateOrderCode`].
    #[instrument(skip(self, params), fields(amount = params.amount))]
    pub async fn open_link(
        &self,
        order_code: OrderCode,
        params: PaymentLinkCreate,
    ) -> Result<PaymentLink, PaymentError> {
        debug!("Sending request");
        match self.inner.insert(order_code, params).await {
            Ok(_) => {}
            Err(FrameworkError::AlreadyExists(_)) => {
                return Err(PaymentError::DuplicateOrderCode(order_code))
            }
            Err(e) => return Err(Self::map_error(e)),
        }
        self.get(order_code)
            .await?
            .ok_or_else(|| PaymentError::NotFound(order_code.to_string()))
    }

    /// Settles the link, as the shopper's bank would after a successful transfer.
    #[instrument(skip(self))]
    pub async fn mark_paid(&self, order_code: OrderCode) -> Result<PaymentStatus, PaymentError> {
        self.act(order_code, PaymentAction::MarkPaid).await
    }

    #[instrument(skip(self))]
    pub async fn cancel_link(
        &self,
        order_code: OrderCode,
        reason: &str,
    ) -> Result<PaymentStatus, PaymentError> {
        self.act(
            order_code,
            PaymentAction::Cancel {
                reason: reason.to_string(),
            },
        )
        .await
    }

    async fn act(&self, order_code: OrderCode, action: PaymentAction) -> Result<PaymentStatus, PaymentError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(order_code, action)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<PaymentLink> for PaymentClient {
    type Error = PaymentError;

    fn inner(&self) -> &ResourceClient<PaymentLink> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_entity_error(|e| match e {
            FrameworkError::NotFound(code) => PaymentError::NotFound(code),
            other => PaymentError::Unavailable(other.to_string()),
        })
    }
}

#[async_trait]
impl PaymentStatusService for PaymentClient {
    async fn status(&self, order_code: OrderCode) -> Result<PaymentStatus, PaymentError> {
        self.act(order_code, PaymentAction::GetStatus).await
    }

    async fn cancel(&self, order_code: OrderCode) -> Result<(), PaymentError> {
        self.cancel_link(order_code, USER_CANCELLED).await?;
        Ok(())
    }
}
