//! [`ActorEntity`] implementation for [`Order`].
//!
//! `from_create_params` only produces a skeleton; `on_create` fills in the user, the lines,
//! the total, the order code and the QR code. If any step fails, nothing is stored.

use super::actions::OrderAction;
use super::error::OrderError;
use super::OrderContext;
use crate::cart_actor::CartError;
use crate::framework::ActorEntity;
use crate::model::{
    CartStatus, Order, OrderCode, OrderCreate, OrderDetail, OrderId, OrderStatus, PaymentLinkCreate,
    Transition, UserName,
};
use crate::payment_actor::PaymentError;
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use std::convert::Infallible;
use tracing::{info, warn};

const PAYMENT_DESCRIPTION: &str = "AutoParts Checkout";

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = Infallible;
    type Action = OrderAction;
    type ActionResult = bool;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            order_code: OrderCode(0),
            user: UserName(String::new()),
            cart_id: params.cart_id,
            status: OrderStatus::Pending,
            total_price: 0.0,
            created_at: Utc::now().trunc_subsecs(0),
            details: Vec::new(),
            qr_code: String::new(),
        })
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        let cart = match ctx.carts.get_cart(self.cart_id).await {
            Ok(cart) => cart,
            Err(CartError::NotFound(_)) => return Err(OrderError::CartNotFound(self.cart_id)),
            Err(e) => return Err(e.into()),
        };
        if cart.status == CartStatus::CheckedOut {
            return Err(OrderError::CartCheckedOut(self.cart_id));
        }
        if cart.is_empty() {
            return Err(OrderError::EmptyCart(self.cart_id));
        }

        self.user = cart.user.clone();
        self.details = cart
            .items
            .iter()
            .map(|item| OrderDetail {
                product_id: item.product_id,
                name: item.name.clone(),
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect();
        self.total_price = self.details.iter().map(|d| d.line_total).sum();

        // The gateway takes whole currency units.
        let amount = self.total_price.trunc() as u64;
        let mut attempts = 0;
        let link = loop {
            attempts += 1;
            let code = (ctx.order_codes)();
            let params = PaymentLinkCreate {
                amount,
                description: PAYMENT_DESCRIPTION.to_string(),
            };
            match ctx.payments.open_link(code, params).await {
                Ok(link) => break link,
                Err(PaymentError::DuplicateOrderCode(_)) if attempts < ctx.code_retries => {
                    warn!(order_code = %code, attempts, "Order code taken, drawing another");
                }
                Err(PaymentError::DuplicateOrderCode(_)) => {
                    return Err(OrderError::DuplicateOrderCode { attempts })
                }
                Err(e) => return Err(e.into()),
            }
        };

        self.order_code = link.order_code;
        self.qr_code = link.qr_code;
        info!(order_code = %self.order_code, cart_id = %self.cart_id, total = self.total_price, "Order placed");
        Ok(())
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &OrderContext) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &OrderContext) -> Result<bool, Self::Error> {
        match action {
            OrderAction::ChangeStatus(next) => match self.status.transition_to(next) {
                Transition::Apply => {
                    info!(order_code = %self.order_code, from = %self.status, to = %next, "Order status changed");
                    self.status = next;
                    Ok(true)
                }
                Transition::NoOp => Ok(false),
                Transition::Reject => Err(OrderError::InvalidTransition {
                    from: self.status,
                    to: next,
                }),
            },
        }
    }
}
