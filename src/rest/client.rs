//! # REST Client
//!
//! Implements the three service traits against the storefront backend over HTTP. Carts are
//! re-read after every mutation so callers always get the server's state back.
//!
//! Non-success statuses surface as the service's `Rejected { status, body }` variant and
//! transport failures as `Unavailable`.

use crate::cart_actor::CartError;
use crate::model::{
    Cart, CartId, CartItemId, CreatedOrder, Order, OrderCode, OrderStatus, PaymentStatus, ProductId, UserName,
};
use crate::order_actor::OrderError;
use crate::payment_actor::PaymentError;
use crate::rest::dto::{CartInfoDto, CartItemDto, CartLineRequest, OrderDto, PendingOrderDto};
use crate::rest::session::Session;
use crate::services::{CartService, OrderService, PaymentStatusService};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Error)]
enum RestError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error status={status} body={body}")]
    Api { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<RestError> for CartError {
    fn from(e: RestError) -> Self {
        match e {
            RestError::Api { status, body } => CartError::Rejected { status, body },
            other => CartError::Unavailable(other.to_string()),
        }
    }
}

impl From<RestError> for OrderError {
    fn from(e: RestError) -> Self {
        match e {
            RestError::Api { status, body } => OrderError::Rejected { status, body },
            other => OrderError::Unavailable(other.to_string()),
        }
    }
}

impl From<RestError> for PaymentError {
    fn from(e: RestError) -> Self {
        match e {
            RestError::Api { status, body } => PaymentError::Rejected { status, body },
            RestError::InvalidResponse(_) => PaymentError::NoData,
            RestError::Http(e) => PaymentError::Unavailable(e.to_string()),
        }
    }
}

struct Reply {
    status: StatusCode,
    body: String,
}

impl Reply {
    fn is_empty(&self) -> bool {
        self.status == StatusCode::NO_CONTENT || self.body.trim().is_empty()
    }

    fn json<T: DeserializeOwned>(&self) -> Result<T, RestError> {
        serde_json::from_str::<T>(&self.body)
            .map_err(|e| RestError::InvalidResponse(format!("{e}; body={}", self.body)))
    }
}

/// HTTP implementation of [`CartService`], [`OrderService`] and [`PaymentStatusService`].
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    session: Arc<Session>,
}

impl RestClient {
    pub fn new(session: Session) -> Self {
        Self::with_http(reqwest::Client::new(), session)
    }

    pub fn with_http(http: reqwest::Client, session: Session) -> Self {
        Self {
            http,
            session: Arc::new(session),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, self.session.url(path));
        match &self.session.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Reply, RestError> {
        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(status = status.as_u16(), body_len = body.len(), "Response received");

        if !status.is_success() {
            return Err(RestError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(Reply { status, body })
    }

    async fn cart_from_info(&self, info: CartInfoDto) -> Result<Cart, CartError> {
        let items: Vec<CartItemDto> = self
            .send(self.request(Method::GET, "/app/cart/items").query(&[("cartId", info.cart_id)]))
            .await?
            .json()?;
        Ok(info.into_cart(items, &self.session.user))
    }

    /// Runs a cart mutation and answers with the cart as the server now has it.
    async fn mutate(&self, cart_id: CartId, request: RequestBuilder) -> Result<Cart, CartError> {
        self.send(request).await?;
        CartService::get(self, cart_id).await
    }
}

#[async_trait]
impl CartService for RestClient {
    #[instrument(skip(self))]
    async fn get_or_create(&self, user: &UserName) -> Result<Cart, CartError> {
        let mut info: CartInfoDto = self
            .send(self.request(Method::GET, "/app/cart").query(&[("userName", user.as_str())]))
            .await?
            .json()?;
        if info.user_name.is_none() {
            info.user_name = Some(user.to_string());
        }
        self.cart_from_info(info).await
    }

    #[instrument(skip(self))]
    async fn get(&self, cart_id: CartId) -> Result<Cart, CartError> {
        let info: CartInfoDto = self
            .send(self.request(Method::GET, "/app/cart/status").query(&[("cartId", cart_id.0)]))
            .await?
            .json()?;
        self.cart_from_info(info).await
    }

    #[instrument(skip(self))]
    async fn add_item(&self, cart_id: CartId, product_id: ProductId, quantity: u32) -> Result<Cart, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        let body = CartLineRequest {
            cart_id: cart_id.0,
            product_id: product_id.0,
            quantity,
        };
        self.mutate(cart_id, self.request(Method::POST, "/app/cart/add").json(&body)).await
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, cart_id: CartId, product_id: ProductId) -> Result<Cart, CartError> {
        let request = self
            .request(Method::DELETE, "/app/cart/remove")
            .query(&[("cartId", cart_id.0), ("productId", product_id.0)]);
        self.mutate(cart_id, request).await
    }

    #[instrument(skip(self))]
    async fn update_quantity(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        let body = CartLineRequest {
            cart_id: cart_id.0,
            product_id: product_id.0,
            quantity,
        };
        self.mutate(cart_id, self.request(Method::PUT, "/app/cart/update").json(&body)).await
    }

    #[instrument(skip(self))]
    async fn increment(&self, cart_id: CartId, cart_item_id: CartItemId) -> Result<Cart, CartError> {
        let request = self
            .request(Method::PUT, "/app/cart-item/increase")
            .query(&[("cartItemId", cart_item_id.0)]);
        self.mutate(cart_id, request).await
    }

    #[instrument(skip(self))]
    async fn decrement(&self, cart_id: CartId, cart_item_id: CartItemId) -> Result<Cart, CartError> {
        let request = self
            .request(Method::PUT, "/app/cart-item/decrease")
            .query(&[("cartItemId", cart_item_id.0)]);
        self.mutate(cart_id, request).await
    }

    #[instrument(skip(self))]
    async fn clear(&self, cart_id: CartId) -> Result<Cart, CartError> {
        let request = self.request(Method::DELETE, "/app/cart/clear").query(&[("cartId", cart_id.0)]);
        self.mutate(cart_id, request).await
    }

    #[instrument(skip(self))]
    async fn lock(&self, cart_id: CartId) -> Result<Cart, CartError> {
        let request = self.request(Method::PUT, "/app/cart/lock").query(&[("cartId", cart_id.0)]);
        self.mutate(cart_id, request).await
    }

    #[instrument(skip(self))]
    async fn unlock(&self, user: &UserName) -> Result<(), CartError> {
        self.send(self.request(Method::PUT, "/app/cart/unlock").query(&[("userName", user.as_str())]))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn complete_checkout(&self, cart_id: CartId) -> Result<(), CartError> {
        self.send(self.request(Method::POST, "/app/cart/checkout").query(&[("cartId", cart_id.0)]))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl OrderService for RestClient {
    #[instrument(skip(self))]
    async fn create_order(&self, cart_id: CartId) -> Result<CreatedOrder, OrderError> {
        let created: CreatedOrder = self
            .send(self.request(Method::POST, "/app/order/create").query(&[("cartId", cart_id.0)]))
            .await?
            .json()?;
        debug!(?created, "Order created");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn change_status(&self, order_code: OrderCode, status: OrderStatus) -> Result<bool, OrderError> {
        let code = order_code.0.to_string();
        let reply = self
            .send(
                self.request(Method::PUT, "/app/order/change-order-status")
                    .query(&[("orderCode", code.as_str()), ("status", status.as_str())]),
            )
            .await?;
        if reply.is_empty() {
            return Ok(true);
        }
        Ok(reply.json::<bool>().unwrap_or(true))
    }

    #[instrument(skip(self))]
    async fn pending_order(&self, user: &UserName) -> Result<Option<OrderCode>, OrderError> {
        let reply = self
            .send(self.request(Method::GET, "/app/order/pending").query(&[("userName", user.as_str())]))
            .await?;
        if reply.is_empty() {
            return Ok(None);
        }
        let pending: PendingOrderDto = reply.json()?;
        Ok(Some(OrderCode(pending.order_code)))
    }

    #[instrument(skip(self))]
    async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        let orders: Vec<OrderDto> = self
            .send(self.request(Method::GET, "/app/order/get-orders-by-status").query(&[("status", status.as_str())]))
            .await?
            .json()?;
        Ok(orders.into_iter().map(Order::from).collect())
    }
}

/// Reads a payment status body. The backend answers with a JSON string; a bare word is
/// accepted too.
fn parse_payment_status(body: &str) -> Result<PaymentStatus, PaymentError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PaymentError::NoData);
    }
    if let Ok(status) = serde_json::from_str::<PaymentStatus>(trimmed) {
        return Ok(status);
    }
    match trimmed.trim_matches('"').to_ascii_uppercase().as_str() {
        "PENDING" => Ok(PaymentStatus::Pending),
        "PAID" => Ok(PaymentStatus::Paid),
        "CANCELLED" => Ok(PaymentStatus::Cancelled),
        _ => {
            warn!(body = trimmed, "Unrecognised payment status");
            Err(PaymentError::NoData)
        }
    }
}

#[async_trait]
impl PaymentStatusService for RestClient {
    #[instrument(skip(self))]
    async fn status(&self, order_code: OrderCode) -> Result<PaymentStatus, PaymentError> {
        let reply = self
            .send(self.request(Method::GET, "/app/payment/status").query(&[("orderCode", order_code.0)]))
            .await?;
        parse_payment_status(&reply.body)
    }

    /// The backend names the parameter `orderId` but expects the order code.
    #[instrument(skip(self))]
    async fn cancel(&self, order_code: OrderCode) -> Result<(), PaymentError> {
        self.send(self.request(Method::PUT, "/app/payment/cancel").query(&[("orderId", order_code.0)]))
            .await?;
        Ok(())
    }
}
