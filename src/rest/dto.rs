//! Wire shapes of the storefront backend. Field names follow the backend's camelCase JSON.

use crate::model::{
    Cart, CartId, CartItem, CartItemId, CartStatus, Order, OrderCode, OrderDetail, OrderId, OrderStatus,
    ProductId, UserName,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Basic cart info returned by `GET /app/cart` and `GET /app/cart/status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartInfoDto {
    pub cart_id: u64,
    pub status: CartStatus,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub total_price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub cart_item_id: u64,
    pub product_id: u64,
    #[serde(default)]
    pub product_name: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: u32,
}

impl From<CartItemDto> for CartItem {
    fn from(dto: CartItemDto) -> Self {
        CartItem {
            cart_item_id: CartItemId(dto.cart_item_id),
            product_id: ProductId(dto.product_id),
            name: dto.product_name,
            brand: dto.brand.unwrap_or_default(),
            description: dto.description.unwrap_or_default(),
            price: dto.price,
            quantity: dto.quantity,
            image: dto.image_url.unwrap_or_default(),
        }
    }
}

impl CartInfoDto {
    /// Combines the info with its items. Carts without an owner field belong to `fallback_user`.
    pub fn into_cart(self, items: Vec<CartItemDto>, fallback_user: &UserName) -> Cart {
        let user = self
            .user_name
            .map(UserName::from)
            .unwrap_or_else(|| fallback_user.clone());
        Cart::from_parts(
            CartId(self.cart_id),
            user,
            self.status,
            items.into_iter().map(CartItem::from).collect(),
        )
    }
}

/// Body of `POST /app/cart/add` and `PUT /app/cart/update`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRequest {
    pub cart_id: u64,
    pub product_id: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailDto {
    pub product_id: u64,
    #[serde(default)]
    pub product_name: String,
    pub quantity: u32,
    pub total_price: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: u64,
    pub order_code: u64,
    pub user_name: String,
    #[serde(default)]
    pub cart_id: Option<u64>,
    pub create_time: NaiveDateTime,
    pub total_price: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub qr_code_to_checkout: Option<String>,
    #[serde(default, rename = "orderDetailDTOList")]
    pub details: Vec<OrderDetailDto>,
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        Order {
            id: OrderId(dto.order_id),
            order_code: OrderCode(dto.order_code),
            user: UserName(dto.user_name),
            cart_id: CartId(dto.cart_id.unwrap_or_default()),
            status: dto.status,
            total_price: dto.total_price,
            created_at: dto.create_time.and_utc(),
            details: dto
                .details
                .into_iter()
                .map(|detail| OrderDetail {
                    product_id: ProductId(detail.product_id),
                    name: detail.product_name,
                    quantity: detail.quantity,
                    line_total: detail.total_price,
                })
                .collect(),
            qr_code: dto.qr_code_to_checkout.unwrap_or_default(),
        }
    }
}

/// Only the code is read from the pending order; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOrderDto {
    pub order_code: u64,
}
