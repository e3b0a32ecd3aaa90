//! [`ActorEntity`] implementation for [`Product`].

use super::actions::ProductAction;
use super::error::ProductError;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = u32;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(ProductError::Invalid("name is empty".into()));
        }
        if !(params.price > 0.0) {
            return Err(ProductError::Invalid(format!("price {} is not positive", params.price)));
        }
        Ok(Self {
            id,
            name: params.name,
            brand: params.brand,
            description: params.description,
            price: params.price,
            image: params.image,
            stock: params.stock,
        })
    }

    /// # Fields Updated
    /// - `price`: must stay positive
    /// - `stock`: available quantity
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(price) = update.price {
            if !(price > 0.0) {
                return Err(ProductError::Invalid(format!("price {price} is not positive")));
            }
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ProductAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(self.stock),
        }
    }
}
