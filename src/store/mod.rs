//! Persistence ports between the handlers and the data mapping layer.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::{NewProduct, Product};
use crate::domain::user::{NewUser, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique value already present")]
    Conflict,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Port for product persistence. Reads exclude soft-deleted rows; `delete`
/// marks the row and reports whether anything was affected.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, new: NewProduct) -> Result<Product, StoreError>;
    async fn list(&self) -> Result<Vec<Product>, StoreError>;
    async fn get(&self, id: i64) -> Result<Option<Product>, StoreError>;
    async fn save(&self, product: &Product) -> Result<(), StoreError>;
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

/// Port for user persistence. `insert` surfaces a duplicate email as
/// `StoreError::Conflict`; the unique constraint is the source of truth,
/// there is no pre-check read.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, new: NewUser) -> Result<User, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn list(&self) -> Result<Vec<User>, StoreError>;
    async fn get(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn save(&self, user: &User) -> Result<(), StoreError>;
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
