use async_trait::async_trait;

use crate::domain::product::{NewProduct, Product};
use crate::domain::user::{NewUser, User};
use crate::store::{ProductStore, StoreError, UserStore};

use super::db::Db;

/// Postgres-backed implementation of both store ports over a shared pool.
pub struct PgStore {
    db: Db,
}

impl PgStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn insert(&self, new: NewProduct) -> Result<Product, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products
                (title, subtitle, description, price, guru_info, type, related_stock, expected_return)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(&new.title)
        .bind(&new.subtitle)
        .bind(&new.description)
        .bind(new.price)
        .bind(&new.guru_info)
        .bind(&new.product_type)
        .bind(&new.related_stock)
        .bind(&new.expected_return)
        .fetch_one(&self.db)
        .await?;
        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE deleted_at IS NULL")
                .fetch_all(&self.db)
                .await?;
        Ok(products)
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(product)
    }

    async fn save(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE products
             SET title = $1, subtitle = $2, description = $3, price = $4, guru_info = $5,
                 type = $6, related_stock = $7, expected_return = $8, updated_at = now()
             WHERE id = $9 AND deleted_at IS NULL",
        )
        .bind(&product.title)
        .bind(&product.subtitle)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.guru_info)
        .bind(&product.product_type)
        .bind(&product.related_stock)
        .bind(&product.expected_return)
        .bind(product.id)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result =
            sqlx::query("UPDATE products SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&self.db)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users
                (email, password_hash, firstname, lastname, experience, type, phone_number, birthday)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.firstname)
        .bind(&new.lastname)
        .bind(&new.experience)
        .bind(&new.user_type)
        .bind(&new.phone_number)
        .bind(new.birthday)
        .fetch_one(&self.db)
        .await
        .map_err(unique_violation_as_conflict)?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users WHERE deleted_at IS NULL")
            .fetch_all(&self.db)
            .await?;
        Ok(users)
    }

    async fn get(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE users
             SET firstname = $1, lastname = $2, experience = $3, type = $4,
                 phone_number = $5, birthday = $6, updated_at = now()
             WHERE id = $7 AND deleted_at IS NULL",
        )
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.experience)
        .bind(&user.user_type)
        .bind(&user.phone_number)
        .bind(user.birthday)
        .bind(user.id)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result =
            sqlx::query("UPDATE users SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&self.db)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn unique_violation_as_conflict(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Conflict,
        _ => StoreError::from(err),
    }
}
