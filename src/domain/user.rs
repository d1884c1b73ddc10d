use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::product::merge_required;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub firstname: String,
    pub lastname: String,
    pub experience: String,
    #[sqlx(rename = "type")]
    pub user_type: String,
    pub phone_number: String,
    pub birthday: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub firstname: String,
    pub lastname: String,
    pub experience: String,
    pub user_type: String,
    pub phone_number: String,
    pub birthday: OffsetDateTime,
}

/// Update body for `PUT /users/{id}`. Email and password are immutable via
/// this flow; the fields here follow the same merge policy as products
/// (empty strings are per-field no-ops).
#[derive(Debug, Deserialize)]
pub struct UserUpdate {
    pub firstname: String,
    pub lastname: String,
    pub experience: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub phone_number: String,
    #[serde(with = "time::serde::rfc3339")]
    pub birthday: OffsetDateTime,
}

impl UserUpdate {
    pub fn apply(self, user: &mut User) {
        merge_required(&mut user.firstname, Some(self.firstname));
        merge_required(&mut user.lastname, Some(self.lastname));
        merge_required(&mut user.experience, Some(self.experience));
        merge_required(&mut user.user_type, Some(self.user_type));
        merge_required(&mut user.phone_number, Some(self.phone_number));
        user.birthday = self.birthday;
    }
}

/// Client-facing projection. Excludes the password hash by construction so
/// no handler can leak it by serializing the row type directly.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub experience: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub phone_number: String,
    #[serde(with = "time::serde::rfc3339")]
    pub birthday: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            firstname: user.firstname,
            lastname: user.lastname,
            experience: user.experience,
            user_type: user.user_type,
            phone_number: user.phone_number,
            birthday: user.birthday,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
