use std::sync::Arc;

use crate::security::jwt::TokenIssuer;
use crate::store::{ProductStore, UserStore};

/// Shared per-process state: the injected store ports plus the token issuer.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
    pub users: Arc<dyn UserStore>,
    pub jwt: TokenIssuer,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductStore>,
        users: Arc<dyn UserStore>,
        jwt: TokenIssuer,
    ) -> Arc<Self> {
        Arc::new(Self {
            products,
            users,
            jwt,
        })
    }
}
