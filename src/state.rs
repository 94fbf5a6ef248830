use std::sync::Arc;

use crate::{
    cart::CartStore,
    checkout::Pricing,
    client::ApiClient,
    config::AppConfig,
    error::AppResult,
    models::Voucher,
    session::{KeyValueStore, SessionStore},
};

/// Built once at startup and handed to every consumer.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub api: ApiClient,
    pub session: SessionStore,
    pub cart: CartStore,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let session = SessionStore::new(store);
        let api = ApiClient::new(&config, session.clone())?;
        Ok(Self {
            config,
            api,
            session,
            cart: CartStore::new(),
        })
    }

    pub fn pricing(&self, voucher: Option<Voucher>) -> Pricing {
        Pricing {
            delivery_fee: self.config.delivery_fee,
            voucher,
        }
    }
}
