use std::sync::Arc;

use anyhow::Result;
use log::info;
use reqwest::{Client, Proxy};

use crate::Config;

pub type AppStateRef = Arc<AppState>;
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = Client::builder();

        if let Some(user_agent) = &config.http.user_agent {
            builder = builder.user_agent(user_agent)
        }

        if let Some(proxy) = &config.http.proxy {
            info!("With proxy: {}", proxy);
            builder = builder.proxy(Proxy::all(proxy)?);
        }

        Ok(Self {
            config: Arc::new(config),
            http_client: builder.build()?,
        })
    }
}
