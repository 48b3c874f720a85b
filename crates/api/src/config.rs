use anyhow::{Context, Result};
use retriever::RetrieverConfig;
use std::net::SocketAddr;

pub const ENV_BIND_ADDR: &str = "API_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub retriever: RetrieverConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        Self::build(&bind_addr, RetrieverConfig::from_env()?)
    }

    fn build(bind_addr: &str, retriever: RetrieverConfig) -> Result<Self> {
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("Invalid {ENV_BIND_ADDR}: {bind_addr}"))?;

        Ok(Self {
            bind_addr,
            retriever,
        })
    }
}
