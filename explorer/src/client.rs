//! HTTP client for the explorer REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::error::ExplorerError;
use crate::snapshot::{AddressPayload, WalletSnapshot, MAX_RECENT_TXS};
use crate::BalanceSource;

/// Public Ethereum mainnet endpoint used when none is configured.
pub const DEFAULT_API_BASE: &str = "https://api.blockcypher.com/v1/eth/main/";

/// Where the explorer lives and how to authenticate.
#[derive(Clone, Debug)]
pub struct ExplorerConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            token: None,
        }
    }
}

/// Wraps `reqwest::Client` with the explorer's base URL.
///
/// Only a connect timeout is set; the request itself runs until the
/// transport gives up. Failures are never retried.
#[derive(Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl ExplorerClient {
    pub fn new(config: ExplorerConfig) -> Result<Self, ExplorerError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ExplorerError::Url(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ExplorerError::Url(config.base_url));
        }
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ExplorerError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base,
            token: config.token.filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// `<base>/addrs/{address}?limit=5[&token=…]`
    pub fn address_url(&self, address: &str) -> Result<Url, ExplorerError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ExplorerError::Url(self.base.to_string()))?
            .pop_if_empty()
            .push("addrs")
            .push(address);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &MAX_RECENT_TXS.to_string());
            if let Some(token) = &self.token {
                query.append_pair("token", token);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl BalanceSource for ExplorerClient {
    async fn fetch_snapshot(&self, address: &str) -> Result<WalletSnapshot, ExplorerError> {
        let url = self.address_url(address)?;
        debug!(%address, "querying explorer");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ExplorerError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ExplorerError::Status(response.status().as_u16()));
        }

        let payload: AddressPayload = response
            .json()
            .await
            .map_err(|e| ExplorerError::Decode(e.to_string()))?;

        Ok(WalletSnapshot::from_payload(address, payload))
    }
}
