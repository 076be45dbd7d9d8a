//! Reference data service client.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::UpstreamError;
use crate::reference::model::{
    AbilityRecord, CreatureDetails, EvolutionChainRecord, SpeciesRecord, TypeRecord,
};

pub const DEFAULT_REFERENCE_URL: &str = "https://pokeapi.co/api/v2";

/// Read-only view of the reference data service.
#[async_trait]
pub trait ReferenceService: Send + Sync {
    async fn fetch_species(&self, id: &str) -> Result<SpeciesRecord, UpstreamError>;

    async fn fetch_type(&self, name: &str) -> Result<TypeRecord, UpstreamError>;

    async fn fetch_ability(&self, id: &str) -> Result<AbilityRecord, UpstreamError>;

    async fn fetch_evolution_chain(&self, id: u32) -> Result<EvolutionChainRecord, UpstreamError>;

    async fn fetch_creature(&self, id: u32) -> Result<CreatureDetails, UpstreamError>;
}

/// [ReferenceService] over HTTP. Holds no per-user state; one instance is shared by
/// every request.
#[derive(Debug, Clone)]
pub struct HttpReferenceClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpReferenceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dexprofile/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(base_url, http_client))
    }

    pub fn with_client(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "reference fetch");
        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| UpstreamError::Decode { url, source })
    }
}

#[async_trait]
impl ReferenceService for HttpReferenceClient {
    async fn fetch_species(&self, id: &str) -> Result<SpeciesRecord, UpstreamError> {
        // The species resource lives under `pokemon-species` on the public service.
        self.get_json(&format!("pokemon-species/{id}")).await
    }

    async fn fetch_type(&self, name: &str) -> Result<TypeRecord, UpstreamError> {
        self.get_json(&format!("type/{name}")).await
    }

    async fn fetch_ability(&self, id: &str) -> Result<AbilityRecord, UpstreamError> {
        self.get_json(&format!("ability/{id}")).await
    }

    async fn fetch_evolution_chain(&self, id: u32) -> Result<EvolutionChainRecord, UpstreamError> {
        self.get_json(&format!("evolution-chain/{id}")).await
    }

    async fn fetch_creature(&self, id: u32) -> Result<CreatureDetails, UpstreamError> {
        self.get_json(&format!("pokemon/{id}")).await
    }
}
