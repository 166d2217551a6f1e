use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::constants::*;
use crate::error::{Error, Result};

/// Breeds mapped to their sub-breeds, as served by `/breeds/list/all`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    breeds: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }

    pub fn breeds(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.breeds.iter().map(|(breed, subs)| (breed.as_str(), subs.as_slice()))
    }

    /// Every selectable category: each breed, then each `breed/sub` pair.
    pub fn categories(&self) -> Vec<String> {
        let mut names = Vec::new();
        for (breed, subs) in &self.breeds {
            names.push(breed.clone());
            names.extend(subs.iter().map(|sub| format!("{breed}/{sub}")));
        }
        names
    }

    pub fn contains(&self, category: &str) -> bool {
        match category.split_once('/') {
            Some((breed, sub)) => self.breeds.get(breed).is_some_and(|subs| subs.iter().any(|s| s == sub)),
            None => self.breeds.contains_key(category),
        }
    }
}

#[async_trait]
pub trait CatalogLoader: Send + Sync {
    async fn list_categories(&self) -> Result<Catalog>;
}

#[async_trait]
pub trait ItemListFetcher: Send + Sync {
    /// Ordered item references for `category`, possibly empty.
    async fn fetch_items(&self, category: &str) -> Result<Vec<String>>;
}

// --- Wire format: every dog.ceo answer is wrapped in this envelope ---
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    message: serde_json::Value,
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.status != "success" {
        let reason = match envelope.message {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        };
        return Err(Error::Api(reason));
    }
    Ok(serde_json::from_value(envelope.message)?)
}

#[derive(Debug, Clone)]
pub struct DogCeoClient {
    http: reqwest::Client,
    base: Url,
}

impl DogCeoClient {
    pub fn new(base: Url) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/{}", self.base.as_str().trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| Error::Config(format!("bad endpoint {raw}: {e}")))
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "fetching");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match decode(&body) {
            Ok(value) => Ok(value),
            // dog.ceo explains its 404s in the envelope, keep that message
            Err(Error::Parse(e)) if !status.is_success() => {
                warn!(%url, %status, "undecodable error body: {e}");
                Err(Error::Status(status))
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl CatalogLoader for DogCeoClient {
    async fn list_categories(&self) -> Result<Catalog> {
        let url = self.endpoint("breeds/list/all")?;
        self.get(url).await
    }
}

#[async_trait]
impl ItemListFetcher for DogCeoClient {
    async fn fetch_items(&self, category: &str) -> Result<Vec<String>> {
        let url = self.endpoint(&format!("breed/{category}/images"))?;
        self.get(url).await
    }
}
