//! Loading the remote earthquake feed.

use crate::error::FetchError;
use crate::model::QuakeCollection;
use geojson::{Feature, FeatureCollection, GeoJson};
use std::future::Future;

/// HTTP transport behind the feed loader. An abstraction seam so tests can
/// inject canned responses instead of touching the network.
pub trait FeedClient: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Real transport on top of `reqwest`.
#[derive(Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        ReqwestClient {
            client: reqwest::Client::new(),
        }
    }
}

impl FeedClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

/// Fetches a GeoJSON feed and converts it into a [`QuakeCollection`].
/// Single attempt, no retry; the session recovers from failures by keeping
/// its data source empty.
pub struct FeedLoader<C: FeedClient = ReqwestClient> {
    client: C,
}

impl FeedLoader<ReqwestClient> {
    pub fn new() -> Self {
        FeedLoader {
            client: ReqwestClient::new(),
        }
    }
}

impl Default for FeedLoader<ReqwestClient> {
    fn default() -> Self {
        FeedLoader::new()
    }
}

impl<C: FeedClient> FeedLoader<C> {
    pub fn with_client(client: C) -> Self {
        FeedLoader { client }
    }

    pub async fn load(&self, url: &str) -> Result<QuakeCollection, FetchError> {
        validate_url(url)?;
        tracing::info!(url, "loading earthquake feed");
        let body = self.client.get(url).await?;
        let collection = parse_feed(&body)?;
        tracing::info!(features = collection.len(), "earthquake feed loaded");
        Ok(collection)
    }
}

fn validate_url(url: &str) -> Result<(), FetchError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

/// Parses a GeoJSON document into a quake collection. A bare feature or
/// geometry is treated as a one-element collection.
pub fn parse_feed(content: &str) -> Result<QuakeCollection, FetchError> {
    let geojson: GeoJson = content
        .parse()
        .map_err(|e: geojson::Error| FetchError::InvalidGeoJson(e.to_string()))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        GeoJson::Feature(feature) => FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        },
        GeoJson::Geometry(geometry) => FeatureCollection {
            bbox: None,
            features: vec![Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: None,
                foreign_members: None,
            }],
            foreign_members: None,
        },
    };
    Ok(QuakeCollection::from_geojson(collection))
}
