//! Metadata provider fetch adapters.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::config::ProviderConfig;

/// Artist metadata snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRecord {
    pub name: String,
}

/// Album metadata snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumRecord {
    /// Primary artist name.
    pub artist: String,
    pub name: String,
    /// Release type, e.g. "album" or "single".
    pub album_type: String,
}

/// Track metadata snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    /// Primary artist name.
    pub artist: String,
    pub album: String,
    pub name: String,
}

/// Failure fetching a metadata record from the provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("metadata request failed: {0}")]
    Request(String),
    #[error("malformed metadata response: {0}")]
    MalformedResponse(String),
}

/// Read-only metadata fetch facility keyed by opaque resource ids.
///
/// One call per resolution; implementations do not cache or retry.
pub trait MetadataProvider: Send + Sync {
    fn fetch_artist(&self, id: &str) -> Result<ArtistRecord, ProviderError>;
    fn fetch_album(&self, id: &str) -> Result<AlbumRecord, ProviderError>;
    fn fetch_track(&self, id: &str) -> Result<TrackRecord, ProviderError>;
}

/// Metadata provider backed by `ureq` against the host's HTTP endpoints.
pub struct HttpMetadataProvider {
    endpoint: String,
    http_client: ureq::Agent,
}

impl HttpMetadataProvider {
    /// Creates a provider client for the given base endpoint.
    pub fn new(endpoint: &str, connect_timeout: Duration, read_timeout: Duration) -> Self {
        let http_client = ureq::AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout_read(read_timeout)
            .timeout_write(read_timeout)
            .build();
        Self {
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    /// Creates a provider client from configuration.
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(
            &config.endpoint,
            config.connect_timeout(),
            config.read_timeout(),
        )
    }

    fn request_json(&self, path: &str) -> Result<Value, ProviderError> {
        let url = format!("{}{}", self.endpoint, path);
        let response = self
            .http_client
            .get(&url)
            .set("Accept", "application/json")
            .call()
            .map_err(|err| ProviderError::Request(format!("GET {path}: {err}")))?;
        response
            .into_json()
            .map_err(|err| ProviderError::MalformedResponse(format!("GET {path}: {err}")))
    }
}

impl MetadataProvider for HttpMetadataProvider {
    fn fetch_artist(&self, id: &str) -> Result<ArtistRecord, ProviderError> {
        let payload = self.request_json(&format!("/artist/v1/{id}/desktop?format=json"))?;
        parse_artist(&payload).ok_or_else(|| missing_fields("artist", id))
    }

    fn fetch_album(&self, id: &str) -> Result<AlbumRecord, ProviderError> {
        let payload = self.request_json(&format!("/album/v1/album-app/album/{id}/desktop"))?;
        parse_album(&payload).ok_or_else(|| missing_fields("album", id))
    }

    fn fetch_track(&self, id: &str) -> Result<TrackRecord, ProviderError> {
        let payload = self.request_json(&format!("/tracks/{id}"))?;
        parse_track(&payload).ok_or_else(|| missing_fields("track", id))
    }
}

fn missing_fields(kind: &str, id: &str) -> ProviderError {
    ProviderError::MalformedResponse(format!("{kind} record '{id}' is missing required fields"))
}

fn parse_artist(payload: &Value) -> Option<ArtistRecord> {
    let name = payload.get("info")?.get("name")?.as_str()?.to_string();
    Some(ArtistRecord { name })
}

fn parse_album(payload: &Value) -> Option<AlbumRecord> {
    let artist = payload
        .get("artists")?
        .get(0)?
        .get("name")?
        .as_str()?
        .to_string();
    let name = payload.get("name")?.as_str()?.to_string();
    let album_type = payload.get("type")?.as_str()?.to_string();
    Some(AlbumRecord {
        artist,
        name,
        album_type,
    })
}

fn parse_track(payload: &Value) -> Option<TrackRecord> {
    let artist = payload
        .get("artists")?
        .get(0)?
        .get("name")?
        .as_str()?
        .to_string();
    let album = payload.get("album")?.get("name")?.as_str()?.to_string();
    let name = payload.get("name")?.as_str()?.to_string();
    Some(TrackRecord {
        artist,
        album,
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_album, parse_artist, parse_track};
    use serde_json::json;

    #[test]
    fn test_parse_artist_record() {
        let payload = json!({ "info": { "name": "Jane Doe" } });
        let record = parse_artist(&payload).expect("artist record");
        assert_eq!(record.name, "Jane Doe");
    }

    #[test]
    fn test_parse_album_record() {
        let payload = json!({
            "name": "The Album",
            "type": "single",
            "artists": [{ "name": "Jane Doe" }, { "name": "Guest" }],
        });
        let record = parse_album(&payload).expect("album record");
        assert_eq!(record.artist, "Jane Doe");
        assert_eq!(record.name, "The Album");
        assert_eq!(record.album_type, "single");
    }

    #[test]
    fn test_parse_track_record() {
        let payload = json!({
            "name": "The Song",
            "album": { "name": "The Album" },
            "artists": [{ "name": "Jane Doe" }],
        });
        let record = parse_track(&payload).expect("track record");
        assert_eq!(record.artist, "Jane Doe");
        assert_eq!(record.album, "The Album");
        assert_eq!(record.name, "The Song");
    }

    #[test]
    fn test_parse_rejects_records_without_required_fields() {
        assert!(parse_artist(&json!({ "info": {} })).is_none());
        assert!(parse_album(&json!({ "name": "x", "type": "album", "artists": [] })).is_none());
        assert!(parse_track(&json!({ "name": "x", "artists": [{ "name": "a" }] })).is_none());
    }
}
