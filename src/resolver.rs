//! Resolution engine turning link definitions and resource URIs into URLs.

use thiserror::Error;

use crate::links::LinkDefinition;
use crate::provider::{MetadataProvider, ProviderError};
use crate::resource_uri::{ResourceKind, ResourceUri};
use crate::url_template::{render, SubstitutionMap};

/// Terminal failure of a single resolve call. No retry, no partial URL.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The identifier did not parse to a supported resource.
    #[error("invalid resource identifier: '{0}'")]
    InvalidIdentifier(String),
    /// The link definition has no template for the requested kind.
    #[error("'{label}' has no {kind} link")]
    UnsupportedKind { label: String, kind: ResourceKind },
    /// Provider fetch failed; propagated unchanged.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Parses a raw host identifier, then resolves it against `definition`.
pub fn resolve_raw_identifier(
    definition: &LinkDefinition,
    raw_identifier: &str,
    provider: &dyn MetadataProvider,
) -> Result<String, ResolveError> {
    let uri = ResourceUri::parse(raw_identifier)
        .ok_or_else(|| ResolveError::InvalidIdentifier(raw_identifier.to_string()))?;
    resolve_url(definition, &uri, provider)
}

/// Renders the external-site URL for one resource against one definition.
///
/// Template presence is checked before the provider fetch; a missing
/// template never costs a network round-trip.
pub fn resolve_url(
    definition: &LinkDefinition,
    uri: &ResourceUri,
    provider: &dyn MetadataProvider,
) -> Result<String, ResolveError> {
    let template = definition
        .template_for(uri.kind)
        .ok_or_else(|| ResolveError::UnsupportedKind {
            label: definition.label.clone(),
            kind: uri.kind,
        })?;

    let mut values = SubstitutionMap::new();
    match uri.kind {
        ResourceKind::Track => {
            let track = provider.fetch_track(uri.id())?;
            values.insert("artist", track.artist);
            values.insert("album", track.album);
            values.insert("track", track.name);
        }
        ResourceKind::Album => {
            let album = provider.fetch_album(uri.id())?;
            values.insert("artist", album.artist);
            values.insert("album", album.name);
            values.insert("type", album.album_type);
        }
        ResourceKind::Artist => {
            let artist = provider.fetch_artist(uri.id())?;
            values.insert("artist", artist.name);
        }
    }

    Ok(render(template, &values, |value| {
        definition.escape.apply(value)
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{resolve_raw_identifier, resolve_url, ResolveError};
    use crate::links::{builtin_links, EscapeStyle, LinkDefinition};
    use crate::provider::{
        AlbumRecord, ArtistRecord, MetadataProvider, ProviderError, TrackRecord,
    };
    use crate::resource_uri::{ResourceKind, ResourceUri};

    #[derive(Default)]
    struct FakeProvider {
        artist: Option<ArtistRecord>,
        album: Option<AlbumRecord>,
        track: Option<TrackRecord>,
        fetch_count: AtomicUsize,
    }

    impl FakeProvider {
        fn fetches(&self) -> usize {
            self.fetch_count.load(Ordering::Relaxed)
        }
    }

    impl MetadataProvider for FakeProvider {
        fn fetch_artist(&self, _id: &str) -> Result<ArtistRecord, ProviderError> {
            self.fetch_count.fetch_add(1, Ordering::Relaxed);
            self.artist
                .clone()
                .ok_or_else(|| ProviderError::Request("connection refused".to_string()))
        }

        fn fetch_album(&self, _id: &str) -> Result<AlbumRecord, ProviderError> {
            self.fetch_count.fetch_add(1, Ordering::Relaxed);
            self.album
                .clone()
                .ok_or_else(|| ProviderError::Request("connection refused".to_string()))
        }

        fn fetch_track(&self, _id: &str) -> Result<TrackRecord, ProviderError> {
            self.fetch_count.fetch_add(1, Ordering::Relaxed);
            self.track
                .clone()
                .ok_or_else(|| ProviderError::Request("connection refused".to_string()))
        }
    }

    fn scrobbler_link() -> LinkDefinition {
        builtin_links().remove(0)
    }

    fn uri(raw: &str) -> ResourceUri {
        ResourceUri::parse(raw).expect("test uri")
    }

    #[test]
    fn test_track_resolution_renders_all_fields() {
        let provider = FakeProvider {
            track: Some(TrackRecord {
                artist: "Jane Doe".to_string(),
                album: "First Album".to_string(),
                name: "Song One".to_string(),
            }),
            ..FakeProvider::default()
        };
        let url = resolve_url(&scrobbler_link(), &uri("tune:track:abc"), &provider)
            .expect("track url");
        assert_eq!(
            url,
            "https://www.last.fm/music/Jane%20Doe/First%20Album/Song%20One"
        );
        assert_eq!(provider.fetches(), 1);
    }

    #[test]
    fn test_album_resolution_substitutes_release_type() {
        let provider = FakeProvider {
            album: Some(AlbumRecord {
                artist: "Guns N' Roses".to_string(),
                name: "First Album".to_string(),
                album_type: "single".to_string(),
            }),
            ..FakeProvider::default()
        };
        let rating_link = builtin_links().remove(1);
        let url = resolve_url(&rating_link, &uri("tune:album:abc"), &provider)
            .expect("album url");
        assert_eq!(
            url,
            "https://rateyourmusic.com/release/single/guns-n-roses/first-album/"
        );
    }

    #[test]
    fn test_artist_resolution_uses_artist_template() {
        let provider = FakeProvider {
            artist: Some(ArtistRecord {
                name: "Jane Doe".to_string(),
            }),
            ..FakeProvider::default()
        };
        let url = resolve_url(&scrobbler_link(), &uri("tune:artist:abc"), &provider)
            .expect("artist url");
        assert_eq!(url, "https://www.last.fm/music/Jane%20Doe");
    }

    #[test]
    fn test_unknown_placeholder_survives_resolution() {
        let provider = FakeProvider {
            artist: Some(ArtistRecord {
                name: "Jane Doe".to_string(),
            }),
            ..FakeProvider::default()
        };
        let link = LinkDefinition {
            label: "Odd site".to_string(),
            escape: EscapeStyle::PercentEncode,
            artist_template: Some("https://x.test/{artist}/{bogus}".to_string()),
            album_template: None,
            track_template: None,
        };
        let url = resolve_url(&link, &uri("tune:artist:abc"), &provider).expect("artist url");
        assert_eq!(url, "https://x.test/Jane%20Doe/{bogus}");
    }

    #[test]
    fn test_missing_template_fails_without_fetch() {
        let provider = FakeProvider {
            artist: Some(ArtistRecord {
                name: "Jane Doe".to_string(),
            }),
            ..FakeProvider::default()
        };
        let mut link = scrobbler_link();
        link.artist_template = None;
        let err = resolve_url(&link, &uri("tune:artist:abc"), &provider)
            .expect_err("missing template");
        assert!(matches!(
            err,
            ResolveError::UnsupportedKind {
                kind: ResourceKind::Artist,
                ..
            }
        ));
        assert_eq!(provider.fetches(), 0);
    }

    #[test]
    fn test_provider_failure_propagates_unchanged() {
        let provider = FakeProvider::default();
        let err = resolve_url(&scrobbler_link(), &uri("tune:track:abc"), &provider)
            .expect_err("provider failure");
        match err {
            ResolveError::Provider(ProviderError::Request(message)) => {
                assert_eq!(message, "connection refused");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(provider.fetches(), 1);
    }

    #[test]
    fn test_unparseable_identifier_is_rejected_before_fetch() {
        let provider = FakeProvider::default();
        let err = resolve_raw_identifier(&scrobbler_link(), "junk:playlist:abc", &provider)
            .expect_err("invalid identifier");
        assert!(matches!(err, ResolveError::InvalidIdentifier(_)));
        assert_eq!(provider.fetches(), 0);
    }
}
