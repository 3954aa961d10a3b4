//! Link definition catalog for external music sites.

use serde::Deserialize;

use crate::resource_uri::ResourceKind;

/// Escaping rule applied to substituted template values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeStyle {
    /// RFC 3986 percent-encoding.
    PercentEncode,
    /// Site-path slug: lowercased, whitespace runs to hyphens, punctuation
    /// stripped, `&` spelled out as `and`.
    Slug,
}

impl EscapeStyle {
    /// Applies the escaping rule. Total over arbitrary input strings.
    pub fn apply(self, value: &str) -> String {
        match self {
            Self::PercentEncode => urlencoding::encode(value).into_owned(),
            Self::Slug => slugify(value),
        }
    }
}

fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;
    for ch in value.chars() {
        if ch.is_whitespace() {
            pending_hyphen = !slug.is_empty();
            continue;
        }
        if ch == '&' {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push_str("and");
            continue;
        }
        if ch.is_alphanumeric() {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            for lowered in ch.to_lowercase() {
                slug.push(lowered);
            }
        }
    }
    slug
}

/// A single external-site entry in the links catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDefinition {
    /// Display name shown as the context-menu entry.
    pub label: String,
    pub escape: EscapeStyle,
    pub artist_template: Option<String>,
    pub album_template: Option<String>,
    pub track_template: Option<String>,
}

impl LinkDefinition {
    /// Template for the given resource kind, if this site supports it.
    pub fn template_for(&self, kind: ResourceKind) -> Option<&str> {
        match kind {
            ResourceKind::Artist => self.artist_template.as_deref(),
            ResourceKind::Album => self.album_template.as_deref(),
            ResourceKind::Track => self.track_template.as_deref(),
        }
    }

    pub fn supports(&self, kind: ResourceKind) -> bool {
        self.template_for(kind).is_some()
    }
}

/// Stock catalog in declaration order: scrobbler pages, release-rating
/// pages, release-rating search.
pub fn builtin_links() -> Vec<LinkDefinition> {
    vec![
        LinkDefinition {
            label: "Last.fm".to_string(),
            escape: EscapeStyle::PercentEncode,
            artist_template: Some("https://www.last.fm/music/{artist}".to_string()),
            album_template: Some("https://www.last.fm/music/{artist}/{album}".to_string()),
            track_template: Some("https://www.last.fm/music/{artist}/{album}/{track}".to_string()),
        },
        LinkDefinition {
            label: "Rate Your Music".to_string(),
            escape: EscapeStyle::Slug,
            artist_template: Some("https://rateyourmusic.com/artist/{artist}".to_string()),
            album_template: Some(
                "https://rateyourmusic.com/release/{type}/{artist}/{album}/".to_string(),
            ),
            track_template: Some(
                "https://rateyourmusic.com/release/single/{artist}/{track}/".to_string(),
            ),
        },
        LinkDefinition {
            label: "RYM search".to_string(),
            escape: EscapeStyle::PercentEncode,
            artist_template: Some(
                "https://rateyourmusic.com/search?searchterm={artist}&searchtype=a".to_string(),
            ),
            album_template: Some(
                "https://rateyourmusic.com/search?searchterm={artist}%20{album}&searchtype=l"
                    .to_string(),
            ),
            track_template: Some(
                "https://rateyourmusic.com/search?searchterm={artist}%20{track}&searchtype=l"
                    .to_string(),
            ),
        },
    ]
}
