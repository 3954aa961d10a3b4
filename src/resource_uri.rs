//! Resource identifier helpers for host catalog entities.

use std::fmt;

const URI_SCHEME: &str = "tune";

/// Category of catalog entity a resource URI points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Artist,
    Album,
    Track,
}

impl ResourceKind {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "artist" => Some(Self::Artist),
            "album" => Some(Self::Album),
            "track" => Some(Self::Track),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Track => "track",
        };
        formatter.write_str(label)
    }
}

/// Decoded `tune:<kind>:<id>` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUri {
    pub kind: ResourceKind,
    id: String,
}

impl ResourceUri {
    /// Parses a raw host identifier. Returns `None` for anything that is
    /// not a well-formed `tune:<kind>:<id>` string with a supported kind.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut segments = raw.trim().splitn(3, ':');
        if segments.next()? != URI_SCHEME {
            return None;
        }
        let kind = ResourceKind::from_segment(segments.next()?)?;
        let id = segments.next()?.trim();
        if id.is_empty() || id.contains(':') {
            return None;
        }
        Some(Self {
            kind,
            id: id.to_string(),
        })
    }

    /// Raw short id used to build provider fetch paths.
    pub fn id(&self) -> &str {
        &self.id
    }
}
