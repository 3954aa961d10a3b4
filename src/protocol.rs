//! Event-bus protocol for the links extension runtime.
//!
//! Defines the message payloads exchanged between the host's menu glue
//! and the links manager.

/// Top-level envelope for bus traffic the extension participates in.
#[derive(Debug, Clone)]
pub enum Message {
    Links(LinksMessage),
}

/// Links-domain commands and notifications.
#[derive(Debug, Clone)]
pub enum LinksMessage {
    /// Host selection changed; payload is the raw selected identifiers.
    SelectionChanged(Vec<String>),
    /// User activated the menu entry with the given label for a resource.
    OpenExternalLink {
        link_label: String,
        resource_uri: String,
    },
    /// Published menu entry state after a selection change.
    MenuSnapshotUpdated(MenuSnapshot),
    /// Resolve-and-open failed; surfaced for the host UI.
    OpenLinkFailed {
        link_label: String,
        resource_uri: String,
        error: String,
    },
    /// Stop the manager loop.
    Shutdown,
}

/// Versioned snapshot of context-menu state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSnapshot {
    pub version: u64,
    /// Submenu gate: exactly one selected item of a supported kind.
    pub submenu_enabled: bool,
    pub entries: Vec<MenuEntrySnapshot>,
}

/// Single context-menu entry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntrySnapshot {
    pub label: String,
    /// The selected resource kind has a template on this link.
    pub enabled: bool,
}
