//! Links runtime coordinator.
//!
//! This manager is the bus-owned state holder for the link catalog and the
//! current host selection. It publishes menu snapshots on selection changes
//! and performs resolve-and-open when a menu entry is activated.

use log::{debug, warn};
use tokio::sync::broadcast::{Receiver, Sender};

use crate::links::LinkDefinition;
use crate::opener::UrlOpener;
use crate::protocol::{LinksMessage, MenuEntrySnapshot, MenuSnapshot, Message};
use crate::provider::MetadataProvider;
use crate::resolver::resolve_raw_identifier;
use crate::resource_uri::ResourceUri;

/// Coordinates menu state and link activation over the event bus.
pub struct LinksManager {
    bus_consumer: Receiver<Message>,
    bus_producer: Sender<Message>,
    catalog: Vec<LinkDefinition>,
    provider: Box<dyn MetadataProvider>,
    url_opener: Box<dyn UrlOpener>,
    selection: Vec<String>,
    snapshot_version: u64,
}

impl LinksManager {
    /// Creates a manager bound to bus channels.
    pub fn new(
        bus_consumer: Receiver<Message>,
        bus_producer: Sender<Message>,
        catalog: Vec<LinkDefinition>,
        provider: Box<dyn MetadataProvider>,
        url_opener: Box<dyn UrlOpener>,
    ) -> Self {
        Self {
            bus_consumer,
            bus_producer,
            catalog,
            provider,
            url_opener,
            selection: Vec::new(),
            snapshot_version: 0,
        }
    }

    /// Single selected resource, if the selection is exactly one
    /// parseable identifier. Multi-selection always gates the menu off.
    fn selected_resource(&self) -> Option<ResourceUri> {
        match self.selection.as_slice() {
            [only] => ResourceUri::parse(only),
            _ => None,
        }
    }

    fn emit_snapshot(&mut self) {
        self.snapshot_version = self.snapshot_version.saturating_add(1);
        let selected = self.selected_resource();
        let entries = self
            .catalog
            .iter()
            .map(|link| MenuEntrySnapshot {
                label: link.label.clone(),
                enabled: selected
                    .as_ref()
                    .is_some_and(|uri| link.supports(uri.kind)),
            })
            .collect();
        let snapshot = MenuSnapshot {
            version: self.snapshot_version,
            submenu_enabled: selected.is_some(),
            entries,
        };
        let _ = self
            .bus_producer
            .send(Message::Links(LinksMessage::MenuSnapshotUpdated(snapshot)));
    }

    fn emit_open_failed(&self, link_label: &str, resource_uri: &str, error: String) {
        let _ = self
            .bus_producer
            .send(Message::Links(LinksMessage::OpenLinkFailed {
                link_label: link_label.to_string(),
                resource_uri: resource_uri.to_string(),
                error,
            }));
    }

    fn open_external_link(&mut self, link_label: &str, resource_uri: &str) {
        let Some(link) = self.catalog.iter().find(|link| link.label == link_label) else {
            warn!("LinksManager: activation for unknown link '{}'", link_label);
            self.emit_open_failed(link_label, resource_uri, format!("unknown link: {link_label}"));
            return;
        };
        match resolve_raw_identifier(link, resource_uri, self.provider.as_ref()) {
            Ok(url) => {
                debug!("LinksManager: opening {} for {}", url, resource_uri);
                if let Err(error) = self.url_opener.open(&url) {
                    warn!("LinksManager: failed to open '{}': {}", url, error);
                    self.emit_open_failed(link_label, resource_uri, error);
                }
            }
            Err(error) => {
                warn!(
                    "LinksManager: resolve failed for '{}' on {}: {}",
                    link_label, resource_uri, error
                );
                self.emit_open_failed(link_label, resource_uri, error.to_string());
            }
        }
    }

    fn handle_message(&mut self, message: LinksMessage) -> bool {
        match message {
            LinksMessage::SelectionChanged(selection) => {
                self.selection = selection;
                self.emit_snapshot();
            }
            LinksMessage::OpenExternalLink {
                link_label,
                resource_uri,
            } => {
                self.open_external_link(&link_label, &resource_uri);
            }
            LinksMessage::Shutdown => return true,
            LinksMessage::MenuSnapshotUpdated(_) | LinksMessage::OpenLinkFailed { .. } => {}
        }
        false
    }

    /// Blocking bus loop; runs until shutdown or bus closure.
    pub fn run(&mut self) {
        loop {
            match self.bus_consumer.blocking_recv() {
                Ok(Message::Links(message)) => {
                    if self.handle_message(message) {
                        break;
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("LinksManager: bus lagged, skipped {} messages", skipped);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}
