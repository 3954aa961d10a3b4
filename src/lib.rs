//! Web-links context-menu extension for a music player host.
//!
//! Adds a "web links" submenu to the host's context menu: for the selected
//! artist, album, or track it fetches the metadata record from the host's
//! provider, substitutes the fields into a per-site URL template, and hands
//! the rendered URL to the system browser.

pub mod bootstrap;
pub mod config;
pub mod links;
pub mod links_manager;
pub mod opener;
pub mod protocol;
pub mod provider;
pub mod resolver;
pub mod resource_uri;
pub mod url_template;

pub use links::{builtin_links, EscapeStyle, LinkDefinition};
pub use links_manager::LinksManager;
pub use resolver::{resolve_url, ResolveError};
pub use resource_uri::{ResourceKind, ResourceUri};
