//! Browser hand-off for resolved URLs.

/// Opens a URL with a platform facility.
pub trait UrlOpener: Send {
    fn open(&self, url: &str) -> Result<(), String>;
}

/// Default-browser opener backed by `webbrowser`.
#[derive(Debug, Default)]
pub struct SystemUrlOpener;

impl UrlOpener for SystemUrlOpener {
    fn open(&self, url: &str) -> Result<(), String> {
        webbrowser::open(url).map_err(|err| format!("failed to open browser: {err}"))
    }
}
