//! Browser port
//!
//! The surface the harness drives. Every call blocks until the driver has
//! finished; waiting and timeouts belong to the driver.

use thiserror::Error;

pub type BrowserResult<T> = Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    /// No page has been loaded yet
    #[error("no page loaded; visit a URL first")]
    NoPage,

    /// A locator matched nothing on the current page
    #[error("unable to find {kind} '{locator}'{}", scope_suffix(.within))]
    ElementNotFound {
        kind: &'static str,
        locator: String,
        within: Option<String>,
    },

    /// A selector could not be parsed
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Transport-level failure (DNS, TLS, timeout, ...)
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

fn scope_suffix(within: &Option<String>) -> String {
    match within {
        Some(scope) => format!(" within '{}'", scope),
        None => String::new(),
    }
}

impl BrowserError {
    pub fn not_found(kind: &'static str, locator: &str, within: Option<&str>) -> Self {
        BrowserError::ElementNotFound {
            kind,
            locator: locator.to_string(),
            within: within.map(str::to_string),
        }
    }
}

pub trait Browser {
    /// Navigate to `url`
    fn visit(&mut self, url: &str) -> BrowserResult<()>;

    /// Follow the link whose text is `text`
    fn click_link(&mut self, text: &str) -> BrowserResult<()>;

    /// Set a form field, located by id or name, optionally inside the
    /// element matching the `within` selector
    fn fill_in(&mut self, within: Option<&str>, field: &str, value: &str) -> BrowserResult<()>;

    /// Press a submit button by its label, submitting its form
    fn click_button(&mut self, within: Option<&str>, label: &str) -> BrowserResult<()>;

    fn current_url(&self) -> BrowserResult<String>;

    /// Whether the page's visible text contains `text`
    fn page_contains(&self, text: &str) -> BrowserResult<bool>;

    /// Whether any element matches the CSS selector
    fn has_selector(&self, selector: &str) -> BrowserResult<bool>;

    /// Drop cookies and page state
    fn reset_session(&mut self) -> BrowserResult<()>;
}
