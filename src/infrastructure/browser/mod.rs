//! Document-level browser
//!
//! Drives pages over HTTP without running JavaScript: links are followed,
//! forms are filled and submitted, and cookies persist across requests
//! until the session is reset. Pages that submit a form from
//! `<body onload>` are submitted automatically, which is enough to carry
//! SAML POST bindings between the proxy and the identity provider.

mod page;
mod transport;

#[cfg(test)]
pub mod scripted;

pub use page::{FormSubmission, Method, Page};
pub use transport::{ReqwestTransport, Response, Transport, TransportOptions};

use reqwest::Url;

use crate::domain::ports::{Browser, BrowserError, BrowserResult};

/// Upper bound on chained auto-submitted pages
const MAX_AUTO_SUBMITS: usize = 5;

pub struct HttpBrowser<T: Transport> {
    transport: T,
    page: Option<Page>,
}

impl<T: Transport> HttpBrowser<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            page: None,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn page(&self) -> BrowserResult<&Page> {
        self.page.as_ref().ok_or(BrowserError::NoPage)
    }

    fn page_mut(&mut self) -> BrowserResult<&mut Page> {
        self.page.as_mut().ok_or(BrowserError::NoPage)
    }

    fn load(&mut self, response: Response) -> BrowserResult<()> {
        let mut page = Page::parse(response.url, &response.body);

        for _ in 0..MAX_AUTO_SUBMITS {
            let Some(submission) = page.auto_submission()? else {
                break;
            };
            tracing::debug!(action = %submission.action, "auto-submitting form");
            let response = self.send(&submission)?;
            page = Page::parse(response.url, &response.body);
        }

        tracing::debug!(url = %page.url(), "page loaded");
        self.page = Some(page);
        Ok(())
    }

    fn send(&mut self, submission: &FormSubmission) -> BrowserResult<Response> {
        match submission.method {
            Method::Post => self
                .transport
                .post_form(&submission.action, &submission.fields),
            Method::Get => {
                let mut url = submission.action.clone();
                url.query_pairs_mut()
                    .clear()
                    .extend_pairs(submission.fields.iter());
                self.transport.get(&url)
            }
        }
    }

    fn get(&mut self, url: &Url) -> BrowserResult<()> {
        let response = self.transport.get(url)?;
        self.load(response)
    }
}

impl<T: Transport> Browser for HttpBrowser<T> {
    fn visit(&mut self, url: &str) -> BrowserResult<()> {
        let url = match &self.page {
            Some(page) => page.url().join(url),
            None => Url::parse(url),
        }
        .map_err(|e| BrowserError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        self.get(&url)
    }

    fn click_link(&mut self, text: &str) -> BrowserResult<()> {
        let target = self.page()?.find_link(None, text)?;
        self.get(&target)
    }

    fn fill_in(&mut self, within: Option<&str>, field: &str, value: &str) -> BrowserResult<()> {
        self.page_mut()?.fill_in(within, field, value)
    }

    fn click_button(&mut self, within: Option<&str>, label: &str) -> BrowserResult<()> {
        let submission = self.page()?.submission(within, label)?;
        let response = self.send(&submission)?;
        self.load(response)
    }

    fn current_url(&self) -> BrowserResult<String> {
        Ok(self.page()?.url().to_string())
    }

    fn page_contains(&self, text: &str) -> BrowserResult<bool> {
        Ok(self.page()?.contains(text))
    }

    fn has_selector(&self, selector: &str) -> BrowserResult<bool> {
        self.page()?.has_selector(selector)
    }

    fn reset_session(&mut self) -> BrowserResult<()> {
        self.page = None;
        self.transport.reset()
    }
}
