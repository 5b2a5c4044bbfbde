//! In-memory transport serving canned pages
//!
//! Test double for the HTTP transport: routes map URLs to documents or
//! redirects, and every form post is recorded.

use std::collections::HashMap;

use reqwest::Url;

use super::transport::{Response, Transport};
use crate::domain::ports::{BrowserError, BrowserResult};

enum Route {
    Page(String),
    Redirect(String),
}

#[derive(Default)]
pub struct ScriptedTransport {
    routes: HashMap<String, Route>,
    /// `(url, fields)` of every POST, in order
    pub posts: Vec<(String, Vec<(String, String)>)>,
    pub gets: Vec<String>,
    pub resets: usize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(url.to_string(), Route::Page(body.to_string()));
        self
    }

    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.routes.insert(from.to_string(), Route::Redirect(to.to_string()));
        self
    }

    fn serve(&self, url: &Url) -> BrowserResult<Response> {
        let mut current = url.to_string();
        for _ in 0..10 {
            // Query strings only matter for exact routes
            let route = self.routes.get(&current).or_else(|| {
                let mut bare = Url::parse(&current).ok()?;
                bare.set_query(None);
                self.routes.get(bare.as_str())
            });
            match route {
                Some(Route::Page(body)) => {
                    let url = Url::parse(&current).map_err(|e| BrowserError::InvalidUrl {
                        url: current.clone(),
                        message: e.to_string(),
                    })?;
                    return Ok(Response {
                        url,
                        body: body.clone(),
                    });
                }
                Some(Route::Redirect(to)) => current = to.clone(),
                None => break,
            }
        }
        Err(BrowserError::Transport {
            url: current,
            message: "no route".to_string(),
        })
    }
}

impl Transport for ScriptedTransport {
    fn get(&mut self, url: &Url) -> BrowserResult<Response> {
        self.gets.push(url.to_string());
        self.serve(url)
    }

    fn post_form(&mut self, url: &Url, fields: &[(String, String)]) -> BrowserResult<Response> {
        self.posts.push((url.to_string(), fields.to_vec()));
        self.serve(url)
    }

    fn reset(&mut self) -> BrowserResult<()> {
        self.resets += 1;
        Ok(())
    }
}
