//! A loaded document and the form state typed into it

use std::collections::HashMap;

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::domain::ports::{BrowserError, BrowserResult};

const CONTROLS: &str = "input, textarea, select";
/// Controls that submit their form when pressed
const SUBMIT_BUTTONS: &str = "button, input[type=submit], input[type=image]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A form about to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub method: Method,
    pub action: Url,
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

pub struct Page {
    url: Url,
    html: Html,
    /// Values typed into controls, keyed by document-order control index
    filled: HashMap<usize, String>,
}

fn selector(css: &str) -> BrowserResult<Selector> {
    Selector::parse(css).map_err(|_| BrowserError::InvalidSelector(css.to_string()))
}

/// Collapse runs of whitespace, as rendered text would
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn owning_form(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == "form")
}

/// `<button>` defaults to submit; `type=button` and `type=reset` do not send the form
fn submits_form(el: ElementRef<'_>) -> bool {
    let value = el.value();
    value.name() != "button"
        || value
            .attr("type")
            .map_or(true, |t| t.trim().eq_ignore_ascii_case("submit"))
}

fn element_text(el: ElementRef<'_>) -> String {
    normalize(&el.text().collect::<String>())
}

impl Page {
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
            filled: HashMap::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn scope(&self, within: Option<&str>) -> BrowserResult<ElementRef<'_>> {
        match within {
            None => Ok(self.html.root_element()),
            Some(css) => {
                let sel = selector(css)?;
                self.html
                    .select(&sel)
                    .next()
                    .ok_or_else(|| BrowserError::not_found("element", css, None))
            }
        }
    }

    fn resolve(&self, href: &str) -> BrowserResult<Url> {
        self.url.join(href).map_err(|e| BrowserError::InvalidUrl {
            url: href.to_string(),
            message: e.to_string(),
        })
    }

    /// Visible text of the document body
    pub fn text(&self) -> String {
        let root = match selector("body")
            .ok()
            .and_then(|sel| self.html.select(&sel).next())
        {
            Some(body) => body,
            None => self.html.root_element(),
        };

        let mut text = String::new();
        for node in root.descendants() {
            let Some(chunk) = node.value().as_text() else {
                continue;
            };
            let hidden = node
                .parent()
                .and_then(ElementRef::wrap)
                .is_some_and(|p| {
                    matches!(p.value().name(), "script" | "style" | "template" | "noscript")
                });
            if !hidden {
                text.push_str(chunk);
                text.push(' ');
            }
        }
        normalize(&text)
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.text().contains(&normalize(needle))
    }

    pub fn has_selector(&self, css: &str) -> BrowserResult<bool> {
        let sel = selector(css)?;
        Ok(self.html.select(&sel).next().is_some())
    }

    /// Target of the link matching `locator` by text, id or title.
    ///
    /// Exact text matches win over partial ones.
    pub fn find_link(&self, within: Option<&str>, locator: &str) -> BrowserResult<Url> {
        let scope = self.scope(within)?;
        let sel = selector("a[href]")?;
        let wanted = normalize(locator);
        let links: Vec<ElementRef<'_>> = scope.select(&sel).collect();

        let exact = links.iter().find(|a| {
            element_text(**a) == wanted
                || a.value().id() == Some(locator)
                || a.value().attr("title") == Some(locator)
        });
        let link = exact
            .or_else(|| links.iter().find(|a| element_text(**a).contains(&wanted)))
            .ok_or_else(|| BrowserError::not_found("link", locator, within))?;

        let href = link.value().attr("href").unwrap_or_default();
        self.resolve(href)
    }

    /// Index of the control matching `locator` by id, name, or label text
    fn find_control(&self, within: Option<&str>, locator: &str) -> BrowserResult<usize> {
        let scope = self.scope(within)?;
        let controls = selector(CONTROLS)?;
        let labels = selector("label[for]")?;

        let label_target = scope
            .select(&labels)
            .find(|l| element_text(*l) == normalize(locator))
            .and_then(|l| l.value().attr("for"));

        let matches = |el: &ElementRef<'_>| {
            let value = el.value();
            value.id() == Some(locator)
                || value.attr("name") == Some(locator)
                || (label_target.is_some() && value.id() == label_target)
        };

        let found = scope
            .select(&controls)
            .find(|el| matches(el))
            .ok_or_else(|| BrowserError::not_found("field", locator, within))?;

        self.html
            .select(&controls)
            .position(|el| el == found)
            .ok_or_else(|| BrowserError::not_found("field", locator, within))
    }

    pub fn fill_in(&mut self, within: Option<&str>, locator: &str, value: &str) -> BrowserResult<()> {
        let index = self.find_control(within, locator)?;
        self.filled.insert(index, value.to_string());
        Ok(())
    }

    fn find_button(&self, within: Option<&str>, label: &str) -> BrowserResult<ElementRef<'_>> {
        let scope = self.scope(within)?;
        let sel = selector(SUBMIT_BUTTONS)?;
        let wanted = normalize(label);

        scope
            .select(&sel)
            .filter(|b| submits_form(*b))
            .find(|b| {
                let value = b.value();
                let caption = if value.name() == "button" {
                    element_text(*b)
                } else {
                    normalize(value.attr("value").unwrap_or_default())
                };
                caption == wanted
                    || value.id() == Some(label)
                    || value.attr("title") == Some(label)
                    || (value.name() == "input" && value.attr("alt") == Some(label))
            })
            .ok_or_else(|| BrowserError::not_found("button", label, within))
    }

    /// The request pressing `label` would send
    pub fn submission(&self, within: Option<&str>, label: &str) -> BrowserResult<FormSubmission> {
        let button = self.find_button(within, label)?;
        let form = owning_form(button).ok_or_else(|| BrowserError::not_found("form", label, within))?;
        self.build_submission(form, Some(button))
    }

    /// A form the page submits on load (SAML POST binding pages do this)
    pub fn auto_submission(&self) -> BrowserResult<Option<FormSubmission>> {
        let body = selector("body[onload]")?;
        let submits = self
            .html
            .select(&body)
            .next()
            .and_then(|b| b.value().attr("onload"))
            .is_some_and(|script| script.contains(".submit()"));
        if !submits {
            return Ok(None);
        }

        let forms = selector("form")?;
        match self.html.select(&forms).next() {
            Some(form) => self.build_submission(form, None).map(Some),
            None => Ok(None),
        }
    }

    fn build_submission(
        &self,
        form: ElementRef<'_>,
        clicked: Option<ElementRef<'_>>,
    ) -> BrowserResult<FormSubmission> {
        let method = match form.value().attr("method") {
            Some(m) if m.eq_ignore_ascii_case("post") => Method::Post,
            _ => Method::Get,
        };
        let action = match form.value().attr("action").filter(|a| !a.is_empty()) {
            Some(action) => self.resolve(action)?,
            None => self.url.clone(),
        };

        let controls = selector(CONTROLS)?;
        let options = selector("option")?;
        let mut fields = Vec::new();

        for (index, control) in self.html.select(&controls).enumerate() {
            if owning_form(control) != Some(form) {
                continue;
            }
            let value = control.value();
            let Some(name) = value.attr("name") else {
                continue;
            };
            if value.attr("disabled").is_some() {
                continue;
            }
            let typed = self.filled.get(&index).cloned();

            match value.name() {
                "textarea" => {
                    fields.push((name.to_string(), typed.unwrap_or_else(|| control.text().collect())));
                }
                "select" => {
                    let chosen = typed.or_else(|| {
                        let all: Vec<ElementRef<'_>> = control.select(&options).collect();
                        all.iter()
                            .find(|o| o.value().attr("selected").is_some())
                            .or_else(|| all.first())
                            .map(|o| {
                                o.value()
                                    .attr("value")
                                    .map(str::to_string)
                                    .unwrap_or_else(|| element_text(*o))
                            })
                    });
                    if let Some(chosen) = chosen {
                        fields.push((name.to_string(), chosen));
                    }
                }
                _ => {
                    let kind = value.attr("type").unwrap_or("text").to_ascii_lowercase();
                    match kind.as_str() {
                        "submit" | "image" | "button" | "reset" => {
                            if clicked == Some(control) {
                                fields.push((
                                    name.to_string(),
                                    value.attr("value").unwrap_or_default().to_string(),
                                ));
                            }
                        }
                        "checkbox" | "radio" => {
                            if value.attr("checked").is_some() {
                                fields.push((
                                    name.to_string(),
                                    value.attr("value").unwrap_or("on").to_string(),
                                ));
                            }
                        }
                        "file" => {}
                        _ => fields.push((
                            name.to_string(),
                            typed.unwrap_or_else(|| {
                                value.attr("value").unwrap_or_default().to_string()
                            }),
                        )),
                    }
                }
            }
        }

        // <button name=..> is not a control in the selector above
        if let Some(button) = clicked.filter(|b| b.value().name() == "button") {
            if let Some(name) = button.value().attr("name") {
                fields.push((
                    name.to_string(),
                    button.value().attr("value").unwrap_or_default().to_string(),
                ));
            }
        }

        Ok(FormSubmission {
            method,
            action,
            fields,
        })
    }
}
