//! Step registry
//!
//! Handlers are plain functions keyed by [`StepId`]. The standard registry
//! carries every built-in step; callers may replace any of them.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::ports::{Browser, BrowserError, CredentialError, CredentialSource};
use crate::domain::step::{Step, StepId};

use super::steps;

/// Why a step did not pass
#[derive(Debug, Error)]
pub enum StepError {
    /// An expectation about the page did not hold
    #[error("{0}")]
    Assertion(String),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("no handler registered for step '{0}'")]
    Unregistered(StepId),

    /// A handler received a step of another kind
    #[error("handler for '{expected}' cannot run step '{actual}'")]
    Mismatch { expected: StepId, actual: StepId },
}

impl StepError {
    pub fn mismatch(expected: StepId, step: &Step) -> Self {
        StepError::Mismatch {
            expected,
            actual: step.id(),
        }
    }
}

/// What a handler may touch
pub struct StepContext<'a> {
    pub browser: &'a mut dyn Browser,
    pub credentials: &'a dyn CredentialSource,
}

pub type StepHandler = Box<dyn Fn(&mut StepContext<'_>, &Step) -> Result<(), StepError>>;

#[derive(Default)]
pub struct StepRegistry {
    handlers: HashMap<StepId, StepHandler>,
}

impl StepRegistry {
    /// A registry with no handlers
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every built-in step
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(StepId::Visit, steps::visit);
        registry.register(StepId::ExpectLoginScreen, steps::expect_login_screen);
        registry.register(StepId::LoginAs, steps::login_as);
        registry.register(StepId::LoginShibboleth, steps::login_shibboleth);
        registry.register(StepId::LoginAleph, steps::login_aleph);
        registry.register(StepId::ExpectRedirect, steps::expect_redirect);
        registry.register(StepId::ExpectContent, steps::expect_content);
        registry.register(StepId::ExpectEzproxyDenied, steps::expect_ezproxy_denied);
        registry.register(StepId::ExpectEzborrowDenied, steps::expect_ezborrow_denied);
        registry
    }

    /// Bind `id` to `handler`, replacing any previous binding
    pub fn register<F>(&mut self, id: StepId, handler: F)
    where
        F: Fn(&mut StepContext<'_>, &Step) -> Result<(), StepError> + 'static,
    {
        self.handlers.insert(id, Box::new(handler));
    }

    pub fn contains(&self, id: StepId) -> bool {
        self.handlers.contains_key(&id)
    }

    /// Registered ids in declaration order
    pub fn ids(&self) -> Vec<StepId> {
        StepId::ALL
            .into_iter()
            .filter(|id| self.contains(*id))
            .collect()
    }

    pub fn run(&self, ctx: &mut StepContext<'_>, step: &Step) -> Result<(), StepError> {
        let id = step.id();
        let handler = self.handlers.get(&id).ok_or(StepError::Unregistered(id))?;
        tracing::debug!(step = %id, "running step");
        handler(ctx, step)
    }
}

impl std::fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_every_step() {
        let registry = StepRegistry::standard();
        assert_eq!(registry.ids(), StepId::ALL.to_vec());
    }

    #[test]
    fn empty_registry_reports_unregistered_step() {
        struct NoBrowser;
        impl Browser for NoBrowser {
            fn visit(&mut self, _: &str) -> Result<(), BrowserError> {
                Err(BrowserError::NoPage)
            }
            fn click_link(&mut self, _: &str) -> Result<(), BrowserError> {
                Err(BrowserError::NoPage)
            }
            fn fill_in(&mut self, _: Option<&str>, _: &str, _: &str) -> Result<(), BrowserError> {
                Err(BrowserError::NoPage)
            }
            fn click_button(&mut self, _: Option<&str>, _: &str) -> Result<(), BrowserError> {
                Err(BrowserError::NoPage)
            }
            fn current_url(&self) -> Result<String, BrowserError> {
                Err(BrowserError::NoPage)
            }
            fn page_contains(&self, _: &str) -> Result<bool, BrowserError> {
                Err(BrowserError::NoPage)
            }
            fn has_selector(&self, _: &str) -> Result<bool, BrowserError> {
                Err(BrowserError::NoPage)
            }
            fn reset_session(&mut self) -> Result<(), BrowserError> {
                Ok(())
            }
        }
        struct NoCredentials;
        impl CredentialSource for NoCredentials {
            fn lookup(
                &self,
                institution: &str,
                user_type: &str,
            ) -> Result<crate::domain::Credential, CredentialError> {
                Err(CredentialError::NotFound {
                    key: format!("{}.{}", institution, user_type),
                    source_file: "none".into(),
                })
            }
        }

        let mut browser = NoBrowser;
        let mut ctx = StepContext {
            browser: &mut browser,
            credentials: &NoCredentials,
        };
        let err = StepRegistry::empty()
            .run(&mut ctx, &Step::ExpectLoginScreen)
            .unwrap_err();
        assert!(matches!(err, StepError::Unregistered(StepId::ExpectLoginScreen)));
    }
}
