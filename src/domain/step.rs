//! Harness steps
//!
//! Steps are structured values with typed arguments. A scenario file names
//! them with `step: <id>`; the registry binds each [`StepId`] to a handler.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a step handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Visit,
    ExpectLoginScreen,
    LoginAs,
    LoginShibboleth,
    LoginAleph,
    ExpectRedirect,
    ExpectContent,
    ExpectEzproxyDenied,
    ExpectEzborrowDenied,
}

impl StepId {
    pub const ALL: [StepId; 9] = [
        StepId::Visit,
        StepId::ExpectLoginScreen,
        StepId::LoginAs,
        StepId::LoginShibboleth,
        StepId::LoginAleph,
        StepId::ExpectRedirect,
        StepId::ExpectContent,
        StepId::ExpectEzproxyDenied,
        StepId::ExpectEzborrowDenied,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepId::Visit => "visit",
            StepId::ExpectLoginScreen => "expect_login_screen",
            StepId::LoginAs => "login_as",
            StepId::LoginShibboleth => "login_shibboleth",
            StepId::LoginAleph => "login_aleph",
            StepId::ExpectRedirect => "expect_redirect",
            StepId::ExpectContent => "expect_content",
            StepId::ExpectEzproxyDenied => "expect_ezproxy_denied",
            StepId::ExpectEzborrowDenied => "expect_ezborrow_denied",
        }
    }

    /// Keys a step of this kind may carry besides `step`
    pub fn arguments(self) -> &'static [&'static str] {
        match self {
            StepId::Visit | StepId::ExpectRedirect => &["url"],
            StepId::LoginAs => &["profile"],
            StepId::LoginShibboleth | StepId::LoginAleph => &["username", "password"],
            StepId::ExpectContent => &["text"],
            StepId::ExpectLoginScreen
            | StepId::ExpectEzproxyDenied
            | StepId::ExpectEzborrowDenied => &[],
        }
    }

    pub fn from_name(name: &str) -> Option<StepId> {
        StepId::ALL.into_iter().find(|id| id.as_str() == name)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Open a URL in the browser session
    Visit { url: String },
    /// The affiliation chooser is showing
    ExpectLoginScreen,
    /// Choose an affiliation and log in with stored credentials
    LoginAs { profile: LoginProfile },
    /// Fill and submit the Shibboleth form
    LoginShibboleth { username: String, password: String },
    /// Fill and submit the Aleph form
    LoginAleph { username: String, password: String },
    /// Current URL matches a pattern
    ExpectRedirect { url: String },
    /// Literal text is on the page
    ExpectContent { text: String },
    ExpectEzproxyDenied,
    ExpectEzborrowDenied,
}

impl Step {
    pub fn id(&self) -> StepId {
        match self {
            Step::Visit { .. } => StepId::Visit,
            Step::ExpectLoginScreen => StepId::ExpectLoginScreen,
            Step::LoginAs { .. } => StepId::LoginAs,
            Step::LoginShibboleth { .. } => StepId::LoginShibboleth,
            Step::LoginAleph { .. } => StepId::LoginAleph,
            Step::ExpectRedirect { .. } => StepId::ExpectRedirect,
            Step::ExpectContent { .. } => StepId::ExpectContent,
            Step::ExpectEzproxyDenied => StepId::ExpectEzproxyDenied,
            Step::ExpectEzborrowDenied => StepId::ExpectEzborrowDenied,
        }
    }
}

/// Login form layout of an identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityProvider {
    Shibboleth,
    Aleph,
}

impl IdentityProvider {
    /// CSS selector of the element enclosing the login form
    pub fn container(self) -> &'static str {
        match self {
            IdentityProvider::Shibboleth => "#section_login",
            IdentityProvider::Aleph => "#aleph",
        }
    }

    pub fn username_field(self) -> &'static str {
        match self {
            IdentityProvider::Shibboleth => "j_username",
            IdentityProvider::Aleph => "username",
        }
    }

    pub fn password_field(self) -> &'static str {
        match self {
            IdentityProvider::Shibboleth => "j_password",
            IdentityProvider::Aleph => "password",
        }
    }

    pub fn submit_label(self) -> &'static str {
        "Login"
    }
}

/// Who a `login_as` step logs in as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginProfile {
    NyuStudent,
    CooperUnionFaculty,
    NysidFaculty,
}

impl LoginProfile {
    /// Text of the affiliation link on the login chooser
    pub fn affiliation_link(self) -> &'static str {
        match self {
            LoginProfile::NyuStudent => "NYU",
            LoginProfile::CooperUnionFaculty => "Cooper Union",
            LoginProfile::NysidFaculty => "NYSID",
        }
    }

    pub fn institution(self) -> &'static str {
        match self {
            LoginProfile::NyuStudent => "nyu",
            LoginProfile::CooperUnionFaculty => "cooper",
            LoginProfile::NysidFaculty => "nysid",
        }
    }

    pub fn user_type(self) -> &'static str {
        match self {
            LoginProfile::NyuStudent => "student",
            LoginProfile::CooperUnionFaculty | LoginProfile::NysidFaculty => "faculty",
        }
    }

    pub fn provider(self) -> IdentityProvider {
        match self {
            LoginProfile::NyuStudent => IdentityProvider::Shibboleth,
            LoginProfile::CooperUnionFaculty | LoginProfile::NysidFaculty => {
                IdentityProvider::Aleph
            }
        }
    }
}

/// A proxy "not authorized" page: where it lives and what it says
#[derive(Debug, Clone, Copy)]
pub struct DenialPage {
    pub url: &'static str,
    pub texts: &'static [&'static str],
}

pub const NOT_AUTHORIZED_APOLOGY: &str =
    "We're sorry, but you are not authorized to access this content.";

pub const LOGIN_SCREEN_PROMPT: &str = "Select your affiliation to login";

pub const EZPROXY_DENIED: DenialPage = DenialPage {
    url: "http://library.nyu.edu/errors/ezproxy-library-nyu-edu/unauthorized",
    texts: &["EZProxy Login", NOT_AUTHORIZED_APOLOGY],
};

pub const EZBORROW_DENIED: DenialPage = DenialPage {
    url: "http://library.nyu.edu/errors/ezborrow-library-nyu-edu/unauthorized",
    texts: &[
        "EZBorrow access is available to all NYU faculty, staff and students enrolled in degree or diploma programs.",
        NOT_AUTHORIZED_APOLOGY,
    ],
};
