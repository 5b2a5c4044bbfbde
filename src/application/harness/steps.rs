//! Built-in step handlers

use regex::Regex;

use crate::domain::step::{
    DenialPage, IdentityProvider, LoginProfile, Step, StepId, EZBORROW_DENIED, EZPROXY_DENIED,
    LOGIN_SCREEN_PROMPT,
};

use super::registry::{StepContext, StepError};

type StepResult = Result<(), StepError>;

/// Whether `url` matches `pattern` as an unanchored regular expression.
///
/// A pattern that is not a valid regex is matched as a literal substring.
pub fn url_matches(pattern: &str, url: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(url),
        Err(_) => url.contains(pattern),
    }
}

pub fn visit(ctx: &mut StepContext<'_>, step: &Step) -> StepResult {
    let Step::Visit { url } = step else {
        return Err(StepError::mismatch(StepId::Visit, step));
    };
    ctx.browser.visit(url)?;
    Ok(())
}

pub fn expect_login_screen(ctx: &mut StepContext<'_>, step: &Step) -> StepResult {
    if !matches!(step, Step::ExpectLoginScreen) {
        return Err(StepError::mismatch(StepId::ExpectLoginScreen, step));
    }
    expect_text(ctx, LOGIN_SCREEN_PROMPT)
}

pub fn login_as(ctx: &mut StepContext<'_>, step: &Step) -> StepResult {
    let Step::LoginAs { profile } = step else {
        return Err(StepError::mismatch(StepId::LoginAs, step));
    };
    login_with_profile(ctx, *profile)
}

pub fn login_shibboleth(ctx: &mut StepContext<'_>, step: &Step) -> StepResult {
    let Step::LoginShibboleth { username, password } = step else {
        return Err(StepError::mismatch(StepId::LoginShibboleth, step));
    };
    submit_login(ctx, IdentityProvider::Shibboleth, username, password)
}

pub fn login_aleph(ctx: &mut StepContext<'_>, step: &Step) -> StepResult {
    let Step::LoginAleph { username, password } = step else {
        return Err(StepError::mismatch(StepId::LoginAleph, step));
    };
    submit_login(ctx, IdentityProvider::Aleph, username, password)
}

pub fn expect_redirect(ctx: &mut StepContext<'_>, step: &Step) -> StepResult {
    let Step::ExpectRedirect { url } = step else {
        return Err(StepError::mismatch(StepId::ExpectRedirect, step));
    };
    expect_url(ctx, url)
}

pub fn expect_content(ctx: &mut StepContext<'_>, step: &Step) -> StepResult {
    let Step::ExpectContent { text } = step else {
        return Err(StepError::mismatch(StepId::ExpectContent, step));
    };
    expect_text(ctx, text)
}

pub fn expect_ezproxy_denied(ctx: &mut StepContext<'_>, step: &Step) -> StepResult {
    if !matches!(step, Step::ExpectEzproxyDenied) {
        return Err(StepError::mismatch(StepId::ExpectEzproxyDenied, step));
    }
    expect_denial(ctx, &EZPROXY_DENIED)
}

pub fn expect_ezborrow_denied(ctx: &mut StepContext<'_>, step: &Step) -> StepResult {
    if !matches!(step, Step::ExpectEzborrowDenied) {
        return Err(StepError::mismatch(StepId::ExpectEzborrowDenied, step));
    }
    expect_denial(ctx, &EZBORROW_DENIED)
}

/// Pick the affiliation, then log in with the stored credentials
fn login_with_profile(ctx: &mut StepContext<'_>, profile: LoginProfile) -> StepResult {
    ctx.browser.click_link(profile.affiliation_link())?;
    let credential = ctx
        .credentials
        .lookup(profile.institution(), profile.user_type())?;
    tracing::debug!(
        institution = profile.institution(),
        user_type = profile.user_type(),
        username = %credential.username,
        "logging in"
    );
    submit_login(
        ctx,
        profile.provider(),
        &credential.username,
        &credential.password,
    )
}

fn submit_login(
    ctx: &mut StepContext<'_>,
    provider: IdentityProvider,
    username: &str,
    password: &str,
) -> StepResult {
    let within = Some(provider.container());
    ctx.browser
        .fill_in(within, provider.username_field(), username)?;
    ctx.browser
        .fill_in(within, provider.password_field(), password)?;
    ctx.browser.click_button(within, provider.submit_label())?;
    Ok(())
}

fn expect_url(ctx: &mut StepContext<'_>, pattern: &str) -> StepResult {
    let current = ctx.browser.current_url()?;
    if url_matches(pattern, &current) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected current URL to match '{}', was '{}'",
            pattern, current
        )))
    }
}

fn expect_text(ctx: &mut StepContext<'_>, text: &str) -> StepResult {
    if ctx.browser.page_contains(text)? {
        Ok(())
    } else {
        let url = ctx.browser.current_url().unwrap_or_default();
        Err(StepError::Assertion(format!(
            "expected page {} to contain '{}'",
            url, text
        )))
    }
}

/// URL first, then each text in order
fn expect_denial(ctx: &mut StepContext<'_>, page: &DenialPage) -> StepResult {
    expect_url(ctx, page.url)?;
    for text in page.texts {
        expect_text(ctx, text)?;
    }
    Ok(())
}
