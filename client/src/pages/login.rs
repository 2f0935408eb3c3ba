//! Login page with email + password sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes send visitors here with `?redirect=<path>`; a successful
//! sign-in navigates back to that path, or to `/profile` by default.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::error::AuthError;
use crate::state::directory::{SEED_EMAIL, SEED_PASSWORD};
use crate::util::auth::{REDIRECT_PARAM, redirect_target};

pub(crate) const MISSING_FIELDS_MESSAGE: &str = "Please enter both email and password";

/// Trim the email and require both fields. The password is kept verbatim.
///
/// Registration trims the email it stores, so a trimmed login matches it.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    Ok((email.to_owned(), password.to_owned()))
}

pub(crate) fn login_failure_message(err: AuthError) -> &'static str {
    match err {
        AuthError::InvalidCredentials => "Invalid email or password",
        AuthError::EmailTaken | AuthError::NotAuthenticated => {
            "An error occurred while logging in. Please try again."
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let query = use_query_map();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let target = move || redirect_target(query.get().get(REDIRECT_PARAM).as_deref());

    #[cfg(feature = "hydrate")]
    let session = expect_context::<crate::state::session::AuthContext>();
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        error.set(String::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            let destination = target();
            leptos::task::spawn_local(async move {
                match session.login(&email_value, &password_value).await {
                    Ok(_) => navigate(&destination, leptos_router::NavigateOptions::default()),
                    Err(e) => error.set(login_failure_message(e).to_owned()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, password_value, target());
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Welcome Back"</h1>
                <p class="login-card__subtitle">"Sign in to your account"</p>
                <Show when=move || !error.get().is_empty()>
                    <p class="login-message login-message--error">{move || error.get()}</p>
                </Show>
                <form class="login-form" on:submit=on_submit>
                    <label for="login-email">"Email Address"</label>
                    <input
                        id="login-email"
                        class="login-input"
                        type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="login-password">"Password"</label>
                    <input
                        id="login-password"
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <p class="login-card__footer">
                    "Don't have an account? "
                    <a href="/register">"Create one"</a>
                </p>
                <div class="login-demo">
                    <h3>"Demo Credentials"</h3>
                    <p>"Email: " {SEED_EMAIL}</p>
                    <p>"Password: " {SEED_PASSWORD}</p>
                </div>
            </div>
        </div>
    }
}
