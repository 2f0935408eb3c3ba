//! Account registration page.
//!
//! Field checks run before the session is called; the session itself only
//! rejects duplicate emails.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use std::collections::BTreeMap;

use leptos::prelude::*;

use crate::error::AuthError;
use crate::state::user::{Registration, UserRole};

pub(crate) const DUPLICATE_EMAIL_MESSAGE: &str = "Registration failed. Email might already be in use.";
pub(crate) const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Raw form values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub role: UserRole,
    pub password: String,
    pub confirm_password: String,
}

/// Per-field error messages keyed by field name.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

impl RegisterForm {
    /// Check required fields and password confirmation.
    ///
    /// Text fields are trimmed; the password is taken verbatim.
    ///
    /// # Errors
    ///
    /// Every failing field, keyed by name.
    pub fn validate(&self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::new();
        let required = [
            ("email", self.email.trim(), "Email is required"),
            ("first_name", self.first_name.trim(), "First name is required"),
            ("last_name", self.last_name.trim(), "Last name is required"),
            ("phone", self.phone.trim(), "Phone number is required"),
            ("address", self.address.trim(), "Address is required"),
            ("password", self.password.as_str(), "Password is required"),
        ];
        for (field, value, message) in required {
            if value.is_empty() {
                errors.insert(field, message);
            }
        }
        if self.password != self.confirm_password {
            errors.insert("confirm_password", "Passwords do not match");
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Registration {
            email: self.email.trim().to_owned(),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            role: self.role,
            password: self.password.clone(),
        })
    }
}

pub(crate) fn register_failure_message(err: AuthError) -> &'static str {
    match err {
        AuthError::EmailTaken => DUPLICATE_EMAIL_MESSAGE,
        AuthError::InvalidCredentials | AuthError::NotAuthenticated => UNEXPECTED_MESSAGE,
    }
}

#[component]
fn FormField(
    label: &'static str,
    name: &'static str,
    #[prop(default = "text")] kind: &'static str,
    value: Signal<String>,
    on_input: Callback<String>,
    errors: RwSignal<FieldErrors>,
) -> impl IntoView {
    let id = format!("register-{name}");
    view! {
        <div class="form-field">
            <label for=id.clone()>{label}</label>
            <input
                id=id
                name=name
                class="form-input"
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {move || errors.get().get(name).map(|msg| view! { <p class="form-error">{*msg}</p> })}
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let form = RwSignal::new(RegisterForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let general_error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let session = expect_context::<crate::state::session::AuthContext>();
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let field = move |name: &'static str, set: fn(&mut RegisterForm, String)| {
        Callback::new(move |value: String| {
            form.update(|f| set(f, value));
            errors.update(|e| {
                e.remove(name);
            });
        })
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        general_error.set(String::new());
        let registration = match form.get().validate() {
            Ok(registration) => registration,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match session.register(registration).await {
                    Ok(_) => navigate("/profile", leptos_router::NavigateOptions::default()),
                    Err(e) => general_error.set(register_failure_message(e).to_owned()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = registration;
        }
    };

    view! {
        <div class="register-page">
            <div class="register-card">
                <h1>"Create an Account"</h1>
                <Show when=move || !general_error.get().is_empty()>
                    <p class="form-error form-error--general">{move || general_error.get()}</p>
                </Show>
                <form class="register-form" on:submit=on_submit>
                    <FormField
                        label="Email Address"
                        name="email"
                        kind="email"
                        value=Signal::derive(move || form.get().email)
                        on_input=field("email", |f, v| f.email = v)
                        errors=errors
                    />
                    <FormField
                        label="First Name"
                        name="first_name"
                        value=Signal::derive(move || form.get().first_name)
                        on_input=field("first_name", |f, v| f.first_name = v)
                        errors=errors
                    />
                    <FormField
                        label="Last Name"
                        name="last_name"
                        value=Signal::derive(move || form.get().last_name)
                        on_input=field("last_name", |f, v| f.last_name = v)
                        errors=errors
                    />
                    <FormField
                        label="Phone Number"
                        name="phone"
                        kind="tel"
                        value=Signal::derive(move || form.get().phone)
                        on_input=field("phone", |f, v| f.phone = v)
                        errors=errors
                    />
                    <FormField
                        label="Address"
                        name="address"
                        value=Signal::derive(move || form.get().address)
                        on_input=field("address", |f, v| f.address = v)
                        errors=errors
                    />
                    <div class="form-field">
                        <label for="register-role">"Account Type"</label>
                        <select
                            id="register-role"
                            class="form-input"
                            on:change=move |ev| {
                                if let Ok(role) = event_target_value(&ev).parse::<UserRole>() {
                                    form.update(|f| f.role = role);
                                }
                            }
                        >
                            {[UserRole::Bidder, UserRole::Auctioneer]
                                .into_iter()
                                .map(|role| {
                                    view! {
                                        <option
                                            value=role.as_str()
                                            selected=move || form.get().role == role
                                        >
                                            {role.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <FormField
                        label="Password"
                        name="password"
                        kind="password"
                        value=Signal::derive(move || form.get().password)
                        on_input=field("password", |f, v| f.password = v)
                        errors=errors
                    />
                    <FormField
                        label="Confirm Password"
                        name="confirm_password"
                        kind="password"
                        value=Signal::derive(move || form.get().confirm_password)
                        on_input=field("confirm_password", |f, v| f.confirm_password = v)
                        errors=errors
                    />
                    <button class="register-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create Account" }}
                    </button>
                </form>
                <p class="register-card__footer">
                    "Already have an account? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
