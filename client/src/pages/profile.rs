//! Profile page for the signed-in user, with inline editing.
//!
//! Rendered behind `RequireAuth`, so a user is expected; a missing user
//! renders nothing rather than panicking.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::session::AuthContext;
use crate::state::user::{ProfileUpdate, User};

/// Two-letter avatar initials, uppercase.
pub(crate) fn initials(user: &User) -> String {
    [&user.first_name, &user.last_name]
        .iter()
        .filter_map(|part| part.trim().chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Trimmed copy of the edit form.
pub(crate) fn normalize_update(update: &ProfileUpdate) -> ProfileUpdate {
    ProfileUpdate {
        first_name: update.first_name.trim().to_owned(),
        last_name: update.last_name.trim().to_owned(),
        phone: update.phone.trim().to_owned(),
        address: update.address.trim().to_owned(),
    }
}

#[component]
fn ProfileRow(label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="profile-row">
            <span class="profile-row__label">{label}</span>
            <span class="profile-row__value">{move || value.get()}</span>
        </div>
    }
}

#[component]
fn ProfileInput(label: &'static str, value: Signal<String>, on_input: Callback<String>) -> impl IntoView {
    view! {
        <label class="profile-input">
            <span>{label}</span>
            <input
                class="form-input"
                type="text"
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = StoredValue::new(expect_context::<AuthContext>());

    let editing = RwSignal::new(false);
    let draft = RwSignal::new(ProfileUpdate::default());
    let message = RwSignal::new(String::new());

    let field = move |read: fn(&User) -> String| {
        Signal::derive(move || auth.get().user.as_ref().map(read).unwrap_or_default())
    };
    let draft_field = move |read: fn(&ProfileUpdate) -> String| Signal::derive(move || read(&draft.get()));
    let draft_input = move |set: fn(&mut ProfileUpdate, String)| {
        Callback::new(move |v: String| draft.update(|d| set(d, v)))
    };

    let on_edit = move |_| {
        if let Some(user) = auth.get_untracked().user {
            draft.set(ProfileUpdate::from(&user));
            message.set(String::new());
            editing.set(true);
        }
    };
    let on_cancel = move |_| editing.set(false);
    let on_save = move |_| match session.with_value(|s| s.update_profile(&normalize_update(&draft.get_untracked()))) {
        Ok(_) => {
            editing.set(false);
            message.set("Profile updated.".to_owned());
        }
        Err(e) => message.set(format!("Could not save profile: {e}")),
    };

    view! {
        <div class="profile-page">
            <Show when=move || auth.get().is_authenticated()>
                <div class="profile-card">
                    <header class="profile-card__header">
                        <div class="profile-card__avatar">
                            {move || auth.get().user.as_ref().map(initials).unwrap_or_default()}
                        </div>
                        <div>
                            <h1>{move || auth.get().user.as_ref().map(User::display_name).unwrap_or_default()}</h1>
                            <p class="profile-card__role">
                                {move || auth.get().user.as_ref().map(|u| u.role.label()).unwrap_or_default()}
                            </p>
                        </div>
                    </header>
                    <Show when=move || !message.get().is_empty()>
                        <p class="profile-message">{move || message.get()}</p>
                    </Show>
                    <Show
                        when=move || editing.get()
                        fallback=move || {
                            view! {
                                <div class="profile-card__body">
                                    <ProfileRow label="Email" value=field(|u| u.email.clone())/>
                                    <ProfileRow label="Phone" value=field(|u| u.phone.clone())/>
                                    <ProfileRow label="Address" value=field(|u| u.address.clone())/>
                                    <button class="button" on:click=on_edit>"Edit Profile"</button>
                                </div>
                            }
                        }
                    >
                        <div class="profile-card__body">
                            <ProfileInput
                                label="First Name"
                                value=draft_field(|d| d.first_name.clone())
                                on_input=draft_input(|d, v| d.first_name = v)
                            />
                            <ProfileInput
                                label="Last Name"
                                value=draft_field(|d| d.last_name.clone())
                                on_input=draft_input(|d, v| d.last_name = v)
                            />
                            <ProfileInput
                                label="Phone"
                                value=draft_field(|d| d.phone.clone())
                                on_input=draft_input(|d, v| d.phone = v)
                            />
                            <ProfileInput
                                label="Address"
                                value=draft_field(|d| d.address.clone())
                                on_input=draft_input(|d, v| d.address = v)
                            />
                            <div class="profile-card__actions">
                                <button class="button button--primary" on:click=on_save>"Save"</button>
                                <button class="button" on:click=on_cancel>"Cancel"</button>
                            </div>
                        </div>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
