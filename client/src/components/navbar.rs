//! Top navigation bar with auth-aware links.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::auth::AuthState;
use crate::state::session::AuthContext;

/// Links shown to visitors without a session.
pub(crate) const GUEST_LINKS: [(&str, &str); 3] = [("/", "Home"), ("/register", "Register"), ("/login", "Login")];

/// Links shown to a signed-in user (logout is a separate button).
pub(crate) const MEMBER_LINKS: [(&str, &str); 2] = [("/", "Home"), ("/profile", "Profile")];

pub(crate) fn nav_links(state: &AuthState) -> &'static [(&'static str, &'static str)] {
    if state.is_authenticated() { &MEMBER_LINKS } else { &GUEST_LINKS }
}

pub(crate) fn link_class(current_path: &str, href: &str) -> &'static str {
    if current_path == href { "navbar__link navbar__link--active" } else { "navbar__link" }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AuthContext>();
    let location = use_location();

    let on_logout = move |_: leptos::ev::MouseEvent| session.logout();

    view! {
        <nav class="navbar">
            <a href="/" class="navbar__brand">"BidHub"</a>
            <div class="navbar__links">
                {move || {
                    let path = location.pathname.get();
                    nav_links(&auth.get())
                        .iter()
                        .map(|(href, label)| {
                            view! {
                                <a href=*href class=link_class(&path, href)>{*label}</a>
                            }
                        })
                        .collect_view()
                }}
                <Show when=move || auth.get().is_authenticated()>
                    <button class="navbar__logout" on:click=on_logout.clone()>"Logout"</button>
                </Show>
            </div>
        </nav>
    }
}
