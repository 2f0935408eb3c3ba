//! Public landing page.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let greeting = move || {
        auth.get()
            .user
            .map(|u| format!("Welcome back, {}.", u.first_name))
            .unwrap_or_else(|| "Bid on unique items or run your own auctions.".to_owned())
    };

    view! {
        <div class="home-page">
            <h1>"BidHub"</h1>
            <p class="home-page__tagline">{greeting}</p>
            <Show
                when=move || auth.get().is_authenticated()
                fallback=|| view! {
                    <div class="home-page__actions">
                        <a href="/register" class="button button--primary">"Get Started"</a>
                        <a href="/login" class="button">"Sign In"</a>
                    </div>
                }
            >
                <div class="home-page__actions">
                    <a href="/profile" class="button button--primary">"View Profile"</a>
                </div>
            </Show>
        </div>
    }
}
