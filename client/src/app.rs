//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` is the composition root: it builds the auth session, provides it and
//! its published `AuthState` signal to the tree, and resolves the persisted
//! session once the page has hydrated.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::components::require_auth::RequireAuth;
use crate::pages::{home::HomePage, login::LoginPage, profile::ProfilePage, register::RegisterPage};
use crate::state::auth::AuthState;
use crate::state::directory::InMemoryDirectory;
use crate::state::session::AuthContext;
use crate::util::session_store::{BrowserStorage, SessionStore};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let session = AuthContext::new(InMemoryDirectory::seeded(), SessionStore::new(BrowserStorage));
    session.subscribe(move |state| auth.set(state.clone()));

    provide_context(auth);
    provide_context(session.clone());

    // Effects only run in the browser, so SSR always renders the loading state.
    Effect::new(move || session.restore());

    view! {
        <Title text="BidHub"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| view! { <Redirect path="/"/> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route
                        path=StaticSegment("profile")
                        view=|| view! {
                            <RequireAuth>
                                <ProfilePage/>
                            </RequireAuth>
                        }
                    />
                </Routes>
            </main>
        </Router>
    }
}
