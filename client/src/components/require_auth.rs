//! Route wrapper that only renders its children for a signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps guarded pages in the route table. Unauthenticated visitors are sent
//! to `/login` with the requested path and query attached so the login page can return
//! them afterwards.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::state::auth::AuthState;
use crate::util::auth::{GuardDecision, guard_decision, requested_path};

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();

    move || {
        let requested = requested_path(&location.pathname.get(), &location.search.get());
        match guard_decision(&auth.get(), &requested) {
            GuardDecision::Pending => view! {
                <div class="guard-pending">
                    <p>"Loading..."</p>
                </div>
            }
            .into_any(),
            GuardDecision::Redirect(to) => view! { <Redirect path=to/> }.into_any(),
            GuardDecision::Allow => children().into_any(),
        }
    }
}
