//! Loading gate shown until the first identity event resolves.

use leptos::prelude::*;

use crate::state::auth::AuthState;

/// Render `children` once auth has finished its initial load.
#[component]
pub fn AuthGate(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <Show
            when=move || !auth.with(AuthState::loading)
            fallback=|| view! {
                <div class="auth-gate">
                    <span class="auth-gate__spinner" aria-label="Loading"></span>
                </div>
            }
        >
            {children()}
        </Show>
    }
}
