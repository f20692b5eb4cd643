//! Dashboard home showing the backend profile and a logout action.

use leptos::prelude::*;

use crate::net::types::BackendProfile;
use crate::state::auth::AuthState;
use crate::state::provider::AuthActions;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let actions = expect_context::<AuthActions>();

    let profile_text = move |render: fn(&BackendProfile) -> String| {
        auth.with(|state| state.profile().map(render).unwrap_or_default())
    };
    let display_name = move || profile_text(BackendProfile::display_name_or_default);
    let initials = move || profile_text(BackendProfile::initials);
    let plan = move || profile_text(BackendProfile::plan);

    view! {
        <Show
            when=move || auth.with(AuthState::is_authenticated)
            fallback=|| view! { <p class="home-page__signed-out">"You are signed out."</p> }
        >
            <div class="home-page">
                <span class="home-page__avatar">{initials}</span>
                <h1>"Welcome back, " {display_name}</h1>
                <p class="home-page__plan">{plan}</p>
                <button class="btn btn--secondary" on:click=move |_| actions.logout()>
                    "Log out"
                </button>
            </div>
        </Show>
    }
}
