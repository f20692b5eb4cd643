//! Root application component with auth context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::auth_gate::AuthGate;
use crate::pages::home::HomePage;
use crate::state::{auth::AuthState, provider::AuthActions};

/// Root application component.
///
/// Provides `RwSignal<AuthState>` and [`AuthActions`] to every child and
/// holds rendering back until the first identity event resolves.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);
    provide_context(AuthActions::install(auth));

    view! {
        <Title text="Dashboard"/>
        <AuthGate>
            <HomePage/>
        </AuthGate>
    }
}
