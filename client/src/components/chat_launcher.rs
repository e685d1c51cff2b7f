//! Floating button that opens the concierge chat view.

use leptos::prelude::*;

use crate::app::{ChatSessions, ViewNavigator};
use crate::state::view::View;

#[component]
pub fn ChatLauncher() -> impl IntoView {
    let nav = expect_context::<ViewNavigator>();
    let sessions = expect_context::<ChatSessions>();

    // Badge while a reply is still on its way.
    let busy = move || sessions.concierge.get().is_loading;

    view! {
        <button class="launcher" title="Ask the concierge" on:click=move |_| nav.go(View::Chat)>
            <span class="launcher__icon">"✦"</span>
            <span class="launcher__label">"Ask me anything"</span>
            <Show when=busy>
                <span class="launcher__badge"></span>
            </Show>
        </button>
    }
}
