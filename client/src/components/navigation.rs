//! Top navigation bar and the study-tools tab strip.

use leptos::prelude::*;

use crate::app::ViewNavigator;
use crate::config::PORTFOLIO;
use crate::state::view::View;

/// Fixed header with the monogram and primary view links.
#[component]
pub fn NavBar() -> impl IntoView {
    let nav = expect_context::<ViewNavigator>();

    view! {
        <header class="nav">
            <button class="nav__brand" on:click=move |_| nav.go(View::Home)>
                {PORTFOLIO.bio.monogram}
            </button>
            <nav class="nav__links">
                {View::PRIMARY
                    .into_iter()
                    .map(|view| {
                        view! {
                            <button
                                class="nav__link"
                                class:nav__link--active=move || nav.current() == view
                                on:click=move |_| nav.go(view)
                            >
                                {view.nav_label()}
                            </button>
                        }
                    })
                    .collect_view()}
                <button
                    class="nav__link nav__link--study"
                    class:nav__link--active=move || nav.current().is_study()
                    on:click=move |_| nav.go(View::Study)
                >
                    "04. STUDY"
                </button>
            </nav>
        </header>
    }
}

/// Tab strip shared by the study pages.
#[component]
pub fn StudyTabs() -> impl IntoView {
    let nav = expect_context::<ViewNavigator>();

    view! {
        <div class="study-tabs">
            {View::STUDY
                .into_iter()
                .map(|view| {
                    view! {
                        <button
                            class="study-tabs__tab"
                            class:study-tabs__tab--active=move || nav.current() == view
                            on:click=move |_| nav.go(view)
                        >
                            {view.nav_label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
