//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The site is a single route. Page switching happens inside it through the
//! enumerated [`ViewRouter`], so the fade-out / swap / fade-in sequence stays
//! under our control instead of the browser history's.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{chat_launcher::ChatLauncher, footer::SiteFooter, navigation::NavBar};
use crate::config::PORTFOLIO;
use crate::net::types::Persona;
use crate::pages::{
    about::AboutPage,
    chat::{ConciergePage, TutorPage},
    flashcards::FlashcardsPage,
    home::HomePage,
    mind_map::MindMapPage,
    projects::ProjectsPage,
    study::StudyPage,
};
use crate::state::chat::ChatState;
use crate::state::study::{FlashcardsState, MindMapState};
use crate::state::view::{TRANSITION_MS, View, ViewRouter};
use crate::util::scroll::scroll_window_to_top;
use crate::util::timers::{TimerScope, epoch_ms};

/// Handle for switching views with the fade transition.
#[derive(Clone, Copy)]
pub struct ViewNavigator {
    router: RwSignal<ViewRouter>,
    current: Memo<View>,
    fading: Memo<bool>,
    timers: StoredValue<TimerScope>,
}

impl ViewNavigator {
    fn new(timers: TimerScope) -> Self {
        let router = RwSignal::new(ViewRouter::new(View::Home));
        Self {
            router,
            current: Memo::new(move |_| router.with(ViewRouter::current)),
            fading: Memo::new(move |_| router.with(ViewRouter::is_transitioning)),
            timers: StoredValue::new(timers),
        }
    }

    /// The committed view. Only changes when a swap lands.
    pub fn current(self) -> View {
        self.current.get()
    }

    /// True between a navigation request and its swap.
    pub fn is_fading(self) -> bool {
        self.fading.get()
    }

    /// Fade out, swap to `target`, then scroll to the top.
    pub fn go(self, target: View) {
        let Some(ticket) = self.router.try_update(|r| r.navigate(target)).flatten() else {
            return;
        };
        let router = self.router;
        self.timers.with_value(|timers| {
            timers.after(TRANSITION_MS, move || {
                if router.try_update(|r| r.commit(ticket)).unwrap_or(false) {
                    scroll_window_to_top();
                }
            });
        });
    }
}

/// The two independent conversations.
#[derive(Clone, Copy)]
pub struct ChatSessions {
    pub concierge: RwSignal<ChatState>,
    pub tutor: RwSignal<ChatState>,
}

impl ChatSessions {
    #[must_use]
    pub fn for_persona(self, persona: Persona) -> RwSignal<ChatState> {
        match persona {
            Persona::Concierge => self.concierge,
            Persona::Tutor => self.tutor,
        }
    }
}

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
///
/// Provides all shared state contexts and hosts the single site route.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let timers = TimerScope::new();
    let cleanup_timers = timers.clone();
    on_cleanup(move || cleanup_timers.cancel());

    let now = epoch_ms();
    provide_context(ViewNavigator::new(timers));
    provide_context(ChatSessions {
        concierge: RwSignal::new(ChatState::new(Persona::Concierge, now)),
        tutor: RwSignal::new(ChatState::new(Persona::Tutor, now)),
    });
    provide_context(RwSignal::new(FlashcardsState::default()));
    provide_context(RwSignal::new(MindMapState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/folio.css"/>
        <Title text=format!("{} | {}", PORTFOLIO.name, PORTFOLIO.role)/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=Site/>
            </Routes>
        </Router>
    }
}

/// Navigation chrome around whichever view is current.
#[component]
fn Site() -> impl IntoView {
    let nav = expect_context::<ViewNavigator>();

    view! {
        <div class="site">
            <NavBar/>
            <main class="site__main" class:site__main--fading=move || nav.is_fading()>
                {move || match nav.current() {
                    View::Home => view! { <HomePage/> }.into_any(),
                    View::Projects => view! { <ProjectsPage/> }.into_any(),
                    View::About => view! { <AboutPage/> }.into_any(),
                    View::Chat => view! { <ConciergePage/> }.into_any(),
                    View::Study => view! { <StudyPage/> }.into_any(),
                    View::Tutor => view! { <TutorPage/> }.into_any(),
                    View::Flashcards => view! { <FlashcardsPage/> }.into_any(),
                    View::MindMap => view! { <MindMapPage/> }.into_any(),
                }}
            </main>
            <SiteFooter/>
            <Show when=move || nav.current().shows_launcher()>
                <ChatLauncher/>
            </Show>
        </div>
    }
}
