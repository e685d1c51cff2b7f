//! Study hub: entry points into the tutor, flashcards, and mind maps.

use leptos::prelude::*;

use crate::app::{ChatSessions, ViewNavigator};
use crate::components::navigation::StudyTabs;
use crate::state::chat::ChatState;
use crate::state::study::{FlashcardsState, MindMapState};
use crate::state::view::View;

#[component]
pub fn StudyPage() -> impl IntoView {
    let nav = expect_context::<ViewNavigator>();
    let sessions = expect_context::<ChatSessions>();
    let flashcards = expect_context::<RwSignal<FlashcardsState>>();
    let mind_map = expect_context::<RwSignal<MindMapState>>();

    let tutor_stat = move || {
        let count = sessions.tutor.with(ChatState::exchanged_count);
        if count == 0 { "No questions yet".to_owned() } else { format!("{count} messages this session") }
    };
    let deck_stat = move || {
        flashcards.with(|s| {
            if s.deck.is_empty() {
                "No deck loaded".to_owned()
            } else {
                format!("{} cards on {}", s.deck.cards.len(), s.topic.trim())
            }
        })
    };
    let map_stat = move || {
        mind_map.with(|s| {
            s.map
                .as_ref()
                .map_or_else(|| "No map yet".to_owned(), |m| format!("Mapped: {}", m.label))
        })
    };

    view! {
        <section class="study">
            <StudyTabs/>
            <header class="study__header">
                <h2 class="study__title">"Study Dashboard"</h2>
                <p class="study__subtitle">"Tools I built to learn faster. Pick one to start."</p>
            </header>
            <div class="study__grid">
                <StudyTile
                    title="AI Tutor"
                    blurb="Ask questions and get answers grounded in web sources."
                    stat=Signal::derive(tutor_stat)
                    on_open=Callback::new(move |()| nav.go(View::Tutor))
                />
                <StudyTile
                    title="Flashcards"
                    blurb="Generate a five-card deck on any topic and drill it."
                    stat=Signal::derive(deck_stat)
                    on_open=Callback::new(move |()| nav.go(View::Flashcards))
                />
                <StudyTile
                    title="Mind Maps"
                    blurb="Turn a topic into a radial outline of its key ideas."
                    stat=Signal::derive(map_stat)
                    on_open=Callback::new(move |()| nav.go(View::MindMap))
                />
            </div>
        </section>
    }
}

#[component]
fn StudyTile(title: &'static str, blurb: &'static str, stat: Signal<String>, on_open: Callback<()>) -> impl IntoView {
    view! {
        <button class="study-tile" on:click=move |_| on_open.run(())>
            <h3 class="study-tile__title">{title}</h3>
            <p class="study-tile__blurb">{blurb}</p>
            <span class="study-tile__stat">{move || stat.get()}</span>
        </button>
    }
}
