//! Flashcard generator and drill view.

use leptos::prelude::*;

use crate::components::navigation::StudyTabs;
use crate::net::api;
use crate::state::study::{CARD_SWAP_MS, FlashcardsState};
use crate::util::timers::TimerScope;

#[component]
pub fn FlashcardsPage() -> impl IntoView {
    let state = expect_context::<RwSignal<FlashcardsState>>();

    let timers = TimerScope::new();
    let cleanup_timers = timers.clone();
    on_cleanup(move || cleanup_timers.cancel());
    let timers = StoredValue::new(timers);

    let generate = move || {
        let Some(topic) = state
            .try_update(|s| {
                let topic = s.topic.clone();
                s.request.begin(&topic)
            })
            .flatten()
        else {
            return;
        };
        leptos::task::spawn_local(async move {
            let cards = api::generate_flashcards(&topic).await;
            state.try_update(|s| {
                s.deck.load(cards);
                s.request.finish();
            });
        });
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            generate();
        }
    };

    // Turn the card face down first so the next answer never flashes.
    let step = move |forward: bool| {
        state.update(|s| s.deck.flipped = false);
        timers.with_value(|t| {
            t.after(CARD_SWAP_MS, move || {
                state.try_update(|s| if forward { s.deck.next_card() } else { s.deck.prev_card() });
            });
        });
    };

    let generating = move || state.with(|s| s.request.generating);
    let has_deck = move || state.with(|s| !s.deck.is_empty());
    let question = move || state.with(|s| s.deck.current().map(|c| c.question.clone()).unwrap_or_default());
    let answer = move || state.with(|s| s.deck.current().map(|c| c.answer.clone()).unwrap_or_default());
    let tags = move || state.with(|s| s.deck.current().map(|c| c.tags.clone()).unwrap_or_default());
    let position = move || state.with(|s| s.deck.position_label().unwrap_or_default());

    view! {
        <section class="flashcards">
            <StudyTabs/>
            <header class="flashcards__header">
                <h2 class="flashcards__title">"Flashcards"</h2>
                <div class="flashcards__form">
                    <input
                        class="flashcards__input"
                        type="text"
                        placeholder="Topic, e.g. Photosynthesis"
                        prop:value=move || state.with(|s| s.topic.clone())
                        on:input=move |ev| state.update(|s| s.topic = event_target_value(&ev))
                        on:keydown=on_keydown
                    />
                    <button
                        class="btn btn--primary"
                        disabled=move || generating() || state.with(|s| s.topic.trim().is_empty())
                        on:click=move |_| generate()
                    >
                        {move || if generating() { "Generating..." } else { "Generate" }}
                    </button>
                </div>
            </header>

            <Show
                when=has_deck
                fallback=|| view! { <div class="flashcards__empty">"Enter a topic to build a deck."</div> }
            >
                <div class="flashcards__deck">
                    <div
                        class="flashcard"
                        class:flashcard--flipped=move || state.with(|s| s.deck.flipped)
                        on:click=move |_| state.update(|s| s.deck.flip())
                    >
                        <div class="flashcard__face flashcard__face--front">
                            <span class="flashcard__label">"Question"</span>
                            <p class="flashcard__text">{question}</p>
                        </div>
                        <div class="flashcard__face flashcard__face--back">
                            <span class="flashcard__label">"Answer"</span>
                            <p class="flashcard__text">{answer}</p>
                            <div class="flashcard__tags">
                                {move || {
                                    tags()
                                        .into_iter()
                                        .map(|tag| view! { <span class="flashcard__tag">{tag}</span> })
                                        .collect_view()
                                }}
                            </div>
                        </div>
                    </div>
                    <div class="flashcards__controls">
                        <button class="btn btn--ghost" on:click=move |_| step(false)>"← Prev"</button>
                        <span class="flashcards__position">{position}</span>
                        <button class="btn btn--ghost" on:click=move |_| step(true)>"Next →"</button>
                    </div>
                </div>
            </Show>
        </section>
    }
}
