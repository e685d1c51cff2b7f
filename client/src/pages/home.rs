//! Landing hero with the two-row typed headline.
//!
//! SYSTEM CONTEXT
//! ==============
//! The headline is a [`Sequencer`] of two segments: the lead typed forward,
//! then the trail typed in reverse. A [`TimerScope`] drives it and owns every
//! other timer on the page, so leaving the view stops all of them at once.
//! Pointer and scroll listeners feed the parallax layers.

use leptos::prelude::*;

use crate::app::ViewNavigator;
use crate::config::PORTFOLIO;
use crate::state::view::View;
use crate::util::motion::{
    PointerOffset, counter_layer_transform, counter_shadow, headline_shadow, latency_label, lead_layer_transform,
    random_unit,
};
use crate::util::timers::TimerScope;
use crate::util::typewriter::{Direction, SequenceTiming, Sequencer};

/// Delay before the corner metadata fades in.
const META_DELAY_MS: f64 = 150.0;
/// How often the fake latency readout refreshes.
const LATENCY_REFRESH_MS: f64 = 2000.0;

#[component]
pub fn HomePage() -> impl IntoView {
    let nav = expect_context::<ViewNavigator>();

    let sequencer = RwSignal::new(Sequencer::new(
        [(PORTFOLIO.hero.lead, Direction::Forward), (PORTFOLIO.hero.trail, Direction::Reverse)],
        SequenceTiming::HERO,
    ));
    let show_meta = RwSignal::new(false);
    let latency = RwSignal::new(latency_label(0.5));
    let pointer = RwSignal::new(PointerOffset::default());
    let scroll_y = RwSignal::new(0.0_f64);

    let timers = TimerScope::new();
    timers.drive(move || sequencer.try_update(Sequencer::step).flatten());
    timers.after(META_DELAY_MS, move || show_meta.set(true));
    timers.every(LATENCY_REFRESH_MS, move || latency.set(latency_label(random_unit())));

    #[cfg(feature = "hydrate")]
    {
        let move_handle = window_event_listener(leptos::ev::mousemove, move |ev| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            pointer.set(PointerOffset::from_client(f64::from(ev.client_x()), f64::from(ev.client_y()), width, height));
        });
        let scroll_handle = window_event_listener(leptos::ev::scroll, move |_| {
            if let Some(y) = web_sys::window().and_then(|w| w.scroll_y().ok()) {
                scroll_y.set(y);
            }
        });
        on_cleanup(move || {
            move_handle.remove();
            scroll_handle.remove();
        });
    }

    let cleanup_timers = timers.clone();
    on_cleanup(move || {
        cleanup_timers.cancel();
        sequencer.try_update(Sequencer::cancel);
    });

    let lead_text = move || sequencer.with(|s| s.segment(0).map(|t| t.visible_text.clone()).unwrap_or_default());
    let trail_text = move || sequencer.with(|s| s.segment(1).map(|t| t.visible_text.clone()).unwrap_or_default());
    let lead_typing = move || sequencer.with(|s| s.segment(0).is_some_and(|t| t.is_active));
    let trail_typing = move || sequencer.with(|s| s.segment(1).is_some_and(|t| t.is_active));
    let typed = move || sequencer.with(Sequencer::is_done);

    view! {
        <section class="hero">
            <div class="hero__meta hero__meta--left" class:hero__meta--visible=move || show_meta.get()>
                <span>{PORTFOLIO.role}</span>
            </div>
            <div class="hero__meta hero__meta--right" class:hero__meta--visible=move || show_meta.get()>
                <span>"LATENCY: "{move || latency.get()}"ms"</span>
            </div>

            <h1 class="hero__headline">
                <span
                    class="hero__row hero__row--lead"
                    style:transform=move || lead_layer_transform(scroll_y.get(), pointer.get())
                    style:text-shadow=move || headline_shadow(pointer.get())
                >
                    {lead_text}
                    <span class="caret" class:caret--on=lead_typing></span>
                </span>
                <span
                    class="hero__row hero__row--trail"
                    style:transform=move || counter_layer_transform(scroll_y.get(), pointer.get())
                    style:text-shadow=move || counter_shadow(pointer.get())
                >
                    {trail_text}
                    <span class="caret" class:caret--on=trail_typing></span>
                </span>
            </h1>

            <p class="hero__tagline" class:hero__tagline--visible=typed>
                {PORTFOLIO.hero.tagline}
            </p>

            <div class="hero__actions" class:hero__actions--visible=typed>
                <button class="btn btn--primary" on:click=move |_| nav.go(View::Projects)>
                    "View work"
                </button>
                <button class="btn btn--ghost" on:click=move |_| nav.go(View::Chat)>
                    "Talk to my concierge"
                </button>
            </div>
        </section>
    }
}
