//! Bio page with scroll-driven reveals and the timeline marker.
//!
//! SYSTEM CONTEXT
//! ==============
//! A page-local [`ScrollTracker`] receives every window `scroll` event and
//! fans each update out to one subscriber, which:
//! - folds progress into the [`HighWaterMark`] shown by the reading bar,
//! - places the timeline marker and stretches it by scroll velocity,
//! - advances the [`RevealCoordinator`] for the bio blocks.

use leptos::prelude::*;

use crate::config::PORTFOLIO;
use crate::util::reveal::{HighWaterMark, RevealCoordinator, RevealState};
use crate::util::rich_text::{highlight_keywords, is_divider, stagger_words};
#[cfg(feature = "hydrate")]
use crate::util::{
    reveal::{RegionGeometry, marker_position, stretch_factor},
    scroll::{ScrollTracker, read_window_sample},
    timers::now_ms,
};
use crate::util::timers::TimerScope;

/// Fade-in duration of a revealed block.
const REVEAL_MS: f64 = 700.0;
/// Scroll fraction across which the bio paragraphs are spread.
const PARAGRAPH_SPAN: f64 = 0.5;
/// Quiet time after the last scroll before the marker relaxes.
#[cfg(feature = "hydrate")]
const STRETCH_RELAX_MS: f64 = 120.0;

fn paragraph_id(idx: usize) -> String {
    format!("bio-{idx}")
}

fn timeline_id(idx: usize) -> String {
    format!("timeline-{idx}")
}

const SKILLS_ID: &str = "skills";

/// Register every block on the page with its reveal threshold.
fn page_reveals() -> RevealCoordinator {
    let mut reveals = RevealCoordinator::new();
    let paragraphs = PORTFOLIO.bio.paragraphs.len().max(1);
    for idx in 0..PORTFOLIO.bio.paragraphs.len() {
        #[allow(clippy::cast_precision_loss)]
        let threshold = PARAGRAPH_SPAN * idx as f64 / paragraphs as f64;
        reveals.register(paragraph_id(idx), threshold, REVEAL_MS);
    }
    for idx in 0..PORTFOLIO.timeline.len() {
        #[allow(clippy::cast_precision_loss)]
        let threshold = 0.4 + 0.15 * idx as f64;
        reveals.register(timeline_id(idx), threshold, REVEAL_MS);
    }
    reveals.register(SKILLS_ID, 0.8, REVEAL_MS);
    reveals
}

fn reveal_class(state: RevealState) -> &'static str {
    match state {
        RevealState::Hidden => "reveal reveal--hidden",
        RevealState::Animating => "reveal reveal--animating",
        RevealState::Revealed => "reveal reveal--revealed",
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    let progress = RwSignal::new(HighWaterMark::new());
    let marker = RwSignal::new(0.0_f64);
    let stretch = RwSignal::new(1.0_f64);
    let reveals = RwSignal::new(page_reveals());
    let timeline_ref = NodeRef::<leptos::html::Div>::new();

    let timers = TimerScope::new();

    #[cfg(feature = "hydrate")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;

        let tracker = Rc::new(RefCell::new(ScrollTracker::new()));
        let scroll_tick = StoredValue::new(0_u64);
        let sub_timers = timers.clone();
        tracker.borrow_mut().subscribe(move |update| {
            let displayed = progress.try_update(|hw| hw.observe(update.progress_percent)).unwrap_or(0.0);

            let geometry = timeline_ref
                .get_untracked()
                .map(|el| {
                    let rect = el.get_bounding_client_rect();
                    RegionGeometry {
                        region_top: rect.top(),
                        region_height: rect.height(),
                        viewport_height: update.sample.viewport_height,
                    }
                })
                .unwrap_or_default();
            marker.set(marker_position(geometry, update.progress_percent));

            stretch.set(stretch_factor(update.velocity_px));
            scroll_tick.update_value(|n| *n += 1);
            let tick = scroll_tick.get_value();
            sub_timers.after(STRETCH_RELAX_MS, move || {
                if scroll_tick.try_get_value() == Some(tick) {
                    stretch.set(1.0);
                }
            });

            let fraction = displayed / 100.0;
            let changed = reveals.try_update(|r| r.advance(fraction, now_ms())).unwrap_or(false);
            if changed {
                // Settle whatever just started animating.
                sub_timers.after(REVEAL_MS, move || {
                    reveals.try_update(|r| r.advance(fraction, now_ms()));
                });
            }
        });

        let initial_tracker = Rc::clone(&tracker);
        timers.after(0.0, move || {
            if let Some(sample) = read_window_sample() {
                initial_tracker.borrow_mut().on_scroll(sample);
            }
        });

        let handle = window_event_listener(leptos::ev::scroll, move |_| {
            if let Some(sample) = read_window_sample() {
                tracker.borrow_mut().on_scroll(sample);
            }
        });
        on_cleanup(move || handle.remove());
    }

    let cleanup_timers = timers.clone();
    on_cleanup(move || cleanup_timers.cancel());

    let state_of = move |id: String| move || reveals.with(|r| reveal_class(r.state(&id)));
    let skills_class = state_of(SKILLS_ID.to_owned());
    let bio = PORTFOLIO.bio;

    view! {
        <section class="about">
            <div class="about__monogram" aria-hidden="true">{bio.monogram}</div>
            <div class="about__progress">
                <div
                    class="about__progress-fill"
                    style:width=move || format!("{:.1}%", progress.with(HighWaterMark::displayed))
                ></div>
            </div>

            <header class="about__header">
                <h2 class="about__heading">
                    {stagger_words(bio.heading, bio.keywords)
                        .into_iter()
                        .map(|w| {
                            view! {
                                <span
                                    class="about__word"
                                    class:about__word--emphasized=w.emphasized
                                    style:animation-delay=format!("{:.1}s", w.delay_s)
                                >
                                    {w.word}
                                </span>
                            }
                        })
                        .collect_view()}
                </h2>
                <img class="about__portrait" src=PORTFOLIO.profile_image alt=PORTFOLIO.name/>
            </header>

            <div class="about__bio">
                {bio
                    .paragraphs
                    .iter()
                    .enumerate()
                    .map(|(idx, paragraph)| {
                        let class = state_of(paragraph_id(idx));
                        if is_divider(paragraph) {
                            view! { <hr class=move || format!("{} about__divider", class())/> }.into_any()
                        } else {
                            view! {
                                <p class=move || format!("{} about__paragraph", class())>
                                    {highlight_keywords(paragraph, bio.keywords)
                                        .into_iter()
                                        .map(|seg| {
                                            if seg.highlighted {
                                                view! { <mark class="about__keyword">{seg.text}</mark> }.into_any()
                                            } else {
                                                view! { <span>{seg.text}</span> }.into_any()
                                            }
                                        })
                                        .collect_view()}
                                </p>
                            }
                                .into_any()
                        }
                    })
                    .collect_view()}
            </div>

            <div class="timeline" node_ref=timeline_ref>
                <div class="timeline__rail"></div>
                <div
                    class="timeline__marker"
                    style:top=move || format!("{:.2}%", marker.get() * 100.0)
                    style:transform=move || format!("translate(-50%, -50%) scaleY({:.3})", stretch.get())
                ></div>
                {PORTFOLIO
                    .timeline
                    .iter()
                    .enumerate()
                    .map(|(idx, entry)| {
                        let class = state_of(timeline_id(idx));
                        view! {
                            <div class=move || format!("{} timeline__entry", class())>
                                <div class="timeline__year">{entry.year}</div>
                                <div class="timeline__title">{entry.title}</div>
                                <p class="timeline__desc">{entry.desc}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <div class=move || format!("{} skills", skills_class())>
                <h3 class="skills__title">"Toolkit"</h3>
                <ul class="skills__list">
                    {PORTFOLIO
                        .skills
                        .iter()
                        .map(|skill| view! { <li class="skills__item">{*skill}</li> })
                        .collect_view()}
                </ul>
            </div>
        </section>
    }
}
