//! Project grid revealed by a scan line after the title types itself.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three timed stages share one [`TimerScope`]:
//! 1. the title [`Sequencer`] types forward,
//! 2. the caret lingers for [`CARET_LINGER_MS`],
//! 3. a [`ScanSweep`] runs frame by frame until card metadata is visible.

use leptos::prelude::*;

use crate::config::{PORTFOLIO, PROJECTS_SUBTITLE, PROJECTS_TITLE, Project};
use crate::util::motion::{CardTilt, HOVER_SCALE, card_transform};
use crate::util::reveal::{ScanPhase, ScanSweep};
use crate::util::timers::{TimerScope, now_ms};
use crate::util::typewriter::{CARET_LINGER_MS, Direction, SequenceTiming, Sequencer};

/// Sweep redraw interval, roughly one display frame.
const FRAME_MS: f64 = 16.0;

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let title = RwSignal::new(Sequencer::new([(PROJECTS_TITLE, Direction::Forward)], SequenceTiming::PROJECTS_TITLE));
    let caret = RwSignal::new(true);
    let sweep = RwSignal::new(ScanSweep::new(PORTFOLIO.projects.iter().map(|p| p.id)));
    let show_metadata = RwSignal::new(false);

    let timers = TimerScope::new();
    let sweep_timers = timers.clone();
    timers.drive(move || {
        let next = title.try_update(Sequencer::step).flatten();
        if next.is_none() && title.try_with_untracked(Sequencer::is_done).unwrap_or(false) {
            start_sweep(&sweep_timers, caret, sweep, show_metadata);
        }
        next
    });

    let cleanup_timers = timers.clone();
    on_cleanup(move || {
        cleanup_timers.cancel();
        title.try_update(Sequencer::cancel);
    });

    let title_text = move || title.with(|s| s.segment(0).map(|t| t.visible_text.clone()).unwrap_or_default());
    let scanning = move || sweep.with(|s| s.phase() == ScanPhase::Scanning);
    let scan_top = move || format!("{:.2}%", sweep.with(ScanSweep::progress) * 100.0);

    view! {
        <section class="projects">
            <header class="projects__header">
                <h2 class="projects__title">
                    {title_text}
                    <span class="caret" class:caret--on=move || caret.get()></span>
                </h2>
                <p class="projects__subtitle">{PROJECTS_SUBTITLE}</p>
            </header>

            <div class="projects__grid">
                <div class="projects__scan" class:projects__scan--active=scanning style:top=scan_top></div>
                {PORTFOLIO
                    .projects
                    .iter()
                    .map(|project| view! { <ProjectCard project=*project sweep=sweep show_metadata=show_metadata/> })
                    .collect_view()}
            </div>
        </section>
    }
}

/// Hold the caret, then run the sweep until metadata is showing.
fn start_sweep(timers: &TimerScope, caret: RwSignal<bool>, sweep: RwSignal<ScanSweep>, show_metadata: RwSignal<bool>) {
    let frame_timers = timers.clone();
    timers.after(CARET_LINGER_MS, move || {
        caret.set(false);
        sweep.update(|s| s.start(now_ms()));
        frame_timers.drive(move || {
            let now = now_ms();
            let settled = sweep.try_update(|s| {
                s.tick(now);
                s.metadata_visible(now)
            })?;
            if settled {
                show_metadata.set(true);
                None
            } else {
                Some(FRAME_MS)
            }
        });
    });
}

#[component]
fn ProjectCard(project: Project, sweep: RwSignal<ScanSweep>, show_metadata: RwSignal<bool>) -> impl IntoView {
    let tilt = RwSignal::new(None::<CardTilt>);
    let id = project.id;
    let visible = move || sweep.with(|s| s.is_card_visible(id));

    let on_move = move |ev: leptos::ev::MouseEvent| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(el) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
                return;
            };
            let rect = el.get_bounding_client_rect();
            tilt.set(Some(CardTilt::from_local(
                f64::from(ev.client_x()) - rect.left(),
                f64::from(ev.client_y()) - rect.top(),
                rect.width(),
                rect.height(),
            )));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    view! {
        <article
            class="project-card"
            class:project-card--visible=visible
            class:project-card--hovered=move || tilt.get().is_some()
            style:transform=move || card_transform(tilt.get())
            on:mousemove=on_move
            on:mouseleave=move |_| tilt.set(None)
        >
            <div class="project-card__media">
                <img
                    class="project-card__image"
                    src=project.image
                    alt=project.title
                    style:transform=move || {
                        if tilt.get().is_some() { format!("scale({HOVER_SCALE})") } else { "scale(1)".to_owned() }
                    }
                />
            </div>
            <div class="project-card__body">
                <h3 class="project-card__title">{project.title}</h3>
                <p class="project-card__description">{project.description}</p>
                <div class="project-card__meta" class:project-card__meta--visible=move || show_metadata.get()>
                    <div class="project-card__tags">
                        {project
                            .tags
                            .iter()
                            .map(|tag| view! { <span class="project-card__tag">{*tag}</span> })
                            .collect_view()}
                    </div>
                    {if project.has_link() {
                        view! {
                            <a class="project-card__link" href=project.link target="_blank" rel="noopener noreferrer">
                                "View project →"
                            </a>
                        }
                            .into_any()
                    } else {
                        view! { <span class="project-card__link project-card__link--pending">"Case study soon"</span> }
                            .into_any()
                    }}
                </div>
            </div>
        </article>
    }
}
