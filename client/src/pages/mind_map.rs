//! Mind-map generator rendered as a radial SVG tree.

use leptos::prelude::*;

use crate::components::navigation::StudyTabs;
use crate::net::api;
use crate::state::study::MindMapState;
use crate::util::radial_layout::{RadialLayout, radial_layout};

/// Radius of the outermost ring, in SVG user units.
const OUTER_RADIUS: f64 = 220.0;
const VIEW_BOX: &str = "-360 -300 720 600";

#[component]
pub fn MindMapPage() -> impl IntoView {
    let state = expect_context::<RwSignal<MindMapState>>();

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
            let map = api::generate_mind_map(&topic).await;
            state.try_update(|s| {
                s.map = Some(map);
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

    let generating = move || state.with(|s| s.request.generating);
    let layout = Memo::new(move |_| state.with(|s| s.map.as_ref().map(|root| radial_layout(root, OUTER_RADIUS))));

    view! {
        <section class="mind-map">
            <StudyTabs/>
            <header class="mind-map__header">
                <h2 class="mind-map__title">"Mind Maps"</h2>
                <div class="mind-map__form">
                    <input
                        class="mind-map__input"
                        type="text"
                        placeholder="Topic, e.g. Roman History"
                        prop:value=move || state.with(|s| s.topic.clone())
                        on:input=move |ev| state.update(|s| s.topic = event_target_value(&ev))
                        on:keydown=on_keydown
                    />
                    <button
                        class="btn btn--primary"
                        disabled=move || generating() || state.with(|s| s.topic.trim().is_empty())
                        on:click=move |_| generate()
                    >
                        {move || if generating() { "Mapping..." } else { "Generate" }}
                    </button>
                    <button class="btn btn--ghost" on:click=move |_| state.update(MindMapState::reset)>
                        "Clear"
                    </button>
                </div>
            </header>

            {move || match layout.get() {
                Some(layout) => render_layout(&layout).into_any(),
                None => view! { <div class="mind-map__empty">"Enter a topic to map it out."</div> }.into_any(),
            }}
        </section>
    }
}

fn render_layout(layout: &RadialLayout) -> impl IntoView + use<> {
    let links = layout
        .links()
        .map(|(parent, child)| {
            let (a, b) = (&layout.nodes[parent], &layout.nodes[child]);
            let d = format!("M{:.3},{:.3}L{:.3},{:.3}", a.x, a.y, b.x, b.y);
            view! { <path class="mind-map__link" d=d></path> }
        })
        .collect_view();

    let nodes = layout
        .nodes
        .iter()
        .map(|node| {
            let flipped = node.label_flipped();
            // Inner-node labels sit on the inward side of the dot.
            let inward = node.has_children;
            let (anchor, x, rotate) = match (node.depth, flipped) {
                (0, _) => ("middle", "0", ""),
                (_, false) if inward => ("end", "-8", ""),
                (_, false) => ("start", "8", ""),
                (_, true) if inward => ("start", "8", "rotate(180)"),
                (_, true) => ("end", "-8", "rotate(180)"),
            };
            let radius = if node.depth == 0 { "6" } else { "4" };
            view! {
                <g class="mind-map__node" class:mind-map__node--root=node.depth == 0 transform=node.svg_transform()>
                    <circle class="mind-map__dot" r=radius></circle>
                    <text class="mind-map__label" dy="0.31em" x=x text-anchor=anchor transform=rotate>
                        {node.label.clone()}
                    </text>
                </g>
            }
        })
        .collect_view();

    view! {
        <svg class="mind-map__canvas" viewBox=VIEW_BOX>
            <g class="mind-map__links">{links}</g>
            <g class="mind-map__nodes">{nodes}</g>
        </svg>
    }
}
