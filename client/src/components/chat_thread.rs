//! Conversation thread with a prompt input, shared by both chat personas.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the persona's session from [`ChatSessions`]. A send goes through
//! `ChatState::begin_send`, the returned turn is posted to the server, and
//! the reply is folded back with `ChatState::complete`. A reset between the
//! two makes the reply stale and it is dropped.

use leptos::prelude::*;

use crate::app::ChatSessions;
use crate::net::api;
use crate::net::types::Persona;
use crate::state::chat::{ChatRole, speaker_label};
use crate::util::markdown::{render_markdown_html, truncate_title};
use crate::util::timers::epoch_ms;

/// Max characters of a citation title shown on its chip.
const SOURCE_TITLE_CHARS: usize = 30;

#[component]
pub fn ChatThread(persona: Persona, #[prop(into)] placeholder: String) -> impl IntoView {
    let chat = expect_context::<ChatSessions>().for_persona(persona);

    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let state = chat.get();
        let _ = state.messages.len();
        let _ = state.is_loading;

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    let do_send = move || {
        let text = input.get_untracked();
        let Some(pending) = chat.try_update(|c| c.begin_send(&text, epoch_ms())).flatten() else {
            return;
        };
        input.set(String::new());
        leptos::task::spawn_local(async move {
            let reply = api::send_chat_turn(&pending.request).await;
            chat.try_update(|c| c.complete(pending.turn, reply, epoch_ms()));
        });
    };

    let on_click = move |_| do_send();

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let on_reset = move |_| chat.update(|c| c.reset(epoch_ms()));

    let can_send = move || !input.get().trim().is_empty() && !chat.get().is_loading;

    view! {
        <div class="chat-thread">
            <div class="chat-thread__toolbar">
                <button class="btn btn--ghost chat-thread__reset" on:click=on_reset>
                    "New conversation"
                </button>
            </div>

            <div class="chat-thread__messages" node_ref=messages_ref>
                {move || {
                    chat.get()
                        .messages
                        .into_iter()
                        .map(|msg| {
                            let is_assistant = msg.role == ChatRole::Assistant;
                            let label = speaker_label(persona, msg.role);
                            view! {
                                <div
                                    class="chat-thread__message"
                                    class:chat-thread__message--assistant=is_assistant
                                    class:chat-thread__message--user=!is_assistant
                                >
                                    <div class="chat-thread__speaker">{label}</div>
                                    {if is_assistant {
                                        let rendered = render_markdown_html(&msg.content);
                                        view! { <div class="chat-thread__markdown" inner_html=rendered></div> }
                                            .into_any()
                                    } else {
                                        view! { <div class="chat-thread__text">{msg.content}</div> }.into_any()
                                    }}
                                    {msg
                                        .sources
                                        .map(|sources| {
                                            view! {
                                                <div class="chat-thread__sources">
                                                    {sources
                                                        .into_iter()
                                                        .map(|source| {
                                                            view! {
                                                                <a
                                                                    class="chat-thread__source"
                                                                    href=source.uri
                                                                    target="_blank"
                                                                    rel="noopener noreferrer"
                                                                    title=source.title.clone()
                                                                >
                                                                    {truncate_title(&source.title, SOURCE_TITLE_CHARS)}
                                                                </a>
                                                            }
                                                        })
                                                        .collect_view()}
                                                </div>
                                            }
                                        })}
                                </div>
                            }
                        })
                        .collect_view()
                }}

                {move || {
                    chat.get()
                        .is_loading
                        .then(|| {
                            view! {
                                <div class="chat-thread__loading">
                                    <span class="chat-thread__dot"></span>
                                    <span class="chat-thread__dot"></span>
                                    <span class="chat-thread__dot"></span>
                                </div>
                            }
                        })
                }}
            </div>

            <div class="chat-thread__input-row">
                <input
                    class="chat-thread__input"
                    type="text"
                    placeholder=placeholder
                    disabled=move || chat.get().is_loading
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button class="btn btn--primary chat-thread__send" on:click=on_click disabled=move || !can_send()>
                    "Send"
                </button>
            </div>
        </div>
    }
}
