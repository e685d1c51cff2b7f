//! The two chat views: the portfolio concierge and the study tutor.

use leptos::prelude::*;

use crate::components::chat_thread::ChatThread;
use crate::components::navigation::StudyTabs;
use crate::net::types::Persona;

#[component]
pub fn ConciergePage() -> impl IntoView {
    view! {
        <section class="chat-page">
            <header class="chat-page__header">
                <span class="chat-page__eyebrow">"Digital Concierge"</span>
                <h2 class="chat-page__title">"Ask about my work."</h2>
            </header>
            <ChatThread persona=Persona::Concierge placeholder="Ask about projects, skills, or collaboration..."/>
        </section>
    }
}

/// Tutor chat. Replies are search-grounded and carry source chips.
#[component]
pub fn TutorPage() -> impl IntoView {
    view! {
        <section class="chat-page chat-page--study">
            <StudyTabs/>
            <header class="chat-page__header">
                <span class="chat-page__eyebrow">"AI Study Tutor"</span>
                <h2 class="chat-page__title">"What are we studying today?"</h2>
            </header>
            <ChatThread persona=Persona::Tutor placeholder="Ask a question or paste a problem..."/>
        </section>
    }
}
