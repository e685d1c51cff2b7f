//! Enumerated view switching with a fade transition.
//!
//! DESIGN
//! ======
//! `navigate` only records intent and hands out a ticket. The host fades the
//! page out, waits [`TRANSITION_MS`], then calls `commit` with the ticket.
//! Tickets are sequence numbers, so a second navigation during the fade
//! invalidates the first one's commit.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

/// Exit fade duration before the view swaps.
pub const TRANSITION_MS: f64 = 400.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Home,
    Projects,
    About,
    Chat,
    Study,
    Tutor,
    Flashcards,
    MindMap,
}

impl View {
    /// Primary navigation entries, in display order.
    pub const PRIMARY: [Self; 3] = [Self::Home, Self::Projects, Self::About];
    /// Study tool entries, in display order.
    pub const STUDY: [Self; 4] = [Self::Study, Self::Tutor, Self::Flashcards, Self::MindMap];

    #[must_use]
    pub fn nav_label(self) -> &'static str {
        match self {
            Self::Home => "01. HOME",
            Self::Projects => "02. WORKS",
            Self::About => "03. BIO",
            Self::Chat => "Assistant",
            Self::Study => "Dashboard",
            Self::Tutor => "AI Tutor",
            Self::Flashcards => "Flashcards",
            Self::MindMap => "Mind Maps",
        }
    }

    #[must_use]
    pub fn is_study(self) -> bool {
        Self::STUDY.contains(&self)
    }

    /// The floating assistant launcher is hidden on the chat view itself.
    #[must_use]
    pub fn shows_launcher(self) -> bool {
        self != Self::Chat
    }
}

/// Proof that a navigation was requested; redeemed by [`ViewRouter::commit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavTicket {
    seq: u64,
    target: View,
}

impl NavTicket {
    #[must_use]
    pub fn target(self) -> View {
        self.target
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewRouter {
    current: View,
    pending: Option<View>,
    seq: u64,
}

impl ViewRouter {
    #[must_use]
    pub fn new(initial: View) -> Self {
        Self { current: initial, ..Self::default() }
    }

    #[must_use]
    pub fn current(&self) -> View {
        self.current
    }

    /// `true` while a fade-out is underway.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Request a switch to `target`. Returns `None` if it is already the
    /// current view and nothing is pending.
    pub fn navigate(&mut self, target: View) -> Option<NavTicket> {
        if target == self.current && self.pending.is_none() {
            return None;
        }
        if self.pending == Some(target) {
            return None;
        }
        self.seq += 1;
        self.pending = Some(target);
        Some(NavTicket { seq: self.seq, target })
    }

    /// Swap to the ticket's target if it is still the latest request.
    /// The host scrolls to the top and fades in when this returns `true`.
    pub fn commit(&mut self, ticket: NavTicket) -> bool {
        if ticket.seq != self.seq || self.pending != Some(ticket.target) {
            return false;
        }
        self.current = ticket.target;
        self.pending = None;
        true
    }
}
