//! Character-by-character text reveal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Headlines on the Hero and Projects pages type themselves in. A
//! [`Typewriter`] is the lazy per-character sequence for one string; a
//! [`Sequencer`] chains several of them with pauses in between and exposes
//! an explicit state machine the host drives from timers.
//!
//! DESIGN
//! ======
//! The sequencer never sleeps. Each [`Sequencer::step`] applies exactly one
//! transition and returns the delay before the next one, so hosts own the
//! clock and tests can step it synchronously. Cancelling is terminal: after
//! [`Sequencer::cancel`] no call mutates any segment.

#[cfg(test)]
#[path = "typewriter_test.rs"]
mod typewriter_test;

/// Which end of the text grows first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Prefixes, left to right, starting from the empty string.
    #[default]
    Forward,
    /// Suffixes, right to left, starting from the last character.
    Reverse,
}

// =============================================================================
// TYPEWRITER
// =============================================================================

/// Finite, non-restartable sequence of intermediate strings for one text.
///
/// Steps are Unicode scalar values, so multi-byte characters never split.
#[derive(Clone, Debug)]
pub struct Typewriter {
    chars: Vec<char>,
    direction: Direction,
    emitted: usize,
}

impl Typewriter {
    #[must_use]
    pub fn new(text: &str, direction: Direction) -> Self {
        Self { chars: text.chars().collect(), direction, emitted: 0 }
    }

    fn total(&self) -> usize {
        match self.direction {
            Direction::Forward => self.chars.len() + 1,
            Direction::Reverse => self.chars.len(),
        }
    }
}

impl Iterator for Typewriter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.emitted >= self.total() {
            return None;
        }
        let len = self.chars.len();
        let item = match self.direction {
            Direction::Forward => self.chars[..self.emitted].iter().collect(),
            Direction::Reverse => self.chars[len - 1 - self.emitted..].iter().collect(),
        };
        self.emitted += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.emitted);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Typewriter {}
impl std::iter::FusedIterator for Typewriter {}

// =============================================================================
// TYPED TEXT
// =============================================================================

/// Render snapshot for one typed segment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypedText {
    pub full_text: String,
    pub visible_text: String,
    pub direction: Direction,
    pub is_active: bool,
    pub is_done: bool,
}

impl TypedText {
    #[must_use]
    pub fn new(full_text: impl Into<String>, direction: Direction) -> Self {
        Self { full_text: full_text.into(), direction, ..Self::default() }
    }
}

// =============================================================================
// SEQUENCER
// =============================================================================

/// Delays, in milliseconds, used by a [`Sequencer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequenceTiming {
    /// Delay between leaving `Idle` and the first character.
    pub start_delay_ms: f64,
    pub char_interval_ms: f64,
    /// Pause between one segment finishing and the next starting.
    pub pause_ms: f64,
}

impl SequenceTiming {
    /// Hero headline: "Exploring" forward, then "Intelligence." in reverse.
    pub const HERO: Self = Self { start_delay_ms: 800.0, char_interval_ms: 140.0, pause_ms: 500.0 };
    /// Projects page title, typed as soon as the page mounts.
    pub const PROJECTS_TITLE: Self = Self { start_delay_ms: 0.0, char_interval_ms: 80.0, pause_ms: 500.0 };
}

impl Default for SequenceTiming {
    fn default() -> Self {
        Self::HERO
    }
}

/// How long the caret lingers after the Projects title finishes typing.
pub const CARET_LINGER_MS: f64 = 500.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SequencePhase {
    #[default]
    Idle,
    Forward,
    Pausing,
    Reverse,
    Done,
}

/// Timer-driven state machine over a chain of typed segments.
#[derive(Clone, Debug, Default)]
pub struct Sequencer {
    segments: Vec<TypedText>,
    timing: SequenceTiming,
    phase: SequencePhase,
    current: usize,
    writer: Option<Typewriter>,
    cancelled: bool,
}

impl Sequencer {
    #[must_use]
    pub fn new<I, S>(segments: I, timing: SequenceTiming) -> Self
    where
        I: IntoIterator<Item = (S, Direction)>,
        S: Into<String>,
    {
        let segments = segments
            .into_iter()
            .map(|(text, direction)| TypedText::new(text, direction))
            .collect();
        Self { segments, timing, ..Self::default() }
    }

    /// Apply one transition. Returns the delay until the next call, or `None`
    /// once the sequence is finished or cancelled.
    pub fn step(&mut self) -> Option<f64> {
        if self.cancelled {
            return None;
        }
        match self.phase {
            SequencePhase::Done => None,
            SequencePhase::Idle => {
                if self.segments.is_empty() {
                    self.phase = SequencePhase::Done;
                    return None;
                }
                self.begin_segment(0);
                Some(self.timing.start_delay_ms)
            }
            SequencePhase::Pausing => {
                self.begin_segment(self.current + 1);
                self.type_next()
            }
            SequencePhase::Forward | SequencePhase::Reverse => self.type_next(),
        }
    }

    /// Stop permanently. Pending timer callbacks that still call
    /// [`Self::step`] become no-ops.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.writer = None;
    }

    fn begin_segment(&mut self, idx: usize) {
        self.current = idx;
        let Some(segment) = self.segments.get_mut(idx) else {
            self.phase = SequencePhase::Done;
            return;
        };
        segment.is_active = true;
        segment.visible_text.clear();
        self.writer = Some(Typewriter::new(&segment.full_text, segment.direction));
        self.phase = match segment.direction {
            Direction::Forward => SequencePhase::Forward,
            Direction::Reverse => SequencePhase::Reverse,
        };
    }

    fn type_next(&mut self) -> Option<f64> {
        let next = self.writer.as_mut().and_then(Iterator::next);
        let segment = self.segments.get_mut(self.current)?;
        if let Some(text) = next {
            segment.visible_text = text;
            return Some(self.timing.char_interval_ms);
        }

        segment.visible_text.clone_from(&segment.full_text);
        segment.is_active = false;
        segment.is_done = true;
        self.writer = None;
        if self.current + 1 < self.segments.len() {
            self.phase = SequencePhase::Pausing;
            Some(self.timing.pause_ms)
        } else {
            self.phase = SequencePhase::Done;
            None
        }
    }

    #[must_use]
    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    #[must_use]
    pub fn segments(&self) -> &[TypedText] {
        &self.segments
    }

    #[must_use]
    pub fn segment(&self, idx: usize) -> Option<&TypedText> {
        self.segments.get(idx)
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase == SequencePhase::Done
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
