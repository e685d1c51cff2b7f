//! Progress-driven reveal coordination.
//!
//! DESIGN
//! ======
//! Everything here is a pure function of absolute inputs (progress, geometry,
//! timestamps) so pages can call it from scroll listeners and animation frames
//! without ordering concerns. Reveal state only ever moves forward:
//! `Hidden -> Animating -> Revealed`. Likewise [`HighWaterMark`] only grows,
//! so a reader scrolling back up never sees completion regress.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use std::collections::HashMap;

/// Global progress beyond which the timeline marker is pinned to its end.
pub const MARKER_SNAP_PERCENT: f64 = 99.0;
/// Stretch gained per pixel of scroll velocity.
pub const STRETCH_PER_PX: f64 = 0.15;
/// Upper bound for the marker stretch multiplier.
pub const MAX_STRETCH: f64 = 3.0;

pub const SCAN_DURATION_MS: f64 = 1500.0;
pub const SCAN_CARD_STAGGER: f64 = 0.2;
pub const SCAN_CARD_OFFSET: f64 = 0.1;
pub const SCAN_METADATA_DELAY_MS: f64 = 300.0;

// =============================================================================
// HIGH-WATER MARK
// =============================================================================

/// Monotonic progress indicator in `[0, 100]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HighWaterMark {
    displayed: f64,
}

impl HighWaterMark {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in the current progress and return the displayed value.
    pub fn observe(&mut self, current_percent: f64) -> f64 {
        if current_percent.is_finite() {
            self.displayed = self.displayed.max(current_percent.min(100.0));
        }
        self.displayed
    }

    #[must_use]
    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.displayed >= 100.0
    }
}

// =============================================================================
// TIMELINE MARKER
// =============================================================================

/// Geometry of the tracked timeline region at the moment of sampling.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RegionGeometry {
    /// `getBoundingClientRect().top` of the region, relative to the viewport.
    pub region_top: f64,
    /// Rendered height of the region.
    pub region_height: f64,
    pub viewport_height: f64,
}

/// Position of the marker along the region, in `[0, 1]`.
///
/// The marker tracks the viewport center as it sweeps from the region's top
/// edge to its bottom edge.
#[must_use]
pub fn marker_position(geometry: RegionGeometry, global_progress_percent: f64) -> f64 {
    if global_progress_percent > MARKER_SNAP_PERCENT {
        return 1.0;
    }
    let height = geometry.region_height;
    if !height.is_finite() || height <= 0.0 {
        return 0.0;
    }
    let relative = (geometry.viewport_height / 2.0 - geometry.region_top).clamp(0.0, height);
    let position = relative / height;
    if position.is_finite() { position.clamp(0.0, 1.0) } else { 0.0 }
}

/// Vertical stretch multiplier for the marker, from `1.0` at rest up to
/// [`MAX_STRETCH`].
#[must_use]
pub fn stretch_factor(velocity_px: f64) -> f64 {
    if !velocity_px.is_finite() {
        return 1.0;
    }
    (1.0 + velocity_px.abs() * STRETCH_PER_PX).min(MAX_STRETCH)
}

// =============================================================================
// PER-ELEMENT REVEAL
// =============================================================================

/// Visibility lifecycle stage of a tracked element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum RevealState {
    #[default]
    Hidden,
    Animating,
    Revealed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TrackedElement {
    threshold: f64,
    duration_ms: f64,
    state: RevealState,
    started_at_ms: Option<f64>,
}

/// Maps progress signals to per-element [`RevealState`]s.
#[derive(Clone, Debug, Default)]
pub struct RevealCoordinator {
    elements: HashMap<String, TrackedElement>,
}

impl RevealCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Track an element that starts animating once progress reaches
    /// `threshold` (a fraction in `[0, 1]`) and settles after `duration_ms`.
    ///
    /// Re-registering an existing id keeps its current state.
    pub fn register(&mut self, id: impl Into<String>, threshold: f64, duration_ms: f64) {
        let threshold = if threshold.is_finite() { threshold.clamp(0.0, 1.0) } else { 0.0 };
        let duration_ms = if duration_ms.is_finite() { duration_ms.max(0.0) } else { 0.0 };
        self.elements
            .entry(id.into())
            .and_modify(|el| {
                el.threshold = threshold;
                el.duration_ms = duration_ms;
            })
            .or_insert(TrackedElement { threshold, duration_ms, state: RevealState::Hidden, started_at_ms: None });
    }

    /// Advance every element for the given progress fraction and timestamp.
    /// Returns `true` if any state changed.
    pub fn advance(&mut self, progress_fraction: f64, now_ms: f64) -> bool {
        let mut changed = false;
        for el in self.elements.values_mut() {
            if el.state == RevealState::Hidden && progress_fraction >= el.threshold {
                el.state = RevealState::Animating;
                el.started_at_ms = Some(now_ms);
                changed = true;
            }
            if el.state == RevealState::Animating {
                let started = el.started_at_ms.unwrap_or(now_ms);
                if now_ms - started >= el.duration_ms {
                    el.state = RevealState::Revealed;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Jump an element straight to `Revealed`.
    pub fn force_reveal(&mut self, id: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.state = RevealState::Revealed;
        }
    }

    pub fn reveal_all(&mut self) {
        for el in self.elements.values_mut() {
            el.state = RevealState::Revealed;
        }
    }

    /// Unknown ids read as `Hidden`.
    #[must_use]
    pub fn state(&self, id: &str) -> RevealState {
        self.elements.get(id).map_or(RevealState::Hidden, |el| el.state)
    }

    /// `true` once the element has left `Hidden`; gates dependent sequences.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.state(id) != RevealState::Hidden
    }

    #[must_use]
    pub fn all_revealed(&self) -> bool {
        self.elements.values().all(|el| el.state == RevealState::Revealed)
    }
}

// =============================================================================
// SCAN SWEEP
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanPhase {
    /// Waiting for the headline to finish typing.
    #[default]
    Waiting,
    Scanning,
    Ready,
}

/// Timed sweep over a card grid. Card `i` reveals once sweep progress
/// exceeds `0.2 * i + 0.1`.
#[derive(Clone, Debug, Default)]
pub struct ScanSweep {
    phase: ScanPhase,
    started_at_ms: Option<f64>,
    ready_at_ms: Option<f64>,
    progress: f64,
    coordinator: RevealCoordinator,
}

impl ScanSweep {
    /// Build a sweep over the given card ids, in display order.
    #[must_use]
    pub fn new<I, S>(card_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut coordinator = RevealCoordinator::new();
        for (idx, id) in card_ids.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let threshold = SCAN_CARD_STAGGER * idx as f64 + SCAN_CARD_OFFSET;
            coordinator.register(id, threshold, 0.0);
        }
        Self { coordinator, ..Self::default() }
    }

    /// Begin sweeping. Ignored unless the sweep is still waiting.
    pub fn start(&mut self, now_ms: f64) {
        if self.phase == ScanPhase::Waiting {
            self.phase = ScanPhase::Scanning;
            self.started_at_ms = Some(now_ms);
        }
    }

    /// Advance to `now_ms`. Returns the sweep progress in `[0, 1]`.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let Some(started) = self.started_at_ms else {
            return self.progress;
        };
        if self.phase != ScanPhase::Scanning {
            return self.progress;
        }
        let progress = ((now_ms - started) / SCAN_DURATION_MS).clamp(0.0, 1.0);
        self.progress = self.progress.max(progress);
        // Thresholds are strict (`>`), so nudge below the coordinator's `>=`.
        self.coordinator
            .advance(self.progress - f64::EPSILON, now_ms);
        if self.progress >= 1.0 {
            // Grids longer than five cards have thresholds past the end.
            self.coordinator.reveal_all();
            self.phase = ScanPhase::Ready;
            self.ready_at_ms = Some(now_ms);
        }
        self.progress
    }

    #[must_use]
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn is_card_visible(&self, id: &str) -> bool {
        self.coordinator.is_active(id)
    }

    /// Card metadata pops in a short delay after the sweep finishes.
    #[must_use]
    pub fn metadata_visible(&self, now_ms: f64) -> bool {
        self.ready_at_ms
            .is_some_and(|ready| now_ms - ready >= SCAN_METADATA_DELAY_MS)
    }
}
