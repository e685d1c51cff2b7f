//! Scroll sampling and normalized progress.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages feed raw window geometry into a [`ScrollTracker`] on every `scroll`
//! event. The tracker converts it into a [`ScrollUpdate`] and fans it out to
//! subscribers (reveal coordination, timeline marker placement) synchronously.
//!
//! Progress is always recomputed from the absolute offset, so two samples
//! delivered out of order cannot corrupt it. Only `velocity_px` depends on the
//! previous sample, and it just drives a decaying visual effect.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

/// Offsets closer than this to the bottom count as fully scrolled. Browsers
/// report fractional `scrollY` at the page end on scaled displays.
pub const BOTTOM_SNAP_PX: f64 = 1.0;

/// One reading of the window scroll geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
    /// `window.scrollY` in CSS pixels.
    pub scroll_offset: f64,
    /// `document.documentElement.scrollHeight`.
    pub document_height: f64,
    /// `window.innerHeight`.
    pub viewport_height: f64,
}

impl ScrollSample {
    #[must_use]
    pub fn new(scroll_offset: f64, document_height: f64, viewport_height: f64) -> Self {
        Self { scroll_offset, document_height, viewport_height }
    }

    /// Largest reachable scroll offset.
    #[must_use]
    pub fn scroll_range(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    /// Fraction of the scrollable range covered, in `[0, 1]`.
    ///
    /// A page that fits entirely in the viewport has been seen in full and
    /// reports `1.0`.
    #[must_use]
    pub fn progress_fraction(&self) -> f64 {
        let range = self.scroll_range();
        if range <= 0.0 {
            return 1.0;
        }
        let offset = sanitize_offset(self.scroll_offset);
        if range - offset < BOTTOM_SNAP_PX {
            return 1.0;
        }
        (offset / range).clamp(0.0, 1.0)
    }

    /// [`Self::progress_fraction`] scaled to `[0, 100]`.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.progress_fraction() * 100.0
    }
}

fn sanitize_offset(offset: f64) -> f64 {
    if offset.is_finite() { offset.max(0.0) } else { 0.0 }
}

/// What subscribers receive for each scroll notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollUpdate {
    pub sample: ScrollSample,
    pub progress_percent: f64,
    /// Absolute pixel delta from the previous sample; `0` for the first one.
    pub velocity_px: f64,
}

/// Handle returned by [`ScrollTracker::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ScrollUpdate)>;

/// Converts scroll samples into progress updates and notifies subscribers in
/// subscription order.
#[derive(Default)]
pub struct ScrollTracker {
    last_offset: Option<f64>,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

impl ScrollTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ScrollUpdate) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Process one scroll notification.
    pub fn on_scroll(&mut self, sample: ScrollSample) -> ScrollUpdate {
        let offset = sanitize_offset(sample.scroll_offset);
        let velocity_px = self
            .last_offset
            .map_or(0.0, |prev| (offset - prev).abs());
        self.last_offset = Some(offset);

        let update = ScrollUpdate { sample, progress_percent: sample.progress_percent(), velocity_px };
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&update);
        }
        update
    }
}

/// Read the live window geometry. Returns `None` outside the browser.
#[must_use]
pub fn read_window_sample() -> Option<ScrollSample> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window()?;
        let scroll_offset = window.scroll_y().ok()?;
        let viewport_height = window.inner_height().ok()?.as_f64()?;
        let document_height = f64::from(window.document()?.document_element()?.scroll_height());
        Some(ScrollSample { scroll_offset, document_height, viewport_height })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Jump the window back to the top without smooth scrolling.
pub fn scroll_window_to_top() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }
}
