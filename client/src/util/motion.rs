//! Pointer- and scroll-driven transforms for headlines and cards.
//!
//! All helpers return plain numbers or CSS strings. Pages bind them into
//! `style` attributes; nothing here touches the DOM.

#[cfg(test)]
#[path = "motion_test.rs"]
mod motion_test;

/// Parallax travel in pixels at the viewport edge.
pub const POINTER_PARALLAX_PX: f64 = 12.0;
/// Shadow offset in pixels at the viewport edge, opposite the pointer.
pub const SHADOW_OFFSET_PX: f64 = 15.0;
/// Horizontal drift per scrolled pixel for the hero headline rows.
pub const SCROLL_DRIFT: f64 = 0.1;
/// Second hero row moves against the first at this ratio.
pub const COUNTER_LAYER_RATIO: f64 = -1.2;
/// Pixels of pointer offset per degree of card tilt.
pub const TILT_DIVISOR: f64 = 10.0;
pub const HOVER_SCALE: f64 = 1.05;

/// Pointer position normalized to `[-1, 1]` on both axes, `(0, 0)` at the
/// viewport center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffset {
    pub x: f64,
    pub y: f64,
}

impl PointerOffset {
    #[must_use]
    pub fn from_client(client_x: f64, client_y: f64, viewport_width: f64, viewport_height: f64) -> Self {
        Self { x: normalize_axis(client_x, viewport_width), y: normalize_axis(client_y, viewport_height) }
    }

    /// Pixel translation for a layer following the pointer.
    #[must_use]
    pub fn parallax(self) -> (f64, f64) {
        (self.x * POINTER_PARALLAX_PX, self.y * POINTER_PARALLAX_PX)
    }

    /// Shadow offset cast away from the pointer.
    #[must_use]
    pub fn shadow(self) -> (f64, f64) {
        (-self.x * SHADOW_OFFSET_PX, -self.y * SHADOW_OFFSET_PX)
    }
}

fn normalize_axis(pos: f64, extent: f64) -> f64 {
    if !pos.is_finite() || !extent.is_finite() || extent <= 0.0 {
        return 0.0;
    }
    ((pos / extent) * 2.0 - 1.0).clamp(-1.0, 1.0)
}

/// Transform for the leading hero row: drifts left as the page scrolls.
#[must_use]
pub fn lead_layer_transform(scroll_y: f64, pointer: PointerOffset) -> String {
    let (px, py) = pointer.parallax();
    let drift = scroll_y * -SCROLL_DRIFT;
    format!("translate3d({:.2}px, {:.2}px, 0)", drift + px, py)
}

/// Transform for the trailing hero row: drifts right and counters the pointer.
#[must_use]
pub fn counter_layer_transform(scroll_y: f64, pointer: PointerOffset) -> String {
    let (px, py) = pointer.parallax();
    let drift = scroll_y * SCROLL_DRIFT;
    format!(
        "translate3d({:.2}px, {:.2}px, 0)",
        drift + px * COUNTER_LAYER_RATIO,
        py * COUNTER_LAYER_RATIO
    )
}

/// Two-layer headline text shadow for the pointer position.
#[must_use]
pub fn headline_shadow(pointer: PointerOffset) -> String {
    let (sx, sy) = pointer.shadow();
    format!(
        "{:.2}px {:.2}px 10px rgba(0, 0, 0, 0.4), {:.2}px {:.2}px 30px rgba(0, 0, 0, 0.2)",
        sx,
        sy,
        sx * 1.5,
        sy * 1.5
    )
}

/// Softer single-layer shadow for the trailing hero row.
#[must_use]
pub fn counter_shadow(pointer: PointerOffset) -> String {
    let (sx, sy) = pointer.shadow();
    format!("{:.2}px {:.2}px 20px rgba(0, 0, 0, 0.3)", sx * 0.5, sy * 0.5)
}

/// 3D card rotation, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardTilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl CardTilt {
    /// Tilt for a pointer at `(local_x, local_y)` inside a card of the given
    /// size. The card leans toward the pointer.
    #[must_use]
    pub fn from_local(local_x: f64, local_y: f64, width: f64, height: f64) -> Self {
        let rotate_x = (local_y - height / 2.0) / TILT_DIVISOR;
        let rotate_y = (width / 2.0 - local_x) / TILT_DIVISOR;
        if rotate_x.is_finite() && rotate_y.is_finite() {
            Self { rotate_x, rotate_y }
        } else {
            Self::default()
        }
    }
}

/// Card transform: tilted and lifted while hovered, flat otherwise.
#[must_use]
pub fn card_transform(tilt: Option<CardTilt>) -> String {
    match tilt {
        Some(t) => format!(
            "rotateX({:.2}deg) rotateY({:.2}deg) scale3d({HOVER_SCALE}, {HOVER_SCALE}, {HOVER_SCALE})",
            t.rotate_x, t.rotate_y
        ),
        None => "rotateX(0deg) rotateY(0deg) scale3d(1, 1, 1)".to_owned(),
    }
}

/// Decorative latency readout: `0.002..0.004` ms, three decimals.
/// `unit` is a uniform sample in `[0, 1)`.
#[must_use]
pub fn latency_label(unit: f64) -> String {
    let unit = if unit.is_finite() { unit.clamp(0.0, 1.0) } else { 0.0 };
    format!("{:.3}", 0.002 + unit * 0.002)
}

/// Uniform sample in `[0, 1)`. Fixed at `0.0` outside the browser.
#[must_use]
pub fn random_unit() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Math::random()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0.0
    }
}
