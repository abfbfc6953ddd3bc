// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-to-value mapping and tooltip clamping.
//!
//! Everything in this module is a pure function of its inputs. The caller
//! measures the DOM (or any other layout source) once per pointer sample and
//! passes the numbers in; nothing here reads platform state or keeps history.
//!
//! The pipeline for one sample is:
//!
//! ```text
//!   pointer x ──► sample_fraction() ──► Fraction ──► to_value() ──► Value
//!       │
//!       ├──► clamp_offset()          ──► indicator ClampedOffset
//!       └──► TooltipClamp strategy   ──► tooltip ClampedOffset
//! ```
//!
//! [`PositionMapper::map`] runs all of it at once.

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Rect;

/// Errors from pointer mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MapError {
    /// The track has no usable width (zero, negative, or NaN).
    ///
    /// The sample cannot be mapped; callers should skip it and keep their
    /// last display state.
    InvalidTrack {
        /// The offending width in pixels.
        width: f64,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTrack { width } => write!(f, "track width must be positive (got {width})"),
        }
    }
}

impl core::error::Error for MapError {}

/// A normalized position along a track, always within `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Fraction(f64);

impl Fraction {
    /// The start of the track.
    pub const ZERO: Self = Self(0.0);
    /// The end of the track.
    pub const ONE: Self = Self(1.0);

    /// Creates a fraction, clamping `value` into `[0, 1]`.
    ///
    /// NaN maps to zero.
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.max(0.0).min(1.0))
        }
    }

    /// Returns the fraction as a plain number.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// The semantic quantity under the pointer.
///
/// The mode tag matters to callers: a time is rendered as a timestamp, a
/// percentage as `N%`. See [`Value::label`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// Seconds into the media, used when the duration is known.
    Time(f64),
    /// A percentage in `[0, 100]`, used when the duration is unknown.
    Percent(f64),
}

impl Value {
    /// Returns the raw number regardless of mode.
    #[inline]
    #[must_use]
    pub const fn amount(self) -> f64 {
        match self {
            Self::Time(v) | Self::Percent(v) => v,
        }
    }

    /// Returns `true` for the percentage fallback mode.
    #[inline]
    #[must_use]
    pub const fn is_percent(self) -> bool {
        matches!(self, Self::Percent(_))
    }
}

/// A pixel offset that has been constrained to a valid range.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct ClampedOffset(f64);

impl ClampedOffset {
    /// Returns the offset in pixels.
    #[inline]
    #[must_use]
    pub const fn px(self) -> f64 {
        self.0
    }
}

/// A pointer position plus the track box it was measured against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Pointer X in document coordinates.
    pub x: f64,
    /// The track's bounding box in document coordinates at sample time.
    pub track: Rect,
}

impl PointerSample {
    /// Maps this sample to a [`Fraction`] of its track.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidTrack`] if the track has no positive width.
    pub fn fraction(&self) -> Result<Fraction, MapError> {
        sample_fraction(self.x, self.track.x0, self.track.width())
    }
}

/// Maps a pointer X coordinate to its fraction along a track.
///
/// Computes `(pointer_x - track_left) / track_width` clamped to `[0, 1]`.
///
/// # Errors
///
/// Returns [`MapError::InvalidTrack`] if `track_width` is not a positive
/// number. There is no meaningful fraction of an empty track; callers should
/// treat the position as zero and skip the update.
pub fn sample_fraction(
    pointer_x: f64,
    track_left: f64,
    track_width: f64,
) -> Result<Fraction, MapError> {
    if track_width.is_nan() || track_width <= 0.0 {
        return Err(MapError::InvalidTrack { width: track_width });
    }
    Ok(Fraction::new((pointer_x - track_left) / track_width))
}

/// Converts a fraction into a time or a percentage.
///
/// A finite, positive `duration` yields [`Value::Time`]; anything else
/// (unknown, zero, negative, NaN, infinite) falls back to
/// [`Value::Percent`]. No rounding is applied.
#[must_use]
pub fn to_value(fraction: Fraction, duration: f64) -> Value {
    if duration.is_finite() && duration > 0.0 {
        Value::Time(fraction.get() * duration)
    } else {
        Value::Percent(fraction.get() * 100.0)
    }
}

/// Keeps an element of `element_width` fully inside a container.
///
/// The result lies in `[0, max(0, container_width - element_width)]`.
#[must_use]
pub fn clamp_offset(raw: f64, element_width: f64, container_width: f64) -> ClampedOffset {
    let max = (container_width - element_width).max(0.0);
    ClampedOffset(clamp_between(raw, 0.0, max))
}

/// Keeps a tooltip within an outer reference box instead of its parent.
///
/// The bounds are `min = outer_left - container_left - tooltip_width / 2` and
/// `max = min + outer_width`, i.e. the tooltip's centre may travel the full
/// span of the outer box, expressed in the container's coordinate space.
#[must_use]
pub fn clamp_tooltip_offset(
    raw: f64,
    tooltip_width: f64,
    outer_left: f64,
    outer_width: f64,
    container_left: f64,
) -> ClampedOffset {
    let min = outer_left - container_left - tooltip_width / 2.0;
    let max = min + outer_width;
    ClampedOffset(clamp_between(raw, min, max))
}

/// `min(max(raw, lo), hi)`, which never panics and maps NaN to `lo`.
///
/// If `lo > hi` the upper bound wins.
fn clamp_between(raw: f64, lo: f64, hi: f64) -> f64 {
    raw.max(lo).min(hi)
}

/// Where a tooltip is allowed to travel.
///
/// The time tooltip and the volume tooltip use different reference boxes, so
/// the strategy is chosen per control rather than baked into the mapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TooltipClamp {
    /// Keep the tooltip fully inside the element it is attached to.
    #[default]
    Parent,
    /// Keep the tooltip's centre within [`TrackGeometry::outer`].
    ///
    /// Falls back to [`Parent`](Self::Parent) when no outer box is given.
    Outer,
}

/// Layout measurements needed to position the indicator and tooltip.
///
/// The indicator's container is the sampled track itself (see
/// [`PointerSample::track`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackGeometry {
    /// Measured width of the inline indicator.
    pub indicator_width: f64,
    /// Measured width of the tooltip; may be zero before first layout.
    pub tooltip_width: f64,
    /// Bounding box of the element the tooltip is positioned in.
    pub tooltip_container: Rect,
    /// Outer reference box for [`TooltipClamp::Outer`].
    pub outer: Option<Rect>,
}

/// The complete result of mapping one pointer sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerMapping {
    /// Position along the track.
    pub fraction: Fraction,
    /// Time or percentage under the pointer.
    pub value: Value,
    /// Left offset of the indicator within the track.
    pub indicator: ClampedOffset,
    /// Left offset of the tooltip within its container.
    pub tooltip: ClampedOffset,
}

/// Stateless pointer mapper configured with a tooltip clamp strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PositionMapper {
    clamp: TooltipClamp,
}

impl PositionMapper {
    /// Creates a mapper using the given tooltip strategy.
    #[must_use]
    pub const fn new(clamp: TooltipClamp) -> Self {
        Self { clamp }
    }

    /// Returns the configured tooltip strategy.
    #[must_use]
    pub const fn clamp(&self) -> TooltipClamp {
        self.clamp
    }

    /// Maps one pointer sample to a value and two clamped offsets.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidTrack`] if the sampled track has no positive
    /// width.
    pub fn map(
        &self,
        sample: &PointerSample,
        geometry: &TrackGeometry,
        duration: f64,
    ) -> Result<PointerMapping, MapError> {
        let fraction = sample.fraction()?;
        let value = to_value(fraction, duration);

        let track = sample.track;
        let indicator = clamp_offset(sample.x - track.x0, geometry.indicator_width, track.width());

        let container = geometry.tooltip_container;
        let raw_tooltip = sample.x - container.x0 - geometry.tooltip_width / 2.0;
        let tooltip = match (self.clamp, geometry.outer) {
            (TooltipClamp::Outer, Some(outer)) => clamp_tooltip_offset(
                raw_tooltip,
                geometry.tooltip_width,
                outer.x0,
                outer.width(),
                container.x0,
            ),
            (TooltipClamp::Outer, None) | (TooltipClamp::Parent, _) => {
                clamp_offset(raw_tooltip, geometry.tooltip_width, container.width())
            }
        };

        Ok(PointerMapping {
            fraction,
            value,
            indicator,
            tooltip,
        })
    }
}

/// Runs the whole mapping pipeline for one sample with the given strategy.
///
/// Shorthand for `PositionMapper::new(clamp).map(..)`.
///
/// # Errors
///
/// Returns [`MapError::InvalidTrack`] if the sampled track has no positive
/// width.
pub fn map_pointer(
    sample: &PointerSample,
    geometry: &TrackGeometry,
    duration: f64,
    clamp: TooltipClamp,
) -> Result<PointerMapping, MapError> {
    PositionMapper::new(clamp).map(sample, geometry, duration)
}

/// Clamps an indicator position so a tooltip centred on it stays inside the
/// player.
///
/// Positions closer than half a tooltip to either player edge are pulled in,
/// rounding towards the inside (`ceil` on the left, `floor` on the right).
#[must_use]
pub fn keep_inside_position(position: f64, tooltip_width: f64, player_width: f64) -> f64 {
    let half = tooltip_width / 2.0;
    if position < half {
        half.ceil()
    } else if position > player_width - half {
        (player_width - half).floor()
    } else {
        position
    }
}

/// The CSS `right` offset for a tooltip anchored to a player-clamped
/// indicator.
///
/// `clamped` is the result of [`keep_inside_position`] for `position`.
#[must_use]
pub fn keep_inside_right(position: f64, clamped: f64, tooltip_width: f64) -> f64 {
    let difference = position - clamped + 1.0;
    difference - tooltip_width / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn fraction_stays_in_unit_range() {
        for &x in &[-1e9, -50.0, 0.0, 49.0, 50.0, 125.0, 250.0, 251.0, 1e9] {
            let f = sample_fraction(x, 50.0, 200.0).unwrap().get();
            assert!((0.0..=1.0).contains(&f), "x={x} gave {f}");
        }
    }

    #[test]
    fn fraction_of_nan_pointer_is_zero() {
        assert_eq!(sample_fraction(f64::NAN, 0.0, 100.0), Ok(Fraction::ZERO));
    }

    #[test]
    fn non_positive_track_is_invalid() {
        assert_eq!(
            sample_fraction(10.0, 0.0, 0.0),
            Err(MapError::InvalidTrack { width: 0.0 })
        );
        assert_eq!(
            sample_fraction(10.0, 0.0, -4.0),
            Err(MapError::InvalidTrack { width: -4.0 })
        );
        assert!(sample_fraction(10.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn unknown_duration_falls_back_to_percent() {
        let f = Fraction::new(0.25);
        assert_eq!(to_value(f, f64::NAN), Value::Percent(25.0));
        assert_eq!(to_value(f, 0.0), Value::Percent(25.0));
        assert_eq!(to_value(f, -3.0), Value::Percent(25.0));
        assert_eq!(to_value(f, f64::INFINITY), Value::Percent(25.0));
    }

    #[test]
    fn known_duration_gives_time() {
        let v = to_value(Fraction::new(0.5), 120.0);
        assert_eq!(v, Value::Time(60.0));
        assert!(!v.is_percent());
    }

    #[test]
    fn clamp_offset_saturates() {
        assert_eq!(clamp_offset(-10.0, 20.0, 200.0).px(), 0.0);
        assert_eq!(clamp_offset(300.0, 20.0, 200.0).px(), 180.0);
        assert_eq!(clamp_offset(42.0, 20.0, 200.0).px(), 42.0);
    }

    #[test]
    fn clamp_offset_is_monotonic_and_idempotent() {
        let mut prev = f64::NEG_INFINITY;
        let mut raw = -50.0;
        while raw <= 250.0 {
            let once = clamp_offset(raw, 20.0, 200.0).px();
            assert!(once >= prev, "not monotonic at {raw}");
            let twice = clamp_offset(once, 20.0, 200.0).px();
            assert_eq!(once, twice, "not idempotent at {raw}");
            prev = once;
            raw += 7.5;
        }
    }

    #[test]
    fn clamp_offset_with_oversized_element_pins_to_zero() {
        assert_eq!(clamp_offset(30.0, 300.0, 200.0).px(), 0.0);
    }

    #[test]
    fn zero_width_tooltip_uses_whole_container() {
        assert_eq!(clamp_offset(200.0, 0.0, 200.0).px(), 200.0);
        assert_eq!(clamp_offset(201.0, 0.0, 200.0).px(), 200.0);
    }

    #[test]
    fn tooltip_bounds_follow_outer_box() {
        // Outer box starts 40px right of the container, tooltip is 30px wide.
        let lo = clamp_tooltip_offset(-1e6, 30.0, 140.0, 100.0, 100.0).px();
        let hi = clamp_tooltip_offset(1e6, 30.0, 140.0, 100.0, 100.0).px();
        assert!(approx(lo, 25.0), "lo={lo}");
        assert!(approx(hi, 125.0), "hi={hi}");

        let hi_wide = clamp_tooltip_offset(1e6, 30.0, 140.0, 200.0, 100.0).px();
        let lo_wide = clamp_tooltip_offset(-1e6, 30.0, 140.0, 200.0, 100.0).px();
        assert!(approx(hi_wide - lo_wide, 2.0 * (hi - lo)), "range did not double");
    }

    #[test]
    fn end_to_end_percent_sample() {
        let sample = PointerSample {
            x: 150.0,
            track: Rect::new(50.0, 0.0, 250.0, 10.0),
        };
        let fraction = sample.fraction().unwrap();
        assert_eq!(fraction.get(), 0.5);
        assert_eq!(to_value(fraction, f64::NAN), Value::Percent(50.0));
        assert_eq!(clamp_offset(100.0, 30.0, 200.0).px(), 100.0);
    }

    #[test]
    fn mapper_parent_strategy() {
        let sample = PointerSample {
            x: 245.0,
            track: Rect::new(50.0, 0.0, 250.0, 10.0),
        };
        let geometry = TrackGeometry {
            indicator_width: 10.0,
            tooltip_width: 40.0,
            tooltip_container: Rect::new(50.0, 0.0, 250.0, 10.0),
            outer: None,
        };
        let m = PositionMapper::new(TooltipClamp::Parent)
            .map(&sample, &geometry, 60.0)
            .unwrap();
        assert!(approx(m.fraction.get(), 0.975));
        assert!(approx(m.value.amount(), 58.5));
        // 195 raw, limited to 200 - 10.
        assert_eq!(m.indicator.px(), 190.0);
        // 175 raw, limited to 200 - 40.
        assert_eq!(m.tooltip.px(), 160.0);
    }

    #[test]
    fn mapper_outer_strategy_uses_outer_box() {
        // Volume bar at x 300..400, tooltip lives in a progress control at 0..600.
        let bar = Rect::new(300.0, 0.0, 400.0, 10.0);
        let sample = PointerSample { x: 290.0, track: bar };
        let geometry = TrackGeometry {
            indicator_width: 4.0,
            tooltip_width: 20.0,
            tooltip_container: Rect::new(0.0, 0.0, 600.0, 10.0),
            outer: Some(bar),
        };
        let m = PositionMapper::new(TooltipClamp::Outer)
            .map(&sample, &geometry, f64::NAN)
            .unwrap();
        assert_eq!(m.value, Value::Percent(0.0));
        assert_eq!(m.indicator.px(), 0.0);
        // min bound = 300 - 0 - 10
        assert_eq!(m.tooltip.px(), 290.0);
    }

    #[test]
    fn mapper_outer_without_box_acts_like_parent() {
        let track = Rect::new(0.0, 0.0, 100.0, 10.0);
        let sample = PointerSample { x: 99.0, track };
        let geometry = TrackGeometry {
            indicator_width: 0.0,
            tooltip_width: 20.0,
            tooltip_container: track,
            outer: None,
        };
        let outer = PositionMapper::new(TooltipClamp::Outer)
            .map(&sample, &geometry, 10.0)
            .unwrap();
        let parent = PositionMapper::new(TooltipClamp::Parent)
            .map(&sample, &geometry, 10.0)
            .unwrap();
        assert_eq!(outer, parent);
    }

    #[test]
    fn mapper_rejects_empty_track() {
        let sample = PointerSample {
            x: 10.0,
            track: Rect::new(10.0, 0.0, 10.0, 10.0),
        };
        let geometry = TrackGeometry {
            indicator_width: 0.0,
            tooltip_width: 0.0,
            tooltip_container: sample.track,
            outer: None,
        };
        assert!(matches!(
            PositionMapper::default().map(&sample, &geometry, 1.0),
            Err(MapError::InvalidTrack { .. })
        ));
    }

    #[test]
    fn keep_inside_pulls_edges_in() {
        assert_eq!(keep_inside_position(5.0, 40.0, 300.0), 20.0);
        assert_eq!(keep_inside_position(290.0, 40.0, 300.0), 280.0);
        assert_eq!(keep_inside_position(100.0, 40.0, 300.0), 100.0);
        assert_eq!(keep_inside_position(3.0, 41.0, 300.0), 21.0);
    }

    #[test]
    fn keep_inside_right_anchor() {
        // Unclamped: the tooltip centre sits one pixel past the indicator.
        assert_eq!(keep_inside_right(100.0, 100.0, 40.0), -19.0);
        // Clamped on the left by 15px.
        assert_eq!(keep_inside_right(5.0, 20.0, 40.0), -34.0);
    }
}
