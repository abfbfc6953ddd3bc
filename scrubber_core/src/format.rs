// Copyright 2026 the Scrubber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text labels for tooltip values.
//!
//! Rounding and formatting are presentation concerns, so they live here rather
//! than in [`position`](crate::position).

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::position::Value;

/// Formats seconds as `h:mm:ss` or `m:ss`.
///
/// `guide` is the longest time that will be shown alongside (usually the
/// media duration). It keeps labels the same shape across the track: hours
/// appear whenever either value reaches an hour, and minutes are zero-padded
/// when hours are shown or the guide reaches ten minutes.
///
/// Negative times render as zero. NaN and infinite times render as `-:-`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "operands are floored, finite and non-negative"
)]
pub fn format_time(seconds: f64, guide: f64) -> String {
    if !seconds.is_finite() {
        return String::from("-:-");
    }
    let seconds = seconds.max(0.0);
    let guide = if guide.is_finite() { guide.max(0.0) } else { 0.0 };

    let s = (seconds % 60.0).floor() as u64;
    let m = (seconds / 60.0 % 60.0).floor() as u64;
    let h = (seconds / 3600.0).floor() as u64;
    let guide_m = (guide / 60.0 % 60.0).floor() as u64;
    let guide_h = (guide / 3600.0).floor() as u64;

    let show_hours = h > 0 || guide_h > 0;
    if show_hours {
        format!("{h}:{m:02}:{s:02}")
    } else if guide_m >= 10 {
        format!("{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Formats a percentage rounded to the nearest integer, e.g. `42%`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "value is rounded before the cast"
)]
pub fn format_percent(percent: f64) -> String {
    if percent.is_nan() {
        return String::from("0%");
    }
    let rounded = percent.round() as i64;
    format!("{rounded}%")
}

impl Value {
    /// Returns the tooltip label for this value.
    ///
    /// Times use [`format_time`] with `guide`; percentages use
    /// [`format_percent`].
    #[must_use]
    pub fn label(self, guide: f64) -> String {
        match self {
            Self::Time(seconds) => format_time(seconds, guide),
            Self::Percent(percent) => format_percent(percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_times() {
        assert_eq!(format_time(0.0, 0.0), "0:00");
        assert_eq!(format_time(9.99, 0.0), "0:09");
        assert_eq!(format_time(61.0, 0.0), "1:01");
        assert_eq!(format_time(599.0, 0.0), "9:59");
    }

    #[test]
    fn guide_pads_minutes() {
        assert_eq!(format_time(61.0, 600.0), "01:01");
        assert_eq!(format_time(61.0, 599.0), "1:01");
    }

    #[test]
    fn hours_from_time_or_guide() {
        assert_eq!(format_time(3661.0, 0.0), "1:01:01");
        assert_eq!(format_time(5.0, 3600.0), "0:00:05");
    }

    #[test]
    fn invalid_times() {
        assert_eq!(format_time(f64::NAN, 10.0), "-:-");
        assert_eq!(format_time(f64::INFINITY, 10.0), "-:-");
        assert_eq!(format_time(-4.0, 0.0), "0:00");
    }

    #[test]
    fn percent_labels_round() {
        assert_eq!(format_percent(49.5), "50%");
        assert_eq!(format_percent(49.4), "49%");
        assert_eq!(format_percent(0.0), "0%");
    }

    #[test]
    fn value_label_follows_mode() {
        assert_eq!(Value::Time(75.0).label(120.0), "1:15");
        assert_eq!(Value::Percent(33.3).label(120.0), "33%");
    }
}
