//! Completed/incomplete pie chart geometry

use serde::{Deserialize, Serialize};

/// Angle the first slice starts at (twelve o'clock).
pub const PIE_START_ANGLE: f64 = -90.0;

/// One labelled share of a pie chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

/// Slices for a completed/incomplete split.
///
/// Each sweep is `value / total * 360` degrees, laid out clockwise from
/// [`PIE_START_ANGLE`]. No slices are produced when there is nothing to draw.
///
/// # Examples
///
/// ```
/// use studybuddy_domain::utils::chart::completion_pie;
///
/// let slices = completion_pie(1, 3);
/// assert_eq!(slices[0].label, "Completed");
/// assert_eq!(slices[0].sweep_angle, 90.0);
/// assert_eq!(slices[1].start_angle, 0.0);
/// assert!(completion_pie(0, 0).is_empty());
/// ```
#[must_use]
pub fn completion_pie(completed: usize, incomplete: usize) -> Vec<PieSlice> {
    let total = completed + incomplete;
    if total == 0 {
        return Vec::new();
    }

    // counts are list lengths, far below f64's exact integer range
    #[allow(clippy::cast_precision_loss)]
    let sweep = |value: usize| value as f64 / total as f64 * 360.0;

    let mut start_angle = PIE_START_ANGLE;
    [("Completed", completed), ("Incomplete", incomplete)]
        .into_iter()
        .map(|(label, value)| {
            let slice = PieSlice {
                label: label.to_string(),
                value,
                start_angle,
                sweep_angle: sweep(value),
            };
            start_angle += slice.sweep_angle;
            slice
        })
        .collect()
}
