//! Continuous card feedback derived from the drag offset.
//!
//! Every value here is a pure function of the signed horizontal offset `x`,
//! evaluated once per frame. There is no animation state.

/// Input range mapped onto the rotation range.
const ROTATION_INPUT: [f64; 2] = [-200.0, 200.0];
/// Card tilt in degrees at the ends of [`ROTATION_INPUT`].
const ROTATION_OUTPUT: [f64; 2] = [-15.0, 15.0];

const OPACITY_INPUT: [f64; 5] = [-200.0, -100.0, 0.0, 100.0, 200.0];
const OPACITY_OUTPUT: [f64; 5] = [0.5, 1.0, 1.0, 1.0, 0.5];

const LEFT_INPUT: [f64; 2] = [-100.0, 0.0];
const LEFT_OUTPUT: [f64; 2] = [1.0, 0.0];

const RIGHT_INPUT: [f64; 2] = [0.0, 100.0];
const RIGHT_OUTPUT: [f64; 2] = [0.0, 1.0];

/// Piecewise-linear interpolation of `x` over ascending breakpoints.
///
/// Values outside the input range clamp to the first or last output.
/// `input` and `output` must have equal length of at least one.
pub fn interpolate(x: f64, input: &[f64], output: &[f64]) -> f64 {
    debug_assert_eq!(input.len(), output.len());
    debug_assert!(!input.is_empty());

    let last = input.len() - 1;
    if x.is_nan() {
        return output[0];
    }
    if x <= input[0] {
        return output[0];
    }
    if x >= input[last] {
        return output[last];
    }

    for i in 0..last {
        let (x0, x1) = (input[i], input[i + 1]);
        if x >= x0 && x <= x1 {
            let span = x1 - x0;
            if span == 0.0 {
                return output[i + 1];
            }
            let t = (x - x0) / span;
            return output[i] + t * (output[i + 1] - output[i]);
        }
    }
    output[last]
}

/// Card tilt in degrees, -15..=15.
pub fn rotation(x: f64) -> f64 {
    interpolate(x, &ROTATION_INPUT, &ROTATION_OUTPUT)
}

/// Card opacity, 0.5..=1.
pub fn opacity(x: f64) -> f64 {
    interpolate(x, &OPACITY_INPUT, &OPACITY_OUTPUT)
}

/// Intensity of the dismiss indicator, 0..=1.
pub fn left_indicator(x: f64) -> f64 {
    interpolate(x, &LEFT_INPUT, &LEFT_OUTPUT)
}

/// Intensity of the approve indicator, 0..=1.
pub fn right_indicator(x: f64) -> f64 {
    interpolate(x, &RIGHT_INPUT, &RIGHT_OUTPUT)
}

/// Snapshot of every derived visual value for one offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMotion {
    pub offset: f64,
    pub rotation_deg: f64,
    pub opacity: f64,
    pub left_intensity: f64,
    pub right_intensity: f64,
}

impl CardMotion {
    pub fn at(offset: f64) -> Self {
        Self {
            offset,
            rotation_deg: rotation(offset),
            opacity: opacity(offset),
            left_intensity: left_indicator(offset),
            right_intensity: right_indicator(offset),
        }
    }

    /// The card at rest.
    pub fn resting() -> Self {
        Self::at(0.0)
    }
}

impl Default for CardMotion {
    fn default() -> Self {
        Self::resting()
    }
}
