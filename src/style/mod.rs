//! Magnitude-driven styling: breakpoint interpolation rules and the color,
//! radius and label resolvers the rendering layers are built from.

use crate::error::StyleError;

/// 24-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Values that can be linearly interpolated between two rule stops.
pub trait Lerp: Copy {
    fn lerp(a: Self, b: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Color {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        let channel = |a: u8, b: u8| -> u8 {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Color::rgb(
            channel(a.r, b.r),
            channel(a.g, b.g),
            channel(a.b, b.b),
        )
    }
}

/// An ordered sequence of `(threshold, value)` stops defining a
/// piecewise-linear mapping. Inputs below the first threshold resolve to the
/// first value and inputs above the last to the last value.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRule<T: Lerp> {
    stops: Vec<(f64, T)>,
}

impl<T: Lerp> StyleRule<T> {
    /// Builds a rule, requiring at least one stop and strictly increasing
    /// thresholds.
    pub fn new(stops: Vec<(f64, T)>) -> Result<Self, StyleError> {
        if stops.is_empty() {
            return Err(StyleError::NoStops);
        }
        for (index, pair) in stops.windows(2).enumerate() {
            if pair[1].0 <= pair[0].0 {
                return Err(StyleError::UnorderedStops(index + 1));
            }
        }
        Ok(StyleRule { stops })
    }

    // For the built-in rules, whose stops are known good.
    fn from_stops(stops: Vec<(f64, T)>) -> Self {
        debug_assert!(stops.windows(2).all(|pair| pair[0].0 < pair[1].0));
        StyleRule { stops }
    }

    pub fn stops(&self) -> &[(f64, T)] {
        &self.stops
    }

    /// Resolves an input against the rule, clamping at both ends.
    pub fn resolve(&self, input: f64) -> T {
        let (first_threshold, first_value) = self.stops[0];
        if !(input > first_threshold) {
            return first_value;
        }
        for pair in self.stops.windows(2) {
            let (lo_threshold, lo_value) = pair[0];
            let (hi_threshold, hi_value) = pair[1];
            if input <= hi_threshold {
                let t = (input - lo_threshold) / (hi_threshold - lo_threshold);
                return T::lerp(lo_value, hi_value, t);
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}

/// Bubble color gradient over magnitude: green, yellow, orange, red.
pub fn magnitude_color_rule() -> StyleRule<Color> {
    StyleRule::from_stops(vec![
        (0.0, Color::GREEN),
        (5.0, Color::YELLOW),
        (6.0, Color::ORANGE),
        (7.0, Color::RED),
    ])
}

/// Bubble radius over magnitude: 2px at magnitude 0, 20px at magnitude 8,
/// linear in between.
pub fn magnitude_radius_rule() -> StyleRule<f64> {
    StyleRule::from_stops(vec![(0.0, 2.0), (8.0, 20.0)])
}

pub fn color_for(magnitude: f64) -> Color {
    magnitude_color_rule().resolve(magnitude)
}

pub fn radius_for(magnitude: f64) -> f64 {
    magnitude_radius_rule().resolve(magnitude)
}

/// Magnitude rendered as label text, e.g. 6.1 becomes "6.1m".
pub fn label_for(magnitude: f64) -> String {
    format!("{magnitude}m")
}
