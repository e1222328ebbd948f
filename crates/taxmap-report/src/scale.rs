//! Fill colours for the choropleth maps.

use std::fmt;

/// Fill of provinces without a usable value.
pub const MISSING_FILL: Rgb = Rgb(255, 0, 0);

/// Reversed cool-warm diverging ramp: low values red, high values blue.
const RAMP: [(f64, Rgb); 5] = [
    (0.00, Rgb(180, 4, 38)),
    (0.25, Rgb(244, 154, 123)),
    (0.50, Rgb(221, 221, 221)),
    (0.75, Rgb(141, 176, 254)),
    (1.00, Rgb(59, 76, 192)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colour at `t` in `[0, 1]` along the ramp; out-of-range input is clamped.
pub fn ramp_color(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    for pair in RAMP.windows(2) {
        let ((t0, c0), (t1, c1)) = (pair[0], pair[1]);
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * f).round() as u8;
            return Rgb(mix(c0.0, c1.0), mix(c0.1, c1.1), mix(c0.2, c1.2));
        }
    }
    RAMP[RAMP.len() - 1].1
}

/// Maps values onto the ramp between the smallest and largest input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    min: f64,
    max: f64,
    log: bool,
}

impl ColorScale {
    /// Linear scale over the given values.
    pub fn linear(values: impl IntoIterator<Item = f64>) -> Self {
        Self::build(values, false)
    }

    /// Scale over `ln(1 + v)` of the strictly positive values; the others
    /// are treated as missing.
    pub fn log1p(values: impl IntoIterator<Item = f64>) -> Self {
        Self::build(values, true)
    }

    fn build(values: impl IntoIterator<Item = f64>, log: bool) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            let Some(scaled) = transform(value, log) else {
                continue;
            };
            min = min.min(scaled);
            max = max.max(scaled);
        }
        Self { min, max, log }
    }

    /// Fill for a value, [`MISSING_FILL`] when it has none.
    pub fn fill(&self, value: Option<f64>) -> Rgb {
        let Some(scaled) = value.and_then(|v| transform(v, self.log)) else {
            return MISSING_FILL;
        };
        let span = self.max - self.min;
        if !span.is_finite() || span <= f64::EPSILON {
            return ramp_color(0.5);
        }
        ramp_color((scaled - self.min) / span)
    }
}

fn transform(value: f64, log: bool) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    if log {
        (value > 0.0).then(|| value.ln_1p())
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_ends_and_middle() {
        assert_eq!(ramp_color(0.0), Rgb(180, 4, 38));
        assert_eq!(ramp_color(0.5), Rgb(221, 221, 221));
        assert_eq!(ramp_color(1.0), Rgb(59, 76, 192));
        assert_eq!(ramp_color(7.0), Rgb(59, 76, 192));
        assert_eq!(Rgb(59, 76, 192).to_string(), "#3b4cc0");
    }

    #[test]
    fn log_scale_treats_non_positive_as_missing() {
        let scale = ColorScale::log1p([0.0, 10.0, 1_000.0, -5.0]);
        assert_eq!(scale.fill(Some(0.0)), MISSING_FILL);
        assert_eq!(scale.fill(Some(-5.0)), MISSING_FILL);
        assert_eq!(scale.fill(None), MISSING_FILL);
        assert_eq!(scale.fill(Some(10.0)), ramp_color(0.0));
        assert_eq!(scale.fill(Some(1_000.0)), ramp_color(1.0));
    }

    #[test]
    fn flat_scales_use_the_middle() {
        let scale = ColorScale::linear([42.0]);
        assert_eq!(scale.fill(Some(42.0)), ramp_color(0.5));
        let empty = ColorScale::linear(std::iter::empty());
        assert_eq!(empty.fill(Some(1.0)), ramp_color(0.5));
    }
}
