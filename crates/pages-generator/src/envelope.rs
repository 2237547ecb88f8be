//! Piecewise curved envelopes.
//!
//! An [`Envelope`] is an ordered list of breakpoints. Between two breakpoints
//! the value moves from one to the other along the curve shape of the first
//! one; outside the breakpoints the value is held.

use pages_spec::Breakpoint;

use crate::error::GenerateError;

/// Immutable piecewise-curved function of position.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    points: Vec<Breakpoint>,
}

impl Envelope {
    /// Creates an envelope from breakpoints.
    ///
    /// Breakpoints must be non-empty, finite, and in ascending position order.
    /// Equal positions are allowed and produce a jump.
    pub fn new(points: Vec<Breakpoint>) -> Result<Self, GenerateError> {
        if points.is_empty() {
            return Err(GenerateError::invalid_envelope(
                "envelope needs at least one breakpoint",
            ));
        }
        if points
            .iter()
            .any(|p| !p.position.is_finite() || !p.value.is_finite() || !p.curve_shape.is_finite())
        {
            return Err(GenerateError::invalid_envelope(
                "breakpoints must be finite",
            ));
        }
        if points.windows(2).any(|w| w[1].position < w[0].position) {
            return Err(GenerateError::invalid_envelope(
                "breakpoint positions must be ascending",
            ));
        }
        Ok(Self { points })
    }

    /// Creates a linear envelope from `(position, value)` pairs.
    pub fn linear(pairs: &[(f64, f64)]) -> Result<Self, GenerateError> {
        Self::new(pairs.iter().map(|&(p, v)| Breakpoint::new(p, v)).collect())
    }

    /// The breakpoints in order.
    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Position of the first breakpoint.
    pub fn start(&self) -> f64 {
        self.points[0].position
    }

    /// Position of the last breakpoint.
    pub fn end(&self) -> f64 {
        self.points[self.points.len() - 1].position
    }

    /// Distance between the first and the last breakpoint.
    pub fn duration(&self) -> f64 {
        self.end() - self.start()
    }

    /// Returns a copy whose breakpoints are rescaled to span `duration`.
    ///
    /// The first breakpoint keeps its position. An envelope without extent is
    /// returned unchanged.
    pub fn with_duration(&self, duration: f64) -> Self {
        let current = self.duration();
        if current <= 0.0 {
            return self.clone();
        }
        let start = self.start();
        let factor = duration / current;
        let points = self
            .points
            .iter()
            .map(|p| Breakpoint::curved(start + (p.position - start) * factor, p.value, p.curve_shape))
            .collect();
        Self { points }
    }

    /// Evaluates the envelope at `position`.
    pub fn value_at(&self, position: f64) -> f64 {
        let first = &self.points[0];
        if position <= first.position {
            return first.value;
        }

        // Index of the first breakpoint strictly after `position`.
        let next = self.points.partition_point(|p| p.position <= position);
        if next >= self.points.len() {
            return self.points[self.points.len() - 1].value;
        }

        let from = &self.points[next - 1];
        let to = &self.points[next];
        let t = (position - from.position) / (to.position - from.position);
        interpolate(from.value, to.value, t, from.curve_shape)
    }
}

/// Moves from `start` to `end` as `t` goes from 0 to 1.
///
/// A curve shape of 0 is linear. Otherwise the progress follows
/// `(e^(shape * t) - 1) / (e^shape - 1)`.
pub fn interpolate(start: f64, end: f64, t: f64, curve_shape: f64) -> f64 {
    let progress = if curve_shape == 0.0 {
        t
    } else {
        (curve_shape * t).exp_m1() / curve_shape.exp_m1()
    };
    start + (end - start) * progress
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_linear_interpolation() {
        let envelope = Envelope::linear(&[(0.0, 0.0), (10.0, 5.0)]).unwrap();
        assert!(approx_eq(envelope.value_at(5.0), 2.5));
        assert!(approx_eq(envelope.value_at(2.0), 1.0));
    }

    #[test]
    fn test_values_held_outside_breakpoints() {
        let envelope = Envelope::linear(&[(1.0, 3.0), (2.0, 7.0)]).unwrap();
        assert_eq!(envelope.value_at(-5.0), 3.0);
        assert_eq!(envelope.value_at(2.0), 7.0);
        assert_eq!(envelope.value_at(100.0), 7.0);
    }

    #[test]
    fn test_curve_shape_biases_toward_start_or_end() {
        let slow = Envelope::new(vec![Breakpoint::curved(0.0, 0.0, 2.0), Breakpoint::new(1.0, 1.0)])
            .unwrap();
        let fast = Envelope::new(vec![Breakpoint::curved(0.0, 0.0, -2.0), Breakpoint::new(1.0, 1.0)])
            .unwrap();

        assert!(slow.value_at(0.5) < 0.5);
        assert!(fast.value_at(0.5) > 0.5);
        assert!(approx_eq(slow.value_at(0.5) + fast.value_at(0.5), 1.0));
        assert!(approx_eq(slow.value_at(1.0), 1.0));
    }

    #[test]
    fn test_curve_uses_outgoing_segment_shape() {
        let envelope = Envelope::new(vec![
            Breakpoint::new(0.0, 0.0),
            Breakpoint::curved(1.0, 1.0, 4.0),
            Breakpoint::new(2.0, 0.0),
        ])
        .unwrap();
        assert!(approx_eq(envelope.value_at(0.5), 0.5));
        assert!(envelope.value_at(1.5) > 0.5);
    }

    #[test]
    fn test_with_duration_rescales_positions() {
        let envelope = Envelope::linear(&[(0.0, 1.0), (5.0, 2.0), (10.0, 3.0)])
            .unwrap()
            .with_duration(1.0);
        let positions: Vec<f64> = envelope.points().iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);
        assert!(approx_eq(envelope.value_at(0.25), 1.5));
    }

    #[test]
    fn test_equal_positions_jump() {
        let envelope = Envelope::linear(&[(0.0, 0.0), (1.0, 1.0), (1.0, 5.0), (2.0, 5.0)]).unwrap();
        assert_eq!(envelope.value_at(1.0), 5.0);
        assert!(approx_eq(envelope.value_at(0.5), 0.5));
    }

    #[test]
    fn test_rejects_bad_breakpoints() {
        assert!(Envelope::new(vec![]).is_err());
        assert!(Envelope::linear(&[(1.0, 0.0), (0.0, 1.0)]).is_err());
        assert!(Envelope::linear(&[(0.0, f64::NAN)]).is_err());
    }
}
