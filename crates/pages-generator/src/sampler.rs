//! Envelope-weighted rejection sampler.

use pages_spec::SamplerConfig;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::envelope::Envelope;
use crate::error::GenerateError;
use crate::rng::create_component_rng;

/// Draws numbers whose distribution follows a likelihood envelope.
///
/// A candidate is drawn uniformly from `[0, span)` and accepted with probability
/// `envelope.value_at(candidate)`; accepted candidates are returned shifted by
/// `offset`.
///
/// The loop has no iteration bound. Callers must hand in an envelope that is
/// positive somewhere over its span, otherwise [`sample`](Self::sample) never
/// returns. Config validation rejects such envelopes up front.
#[derive(Debug, Clone)]
pub struct WeightedRandomSampler {
    envelope: Envelope,
    offset: f64,
    rng: Pcg32,
}

impl WeightedRandomSampler {
    /// Creates a sampler owning `rng`.
    pub fn new(envelope: Envelope, offset: f64, rng: Pcg32) -> Result<Self, GenerateError> {
        if envelope.duration() <= 0.0 {
            return Err(GenerateError::invalid_envelope(
                "likelihood envelope must span a positive range",
            ));
        }
        if !offset.is_finite() {
            return Err(GenerateError::invalid_parameter(format!(
                "sampler offset must be finite, got {}",
                offset
            )));
        }
        Ok(Self {
            envelope,
            offset,
            rng,
        })
    }

    /// Creates a sampler from its config, seeding it explicitly or from the
    /// run seed and `key`.
    pub fn from_config(
        config: &SamplerConfig,
        base_seed: u32,
        key: &str,
    ) -> Result<Self, GenerateError> {
        let envelope = Envelope::new(config.envelope.clone())?;
        let rng = create_component_rng(config.seed, base_seed, key);
        Self::new(envelope, config.offset, rng)
    }

    /// The likelihood envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// The constant added to accepted candidates.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Draws one value.
    pub fn sample(&mut self) -> f64 {
        let span = self.envelope.duration();
        let start = self.envelope.start();
        loop {
            let candidate = self.rng.gen_range(0.0..span);
            let likelihood = self.envelope.value_at(start + candidate);
            if self.rng.gen::<f64>() < likelihood {
                return candidate + self.offset;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn test_samples_stay_in_span_plus_offset() {
        let envelope = Envelope::linear(&[(0.0, 1.0), (18.0, 0.7)]).unwrap();
        let mut sampler = WeightedRandomSampler::new(envelope, 10.0, create_rng(3)).unwrap();
        for _ in 0..1000 {
            let value = sampler.sample();
            assert!((10.0..28.0).contains(&value), "out of range: {value}");
        }
    }

    #[test]
    fn test_identical_seeds_reproduce() {
        let envelope = Envelope::linear(&[(0.0, 0.2), (1.0, 1.0)]).unwrap();
        let mut a = WeightedRandomSampler::new(envelope.clone(), 0.0, create_rng(10)).unwrap();
        let mut b = WeightedRandomSampler::new(envelope, 0.0, create_rng(10)).unwrap();
        let xs: Vec<f64> = (0..50).map(|_| a.sample()).collect();
        let ys: Vec<f64> = (0..50).map(|_| b.sample()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_zero_regions_never_sampled() {
        // Likelihood is zero on [0.5, 1].
        let envelope = Envelope::linear(&[(0.0, 1.0), (0.5, 0.0), (1.0, 0.0)]).unwrap();
        let mut sampler = WeightedRandomSampler::new(envelope, 0.0, create_rng(5)).unwrap();
        for _ in 0..1000 {
            assert!(sampler.sample() < 0.5);
        }
    }

    #[test]
    fn test_likelihood_biases_distribution() {
        let envelope = Envelope::linear(&[(0.0, 0.05), (1.0, 1.0)]).unwrap();
        let mut sampler = WeightedRandomSampler::new(envelope, 0.0, create_rng(11)).unwrap();
        let high = (0..4000).filter(|_| sampler.sample() > 0.5).count();
        assert!(high > 2400, "expected a bias toward high values, got {high}/4000");
    }

    #[test]
    fn test_rejects_degenerate_envelope() {
        let envelope = Envelope::linear(&[(0.0, 1.0)]).unwrap();
        assert!(WeightedRandomSampler::new(envelope, 0.0, create_rng(1)).is_err());
    }

    #[test]
    fn test_from_config_uses_explicit_seed() {
        let config = SamplerConfig::from_points(&[(0.0, 1.0), (1.0, 1.0)], 2.0).with_seed(99);
        let mut a = WeightedRandomSampler::from_config(&config, 1, "a").unwrap();
        let mut b = WeightedRandomSampler::from_config(&config, 2, "b").unwrap();
        assert_eq!(a.sample(), b.sample());
        assert_eq!(a.offset(), 2.0);
    }
}
