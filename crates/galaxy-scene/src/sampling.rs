//! Uniform sampling helpers shared by the entity factories.

use rand::Rng;

use crate::color::Rgba;
use crate::error::SceneError;

/// Half-open interval `[min, max)` sampled as `min + U * (max - min)`.
///
/// `min == max` is legal and always yields `min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRange {
    pub min: f32,
    pub max: f32,
}

impl SampleRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draw one value. Never returns `max` when `min < max`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let value = self.min + rng.random::<f32>() * (self.max - self.min);
        // f32 rounding can land exactly on the upper bound.
        if self.min < self.max && value >= self.max {
            next_below(self.max).max(self.min)
        } else {
            value
        }
    }

    /// Whether `value` lies in `[min, max)`, or equals `min` for a degenerate range.
    pub fn contains(&self, value: f32) -> bool {
        if self.min == self.max {
            value == self.min
        } else {
            value >= self.min && value < self.max
        }
    }
}

impl From<(f32, f32)> for SampleRange {
    fn from((min, max): (f32, f32)) -> Self {
        Self::new(min, max)
    }
}

/// Largest f32 strictly below `x` (finite `x` only).
fn next_below(x: f32) -> f32 {
    if x == 0.0 {
        -f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

/// Colors picked uniformly by index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    pub fn new(colors: Vec<Rgba>) -> Self {
        Self { colors }
    }

    /// Parse CSS hex strings into a palette.
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, SceneError> {
        let colors = hex
            .iter()
            .map(|c| Rgba::from_hex(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(colors))
    }

    /// A uniformly chosen color, or `None` for an empty palette.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Rgba> {
        let index = (rng.random::<f32>() * self.colors.len() as f32) as usize;
        self.colors.get(index.min(self.colors.len().saturating_sub(1))).copied()
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_samples_stay_in_half_open_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let range = SampleRange::new(1.0, 3.0);
        for _ in 0..10_000 {
            let v = range.sample(&mut rng);
            assert!(range.contains(v), "{v} escaped [1, 3)");
        }
    }

    #[test]
    fn test_negative_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let range = SampleRange::new(-0.01, 0.01);
        let values: Vec<f32> = (0..1000).map(|_| range.sample(&mut rng)).collect();
        assert!(values.iter().all(|v| range.contains(*v)));
        assert!(values.iter().any(|v| *v < 0.0));
        assert!(values.iter().any(|v| *v > 0.0));
    }

    #[test]
    fn test_degenerate_range_is_constant() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let range = SampleRange::new(4.5, 4.5);
        for _ in 0..100 {
            assert_eq!(range.sample(&mut rng), 4.5);
        }
    }

    #[test]
    fn test_next_below() {
        assert!(next_below(3.0) < 3.0);
        assert!(next_below(-3.0) < -3.0);
        assert!(next_below(0.0) < 0.0);
        assert_eq!(next_below(1.0), 1.0 - f32::EPSILON / 2.0);
    }

    #[test]
    fn test_empty_palette_picks_nothing() {
        let palette = Palette::from_hex::<&str>(&[]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(palette.is_empty());
        assert_eq!(palette.pick(&mut rng), None);
    }

    #[test]
    fn test_palette_pick_covers_every_color() {
        let palette = Palette::from_hex(&["#f00", "#0f0", "#00f"]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let c = palette.pick(&mut rng).unwrap();
            let idx = palette.colors().iter().position(|p| *p == c).unwrap();
            seen[idx] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_palette_propagates_bad_color() {
        let err = Palette::from_hex(&["#f0a", "nope"]).unwrap_err();
        assert_eq!(err, SceneError::InvalidColor("nope".to_string()));
    }
}
