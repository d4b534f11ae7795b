/// Source of uniform randomness injected into every randomized scene parameter.
///
/// Production code uses [`Rng64`]; tests substitute [`ConstRandom`] to pin every draw.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_f64_01(&mut self) -> f64;

    /// Uniform sample in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64_01()
    }

    /// Uniform sample in `[-span / 2, span / 2)`.
    fn centered(&mut self, span: f64) -> f64 {
        (self.next_f64_01() - 0.5) * span
    }

    /// Fair coin.
    fn coin(&mut self) -> bool {
        self.next_f64_01() > 0.5
    }

    /// Uniform index in `0..len` (`len` must be non-zero).
    fn pick_index(&mut self, len: usize) -> usize {
        let i = (self.next_f64_01() * len as f64).floor() as usize;
        i.min(len.saturating_sub(1))
    }
}

/// SplitMix64 generator: small, seedable, deterministic.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Seeded generator.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for Rng64 {
    fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

/// Returns the same value for every draw. Values outside `[0, 1)` are clamped.
#[derive(Clone, Copy, Debug)]
pub struct ConstRandom(pub f64);

impl RandomSource for ConstRandom {
    fn next_f64_01(&mut self) -> f64 {
        if self.0.is_finite() {
            self.0.clamp(0.0, 1.0 - f64::EPSILON)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
