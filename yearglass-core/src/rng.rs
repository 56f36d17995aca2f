use embassy_time::Instant;

// Linear congruential generator, glibc constants. Good enough for picking a
// display mode; nothing here needs real entropy.
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Seed from the monotonic clock.
    pub fn new() -> Self {
        let micros = Instant::now().as_micros();
        let seed = ((micros / 1_000) as u32)
            .wrapping_mul(1_103_515_245)
            .wrapping_add((micros % 1_000_000) as u32);
        Lcg { state: seed }
    }

    pub fn with_seed(seed: u32) -> Self {
        Lcg { state: seed }
    }

    pub fn next(&mut self) -> u32 {
        const A: u32 = 1_103_515_245;
        const C: u32 = 12_345;
        self.state = A.wrapping_mul(self.state).wrapping_add(C);
        self.state
    }

    /// Uniform-ish index in `0..max`.
    pub fn next_index(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next() as usize) % max
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new()
    }
}
