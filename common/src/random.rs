use rand::{Rng, SeedableRng, rngs::StdRng, rngs::ThreadRng};

pub trait RandomSource {
    // True with probability 1 - threshold.
    fn biased_bool(&mut self, threshold: f64) -> bool;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn biased_bool(&mut self, threshold: f64) -> bool {
        (**self).biased_bool(threshold)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn biased_bool(&mut self, threshold: f64) -> bool {
        (**self).biased_bool(threshold)
    }
}

pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn biased_bool(&mut self, threshold: f64) -> bool {
        self.rng.random::<f64>() > threshold
    }
}

pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn biased_bool(&mut self, threshold: f64) -> bool {
        self.rng.random::<f64>() > threshold
    }
}
