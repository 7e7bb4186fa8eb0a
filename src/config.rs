/// Top-level sampling pool configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolConfig {
    /// Optional RNG seed; `None` draws entropy from the operating system.
    ///
    /// With a seed, the shuffle order is reproducible for a given source id.
    pub seed: Option<u64>,
}

impl PoolConfig {
    /// Use a fixed seed for reproducible shuffles.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
