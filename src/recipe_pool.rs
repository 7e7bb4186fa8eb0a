use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{debug, warn};

use crate::config::PoolConfig;
use crate::data::CodeRecipe;
use crate::hash::stable_hash_str;
use crate::metrics::PoolStats;
use crate::pool::SamplingPool;
use crate::source::RecipeSource;

/// Load state of the recipe collection.
enum SourceState {
    /// The source has not been asked for its recipes yet.
    Unloaded,
    /// Recipes are cached for the owner's lifetime.
    Loaded(SamplingPool<CodeRecipe>),
}

/// Owns a recipe source and the sampling pool built from it.
///
/// The source is loaded once, on first use, and every draw runs under a
/// single lock so refills and removals never interleave.
pub struct RecipePool {
    source: Box<dyn RecipeSource + 'static>,
    config: PoolConfig,
    state: Mutex<SourceState>,
}

impl RecipePool {
    /// Create a pool over `source`. Nothing is loaded until the first draw.
    pub fn new(source: Box<dyn RecipeSource + 'static>, config: PoolConfig) -> Self {
        Self {
            source,
            config,
            state: Mutex::new(SourceState::Unloaded),
        }
    }

    /// Identifier of the backing source.
    pub fn source_id(&self) -> &str {
        self.source.id()
    }

    /// Return up to `count` distinct recipes.
    ///
    /// `0` yields an empty batch without touching the source. Requests larger
    /// than the number of distinct recipes are capped to that number.
    pub fn draw(&self, count: usize) -> Vec<CodeRecipe> {
        if count == 0 {
            warn!(
                source_id = self.source.id(),
                "draw requested zero recipes; returning an empty batch"
            );
            return Vec::new();
        }
        let mut state = self.state.lock().expect("recipe pool poisoned");
        self.ensure_loaded(&mut state).draw(count)
    }

    /// Load the source now (if needed) and return the number of recipes cached.
    pub fn warm_up(&self) -> usize {
        let mut state = self.state.lock().expect("recipe pool poisoned");
        self.ensure_loaded(&mut state).source_len()
    }

    /// Perform the one-time load on a background thread.
    ///
    /// The handle resolves to the number of recipes cached. Draws issued while
    /// the load runs wait on the same lock and observe the loaded collection.
    pub fn preload_in_background(self: Arc<Self>) -> thread::JoinHandle<usize> {
        thread::spawn(move || self.warm_up())
    }

    /// Returns `true` once the source has been loaded.
    pub fn is_loaded(&self) -> bool {
        let state = self.state.lock().expect("recipe pool poisoned");
        matches!(*state, SourceState::Loaded(_))
    }

    /// Snapshot of sampling counters; all zero before the first load.
    pub fn stats(&self) -> PoolStats {
        let state = self.state.lock().expect("recipe pool poisoned");
        match &*state {
            SourceState::Unloaded => PoolStats::default(),
            SourceState::Loaded(pool) => pool.stats(),
        }
    }

    fn ensure_loaded<'a>(&self, state: &'a mut SourceState) -> &'a mut SamplingPool<CodeRecipe> {
        if let SourceState::Unloaded = state {
            *state = SourceState::Loaded(SamplingPool::new(self.load_source(), self.rng()));
        }
        match state {
            SourceState::Loaded(pool) => pool,
            SourceState::Unloaded => unreachable!("recipe pool state was just loaded"),
        }
    }

    fn load_source(&self) -> Vec<CodeRecipe> {
        match self.source.load_all() {
            Ok(recipes) => {
                debug!(
                    source_id = self.source.id(),
                    recipes = recipes.len(),
                    "recipe source loaded"
                );
                recipes
            }
            Err(err) => {
                warn!(
                    source_id = self.source.id(),
                    error = %err,
                    "recipe source failed to load; continuing with an empty collection"
                );
                Vec::new()
            }
        }
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(stable_hash_str(seed, self.source.id())),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PoolError;
    use crate::source::InMemorySource;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that counts how often it is asked to load.
    struct CountingSource {
        loads: Arc<AtomicUsize>,
        recipes: Vec<CodeRecipe>,
    }

    impl RecipeSource for CountingSource {
        fn id(&self) -> &str {
            "counting"
        }

        fn load_all(&self) -> Result<Vec<CodeRecipe>, PoolError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(self.recipes.clone())
        }
    }

    /// Source whose load always fails.
    struct FailingSource;

    impl RecipeSource for FailingSource {
        fn id(&self) -> &str {
            "failing"
        }

        fn load_all(&self) -> Result<Vec<CodeRecipe>, PoolError> {
            Err(PoolError::SourceUnavailable {
                source_id: "failing".into(),
                reason: "asset bundle missing".into(),
            })
        }
    }

    fn recipes(count: usize) -> Vec<CodeRecipe> {
        (0..count)
            .map(|idx| CodeRecipe::new(format!("recipe {idx}"), "kotlin", "", "body"))
            .collect()
    }

    #[test]
    fn source_is_loaded_once_lazily() {
        let loads = Arc::new(AtomicUsize::new(0));
        let pool = RecipePool::new(
            Box::new(CountingSource {
                loads: Arc::clone(&loads),
                recipes: recipes(5),
            }),
            PoolConfig::default().with_seed(1),
        );
        assert!(!pool.is_loaded());
        assert_eq!(loads.load(Ordering::SeqCst), 0);

        for _ in 0..4 {
            assert_eq!(pool.draw(2).len(), 2);
        }
        assert!(pool.is_loaded());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(pool.warm_up(), 5);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_draw_returns_empty_and_leaves_stats_untouched() {
        let pool = RecipePool::new(
            Box::new(InMemorySource::from_recipes(recipes(3))),
            PoolConfig::default(),
        );
        assert!(pool.draw(0).is_empty());
        assert_eq!(pool.stats(), PoolStats::default());
    }

    #[test]
    fn zero_draw_does_not_load_the_source() {
        let loads = Arc::new(AtomicUsize::new(0));
        let pool = RecipePool::new(
            Box::new(CountingSource {
                loads: Arc::clone(&loads),
                recipes: recipes(3),
            }),
            PoolConfig::default(),
        );
        assert!(pool.draw(0).is_empty());
        assert!(!pool.is_loaded());
        assert_eq!(loads.load(Ordering::SeqCst), 0);

        assert_eq!(pool.draw(1).len(), 1);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn seed_is_hashed_with_the_source_id() {
        let pool = RecipePool::new(
            Box::new(InMemorySource::new("assets", recipes(8))),
            PoolConfig::default().with_seed(9),
        );
        let mut expected = SamplingPool::new(
            recipes(8),
            StdRng::seed_from_u64(stable_hash_str(9, "assets")),
        );
        for _ in 0..4 {
            assert_eq!(pool.draw(3), expected.draw(3));
        }
    }

    #[test]
    fn failed_load_behaves_as_empty_collection() {
        let pool = RecipePool::new(Box::new(FailingSource), PoolConfig::default());
        assert!(pool.draw(3).is_empty());
        assert!(pool.is_loaded());
        assert!(pool.draw(1).is_empty());
        assert_eq!(pool.warm_up(), 0);
        assert_eq!(pool.stats().refills, 0);
    }

    #[test]
    fn seeded_pools_with_same_source_id_agree() {
        let left = RecipePool::new(
            Box::new(InMemorySource::new("assets", recipes(8))),
            PoolConfig::default().with_seed(9),
        );
        let right = RecipePool::new(
            Box::new(InMemorySource::new("assets", recipes(8))),
            PoolConfig::default().with_seed(9),
        );
        for _ in 0..6 {
            assert_eq!(left.draw(3), right.draw(3));
        }
        assert_eq!(left.source_id(), "assets");
    }

    #[test]
    fn background_preload_populates_before_draws() {
        let pool = Arc::new(RecipePool::new(
            Box::new(InMemorySource::from_recipes(recipes(4))),
            PoolConfig::default(),
        ));
        let handle = Arc::clone(&pool).preload_in_background();
        assert_eq!(handle.join().unwrap(), 4);
        assert!(pool.is_loaded());

        let first: HashSet<_> = pool.draw(2).into_iter().collect();
        let second: HashSet<_> = pool.draw(2).into_iter().collect();
        assert!(first.is_disjoint(&second));
    }

    #[test]
    fn concurrent_draws_keep_batches_distinct() {
        let pool = Arc::new(RecipePool::new(
            Box::new(InMemorySource::from_recipes(recipes(6))),
            PoolConfig::default().with_seed(3),
        ));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for _ in 0..25 {
                        let batch = pool.draw(4);
                        let unique: HashSet<_> = batch.iter().collect();
                        assert_eq!(unique.len(), batch.len());
                        assert_eq!(batch.len(), 4);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let stats = pool.stats();
        assert_eq!(stats.draws, 100);
        assert_eq!(stats.dispensed, 400);
    }
}
