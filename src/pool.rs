//! Unique random sampling over a fixed source collection.
//!
//! A `SamplingPool` hands out batches of distinct values from a shuffled
//! working queue. The queue is consumed from the front and topped up by
//! appending a freshly shuffled copy of the whole source, so every value is
//! dispensed once before any value repeats (for sources without duplicates).

use indexmap::IndexSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::metrics::PoolStats;

/// Shuffled working queue plus the immutable source it is refilled from.
pub struct SamplingPool<T> {
    source: Arc<[T]>,
    pending: VecDeque<T>,
    distinct: usize,
    rng: StdRng,
    stats: PoolStats,
}

impl<T: Clone + Eq + Hash> SamplingPool<T> {
    /// Create an empty pool over `source`. Nothing is shuffled until the first draw.
    pub fn new(source: impl Into<Arc<[T]>>, rng: StdRng) -> Self {
        let source = source.into();
        let distinct = source.iter().collect::<HashSet<_>>().len();
        Self {
            source,
            pending: VecDeque::new(),
            distinct,
            rng,
            stats: PoolStats::default(),
        }
    }

    /// Return up to `count` pairwise distinct values.
    ///
    /// Requests above the number of distinct source values are capped to that
    /// number. Result order is the order values were collected.
    pub fn draw(&mut self, count: usize) -> Vec<T> {
        if count == 0 {
            warn!("draw requested zero items; returning an empty batch");
            return Vec::new();
        }
        let target = count.min(self.distinct);
        self.stats.draws = self.stats.draws.saturating_add(1);
        if target < count {
            self.stats.capped_draws = self.stats.capped_draws.saturating_add(1);
            warn!(
                requested = count,
                distinct = self.distinct,
                "draw request exceeds distinct values; capping batch"
            );
        }
        if target == 0 {
            return Vec::new();
        }

        if self.pending.len() < target {
            self.refill();
        }

        let mut collected: IndexSet<T> = IndexSet::with_capacity(target);
        // Consecutive pops that yielded an already-collected value.
        let mut misses = 0usize;
        let mut requeued = 0u64;
        while collected.len() < target {
            let Some(item) = self.pending.pop_front() else {
                self.refill();
                continue;
            };
            if collected.contains(&item) {
                self.pending.push_back(item);
                requeued += 1;
                misses += 1;
                // Every pending value is already collected: only a refill can progress.
                if misses >= self.pending.len() {
                    self.refill();
                    misses = 0;
                }
                continue;
            }
            collected.insert(item);
            misses = 0;
        }
        if requeued > 0 {
            self.stats.requeues = self.stats.requeues.saturating_add(requeued);
            info!(
                requeued,
                wanted = target,
                pending = self.pending.len(),
                "duplicate values drawn within one batch; requeued at back"
            );
        }

        self.stats.dispensed = self.stats.dispensed.saturating_add(target as u64);
        collected.into_iter().collect()
    }

    fn refill(&mut self) {
        // Keeps the queue within twice the source size.
        if self.pending.len() >= self.source.len() {
            self.trim_surplus();
        }
        let mut fresh = self.source.to_vec();
        fresh.shuffle(&mut self.rng);
        let leftover = self.pending.len();
        self.pending.extend(fresh);
        self.stats.refills = self.stats.refills.saturating_add(1);
        debug!(
            leftover,
            appended = self.source.len(),
            pending = self.pending.len(),
            "refilled sampling pool with reshuffled source"
        );
    }

    /// Drop pending copies beyond each value's multiplicity in the source.
    ///
    /// Front copies are kept, so leftovers still come out first.
    fn trim_surplus(&mut self) {
        let mut allowed: HashMap<&T, usize> = HashMap::new();
        for value in self.source.iter() {
            *allowed.entry(value).or_default() += 1;
        }
        let before = self.pending.len();
        self.pending.retain(|item| match allowed.get_mut(item) {
            Some(left) if *left > 0 => {
                *left -= 1;
                true
            }
            _ => false,
        });
        let dropped = before - self.pending.len();
        if dropped > 0 {
            self.stats.trimmed = self.stats.trimmed.saturating_add(dropped as u64);
            debug!(
                dropped,
                pending = self.pending.len(),
                "dropped surplus duplicate copies from sampling pool"
            );
        }
    }

    /// Number of values waiting in the working queue.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Size of the source collection, duplicates included.
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    /// Number of distinct values in the source collection.
    pub fn distinct_len(&self) -> usize {
        self.distinct
    }

    /// Snapshot of the running counters.
    pub fn stats(&self) -> PoolStats {
        self.stats.clone()
    }
}
