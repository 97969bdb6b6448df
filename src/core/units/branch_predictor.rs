//! Two-level adaptive branch predictor: a per-PC 2-bit local history
//! selects into a table of 2-bit saturating counters. Ported directly
//! from the reference `TwoLevelAdaptivePredictor<N>` (with `N =
//! HISTORY_BITS`), not from any teacher in the retrieval pack — the
//! teacher's predictor is a perceptron with a BTB/RAS sized for a full
//! RV64 system, which this ISA subset's simpler branch-only speculation
//! doesn't call for.

/// A single 2-bit saturating counter, packed as a `u8` in `[0, 3]`.
#[derive(Debug, Clone, Copy, Default)]
struct SaturatingCounter(u8);

impl SaturatingCounter {
    fn predict(self) -> bool {
        self.0 >= 2
    }

    fn report(&mut self, taken: bool) {
        if taken {
            self.0 = self.0.saturating_add(1).min(3);
        } else {
            self.0 = self.0.saturating_sub(1);
        }
    }
}

/// The predictor the pipeline controller owns. Disabled
/// ([`Config::use_adaptive_predictor`](crate::config::Config) `= false`)
/// degrades to always predicting not-taken, per spec.
#[derive(Debug, Clone)]
pub struct BranchPredictor {
    counters: Vec<SaturatingCounter>,
    history: Vec<u8>,
    history_bits: u32,
    enabled: bool,
    hits: u64,
    total: u64,
}

impl BranchPredictor {
    pub fn new(memory_size: u32, history_bits: u32, enabled: bool) -> Self {
        // The reference indexes `counter[(pc << (N-2)) + history[pc>>2]]`
        // with `pc` the raw byte address; that formula can walk slightly
        // past `memory_size << (N-2)` for PCs in the last few instruction
        // slots. Padding the table by the maximum history value avoids an
        // out-of-bounds panic there without changing behavior anywhere else.
        let pad = 1usize << history_bits;
        let counter_len = ((memory_size as usize) << (history_bits.saturating_sub(2))) + pad;
        Self {
            counters: vec![SaturatingCounter::default(); counter_len],
            history: vec![0u8; (memory_size >> 2).max(1) as usize],
            history_bits,
            enabled,
            hits: 0,
            total: 0,
        }
    }

    fn history_slot(&self, pc: u32) -> usize {
        (pc as usize >> 2) % self.history.len()
    }

    fn entry_index(&self, pc: u32) -> usize {
        let hist = self.history[self.history_slot(pc)];
        let idx = ((pc as u64) << self.history_bits.saturating_sub(2)) + u64::from(hist);
        (idx as usize) % self.counters.len()
    }

    /// Consult the predictor for `pc`. Counts toward the hit-rate
    /// denominator.
    pub fn predict(&mut self, pc: u32) -> bool {
        self.total += 1;
        if !self.enabled {
            return false;
        }
        self.counters[self.entry_index(pc)].predict()
    }

    /// Report the actual outcome of the branch at `pc`, updating the
    /// counter and the local history. Must be called exactly once per
    /// resolved branch, and exactly once after the matching [`predict`](Self::predict)
    /// call for the same dynamic instance.
    pub fn update(&mut self, pc: u32, taken: bool) {
        if !self.enabled {
            if !taken {
                self.hits += 1;
            }
            return;
        }
        let idx = self.entry_index(pc);
        let predicted = self.counters[idx].predict();
        if predicted == taken {
            self.hits += 1;
        }
        self.counters[idx].report(taken);

        let slot = self.history_slot(pc);
        let mask = ((1u32 << self.history_bits) - 1) as u8;
        self.history[slot] = ((self.history[slot] << 1) | u8::from(taken)) & mask;
    }

    pub fn hit_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.hits as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_predictor_predicts_not_taken() {
        let mut p = BranchPredictor::new(0x1000, 2, true);
        assert!(!p.predict(0x100));
    }

    #[test]
    fn repeated_taken_outcomes_converge_to_taken_prediction() {
        let mut p = BranchPredictor::new(0x1000, 2, true);
        for _ in 0..4 {
            p.predict(0x40);
            p.update(0x40, true);
        }
        assert!(p.predict(0x40));
    }

    #[test]
    fn disabled_predictor_never_predicts_taken() {
        let mut p = BranchPredictor::new(0x1000, 2, false);
        for _ in 0..10 {
            assert!(!p.predict(0x40));
            p.update(0x40, true);
        }
    }

    #[test]
    fn counter_stays_within_bounds() {
        let mut p = BranchPredictor::new(0x1000, 2, true);
        for _ in 0..10 {
            p.update(0x40, false);
        }
        assert!(!p.predict(0x40));
        for _ in 0..10 {
            p.update(0x40, true);
        }
        assert!(p.predict(0x40));
    }
}
