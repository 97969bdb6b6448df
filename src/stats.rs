//! Simulation statistics: cycle/instruction counts, instruction mix, stall
//! breakdown, and branch prediction accuracy. Pared down from the
//! reference's full SoC statistics (no caches, no privilege levels — this
//! simulator has neither) but keeping its reporting shape.

use std::time::Instant;

use crate::isa::OpKind;

/// Running counters updated once per cycle by the pipeline controller.
#[derive(Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Total cycles elapsed.
    pub cycles: u64,
    /// Instructions that reached `WB` and committed.
    pub instructions_retired: u64,

    /// Retired ALU (R-type/I-type-ALU/LUI/AUIPC) instructions.
    pub inst_alu: u64,
    /// Retired loads.
    pub inst_load: u64,
    /// Retired stores.
    pub inst_store: u64,
    /// Retired branches.
    pub inst_branch: u64,
    /// Retired `JAL`/`JALR`.
    pub inst_jump: u64,

    /// Cycles a bubble was inserted due to a load-use hazard.
    pub stalls_data: u64,
    /// Cycles spent blocked on the 3-cycle memory access latency.
    pub stalls_mem: u64,
    /// Cycles lost to a flushed (killed) instruction slot.
    pub flushes: u64,

    /// Branch/`JALR` predictions that matched the resolved outcome.
    pub branch_correct: u64,
    /// Branch/`JALR` predictions that did not match the resolved outcome.
    pub branch_mispredicts: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_jump: 0,
            stalls_data: 0,
            stalls_mem: 0,
            flushes: 0,
            branch_correct: 0,
            branch_mispredicts: 0,
        }
    }
}

impl SimStats {
    /// Bump the instruction-mix and retirement counters for an instruction
    /// that just committed in `WB`.
    pub fn record_retirement(&mut self, kind: OpKind) {
        self.instructions_retired += 1;
        if kind.is_load() {
            self.inst_load += 1;
        } else if kind.is_store() {
            self.inst_store += 1;
        } else if kind.is_branch() {
            self.inst_branch += 1;
        } else if matches!(kind, OpKind::Jal | OpKind::Jalr) {
            self.inst_jump += 1;
        } else {
            self.inst_alu += 1;
        }
    }

    /// Bump the misprediction counters for a resolved branch or `JALR`.
    pub fn record_prediction(&mut self, correct: bool) {
        if correct {
            self.branch_correct += 1;
        } else {
            self.branch_mispredicts += 1;
        }
    }

    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let bp_total = self.branch_correct + self.branch_mispredicts;
        let bp_acc = if bp_total > 0 {
            100.0 * (self.branch_correct as f64 / bp_total as f64)
        } else {
            0.0
        };
        println!("==========================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", instr / cyc);
        println!("sim_cpi                  {:.4}", cyc / instr);
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        println!("  op.alu                 {}", self.inst_alu);
        println!("  op.load                {}", self.inst_load);
        println!("  op.store               {}", self.inst_store);
        println!("  op.branch              {}", self.inst_branch);
        println!("  op.jump                {}", self.inst_jump);
        println!("----------------------------------------------------------");
        println!("STALLS");
        println!("  data                   {}", self.stalls_data);
        println!("  memory                 {}", self.stalls_mem);
        println!("  flushed_slots          {}", self.flushes);
        println!("----------------------------------------------------------");
        println!("BRANCH PREDICTION");
        println!("  lookups                {bp_total}");
        println!("  mispredicts            {}", self.branch_mispredicts);
        println!("  accuracy               {bp_acc:.2}%");
        println!("==========================================================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retirement_buckets_by_category() {
        let mut s = SimStats::default();
        s.record_retirement(OpKind::Add);
        s.record_retirement(OpKind::Lw);
        s.record_retirement(OpKind::Sw);
        s.record_retirement(OpKind::Beq);
        s.record_retirement(OpKind::Jal);
        assert_eq!(s.instructions_retired, 5);
        assert_eq!(s.inst_alu, 1);
        assert_eq!(s.inst_load, 1);
        assert_eq!(s.inst_store, 1);
        assert_eq!(s.inst_branch, 1);
        assert_eq!(s.inst_jump, 1);
    }

    #[test]
    fn prediction_accuracy_tracks_hits_and_misses() {
        let mut s = SimStats::default();
        s.record_prediction(true);
        s.record_prediction(true);
        s.record_prediction(false);
        assert_eq!(s.branch_correct, 2);
        assert_eq!(s.branch_mispredicts, 1);
    }
}
