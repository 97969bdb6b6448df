use crate::common::SimError;
use crate::core::pipeline::engine::{Controller, PendingAccess};
use crate::core::pipeline::signals::StallPos;

impl Controller {
    /// Buffer a load or store across its fixed access latency. The first
    /// cycle a memory op reaches `MEM` it is stashed in `pending_access`
    /// and a stall is raised that freezes everything at or before `MEM`
    /// (including `EX`, so the instruction itself stays put in `ex_mem`);
    /// every cycle after that the latch count ticks down with `MEM/WB`
    /// fed a bubble, until the final cycle actually performs the access
    /// and lets the result flow into `MEM/WB`.
    pub(crate) fn mem_access_stage(&mut self) -> Result<(), SimError> {
        if self.pending_access.is_none() {
            if let Some(inst) = self.ex_mem.slot {
                if inst.kind.is_memory_op() {
                    self.pending_access = Some(PendingAccess {
                        inst,
                        remaining: self.config.mem_latency_cycles,
                    });
                }
            }
        }

        let Some(pending) = self.pending_access.as_mut() else {
            return Ok(());
        };

        pending.remaining = pending.remaining.saturating_sub(1);

        if pending.remaining > 0 {
            self.stats.stalls_mem += 1;
            // `+ 1`: `Controller::tick`'s Phase 4 calls `stall.count_down()`
            // once every cycle, including this one, right after this stall
            // is (re-)armed here. Passing `pending.remaining` unadjusted
            // would let that same-cycle `count_down` double-decrement it,
            // clearing the stall — and unblocking `EX` — one cycle before
            // the buffered access actually completes.
            self.stall.set(StallPos::Mem, pending.remaining + 1, false);
            self.mem_wb.slot = None;
            return Ok(());
        }

        let mut inst = pending.inst;
        inst.access_memory(&mut self.memory)?;
        self.mem_wb.slot = Some(inst);
        self.pending_access = None;
        Ok(())
    }
}
