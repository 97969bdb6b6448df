use crate::core::pipeline::engine::Controller;
use crate::isa::Instruction;

impl Controller {
    /// Commit `retiring`'s register write — the instruction that was
    /// sitting in `MEM/WB` *before* this cycle's latches shifted — then
    /// tick the register file. Ticking here, rather than at the end of the
    /// cycle, is what lets `decode_stage` (called right after this) read a
    /// same-cycle write straight out of the register file instead of
    /// needing a third forwarding path.
    pub(crate) fn writeback_stage(&mut self, retiring: Option<Instruction>) {
        if let Some(inst) = retiring {
            if inst.kind.writes_rd() && inst.rd != 0 {
                self.regs.write(inst.rd, inst.rdv);
            }
            self.stats.record_retirement(inst.kind);
        }
        self.regs.tick();
    }
}
