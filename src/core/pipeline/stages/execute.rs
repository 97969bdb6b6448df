use crate::core::pipeline::engine::Controller;
use crate::core::pipeline::signals::KillPos;
use crate::isa::OpKind;

impl Controller {
    /// Run the ALU/address/branch datapath on whatever just latched into
    /// `EX`, then resolve the control flow decode couldn't: `JALR` always
    /// redirects, and a conditional branch's actual outcome is compared
    /// against the prediction made for it at decode — a match needs no
    /// correction, a mismatch redirects and flushes `IF`/`ID`.
    pub(crate) fn execute_stage(&mut self) {
        let Some(mut inst) = self.ex_mem.slot else {
            return;
        };

        inst.execute();

        if inst.kind == OpKind::Jalr {
            self.pc.write(inst.pcv);
            self.kill.set(KillPos::Ex);
        } else if inst.kind.is_branch() {
            self.predictor.update(inst.pc, inst.cond);
            self.stats.record_prediction(inst.cond == inst.predicted_taken);
            if inst.cond != inst.predicted_taken {
                let target = if inst.cond { inst.pcv } else { inst.pc.wrapping_add(4) };
                self.pc.write(target);
                self.kill.set(KillPos::Ex);
            }
        }

        self.ex_mem.slot = Some(inst);
    }
}
