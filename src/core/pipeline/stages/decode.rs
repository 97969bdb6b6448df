use crate::common::SimError;
use crate::core::pipeline::engine::Controller;
use crate::core::pipeline::signals::KillPos;
use crate::isa::{self, Instruction, OpKind};

impl Controller {
    /// Decode the raw word `ID` latched last cycle, read its source
    /// registers directly out of the register file (seeing whatever
    /// `writeback_stage` just committed this same cycle), and resolve
    /// control flow that is known at decode time: `JAL` is always taken,
    /// and conditional branches consult the predictor.
    pub(crate) fn decode_stage(&mut self, fetched: Option<(u32, u32)>) -> Result<(), SimError> {
        let Some((pc, word)) = fetched else {
            self.id_ex.slot = None;
            return Ok(());
        };

        let mut inst = match isa::decode(pc, word) {
            Ok(inst) => inst,
            Err(err) => {
                if self.config.noassert {
                    Instruction::bubble()
                } else {
                    return Err(err);
                }
            }
        };

        inst.rs1v = self.regs.read(inst.rs1);
        inst.rs2v = self.regs.read(inst.rs2);

        if inst.kind == OpKind::Jal {
            self.pc.write(pc.wrapping_add(inst.imm as u32));
            self.kill.set(KillPos::Id);
        } else if inst.kind.is_branch() {
            let predicted = self.predictor.predict(pc);
            inst.predicted_taken = predicted;
            if predicted {
                self.pc.write(pc.wrapping_add(inst.imm as u32));
                self.kill.set(KillPos::Id);
            }
        }

        self.id_ex.slot = Some(inst);
        Ok(())
    }
}
