//! Data hazard resolution: forwarding into `ID`, and detecting the one
//! hazard forwarding cannot fix (load-use).

use crate::isa::Instruction;

use super::latches::{ExMem, IdEx, MemWb};

/// Forward `EX`'s and `MEM`'s not-yet-committed results into `id_ex`'s
/// `rs1v`/`rs2v`, in place, before it latches into `EX` this cycle. `EX`
/// takes priority over `MEM` when both would apply, and a load in `EX`
/// never forwards (its result isn't computed until `MEM`).
pub fn forward(id_ex: &mut IdEx, ex_mem: &ExMem, mem_wb: &MemWb) {
    let Some(id) = id_ex.slot.as_mut() else {
        return;
    };
    if id.rs1 != 0 {
        id.rs1v = resolve(id.rs1, ex_mem, mem_wb).unwrap_or(id.rs1v);
    }
    if id.rs2 != 0 {
        id.rs2v = resolve(id.rs2, ex_mem, mem_wb).unwrap_or(id.rs2v);
    }
}

fn resolve(reg: u8, ex_mem: &ExMem, mem_wb: &MemWb) -> Option<u32> {
    if let Some(ex) = ex_mem.slot {
        if ex.rd == reg && ex.kind.writes_rd() && !ex.kind.is_load() {
            return Some(ex.rdv);
        }
    }
    if let Some(mem) = mem_wb.slot {
        if mem.rd == reg && mem.kind.writes_rd() {
            return Some(mem.rdv);
        }
    }
    None
}

/// Whether the instruction now sitting in `EX` is a load whose
/// destination the instruction now sitting in `ID` needs as a source —
/// the one hazard that must stall rather than forward, since the loaded
/// value isn't ready until `MEM`.
pub fn need_load_use_stall(ex: &Instruction, id: &Instruction) -> bool {
    ex.kind.is_load() && ex.rd != 0 && (ex.rd == id.rs1 || ex.rd == id.rs2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::OpKind;

    fn inst(kind: OpKind, rd: u8) -> Instruction {
        Instruction {
            kind,
            rd,
            ..Instruction::bubble()
        }
    }

    #[test]
    fn ex_producer_wins_over_mem_producer() {
        let mut id_ex = IdEx {
            slot: Some(Instruction {
                rs1: 5,
                rs2: 0,
                ..Instruction::bubble()
            }),
        };
        let ex_mem = ExMem {
            slot: Some(Instruction {
                rdv: 111,
                ..inst(OpKind::Add, 5)
            }),
        };
        let mem_wb = MemWb {
            slot: Some(Instruction {
                rdv: 222,
                ..inst(OpKind::Add, 5)
            }),
        };
        forward(&mut id_ex, &ex_mem, &mem_wb);
        assert_eq!(id_ex.slot.unwrap().rs1v, 111);
    }

    #[test]
    fn load_in_ex_does_not_forward() {
        let mut id_ex = IdEx {
            slot: Some(Instruction {
                rs1: 5,
                ..Instruction::bubble()
            }),
        };
        let ex_mem = ExMem {
            slot: Some(Instruction {
                rdv: 999,
                ..inst(OpKind::Lw, 5)
            }),
        };
        let mem_wb = MemWb {
            slot: Some(Instruction {
                rdv: 42,
                ..inst(OpKind::Add, 5)
            }),
        };
        forward(&mut id_ex, &ex_mem, &mem_wb);
        assert_eq!(id_ex.slot.unwrap().rs1v, 42);
    }

    #[test]
    fn load_use_hazard_detected() {
        let ex = inst(OpKind::Lw, 5);
        let id = Instruction {
            rs1: 5,
            ..Instruction::bubble()
        };
        assert!(need_load_use_stall(&ex, &id));
    }

    #[test]
    fn no_hazard_when_rd_is_zero() {
        let ex = inst(OpKind::Lw, 0);
        let id = Instruction {
            rs1: 0,
            ..Instruction::bubble()
        };
        assert!(!need_load_use_stall(&ex, &id));
    }
}
