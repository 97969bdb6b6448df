//! The four inter-stage latches. Each holds at most one in-flight
//! instruction; `None` represents a bubble (a kill, a stall-inserted
//! bubble, or simply nothing having reached that stage yet).

use crate::isa::Instruction;

/// What `IF` hands to `ID`: the raw fetched word and the PC it was
/// fetched from. Decoding happens in `ID`, not `IF`, so a decode error
/// surfaces only once the instruction reaches the stage that needs its
/// fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfId {
    pub slot: Option<(u32, u32)>,
}

/// What `ID` hands to `EX`: a fully decoded instruction with `rs1v`/`rs2v`
/// already read from the register file (and, after forwarding, possibly
/// overwritten with in-flight values).
#[derive(Debug, Clone, Copy, Default)]
pub struct IdEx {
    pub slot: Option<Instruction>,
}

/// What `EX` hands to `MEM`: the same record, now with `rdv`/`addr`/`pcv`/`cond`
/// populated by `Instruction::execute`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExMem {
    pub slot: Option<Instruction>,
}

/// What `MEM` hands to `WB`: the same record, now with `rdv` updated for
/// loads by `Instruction::access_memory`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemWb {
    pub slot: Option<Instruction>,
}
