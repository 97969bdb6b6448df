//! The decoded instruction record and the per-operation datapath that acts
//! on it. One `OpKind` variant per RV32I operation this simulator
//! supports (37 total, across the R/I/S/B/U/J encoding formats); one
//! `Instruction` struct carries every field any operation needs, so the
//! pipeline stages can treat every instruction identically regardless of
//! its format.

use crate::common::SimError;
use crate::sim::memory::Memory;

/// Every operation this simulator executes, tagged by mnemonic rather than
/// by raw encoding. Decoding produces exactly one of these; the pipeline
/// never inspects the raw opcode/funct3/funct7 bits again after decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    // R-type
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    // I-type ALU
    Addi,
    Slti,
    Sltiu,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
    // I-type loads
    Lb,
    Lh,
    Lw,
    Lbu,
    Lhu,
    // I-type jump-and-link-register
    Jalr,
    // S-type
    Sb,
    Sh,
    Sw,
    // B-type
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    // U-type
    Lui,
    Auipc,
    // J-type
    Jal,
}

impl OpKind {
    /// Whether this operation commits a value into `rd`.
    pub const fn writes_rd(self) -> bool {
        !matches!(
            self,
            Self::Sb | Self::Sh | Self::Sw | Self::Beq | Self::Bne | Self::Blt | Self::Bge | Self::Bltu | Self::Bgeu
        )
    }

    pub const fn is_load(self) -> bool {
        matches!(self, Self::Lb | Self::Lh | Self::Lw | Self::Lbu | Self::Lhu)
    }

    pub const fn is_store(self) -> bool {
        matches!(self, Self::Sb | Self::Sh | Self::Sw)
    }

    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Self::Beq | Self::Bne | Self::Blt | Self::Bge | Self::Bltu | Self::Bgeu
        )
    }

    pub const fn is_memory_op(self) -> bool {
        self.is_load() || self.is_store()
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Sll => "sll",
            Self::Slt => "slt",
            Self::Sltu => "sltu",
            Self::Xor => "xor",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Or => "or",
            Self::And => "and",
            Self::Addi => "addi",
            Self::Slti => "slti",
            Self::Sltiu => "sltiu",
            Self::Xori => "xori",
            Self::Ori => "ori",
            Self::Andi => "andi",
            Self::Slli => "slli",
            Self::Srli => "srli",
            Self::Srai => "srai",
            Self::Lb => "lb",
            Self::Lh => "lh",
            Self::Lw => "lw",
            Self::Lbu => "lbu",
            Self::Lhu => "lhu",
            Self::Jalr => "jalr",
            Self::Sb => "sb",
            Self::Sh => "sh",
            Self::Sw => "sw",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blt => "blt",
            Self::Bge => "bge",
            Self::Bltu => "bltu",
            Self::Bgeu => "bgeu",
            Self::Lui => "lui",
            Self::Auipc => "auipc",
            Self::Jal => "jal",
        }
    }
}

/// The encoding of the sentinel `addi a0, zero, 255` that signals the
/// simulator to retire and return `reg[a0] & 0xff`.
pub const RETIREMENT_SENTINEL: u32 = 0x0ff0_0513;

/// A fully decoded instruction as it flows through the pipeline. Fields
/// not meaningful for a given `kind` are left at their default (zero /
/// false) and simply unused — e.g. `rs2`/`rs2v` on an I-type instruction,
/// or `cond` on anything but a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub kind: OpKind,
    pub pc: u32,
    pub encoding: u32,
    pub rs1: u8,
    pub rs2: u8,
    pub rd: u8,
    pub imm: i32,
    /// Value of `rs1`, latched at decode and possibly overwritten by
    /// forwarding before the EX latch.
    pub rs1v: u32,
    /// Value of `rs2`, latched at decode and possibly overwritten by
    /// forwarding before the EX latch.
    pub rs2v: u32,
    /// The value that will be written to `rd`, computed by `execute` (ALU
    /// ops, LUI/AUIPC, JAL/JALR) or by `mem` (loads).
    pub rdv: u32,
    /// Computed branch/jump target, for branches and `JALR`.
    pub pcv: u32,
    /// Effective address for loads/stores, computed by `execute`.
    pub addr: u32,
    /// Branch comparison result, meaningful only when `kind.is_branch()`.
    pub cond: bool,
    /// The prediction made for this instruction at decode, meaningful only
    /// when `kind.is_branch()`. Carried forward so `EX` can compare it
    /// against the resolved outcome without consulting the predictor a
    /// second time.
    pub predicted_taken: bool,
}

impl Instruction {
    /// A placeholder instruction representing a pipeline bubble — decoded
    /// from `addi x0, x0, 0` (encoding `0x0000_0013`), which is a
    /// functional no-op: it writes nothing observable and touches no
    /// memory.
    pub fn bubble() -> Self {
        Self {
            kind: OpKind::Addi,
            pc: 0,
            encoding: 0x0000_0013,
            rs1: 0,
            rs2: 0,
            rd: 0,
            imm: 0,
            rs1v: 0,
            rs2v: 0,
            rdv: 0,
            pcv: 0,
            addr: 0,
            cond: false,
            predicted_taken: false,
        }
    }

    pub fn is_retirement_sentinel(&self) -> bool {
        self.encoding == RETIREMENT_SENTINEL
    }

    /// The EX-stage datapath: ALU computation, effective-address
    /// computation for loads/stores, branch comparison and target
    /// computation, and `JALR`/`JAL` target computation. Uses `rs1v`,
    /// `rs2v`, `imm`, and `pc` exactly as latched — any forwarding must
    /// already have happened before this runs.
    pub fn execute(&mut self) {
        let a = self.rs1v;
        let b = self.rs2v;
        let imm = self.imm as u32;
        match self.kind {
            OpKind::Add => self.rdv = a.wrapping_add(b),
            OpKind::Sub => self.rdv = a.wrapping_sub(b),
            OpKind::Sll => self.rdv = a.wrapping_shl(b & 0x1f),
            OpKind::Slt => self.rdv = u32::from((a as i32) < (b as i32)),
            OpKind::Sltu => self.rdv = u32::from(a < b),
            OpKind::Xor => self.rdv = a ^ b,
            OpKind::Srl => self.rdv = a.wrapping_shr(b & 0x1f),
            OpKind::Sra => self.rdv = ((a as i32).wrapping_shr(b & 0x1f)) as u32,
            OpKind::Or => self.rdv = a | b,
            OpKind::And => self.rdv = a & b,

            OpKind::Addi => self.rdv = a.wrapping_add(imm),
            OpKind::Slti => self.rdv = u32::from((a as i32) < self.imm),
            OpKind::Sltiu => self.rdv = u32::from(a < imm),
            OpKind::Xori => self.rdv = a ^ imm,
            OpKind::Ori => self.rdv = a | imm,
            OpKind::Andi => self.rdv = a & imm,
            OpKind::Slli => self.rdv = a.wrapping_shl(imm & 0x1f),
            OpKind::Srli => self.rdv = a.wrapping_shr(imm & 0x1f),
            OpKind::Srai => self.rdv = ((a as i32).wrapping_shr(imm & 0x1f)) as u32,

            OpKind::Lb | OpKind::Lh | OpKind::Lw | OpKind::Lbu | OpKind::Lhu => {
                self.addr = a.wrapping_add(imm);
            }
            OpKind::Sb | OpKind::Sh | OpKind::Sw => {
                self.addr = a.wrapping_add(imm);
            }

            OpKind::Jalr => {
                self.pcv = a.wrapping_add(imm) & !1u32;
                self.rdv = self.pc.wrapping_add(4);
            }
            OpKind::Jal => {
                self.pcv = self.pc.wrapping_add(imm);
                self.rdv = self.pc.wrapping_add(4);
            }

            OpKind::Beq => {
                self.cond = a == b;
                self.pcv = self.pc.wrapping_add(imm);
            }
            OpKind::Bne => {
                self.cond = a != b;
                self.pcv = self.pc.wrapping_add(imm);
            }
            OpKind::Blt => {
                self.cond = (a as i32) < (b as i32);
                self.pcv = self.pc.wrapping_add(imm);
            }
            OpKind::Bge => {
                self.cond = (a as i32) >= (b as i32);
                self.pcv = self.pc.wrapping_add(imm);
            }
            OpKind::Bltu => {
                self.cond = a < b;
                self.pcv = self.pc.wrapping_add(imm);
            }
            OpKind::Bgeu => {
                self.cond = a >= b;
                self.pcv = self.pc.wrapping_add(imm);
            }

            OpKind::Lui => self.rdv = imm,
            OpKind::Auipc => self.rdv = self.pc.wrapping_add(imm),
        }
    }

    /// The MEM-stage datapath: the actual byte-addressable load/store.
    /// Timing (the 3-cycle latency before this point is reached) is the
    /// pipeline controller's responsibility; this performs the access
    /// itself, once.
    pub fn access_memory(&mut self, memory: &mut Memory) -> Result<(), SimError> {
        match self.kind {
            OpKind::Lb => self.rdv = memory.load_i8(self.addr)? as i32 as u32,
            OpKind::Lh => self.rdv = memory.load_i16(self.addr)? as i32 as u32,
            OpKind::Lw => self.rdv = memory.load_u32(self.addr)?,
            OpKind::Lbu => self.rdv = u32::from(memory.load_u8(self.addr)?),
            OpKind::Lhu => self.rdv = u32::from(memory.load_u16(self.addr)?),
            OpKind::Sb => memory.store_u8(self.addr, self.rs2v as u8)?,
            OpKind::Sh => memory.store_u16(self.addr, self.rs2v as u16)?,
            OpKind::Sw => memory.store_u32(self.addr, self.rs2v)?,
            _ => {}
        }
        Ok(())
    }
}
