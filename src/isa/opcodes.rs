//! Named encoding constants for the RV32I base integer instruction set, as
//! matched against in [`crate::isa::decode`].

/// `opcode` field values (bits `[6:0]`).
pub mod opcode {
    pub const LOAD: u32 = 0b000_0011;
    pub const OP_IMM: u32 = 0b001_0011;
    pub const AUIPC: u32 = 0b001_0111;
    pub const STORE: u32 = 0b010_0011;
    pub const OP: u32 = 0b011_0011;
    pub const LUI: u32 = 0b011_0111;
    pub const BRANCH: u32 = 0b110_0011;
    pub const JALR: u32 = 0b110_0111;
    pub const JAL: u32 = 0b110_1111;
}

/// `funct3` field values (bits `[14:12]`), grouped by the opcode they
/// disambiguate under.
pub mod funct3 {
    // LOAD
    pub const LB: u32 = 0b000;
    pub const LH: u32 = 0b001;
    pub const LW: u32 = 0b010;
    pub const LBU: u32 = 0b100;
    pub const LHU: u32 = 0b101;

    // STORE
    pub const SB: u32 = 0b000;
    pub const SH: u32 = 0b001;
    pub const SW: u32 = 0b010;

    // BRANCH
    pub const BEQ: u32 = 0b000;
    pub const BNE: u32 = 0b001;
    pub const BLT: u32 = 0b100;
    pub const BGE: u32 = 0b101;
    pub const BLTU: u32 = 0b110;
    pub const BGEU: u32 = 0b111;

    // OP_IMM / OP
    pub const ADD_SUB: u32 = 0b000;
    pub const SLL: u32 = 0b001;
    pub const SLT: u32 = 0b010;
    pub const SLTU: u32 = 0b011;
    pub const XOR: u32 = 0b100;
    pub const SRL_SRA: u32 = 0b101;
    pub const OR: u32 = 0b110;
    pub const AND: u32 = 0b111;

    // JALR
    pub const JALR: u32 = 0b000;
}

/// `funct7` field values (bits `[31:25]`), distinguishing `ADD`/`SUB` and
/// `SRL`/`SRA` pairs that otherwise share an opcode/funct3 pair.
pub mod funct7 {
    pub const DEFAULT: u32 = 0b000_0000;
    pub const ALT: u32 = 0b010_0000;
}
