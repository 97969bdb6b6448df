//! Translates a raw 32-bit encoding into an [`Instruction`](crate::isa::instruction::Instruction).
//!
//! Each encoding format has its own field layout (RISC-V Volume I, §2.3);
//! the helpers below extract exactly the bits that format defines, and the
//! top-level [`decode`] function picks the right helper — and the right
//! [`OpKind`] — by matching on `opcode`, then `funct3`, then (where the
//! opcode/funct3 pair is ambiguous) `funct7`.

use super::bits::{extract_bits, sign_extend};
use super::instruction::{Instruction, OpKind};
use super::opcodes::{funct3, funct7, opcode};
use crate::common::SimError;

fn field_opcode(w: u32) -> u32 {
    extract_bits(w, 6, 0)
}
fn field_rd(w: u32) -> u8 {
    extract_bits(w, 11, 7) as u8
}
fn field_funct3(w: u32) -> u32 {
    extract_bits(w, 14, 12)
}
fn field_rs1(w: u32) -> u8 {
    extract_bits(w, 19, 15) as u8
}
fn field_rs2(w: u32) -> u8 {
    extract_bits(w, 24, 20) as u8
}
fn field_funct7(w: u32) -> u32 {
    extract_bits(w, 31, 25)
}

/// I-type: `imm[11:0] = inst[31:20]`.
fn imm_i(w: u32) -> i32 {
    sign_extend(extract_bits(w, 31, 20), 12)
}

/// S-type: `imm[11:5] = inst[31:25]`, `imm[4:0] = inst[11:7]`.
fn imm_s(w: u32) -> i32 {
    let hi = extract_bits(w, 31, 25);
    let lo = extract_bits(w, 11, 7);
    sign_extend((hi << 5) | lo, 12)
}

/// B-type: `imm[12|10:5|4:1|11] = inst[31|30:25|11:8|7]`, always even.
fn imm_b(w: u32) -> i32 {
    let b12 = extract_bits(w, 31, 31);
    let b11 = extract_bits(w, 7, 7);
    let b10_5 = extract_bits(w, 30, 25);
    let b4_1 = extract_bits(w, 11, 8);
    let combined = (b12 << 12) | (b11 << 11) | (b10_5 << 5) | (b4_1 << 1);
    sign_extend(combined, 13)
}

/// U-type: `imm[31:12] = inst[31:12]`, implicitly left-shifted into place.
fn imm_u(w: u32) -> i32 {
    (extract_bits(w, 31, 12) << 12) as i32
}

/// J-type: `imm[20|10:1|11|19:12] = inst[31|30:21|20|19:12]`, always even.
fn imm_j(w: u32) -> i32 {
    let b20 = extract_bits(w, 31, 31);
    let b19_12 = extract_bits(w, 19, 12);
    let b11 = extract_bits(w, 20, 20);
    let b10_1 = extract_bits(w, 30, 21);
    let combined = (b20 << 20) | (b19_12 << 12) | (b11 << 11) | (b10_1 << 1);
    sign_extend(combined, 21)
}

/// Decode a raw 32-bit word into a fully populated [`Instruction`]: `kind`,
/// register selectors, and the reconstructed immediate. Value fields
/// (`rs1v`, `rs2v`, `rdv`, ...) are left zeroed — populating `rs1v`/`rs2v`
/// from the register file is the decode *stage*'s job, not this pure
/// function's.
pub fn decode(pc: u32, word: u32) -> Result<Instruction, SimError> {
    let op = field_opcode(word);
    let f3 = field_funct3(word);
    let f7 = field_funct7(word);

    let (kind, rd, rs1, rs2, imm) = match op {
        opcode::OP => {
            let kind = match (f3, f7) {
                (funct3::ADD_SUB, funct7::DEFAULT) => OpKind::Add,
                (funct3::ADD_SUB, funct7::ALT) => OpKind::Sub,
                (funct3::SLL, _) => OpKind::Sll,
                (funct3::SLT, _) => OpKind::Slt,
                (funct3::SLTU, _) => OpKind::Sltu,
                (funct3::XOR, _) => OpKind::Xor,
                (funct3::SRL_SRA, funct7::DEFAULT) => OpKind::Srl,
                (funct3::SRL_SRA, funct7::ALT) => OpKind::Sra,
                (funct3::OR, _) => OpKind::Or,
                (funct3::AND, _) => OpKind::And,
                _ => return Err(SimError::UnknownEncoding(word)),
            };
            (kind, field_rd(word), field_rs1(word), field_rs2(word), 0)
        }
        opcode::OP_IMM => {
            let kind = match f3 {
                funct3::ADD_SUB => OpKind::Addi,
                funct3::SLT => OpKind::Slti,
                funct3::SLTU => OpKind::Sltiu,
                funct3::XOR => OpKind::Xori,
                funct3::OR => OpKind::Ori,
                funct3::AND => OpKind::Andi,
                funct3::SLL => OpKind::Slli,
                funct3::SRL_SRA if f7 == funct7::DEFAULT => OpKind::Srli,
                funct3::SRL_SRA if f7 == funct7::ALT => OpKind::Srai,
                _ => return Err(SimError::UnknownEncoding(word)),
            };
            // Shift-immediate variants carry only a 5-bit shamt in inst[24:20].
            let imm = if matches!(kind, OpKind::Slli | OpKind::Srli | OpKind::Srai) {
                field_rs2(word) as i32
            } else {
                imm_i(word)
            };
            (kind, field_rd(word), field_rs1(word), 0, imm)
        }
        opcode::LOAD => {
            let kind = match f3 {
                funct3::LB => OpKind::Lb,
                funct3::LH => OpKind::Lh,
                funct3::LW => OpKind::Lw,
                funct3::LBU => OpKind::Lbu,
                funct3::LHU => OpKind::Lhu,
                _ => return Err(SimError::UnknownEncoding(word)),
            };
            (kind, field_rd(word), field_rs1(word), 0, imm_i(word))
        }
        opcode::JALR => {
            if f3 != funct3::JALR {
                return Err(SimError::UnknownEncoding(word));
            }
            (OpKind::Jalr, field_rd(word), field_rs1(word), 0, imm_i(word))
        }
        opcode::STORE => {
            let kind = match f3 {
                funct3::SB => OpKind::Sb,
                funct3::SH => OpKind::Sh,
                funct3::SW => OpKind::Sw,
                _ => return Err(SimError::UnknownEncoding(word)),
            };
            (kind, 0, field_rs1(word), field_rs2(word), imm_s(word))
        }
        opcode::BRANCH => {
            let kind = match f3 {
                funct3::BEQ => OpKind::Beq,
                funct3::BNE => OpKind::Bne,
                funct3::BLT => OpKind::Blt,
                funct3::BGE => OpKind::Bge,
                funct3::BLTU => OpKind::Bltu,
                funct3::BGEU => OpKind::Bgeu,
                _ => return Err(SimError::UnknownEncoding(word)),
            };
            (kind, 0, field_rs1(word), field_rs2(word), imm_b(word))
        }
        opcode::LUI => (OpKind::Lui, field_rd(word), 0, 0, imm_u(word)),
        opcode::AUIPC => (OpKind::Auipc, field_rd(word), 0, 0, imm_u(word)),
        opcode::JAL => (OpKind::Jal, field_rd(word), 0, 0, imm_j(word)),
        _ => return Err(SimError::UnknownEncoding(word)),
    };

    Ok(Instruction {
        kind,
        pc,
        encoding: word,
        rs1,
        rs2,
        rd,
        imm,
        rs1v: 0,
        rs2v: 0,
        rdv: 0,
        pcv: 0,
        addr: 0,
        cond: false,
        predicted_taken: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r_type(funct7: u32, rs2: u32, rs1: u32, funct3: u32, rd: u32, op: u32) -> u32 {
        (funct7 << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | op
    }

    fn i_type(imm: u32, rs1: u32, funct3: u32, rd: u32, op: u32) -> u32 {
        ((imm & 0xfff) << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | op
    }

    #[test]
    fn decodes_add() {
        let w = r_type(0, 2, 1, 0, 3, opcode::OP);
        let inst = decode(0, w).unwrap();
        assert_eq!(inst.kind, OpKind::Add);
        assert_eq!(inst.rd, 3);
        assert_eq!(inst.rs1, 1);
        assert_eq!(inst.rs2, 2);
    }

    #[test]
    fn decodes_sub_via_funct7() {
        let w = r_type(0b0100000, 2, 1, 0, 3, opcode::OP);
        assert_eq!(decode(0, w).unwrap().kind, OpKind::Sub);
    }

    #[test]
    fn decodes_addi_negative_immediate() {
        let w = i_type((-1i32 as u32) & 0xfff, 1, 0, 2, opcode::OP_IMM);
        let inst = decode(0, w).unwrap();
        assert_eq!(inst.kind, OpKind::Addi);
        assert_eq!(inst.imm, -1);
    }

    #[test]
    fn decodes_retirement_sentinel_as_addi() {
        let inst = decode(0, 0x0ff0_0513).unwrap();
        assert_eq!(inst.kind, OpKind::Addi);
        assert!(inst.is_retirement_sentinel());
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        assert!(decode(0, 0b1111_1111).is_err());
    }

    #[test]
    fn lui_immediate_is_not_shifted_again() {
        // lui x1, 0xabcde -> imm field = 0xabcde, final imm = 0xabcde000
        let w = (0xabcdeu32 << 12) | (1 << 7) | opcode::LUI;
        let inst = decode(0, w).unwrap();
        assert_eq!(inst.kind, OpKind::Lui);
        assert_eq!(inst.imm as u32, 0xabcd_e000);
    }

    #[test]
    fn jal_immediate_round_trips() {
        // A small forward jump, imm = 8.
        let imm: i32 = 8;
        let u = imm as u32;
        let b20 = (u >> 20) & 1;
        let b19_12 = (u >> 12) & 0xff;
        let b11 = (u >> 11) & 1;
        let b10_1 = (u >> 1) & 0x3ff;
        let w = (b20 << 31) | (b19_12 << 12) | (b11 << 20) | (b10_1 << 21) | (1 << 7) | opcode::JAL;
        let inst = decode(0, w).unwrap();
        assert_eq!(inst.kind, OpKind::Jal);
        assert_eq!(inst.imm, 8);
    }

    #[test]
    fn branch_immediate_is_always_even() {
        let imm: i32 = -4;
        let u = imm as u32;
        let b12 = (u >> 12) & 1;
        let b11 = (u >> 11) & 1;
        let b10_5 = (u >> 5) & 0x3f;
        let b4_1 = (u >> 1) & 0xf;
        let w = (b12 << 31) | (b10_5 << 25) | (2 << 20) | (1 << 15) | (b4_1 << 8) | (b11 << 7) | opcode::BRANCH;
        let inst = decode(0, w).unwrap();
        assert_eq!(inst.kind, OpKind::Beq);
        assert_eq!(inst.imm, -4);
    }
}
