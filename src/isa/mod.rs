//! Instruction identity: the RV32I encoding constants, the bit-field
//! primitives they're built from, the decoder, and the decoded
//! instruction record together with its datapath methods.

pub mod bits;
pub mod decode;
pub mod instruction;
pub mod opcodes;

pub use decode::decode;
pub use instruction::{Instruction, OpKind, RETIREMENT_SENTINEL};
