use thiserror::Error;

/// Everything that can go wrong while decoding or stepping the machine.
///
/// Mirrors the reference implementation's `assert`-on-bounds-violation and
/// unknown-encoding-aborts-the-process behavior, but surfaces both as
/// ordinary `Result` values instead of terminating the host process, so a
/// caller (the CLI, a test harness, or an embedding crate) can decide how to
/// react.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// No (opcode, funct3, funct7) entry in the decode table matches this
    /// raw word.
    #[error("unknown encoding {0:#010x} has no matching RV32I operation")]
    UnknownEncoding(u32),

    /// A load, store, or fetch addressed a byte range outside `[0,
    /// memory_size)`.
    #[error("memory access of {size} byte(s) at address {addr:#010x} is out of bounds")]
    MemoryOutOfBounds {
        /// The address the access started at.
        addr: u32,
        /// The width in bytes of the attempted access.
        size: u8,
    },

    /// `reg[0]` held a nonzero value after a tick; this can only happen if
    /// a bug in the pipeline wrote through the hardwired-zero register.
    #[error("x0 was observed to be nonzero after tick")]
    RegisterZeroCorrupted,
}

/// Convenience alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;
