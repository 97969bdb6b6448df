//! Runtime configuration. Every field here corresponds to one of the
//! reference implementation's `constexpr` knobs (`include/config.hpp`);
//! this crate keeps the same defaults but loads them from an optional TOML
//! file instead of baking them in at compile time, so behavior with no
//! config file present is identical to the reference's compiled-in
//! defaults.

use serde::Deserialize;

fn default_memory_size() -> u32 {
    0x2_0000
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_history_bits() -> u32 {
    2
}

/// The full set of tunables a run can vary. Constructed from
/// [`Config::default`] and optionally overridden by a TOML file and CLI
/// flags, in that order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Size of the flat byte-addressable memory, in bytes. Reference
    /// default: `0x20000` (128 KiB).
    #[serde(default = "default_memory_size")]
    pub memory_size: u32,

    /// Enable the two-level adaptive branch predictor. When `false`, every
    /// branch is predicted not-taken and every misprediction is penalized
    /// identically.
    #[serde(default = "default_true")]
    pub use_adaptive_predictor: bool,

    /// History register width for the two-level adaptive predictor, in
    /// bits. The per-PC counter table has `memory_size << (history_bits -
    /// 2)` entries.
    #[serde(default = "default_history_bits")]
    pub history_bits: u32,

    /// Fixed latency, in cycles, that a load or store occupies the MEM
    /// stage for: two cycles of a stalled bubble followed by the cycle the
    /// access actually happens on.
    #[serde(default = "default_mem_latency")]
    pub mem_latency_cycles: u32,

    /// Maximum number of cycles to simulate before giving up, `0` meaning
    /// unlimited. Reaching the limit is a normal (non-error) termination.
    #[serde(default)]
    pub clock_limit: u64,

    /// Relax out-of-bounds memory accesses and unknown encodings from hard
    /// errors into best-effort no-ops, matching the reference's `NOASSERT`
    /// escape hatch.
    #[serde(default = "default_false")]
    pub noassert: bool,

    /// Emit the decoded instruction mnemonic for every retiring
    /// instruction via `tracing`.
    #[serde(default = "default_true")]
    pub dump_inst: bool,

    /// Emit the full register file after every tick via `tracing`.
    #[serde(default = "default_false")]
    pub dump_reg_state: bool,

    /// Emit the simulator's return value on termination.
    #[serde(default = "default_false")]
    pub dump_ret_value: bool,

    /// Emit computed branch/jump target addresses via `tracing`.
    #[serde(default = "default_true")]
    pub dump_target_addr: bool,

    /// Use ABI register names (`a0`, `sp`, ...) instead of numeric (`x10`,
    /// `x2`) names in dumps.
    #[serde(default = "default_true")]
    pub use_abi_names: bool,

    /// Track per-instruction memory operation counts in [`crate::stats::SimStats`].
    #[serde(default = "default_false")]
    pub track_mem_op: bool,

    /// Emit the total retired-cycle count on termination.
    #[serde(default = "default_false")]
    pub dump_total_clock_cycle: bool,

    /// Emit the branch predictor's hit rate on termination.
    #[serde(default = "default_false")]
    pub dump_prediction_accuracy: bool,

    /// Emit wall-clock elapsed time on termination.
    #[serde(default = "default_false")]
    pub dump_total_time: bool,
}

fn default_mem_latency() -> u32 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory_size: default_memory_size(),
            use_adaptive_predictor: true,
            history_bits: default_history_bits(),
            mem_latency_cycles: default_mem_latency(),
            clock_limit: 0,
            noassert: false,
            dump_inst: true,
            dump_reg_state: false,
            dump_ret_value: false,
            dump_target_addr: true,
            use_abi_names: true,
            track_mem_op: false,
            dump_total_clock_cycle: false,
            dump_prediction_accuracy: false,
            dump_total_time: false,
        }
    }
}

impl Config {
    /// Parse a config from TOML text, falling back to [`Config::default`]
    /// for any field the document omits.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// The register name table to use for dumps, chosen by
    /// [`Config::use_abi_names`].
    pub fn register_names(&self) -> &'static [&'static str; 32] {
        if self.use_abi_names {
            &crate::common::RegisterFile::ABI_NAMES
        } else {
            &crate::common::RegisterFile::NUMERIC_NAMES
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_matches_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        let default = Config::default();
        assert_eq!(cfg.memory_size, default.memory_size);
        assert_eq!(cfg.use_adaptive_predictor, default.use_adaptive_predictor);
        assert_eq!(cfg.dump_inst, default.dump_inst);
        assert_eq!(cfg.use_abi_names, default.use_abi_names);
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let cfg = Config::from_toml_str("clock_limit = 1000\n").unwrap();
        assert_eq!(cfg.clock_limit, 1000);
        assert_eq!(cfg.memory_size, Config::default().memory_size);
    }
}
