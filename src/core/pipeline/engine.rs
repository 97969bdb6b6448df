//! The per-cycle driver. Owns every piece of architectural state and
//! sequences the five phases of spec.md §4.5 each tick, resolving the
//! exact sub-ordering ambiguity spec.md's prose leaves implicit against
//! the original implementation's `Executor::exec` loop: fetch happens
//! before decode/execute within a cycle so that a same-cycle redirect
//! (taken `JAL`, mispredicted branch, `JALR`) overwrites fetch's naive
//! `pc + 4` guess rather than the other way around.

use crate::common::reg::SyncRegister;
use crate::common::{RegisterFile, SimError};
use crate::config::Config;
use crate::core::units::BranchPredictor;
use crate::sim::memory::Memory;
use crate::stats::SimStats;

use super::hazards;
use super::latches::{ExMem, IdEx, IfId, MemWb};
use super::signals::{KillPos, KillSignal, StallPos, StallSignal};

/// A buffered load/store waiting out its 3-cycle access latency in `MEM`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingAccess {
    pub inst: crate::isa::Instruction,
    pub remaining: u32,
}

/// Everything the pipeline needs to advance one cycle: the four latches,
/// the program counter, the register file, memory, the predictor, the
/// two hazard signals, and statistics.
pub struct Controller {
    pub(crate) pc: SyncRegister,
    pub(crate) regs: RegisterFile,
    pub(crate) memory: Memory,
    pub(crate) predictor: BranchPredictor,

    pub(crate) if_id: IfId,
    pub(crate) id_ex: IdEx,
    pub(crate) ex_mem: ExMem,
    pub(crate) mem_wb: MemWb,

    pub(crate) stall: StallSignal,
    pub(crate) kill: KillSignal,
    pub(crate) pending_access: Option<PendingAccess>,

    pub(crate) config: Config,
    pub stats: SimStats,
}

/// What a tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The pipeline is still running.
    Running,
    /// The sentinel reached `WB`; the program's return value follows.
    Retired(u8),
}

impl Controller {
    pub fn new(memory: Memory, config: Config) -> Self {
        let predictor = BranchPredictor::new(
            memory.len(),
            config.history_bits,
            config.use_adaptive_predictor,
        );
        Self {
            pc: SyncRegister::default(),
            regs: RegisterFile::new(),
            memory,
            predictor,
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            stall: StallSignal::default(),
            kill: KillSignal::default(),
            pending_access: None,
            config,
            stats: SimStats::default(),
        }
    }

    pub fn pc_value(&self) -> u32 {
        self.pc.read()
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Advance the pipeline by exactly one clock cycle.
    pub fn tick(&mut self) -> Result<StepOutcome, SimError> {
        // Phase 1 — forward into ID before it latches into EX.
        hazards::forward(&mut self.id_ex, &self.ex_mem, &self.mem_wb);

        // Snapshot every latch's pre-shift content.
        let old_if_id = self.if_id.slot;
        let old_id_ex = self.id_ex.slot;
        let old_ex_mem = self.ex_mem.slot;
        let old_mem_wb = self.mem_wb.slot;

        // Phase 2 — latch, subject to the stall mask; PC ticks here too.
        self.pc.tick();

        self.mem_wb.slot = old_ex_mem;

        self.ex_mem.slot = if !self.stall.blocks(StallPos::Ex) {
            old_id_ex
        } else if self.stall.insert_bubble() {
            None
        } else {
            old_ex_mem
        };

        self.id_ex.slot = if self.stall.blocks(StallPos::Id) {
            old_id_ex
        } else {
            None // filled in by decode_stage below
        };

        // Phase 3 — stage transforms: fetch, writeback, decode, execute, mem-access.
        if !self.stall.blocks(StallPos::If) {
            self.fetch_stage();
        }

        self.writeback_stage(old_mem_wb);

        if !self.stall.blocks(StallPos::Id) {
            self.decode_stage(old_if_id)?;
        }

        if !self.stall.blocks(StallPos::Ex) {
            self.execute_stage();
        }

        self.mem_access_stage()?;

        // Phase 4 — signal maintenance.
        self.stall.count_down();

        if self.stall.is_idle() {
            if let (Some(ex), Some(id)) = (self.ex_mem.slot, self.id_ex.slot) {
                if hazards::need_load_use_stall(&ex, &id) {
                    self.stall.set(StallPos::Mem, 1, true);
                    self.stats.stalls_data += 1;
                }
            }
        }

        if self.kill.will_kill(KillPos::If) {
            if self.if_id.slot.take().is_some() {
                self.stats.flushes += 1;
            }
        }
        if self.kill.will_kill(KillPos::Id) {
            if self.id_ex.slot.take().is_some() {
                self.stats.flushes += 1;
            }
        }
        self.kill.reset();

        if self.regs.read(0) != 0 && !self.config.noassert {
            return Err(SimError::RegisterZeroCorrupted);
        }

        self.stats.cycles += 1;

        // Phase 5 — retirement check.
        if let Some(mem) = self.mem_wb.slot {
            if mem.is_retirement_sentinel() {
                return Ok(StepOutcome::Retired((self.regs.read(10) & 0xff) as u8));
            }
        }
        Ok(StepOutcome::Running)
    }
}
