//! The SP processor core: pipeline, register file, branch predictor,
//! DMA engine, and the two SRAMs they share.

pub mod branch;
pub mod dma;
pub mod pipeline;
pub mod registers;

use crate::core::branch::BranchPredictor;
use crate::core::dma::Dma;
use crate::core::pipeline::stages;
use crate::core::pipeline::PipelineState;
use crate::core::registers::RegisterFile;
use crate::isa::Opcode;
use crate::sim::sram::Sram;

/// A snapshot of one retired (or re-traced, see [`Cpu::tick`]) exec1
/// instruction, handed to the trace writer.
#[derive(Clone, Debug)]
pub struct RetiredInst {
    pub index: u32,
    pub pc: u32,
    pub opcode: Opcode,
    pub dst: u8,
    pub aluout: i32,
    pub regs: [i32; crate::common::NUM_REGS],
}

pub struct Cpu {
    pub old: PipelineState,
    pub new: PipelineState,
    pub srami: Sram,
    pub sramd: Sram,
    pub regs: RegisterFile,
    pub bht: BranchPredictor,
    pub dma: Dma,
    pub cycle: u32,
    pub inst_cnt: u32,
    pub halted: bool,
    /// Set once HLT retires while the DMA engine still has work left.
    /// See the module-level note in [`crate::core::dma`] and
    /// `core/pipeline/stages/execute.rs` for the drain behavior this
    /// gates.
    pub dma_done: bool,
    pub trace_stages: bool,
    pub stalls_load_use: u32,
    pub branch_mispredicts: u32,
    pub dma_words_copied: u32,
}

impl Cpu {
    pub fn new(sram_words: usize, bht_entries: usize, trace_stages: bool) -> Cpu {
        Cpu {
            old: PipelineState::default(),
            new: PipelineState::default(),
            srami: Sram::new(sram_words),
            sramd: Sram::new(sram_words),
            regs: RegisterFile::default(),
            bht: BranchPredictor::new(bht_entries),
            dma: Dma::default(),
            cycle: 0,
            inst_cnt: 0,
            halted: false,
            dma_done: false,
            trace_stages,
            stalls_load_use: 0,
            branch_mispredicts: 0,
            dma_words_copied: 0,
        }
    }

    /// Starts fetching at address 0.
    pub fn reset(&mut self) {
        self.old = PipelineState::default();
        self.new = PipelineState::default();
        self.old.fetch0.active = true;
        self.old.fetch0.pc = 0;
    }

    /// Advances the processor by exactly one cycle: all six stages in
    /// fetch-to-writeback order, then the DMA engine, then the SRAM
    /// port latches, then the old/new swap.
    ///
    /// Returns the instruction retired by exec1 this cycle, if any.
    /// Per the preserved `dma_done` drain quirk, exec1 keeps producing
    /// a (repeated) retirement for the halted instruction every cycle
    /// while the DMA engine finishes draining, since stage `active`
    /// flags propagate independently of whether `dma_done` has frozen
    /// real progress elsewhere.
    pub fn tick(&mut self) -> Option<RetiredInst> {
        self.new = PipelineState::default();

        if !self.dma_done {
            stages::fetch::fetch0_stage(self);
            stages::fetch::fetch1_stage(self);
            stages::decode::dec0_stage(self);
            stages::decode::dec1_stage(self);
            stages::execute::exec0_stage(self);
        } else {
            self.new = self.old.clone();
        }

        let retired = stages::execute::exec1_stage(self);

        self.step_dma();

        self.srami.tick();
        self.sramd.tick();
        self.old = std::mem::take(&mut self.new);
        self.cycle = self.cycle.wrapping_add(1);

        retired
    }

    /// Advances the DMA FSM by one step, arbitrating against whatever
    /// the pipeline stages decided to do with the data-memory port
    /// this cycle (already latched into `self.new`).
    fn step_dma(&mut self) {
        use crate::core::dma::DmaState;

        let port_busy_next_cycle = [
            (self.new.dec1.active, self.new.dec1.opcode),
            (self.new.exec0.active, self.new.exec0.opcode),
            (self.new.exec1.active, self.new.exec1.opcode),
        ]
        .iter()
        .any(|&(active, op)| active && matches!(op, Opcode::Ld | Opcode::St));

        if !self.dma.active {
            return;
        }

        match self.dma.state {
            DmaState::Idle => {
                if !port_busy_next_cycle {
                    self.dma.state = DmaState::Wait;
                }
            }
            DmaState::Wait => {
                self.sramd.assert_read(self.dma.source);
                self.dma.state = DmaState::Active;
            }
            DmaState::Active => {
                let value = self.sramd.dataout();
                self.sramd.write(self.dma.destination, value);
                self.dma_words_copied = self.dma_words_copied.wrapping_add(1);
                self.dma.source = self.dma.source.wrapping_add(1);
                self.dma.destination = self.dma.destination.wrapping_add(1);
                self.dma.remaining -= 1;
                if self.dma.remaining == 0 {
                    self.dma.busy = false;
                    self.dma.active = false;
                    self.dma.state = DmaState::Idle;
                } else if port_busy_next_cycle {
                    self.dma.state = DmaState::Idle;
                } else {
                    self.dma.state = DmaState::Wait;
                }
            }
        }
    }
}
