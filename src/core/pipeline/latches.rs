//! Pipeline latch structs, one per stage.
//!
//! Every latch is `Default`: an inactive latch's non-`active` fields
//! are don't-care content left over from whichever instruction last
//! occupied the slot, never read by any stage while `active` is false.

use crate::isa::Opcode;

#[derive(Clone, Copy, Debug, Default)]
pub struct Fetch0Latch {
    pub active: bool,
    pub pc: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Fetch1Latch {
    pub active: bool,
    pub pc: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Dec0Latch {
    pub active: bool,
    pub pc: u32,
    pub inst: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Dec1Latch {
    pub active: bool,
    pub pc: u32,
    pub opcode: Opcode,
    pub dst: u8,
    pub src0: u8,
    pub src1: u8,
    pub immediate: i32,
    /// Prediction made for this instruction at dec0, carried forward
    /// so exec1 compares against what fetch actually did rather than
    /// recomputing a possibly-stale BHT lookup.
    pub predicted_taken: bool,
}

/// Operands here are already resolved (bypass or register file) by
/// dec1; exec0 only re-consults the ladder defensively against
/// producers that were themselves in exec0 last cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct Exec0Latch {
    pub active: bool,
    pub pc: u32,
    pub opcode: Opcode,
    pub dst: u8,
    pub src0: u8,
    pub src1: u8,
    pub operand0: i32,
    pub operand1: i32,
    /// Third operand slot, used only by CPY: `r[dst]` (the copy's
    /// destination address), resolved by dec1 alongside
    /// `operand0`/`operand1` (source address, length) and consumed by
    /// exec0 when it issues the DMA engine.
    pub aux: i32,
    /// Carried through from decode for branch target computation;
    /// irrelevant to non-branch opcodes.
    pub immediate: i32,
    pub predicted_taken: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Exec1Latch {
    pub active: bool,
    pub pc: u32,
    pub opcode: Opcode,
    pub dst: u8,
    pub alu0: i32,
    pub alu1: i32,
    pub aluout: i32,
    pub immediate: i32,
    pub predicted_taken: bool,
}

/// All six stage latches for a single cycle. [`crate::core::Cpu`]
/// keeps two of these (`old`/`new`) and swaps them at the end of every
/// tick.
#[derive(Clone, Debug, Default)]
pub struct PipelineState {
    pub fetch0: Fetch0Latch,
    pub fetch1: Fetch1Latch,
    pub dec0: Dec0Latch,
    pub dec1: Dec1Latch,
    pub exec0: Exec0Latch,
    pub exec1: Exec1Latch,
}
