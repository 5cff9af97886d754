//! Operand bypass/forwarding ladder.
//!
//! Shared between dec1 (the primary operand-preparation bypass) and
//! exec0 (a defensive re-check against a producer that was itself in
//! exec0 last cycle and has only now reached exec1). Both call sites
//! consult the same priority order so there is exactly one place that
//! encodes it.

use crate::core::pipeline::latches::Exec1Latch;
use crate::core::registers::RegisterFile;
use crate::isa::Opcode;

/// Resolves a single source-register field to its value, applying
/// register 0/1 hardwiring first and the bypass ladder second:
///
/// 1. `src == 0` -> constant 0.
/// 2. `src == 1` -> the consuming instruction's own sign-extended
///    immediate.
/// 3. an active producer in `exec1` with a matching `dst` and an
///    ALU-class opcode (`Opcode::is_alu`, which includes CPY) -> its
///    `aluout`.
/// 4. an active LD producer in `exec1` with a matching `dst` -> the
///    sampled data-SRAM `dataout`.
/// 5. `src == 7` and an active taken branch sits in `exec1` -> its pc
///    (the link value that branch is about to write to r7).
/// 6. otherwise, the committed register file.
pub fn resolve_operand(
    src: u8,
    immediate: i32,
    exec1: &Exec1Latch,
    sramd_dataout: u32,
    regs: &RegisterFile,
) -> i32 {
    match src {
        0 => return 0,
        1 => return immediate,
        _ => {}
    }

    if exec1.active && exec1.dst == src && exec1.opcode.is_alu() {
        return exec1.aluout;
    }

    if exec1.active && exec1.dst == src && exec1.opcode == Opcode::Ld {
        return sramd_dataout as i32;
    }

    if src == 7 && exec1.active && exec1.opcode.is_branch() && exec1.aluout == 1 {
        return exec1.pc as i32;
    }

    regs.read(src)
}
