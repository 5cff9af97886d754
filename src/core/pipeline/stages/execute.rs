//! Exec0 (ALU, memory issue) and exec1 (writeback, branch resolution,
//! store/DMA issue, halt).

use crate::core::pipeline::bypass::resolve_operand;
use crate::core::pipeline::latches::{Dec0Latch, Exec0Latch, Exec1Latch, Fetch0Latch, Fetch1Latch};
use crate::core::{Cpu, RetiredInst};
use crate::isa::Opcode;

/// Computes `(alu0, alu1, aluout)` for one ALU-class instruction.
/// `alu0`/`alu1` are the two operands as staged for exec1 (used there
/// for ST's data/address and for branch target computation); `aluout`
/// is the ALU result proper. `dma_remaining` feeds POL, the only
/// opcode whose result isn't a pure function of its two operands.
fn compute_alu(opcode: Opcode, op0: i32, op1: i32, dma_remaining: u32) -> (i32, i32, i32) {
    let aluout = match opcode {
        Opcode::Add => op0.wrapping_add(op1),
        Opcode::Sub => op0.wrapping_sub(op1),
        Opcode::Lsf => op0.wrapping_shl((op1 & 0x1F) as u32),
        Opcode::Rsf => op0.wrapping_shr((op1 & 0x1F) as u32),
        Opcode::And => op0 & op1,
        Opcode::Or => op0 | op1,
        Opcode::Xor => op0 ^ op1,
        Opcode::Lhi => ((op1 & 0xFFFF) << 16) | (op0 & 0xFFFF),
        Opcode::Pol => dma_remaining as i32,
        Opcode::Jlt => (op0 < op1) as i32,
        Opcode::Jle => (op0 <= op1) as i32,
        Opcode::Jeq => (op0 == op1) as i32,
        Opcode::Jne => (op0 != op1) as i32,
        Opcode::Jin => 1,
        Opcode::Ld | Opcode::St | Opcode::Cpy | Opcode::Hlt | Opcode::Undefined => 0,
    };
    (op0, op1, aluout)
}

pub fn exec0_stage(cpu: &mut Cpu) {
    let old = cpu.old.exec0;

    cpu.new.exec1.active = old.active;
    if !old.active {
        return;
    }

    let exec1 = cpu.old.exec1;
    let sramd_dataout = cpu.sramd.dataout();

    // Defensive re-bypass: a producer that was itself in exec0 last
    // cycle has only now reached exec1 and was invisible to dec1's
    // bypass pass.
    let operand0 = resolve_operand(old.src0, old.operand0, &exec1, sramd_dataout, &cpu.regs);
    let operand1 = resolve_operand(old.src1, old.operand1, &exec1, sramd_dataout, &cpu.regs);

    let (alu0, alu1, aluout) = compute_alu(old.opcode, operand0, operand1, cpu.dma.remaining);

    if old.opcode == Opcode::Ld {
        cpu.sramd.assert_read(alu1 as u32);
    }

    // DMA registers are captured here, one stage ahead of where CPY's
    // own writeback would otherwise land, so a CPY immediately behind
    // another active CPY in exec1 doesn't clobber an in-flight copy.
    if old.opcode == Opcode::Cpy {
        let exec1_is_cpy = cpu.old.exec1.active && cpu.old.exec1.opcode == Opcode::Cpy;
        if !cpu.dma.busy && !exec1_is_cpy {
            cpu.dma.start(alu0, old.aux, alu1);
        }
    }

    cpu.new.exec1 = Exec1Latch {
        active: true,
        pc: old.pc,
        opcode: old.opcode,
        dst: old.dst,
        alu0,
        alu1,
        aluout,
        immediate: old.immediate,
        predicted_taken: old.predicted_taken,
    };

    if cpu.trace_stages {
        eprintln!(
            "[E0] pc={:#06x} op={} aluout={}",
            old.pc,
            old.opcode.mnemonic(),
            aluout
        );
    }
}

pub fn exec1_stage(cpu: &mut Cpu) -> Option<RetiredInst> {
    let old = cpu.old.exec1;
    if !old.active {
        return None;
    }

    match old.opcode {
        // DMA registers were already captured in exec0; r[dst] here is
        // the destination address operand, never a writeback target.
        Opcode::Cpy => {}
        op if op.is_alu() => cpu.regs.write(old.dst, old.aluout),
        Opcode::Ld => cpu.regs.write(old.dst, cpu.sramd.dataout() as i32),
        Opcode::St => cpu.sramd.write(old.alu1 as u32, old.alu0 as u32),
        _ => {}
    }

    if old.opcode.is_branch() {
        let taken = old.opcode == Opcode::Jin || old.aluout == 1;
        let next_pc = if old.opcode == Opcode::Jin {
            (old.alu0 as u32) & 0xFFFF
        } else if taken {
            (old.immediate as u32) & 0xFFFF
        } else {
            old.pc.wrapping_add(1) & 0xFFFF
        };

        if taken {
            cpu.regs.write(7, old.pc as i32);
        }

        if old.opcode.is_conditional_branch() {
            cpu.bht.update(old.pc, taken);
        }

        // A branch predicted taken never had its real target fetched
        // speculatively (dec0 only ever re-asserts its own pc while
        // predicted taken, see dec0_stage) so it always needs a flush
        // to reach the real next pc, whichever way it resolves. A
        // branch predicted not-taken only flushes on a misprediction.
        let flush_needed = old.predicted_taken || taken;
        if flush_needed {
            cpu.branch_mispredicts = cpu.branch_mispredicts.wrapping_add(1);
            cpu.new.fetch1 = Fetch1Latch::default();
            cpu.new.dec0 = Dec0Latch::default();
            cpu.new.exec0 = Exec0Latch::default();
            cpu.new.exec1 = Exec1Latch::default();
            cpu.new.fetch0 = Fetch0Latch {
                active: true,
                pc: next_pc,
            };

            if cpu.trace_stages {
                eprintln!(
                    "[E1] pc={:#06x} mispredict, flush to {:#06x}",
                    old.pc, next_pc
                );
            }
        }
    }

    if old.opcode == Opcode::Hlt {
        if cpu.dma.active {
            cpu.dma_done = true;
        } else {
            cpu.halted = true;
        }
    }

    cpu.inst_cnt = cpu.inst_cnt.wrapping_add(1);

    let retired = RetiredInst {
        index: cpu.inst_cnt,
        pc: old.pc,
        opcode: old.opcode,
        dst: old.dst,
        aluout: old.aluout,
        regs: cpu.regs.snapshot(),
    };

    if cpu.trace_stages {
        eprintln!(
            "[E1] pc={:#06x} op={} retired (#{})",
            old.pc,
            old.opcode.mnemonic(),
            retired.index
        );
    }

    Some(retired)
}
