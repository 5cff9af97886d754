//! Dec0 (instruction split, branch prediction, load-after-store
//! stall) and dec1 (operand preparation through the bypass network).

use crate::core::pipeline::bypass::resolve_operand;
use crate::core::pipeline::latches::{Dec0Latch, Fetch0Latch, Fetch1Latch};
use crate::core::Cpu;
use crate::isa::{self, Opcode};

pub fn dec0_stage(cpu: &mut Cpu) {
    let old = cpu.old.dec0;

    if !old.active {
        cpu.new.dec1.active = false;
        return;
    }

    let decoded = isa::decode(old.inst);
    let opcode = Opcode::decode(decoded.opcode as u32);

    let load_after_store = opcode == Opcode::Ld
        && cpu.old.dec1.active
        && cpu.old.dec1.opcode == Opcode::St;

    if load_after_store {
        // One-cycle bubble: fetch0, fetch1 and dec0 hold their content
        // unchanged for one extra cycle; dec1's outgoing slot drops.
        cpu.stalls_load_use = cpu.stalls_load_use.wrapping_add(1);
        cpu.new.dec1.active = false;
        cpu.new.dec0 = cpu.old.dec0;
        cpu.new.fetch1 = cpu.old.fetch1;
        cpu.new.fetch0 = cpu.old.fetch0;

        if cpu.trace_stages {
            eprintln!("[D0] pc={:#06x} load-after-store stall", old.pc);
        }
        return;
    }

    let mut predicted_taken = false;
    if opcode.is_conditional_branch() {
        predicted_taken = cpu.bht.predict(old.pc).predicts_taken();
    }

    cpu.new.dec1.active = true;
    cpu.new.dec1.pc = old.pc;
    cpu.new.dec1.opcode = opcode;
    cpu.new.dec1.dst = decoded.dst;
    cpu.new.dec1.src0 = decoded.src0;
    cpu.new.dec1.src1 = decoded.src1;
    cpu.new.dec1.immediate = decoded.immediate;
    cpu.new.dec1.predicted_taken = predicted_taken;

    if predicted_taken {
        // The real target isn't known until exec1 resolves the
        // branch, so there is nothing correct to fetch speculatively;
        // re-assert the branch's own pc as a placeholder and squash
        // the wrong-path fetch1/dec0 slots rather than let them fill
        // with sequential-path instructions. exec1 always flushes a
        // predicted-taken branch, whichever way it resolves.
        cpu.new.fetch0 = Fetch0Latch {
            active: true,
            pc: old.pc,
        };
        cpu.new.fetch1 = Fetch1Latch::default();
        cpu.new.dec0 = Dec0Latch::default();

        if cpu.trace_stages {
            eprintln!("[D0] pc={:#06x} predicted taken, stall for resolve", old.pc);
        }
    }
}

pub fn dec1_stage(cpu: &mut Cpu) {
    let old = cpu.old.dec1;

    cpu.new.exec0.active = old.active;
    if !old.active {
        return;
    }

    let exec1 = cpu.old.exec1;
    let sramd_dataout = cpu.sramd.dataout();

    let (operand0, operand1) = if old.opcode == Opcode::Lhi {
        let dst_val = cpu.regs.read(old.dst);
        (dst_val & 0xFFFF, old.immediate)
    } else {
        (
            resolve_operand(old.src0, old.immediate, &exec1, sramd_dataout, &cpu.regs),
            resolve_operand(old.src1, old.immediate, &exec1, sramd_dataout, &cpu.regs),
        )
    };

    let aux = if old.opcode == Opcode::Cpy {
        resolve_operand(old.dst, old.immediate, &exec1, sramd_dataout, &cpu.regs)
    } else {
        0
    };

    cpu.new.exec0.pc = old.pc;
    cpu.new.exec0.opcode = old.opcode;
    cpu.new.exec0.dst = old.dst;
    cpu.new.exec0.src0 = old.src0;
    cpu.new.exec0.src1 = old.src1;
    cpu.new.exec0.operand0 = operand0;
    cpu.new.exec0.operand1 = operand1;
    cpu.new.exec0.aux = aux;
    cpu.new.exec0.immediate = old.immediate;
    cpu.new.exec0.predicted_taken = old.predicted_taken;

    if cpu.trace_stages {
        eprintln!(
            "[D1] pc={:#06x} op={} operand0={} operand1={}",
            old.pc,
            old.opcode.mnemonic(),
            operand0,
            operand1
        );
    }
}
