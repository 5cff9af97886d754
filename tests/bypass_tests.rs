use spsim::core::pipeline::bypass::resolve_operand;
use spsim::core::pipeline::latches::Exec1Latch;
use spsim::core::registers::RegisterFile;
use spsim::isa::Opcode;

fn regs_with(r2: i32, r3: i32) -> RegisterFile {
    let mut regs = RegisterFile::default();
    regs.write(2, r2);
    regs.write(3, r3);
    regs
}

#[test]
fn src_zero_is_constant_zero() {
    let regs = regs_with(99, 0);
    let exec1 = Exec1Latch::default();
    let v = resolve_operand(0, 42, &exec1, 0, &regs);
    assert_eq!(v, 0);
}

#[test]
fn src_one_is_the_immediate() {
    let regs = regs_with(99, 0);
    let exec1 = Exec1Latch::default();
    let v = resolve_operand(1, 42, &exec1, 0, &regs);
    assert_eq!(v, 42);
}

#[test]
fn falls_back_to_register_file_with_no_producer() {
    let regs = regs_with(7, 0);
    let exec1 = Exec1Latch::default();
    let v = resolve_operand(2, 0, &exec1, 0, &regs);
    assert_eq!(v, 7);
}

#[test]
fn forwards_alu_result_from_exec1() {
    let regs = regs_with(0, 0);
    let exec1 = Exec1Latch {
        active: true,
        dst: 2,
        opcode: Opcode::Add,
        aluout: 123,
        ..Default::default()
    };
    let v = resolve_operand(2, 0, &exec1, 0, &regs);
    assert_eq!(v, 123);
}

#[test]
fn forwards_loaded_word_from_sramd_dataout() {
    let regs = regs_with(0, 0);
    let exec1 = Exec1Latch {
        active: true,
        dst: 3,
        opcode: Opcode::Ld,
        ..Default::default()
    };
    let v = resolve_operand(3, 0, &exec1, 0xdead_beef, &regs);
    assert_eq!(v, 0xdead_beefu32 as i32);
}

#[test]
fn forwards_link_value_for_r7_on_taken_branch() {
    let regs = regs_with(0, 0);
    let exec1 = Exec1Latch {
        active: true,
        pc: 0x40,
        opcode: Opcode::Jeq,
        aluout: 1,
        ..Default::default()
    };
    let v = resolve_operand(7, 0, &exec1, 0, &regs);
    assert_eq!(v, 0x40);
}

#[test]
fn does_not_forward_from_inactive_producer() {
    let regs = regs_with(55, 0);
    let exec1 = Exec1Latch {
        active: false,
        dst: 2,
        opcode: Opcode::Add,
        aluout: 123,
        ..Default::default()
    };
    let v = resolve_operand(2, 0, &exec1, 0, &regs);
    assert_eq!(v, 55);
}

#[test]
fn alu_bypass_has_priority_over_register_file() {
    let regs = regs_with(1, 0);
    let exec1 = Exec1Latch {
        active: true,
        dst: 2,
        opcode: Opcode::Sub,
        aluout: 999,
        ..Default::default()
    };
    let v = resolve_operand(2, 0, &exec1, 0, &regs);
    assert_eq!(v, 999);
}

#[test]
fn cpy_producer_forwards_through_the_alu_tier() {
    let regs = regs_with(0, 0);
    let exec1 = Exec1Latch {
        active: true,
        dst: 3,
        opcode: Opcode::Cpy,
        aluout: 20,
        ..Default::default()
    };
    let v = resolve_operand(3, 0, &exec1, 0, &regs);
    assert_eq!(v, 20);
}
