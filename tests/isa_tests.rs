use spsim::isa::{self, opc, Opcode};

#[test]
fn decodes_fields_in_expected_positions() {
    let word = isa::encode(opc::ADD, 3, 4, 5, -1);
    let d = isa::decode(word);
    assert_eq!(d.opcode, opc::ADD);
    assert_eq!(d.dst, 3);
    assert_eq!(d.src0, 4);
    assert_eq!(d.src1, 5);
    assert_eq!(d.immediate, -1);
}

#[test]
fn immediate_sign_extends() {
    let word = isa::encode(opc::ADD, 0, 0, 0, -100);
    let d = isa::decode(word);
    assert_eq!(d.immediate, -100);

    let word = isa::encode(opc::ADD, 0, 0, 0, 100);
    let d = isa::decode(word);
    assert_eq!(d.immediate, 100);
}

#[test]
fn undefined_opcodes_decode_without_panicking() {
    for bits in [10, 11, 12, 13, 14, 15, 23, 25, 31] {
        assert_eq!(Opcode::decode(bits), Opcode::Undefined);
    }
}

#[test]
fn known_opcodes_round_trip_through_mnemonic() {
    assert_eq!(Opcode::decode(opc::HLT as u32).mnemonic(), "HLT");
    assert_eq!(Opcode::decode(opc::JIN as u32).mnemonic(), "JIN");
    assert_eq!(Opcode::decode(opc::CPY as u32).mnemonic(), "CPY");
}

#[test]
fn branch_classification() {
    assert!(Opcode::decode(opc::JEQ as u32).is_conditional_branch());
    assert!(!Opcode::decode(opc::JIN as u32).is_conditional_branch());
    assert!(Opcode::decode(opc::JIN as u32).is_branch());
    assert!(!Opcode::decode(opc::ADD as u32).is_branch());
}
