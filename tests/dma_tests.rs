use spsim::core::dma::{Dma, DmaState};

#[test]
fn idle_until_started() {
    let dma = Dma::default();
    assert_eq!(dma.state, DmaState::Idle);
    assert!(!dma.is_active());
    assert!(dma.is_done());
}

#[test]
fn start_latches_operands_and_marks_active() {
    let mut dma = Dma::default();
    dma.start(0x100, 0x200, 4);
    assert!(dma.is_active());
    assert!(dma.busy);
    assert_eq!(dma.source, 0x100);
    assert_eq!(dma.destination, 0x200);
    assert_eq!(dma.remaining, 4);
}

#[test]
fn zero_length_copy_is_immediately_done() {
    let mut dma = Dma::default();
    dma.start(0x100, 0x200, 0);
    assert!(!dma.is_active());
    assert!(dma.is_done());
}

#[test]
fn a_second_start_is_ignored_while_busy() {
    let mut dma = Dma::default();
    dma.start(0x100, 0x200, 4);
    dma.start(0x999, 0x999, 1);
    assert_eq!(dma.source, 0x100);
    assert_eq!(dma.destination, 0x200);
    assert_eq!(dma.remaining, 4);
}
