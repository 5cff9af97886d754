use spsim::core::branch::{BranchPredictor, BranchState};

#[test]
fn starts_strong_not_taken() {
    let bht = BranchPredictor::new(10);
    assert_eq!(bht.predict(3), BranchState::StrongNotTaken);
    assert!(!bht.predict(3).predicts_taken());
}

#[test]
fn saturates_toward_strong_taken() {
    let mut bht = BranchPredictor::new(10);
    for _ in 0..5 {
        bht.update(0, true);
    }
    assert_eq!(bht.predict(0), BranchState::StrongTaken);
}

#[test]
fn saturates_toward_strong_not_taken() {
    let mut bht = BranchPredictor::new(10);
    bht.update(0, true);
    bht.update(0, true);
    assert_eq!(bht.predict(0), BranchState::StrongTaken);
    for _ in 0..5 {
        bht.update(0, false);
    }
    assert_eq!(bht.predict(0), BranchState::StrongNotTaken);
}

#[test]
fn weak_taken_predicts_taken() {
    let mut bht = BranchPredictor::new(10);
    bht.update(0, true);
    bht.update(0, true);
    assert_eq!(bht.predict(0), BranchState::StrongTaken);

    let mut bht2 = BranchPredictor::new(10);
    bht2.update(0, true);
    assert_eq!(bht2.predict(0), BranchState::WeakNotTaken);
    assert!(!bht2.predict(0).predicts_taken());
    bht2.update(0, true);
    assert_eq!(bht2.predict(0), BranchState::WeakTaken);
    assert!(bht2.predict(0).predicts_taken());
}

#[test]
fn table_is_indexed_mod_size() {
    let mut bht = BranchPredictor::new(10);
    bht.update(3, true);
    bht.update(3, true);
    assert_eq!(bht.predict(13), bht.predict(3));
    assert_eq!(bht.predict(3), BranchState::StrongTaken);
    assert_eq!(bht.predict(4), BranchState::StrongNotTaken);
}
