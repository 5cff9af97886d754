//! Autonomous DMA copy engine.
//!
//! A three-state machine that copies `remaining` words from `source`
//! to `destination` in `sramd`, one word per WAIT/ACTIVE round-trip,
//! arbitrating for the data-memory port against the pipeline. The
//! pipeline always wins: the engine only advances out of IDLE, or from
//! ACTIVE back into WAIT, when the port is free this cycle.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DmaState {
    #[default]
    Idle,
    Wait,
    Active,
}

#[derive(Clone, Debug, Default)]
pub struct Dma {
    pub state: DmaState,
    pub source: u32,
    pub destination: u32,
    pub remaining: u32,
    pub busy: bool,
    pub active: bool,
}

impl Dma {
    /// Latches a CPY instruction's operands. Only takes effect when
    /// the engine is not already busy; the caller (exec0) is
    /// responsible for not issuing a second CPY while one is in
    /// flight.
    pub fn start(&mut self, source: i32, destination: i32, length: i32) {
        if self.busy {
            return;
        }
        self.source = source as u32;
        self.destination = destination as u32;
        self.remaining = length.max(0) as u32;
        if self.remaining == 0 {
            self.active = false;
            self.busy = false;
            self.state = DmaState::Idle;
            return;
        }
        self.active = true;
        self.busy = true;
        self.state = DmaState::Idle;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_done(&self) -> bool {
        !self.active && !self.busy
    }
}
