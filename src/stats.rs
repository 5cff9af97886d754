//! Run summary, printed once at halt.

#[derive(Debug, Default)]
pub struct SimStats {
    pub cycles: u32,
    pub instructions_retired: u32,
    pub load_use_stalls: u32,
    pub branch_mispredicts: u32,
    pub dma_words_copied: u32,
}

impl SimStats {
    pub fn print(&self) {
        println!("Simulation Summary");
        println!("------------------");
        println!("Cycles:              {}", self.cycles);
        println!("Instructions retired:{:>6}", self.instructions_retired);
        println!("Load-after-store stalls: {}", self.load_use_stalls);
        println!("Branch mispredicts:  {}", self.branch_mispredicts);
        println!("DMA words copied:    {}", self.dma_words_copied);
        if self.cycles > 0 {
            let ipc = self.instructions_retired as f64 / self.cycles as f64;
            println!("IPC:                 {:.3}", ipc);
        }
        println!("------------------");
    }
}
