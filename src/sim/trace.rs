//! Trace and memory-dump output.
//!
//! Three kinds of file are produced: a per-cycle snapshot trace, a
//! per-retired-instruction trace, and a pair of full memory dumps
//! emitted once at halt.

use crate::core::{Cpu, RetiredInst};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;

pub struct TraceWriter {
    cycle_trace: Option<BufWriter<File>>,
    inst_trace: Option<BufWriter<File>>,
}

fn create(dir: &Path, name: &str) -> BufWriter<File> {
    let path = dir.join(name);
    let file = File::create(&path).unwrap_or_else(|e| {
        eprintln!("[Trace] failed to create {}: {}", path.display(), e);
        process::exit(1);
    });
    BufWriter::new(file)
}

impl TraceWriter {
    pub fn new(dir: &Path, cycle_trace: bool, inst_trace: bool) -> TraceWriter {
        TraceWriter {
            cycle_trace: cycle_trace.then(|| create(dir, "cycle_trace.txt")),
            inst_trace: inst_trace.then(|| create(dir, "inst_trace.txt")),
        }
    }

    /// Appends one per-cycle block: the cycle counter, r2..r7, and
    /// every pipeline latch field as 8-hex-digit values.
    pub fn write_cycle(&mut self, cpu: &Cpu) -> io::Result<()> {
        let Some(w) = self.cycle_trace.as_mut() else {
            return Ok(());
        };

        let regs = cpu.regs.snapshot();
        writeln!(w, "cycle {:08x}", cpu.cycle)?;
        for (i, r) in regs.iter().enumerate().skip(2) {
            writeln!(w, "r{} {:08x}", i, *r as u32)?;
        }

        let p = &cpu.old;
        writeln!(
            w,
            "fetch0 active={:08x} pc={:08x}",
            p.fetch0.active as u32, p.fetch0.pc
        )?;
        writeln!(
            w,
            "fetch1 active={:08x} pc={:08x}",
            p.fetch1.active as u32, p.fetch1.pc
        )?;
        writeln!(
            w,
            "dec0   active={:08x} pc={:08x} inst={:08x}",
            p.dec0.active as u32, p.dec0.pc, p.dec0.inst
        )?;
        writeln!(
            w,
            "dec1   active={:08x} pc={:08x} op={} dst={:08x} src0={:08x} src1={:08x} \
             imm={:08x} predicted_taken={:08x}",
            p.dec1.active as u32,
            p.dec1.pc,
            p.dec1.opcode.mnemonic(),
            p.dec1.dst,
            p.dec1.src0,
            p.dec1.src1,
            p.dec1.immediate as u32,
            p.dec1.predicted_taken as u32
        )?;
        writeln!(
            w,
            "exec0  active={:08x} pc={:08x} op={} dst={:08x} operand0={:08x} \
             operand1={:08x} aux={:08x} imm={:08x} predicted_taken={:08x}",
            p.exec0.active as u32,
            p.exec0.pc,
            p.exec0.opcode.mnemonic(),
            p.exec0.dst,
            p.exec0.operand0 as u32,
            p.exec0.operand1 as u32,
            p.exec0.aux as u32,
            p.exec0.immediate as u32,
            p.exec0.predicted_taken as u32
        )?;
        writeln!(
            w,
            "exec1  active={:08x} pc={:08x} op={} dst={:08x} alu0={:08x} alu1={:08x} \
             aluout={:08x} imm={:08x} predicted_taken={:08x}",
            p.exec1.active as u32,
            p.exec1.pc,
            p.exec1.opcode.mnemonic(),
            p.exec1.dst,
            p.exec1.alu0 as u32,
            p.exec1.alu1 as u32,
            p.exec1.aluout as u32,
            p.exec1.immediate as u32,
            p.exec1.predicted_taken as u32
        )?;
        writeln!(w)
    }

    /// Appends one per-retired-instruction block.
    pub fn write_inst(&mut self, r: &RetiredInst) -> io::Result<()> {
        let Some(w) = self.inst_trace.as_mut() else {
            return Ok(());
        };

        writeln!(w, "instruction {}", r.index)?;
        writeln!(w, "pc {:08x}", r.pc)?;
        writeln!(w, "opcode {}", r.opcode.mnemonic())?;
        writeln!(w, "dst r{}", r.dst)?;
        writeln!(w, "aluout {:08x}", r.aluout as u32)?;
        for (i, v) in r.regs.iter().enumerate() {
            writeln!(w, "r{} {:08x}", i, *v as u32)?;
        }
        writeln!(w)
    }

    /// Writes the final summary line once the simulator halts.
    pub fn write_final(&mut self, pc: u32, inst_cnt: u32) -> io::Result<()> {
        if let Some(w) = self.inst_trace.as_mut() {
            writeln!(w, "sim finished at pc {:08x}, {} instructions", pc, inst_cnt)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(w) = self.cycle_trace.as_mut() {
            w.flush()?;
        }
        if let Some(w) = self.inst_trace.as_mut() {
            w.flush()?;
        }
        Ok(())
    }
}

/// Dumps a full SRAM image to `dir/name`, one 8-hex-digit word per
/// line.
pub fn dump_sram(dir: &Path, name: &str, words: &[u32]) {
    let path = dir.join(name);
    let file = File::create(&path).unwrap_or_else(|e| {
        eprintln!("[Trace] failed to create {}: {}", path.display(), e);
        process::exit(1);
    });
    let mut w = BufWriter::new(file);
    for word in words {
        let _ = writeln!(w, "{:08x}", word);
    }
    let _ = w.flush();
}
