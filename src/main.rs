//! SP simulator CLI.
//!
//! Loads a program image into both SRAMs, runs the pipeline to
//! completion, and writes the per-cycle trace, per-instruction trace,
//! and final memory dumps.

use clap::Parser;
use std::path::PathBuf;
use std::process;

extern crate spsim;

use spsim::config::Config;
use spsim::core::Cpu;
use spsim::sim::{loader, trace::TraceWriter};
use spsim::stats::SimStats;

/// Command-line arguments for the SP simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "SP six-stage pipeline simulator")]
struct Args {
    /// Path to the program image (one 8-hex-digit word per line).
    #[arg(short, long)]
    program: String,

    /// Directory for trace and memory-dump output files.
    #[arg(short, long, default_value = ".")]
    out_dir: String,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Emit one diagnostic line per active stage per cycle to stderr.
    #[arg(long)]
    trace: bool,

    /// Safety bound on the number of cycles run, independent of HLT.
    #[arg(long)]
    cycle_limit: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path),
        None => Config::default(),
    };
    if args.trace {
        config.general.trace_stages = true;
    }
    if let Some(limit) = args.cycle_limit {
        config.general.cycle_limit = limit;
    }

    println!("SP Simulator Configuration");
    println!("--------------------------");
    println!("Program:            {}", args.program);
    println!("Output directory:   {}", args.out_dir);
    println!("SRAM words:         {}", config.memory.sram_words);
    println!("BHT entries:        {}", config.predictor.bht_entries);
    println!("Trace stages:       {}", config.general.trace_stages);
    println!("Cycle limit:        {}", config.general.cycle_limit);
    println!("--------------------------");

    let out_dir = PathBuf::from(&args.out_dir);
    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        eprintln!("[Main] failed to create output directory {}: {}", args.out_dir, e);
        process::exit(1);
    }

    let program = loader::load_program(&args.program);

    let mut cpu = Cpu::new(
        config.memory.sram_words,
        config.predictor.bht_entries,
        config.general.trace_stages,
    );
    loader::install_program(&mut cpu.srami, &mut cpu.sramd, &program);
    cpu.reset();

    let mut tracer = TraceWriter::new(&out_dir, config.trace.cycle_trace, config.trace.inst_trace);
    let mut halt_pc = 0u32;

    loop {
        if cpu.cycle as u64 >= config.general.cycle_limit {
            eprintln!(
                "[Main] cycle limit {} reached without HLT; aborting",
                config.general.cycle_limit
            );
            process::exit(1);
        }

        let retired = cpu.tick();
        tracer.write_cycle(&cpu).unwrap_or_else(|e| {
            eprintln!("[Main] trace write failed: {}", e);
            process::exit(1);
        });
        if let Some(r) = &retired {
            halt_pc = r.pc;
            tracer.write_inst(r).unwrap_or_else(|e| {
                eprintln!("[Main] trace write failed: {}", e);
                process::exit(1);
            });
        }

        if cpu.halted {
            break;
        }
    }

    tracer.write_final(halt_pc, cpu.inst_cnt).ok();
    tracer.flush().ok();

    if config.trace.memory_dump {
        spsim::sim::trace::dump_sram(&out_dir, "srami_out.txt", cpu.srami.words());
        spsim::sim::trace::dump_sram(&out_dir, "sramd_out.txt", cpu.sramd.words());
    }

    let stats = SimStats {
        cycles: cpu.cycle,
        instructions_retired: cpu.inst_cnt,
        load_use_stalls: cpu.stalls_load_use,
        branch_mispredicts: cpu.branch_mispredicts,
        dma_words_copied: cpu.dma_words_copied,
    };
    stats.print();
}
