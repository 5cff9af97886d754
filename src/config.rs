//! TOML configuration for the simulator binary.
//!
//! Every field has a default matching the architectural constants used
//! throughout the design, so the binary runs unconfigured. A config
//! file only needs to name the fields it wants to override.

use serde::Deserialize;

fn default_sram_words() -> usize {
    crate::common::SRAM_WORDS
}

fn default_bht_entries() -> usize {
    crate::common::BHT_ENTRIES
}

fn default_cycle_limit() -> u64 {
    10_000_000
}

fn default_trace() -> bool {
    false
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Emit one diagnostic line per active stage per cycle to stderr.
    #[serde(default = "default_trace")]
    pub trace_stages: bool,
    /// Safety bound on the number of cycles run, independent of HLT.
    #[serde(default = "default_cycle_limit")]
    pub cycle_limit: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            trace_stages: default_trace(),
            cycle_limit: default_cycle_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Size, in 32-bit words, of each of `srami` and `sramd`.
    #[serde(default = "default_sram_words")]
    pub sram_words: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        MemoryConfig {
            sram_words: default_sram_words(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Number of direct-mapped branch history table entries.
    #[serde(default = "default_bht_entries")]
    pub bht_entries: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        PredictorConfig {
            bht_entries: default_bht_entries(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Write `cycle_trace.txt` every cycle.
    #[serde(default = "default_true")]
    pub cycle_trace: bool,
    /// Write `inst_trace.txt` on every retirement.
    #[serde(default = "default_true")]
    pub inst_trace: bool,
    /// Dump `srami_out.txt`/`sramd_out.txt` at halt.
    #[serde(default = "default_true")]
    pub memory_dump: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            cycle_trace: default_true(),
            inst_trace: default_true(),
            memory_dump: default_true(),
        }
    }
}

/// Top-level configuration, loaded from an optional TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub memory: MemoryConfig,
    pub predictor: PredictorConfig,
    pub trace: TraceConfig,
}

impl Config {
    /// Loads and parses a TOML config file, exiting the process on
    /// failure the way the rest of the binary's I/O does.
    pub fn load(path: &str) -> Config {
        let content = std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("[Config] failed to read {}: {}", path, e);
            std::process::exit(1);
        });
        toml::from_str(&content).unwrap_or_else(|e| {
            eprintln!("[Config] failed to parse {}: {}", path, e);
            std::process::exit(1);
        })
    }
}
