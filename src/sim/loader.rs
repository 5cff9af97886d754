//! Program image loading.
//!
//! Images are plain text: one 8-hex-digit word per line. The loader
//! writes the image into both `srami` and `sramd` starting at address
//! 0, since the original hardware's instruction and data SRAMs are
//! loaded from the same initial image.

use crate::sim::sram::Sram;
use std::fs;
use std::process;

/// Reads `path` and parses it as a list of 8-hex-digit words, one per
/// line. Exits the process with a diagnostic on any I/O or parse
/// failure; there is no recovery path for a malformed program image.
pub fn load_program(path: &str) -> Vec<u32> {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("[Loader] failed to read program {}: {}", path, e);
        process::exit(1);
    });

    let mut words = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match u32::from_str_radix(line, 16) {
            Ok(word) => words.push(word),
            Err(e) => {
                eprintln!(
                    "[Loader] {}:{}: invalid hex word {:?}: {}",
                    path,
                    lineno + 1,
                    line,
                    e
                );
                process::exit(1);
            }
        }
    }
    words
}

/// Seeds both SRAMs from a parsed program image starting at address 0.
pub fn install_program(srami: &mut Sram, sramd: &mut Sram, program: &[u32]) {
    if program.len() > srami.len() {
        eprintln!(
            "[Loader] program has {} words, exceeds {}-word SRAM; truncating",
            program.len(),
            srami.len()
        );
    }
    for (addr, &word) in program.iter().enumerate().take(srami.len()) {
        srami.inject(addr, word);
        sramd.inject(addr, word);
    }
}
