//! Command-line surface: `sysyc MODE INPUT -o OUTPUT [-v]... [--log-file PATH]`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "sysyc", about = "Compiles a sysyc source file to Koopa IR or RISC-V assembly")]
pub struct Args {
    /// Compilation target: `-koopa` for IR text, `-riscv` for assembly.
    #[arg(allow_hyphen_values = true)]
    pub mode: Mode,

    /// Source file to compile.
    pub input: PathBuf,

    /// Destination file for the compiled output.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Turn on verbose logging. Repeat to increase verbosity.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Sets the logging to write to a file instead of stderr.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    #[value(name = "-koopa")]
    Koopa,
    #[value(name = "-riscv")]
    Riscv,
}
