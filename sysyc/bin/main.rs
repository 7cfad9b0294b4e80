use clap::Parser;
use log::error;

use sysyc::cli::Args;
use sysyc::{driver, logger};

fn main() {
    let args = Args::parse();

    if let Err(e) = logger::configure(args.verbose, args.log_file.clone()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), sysyc::CompileError> {
    let source = std::fs::read_to_string(&args.input)?;
    driver::compile(args.mode, &source, &args.output)
}
