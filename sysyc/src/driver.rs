//! Orchestrates the pipeline: parse → const-eval → IR-gen → (for
//! `-riscv`) load → codegen → write output.
//!
//! Output is written to a temporary file beside the destination and
//! renamed into place only once the whole pipeline has succeeded, so a
//! failing compile never leaves a partial file at the requested path.

use std::io::Write;
use std::path::Path;

use koopa::front::Driver as KoopaDriver;
use log::{debug, info};

use crate::error::CompileError;
use crate::{cli::Mode, codegen, irgen};

pub fn compile(mode: Mode, source: &str, output: &Path) -> Result<(), CompileError> {
    let unit = sysy_parser::parse_program(source)?;
    info!("parsed 1 top-level function");

    let ir_text = irgen::run(&unit)?;
    debug!("irgen produced {} bytes of IR text", ir_text.len());

    let rendered = match mode {
        Mode::Koopa => ir_text,
        Mode::Riscv => {
            let driver: KoopaDriver<_> = ir_text.as_str().into();
            let program = driver
                .generate_program()
                .map_err(|e| CompileError::MalformedIR(format!("{:?}", e)))?;
            codegen::run(&program)
        }
    };

    write_atomically(output, &rendered)?;
    Ok(())
}

fn write_atomically(output: &Path, contents: &str) -> Result<(), CompileError> {
    let dir = output.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
        None => tempfile::NamedTempFile::new()?,
    };
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(output)
        .map_err(|e| CompileError::IOError(e.error))?;
    Ok(())
}
