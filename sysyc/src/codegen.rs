//! Lowers a loaded Koopa raw program to RISC-V assembly.
//!
//! Every producing instruction has a stack slot from [`FrameLayout`];
//! there is no register allocation. Only `t0`, `t1`, and `a0` ever
//! appear as destinations.

use std::fmt::Write as _;

use koopa::ir::{BinaryOp, FunctionData, Program, Value, ValueKind};
use log::debug;

use crate::layout::FrameLayout;

pub fn run(program: &Program) -> String {
    let mut out = String::new();
    out.push_str("  .text\n");
    for &func in program.func_layout() {
        gen_func(program.func(func), &mut out);
    }
    out
}

fn gen_func(func_data: &FunctionData, out: &mut String) {
    let layout = FrameLayout::build(func_data);
    let name = func_data.name().trim_start_matches('@');
    debug!(
        "codegen: function '{}', frame size {}",
        name, layout.frame_size
    );

    writeln!(out, "  .globl {}", name).unwrap();
    writeln!(out, "{}:", name).unwrap();
    if layout.frame_size > 0 {
        writeln!(out, "  addi sp, sp, -{}", layout.frame_size).unwrap();
    }

    for (_bb, node) in func_data.layout().bbs() {
        for &inst in node.insts().keys() {
            gen_inst(func_data, &layout, inst, out);
        }
    }
}

/// Either an immediate operand or a value already sitting in a stack slot.
enum Operand {
    Imm(i32),
    Slot(usize),
}

fn operand_of(func_data: &FunctionData, layout: &FrameLayout, value: Value) -> Operand {
    match func_data.dfg().value(value).kind() {
        ValueKind::Integer(i) => Operand::Imm(i.value()),
        _ => Operand::Slot(layout.offset_of(value)),
    }
}

fn load_into(out: &mut String, reg: &str, operand: Operand) {
    match operand {
        Operand::Imm(v) => {
            writeln!(out, "  li {}, {}", reg, v).unwrap();
        }
        Operand::Slot(off) => {
            writeln!(out, "  lw {}, {}(sp)", reg, off).unwrap();
        }
    }
}

fn gen_inst(func_data: &FunctionData, layout: &FrameLayout, inst: Value, out: &mut String) {
    let data = func_data.dfg().value(inst);
    match data.kind() {
        ValueKind::Integer(_) | ValueKind::Alloc(_) => {}
        ValueKind::Load(load) => {
            let src = operand_of(func_data, layout, load.src());
            load_into(out, "t0", src);
            writeln!(out, "  sw t0, {}(sp)", layout.offset_of(inst)).unwrap();
        }
        ValueKind::Store(store) => {
            let value = operand_of(func_data, layout, store.value());
            load_into(out, "t0", value);
            writeln!(out, "  sw t0, {}(sp)", layout.offset_of(store.dest())).unwrap();
        }
        ValueKind::Binary(bin) => {
            let lhs = operand_of(func_data, layout, bin.lhs());
            let rhs = operand_of(func_data, layout, bin.rhs());
            load_into(out, "t0", lhs);
            load_into(out, "t1", rhs);
            emit_binary_op(bin.op(), out);
            writeln!(out, "  sw t0, {}(sp)", layout.offset_of(inst)).unwrap();
        }
        ValueKind::Return(ret) => {
            if let Some(value) = ret.value() {
                let operand = operand_of(func_data, layout, value);
                load_into(out, "a0", operand);
            }
            if layout.frame_size > 0 {
                writeln!(out, "  addi sp, sp, {}", layout.frame_size).unwrap();
            }
            out.push_str("  ret\n");
        }
        other => unreachable!("instruction kind not produced by irgen: {other:?}"),
    }
}

/// Lowers a binary operator over `t0`/`t1`, leaving the result in `t0`.
fn emit_binary_op(op: BinaryOp, out: &mut String) {
    match op {
        BinaryOp::Add => out.push_str("  add t0, t0, t1\n"),
        BinaryOp::Sub => out.push_str("  sub t0, t0, t1\n"),
        BinaryOp::Mul => out.push_str("  mul t0, t0, t1\n"),
        BinaryOp::Div => out.push_str("  div t0, t0, t1\n"),
        BinaryOp::Mod => out.push_str("  rem t0, t0, t1\n"),
        BinaryOp::And => out.push_str("  and t0, t0, t1\n"),
        BinaryOp::Or => out.push_str("  or t0, t0, t1\n"),
        BinaryOp::Lt => out.push_str("  slt t0, t0, t1\n"),
        BinaryOp::Gt => out.push_str("  slt t0, t1, t0\n"),
        BinaryOp::Le => {
            out.push_str("  slt t0, t1, t0\n");
            out.push_str("  seqz t0, t0\n");
        }
        BinaryOp::Ge => {
            out.push_str("  slt t0, t0, t1\n");
            out.push_str("  seqz t0, t0\n");
        }
        BinaryOp::Eq => {
            out.push_str("  xor t0, t0, t1\n");
            out.push_str("  seqz t0, t0\n");
        }
        BinaryOp::NotEq => {
            out.push_str("  xor t0, t0, t1\n");
            out.push_str("  snez t0, t0\n");
        }
        other => unreachable!("operator not produced by the IR builder: {other:?}"),
    }
}
