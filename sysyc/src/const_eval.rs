//! Walks the AST and folds every `ConstDef` initialiser into the symbol
//! table.
//!
//! Expression evaluation returns `Option<i32>`: `None` means "not a
//! compile-time constant" (an `LVal` naming a variable). Only
//! `ConstDef` initialisers require the result to be `Some`; a bare
//! expression statement never reaches this module.

use log::trace;

use sysy_dsl::ast::*;

use crate::error::CompileError;
use crate::symbol_table::SymbolTable;

pub fn run(block: &Block, symbols: &mut SymbolTable) -> Result<(), CompileError> {
    for item in &block.items {
        if let BlockItem::ConstDecl(decl) = item {
            for def in &decl.defs {
                let value = eval(&def.init, symbols)?.ok_or_else(|| {
                    CompileError::NonConstantInitialiser {
                        name: def.name.clone(),
                    }
                })?;
                trace!("const-eval: {} = {}", def.name, value);
                symbols.define_const(&def.name, value)?;
            }
        }
    }
    Ok(())
}

/// Evaluates `expr` to a constant, or `None` if it depends on a variable.
fn eval(expr: &Expr, symbols: &SymbolTable) -> Result<Option<i32>, CompileError> {
    match expr {
        Expr::Number(v) => Ok(Some(*v)),
        Expr::LVal(lval) => symbols.lookup_const(&lval.name),
        Expr::Unary { op, sub } => {
            let Some(v) = eval(sub, symbols)? else {
                return Ok(None);
            };
            Ok(Some(match op {
                UnaryOp::Plus => v,
                UnaryOp::Neg => v.wrapping_neg(),
                UnaryOp::Not => bool_to_i32(v == 0),
            }))
        }
        Expr::Binary { op, lhs, rhs } => {
            let (Some(l), Some(r)) = (eval(lhs, symbols)?, eval(rhs, symbols)?) else {
                return Ok(None);
            };
            Ok(Some(eval_binary(*op, l, r)?))
        }
    }
}

fn eval_binary(op: BinaryOp, l: i32, r: i32) -> Result<i32, CompileError> {
    Ok(match op {
        BinaryOp::Add => l.wrapping_add(r),
        BinaryOp::Sub => l.wrapping_sub(r),
        BinaryOp::Mul => l.wrapping_mul(r),
        BinaryOp::Div => {
            if r == 0 {
                return Err(CompileError::ConstDivByZero);
            }
            l.wrapping_div(r)
        }
        BinaryOp::Mod => {
            if r == 0 {
                return Err(CompileError::ConstDivByZero);
            }
            l.wrapping_rem(r)
        }
        BinaryOp::Lt => bool_to_i32(l < r),
        BinaryOp::Gt => bool_to_i32(l > r),
        BinaryOp::Le => bool_to_i32(l <= r),
        BinaryOp::Ge => bool_to_i32(l >= r),
        BinaryOp::Eq => bool_to_i32(l == r),
        BinaryOp::Ne => bool_to_i32(l != r),
        BinaryOp::And => bool_to_i32(l != 0 && r != 0),
        BinaryOp::Or => bool_to_i32(l != 0 || r != 0),
    })
}

fn bool_to_i32(b: bool) -> i32 {
    if b {
        1
    } else {
        0
    }
}
