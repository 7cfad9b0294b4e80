//! Syntax-directed lowering of the AST into Koopa IR text.
//!
//! Assumes `const_eval` has already populated `symbols` with every
//! `Const` binding in the function; this pass only ever adds `Var`
//! bindings, one per `alloc`.

use log::debug;

use sysy_dsl::ast::*;

use crate::error::CompileError;
use crate::ir_builder::IrBuilder;
use crate::symbol_table::SymbolTable;

pub fn run(unit: &CompUnit) -> Result<String, CompileError> {
    let mut builder = IrBuilder::new();
    let mut symbols = SymbolTable::new();

    crate::const_eval::run(&unit.func.body, &mut symbols)?;

    let func = &unit.func;
    let ret_type = match func.ret_type {
        FuncType::Int => "i32",
        FuncType::Void => "void",
    };
    debug!("irgen: lowering function '{}'", func.name);
    builder.start_func(&func.name, ret_type);
    builder.basic_block("entry");
    gen_block(&func.body, &mut builder, &mut symbols)?;
    builder.end_func();

    Ok(builder.finish())
}

fn gen_block(
    block: &Block,
    builder: &mut IrBuilder,
    symbols: &mut SymbolTable,
) -> Result<(), CompileError> {
    for item in &block.items {
        match item {
            BlockItem::ConstDecl(_) => {}
            BlockItem::VarDecl(decl) => gen_var_decl(decl, builder, symbols)?,
            BlockItem::Stmt(stmt) => gen_stmt(stmt, builder, symbols)?,
        }
    }
    Ok(())
}

fn gen_var_decl(
    decl: &VarDecl,
    builder: &mut IrBuilder,
    symbols: &mut SymbolTable,
) -> Result<(), CompileError> {
    for def in &decl.defs {
        let handle = builder.alloc("i32");
        let init = match &def.init {
            Some(expr) => gen_expr(expr, builder, symbols)?,
            None => builder.number(0),
        };
        builder.store(&init, &handle);
        symbols.define_var(&def.name, handle)?;
    }
    Ok(())
}

fn gen_stmt(
    stmt: &Stmt,
    builder: &mut IrBuilder,
    symbols: &mut SymbolTable,
) -> Result<(), CompileError> {
    match stmt {
        Stmt::Assign { target, value } => {
            if symbols.is_const(&target.name) {
                return Err(CompileError::AssignToConst(target.name.clone()));
            }
            let handle = symbols
                .lookup_var(&target.name)?
                .ok_or_else(|| CompileError::UnresolvedName(target.name.clone()))?
                .to_string();
            let v = gen_expr(value, builder, symbols)?;
            builder.store(&v, &handle);
            Ok(())
        }
        Stmt::Return { value } => {
            let v = match value {
                Some(expr) => Some(gen_expr(expr, builder, symbols)?),
                None => None,
            };
            builder.ret(v.as_deref());
            Ok(())
        }
    }
}

fn gen_expr(
    expr: &Expr,
    builder: &mut IrBuilder,
    symbols: &mut SymbolTable,
) -> Result<String, CompileError> {
    match expr {
        Expr::Number(v) => Ok(builder.number(*v)),
        Expr::LVal(lval) => {
            if let Some(v) = symbols.lookup_const(&lval.name)? {
                return Ok(builder.number(v));
            }
            if let Some(handle) = symbols.lookup_var(&lval.name)? {
                let handle = handle.to_string();
                return Ok(builder.load(&handle));
            }
            Err(CompileError::UnresolvedName(lval.name.clone()))
        }
        Expr::Unary { op, sub } => {
            let v = gen_expr(sub, builder, symbols)?;
            Ok(builder.unary(*op, &v))
        }
        Expr::Binary { op, lhs, rhs } => {
            let a = gen_expr(lhs, builder, symbols)?;
            let b = gen_expr(rhs, builder, symbols)?;
            Ok(builder.binary(*op, &a, &b))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(src: &str) -> String {
        let unit = sysy_parser::parse_program(src).unwrap();
        run(&unit).unwrap()
    }

    #[test]
    fn run_when_identity_return_then_matches_expected_ir() {
        let ir = compile("int main() { return 0; }");
        assert!(ir.contains("fun @main(): i32 {"));
        assert!(ir.contains("%entry:"));
        assert!(ir.contains("ret 0"));
    }

    #[test]
    fn run_when_const_folding_then_no_arithmetic_instructions() {
        let ir = compile("int main() { const int a = 1 + 2; const int b = a * 4; return b; }");
        assert!(!ir.contains("add"));
        assert!(!ir.contains("mul"));
        assert!(ir.contains("ret 12"));
    }

    #[test]
    fn run_when_variable_with_assignment_then_store_load_sequence() {
        let ir = compile("int main() { int x = 1; x = x + 2; return x; }");
        assert_eq!(ir.matches("alloc").count(), 1);
        assert_eq!(ir.matches("store").count(), 2);
        assert_eq!(ir.matches("load").count(), 2);
    }

    #[test]
    fn run_when_assign_to_const_then_assign_to_const_error() {
        let unit = sysy_parser::parse_program("int main() { const int c = 5; c = 6; return c; }")
            .unwrap();
        let err = run(&unit).unwrap_err();
        assert!(matches!(err, CompileError::AssignToConst(n) if n == "c"));
    }

    #[test]
    fn run_when_duplicate_var_then_duplicate_definition() {
        let unit =
            sysy_parser::parse_program("int main() { int x = 1; int x = 2; return x; }").unwrap();
        let err = run(&unit).unwrap_err();
        assert!(matches!(err, CompileError::DuplicateDefinition(n) if n == "x"));
    }

    /// Every `%k` named on the right-hand side of an instruction, or as an
    /// operand, must already have appeared as a destination on an earlier
    /// line: the builder never reuses a register and the IR is pure SSA.
    fn assert_every_register_defined_before_use(ir: &str) {
        let mut defined = std::collections::HashSet::new();
        for line in ir.lines() {
            let line = line.trim();
            if line.is_empty() || line.ends_with(':') || line == "{" || line == "}" {
                continue;
            }
            if let Some((dest, rhs)) = line.split_once(" = ") {
                for word in rhs.split([',', ' ']) {
                    if word.starts_with('%') {
                        assert!(
                            defined.contains(word),
                            "{word} used before definition in: {ir}"
                        );
                    }
                }
                defined.insert(dest);
            } else {
                for word in line.split([',', ' ']) {
                    if word.starts_with('%') {
                        assert!(
                            defined.contains(word),
                            "{word} used before definition in: {ir}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn run_when_any_concrete_scenario_then_every_register_defined_before_use() {
        let programs = [
            "int main() { return 0; }",
            "int main() { return -(1 + 2) * 3; }",
            "int main() { const int a = 1 + 2; const int b = a * 4; return b; }",
            "int main() { int x = 1; x = x + 2; return x; }",
            "int main() { return (1 < 2) && (3 != 4); }",
        ];
        for src in programs {
            assert_every_register_defined_before_use(&compile(src));
        }
    }
}
