//! Primary parser for the source language. The parser transforms text
//! directly into `sysy_dsl::ast` objects.
//!
//! Rules are grouped by precedence level, from loosest (`lor_exp`, logical
//! or) to tightest (`unary_exp`). Left-associative binary operators are
//! built with a `**`-repeated tail folded onto the leftmost operand rather
//! than direct left recursion, since `peg` is a PEG parser and cannot
//! recurse left.

use peg::parser;
use sysy_dsl::ast::*;

use crate::error::ParseError;
use crate::keyword::is_keyword;

/// Parses a complete source file into a `CompUnit`.
pub fn parse_program(source: &str) -> Result<CompUnit, ParseError> {
    sysy_parser::comp_unit(source).map_err(ParseError::from)
}

parser! {
    grammar sysy_parser() for str {

        rule _() = quiet!{[' ' | '\n' | '\r' | '\t']*}

        rule kw(literal: &'static str) -> ()
            = input:$([_]*<{literal.len()}>) !ID_CHAR() {? if input == literal { Ok(()) } else { Err(literal) } }

        rule ID_CHAR() = ['a'..='z' | 'A'..='Z' | '0'..='9' | '_']
        rule ID_START() = ['a'..='z' | 'A'..='Z' | '_']

        rule identifier() -> String
            = quiet!{ s:$(ID_START() ID_CHAR()*) {? if is_keyword(s) { Err("identifier") } else { Ok(s.to_string()) } } }
            / expected!("identifier")

        rule dec_literal() -> i32 = n:$(['1'..='9'] ['0'..='9']*) {? i32::from_str_radix(n, 10).map_err(|_| "decimal literal") }
        rule hex_literal() -> i32 = ("0x" / "0X") n:$(['0'..='9' | 'a'..='f' | 'A'..='F']+) {? i32::from_str_radix(n, 16).map_err(|_| "hex literal") }
        rule oct_literal() -> i32 = "0" n:$(['0'..='7']*) {? if n.is_empty() { Ok(0) } else { i32::from_str_radix(n, 8).map_err(|_| "octal literal") } }

        rule number() -> i32 = hex_literal() / oct_literal() / dec_literal()

        pub rule comp_unit() -> CompUnit
            = _ f:func_def() _ { CompUnit { func: f } }

        rule func_type() -> FuncType
            = kw("int") { FuncType::Int }
            / kw("void") { FuncType::Void }

        rule func_def() -> FuncDef
            = ret_type:func_type() _ name:identifier() _ "(" _ ")" _ body:block() {
                FuncDef { ret_type, name, body }
            }

        rule block() -> Block
            = "{" _ items:(i:block_item() _ { i })* "}" { Block { items } }

        rule block_item() -> BlockItem
            = d:const_decl() { BlockItem::ConstDecl(d) }
            / d:var_decl() { BlockItem::VarDecl(d) }
            / s:stmt() { BlockItem::Stmt(s) }

        rule const_decl() -> ConstDecl
            = kw("const") _ kw("int") _ defs:(d:const_def() _ { d }) ++ (_ "," _) _ ";" {
                ConstDecl { defs }
            }

        rule const_def() -> ConstDef
            = name:identifier() _ "=" _ init:expr() { ConstDef { name, init } }

        rule var_decl() -> VarDecl
            = kw("int") _ defs:(d:var_def() _ { d }) ++ (_ "," _) _ ";" {
                VarDecl { defs }
            }

        rule var_def() -> VarDef
            = name:identifier() _ "=" _ init:expr() { VarDef { name, init: Some(init) } }
            / name:identifier() { VarDef { name, init: None } }

        rule stmt() -> Stmt
            = target:lval() _ "=" _ value:expr() _ ";" { Stmt::Assign { target, value } }
            / kw("return") _ value:expr() _ ";" { Stmt::Return { value: Some(value) } }
            / kw("return") _ ";" { Stmt::Return { value: None } }

        rule lval() -> LVal
            = name:identifier() { LVal { name } }

        pub rule expr() -> Expr = lor_exp()

        rule lor_exp() -> Expr
            = lhs:land_exp() tail:(_ "||" _ e:land_exp() { e })* {
                tail.into_iter().fold(lhs, |acc, rhs| Expr::binary(BinaryOp::Or, acc, rhs))
            }

        rule land_exp() -> Expr
            = lhs:eq_exp() tail:(_ "&&" _ e:eq_exp() { e })* {
                tail.into_iter().fold(lhs, |acc, rhs| Expr::binary(BinaryOp::And, acc, rhs))
            }

        rule eq_exp() -> Expr
            = lhs:rel_exp() tail:(_ op:$("==" / "!=") _ e:rel_exp() { (op, e) })* {
                tail.into_iter().fold(lhs, |acc, (op, rhs)| {
                    let op = if op == "==" { BinaryOp::Eq } else { BinaryOp::Ne };
                    Expr::binary(op, acc, rhs)
                })
            }

        rule rel_exp() -> Expr
            = lhs:add_exp() tail:(_ op:$("<=" / ">=" / "<" / ">") _ e:add_exp() { (op, e) })* {
                tail.into_iter().fold(lhs, |acc, (op, rhs)| {
                    let op = match op {
                        "<=" => BinaryOp::Le,
                        ">=" => BinaryOp::Ge,
                        "<" => BinaryOp::Lt,
                        _ => BinaryOp::Gt,
                    };
                    Expr::binary(op, acc, rhs)
                })
            }

        rule add_exp() -> Expr
            = lhs:mul_exp() tail:(_ op:$("+" / "-") _ e:mul_exp() { (op, e) })* {
                tail.into_iter().fold(lhs, |acc, (op, rhs)| {
                    let op = if op == "+" { BinaryOp::Add } else { BinaryOp::Sub };
                    Expr::binary(op, acc, rhs)
                })
            }

        rule mul_exp() -> Expr
            = lhs:unary_exp() tail:(_ op:$("*" / "/" / "%") _ e:unary_exp() { (op, e) })* {
                tail.into_iter().fold(lhs, |acc, (op, rhs)| {
                    let op = match op {
                        "*" => BinaryOp::Mul,
                        "/" => BinaryOp::Div,
                        _ => BinaryOp::Mod,
                    };
                    Expr::binary(op, acc, rhs)
                })
            }

        rule unary_exp() -> Expr
            = op:$("+" / "-" / "!") _ e:unary_exp() {
                let op = match op {
                    "+" => UnaryOp::Plus,
                    "-" => UnaryOp::Neg,
                    _ => UnaryOp::Not,
                };
                Expr::unary(op, e)
            }
            / primary_exp()

        rule primary_exp() -> Expr
            = "(" _ e:expr() _ ")" { e }
            / n:number() { Expr::Number(n) }
            / l:lval() { Expr::LVal(l) }
    }
}
