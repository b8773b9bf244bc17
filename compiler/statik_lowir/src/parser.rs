//! A line-oriented reader for this target's own `.ll`-flavored IR text —
//! round-trips exactly the shape [`crate::ir`]'s `Display` impls produce.
//! This is not a general LLVM-IR parser: this target never binds to real
//! LLVM (DESIGN.md records the substitution), so the only text
//! [`crate::optimizer::Optimizer::optimize`] is ever asked to reparse is
//! text this crate itself printed.

use std::iter::Peekable;
use std::str::Lines;

use crate::error::IrParseError;
use crate::ir::{BasicBlock, FCmp, Function, ICmp, IrType, Module, Op, Phi, Reg, Terminator, Value};

fn fail(detail: impl Into<String>) -> IrParseError {
    IrParseError(detail.into())
}

pub fn parse_module(text: &str) -> Result<Module, IrParseError> {
    let mut lines = text.lines().peekable();
    let mut functions = Vec::new();
    loop {
        match lines.peek() {
            None => break,
            Some(line) if line.trim().is_empty() => {
                lines.next();
            }
            _ => functions.push(parse_function(&mut lines)?),
        }
    }
    if functions.is_empty() {
        return Err(fail("no function definitions found"));
    }
    Ok(Module { functions })
}

fn parse_function(lines: &mut Peekable<Lines<'_>>) -> Result<Function, IrParseError> {
    let header = lines.next().ok_or_else(|| fail("expected a function header"))?.trim();
    let rest = header.strip_prefix("define ").ok_or_else(|| fail(format!("expected `define`, got `{header}`")))?;
    let (ret_ty_str, rest) = rest.split_once(' ').ok_or_else(|| fail("malformed function header"))?;
    let ret_ty = parse_ty(ret_ty_str)?;
    let rest = rest.trim_start().strip_prefix('@').ok_or_else(|| fail("expected `@` before function name"))?;
    let (name, rest) = rest.split_once('(').ok_or_else(|| fail("expected `(` after function name"))?;
    let (params_str, rest) = rest.split_once(')').ok_or_else(|| fail("expected `)` closing parameter list"))?;

    let mut params = Vec::new();
    if !params_str.trim().is_empty() {
        for p in params_str.split(',') {
            let p = p.trim();
            let (ty_str, reg_str) = p.split_once(' ').ok_or_else(|| fail(format!("malformed parameter `{p}`")))?;
            params.push((parse_reg(reg_str.trim())?, parse_ty(ty_str)?));
        }
    }
    if !rest.trim_start().starts_with('{') {
        return Err(fail("expected `{` opening function body"));
    }

    let mut blocks = Vec::new();
    loop {
        match lines.peek() {
            None => return Err(fail("unexpected end of input inside function body")),
            Some(line) if line.trim() == "}" => {
                lines.next();
                break;
            }
            Some(line) if line.trim().is_empty() => {
                lines.next();
            }
            _ => blocks.push(parse_block(lines)?),
        }
    }
    if blocks.is_empty() {
        return Err(fail(format!("function `{name}` has no basic blocks")));
    }
    Ok(Function { name: name.to_string(), params, ret_ty, blocks })
}

fn parse_block(lines: &mut Peekable<Lines<'_>>) -> Result<BasicBlock, IrParseError> {
    let header = lines.next().ok_or_else(|| fail("expected a block label"))?.trim();
    let label = header.strip_suffix(':').ok_or_else(|| fail(format!("expected a `label:` header, got `{header}`")))?.to_string();

    let mut phis = Vec::new();
    let mut insts = Vec::new();
    let mut terminator = None;
    loop {
        let line = lines.next().ok_or_else(|| fail(format!("block `{label}` ended without a terminator")))?.trim();
        if line.contains(" = phi ") {
            phis.push(parse_phi(line)?);
        } else if line.starts_with("ret ") || line.starts_with("br ") {
            terminator = Some(parse_terminator(line)?);
            break;
        } else {
            insts.push(parse_instruction(line)?);
        }
    }
    let terminator = terminator.ok_or_else(|| fail(format!("block `{label}` has no terminator")))?;
    Ok(BasicBlock { label, phis, insts, terminator })
}

fn parse_phi(line: &str) -> Result<Phi, IrParseError> {
    let (lhs, rhs) = line.split_once(" = phi ").ok_or_else(|| fail(format!("malformed phi `{line}`")))?;
    let dest = parse_reg(lhs.trim())?;
    let (ty_str, edges_str) = rhs.split_once(' ').ok_or_else(|| fail(format!("malformed phi `{line}`")))?;
    let ty = parse_ty(ty_str)?;

    let mut incoming = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in edges_str.chars() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth -= 1;
                current.push(c);
                if depth == 0 {
                    let inner = current.trim().trim_start_matches('[').trim_end_matches(']').trim();
                    let (val_str, label_str) = inner.split_once(',').ok_or_else(|| fail(format!("malformed phi edge `{current}`")))?;
                    let label = label_str.trim().strip_prefix('%').ok_or_else(|| fail("expected `%` before phi edge label"))?;
                    incoming.push((label.to_string(), parse_value(val_str.trim())?));
                    current.clear();
                }
            }
            _ if depth > 0 => current.push(c),
            _ => {}
        }
    }
    if incoming.is_empty() {
        return Err(fail(format!("phi has no incoming edges in `{line}`")));
    }
    Ok(Phi { dest, ty, incoming })
}

fn parse_terminator(line: &str) -> Result<Terminator, IrParseError> {
    if line == "ret void" {
        return Ok(Terminator::Ret(None));
    }
    if let Some(rest) = line.strip_prefix("ret i64 ") {
        return Ok(Terminator::Ret(Some(parse_value(rest.trim())?)));
    }
    if let Some(rest) = line.strip_prefix("br label %") {
        return Ok(Terminator::Br(rest.trim().to_string()));
    }
    if let Some(rest) = line.strip_prefix("br i1 ") {
        let (cond_str, rest) = rest.split_once(", label %").ok_or_else(|| fail(format!("malformed conditional branch `{line}`")))?;
        let (then_label, rest) = rest.split_once(", label %").ok_or_else(|| fail(format!("malformed conditional branch `{line}`")))?;
        return Ok(Terminator::CondBr(parse_value(cond_str.trim())?, then_label.trim().to_string(), rest.trim().to_string()));
    }
    Err(fail(format!("unrecognized terminator `{line}`")))
}

fn parse_instruction(line: &str) -> Result<crate::ir::Instruction, IrParseError> {
    use crate::ir::Instruction;

    let (dest, rhs) = match line.split_once(" = ") {
        Some((d, r)) => (Some(parse_reg(d.trim())?), r.trim()),
        None => (None, line.trim()),
    };
    let (opname, remainder) = rhs.split_once(' ').ok_or_else(|| fail(format!("empty instruction `{line}`")))?;

    match opname {
        "add" | "sub" | "mul" | "sdiv" | "srem" | "fadd" | "fsub" | "fmul" | "fdiv" | "and" | "or" => {
            let (ty, a, b) = parse_binary_operands(remainder)?;
            let op = match opname {
                "add" => Op::AddI(a, b),
                "sub" => Op::SubI(a, b),
                "mul" => Op::MulI(a, b),
                "sdiv" => Op::SDiv(a, b),
                "srem" => Op::SRem(a, b),
                "fadd" => Op::AddF(a, b),
                "fsub" => Op::SubF(a, b),
                "fmul" => Op::MulF(a, b),
                "fdiv" => Op::FDiv(a, b),
                "and" => Op::AndI(a, b),
                "or" => Op::OrI(a, b),
                _ => unreachable!("matched above"),
            };
            Ok(Instruction { dest, ty, op })
        }
        "icmp" => {
            let (pred, rest) = remainder.split_once(' ').ok_or_else(|| fail(format!("malformed icmp `{line}`")))?;
            let (_ty, a, b) = parse_binary_operands(rest)?;
            Ok(Instruction { dest, ty: IrType::I64, op: Op::ICmp(parse_icmp(pred)?, a, b) })
        }
        "fcmp" => {
            let (pred, rest) = remainder.split_once(' ').ok_or_else(|| fail(format!("malformed fcmp `{line}`")))?;
            let (_ty, a, b) = parse_binary_operands(rest)?;
            Ok(Instruction { dest, ty: IrType::I64, op: Op::FCmp(parse_fcmp(pred)?, a, b) })
        }
        "xor" => {
            let (ty, a, b) = parse_binary_operands(remainder)?;
            if b != Value::ConstInt(1) {
                return Err(fail(format!("unsupported xor operand in `{line}`; only boolean complement is recognized")));
            }
            Ok(Instruction { dest, ty, op: Op::BoolNot(a) })
        }
        "fptosi" => {
            let (a, _to_ty) = parse_convert_operands(remainder)?;
            Ok(Instruction { dest, ty: IrType::I64, op: Op::FpToSi(a) })
        }
        "sitofp" => {
            let (a, _to_ty) = parse_convert_operands(remainder)?;
            Ok(Instruction { dest, ty: IrType::F64, op: Op::SiToFp(a) })
        }
        "call" => parse_call(dest, remainder),
        other => Err(fail(format!("unrecognized opcode `{other}` in `{line}`"))),
    }
}

fn parse_binary_operands(s: &str) -> Result<(IrType, Value, Value), IrParseError> {
    let (ty_str, rest) = s.split_once(' ').ok_or_else(|| fail(format!("malformed operand list `{s}`")))?;
    let ty = parse_ty(ty_str)?;
    let (a_str, b_str) = rest.split_once(',').ok_or_else(|| fail(format!("expected two comma-separated operands in `{s}`")))?;
    Ok((ty, parse_value(a_str.trim())?, parse_value(b_str.trim())?))
}

fn parse_convert_operands(s: &str) -> Result<(Value, IrType), IrParseError> {
    let (ty_str, rest) = s.split_once(' ').ok_or_else(|| fail(format!("malformed conversion `{s}`")))?;
    let _from_ty = parse_ty(ty_str)?;
    let (val_str, to_str) = rest.split_once(" to ").ok_or_else(|| fail(format!("expected ` to ` in conversion `{s}`")))?;
    Ok((parse_value(val_str.trim())?, parse_ty(to_str.trim())?))
}

fn parse_call(dest: Option<Reg>, s: &str) -> Result<crate::ir::Instruction, IrParseError> {
    use crate::ir::Instruction;

    let (ty_str, rest) = s.split_once(' ').ok_or_else(|| fail(format!("malformed call `{s}`")))?;
    let ty = parse_ty(ty_str)?;
    let rest = rest.trim_start().strip_prefix('@').ok_or_else(|| fail("expected `@` before callee name"))?;
    let (callee, rest) = rest.split_once('(').ok_or_else(|| fail("expected `(` after callee name"))?;
    let args_str = rest.strip_suffix(')').ok_or_else(|| fail("expected `)` closing call arguments"))?;

    let mut args = Vec::new();
    if !args_str.trim().is_empty() {
        for a in args_str.split(',') {
            let a = a.trim();
            let (_arg_ty, val) = a.split_once(' ').ok_or_else(|| fail(format!("malformed call argument `{a}`")))?;
            args.push(parse_value(val.trim())?);
        }
    }
    Ok(Instruction { dest, ty, op: Op::Call(callee.to_string(), args) })
}

fn parse_icmp(s: &str) -> Result<ICmp, IrParseError> {
    match s {
        "eq" => Ok(ICmp::Eq),
        "ne" => Ok(ICmp::Ne),
        "slt" => Ok(ICmp::Slt),
        "sle" => Ok(ICmp::Sle),
        "sgt" => Ok(ICmp::Sgt),
        "sge" => Ok(ICmp::Sge),
        other => Err(fail(format!("unrecognized icmp predicate `{other}`"))),
    }
}

fn parse_fcmp(s: &str) -> Result<FCmp, IrParseError> {
    match s {
        "oeq" => Ok(FCmp::Oeq),
        "one" => Ok(FCmp::One),
        "olt" => Ok(FCmp::Olt),
        "ole" => Ok(FCmp::Ole),
        "ogt" => Ok(FCmp::Ogt),
        "oge" => Ok(FCmp::Oge),
        other => Err(fail(format!("unrecognized fcmp predicate `{other}`"))),
    }
}

fn parse_ty(s: &str) -> Result<IrType, IrParseError> {
    match s.trim() {
        "i64" => Ok(IrType::I64),
        "double" => Ok(IrType::F64),
        "void" => Ok(IrType::Void),
        other => Err(fail(format!("unrecognized type `{other}`"))),
    }
}

fn parse_reg(s: &str) -> Result<Reg, IrParseError> {
    let s = s.trim();
    let digits = s.strip_prefix('%').ok_or_else(|| fail(format!("expected a `%register`, got `{s}`")))?;
    digits.parse::<Reg>().map_err(|_| fail(format!("invalid register `{s}`")))
}

fn parse_value(s: &str) -> Result<Value, IrParseError> {
    let s = s.trim();
    if let Some(digits) = s.strip_prefix('%') {
        return digits.parse::<Reg>().map(Value::Reg).map_err(|_| fail(format!("invalid register `{s}`")));
    }
    if let Ok(i) = s.parse::<i64>() {
        return Ok(Value::ConstInt(i));
    }
    if let Ok(f) = s.parse::<f64>() {
        return Ok(Value::ConstFloat(f));
    }
    Err(fail(format!("unrecognized value `{s}`")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn rejects_text_with_no_function_definitions() {
        let err = parse_module("this is not valid low-level IR").unwrap_err();
        assert!(err.0.contains("no function definitions"));
    }

    #[test]
    fn round_trips_a_straight_line_function() {
        let text = "define i64 @add(i64 %0, i64 %1) {\nentry:\n  %2 = add i64 %0, %1\n  ret i64 %2\n}\n";
        let module = parse_module(text).expect("valid IR parses");
        assert_eq!(module.functions.len(), 1);
        assert_eq!(module.functions[0].name, "add");
        let printed = module.to_string();
        assert!(printed.contains("add i64"));
        assert!(printed.contains("ret i64"));
    }

    #[test]
    fn round_trips_phi_nodes() {
        let text = "define i64 @pick(i64 %0) {\nentry:\n  br i1 %0, label %then, label %else\n\nthen:\n  br label %merge\n\nelse:\n  br label %merge\n\nmerge:\n  %1 = phi i64 [ 1, %then ], [ 2, %else ]\n  ret i64 %1\n}\n";
        let module = parse_module(text).expect("valid IR with phis parses");
        let merge = module.functions[0].blocks.iter().find(|b| b.label == "merge").expect("merge block exists");
        assert_eq!(merge.phis.len(), 1);
        assert_eq!(merge.phis[0].incoming.len(), 2);
    }
}
