//! A small interpreter over this crate's SSA IR, used only by tests to
//! check that a lowering or an optimization pass preserves a function's
//! observable return value — grounded on `ori_llvm::evaluator`'s
//! "interpret instead of JIT so test assertions stay deterministic" shape,
//! one level removed from a real `inkwell::ExecutionEngine`.

use rustc_hash::FxHashMap;

use crate::ir::{FCmp, ICmp, Module, Op, Reg, Terminator, Value};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EvalValue {
    Int(i64),
    Float(f64),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvalError(pub String);

pub fn eval_function(module: &Module, name: &str, args: &[EvalValue]) -> Result<Option<EvalValue>, EvalError> {
    let function = module.functions.iter().find(|f| f.name == name).ok_or_else(|| EvalError(format!("function `{name}` not found")))?;
    if function.params.len() != args.len() {
        return Err(EvalError(format!("function `{name}` expects {} arguments, got {}", function.params.len(), args.len())));
    }

    let mut env: FxHashMap<Reg, EvalValue> = FxHashMap::default();
    for ((reg, _), value) in function.params.iter().zip(args) {
        env.insert(*reg, *value);
    }

    let mut label = function.blocks.first().map(|b| b.label.clone()).ok_or_else(|| EvalError(format!("function `{name}` has no blocks")))?;
    let mut prev_label: Option<String> = None;

    loop {
        let block = function.blocks.iter().find(|b| b.label == label).ok_or_else(|| EvalError(format!("unknown block `{label}`")))?;

        for phi in &block.phis {
            let prev = prev_label.as_deref().ok_or_else(|| EvalError("phi reached with no predecessor".to_string()))?;
            let (_, v) = phi.incoming.iter().find(|(l, _)| l == prev).ok_or_else(|| EvalError(format!("phi has no edge from `{prev}`")))?;
            env.insert(phi.dest, resolve(v, &env)?);
        }

        for inst in &block.insts {
            let value = eval_op(module, &inst.op, &env)?;
            if let (Some(dest), Some(value)) = (inst.dest, value) {
                env.insert(dest, value);
            }
        }

        match &block.terminator {
            Terminator::Ret(Some(v)) => return Ok(Some(resolve(v, &env)?)),
            Terminator::Ret(None) => return Ok(None),
            Terminator::Br(target) => {
                prev_label = Some(label.clone());
                label = target.clone();
            }
            Terminator::CondBr(cond, then_label, else_label) => {
                let taken = match resolve(cond, &env)? {
                    EvalValue::Int(0) => else_label,
                    EvalValue::Int(_) => then_label,
                    EvalValue::Float(_) => return Err(EvalError("branch condition must be an integer".to_string())),
                };
                prev_label = Some(label.clone());
                label = taken.clone();
            }
        }
    }
}

fn resolve(v: &Value, env: &FxHashMap<Reg, EvalValue>) -> Result<EvalValue, EvalError> {
    match v {
        Value::ConstInt(i) => Ok(EvalValue::Int(*i)),
        Value::ConstFloat(f) => Ok(EvalValue::Float(*f)),
        Value::Reg(r) => env.get(r).copied().ok_or_else(|| EvalError(format!("register %{r} read before it was defined"))),
    }
}

fn eval_op(module: &Module, op: &Op, env: &FxHashMap<Reg, EvalValue>) -> Result<Option<EvalValue>, EvalError> {
    match op {
        Op::AddI(a, b) => int_pair(a, b, env).map(|(a, b)| Some(EvalValue::Int(a.wrapping_add(b)))),
        Op::SubI(a, b) => int_pair(a, b, env).map(|(a, b)| Some(EvalValue::Int(a.wrapping_sub(b)))),
        Op::MulI(a, b) => int_pair(a, b, env).map(|(a, b)| Some(EvalValue::Int(a.wrapping_mul(b)))),
        Op::SDiv(a, b) => int_pair(a, b, env).map(|(a, b)| Some(EvalValue::Int(a.wrapping_div(b)))),
        Op::SRem(a, b) => int_pair(a, b, env).map(|(a, b)| Some(EvalValue::Int(a.wrapping_rem(b)))),
        Op::AndI(a, b) => int_pair(a, b, env).map(|(a, b)| Some(EvalValue::Int(a & b))),
        Op::OrI(a, b) => int_pair(a, b, env).map(|(a, b)| Some(EvalValue::Int(a | b))),
        Op::AddF(a, b) => float_pair(a, b, env).map(|(a, b)| Some(EvalValue::Float(a + b))),
        Op::SubF(a, b) => float_pair(a, b, env).map(|(a, b)| Some(EvalValue::Float(a - b))),
        Op::MulF(a, b) => float_pair(a, b, env).map(|(a, b)| Some(EvalValue::Float(a * b))),
        Op::FDiv(a, b) => float_pair(a, b, env).map(|(a, b)| Some(EvalValue::Float(a / b))),
        Op::ICmp(pred, a, b) => int_pair(a, b, env).map(|(a, b)| {
            let result = match pred {
                ICmp::Eq => a == b,
                ICmp::Ne => a != b,
                ICmp::Slt => a < b,
                ICmp::Sle => a <= b,
                ICmp::Sgt => a > b,
                ICmp::Sge => a >= b,
            };
            Some(EvalValue::Int(i64::from(result)))
        }),
        Op::FCmp(pred, a, b) => float_pair(a, b, env).map(|(a, b)| {
            let result = match pred {
                FCmp::Oeq => a == b,
                FCmp::One => a != b,
                FCmp::Olt => a < b,
                FCmp::Ole => a <= b,
                FCmp::Ogt => a > b,
                FCmp::Oge => a >= b,
            };
            Some(EvalValue::Int(i64::from(result)))
        }),
        Op::NegI(a) => int_one(a, env).map(|a| Some(EvalValue::Int(a.wrapping_neg()))),
        Op::NegF(a) => float_one(a, env).map(|a| Some(EvalValue::Float(-a))),
        Op::BoolNot(a) => int_one(a, env).map(|a| Some(EvalValue::Int(i64::from(a == 0)))),
        Op::FpToSi(a) => float_one(a, env).map(|a| Some(EvalValue::Int(a as i64))),
        Op::SiToFp(a) => int_one(a, env).map(|a| Some(EvalValue::Float(a as f64))),
        Op::Call(callee, args) => {
            let mut values = Vec::with_capacity(args.len());
            for a in args {
                values.push(resolve(a, env)?);
            }
            eval_function(module, callee, &values)
        }
    }
}

fn int_pair(a: &Value, b: &Value, env: &FxHashMap<Reg, EvalValue>) -> Result<(i64, i64), EvalError> {
    match (resolve(a, env)?, resolve(b, env)?) {
        (EvalValue::Int(a), EvalValue::Int(b)) => Ok((a, b)),
        _ => Err(EvalError("expected two integer operands".to_string())),
    }
}

fn float_pair(a: &Value, b: &Value, env: &FxHashMap<Reg, EvalValue>) -> Result<(f64, f64), EvalError> {
    match (resolve(a, env)?, resolve(b, env)?) {
        (EvalValue::Float(a), EvalValue::Float(b)) => Ok((a, b)),
        _ => Err(EvalError("expected two float operands".to_string())),
    }
}

fn int_one(a: &Value, env: &FxHashMap<Reg, EvalValue>) -> Result<i64, EvalError> {
    match resolve(a, env)? {
        EvalValue::Int(a) => Ok(a),
        EvalValue::Float(_) => Err(EvalError("expected an integer operand".to_string())),
    }
}

fn float_one(a: &Value, env: &FxHashMap<Reg, EvalValue>) -> Result<f64, EvalError> {
    match resolve(a, env)? {
        EvalValue::Float(a) => Ok(a),
        EvalValue::Int(_) => Err(EvalError("expected a float operand".to_string())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::optimizer::Optimizer;
    use crate::parser::parse_module;

    #[test]
    fn evaluates_straight_line_addition() {
        let ir = "define i64 @add(i64 %0, i64 %1) {\nentry:\n  %2 = add i64 %0, %1\n  ret i64 %2\n}\n";
        let module = parse_module(ir).expect("valid IR parses");
        let result = eval_function(&module, "add", &[EvalValue::Int(3), EvalValue::Int(4)]).expect("evaluates cleanly");
        assert_eq!(result, Some(EvalValue::Int(7)));
    }

    #[test]
    fn optimization_preserves_the_return_value_of_a_branching_function() {
        let ir = "define i64 @pick(i64 %0) {\nentry:\n  br i1 %0, label %then, label %else\n\nthen:\n  br label %merge\n\nelse:\n  br label %merge\n\nmerge:\n  %1 = phi i64 [ 10, %then ], [ 20, %else ]\n  ret i64 %1\n}\n";
        let optimized = Optimizer::new(2).unwrap().optimize(ir).expect("valid IR optimizes at O2");
        let module = parse_module(&optimized).expect("optimized IR reparses");
        for (input, expected) in [(0, 20), (1, 10)] {
            let result = eval_function(&module, "pick", &[EvalValue::Int(input)]).expect("evaluates cleanly");
            assert_eq!(result, Some(EvalValue::Int(expected)));
        }
    }
}
