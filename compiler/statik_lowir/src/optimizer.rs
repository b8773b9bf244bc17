//! The low-level IR target's four-level optimizer (spec.md §4.8), grounded
//! on `original_source/tests/test_llvm_optimization.py`'s exact assertions:
//! `_get_inlining_threshold()` per level (0/75/225/275), `get_optimization_info()`'s
//! record shape, and `"Optimization level must be 0-3"`/`"Failed to parse
//! LLVM IR"` translated to [`InvalidOptimizationLevel`]/[`IrParseError`].
//!
//! Vectorization and loop-unrolling are reported as level capabilities
//! (`get_optimization_info`'s flags) without a corresponding pass: this
//! target's IR has no array/vector types and no induction-variable
//! analysis, so there is nothing for either transform to act on yet
//! (DESIGN.md). The passes that do run — constant folding, dead-code
//! elimination, and trivial single-block inlining up to the level's
//! threshold — are exactly the "declarative pass list" spec.md §4.8 calls
//! for, reframed around this crate's direct-SSA IR rather than the
//! alloca/load/store form a real `opt` pipeline would start from (so
//! "redundant load/store removal" becomes dead-code elimination over SSA
//! registers instead).

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{InvalidOptimizationLevel, IrParseError};
use crate::ir::{Function, Instruction, Module, Op, Reg, Terminator, Value};
use crate::parser::parse_module;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptimizationInfo {
    pub opt_level: i32,
    pub opt_name: &'static str,
    pub inlining_threshold: i32,
    pub vectorization_enabled: bool,
    pub loop_unrolling_enabled: bool,
    pub target_triple: String,
}

pub struct Optimizer {
    level: i32,
}

impl Optimizer {
    pub fn new(level: i32) -> Result<Self, InvalidOptimizationLevel> {
        if !(0..=3).contains(&level) {
            return Err(InvalidOptimizationLevel(level));
        }
        Ok(Optimizer { level })
    }

    pub fn opt_level(&self) -> i32 {
        self.level
    }

    fn inlining_threshold(&self) -> i32 {
        match self.level {
            0 => 0,
            1 => 75,
            2 => 225,
            3 => 275,
            other => unreachable!("optimization level {other} rejected at construction"),
        }
    }

    fn vectorization_enabled(&self) -> bool {
        self.level >= 2
    }

    fn loop_unrolling_enabled(&self) -> bool {
        self.level >= 1
    }

    pub fn get_optimization_info(&self) -> OptimizationInfo {
        OptimizationInfo {
            opt_level: self.level,
            opt_name: match self.level {
                0 => "O0",
                1 => "O1",
                2 => "O2",
                3 => "O3",
                other => unreachable!("optimization level {other} rejected at construction"),
            },
            inlining_threshold: self.inlining_threshold(),
            vectorization_enabled: self.vectorization_enabled(),
            loop_unrolling_enabled: self.loop_unrolling_enabled(),
            target_triple: "x86_64-unknown-unknown".to_string(),
        }
    }

    /// Parses `ir`, runs this level's pass pipeline, and reprints. O0 only
    /// reparses and reprints (spec.md §4.8: "O0 preserves IR structure").
    pub fn optimize(&self, ir: &str) -> Result<String, IrParseError> {
        let mut module = parse_module(ir)?;
        if self.level == 0 {
            return Ok(module.to_string());
        }
        for function in &mut module.functions {
            fold_constants(function);
            eliminate_dead_code(function);
        }
        inline_trivial_calls(&mut module, self.inlining_threshold());
        for function in &mut module.functions {
            eliminate_dead_code(function);
        }
        Ok(module.to_string())
    }
}

fn op_values(op: &Op) -> Vec<&Value> {
    match op {
        Op::AddI(a, b)
        | Op::SubI(a, b)
        | Op::MulI(a, b)
        | Op::SDiv(a, b)
        | Op::SRem(a, b)
        | Op::AddF(a, b)
        | Op::SubF(a, b)
        | Op::MulF(a, b)
        | Op::FDiv(a, b)
        | Op::AndI(a, b)
        | Op::OrI(a, b)
        | Op::ICmp(_, a, b)
        | Op::FCmp(_, a, b) => vec![a, b],
        Op::NegI(a) | Op::NegF(a) | Op::BoolNot(a) | Op::FpToSi(a) | Op::SiToFp(a) => vec![a],
        Op::Call(_, args) => args.iter().collect(),
    }
}

fn op_values_mut(op: &mut Op) -> Vec<&mut Value> {
    match op {
        Op::AddI(a, b)
        | Op::SubI(a, b)
        | Op::MulI(a, b)
        | Op::SDiv(a, b)
        | Op::SRem(a, b)
        | Op::AddF(a, b)
        | Op::SubF(a, b)
        | Op::MulF(a, b)
        | Op::FDiv(a, b)
        | Op::AndI(a, b)
        | Op::OrI(a, b)
        | Op::ICmp(_, a, b)
        | Op::FCmp(_, a, b) => vec![a, b],
        Op::NegI(a) | Op::NegF(a) | Op::BoolNot(a) | Op::FpToSi(a) | Op::SiToFp(a) => vec![a],
        Op::Call(_, args) => args.iter_mut().collect(),
    }
}

fn substitute_value(v: &mut Value, subst: &FxHashMap<Reg, Value>) {
    if let Value::Reg(r) = *v {
        if let Some(replacement) = subst.get(&r) {
            *v = replacement.clone();
        }
    }
}

fn rewrite_op(op: &mut Op, subst: &FxHashMap<Reg, Value>) {
    for v in op_values_mut(op) {
        substitute_value(v, subst);
    }
}

fn rewrite_terminator(term: &mut Terminator, subst: &FxHashMap<Reg, Value>) {
    match term {
        Terminator::Ret(Some(v)) => substitute_value(v, subst),
        Terminator::CondBr(v, _, _) => substitute_value(v, subst),
        Terminator::Ret(None) | Terminator::Br(_) => {}
    }
}

/// Folds operations whose operands are already both constants, threading
/// the folded value forward as a register substitution rather than
/// renumbering — later passes (dead-code elimination) remove the
/// instruction the substitution made unreachable.
fn try_fold(op: &Op) -> Option<Value> {
    match op {
        Op::AddI(Value::ConstInt(a), Value::ConstInt(b)) => Some(Value::ConstInt(a.wrapping_add(*b))),
        Op::SubI(Value::ConstInt(a), Value::ConstInt(b)) => Some(Value::ConstInt(a.wrapping_sub(*b))),
        Op::MulI(Value::ConstInt(a), Value::ConstInt(b)) => Some(Value::ConstInt(a.wrapping_mul(*b))),
        Op::AndI(Value::ConstInt(a), Value::ConstInt(b)) => Some(Value::ConstInt(a & b)),
        Op::OrI(Value::ConstInt(a), Value::ConstInt(b)) => Some(Value::ConstInt(a | b)),
        Op::AddF(Value::ConstFloat(a), Value::ConstFloat(b)) => Some(Value::ConstFloat(a + b)),
        Op::SubF(Value::ConstFloat(a), Value::ConstFloat(b)) => Some(Value::ConstFloat(a - b)),
        Op::MulF(Value::ConstFloat(a), Value::ConstFloat(b)) => Some(Value::ConstFloat(a * b)),
        Op::NegI(Value::ConstInt(a)) => Some(Value::ConstInt(a.wrapping_neg())),
        Op::NegF(Value::ConstFloat(a)) => Some(Value::ConstFloat(-a)),
        Op::BoolNot(Value::ConstInt(a)) => Some(Value::ConstInt(i64::from(*a == 0))),
        // Division/modulus are left unfolded: a zero divisor in dead code
        // would otherwise panic the optimizer itself rather than the
        // program it is optimizing.
        _ => None,
    }
}

fn fold_constants(function: &mut Function) {
    let mut subst: FxHashMap<Reg, Value> = FxHashMap::default();
    for block in &mut function.blocks {
        for phi in &mut block.phis {
            for (_, v) in &mut phi.incoming {
                substitute_value(v, &subst);
            }
        }
        for inst in &mut block.insts {
            rewrite_op(&mut inst.op, &subst);
            if let (Some(dest), Some(folded)) = (inst.dest, try_fold(&inst.op)) {
                subst.insert(dest, folded);
            }
        }
        rewrite_terminator(&mut block.terminator, &subst);
    }
}

fn eliminate_dead_code(function: &mut Function) {
    loop {
        let mut used: FxHashSet<Reg> = FxHashSet::default();
        for block in &function.blocks {
            for phi in &block.phis {
                for (_, v) in &phi.incoming {
                    if let Value::Reg(r) = v {
                        used.insert(*r);
                    }
                }
            }
            for inst in &block.insts {
                for v in op_values(&inst.op) {
                    if let Value::Reg(r) = v {
                        used.insert(*r);
                    }
                }
            }
            match &block.terminator {
                Terminator::Ret(Some(Value::Reg(r))) | Terminator::CondBr(Value::Reg(r), _, _) => {
                    used.insert(*r);
                }
                _ => {}
            }
        }

        let mut changed = false;
        for block in &mut function.blocks {
            let before = block.insts.len();
            block.insts.retain(|inst| match inst.dest {
                // a call may have side effects independent of its result
                Some(d) if !matches!(inst.op, Op::Call(..)) => used.contains(&d),
                _ => true,
            });
            changed |= block.insts.len() != before;

            let phis_before = block.phis.len();
            block.phis.retain(|phi| used.contains(&phi.dest));
            changed |= block.phis.len() != phis_before;
        }
        if !changed {
            break;
        }
    }
}

fn instruction_count(function: &Function) -> usize {
    function.blocks.iter().map(|b| b.insts.len()).sum()
}

fn calls_itself(function: &Function) -> bool {
    function.blocks.iter().any(|b| b.insts.iter().any(|i| matches!(&i.op, Op::Call(name, _) if name == &function.name)))
}

fn max_reg(function: &Function) -> Reg {
    let mut m = 0;
    for (r, _) in &function.params {
        m = m.max(*r);
    }
    for block in &function.blocks {
        for phi in &block.phis {
            m = m.max(phi.dest);
        }
        for inst in &block.insts {
            if let Some(d) = inst.dest {
                m = m.max(d);
            }
        }
    }
    m
}

/// Inlines calls to single-block, non-recursive, below-threshold callees.
/// Scope deliberately narrow (DESIGN.md): a callee with more than one basic
/// block (any branch, any loop) is never a candidate, so this never has to
/// splice a CFG into the caller's — only a straight-line instruction list.
fn inline_trivial_calls(module: &mut Module, threshold: i32) {
    let candidates: FxHashMap<String, Function> = module
        .functions
        .iter()
        .filter(|f| f.blocks.len() == 1)
        .filter(|f| i32::try_from(instruction_count(f)).unwrap_or(i32::MAX) <= threshold)
        .filter(|f| !calls_itself(f))
        .map(|f| (f.name.clone(), f.clone()))
        .collect();
    if candidates.is_empty() {
        return;
    }

    for function in &mut module.functions {
        let mut next_reg = max_reg(function) + 1;
        let mut subst: FxHashMap<Reg, Value> = FxHashMap::default();

        for block in &mut function.blocks {
            let mut new_insts = Vec::with_capacity(block.insts.len());
            for inst in block.insts.drain(..) {
                if let Op::Call(callee, args) = &inst.op {
                    if callee != &function.name {
                        if let Some(candidate) = candidates.get(callee) {
                            if let Some((inlined, result)) = inline_call(candidate, args, &mut next_reg) {
                                new_insts.extend(inlined);
                                if let (Some(dest), Some(result)) = (inst.dest, result) {
                                    subst.insert(dest, result);
                                }
                                continue;
                            }
                        }
                    }
                }
                new_insts.push(inst);
            }
            block.insts = new_insts;
        }

        if !subst.is_empty() {
            for block in &mut function.blocks {
                for phi in &mut block.phis {
                    for (_, v) in &mut phi.incoming {
                        substitute_value(v, &subst);
                    }
                }
                for inst in &mut block.insts {
                    rewrite_op(&mut inst.op, &subst);
                }
                rewrite_terminator(&mut block.terminator, &subst);
            }
        }
    }
}

fn inline_call(candidate: &Function, call_args: &[Value], next_reg: &mut Reg) -> Option<(Vec<Instruction>, Option<Value>)> {
    if candidate.params.len() != call_args.len() {
        return None;
    }
    let block = candidate.blocks.first()?;

    let mut reg_map: FxHashMap<Reg, Value> = FxHashMap::default();
    for ((param_reg, _), arg) in candidate.params.iter().zip(call_args) {
        reg_map.insert(*param_reg, arg.clone());
    }

    let mut inlined = Vec::with_capacity(block.insts.len());
    for inst in &block.insts {
        let mut op = inst.op.clone();
        for v in op_values_mut(&mut op) {
            substitute_value(v, &reg_map);
        }
        let dest = inst.dest.map(|_| {
            let fresh = *next_reg;
            *next_reg += 1;
            fresh
        });
        if let (Some(old), Some(new)) = (inst.dest, dest) {
            reg_map.insert(old, Value::Reg(new));
        }
        inlined.push(Instruction { dest, ty: inst.ty, op });
    }

    let result = match &block.terminator {
        Terminator::Ret(Some(v)) => {
            let mut v = v.clone();
            substitute_value(&mut v, &reg_map);
            Some(v)
        }
        Terminator::Ret(None) => None,
        // a branching terminator means this candidate had more than one
        // reachable block, already excluded by the `blocks.len() == 1` filter
        _ => return None,
    };
    Some((inlined, result))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn levels_outside_zero_to_three_are_rejected() {
        assert_eq!(Optimizer::new(-1), Err(InvalidOptimizationLevel(-1)));
        assert_eq!(Optimizer::new(4), Err(InvalidOptimizationLevel(4)));
    }

    #[test]
    fn inlining_thresholds_match_the_level_table() {
        assert_eq!(Optimizer::new(0).unwrap().inlining_threshold(), 0);
        assert_eq!(Optimizer::new(1).unwrap().inlining_threshold(), 75);
        assert_eq!(Optimizer::new(2).unwrap().inlining_threshold(), 225);
        assert_eq!(Optimizer::new(3).unwrap().inlining_threshold(), 275);
    }

    #[test]
    fn optimization_info_reports_o2_as_vectorizing_and_unrolling() {
        let info = Optimizer::new(2).unwrap().get_optimization_info();
        assert_eq!(info.opt_level, 2);
        assert_eq!(info.opt_name, "O2");
        assert_eq!(info.inlining_threshold, 225);
        assert!(info.vectorization_enabled);
        assert!(info.loop_unrolling_enabled);
    }

    #[test]
    fn o0_preserves_structure() {
        let ir = "define i64 @test(i64 %0, i64 %1) {\nentry:\n  %2 = add i64 %0, %1\n  %3 = mul i64 %2, 2\n  ret i64 %3\n}\n";
        let optimized = Optimizer::new(0).unwrap().optimize(ir).expect("valid IR optimizes at O0");
        assert!(optimized.contains("add i64"));
        assert!(optimized.contains("mul i64"));
        assert!(optimized.contains("ret i64"));
    }

    #[test]
    fn invalid_text_fails_to_parse() {
        let err = Optimizer::new(2).unwrap().optimize("this is not valid low-level IR").unwrap_err();
        assert!(err.0.contains("failed to parse") || !err.0.is_empty());
    }

    #[test]
    fn constant_folding_removes_a_provably_dead_computation() {
        let ir = "define i64 @test() {\nentry:\n  %0 = add i64 1, 2\n  ret i64 3\n}\n";
        let optimized = Optimizer::new(2).unwrap().optimize(ir).expect("valid IR optimizes at O2");
        assert!(!optimized.contains("add i64 1, 2"));
        assert!(optimized.contains("ret i64 3"));
    }
}
