//! The typed SSA IR this target lowers SIR into: functions, basic blocks,
//! instructions and phi nodes, with an `.ll`-flavored [`std::fmt::Display`]
//! impl standing in for a real LLVM module print (spec.md §4.7 substitution,
//! recorded in DESIGN.md) — grounded on `ori_llvm`'s codegen shape
//! (`compiler/ori_llvm/src/codegen/ir_builder/*`) one level removed from a
//! real `inkwell::Module`.
//!
//! Integers are 64-bit signed; booleans are widened into the same 64-bit
//! cell (spec.md §4.7: "implementation may widen"), so there is no separate
//! `i1` — a comparison's result is already an `i64` 0/1 the way every other
//! value in this IR is. Locals are SSA registers directly, renamed at each
//! assignment with a [`Phi`] inserted wherever control flow joins on a
//! branch-reassigned name, rather than the classic alloca-per-local plus a
//! separate mem2reg pass — the two are semantically equivalent and this
//! target never needs the alloca form as an intermediate step.

use std::fmt;

pub type Reg = u32;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum IrType {
    I64,
    F64,
    Void,
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::I64 => write!(f, "i64"),
            IrType::F64 => write!(f, "double"),
            IrType::Void => write!(f, "void"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    ConstInt(i64),
    ConstFloat(f64),
    Reg(Reg),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::ConstInt(v) => write!(f, "{v}"),
            Value::ConstFloat(v) => write!(f, "{v:?}"),
            Value::Reg(r) => write!(f, "%{r}"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ICmp {
    Eq,
    Ne,
    Slt,
    Sle,
    Sgt,
    Sge,
}

impl fmt::Display for ICmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ICmp::Eq => "eq",
            ICmp::Ne => "ne",
            ICmp::Slt => "slt",
            ICmp::Sle => "sle",
            ICmp::Sgt => "sgt",
            ICmp::Sge => "sge",
        };
        write!(f, "{s}")
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FCmp {
    Oeq,
    One,
    Olt,
    Ole,
    Ogt,
    Oge,
}

impl fmt::Display for FCmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FCmp::Oeq => "oeq",
            FCmp::One => "one",
            FCmp::Olt => "olt",
            FCmp::Ole => "ole",
            FCmp::Ogt => "ogt",
            FCmp::Oge => "oge",
        };
        write!(f, "{s}")
    }
}

/// One right-hand side computation. Every variant that produces a value is
/// always paired with a `dest` register on its owning [`Instruction`];
/// `Store` is the only variant with no result.
#[derive(Clone, Debug)]
pub enum Op {
    AddI(Value, Value),
    SubI(Value, Value),
    MulI(Value, Value),
    /// Integer division, floors toward negative infinity (spec.md §4.7).
    SDiv(Value, Value),
    SRem(Value, Value),
    AddF(Value, Value),
    SubF(Value, Value),
    MulF(Value, Value),
    FDiv(Value, Value),
    /// Bitwise on the widened `i64` 0/1 domain — logical and/or over
    /// already-boolean operands (spec.md §4.7's chained-comparison
    /// conjunctions lower through here).
    AndI(Value, Value),
    OrI(Value, Value),
    ICmp(ICmp, Value, Value),
    FCmp(FCmp, Value, Value),
    NegI(Value),
    NegF(Value),
    /// Boolean complement; operand and result are both the widened `i64`
    /// 0/1 cell, so this is `xor %x, 1`, not a dedicated opcode.
    BoolNot(Value),
    /// `int(x)` on a float: truncate toward zero.
    FpToSi(Value),
    /// `float(x)` on an int: exact widening conversion.
    SiToFp(Value),
    Call(String, Vec<Value>),
}

#[derive(Clone, Debug)]
pub struct Instruction {
    pub dest: Option<Reg>,
    pub ty: IrType,
    pub op: Op,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lhs = self.dest.map(|r| format!("%{r} = ")).unwrap_or_default();
        match &self.op {
            Op::AddI(a, b) => write!(f, "{lhs}add i64 {a}, {b}"),
            Op::SubI(a, b) => write!(f, "{lhs}sub i64 {a}, {b}"),
            Op::MulI(a, b) => write!(f, "{lhs}mul i64 {a}, {b}"),
            Op::SDiv(a, b) => write!(f, "{lhs}sdiv i64 {a}, {b}"),
            Op::SRem(a, b) => write!(f, "{lhs}srem i64 {a}, {b}"),
            Op::AddF(a, b) => write!(f, "{lhs}fadd double {a}, {b}"),
            Op::SubF(a, b) => write!(f, "{lhs}fsub double {a}, {b}"),
            Op::MulF(a, b) => write!(f, "{lhs}fmul double {a}, {b}"),
            Op::FDiv(a, b) => write!(f, "{lhs}fdiv double {a}, {b}"),
            Op::AndI(a, b) => write!(f, "{lhs}and i64 {a}, {b}"),
            Op::OrI(a, b) => write!(f, "{lhs}or i64 {a}, {b}"),
            Op::ICmp(pred, a, b) => write!(f, "{lhs}icmp {pred} i64 {a}, {b}"),
            Op::FCmp(pred, a, b) => write!(f, "{lhs}fcmp {pred} double {a}, {b}"),
            Op::NegI(a) => write!(f, "{lhs}sub i64 0, {a}"),
            Op::NegF(a) => write!(f, "{lhs}fsub double 0.0, {a}"),
            Op::BoolNot(a) => write!(f, "{lhs}xor i64 {a}, 1"),
            Op::FpToSi(a) => write!(f, "{lhs}fptosi double {a} to i64"),
            Op::SiToFp(a) => write!(f, "{lhs}sitofp i64 {a} to double"),
            Op::Call(callee, args) => {
                let args = args.iter().map(|a| format!("{} {a}", self.ty)).collect::<Vec<_>>().join(", ");
                write!(f, "{lhs}call {} @{callee}({args})", self.ty)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Phi {
    pub dest: Reg,
    pub ty: IrType,
    pub incoming: Vec<(String, Value)>,
}

impl fmt::Display for Phi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges = self.incoming.iter().map(|(label, value)| format!("[ {value}, %{label} ]")).collect::<Vec<_>>().join(", ");
        write!(f, "%{} = phi {} {edges}", self.dest, self.ty)
    }
}

#[derive(Clone, Debug)]
pub enum Terminator {
    Ret(Option<Value>),
    Br(String),
    CondBr(Value, String, String),
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminator::Ret(Some(v)) => write!(f, "ret i64 {v}"),
            Terminator::Ret(None) => write!(f, "ret void"),
            Terminator::Br(label) => write!(f, "br label %{label}"),
            Terminator::CondBr(cond, then_label, else_label) => write!(f, "br i1 {cond}, label %{then_label}, label %{else_label}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BasicBlock {
    pub label: String,
    pub phis: Vec<Phi>,
    pub insts: Vec<Instruction>,
    pub terminator: Terminator,
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.label)?;
        for phi in &self.phis {
            writeln!(f, "  {phi}")?;
        }
        for inst in &self.insts {
            writeln!(f, "  {inst}")?;
        }
        write!(f, "  {}", self.terminator)
    }
}

#[derive(Clone, Debug)]
pub struct Function {
    pub name: String,
    pub params: Vec<(Reg, IrType)>,
    pub ret_ty: IrType,
    pub blocks: Vec<BasicBlock>,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params.iter().map(|(r, ty)| format!("{ty} %{r}")).collect::<Vec<_>>().join(", ");
        writeln!(f, "define {} @{}({params}) {{", self.ret_ty, self.name)?;
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{block}")?;
        }
        write!(f, "}}")
    }
}

#[derive(Clone, Debug, Default)]
pub struct Module {
    pub functions: Vec<Function>,
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, function) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{function}")?;
        }
        Ok(())
    }
}
