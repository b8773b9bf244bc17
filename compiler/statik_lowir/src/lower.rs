//! SIR → typed SSA IR lowering (spec.md §4.7). Grounded on `ori_llvm`'s
//! codegen shape — one pass per function, a `Locals`-style environment
//! tracking each name's current SSA value — but building this crate's own
//! in-memory [`crate::ir::Function`] instead of calling into `inkwell`.
//!
//! Scope: this is "the one concretely-specified backend" (spec.md §4.7),
//! narrower than the three contract-only targets — scalar arithmetic,
//! control flow and recursion lower directly; containers are rejected
//! outright (the explicit non-goal) and so are classes, since a struct/field
//! ABI is a second typed-aggregate story this target's contract never
//! promises (documented in DESIGN.md as a deliberate scope narrowing, not an
//! oversight).

use rustc_hash::FxHashMap;

use statik_backend::EmitError;
use statik_ir::ast::{BinaryOp, CompareOp, UnaryOp};
use statik_ir::{Name, Span, StringInterner};
use statik_sir::{CallTarget, Const, SirArena, SirFunction, SirId, SirModule, SirNodeKind};
use statik_types::{TypeId, TypeInterner, TypeTerm};

use crate::ir::{BasicBlock, FCmp, Function, ICmp, IrType, Module, Op, Phi, Reg, Terminator, Value};

pub fn lower_module(module: &SirModule, interner: &StringInterner, types: &TypeInterner) -> Result<Module, EmitError> {
    let mut functions = Vec::new();
    for &item in module.items() {
        if let SirNodeKind::FunctionDef(name) = module.arena.kind(item) {
            let f = module.function(*name).ok_or_else(|| EmitError::UnsupportedByBackend {
                detail: "function referenced by the module but not registered".to_string(),
                span: module.arena.span_of(item),
            })?;
            functions.push(lower_function(module, interner, types, *name, f)?);
        } else if let SirNodeKind::ClassDef(_) = module.arena.kind(item) {
            return Err(EmitError::UnsupportedByBackend {
                detail: "this target lowers scalar functions only; class definitions have no typed-aggregate ABI here".to_string(),
                span: module.arena.span_of(item),
            });
        }
    }
    Ok(Module { functions })
}

fn ir_type_of(type_id: TypeId, types: &TypeInterner, span: Span) -> Result<IrType, EmitError> {
    match types.lookup(type_id) {
        TypeTerm::Int | TypeTerm::Bool => Ok(IrType::I64),
        TypeTerm::Float => Ok(IrType::F64),
        other => Err(EmitError::UnsupportedByBackend {
            detail: format!("{other:?} has no scalar representation in the low-level IR"),
            span,
        }),
    }
}

fn lower_function(module: &SirModule, interner: &StringInterner, types: &TypeInterner, name: Name, f: &SirFunction) -> Result<Function, EmitError> {
    let mut ctx = LowerCtx {
        arena: &module.arena,
        module,
        interner,
        types,
        next_reg: 0,
        next_label: 0,
        blocks: Vec::new(),
        cur: 0,
        env: FxHashMap::default(),
        local_types: FxHashMap::default(),
    };

    let mut params = Vec::with_capacity(f.params.len());
    for (pname, tid) in &f.params {
        let ty = ir_type_of(*tid, types, f.span)?;
        let reg = ctx.fresh_reg();
        ctx.env.insert(*pname, Value::Reg(reg));
        ctx.local_types.insert(*pname, ty);
        params.push((reg, ty));
    }

    let ret_ty = match types.lookup(f.return_type) {
        TypeTerm::NoneType => IrType::Void,
        _ => ir_type_of(f.return_type, types, f.span)?,
    };

    let entry = ctx.push_block("entry".to_string());
    ctx.cur = entry;
    let body: Vec<SirId> = ctx.arena.children(f.body).to_vec();
    ctx.lower_block(&body)?;

    if !ctx.is_terminated(ctx.cur) {
        match ret_ty {
            IrType::Void => ctx.terminate(Terminator::Ret(None)),
            _ => {
                return Err(EmitError::UnsupportedByBackend {
                    detail: "function body falls off the end without returning on every path".to_string(),
                    span: f.span,
                })
            }
        }
    }

    Ok(Function {
        name: interner.lookup(name).to_string(),
        params,
        ret_ty,
        blocks: ctx.finish(),
    })
}

struct WorkBlock {
    label: String,
    phis: Vec<Phi>,
    insts: Vec<crate::ir::Instruction>,
    terminator: Option<Terminator>,
}

struct LowerCtx<'a> {
    arena: &'a SirArena,
    module: &'a SirModule,
    interner: &'a StringInterner,
    types: &'a TypeInterner,
    next_reg: Reg,
    next_label: u32,
    blocks: Vec<WorkBlock>,
    cur: usize,
    env: FxHashMap<Name, Value>,
    local_types: FxHashMap<Name, IrType>,
}

impl<'a> LowerCtx<'a> {
    fn fresh_reg(&mut self) -> Reg {
        let r = self.next_reg;
        self.next_reg += 1;
        r
    }

    fn fresh_label(&mut self, base: &str) -> String {
        let n = self.next_label;
        self.next_label += 1;
        format!("{base}{n}")
    }

    fn push_block(&mut self, label: String) -> usize {
        self.blocks.push(WorkBlock { label, phis: Vec::new(), insts: Vec::new(), terminator: None });
        self.blocks.len() - 1
    }

    fn push_inst(&mut self, dest: Option<Reg>, ty: IrType, op: Op) -> Value {
        self.blocks[self.cur].insts.push(crate::ir::Instruction { dest, ty, op });
        match dest {
            Some(r) => Value::Reg(r),
            None => Value::ConstInt(0),
        }
    }

    fn emit(&mut self, ty: IrType, op: Op) -> Value {
        let r = self.fresh_reg();
        self.push_inst(Some(r), ty, op)
    }

    fn is_terminated(&self, idx: usize) -> bool {
        self.blocks[idx].terminator.is_some()
    }

    fn terminate(&mut self, term: Terminator) {
        let cur = self.cur;
        self.blocks[cur].terminator = Some(term);
    }

    fn finish(self) -> Vec<BasicBlock> {
        self.blocks
            .into_iter()
            .map(|b| BasicBlock {
                label: b.label,
                phis: b.phis,
                insts: b.insts,
                terminator: b.terminator.unwrap_or(Terminator::Ret(None)),
            })
            .collect()
    }

    fn lower_block(&mut self, stmts: &[SirId]) -> Result<(), EmitError> {
        for &stmt in stmts {
            if self.is_terminated(self.cur) {
                break;
            }
            self.lower_stmt(stmt)?;
        }
        Ok(())
    }

    fn lower_stmt(&mut self, id: SirId) -> Result<(), EmitError> {
        let span = self.arena.span_of(id);
        match self.arena.kind(id).clone() {
            SirNodeKind::Assign { target, value } => {
                let val = self.lower_expr(value)?;
                let ty = ir_type_of(self.arena.type_of(value), self.types, span)?;
                self.env.insert(target, val);
                self.local_types.insert(target, ty);
                Ok(())
            }
            SirNodeKind::If { condition, then_branch, else_branch } => self.lower_if(condition, then_branch, else_branch, span),
            SirNodeKind::While { condition, body } => self.lower_while(condition, body),
            SirNodeKind::For { target, start, stop, step, iterable, body } => {
                if iterable.is_some() {
                    return Err(EmitError::UnsupportedByBackend {
                        detail: "iteration over a container has no lowering on this target (containers are rejected outright)".to_string(),
                        span,
                    });
                }
                self.lower_range_for(target, start, stop, step, body, span)
            }
            SirNodeKind::Return(value) => {
                let v = value.map(|v| self.lower_expr(v)).transpose()?;
                self.terminate(Terminator::Ret(v));
                Ok(())
            }
            SirNodeKind::FunctionDef(_) => Err(EmitError::UnsupportedByBackend {
                detail: "nested function definitions are not lowered by this target".to_string(),
                span,
            }),
            other => {
                // Expression-statement: evaluate and discard (e.g. a bare `print(x)` call).
                self.lower_expr_kind(id, &other)?;
                Ok(())
            }
        }
    }

    /// Names assigned anywhere in a statement list, direct or nested — the
    /// candidate set for phi insertion at the block that follows it.
    fn assigned_names(&self, stmts: &[SirId], out: &mut Vec<Name>) {
        for &id in stmts {
            match self.arena.kind(id) {
                SirNodeKind::Assign { target, .. } => out.push(*target),
                SirNodeKind::If { then_branch, else_branch, .. } => {
                    self.assigned_names(self.arena.children(*then_branch), out);
                    self.assigned_names(self.arena.children(*else_branch), out);
                }
                SirNodeKind::While { body, .. } => self.assigned_names(self.arena.children(*body), out),
                SirNodeKind::For { target, body, .. } => {
                    out.push(*target);
                    self.assigned_names(self.arena.children(*body), out);
                }
                _ => {}
            }
        }
    }

    fn lower_if(&mut self, condition: SirId, then_branch: statik_sir::SirRange, else_branch: statik_sir::SirRange, span: Span) -> Result<(), EmitError> {
        let cond = self.lower_expr(condition)?;
        let then_label = self.fresh_label("if.then");
        let else_label = self.fresh_label("if.else");
        let merge_label = self.fresh_label("if.merge");
        let has_else = !else_branch.is_empty();

        self.terminate(Terminator::CondBr(cond, then_label.clone(), if has_else { else_label.clone() } else { merge_label.clone() }));

        let entry_env = self.env.clone();

        let then_idx = self.push_block(then_label.clone());
        self.cur = then_idx;
        let then_stmts = self.arena.children(then_branch).to_vec();
        self.lower_block(&then_stmts)?;
        let then_exit_label = self.blocks[self.cur].label.clone();
        let then_terminated = self.is_terminated(self.cur);
        let then_env = self.env.clone();
        if !then_terminated {
            self.terminate(Terminator::Br(merge_label.clone()));
        }

        self.env = entry_env;
        let (else_exit_label, else_terminated, else_env) = if has_else {
            let else_idx = self.push_block(else_label.clone());
            self.cur = else_idx;
            let else_stmts = self.arena.children(else_branch).to_vec();
            self.lower_block(&else_stmts)?;
            let exit_label = self.blocks[self.cur].label.clone();
            let terminated = self.is_terminated(self.cur);
            let env = self.env.clone();
            if !terminated {
                self.terminate(Terminator::Br(merge_label.clone()));
            }
            (exit_label, terminated, env)
        } else {
            (then_label.clone(), false, self.env.clone())
        };
        let else_pred_label = if has_else { else_exit_label } else { then_exit_label.clone() };

        let merge_idx = self.push_block(merge_label);
        self.cur = merge_idx;

        let mut candidates = Vec::new();
        self.assigned_names(self.arena.children(then_branch), &mut candidates);
        if has_else {
            self.assigned_names(self.arena.children(else_branch), &mut candidates);
        }
        candidates.sort_unstable_by_key(|n| n.raw());
        candidates.dedup();

        for name in candidates {
            let mut incoming = Vec::new();
            if !then_terminated {
                if let Some(v) = then_env.get(&name) {
                    incoming.push((then_exit_label.clone(), v.clone()));
                }
            }
            let else_source_env = if has_else { &else_env } else { &self.env };
            if !else_terminated {
                if let Some(v) = else_source_env.get(&name) {
                    if !incoming.iter().any(|(l, _)| *l == else_pred_label) {
                        incoming.push((else_pred_label.clone(), v.clone()));
                    }
                }
            }
            if incoming.len() < 2 {
                // Only one live predecessor actually reaches merge (the
                // other arm returned): no join, just carry the value.
                if let Some((_, v)) = incoming.into_iter().next() {
                    self.env.insert(name, v);
                }
                continue;
            }
            let Some(ty) = self.local_types.get(&name).copied() else { continue };
            let dest = self.fresh_reg();
            self.blocks[self.cur].phis.push(Phi { dest, ty, incoming });
            self.env.insert(name, Value::Reg(dest));
        }

        if then_terminated && (else_terminated || !has_else) {
            return Err(EmitError::UnsupportedByBackend {
                detail: "every path out of this conditional returns; no code can follow it, which this target does not attempt to lower".to_string(),
                span,
            });
        }

        Ok(())
    }

    #[allow(clippy::expect_used, reason = "phi was just registered in the loop header above")]
    fn lower_while(&mut self, condition: SirId, body: statik_sir::SirRange) -> Result<(), EmitError> {
        let preheader_label = self.blocks[self.cur].label.clone();
        let header_label = self.fresh_label("while.header");
        let body_label = self.fresh_label("while.body");
        let exit_label = self.fresh_label("while.exit");

        self.terminate(Terminator::Br(header_label.clone()));

        let mut carried = Vec::new();
        self.assigned_names(self.arena.children(body), &mut carried);
        carried.sort_unstable_by_key(|n| n.raw());
        carried.dedup();
        carried.retain(|n| self.env.contains_key(n) && self.local_types.contains_key(n));

        let header_idx = self.push_block(header_label.clone());
        let mut phi_regs = FxHashMap::default();
        for &name in &carried {
            let ty = self.local_types[&name];
            let dest = self.fresh_reg();
            let entry_value = self.env[&name].clone();
            self.blocks[header_idx].phis.push(Phi { dest, ty, incoming: vec![(preheader_label.clone(), entry_value)] });
            phi_regs.insert(name, dest);
            self.env.insert(name, Value::Reg(dest));
        }

        self.cur = header_idx;
        let cond = self.lower_expr(condition)?;
        self.terminate(Terminator::CondBr(cond, body_label.clone(), exit_label.clone()));

        let body_idx = self.push_block(body_label);
        self.cur = body_idx;
        let body_stmts = self.arena.children(body).to_vec();
        self.lower_block(&body_stmts)?;
        let body_exit_label = self.blocks[self.cur].label.clone();
        if !self.is_terminated(self.cur) {
            for &name in &carried {
                if let Some(v) = self.env.get(&name) {
                    self.blocks[header_idx].phis.iter_mut().find(|p| p.dest == phi_regs[&name]).expect("phi registered above").incoming.push((body_exit_label.clone(), v.clone()));
                }
            }
            self.terminate(Terminator::Br(header_label));
        }

        let exit_idx = self.push_block(exit_label);
        self.cur = exit_idx;
        for &name in &carried {
            self.env.insert(name, Value::Reg(phi_regs[&name]));
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    #[allow(clippy::expect_used, reason = "phi was just registered in the loop header above")]
    fn lower_range_for(&mut self, target: Name, start: Option<SirId>, stop: Option<SirId>, step: Option<SirId>, body: statik_sir::SirRange, span: Span) -> Result<(), EmitError> {
        let start_v = match start {
            Some(e) => self.lower_expr(e)?,
            None => Value::ConstInt(0),
        };
        let stop_v = stop.map(|e| self.lower_expr(e)).transpose()?.ok_or_else(|| EmitError::UnsupportedByBackend {
            detail: "a range-based for loop with no upper bound has no lowering".to_string(),
            span,
        })?;
        let step_v = match step {
            Some(e) => self.lower_expr(e)?,
            None => Value::ConstInt(1),
        };

        let preheader_label = self.blocks[self.cur].label.clone();
        let header_label = self.fresh_label("for.header");
        let body_label = self.fresh_label("for.body");
        let exit_label = self.fresh_label("for.exit");
        self.terminate(Terminator::Br(header_label.clone()));

        let mut carried = Vec::new();
        self.assigned_names(self.arena.children(body), &mut carried);
        carried.sort_unstable_by_key(|n| n.raw());
        carried.dedup();
        carried.retain(|n| *n != target && self.env.contains_key(n) && self.local_types.contains_key(n));

        let header_idx = self.push_block(header_label.clone());
        let iv_reg = self.fresh_reg();
        self.blocks[header_idx].phis.push(Phi { dest: iv_reg, ty: IrType::I64, incoming: vec![(preheader_label.clone(), start_v)] });
        self.env.insert(target, Value::Reg(iv_reg));
        self.local_types.insert(target, IrType::I64);

        let mut phi_regs = FxHashMap::default();
        for &name in &carried {
            let ty = self.local_types[&name];
            let dest = self.fresh_reg();
            let entry_value = self.env[&name].clone();
            self.blocks[header_idx].phis.push(Phi { dest, ty, incoming: vec![(preheader_label.clone(), entry_value)] });
            phi_regs.insert(name, dest);
            self.env.insert(name, Value::Reg(dest));
        }

        self.cur = header_idx;
        let cmp = self.emit(IrType::I64, Op::ICmp(ICmp::Slt, Value::Reg(iv_reg), stop_v));
        self.terminate(Terminator::CondBr(cmp, body_label.clone(), exit_label.clone()));

        let body_idx = self.push_block(body_label);
        self.cur = body_idx;
        let body_stmts = self.arena.children(body).to_vec();
        self.lower_block(&body_stmts)?;
        if !self.is_terminated(self.cur) {
            let next_iv = self.emit(IrType::I64, Op::AddI(Value::Reg(iv_reg), step_v));
            let body_exit_label = self.blocks[self.cur].label.clone();
            self.blocks[header_idx].phis[0].incoming.push((body_exit_label.clone(), next_iv));
            for &name in &carried {
                if let Some(v) = self.env.get(&name) {
                    self.blocks[header_idx].phis.iter_mut().find(|p| p.dest == phi_regs[&name]).expect("phi registered above").incoming.push((body_exit_label.clone(), v.clone()));
                }
            }
            self.terminate(Terminator::Br(header_label));
        }

        let exit_idx = self.push_block(exit_label);
        self.cur = exit_idx;
        self.env.insert(target, Value::Reg(iv_reg));
        for &name in &carried {
            self.env.insert(name, Value::Reg(phi_regs[&name]));
        }
        Ok(())
    }

    fn lower_expr(&mut self, id: SirId) -> Result<Value, EmitError> {
        let kind = self.arena.kind(id).clone();
        self.lower_expr_kind(id, &kind)
    }

    fn lower_expr_kind(&mut self, id: SirId, kind: &SirNodeKind) -> Result<Value, EmitError> {
        let span = self.arena.span_of(id);
        match kind {
            SirNodeKind::Const(c) => self.lower_const(c, span),
            SirNodeKind::Var(name) => Ok(Value::Reg(match self.env.get(name) {
                Some(Value::Reg(r)) => *r,
                Some(other) => return Ok(other.clone()),
                None => {
                    return Err(EmitError::UnsupportedByBackend {
                        detail: "a name read here is not bound on every path reaching this point".to_string(),
                        span,
                    })
                }
            })),
            SirNodeKind::BinOp { op, lhs, rhs } => self.lower_binop(id, *op, *lhs, *rhs, span),
            SirNodeKind::UnaryOp { op, operand } => self.lower_unaryop(id, *op, *operand, span),
            SirNodeKind::Compare { op, lhs, rhs } => self.lower_compare(*op, *lhs, *rhs, span),
            SirNodeKind::Call { target, args } => self.lower_call(id, *target, *args, span),
            SirNodeKind::MethodCall { .. } => Err(EmitError::UnsupportedByBackend {
                detail: "method dispatch has no lowering on a scalar-functions-only target".to_string(),
                span,
            }),
            SirNodeKind::Index { .. }
            | SirNodeKind::SliceIndex { .. }
            | SirNodeKind::Attr { .. }
            | SirNodeKind::ContainerLit { .. }
            | SirNodeKind::Comprehension(_) => Err(EmitError::UnsupportedByBackend {
                detail: "containers have no lowering on this target (spec.md's explicit non-goal for the low-level IR backend)".to_string(),
                span,
            }),
            SirNodeKind::Assign { .. }
            | SirNodeKind::If { .. }
            | SirNodeKind::While { .. }
            | SirNodeKind::For { .. }
            | SirNodeKind::Return(_)
            | SirNodeKind::FunctionDef(_)
            | SirNodeKind::ClassDef(_)
            | SirNodeKind::Module(_) => Err(EmitError::UnsupportedByBackend {
                detail: "statement-level node encountered in expression position".to_string(),
                span,
            }),
        }
    }

    fn lower_const(&mut self, c: &Const, span: Span) -> Result<Value, EmitError> {
        match c {
            Const::Int(v) => Ok(Value::ConstInt(*v)),
            Const::Float(v) => Ok(Value::ConstFloat(*v)),
            Const::Bool(v) => Ok(Value::ConstInt(i64::from(*v))),
            Const::Str(_) | Const::None => Err(EmitError::UnsupportedByBackend {
                detail: "strings and the `None` value have no scalar representation in the low-level IR".to_string(),
                span,
            }),
        }
    }

    fn to_float(&mut self, v: Value, ty: IrType) -> Value {
        match ty {
            IrType::F64 => v,
            _ => self.emit(IrType::F64, Op::SiToFp(v)),
        }
    }

    fn lower_binop(&mut self, id: SirId, op: BinaryOp, lhs: SirId, rhs: SirId, span: Span) -> Result<Value, EmitError> {
        let lhs_ty = ir_type_of(self.arena.type_of(lhs), self.types, span)?;
        let l = self.lower_expr(lhs)?;
        let r = self.lower_expr(rhs)?;
        let result_ty = ir_type_of(self.arena.type_of(id), self.types, span)?;

        match op {
            BinaryOp::And => return Ok(self.emit(IrType::I64, Op::AndI(l, r))),
            BinaryOp::Or => return Ok(self.emit(IrType::I64, Op::OrI(l, r))),
            BinaryOp::Pow => {
                let callee = if result_ty == IrType::F64 { "rt.fpow" } else { "rt.ipow" };
                return Ok(self.emit(result_ty, Op::Call(callee.to_string(), vec![l, r])));
            }
            BinaryOp::FloorDiv => {
                let callee = if result_ty == IrType::F64 { "rt.floordiv_f64" } else { "rt.floordiv_i64" };
                return Ok(self.emit(result_ty, Op::Call(callee.to_string(), vec![l, r])));
            }
            BinaryOp::Mod => {
                let callee = if result_ty == IrType::F64 { "rt.floormod_f64" } else { "rt.floormod_i64" };
                return Ok(self.emit(result_ty, Op::Call(callee.to_string(), vec![l, r])));
            }
            _ => {}
        }

        if result_ty == IrType::F64 {
            let l = self.to_float(l, lhs_ty);
            let r = self.to_float(r, lhs_ty);
            let o = match op {
                BinaryOp::Add => Op::AddF(l, r),
                BinaryOp::Sub => Op::SubF(l, r),
                BinaryOp::Mul => Op::MulF(l, r),
                BinaryOp::Div => Op::FDiv(l, r),
                _ => unreachable!("handled above"),
            };
            Ok(self.emit(IrType::F64, o))
        } else {
            let o = match op {
                BinaryOp::Add => Op::AddI(l, r),
                BinaryOp::Sub => Op::SubI(l, r),
                BinaryOp::Mul => Op::MulI(l, r),
                BinaryOp::Div => return Ok(self.emit(IrType::F64, Op::FDiv(self.to_float(l, lhs_ty), self.to_float(r, lhs_ty)))),
                _ => unreachable!("handled above"),
            };
            Ok(self.emit(IrType::I64, o))
        }
    }

    fn lower_unaryop(&mut self, _id: SirId, op: UnaryOp, operand: SirId, span: Span) -> Result<Value, EmitError> {
        let ty = ir_type_of(self.arena.type_of(operand), self.types, span)?;
        let v = self.lower_expr(operand)?;
        match op {
            UnaryOp::Neg if ty == IrType::F64 => Ok(self.emit(IrType::F64, Op::NegF(v))),
            UnaryOp::Neg => Ok(self.emit(IrType::I64, Op::NegI(v))),
            UnaryOp::Not => Ok(self.emit(IrType::I64, Op::BoolNot(v))),
        }
    }

    fn lower_compare(&mut self, op: CompareOp, lhs: SirId, rhs: SirId, span: Span) -> Result<Value, EmitError> {
        if matches!(op, CompareOp::In | CompareOp::NotIn) {
            return Err(EmitError::UnsupportedByBackend {
                detail: "membership testing only applies to containers, which this target rejects outright".to_string(),
                span,
            });
        }
        let lhs_ty = ir_type_of(self.arena.type_of(lhs), self.types, span)?;
        let l = self.lower_expr(lhs)?;
        let r = self.lower_expr(rhs)?;
        if lhs_ty == IrType::F64 {
            let pred = match op {
                CompareOp::Eq => FCmp::Oeq,
                CompareOp::NotEq => FCmp::One,
                CompareOp::Lt => FCmp::Olt,
                CompareOp::LtEq => FCmp::Ole,
                CompareOp::Gt => FCmp::Ogt,
                CompareOp::GtEq => FCmp::Oge,
                CompareOp::In | CompareOp::NotIn => unreachable!("handled above"),
            };
            Ok(self.emit(IrType::I64, Op::FCmp(pred, l, r)))
        } else {
            let pred = match op {
                CompareOp::Eq => ICmp::Eq,
                CompareOp::NotEq => ICmp::Ne,
                CompareOp::Lt => ICmp::Slt,
                CompareOp::LtEq => ICmp::Sle,
                CompareOp::Gt => ICmp::Sgt,
                CompareOp::GtEq => ICmp::Sge,
                CompareOp::In | CompareOp::NotIn => unreachable!("handled above"),
            };
            Ok(self.emit(IrType::I64, Op::ICmp(pred, l, r)))
        }
    }

    fn lower_call(&mut self, id: SirId, target: CallTarget, args: statik_sir::SirRange, span: Span) -> Result<Value, EmitError> {
        let result_ty = match self.types.lookup(self.arena.type_of(id)) {
            TypeTerm::NoneType => IrType::Void,
            _ => ir_type_of(self.arena.type_of(id), self.types, span)?,
        };
        let arg_ids = self.arena.children(args).to_vec();
        let mut arg_values = Vec::with_capacity(arg_ids.len());
        for a in arg_ids {
            arg_values.push(self.lower_expr(a)?);
        }
        match target {
            CallTarget::User(name) => {
                let callee_name = self.interner.lookup(name).to_string();
                if result_ty == IrType::Void {
                    self.push_inst(None, IrType::Void, Op::Call(callee_name, arg_values));
                    Ok(Value::ConstInt(0))
                } else {
                    Ok(self.emit(result_ty, Op::Call(callee_name, arg_values)))
                }
            }
            CallTarget::Builtin(op) => {
                use statik_backend::RuntimeAbi;
                let helper = crate::runtime_abi::LowIrRuntimeAbi.helper_symbol(op).to_string();
                if result_ty == IrType::Void {
                    self.push_inst(None, IrType::Void, Op::Call(helper, arg_values));
                    Ok(Value::ConstInt(0))
                } else {
                    Ok(self.emit(result_ty, Op::Call(helper, arg_values)))
                }
            }
            CallTarget::Container(_) => Err(EmitError::UnsupportedByBackend {
                detail: "container operations have no lowering on this target".to_string(),
                span,
            }),
        }
    }
}
