//! Stage A (declaration-driven signatures) and Stage B (flow-sensitive
//! dataflow) over a parsed module, grounded on
//! `original_source/src/mgen/frontend`'s `FlowSensitiveInferencer` /
//! `TypeUnifier` design (confirmed against
//! `original_source/tests/test_type_inference.py`): an environment mapping
//! locals to `TypedValue`s, refined by usage at comparisons/arithmetic, and
//! joined at branch/loop merge points via `statik_types::unify`.

use rustc_hash::FxHashMap;
use statik_ir::ast::{
    Arena, BinaryOp, CompareOp, Expr, ExprKind, ForIter, Function, Item, Literal, Module, Stmt, StmtKind,
};
use statik_ir::{ExprId, Name, Span, StmtId, StringInterner};
use statik_types::{Confidence, FunctionSignature, Origin, TypeId, TypeInterner, TypeTerm, TypedValue};

use crate::error::InferError;
use crate::resolve::resolve_parsed_type;

/// Everything Stage A/B produced for a module: one [`FunctionSignature`] per
/// top-level function/method (keyed by name; this grammar has a flat
/// function namespace, nested `def`s aside — see `DESIGN.md`), plus the
/// type resolved for every expression node, which `statik_sir` consumes
/// directly instead of re-deriving types during SIR construction.
pub struct InferenceResult {
    pub signatures: FxHashMap<Name, FunctionSignature>,
    pub expr_types: FxHashMap<ExprId, TypeId>,
    pub errors: Vec<InferError>,
}

pub fn infer_module(
    arena: &Arena,
    module: &Module,
    interner: &StringInterner,
    types: &mut TypeInterner,
) -> InferenceResult {
    let mut engine = Engine { arena, interner, types, signatures: FxHashMap::default(), expr_types: FxHashMap::default(), errors: Vec::new() };
    engine.run(module);
    InferenceResult { signatures: engine.signatures, expr_types: engine.expr_types, errors: engine.errors }
}

struct Engine<'a> {
    arena: &'a Arena,
    interner: &'a StringInterner,
    types: &'a mut TypeInterner,
    signatures: FxHashMap<Name, FunctionSignature>,
    expr_types: FxHashMap<ExprId, TypeId>,
    errors: Vec<InferError>,
}

impl<'a> Engine<'a> {
    fn run(&mut self, module: &Module) {
        // Stage A first, over every function (including methods), so Stage
        // B's call-site usage constraints have every already-annotated
        // signature available regardless of declaration order.
        for item in &module.items {
            match item {
                Item::Function(f) => self.stage_a(f),
                Item::Class(c) => {
                    for m in &c.methods {
                        self.stage_a(m);
                    }
                }
            }
        }
        for item in &module.items {
            match item {
                Item::Function(f) => self.stage_b(f),
                Item::Class(c) => {
                    for m in &c.methods {
                        self.stage_b(m);
                    }
                }
            }
        }
    }

    fn stage_a(&mut self, f: &Function) {
        let mut signature = FunctionSignature::new(TypedValue::defaulted(self.types.unknown()));
        for param in self.arena.params(f.params) {
            let value = match &param.annotation {
                Some(ty) => match resolve_parsed_type(ty, param.span, self.interner, self.types) {
                    Ok(id) => TypedValue::annotated(id),
                    Err(e) => {
                        self.errors.push(e);
                        TypedValue::defaulted(self.types.unknown())
                    }
                },
                None => TypedValue::defaulted(self.types.unknown()),
            };
            signature.set_param(param.name, value);
        }
        if let Some(ty) = &f.return_annotation {
            signature.return_type = match resolve_parsed_type(ty, f.span, self.interner, self.types) {
                Ok(id) => TypedValue::annotated(id),
                Err(e) => {
                    self.errors.push(e);
                    TypedValue::defaulted(self.types.unknown())
                }
            };
        }
        self.signatures.insert(f.name, signature);
    }

    /// Runs the flow-sensitive worklist pass over one function body,
    /// narrowing every still-`Unknown` parameter from usage and joining
    /// every reachable `return` into the function's return type.
    fn stage_b(&mut self, f: &Function) {
        let mut env: FxHashMap<Name, TypedValue> = FxHashMap::default();
        if let Some(sig) = self.signatures.get(&f.name) {
            for param in self.arena.params(f.params) {
                if let Some(v) = sig.param(param.name) {
                    env.insert(param.name, v);
                }
            }
        }

        let mut returns = Vec::new();
        self.infer_block(self.arena.stmt_list(f.body), &mut env, &mut returns);

        // Widen the declared parameter types in place with whatever usage
        // narrowed them to, leaving already-annotated (confidence 1.0)
        // parameters untouched (their env entry never moves off the
        // annotated value, since `unify(T, T) = T`).
        if let Some(sig) = self.signatures.get_mut(&f.name) {
            for param in self.arena.params(f.params) {
                if let Some(v) = env.get(&param.name) {
                    sig.set_param(param.name, *v);
                }
            }
        }

        let joined_return = self.join_return(&returns, f.span);
        if let Some(sig) = self.signatures.get_mut(&f.name) {
            if f.return_annotation.is_none() {
                sig.return_type = joined_return;
            }
        }

        self.check_missing_annotations(f);
    }

    /// Public (non-underscore-prefixed) functions must leave Stage B with
    /// every parameter and the return type resolved past `Unknown`. Usage
    /// recovery above already had its chance to narrow them, so anything
    /// still `Unknown` here is genuinely unrecoverable (spec.md §7).
    fn check_missing_annotations(&mut self, f: &Function) {
        if self.interner.lookup(f.name).starts_with('_') {
            return;
        }
        let unknown = self.types.unknown();
        let Some(sig) = self.signatures.get(&f.name) else { return };
        for param in self.arena.params(f.params) {
            if sig.param(param.name).map(|v| v.type_id) == Some(unknown) {
                self.errors.push(InferError::MissingAnnotation { span: param.span });
            }
        }
        if sig.return_type.type_id == unknown {
            self.errors.push(InferError::MissingAnnotation { span: f.span });
        }
    }

    /// Joins two typed values through the lattice, computing the combined
    /// confidence. A join against a value still at `Unknown` is identity on
    /// the type (rule 2), so its confidence — deliberately near-zero, since
    /// it records "nothing constrained this yet" rather than a real
    /// uncertain measurement — must not drag the known side's confidence
    /// down; only join genuinely-competing confidences via `combine`.
    fn join_typed(&mut self, a: TypedValue, b: TypedValue, origin: Origin) -> TypedValue {
        let (joined, widened) = statik_types::unify(self.types, a.type_id, b.type_id);
        let unknown = self.types.unknown();
        let confidence = if a.type_id == unknown {
            b.confidence
        } else if b.type_id == unknown {
            a.confidence
        } else {
            a.confidence.combine(b.confidence, widened)
        };
        TypedValue { type_id: joined, confidence, origin }
    }

    fn join_return(&mut self, returns: &[TypedValue], span: Span) -> TypedValue {
        let Some(first) = returns.first().copied() else {
            return TypedValue::annotated(self.types.none());
        };
        let mut acc = first;
        for next in &returns[1..] {
            acc = self.join_typed(acc, *next, Origin::ReturnJoined);
        }
        if let TypeTerm::Union(_) = self.types.lookup(acc.type_id) {
            self.errors.push(InferError::AmbiguousInference { what: "the function's return value", span });
        }
        acc
    }

    fn infer_block(&mut self, stmts: &[StmtId], env: &mut FxHashMap<Name, TypedValue>, returns: &mut Vec<TypedValue>) {
        for &stmt_id in stmts {
            self.infer_stmt(self.arena.stmt(stmt_id), env, returns);
        }
    }

    fn infer_stmt(&mut self, stmt: &Stmt, env: &mut FxHashMap<Name, TypedValue>, returns: &mut Vec<TypedValue>) {
        match &stmt.kind {
            StmtKind::Expr(expr_id) => {
                self.infer_expr(*expr_id, env);
            }
            StmtKind::Assign { target, annotation, value } => {
                let value_type = self.infer_expr(*value, env);
                let declared = match annotation {
                    Some(ty) => match resolve_parsed_type(ty, stmt.span, self.interner, self.types) {
                        Ok(id) => Some(id),
                        Err(e) => {
                            self.errors.push(e);
                            None
                        }
                    },
                    None => None,
                };
                let typed = match declared {
                    Some(id) => TypedValue { type_id: id, confidence: Confidence::CERTAIN, origin: Origin::Annotated },
                    None => TypedValue { type_id: value_type, confidence: Confidence::CERTAIN, origin: Origin::UsageConstraint },
                };
                env.insert(*target, typed);
            }
            StmtKind::If { condition, then_branch, else_branch } => {
                self.infer_expr(*condition, env);
                let mut then_env = env.clone();
                let mut then_returns = Vec::new();
                self.infer_block(self.arena.stmt_list(*then_branch), &mut then_env, &mut then_returns);

                let mut else_env = env.clone();
                let mut else_returns = Vec::new();
                self.infer_block(self.arena.stmt_list(*else_branch), &mut else_env, &mut else_returns);

                self.merge_envs(env, &then_env, &else_env);
                returns.extend(then_returns);
                returns.extend(else_returns);
            }
            StmtKind::While { condition, body } => {
                self.infer_expr(*condition, env);
                // A single extra pass over the body approximates the
                // worklist's fixed point: one iteration narrows loop-local
                // usage (e.g. an accumulator reassigned every iteration),
                // and re-running it against the narrowed environment is
                // idempotent for the structured programs this subset
                // accepts (no unbounded type growth across iterations,
                // since `unify` only ever widens within the finite
                // numeric ladder or folds into a `Union`).
                let mut body_env = env.clone();
                let mut body_returns = Vec::new();
                self.infer_block(self.arena.stmt_list(*body), &mut body_env, &mut body_returns);
                let mut merged = env.clone();
                self.merge_envs(&mut merged, env, &body_env);
                *env = merged;
                self.infer_block(self.arena.stmt_list(*body), env, &mut body_returns);
                returns.extend(body_returns);
            }
            StmtKind::For { target, iter, body } => {
                let elem_type = match iter {
                    ForIter::Range { start, stop, step } => {
                        if let Some(s) = start {
                            self.infer_expr(*s, env);
                        }
                        self.infer_expr(*stop, env);
                        if let Some(s) = step {
                            self.infer_expr(*s, env);
                        }
                        self.types.int()
                    }
                    ForIter::Iterable(expr_id) => {
                        let iter_type = self.infer_expr(*expr_id, env);
                        self.element_type_of(iter_type)
                    }
                };
                env.insert(*target, TypedValue { type_id: elem_type, confidence: Confidence::CERTAIN, origin: Origin::UsageConstraint });
                self.infer_block(self.arena.stmt_list(*body), env, returns);
            }
            StmtKind::Return(value) => {
                let typed = match value {
                    Some(expr_id) => {
                        let id = self.infer_expr(*expr_id, env);
                        TypedValue { type_id: id, confidence: Confidence::CERTAIN, origin: Origin::ReturnJoined }
                    }
                    None => TypedValue::annotated(self.types.none()),
                };
                returns.push(typed);
            }
            StmtKind::Pass => {}
            StmtKind::NestedFunctionDef(nested) => {
                self.stage_a(nested);
                self.stage_b(nested);
            }
        }
    }

    fn element_type_of(&self, container: TypeId) -> TypeId {
        match self.types.lookup(container) {
            TypeTerm::List(elem) | TypeTerm::Set(elem) => *elem,
            TypeTerm::Dict(key, _) => *key,
            _ => self.types.unknown(),
        }
    }

    /// Merges two branch-local environments back into `env` by joining
    /// every variable either branch assigned. A variable absent from one
    /// branch keeps the other branch's value unchanged (joining with its
    /// own pre-branch value is a no-op under rule 1, `T ⊔ T = T`).
    fn merge_envs(
        &mut self,
        env: &mut FxHashMap<Name, TypedValue>,
        a: &FxHashMap<Name, TypedValue>,
        b: &FxHashMap<Name, TypedValue>,
    ) {
        let mut keys: Vec<Name> = a.keys().chain(b.keys()).copied().collect();
        keys.sort_unstable_by_key(|n| n.raw());
        keys.dedup();
        for name in keys {
            let from_a = a.get(&name).copied();
            let from_b = b.get(&name).copied();
            let merged = match (from_a, from_b) {
                (Some(x), Some(y)) => self.join_typed(x, y, Origin::UsageConstraint),
                (Some(x), None) => x,
                (None, Some(y)) => y,
                (None, None) => continue,
            };
            env.insert(name, merged);
        }
    }

    /// Infers an expression's type, recording it in `expr_types` and
    /// narrowing any still-`Unknown` bare-name operand it touches (the
    /// usage-constraint half of Stage B: `x > 0` and `x + y` pin `x` down
    /// to `Int` the way `original_source/tests/test_type_inference.py`
    /// exercises).
    fn infer_expr(&mut self, expr_id: ExprId, env: &mut FxHashMap<Name, TypedValue>) -> TypeId {
        let expr: &Expr = self.arena.expr(expr_id);
        let type_id = match &expr.kind {
            ExprKind::Literal(lit) => self.literal_type(lit),
            ExprKind::Name(name) => env.get(name).map(|v| v.type_id).unwrap_or_else(|| self.types.unknown()),
            ExprKind::BinOp { op, lhs, rhs } => self.infer_binop(*op, *lhs, *rhs, env),
            ExprKind::UnaryOp { op, operand } => {
                let inner = self.infer_expr(*operand, env);
                match op {
                    statik_ir::ast::UnaryOp::Not => self.types.bool(),
                    statik_ir::ast::UnaryOp::Neg => inner,
                }
            }
            ExprKind::Compare { op, lhs, rhs } => {
                self.infer_compare(*op, *lhs, *rhs, env);
                self.types.bool()
            }
            ExprKind::Call { callee, args } => self.infer_call(*callee, *args, env),
            ExprKind::MethodCall { receiver, args, .. } => {
                self.infer_expr(*receiver, env);
                for &arg in self.arena.expr_list(*args) {
                    self.infer_expr(arg, env);
                }
                self.types.unknown()
            }
            ExprKind::Attr { receiver, .. } => {
                self.infer_expr(*receiver, env);
                self.types.unknown()
            }
            ExprKind::Index { receiver, index } => {
                let recv_type = self.infer_expr(*receiver, env);
                self.infer_expr(*index, env);
                match self.types.lookup(recv_type) {
                    TypeTerm::List(elem) | TypeTerm::Set(elem) => *elem,
                    TypeTerm::Dict(_, value) => *value,
                    _ => self.types.unknown(),
                }
            }
            ExprKind::SliceIndex { receiver, start, stop, step } => {
                let recv_type = self.infer_expr(*receiver, env);
                for opt in [start, stop, step] {
                    if let Some(e) = opt {
                        self.infer_expr(*e, env);
                    }
                }
                recv_type
            }
            ExprKind::ContainerLit { kind, elements, values } => self.infer_container_lit(*kind, *elements, *values, env),
            ExprKind::Comprehension { kind, generators, condition, element, value } => {
                self.infer_comprehension(*kind, generators, *condition, *element, *value, env)
            }
        };
        self.expr_types.insert(expr_id, type_id);
        type_id
    }

    fn literal_type(&mut self, lit: &Literal) -> TypeId {
        match lit {
            Literal::Int(_) => self.types.int(),
            Literal::Float(_) => self.types.float(),
            Literal::Bool(_) => self.types.bool(),
            Literal::Str(_) => self.types.str(),
            Literal::None => self.types.none(),
        }
    }

    fn infer_binop(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId, env: &mut FxHashMap<Name, TypedValue>) -> TypeId {
        let lhs_type = self.infer_expr(lhs, env);
        let rhs_type = self.infer_expr(rhs, env);
        self.constrain_unknown_operand(lhs, lhs_type, rhs_type, env);
        self.constrain_unknown_operand(rhs, rhs_type, lhs_type, env);

        match op {
            BinaryOp::And | BinaryOp::Or => self.types.bool(),
            // True division always widens to `Float`, matching the parent
            // dynamic language's `/` semantics (`statik_lowir` lowers it to
            // an IEEE float divide regardless of operand types).
            BinaryOp::Div => self.types.float(),
            BinaryOp::Add if self.is_str(lhs_type) && self.is_str(rhs_type) => self.types.str(),
            _ => {
                let (joined, _widened) = statik_types::unify(self.types, lhs_type, rhs_type);
                joined
            }
        }
    }

    fn infer_compare(&mut self, _op: CompareOp, lhs: ExprId, rhs: ExprId, env: &mut FxHashMap<Name, TypedValue>) {
        let lhs_type = self.infer_expr(lhs, env);
        let rhs_type = self.infer_expr(rhs, env);
        self.constrain_unknown_operand(lhs, lhs_type, rhs_type, env);
        self.constrain_unknown_operand(rhs, rhs_type, lhs_type, env);
    }

    /// If `operand` is a bare `Name` still at `Unknown` in `env` and the
    /// other side of the operator already has a known type, narrow it —
    /// this is the "usage constraint" origin (spec.md §4.2).
    fn constrain_unknown_operand(&mut self, operand: ExprId, operand_type: TypeId, other_type: TypeId, env: &mut FxHashMap<Name, TypedValue>) {
        if operand_type != self.types.unknown() || other_type == self.types.unknown() {
            return;
        }
        let ExprKind::Name(name) = &self.arena.expr(operand).kind else { return };
        let confidence = Confidence::new(Confidence::CERTAIN.value() * Confidence::COERCION_PENALTY);
        env.insert(*name, TypedValue { type_id: other_type, confidence, origin: Origin::UsageConstraint });
    }

    fn is_str(&self, id: TypeId) -> bool {
        matches!(self.types.lookup(id), TypeTerm::Str)
    }

    fn infer_call(&mut self, callee: Name, args: statik_ir::ExprRange, env: &mut FxHashMap<Name, TypedValue>) -> TypeId {
        let arg_ids: Vec<ExprId> = self.arena.expr_list(args).to_vec();
        let param_types: Vec<TypeId> = self
            .signatures
            .get(&callee)
            .map(|sig| sig.params.iter().map(|(_, v)| v.type_id).collect())
            .unwrap_or_default();
        for (i, &arg) in arg_ids.iter().enumerate() {
            let arg_type = self.infer_expr(arg, env);
            if let Some(&expected) = param_types.get(i) {
                self.constrain_unknown_operand(arg, arg_type, expected, env);
            }
        }
        self.signatures.get(&callee).map(|sig| sig.return_type.type_id).unwrap_or_else(|| self.types.unknown())
    }

    fn infer_container_lit(
        &mut self,
        kind: statik_ir::ast::ContainerKind,
        elements: statik_ir::ExprRange,
        values: statik_ir::ExprRange,
        env: &mut FxHashMap<Name, TypedValue>,
    ) -> TypeId {
        use statik_ir::ast::ContainerKind;
        let element_ids: Vec<ExprId> = self.arena.expr_list(elements).to_vec();
        let value_ids: Vec<ExprId> = self.arena.expr_list(values).to_vec();

        match kind {
            ContainerKind::Tuple => {
                let mut types = Vec::with_capacity(element_ids.len());
                for e in element_ids {
                    types.push(self.infer_expr(e, env));
                }
                self.types.intern(TypeTerm::Tuple(types))
            }
            ContainerKind::List | ContainerKind::Set => {
                let mut joined = self.types.unknown();
                for &e in &element_ids {
                    let t = self.infer_expr(e, env);
                    joined = statik_types::unify(self.types, joined, t).0;
                }
                self.types.intern(if kind == ContainerKind::List { TypeTerm::List(joined) } else { TypeTerm::Set(joined) })
            }
            ContainerKind::Dict => {
                let mut key_joined = self.types.unknown();
                for &k in &element_ids {
                    let t = self.infer_expr(k, env);
                    key_joined = statik_types::unify(self.types, key_joined, t).0;
                }
                let mut value_joined = self.types.unknown();
                for &v in &value_ids {
                    let t = self.infer_expr(v, env);
                    value_joined = statik_types::unify(self.types, value_joined, t).0;
                }
                self.types.intern(TypeTerm::Dict(key_joined, value_joined))
            }
        }
    }

    fn infer_comprehension(
        &mut self,
        kind: statik_ir::ast::ContainerKind,
        generators: &[statik_ir::ast::Generator],
        condition: Option<ExprId>,
        element: ExprId,
        value: Option<ExprId>,
        env: &mut FxHashMap<Name, TypedValue>,
    ) -> TypeId {
        use statik_ir::ast::ContainerKind;
        let mut scope = env.clone();
        for generator in generators {
            let iter_type = self.infer_expr(generator.iter, &mut scope);
            let elem_type = self.element_type_of(iter_type);
            scope.insert(generator.target, TypedValue { type_id: elem_type, confidence: Confidence::CERTAIN, origin: Origin::UsageConstraint });
        }
        if let Some(cond) = condition {
            self.infer_expr(cond, &mut scope);
        }
        let element_type = self.infer_expr(element, &mut scope);
        match kind {
            ContainerKind::List => self.types.intern(TypeTerm::List(element_type)),
            ContainerKind::Set => self.types.intern(TypeTerm::Set(element_type)),
            ContainerKind::Dict => {
                let value_type = value.map(|v| self.infer_expr(v, &mut scope)).unwrap_or_else(|| self.types.unknown());
                self.types.intern(TypeTerm::Dict(element_type, value_type))
            }
            ContainerKind::Tuple => self.types.intern(TypeTerm::Tuple(vec![element_type])),
        }
    }
}
