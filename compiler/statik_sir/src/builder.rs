//! AST -> SIR lowering: the single pass that turns Stage B's typed
//! expression tree into an immutable [`SirModule`], resolving method/call
//! targets into the closed runtime-ABI and container-operation
//! vocabularies along the way (spec.md §4.3).
//!
//! Grounded on `ori_codegen`'s single AST-walking lowering pass generalized
//! from "AST -> one target's source text" to "AST -> target-independent
//! SIR" (the same traversal shape, a different destination type per node).

use rustc_hash::{FxHashMap, FxHashSet};

use statik_ir::ast::{
    Arena as AstArena, Class, ContainerKind, ExprKind, ForIter, Function, Item, Literal, Module as AstModule, ParsedType, Stmt,
    StmtKind,
};
use statik_ir::{ExprId, Name, Span, StmtId, StringInterner};
use statik_types::{TypeId, TypeInterner, TypeTerm};

use statik_infer::InferenceResult;

use crate::arena::{SirArena, SirId, SirRange};
use crate::container_op::ContainerOpKind;
use crate::error::SirError;
use crate::module::{ClassRecord, SirFunction, SirModule};
use crate::node::{CallTarget, Comprehension, Const, SirGenerator, SirNodeKind};
use crate::runtime_op::{resolve_builtin_call, resolve_builtin_method, RuntimeOp};

/// Result of lowering one module: the built SIR plus any errors raised
/// while resolving container heterogeneity or call targets, mirroring
/// `statik_parse::ParseOutcome`/`statik_infer::InferenceResult`'s
/// `(result, errors)` shape — a partial `SirModule` is still returned on
/// error so a caller can keep rendering diagnostics against it.
pub struct SirBuildOutcome {
    pub module: SirModule,
    pub errors: Vec<SirError>,
}

/// Builds the SIR for `ast_module`. `allow_heterogeneous_containers` is the
/// chosen backend's `ContainerSystem::supports_heterogeneous()` answer
/// (spec.md §4.3); `statik_compiler` looks this up from the selected
/// backend before calling in, since the decision is backend-specific.
pub fn build_module(
    ast: &AstArena,
    ast_module: &AstModule,
    interner: &StringInterner,
    types: &mut TypeInterner,
    inference: &InferenceResult,
    allow_heterogeneous_containers: bool,
) -> SirBuildOutcome {
    let class_names = ast_module
        .items
        .iter()
        .filter_map(|item| match item {
            Item::Class(c) => Some(c.name),
            Item::Function(_) => None,
        })
        .collect();

    let mut builder = Builder {
        ast,
        interner,
        types,
        inference,
        allow_heterogeneous_containers,
        sir: SirArena::new(),
        functions: FxHashMap::default(),
        classes: FxHashMap::default(),
        class_names,
        locals_class: FxHashMap::default(),
        errors: Vec::new(),
    };
    let root = builder.lower_module(ast_module);
    let module = SirModule { arena: builder.sir, functions: builder.functions, classes: builder.classes, root };
    SirBuildOutcome { module, errors: builder.errors }
}

struct Builder<'a> {
    ast: &'a AstArena,
    interner: &'a StringInterner,
    types: &'a mut TypeInterner,
    inference: &'a InferenceResult,
    allow_heterogeneous_containers: bool,
    sir: SirArena,
    functions: FxHashMap<Name, SirFunction>,
    classes: FxHashMap<Name, ClassRecord>,
    class_names: FxHashSet<Name>,
    /// Best-effort map from a local bound to an instance of a known class
    /// (by a direct constructor-call assignment, a class-typed parameter
    /// annotation, or being the method's first — `self` — parameter) to
    /// that class's name. Classes are deliberately kept out of the
    /// `TypeTerm` lattice (see `statik_infer::resolve_parsed_type`'s doc
    /// comment), so `Attr`/`MethodCall` resolution on an instance needs
    /// this side channel rather than reading the receiver's `TypeId`.
    locals_class: FxHashMap<Name, Name>,
    errors: Vec<SirError>,
}

impl<'a> Builder<'a> {
    fn lower_module(&mut self, ast_module: &AstModule) -> SirId {
        let mut item_ids = Vec::with_capacity(ast_module.items.len());
        for item in &ast_module.items {
            match item {
                Item::Function(f) => {
                    self.lower_function(f, None);
                    item_ids.push(self.sir.alloc(SirNodeKind::FunctionDef(f.name), self.types.none(), f.span));
                }
                Item::Class(c) => {
                    self.lower_class(c);
                    item_ids.push(self.sir.alloc(SirNodeKind::ClassDef(c.name), self.types.none(), c.span));
                }
            }
        }
        let items = self.sir.alloc_children(item_ids);
        self.sir.alloc(SirNodeKind::Module(items), self.types.none(), Span::DUMMY)
    }

    fn lower_class(&mut self, c: &Class) {
        let mut fields = Vec::with_capacity(c.fields.len());
        for (name, annotation) in &c.fields {
            fields.push((*name, self.resolve_field_type(annotation, c.span)));
        }
        // Inserted before lowering methods so `self.field`/`self.method()`
        // inside the class's own methods can already look it up.
        self.classes.insert(
            c.name,
            ClassRecord { name: c.name, base: c.base, fields, constructor_params: Vec::new(), methods: Vec::new(), span: c.span },
        );

        let mut constructor_params = Vec::new();
        for method in &c.methods {
            self.lower_function(method, Some(c.name));
            if self.interner.lookup(method.name) == "__init__" {
                if let Some(sig) = self.inference.signatures.get(&method.name) {
                    constructor_params = sig.params.iter().skip(1).map(|(n, v)| (*n, v.type_id)).collect();
                }
            }
        }

        if let Some(record) = self.classes.get_mut(&c.name) {
            record.constructor_params = constructor_params;
            record.methods = c.methods.iter().map(|m| m.name).collect();
        }
    }

    fn resolve_field_type(&mut self, annotation: &Option<ParsedType>, span: Span) -> TypeId {
        match annotation {
            None => self.types.unknown(),
            // A field annotated with another class's name fails to resolve
            // here (classes aren't `TypeTerm`s); conservatively `Unknown`
            // rather than failing the whole build over it.
            Some(ty) => statik_infer::resolve_parsed_type(ty, span, self.interner, self.types).unwrap_or_else(|_| self.types.unknown()),
        }
    }

    fn lower_function(&mut self, f: &Function, owner_class: Option<Name>) {
        let sig = self.inference.signatures.get(&f.name).cloned();
        let mut params = Vec::with_capacity(self.ast.params(f.params).len());
        for p in self.ast.params(f.params) {
            let type_id = sig.as_ref().and_then(|s| s.param(p.name)).map(|v| v.type_id).unwrap_or_else(|| self.types.unknown());
            params.push((p.name, type_id));
        }

        self.locals_class.clear();
        if let (Some(class_name), Some(first)) = (owner_class, self.ast.params(f.params).first()) {
            self.locals_class.insert(first.name, class_name);
        }
        for p in self.ast.params(f.params) {
            if let Some(ParsedType::Name(n)) = &p.annotation {
                if self.class_names.contains(n) {
                    self.locals_class.insert(p.name, *n);
                }
            }
        }

        let return_type = sig.as_ref().map(|s| s.return_type.type_id).unwrap_or_else(|| self.types.unknown());
        let body = self.lower_stmt_list(self.ast.stmt_list(f.body));
        self.functions.insert(f.name, SirFunction { name: f.name, params, return_type, body, span: f.span });
    }

    fn lower_stmt_list(&mut self, stmts: &[StmtId]) -> SirRange {
        let mut ids = Vec::with_capacity(stmts.len());
        for &stmt_id in stmts {
            if let Some(id) = self.lower_stmt(self.ast.stmt(stmt_id)) {
                ids.push(id);
            }
        }
        self.sir.alloc_children(ids)
    }

    /// Returns `None` for `Pass`, the only statement with nothing to
    /// represent — callers drop it from the body's child list rather than
    /// carry a no-op node kind through every backend's emitter.
    fn lower_stmt(&mut self, stmt: &Stmt) -> Option<SirId> {
        match &stmt.kind {
            StmtKind::Expr(expr_id) => Some(self.lower_expr(*expr_id)),
            StmtKind::Assign { target, annotation, value } => {
                let value_id = self.lower_expr(*value);
                if let Some(class_name) = self.assigned_value_class(*value, annotation) {
                    self.locals_class.insert(*target, class_name);
                } else {
                    self.locals_class.remove(target);
                }
                Some(self.sir.alloc(SirNodeKind::Assign { target: *target, value: value_id }, self.types.none(), stmt.span))
            }
            StmtKind::If { condition, then_branch, else_branch } => {
                let condition_id = self.lower_expr(*condition);
                let then_ids = self.lower_stmt_list(self.ast.stmt_list(*then_branch));
                let else_ids = self.lower_stmt_list(self.ast.stmt_list(*else_branch));
                Some(self.sir.alloc(
                    SirNodeKind::If { condition: condition_id, then_branch: then_ids, else_branch: else_ids },
                    self.types.none(),
                    stmt.span,
                ))
            }
            StmtKind::While { condition, body } => {
                let condition_id = self.lower_expr(*condition);
                let body_ids = self.lower_stmt_list(self.ast.stmt_list(*body));
                Some(self.sir.alloc(SirNodeKind::While { condition: condition_id, body: body_ids }, self.types.none(), stmt.span))
            }
            StmtKind::For { target, iter, body } => {
                let (start, stop, step, iterable) = match iter {
                    ForIter::Range { start, stop, step } => {
                        let start_id = start.map(|e| self.lower_expr(e));
                        let stop_id = self.lower_expr(*stop);
                        let step_id = step.map(|e| self.lower_expr(e));
                        (start_id, Some(stop_id), step_id, None)
                    }
                    ForIter::Iterable(expr_id) => (None, None, None, Some(self.lower_expr(*expr_id))),
                };
                let body_ids = self.lower_stmt_list(self.ast.stmt_list(*body));
                Some(self.sir.alloc(
                    SirNodeKind::For { target: *target, start, stop, step, iterable, body: body_ids },
                    self.types.none(),
                    stmt.span,
                ))
            }
            StmtKind::Return(value) => {
                let value_id = value.map(|v| self.lower_expr(v));
                Some(self.sir.alloc(SirNodeKind::Return(value_id), self.types.none(), stmt.span))
            }
            StmtKind::Pass => None,
            StmtKind::NestedFunctionDef(nested) => {
                self.lower_function(nested, None);
                Some(self.sir.alloc(SirNodeKind::FunctionDef(nested.name), self.types.none(), stmt.span))
            }
        }
    }

    fn assigned_value_class(&self, value_expr_id: ExprId, annotation: &Option<ParsedType>) -> Option<Name> {
        if let Some(ParsedType::Name(n)) = annotation {
            if self.class_names.contains(n) {
                return Some(*n);
            }
        }
        if let ExprKind::Call { callee, .. } = &self.ast.expr(value_expr_id).kind {
            if self.class_names.contains(callee) {
                return Some(*callee);
            }
        }
        None
    }

    fn receiver_class(&self, receiver_expr_id: ExprId) -> Option<Name> {
        match &self.ast.expr(receiver_expr_id).kind {
            ExprKind::Name(n) => self.locals_class.get(n).copied(),
            ExprKind::Call { callee, .. } if self.class_names.contains(callee) => Some(*callee),
            _ => None,
        }
    }

    fn lower_expr(&mut self, expr_id: ExprId) -> SirId {
        let expr = self.ast.expr(expr_id);
        let span = expr.span;
        let inferred_type = self.inference.expr_types.get(&expr_id).copied().unwrap_or_else(|| self.types.unknown());

        match &expr.kind {
            ExprKind::Literal(lit) => {
                let value = match lit {
                    Literal::Int(v) => Const::Int(*v),
                    Literal::Float(v) => Const::Float(*v),
                    Literal::Bool(v) => Const::Bool(*v),
                    Literal::Str(n) => Const::Str(*n),
                    Literal::None => Const::None,
                };
                self.sir.alloc(SirNodeKind::Const(value), inferred_type, span)
            }
            ExprKind::Name(name) => self.sir.alloc(SirNodeKind::Var(*name), inferred_type, span),
            ExprKind::BinOp { op, lhs, rhs } => {
                let lhs_id = self.lower_expr(*lhs);
                let rhs_id = self.lower_expr(*rhs);
                self.sir.alloc(SirNodeKind::BinOp { op: *op, lhs: lhs_id, rhs: rhs_id }, inferred_type, span)
            }
            ExprKind::UnaryOp { op, operand } => {
                let operand_id = self.lower_expr(*operand);
                self.sir.alloc(SirNodeKind::UnaryOp { op: *op, operand: operand_id }, inferred_type, span)
            }
            ExprKind::Compare { op, lhs, rhs } => {
                let lhs_id = self.lower_expr(*lhs);
                let rhs_id = self.lower_expr(*rhs);
                self.sir.alloc(SirNodeKind::Compare { op: *op, lhs: lhs_id, rhs: rhs_id }, inferred_type, span)
            }
            ExprKind::Call { callee, args } => self.lower_call(*callee, *args, span, inferred_type),
            ExprKind::MethodCall { receiver, method, args } => self.lower_method_call(*receiver, *method, *args, span),
            ExprKind::Attr { receiver, field } => self.lower_attr(*receiver, *field, span),
            ExprKind::Index { receiver, index } => {
                let receiver_id = self.lower_expr(*receiver);
                let index_id = self.lower_expr(*index);
                self.sir.alloc(SirNodeKind::Index { receiver: receiver_id, index: index_id }, inferred_type, span)
            }
            ExprKind::SliceIndex { receiver, start, stop, step } => {
                let receiver_id = self.lower_expr(*receiver);
                let start_id = start.map(|e| self.lower_expr(e));
                let stop_id = stop.map(|e| self.lower_expr(e));
                let step_id = step.map(|e| self.lower_expr(e));
                self.sir.alloc(
                    SirNodeKind::SliceIndex { receiver: receiver_id, start: start_id, stop: stop_id, step: step_id },
                    inferred_type,
                    span,
                )
            }
            ExprKind::ContainerLit { kind, elements, values } => self.lower_container_lit(*kind, *elements, *values, span, inferred_type),
            ExprKind::Comprehension { kind, generators, condition, element, value } => {
                self.lower_comprehension(*kind, generators, *condition, *element, *value, span, inferred_type)
            }
        }
    }

    fn lower_call(&mut self, callee: Name, args: statik_ir::ExprRange, span: Span, inferred_type: TypeId) -> SirId {
        let arg_exprs = self.ast.expr_list(args);
        let arg_count = arg_exprs.len();
        let first_arg_type = arg_exprs.first().and_then(|id| self.inference.expr_types.get(id).copied());
        let is_known_user = self.inference.signatures.contains_key(&callee) || self.class_names.contains(&callee);

        let (target, type_id) = if is_known_user {
            (CallTarget::User(callee), inferred_type)
        } else {
            let callee_str = self.interner.lookup(callee);
            match resolve_builtin_call(callee_str, arg_count, first_arg_type, self.types) {
                Some(op) => {
                    let ty = self.runtime_op_return_type(op, first_arg_type);
                    (CallTarget::Builtin(op), ty)
                }
                None => {
                    self.errors.push(SirError::UnknownCallee { name: callee, span });
                    (CallTarget::User(callee), self.types.unknown())
                }
            }
        };

        let mut lowered_args = Vec::with_capacity(arg_count);
        for &id in self.ast.expr_list(args) {
            lowered_args.push(self.lower_expr(id));
        }
        let args_range = self.sir.alloc_children(lowered_args);
        self.sir.alloc(SirNodeKind::Call { target, args: args_range }, type_id, span)
    }

    fn lower_method_call(&mut self, receiver: ExprId, method: Name, args: statik_ir::ExprRange, span: Span) -> SirId {
        let receiver_id = self.lower_expr(receiver);
        let receiver_type = self.sir.type_of(receiver_id);
        let method_str = self.interner.lookup(method);

        let (target, type_id) = if let Some(op) = resolve_builtin_method(method_str, receiver_type, self.types) {
            let ty = self.runtime_op_return_type(op, Some(receiver_type));
            (CallTarget::Builtin(op), ty)
        } else if let Some(op) = ContainerOpKind::from_method_name(method_str) {
            let ty = self.container_op_return_type(op, receiver_type);
            (CallTarget::Container(op), ty)
        } else if self.receiver_class(receiver).is_some() {
            let ty = self.inference.signatures.get(&method).map(|s| s.return_type.type_id).unwrap_or_else(|| self.types.unknown());
            (CallTarget::User(method), ty)
        } else {
            self.errors.push(SirError::UnknownCallee { name: method, span });
            (CallTarget::User(method), self.types.unknown())
        };

        let mut lowered_args = Vec::new();
        for &id in self.ast.expr_list(args) {
            lowered_args.push(self.lower_expr(id));
        }
        let args_range = self.sir.alloc_children(lowered_args);
        self.sir.alloc(SirNodeKind::MethodCall { receiver: receiver_id, target, args: args_range }, type_id, span)
    }

    fn lower_attr(&mut self, receiver: ExprId, field: Name, span: Span) -> SirId {
        let receiver_id = self.lower_expr(receiver);
        let type_id = self
            .receiver_class(receiver)
            .and_then(|class_name| self.classes.get(&class_name))
            .and_then(|record| record.fields.iter().find(|(n, _)| *n == field).map(|(_, t)| *t))
            .unwrap_or_else(|| self.types.unknown());
        self.sir.alloc(SirNodeKind::Attr { receiver: receiver_id, field }, type_id, span)
    }

    fn lower_container_lit(
        &mut self,
        kind: ContainerKind,
        elements: statik_ir::ExprRange,
        values: statik_ir::ExprRange,
        span: Span,
        inferred_type: TypeId,
    ) -> SirId {
        let mut lowered_elements = Vec::new();
        for &id in self.ast.expr_list(elements) {
            lowered_elements.push(self.lower_expr(id));
        }
        let mut lowered_values = Vec::new();
        for &id in self.ast.expr_list(values) {
            lowered_values.push(self.lower_expr(id));
        }

        if kind != ContainerKind::Tuple {
            self.check_heterogeneous(inferred_type, span);
        }

        let elements_range = self.sir.alloc_children(lowered_elements);
        let values_range = self.sir.alloc_children(lowered_values);
        self.sir.alloc(SirNodeKind::ContainerLit { kind, elements: elements_range, values: values_range }, inferred_type, span)
    }

    #[allow(clippy::too_many_arguments)]
    fn lower_comprehension(
        &mut self,
        kind: ContainerKind,
        generators: &[statik_ir::ast::Generator],
        condition: Option<ExprId>,
        element: ExprId,
        value: Option<ExprId>,
        span: Span,
        inferred_type: TypeId,
    ) -> SirId {
        let mut sir_generators = Vec::with_capacity(generators.len());
        for g in generators {
            let iter_id = self.lower_expr(g.iter);
            sir_generators.push(SirGenerator { target: g.target, iter: iter_id });
        }
        let condition_id = condition.map(|c| self.lower_expr(c));
        let element_id = self.lower_expr(element);
        let value_id = value.map(|v| self.lower_expr(v));

        if kind != ContainerKind::Tuple {
            self.check_heterogeneous(inferred_type, span);
        }

        let comprehension = Comprehension { kind, generators: sir_generators, condition: condition_id, element: element_id, value: value_id };
        self.sir.alloc(SirNodeKind::Comprehension(Box::new(comprehension)), inferred_type, span)
    }

    /// Raises [`SirError::HeterogeneousContainer`] when a `List`/`Set`'s
    /// element type (or a `Dict`'s key or value type) joined to a `Union`
    /// during inference and the target backend hasn't opted into
    /// supporting that (spec.md §4.3).
    fn check_heterogeneous(&mut self, container_type: TypeId, span: Span) {
        if self.allow_heterogeneous_containers {
            return;
        }
        let is_union = |t: TypeId, types: &TypeInterner| matches!(types.lookup(t), TypeTerm::Union(_));
        let offending = match self.types.lookup(container_type).clone() {
            TypeTerm::List(elem) | TypeTerm::Set(elem) => is_union(elem, self.types),
            TypeTerm::Dict(key, value) => is_union(key, self.types) || is_union(value, self.types),
            _ => false,
        };
        if offending {
            self.errors.push(SirError::HeterogeneousContainer { span });
        }
    }

    fn runtime_op_return_type(&mut self, op: RuntimeOp, first_arg_type: Option<TypeId>) -> TypeId {
        match op {
            RuntimeOp::AbsInt | RuntimeOp::Min2Int | RuntimeOp::Max2Int | RuntimeOp::IntOfFloat => self.types.int(),
            RuntimeOp::AbsFloat | RuntimeOp::Min2Float | RuntimeOp::Max2Float | RuntimeOp::FloatOfInt => self.types.float(),
            RuntimeOp::BoolOf => self.types.bool(),
            RuntimeOp::StrOf | RuntimeOp::StrUpper | RuntimeOp::StrLower | RuntimeOp::StrStrip | RuntimeOp::StrReplace => self.types.str(),
            RuntimeOp::LenString | RuntimeOp::LenList | RuntimeOp::LenDict | RuntimeOp::LenSet => self.types.int(),
            RuntimeOp::PrintValue => self.types.none(),
            RuntimeOp::StrSplit => {
                let str_id = self.types.str();
                self.types.intern(TypeTerm::List(str_id))
            }
            // Never produced by `resolve_builtin_call`/`resolve_builtin_method`
            // today; a target's `ContainerSystem` may still choose one of
            // these to lower a `Comprehension` node as a runtime helper call
            // (spec.md §4.5) rather than native syntax.
            RuntimeOp::ListComprehensionWithFilter | RuntimeOp::DictComprehension | RuntimeOp::SetComprehension => {
                first_arg_type.unwrap_or_else(|| self.types.unknown())
            }
        }
    }

    fn container_op_return_type(&mut self, op: ContainerOpKind, receiver_type: TypeId) -> TypeId {
        match op {
            ContainerOpKind::Len => self.types.int(),
            ContainerOpKind::Append | ContainerOpKind::Set => self.types.none(),
            ContainerOpKind::Contains => self.types.bool(),
            ContainerOpKind::Get => match self.types.lookup(receiver_type).clone() {
                TypeTerm::Dict(_, value) => value,
                TypeTerm::List(elem) | TypeTerm::Set(elem) => elem,
                _ => self.types.unknown(),
            },
            ContainerOpKind::Iter | ContainerOpKind::Map | ContainerOpKind::Filter => receiver_type,
        }
    }
}
