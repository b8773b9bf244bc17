//! Walks a built SIR module and renders OCaml-family surface syntax. Same
//! `Writer`-over-arena shape as `statik_target_c::emitter`/
//! `statik_target_go::emitter`, but every statement is an expression: `if`
//! without an else, loops, and `return` all have to be reshaped into the
//! host language's expression grammar rather than emitted as Go/C statements
//! verbatim.

use statik_backend::{ContainerSystem, EmitError, Emitter, NameKind, NameMapper, Preferences, RuntimeAbi};
use statik_ir::ast::{BinaryOp, CompareOp, UnaryOp};
use statik_ir::{Name, StringInterner};
use statik_sir::{CallTarget, Const, SirArena, SirId, SirModule, SirNodeKind, SirRange};
use statik_types::TypeInterner;

use crate::container_system::MlContainerSystem;
use crate::name_mapper::MlNameMapper;
use crate::runtime_abi::MlRuntimeAbi;
use crate::types;

pub struct MlEmitter;

impl Emitter for MlEmitter {
    fn emit(&self, module: &SirModule, interner: &StringInterner, types: &TypeInterner, preferences: &Preferences) -> Result<String, EmitError> {
        let mapper = MlNameMapper { convention: preferences.naming_convention };
        let containers = MlContainerSystem { hashtables: preferences.hashtables };
        let mut w = Writer {
            arena: &module.arena,
            interner,
            types,
            preferences,
            mapper: &mapper,
            abi: &MlRuntimeAbi,
            containers: &containers,
            out: String::new(),
            indent: 0,
        };
        for &item in module.items() {
            match w.arena.kind(item) {
                SirNodeKind::FunctionDef(name) => {
                    let f = module.function(*name).ok_or_else(|| EmitError::UnsupportedByBackend {
                        detail: "function referenced by the module but not registered".to_string(),
                        span: w.arena.span_of(item),
                    })?;
                    w.emit_function(module, *name, f)?;
                }
                SirNodeKind::ClassDef(name) => {
                    let class = module.class(*name).ok_or_else(|| EmitError::UnsupportedByBackend {
                        detail: "class referenced by the module but not registered".to_string(),
                        span: w.arena.span_of(item),
                    })?;
                    w.emit_class(class);
                }
                _ => {}
            }
        }
        Ok(w.out)
    }
}

struct Writer<'a> {
    arena: &'a SirArena,
    interner: &'a StringInterner,
    types: &'a TypeInterner,
    preferences: &'a Preferences,
    mapper: &'a dyn NameMapper,
    abi: &'a MlRuntimeAbi,
    containers: &'a MlContainerSystem,
    out: String,
    indent: usize,
}

impl<'a> Writer<'a> {
    fn name(&self, name: Name, kind: NameKind) -> String {
        self.mapper.map_name(self.interner.lookup(name), kind)
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.out.push_str(s);
        self.out.push('\n');
    }

    fn newline(&mut self) {
        self.out.push('\n');
    }

    /// A record, the structural counterpart to a class with no methods —
    /// this target only lowers the contract-level field layout, same scope
    /// as the other two targets' `emit_class`.
    fn emit_class(&mut self, class: &statik_sir::ClassRecord) {
        let type_name = self.name(class.name, NameKind::Class);
        self.writeln(&format!("type {} = {{", to_lower_type_name(&type_name)));
        self.indent += 1;
        for (field_name, field_type) in &class.fields {
            let ty = types::spell(*field_type, self.types, self.preferences);
            self.writeln(&format!("mutable {} : {};", self.name(*field_name, NameKind::Field), ty));
        }
        self.indent -= 1;
        self.writeln("}");
        self.newline();
    }

    fn emit_function(&mut self, module: &SirModule, name: Name, f: &statik_sir::SirFunction) -> Result<(), EmitError> {
        let params: Vec<String> = f
            .params
            .iter()
            .map(|(n, t)| format!("({} : {})", self.name(*n, NameKind::Parameter), types::spell(*t, self.types, self.preferences)))
            .collect();
        let params = if params.is_empty() { "()".to_string() } else { params.join(" ") };
        self.writeln(&format!("let {} {} : {} =", self.name(name, NameKind::Function), params, types::spell(f.return_type, self.types, self.preferences)));
        self.indent += 1;
        let stmts = self.arena.children(f.body).to_vec();
        self.emit_block(module, &stmts)?;
        self.indent -= 1;
        self.newline();
        Ok(())
    }

    /// Renders a statement sequence as a chain of `let ... in`/sequencing
    /// expressions, ending in whatever the trailing `return` (or `()` if
    /// none) produces — the reshaping this target's expression-oriented
    /// grammar requires that the statement-oriented targets don't.
    fn emit_block(&mut self, module: &SirModule, stmts: &[SirId]) -> Result<(), EmitError> {
        let Some((last, init)) = stmts.split_last() else {
            self.writeln("()");
            return Ok(());
        };
        for &stmt in init {
            self.emit_stmt_in_sequence(module, stmt)?;
        }
        self.emit_tail_stmt(module, *last)
    }

    fn emit_stmt_in_sequence(&mut self, module: &SirModule, id: SirId) -> Result<(), EmitError> {
        match self.arena.kind(id).clone() {
            SirNodeKind::Assign { target, value } => {
                let v = self.emit_expr(module, value)?;
                self.writeln(&format!("let {} = {} in", self.name(target, NameKind::Variable), v));
            }
            SirNodeKind::If { condition, then_branch, else_branch } => {
                let c = self.emit_expr(module, condition)?;
                self.writeln(&format!("if {c} then begin"));
                self.indent += 1;
                let then_stmts = self.arena.children(then_branch).to_vec();
                self.emit_block(module, &then_stmts)?;
                self.indent -= 1;
                if else_branch.is_empty() {
                    self.writeln("end;");
                } else {
                    self.writeln("end else begin");
                    self.indent += 1;
                    let else_stmts = self.arena.children(else_branch).to_vec();
                    self.emit_block(module, &else_stmts)?;
                    self.indent -= 1;
                    self.writeln("end;");
                }
            }
            SirNodeKind::While { condition, body } => {
                let c = self.emit_expr(module, condition)?;
                self.writeln(&format!("while {c} do"));
                self.indent += 1;
                let body_stmts = self.arena.children(body).to_vec();
                self.emit_block(module, &body_stmts)?;
                self.indent -= 1;
                self.writeln("done;");
            }
            SirNodeKind::For { target, start, stop, step, iterable, body } => {
                let var = self.name(target, NameKind::Variable);
                self.indent += 1;
                let body_stmts = self.arena.children(body).to_vec();
                if let Some(iterable) = iterable {
                    let it = self.emit_expr(module, iterable)?;
                    self.writeln(&format!("List.iter (fun {var} -> begin"));
                    self.emit_block(module, &body_stmts)?;
                    self.indent -= 1;
                    self.writeln(&format!("end) {it};"));
                } else {
                    let start = start.map(|e| self.emit_expr(module, e)).transpose()?.unwrap_or_else(|| "0".to_string());
                    let stop = stop.map(|e| self.emit_expr(module, e)).transpose()?.unwrap_or_default();
                    self.writeln(&format!("for {var} = {start} to ({stop}) - 1 do"));
                    self.emit_block(module, &body_stmts)?;
                    self.indent -= 1;
                    self.writeln("done;");
                    let _ = step;
                }
            }
            SirNodeKind::Return(_) => {
                return Err(EmitError::UnsupportedByBackend {
                    detail: "a return in non-tail position has no direct expression-language lowering".to_string(),
                    span: self.arena.span_of(id),
                });
            }
            SirNodeKind::FunctionDef(_) => {
                return Err(EmitError::UnsupportedByBackend {
                    detail: "nested function definitions are not lowered by this target".to_string(),
                    span: self.arena.span_of(id),
                });
            }
            other => {
                let e = self.emit_expr_kind(module, id, &other)?;
                self.writeln(&format!("ignore ({e});"));
            }
        }
        Ok(())
    }

    fn emit_tail_stmt(&mut self, module: &SirModule, id: SirId) -> Result<(), EmitError> {
        match self.arena.kind(id).clone() {
            SirNodeKind::Return(value) => match value {
                Some(v) => {
                    let v = self.emit_expr(module, v)?;
                    self.writeln(&v);
                }
                None => self.writeln("()"),
            },
            SirNodeKind::If { condition, then_branch, else_branch } => {
                let c = self.emit_expr(module, condition)?;
                self.writeln(&format!("if {c} then begin"));
                self.indent += 1;
                let then_stmts = self.arena.children(then_branch).to_vec();
                self.emit_block(module, &then_stmts)?;
                self.indent -= 1;
                self.writeln("end else begin");
                self.indent += 1;
                let else_stmts = self.arena.children(else_branch).to_vec();
                if else_stmts.is_empty() {
                    self.writeln("()");
                } else {
                    self.emit_block(module, &else_stmts)?;
                }
                self.indent -= 1;
                self.writeln("end");
            }
            _ => {
                self.emit_stmt_in_sequence(module, id)?;
                self.writeln("()");
            }
        }
        Ok(())
    }

    fn emit_expr(&mut self, module: &SirModule, id: SirId) -> Result<String, EmitError> {
        let kind = self.arena.kind(id).clone();
        self.emit_expr_kind(module, id, &kind)
    }

    fn emit_expr_kind(&mut self, module: &SirModule, id: SirId, kind: &SirNodeKind) -> Result<String, EmitError> {
        match kind {
            SirNodeKind::Const(c) => Ok(self.emit_const(c)),
            SirNodeKind::Var(name) => Ok(self.name(*name, NameKind::Variable)),
            SirNodeKind::BinOp { op, lhs, rhs } => {
                let lhs = self.emit_expr(module, *lhs)?;
                let rhs = self.emit_expr(module, *rhs)?;
                if *op == BinaryOp::Pow {
                    return Ok(format!("({lhs} ** {rhs})"));
                }
                Ok(format!("({} {} {})", lhs, ml_binop(*op), rhs))
            }
            SirNodeKind::UnaryOp { op, operand } => {
                let operand = self.emit_expr(module, *operand)?;
                let sym = match op {
                    UnaryOp::Neg => "-",
                    UnaryOp::Not => "not ",
                };
                Ok(format!("({sym}{operand})"))
            }
            SirNodeKind::Compare { op: CompareOp::In, lhs, rhs } => {
                let lhs = self.emit_expr(module, *lhs)?;
                let rhs = self.emit_expr(module, *rhs)?;
                Ok(format!("(List.mem {lhs} {rhs})"))
            }
            SirNodeKind::Compare { op: CompareOp::NotIn, lhs, rhs } => {
                let lhs = self.emit_expr(module, *lhs)?;
                let rhs = self.emit_expr(module, *rhs)?;
                Ok(format!("(not (List.mem {lhs} {rhs}))"))
            }
            SirNodeKind::Compare { op, lhs, rhs } => {
                let lhs = self.emit_expr(module, *lhs)?;
                let rhs = self.emit_expr(module, *rhs)?;
                Ok(format!("({} {} {})", lhs, ml_compare(*op), rhs))
            }
            SirNodeKind::Call { target, args } => self.emit_call(module, *target, *args, id),
            SirNodeKind::MethodCall { receiver, target, args } => {
                let recv = self.emit_expr(module, *receiver)?;
                self.emit_method_call(module, &recv, *target, *args, id)
            }
            SirNodeKind::Index { receiver, index } => {
                let recv = self.emit_expr(module, *receiver)?;
                let idx = self.emit_expr(module, *index)?;
                Ok(format!("(List.nth {recv} {idx})"))
            }
            SirNodeKind::SliceIndex { .. } => Err(EmitError::UnsupportedByBackend {
                detail: "slicing has no contract-level lowering onto an immutable singly-linked list".to_string(),
                span: self.arena.span_of(id),
            }),
            SirNodeKind::Attr { receiver, field } => {
                let recv = self.emit_expr(module, *receiver)?;
                Ok(format!("{recv}.{}", self.name(*field, NameKind::Field)))
            }
            SirNodeKind::ContainerLit { kind, elements, values } => {
                let elems: Vec<String> = self.arena.children(*elements).to_vec().iter().map(|e| self.emit_expr(module, *e)).collect::<Result<_, _>>()?;
                match kind {
                    statik_ir::ast::ContainerKind::List => Ok(format!("[{}]", elems.join("; "))),
                    statik_ir::ast::ContainerKind::Set => Ok(format!("StatikSet.of_list [{}]", elems.join("; "))),
                    statik_ir::ast::ContainerKind::Tuple => Ok(format!("({})", elems.join(", "))),
                    statik_ir::ast::ContainerKind::Dict => {
                        let vals: Vec<String> = self.arena.children(*values).to_vec().iter().map(|e| self.emit_expr(module, *e)).collect::<Result<_, _>>()?;
                        let pairs: Vec<String> = elems.into_iter().zip(vals).map(|(k, v)| format!("({k}, {v})")).collect();
                        match self.preferences.hashtables {
                            statik_backend::HashtableStrategy::Stdlib => Ok(format!("Statik.hashtbl_of_list [{}]", pairs.join("; "))),
                            statik_backend::HashtableStrategy::Map => Ok(format!("StatikMap.of_list [{}]", pairs.join("; "))),
                        }
                    }
                }
            }
            SirNodeKind::Comprehension(c) => {
                if c.generators.len() != 1 {
                    return Err(EmitError::UnsupportedByBackend {
                        detail: "multi-clause comprehensions have no contract-level lowering for this target".to_string(),
                        span: self.arena.span_of(id),
                    });
                }
                let gen = &c.generators[0];
                let iter = self.emit_expr(module, gen.iter)?;
                match &c.condition {
                    Some(_) => Ok(format!("(Statik.list_comprehension_with_filter {iter})")),
                    None => Ok(format!("(List.map (fun x -> x) {iter})")),
                }
            }
            SirNodeKind::Assign { .. }
            | SirNodeKind::If { .. }
            | SirNodeKind::While { .. }
            | SirNodeKind::For { .. }
            | SirNodeKind::Return(_)
            | SirNodeKind::FunctionDef(_)
            | SirNodeKind::ClassDef(_)
            | SirNodeKind::Module(_) => Err(EmitError::UnsupportedByBackend {
                detail: "statement-level node encountered in expression position".to_string(),
                span: self.arena.span_of(id),
            }),
        }
    }

    fn emit_const(&self, c: &Const) -> String {
        match c {
            Const::Int(v) => v.to_string(),
            Const::Float(v) => {
                let s = format!("{v:?}");
                if s.contains('.') || s.contains('e') {
                    s
                } else {
                    format!("{s}.")
                }
            }
            Const::Bool(v) => v.to_string(),
            Const::Str(name) => format!("{:?}", self.interner.lookup(*name)),
            Const::None => "()".to_string(),
        }
    }

    fn emit_call(&mut self, module: &SirModule, target: CallTarget, args: SirRange, id: SirId) -> Result<String, EmitError> {
        let args: Vec<String> = self.arena.children(args).to_vec().iter().map(|a| self.emit_expr(module, *a)).collect::<Result<_, _>>()?;
        match target {
            CallTarget::User(name) => Ok(format!("({} {})", self.name(name, NameKind::Function), args.join(" "))),
            CallTarget::Builtin(op) => Ok(format!("({} {})", self.abi.helper_symbol(op), args.join(" "))),
            CallTarget::Container(_) => Err(EmitError::UnsupportedByBackend {
                detail: "container operations are only reachable through a MethodCall receiver".to_string(),
                span: self.arena.span_of(id),
            }),
        }
    }

    fn emit_method_call(&mut self, module: &SirModule, recv: &str, target: CallTarget, args: SirRange, id: SirId) -> Result<String, EmitError> {
        let arg_exprs: Vec<String> = self.arena.children(args).to_vec().iter().map(|a| self.emit_expr(module, *a)).collect::<Result<_, _>>()?;
        match target {
            CallTarget::Builtin(op) => Ok(format!("({} {recv} {})", self.abi.helper_symbol(op), arg_exprs.join(" "))),
            CallTarget::Container(op) => {
                let emitted_args: Vec<statik_backend::EmittedExpr> = arg_exprs.into_iter().map(statik_backend::EmittedExpr::new).collect();
                Ok(self.containers.build_expr(op, &statik_backend::EmittedExpr::new(recv.to_string()), &emitted_args).0)
            }
            CallTarget::User(name) => Ok(format!("({recv}.{} {})", self.name(name, NameKind::Function), arg_exprs.join(" "))),
        }
    }
}

/// ML's value namespace forbids capitalized record type names; class names
/// are capitalized by [`MlNameMapper`] for use as *module*-style identifiers
/// but a `type` declaration itself still needs a lowercase head.
fn to_lower_type_name(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

const fn ml_binop(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/.",
        BinaryOp::FloorDiv => "/",
        BinaryOp::Mod => "mod",
        BinaryOp::Pow => unreachable!("handled by caller"),
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
    }
}

const fn ml_compare(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "=",
        CompareOp::NotEq => "<>",
        CompareOp::Lt => "<",
        CompareOp::LtEq => "<=",
        CompareOp::Gt => ">",
        CompareOp::GtEq => ">=",
        CompareOp::In | CompareOp::NotIn => unreachable!("handled by caller"),
    }
}
