//! Walks a built SIR module and renders the systems target's surface
//! syntax, grounded on `ori_codegen::c::{function, expr}`'s per-node
//! `write`/`writeln` walking style but working from a typed SIR tree
//! instead of a raw typed-expr arena.

use statik_backend::{ContainerSystem, Emitter, EmitError, Feature, NameMapper, NameKind, Preferences, RuntimeAbi};
use statik_ir::ast::{BinaryOp, CompareOp, UnaryOp};
use statik_ir::{Name, StringInterner};
use statik_sir::{CallTarget, Const, SirArena, SirId, SirModule, SirNodeKind};
use statik_types::TypeInterner;

use crate::container_system::CContainerSystem;
use crate::name_mapper::CNameMapper;
use crate::runtime_abi::CRuntimeAbi;
use crate::types;

pub struct CEmitter;

impl Emitter for CEmitter {
    fn emit(&self, module: &SirModule, interner: &StringInterner, types: &TypeInterner, preferences: &Preferences) -> Result<String, EmitError> {
        let mapper = CNameMapper { convention: preferences.naming_convention };
        let mut w = Writer {
            arena: &module.arena,
            interner,
            types,
            mapper: &mapper,
            abi: &CRuntimeAbi,
            containers: &CContainerSystem,
            out: String::new(),
            indent: 0,
        };
        w.writeln("#include \"statik_runtime.h\"");
        w.newline();
        for &item in module.items() {
            match w.arena.kind(item) {
                SirNodeKind::FunctionDef(name) => {
                    let f = module.function(*name).ok_or_else(|| EmitError::UnsupportedByBackend {
                        detail: "function referenced by the module but not registered".to_string(),
                        span: w.arena.span_of(item),
                    })?;
                    w.emit_function(module, *name, f)?;
                }
                SirNodeKind::ClassDef(_) => {
                    return Err(EmitError::UnsupportedFeature { feature: Feature::Classes, span: w.arena.span_of(item) });
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
    mapper: &'a dyn NameMapper,
    abi: &'a CRuntimeAbi,
    containers: &'a CContainerSystem,
    out: String,
    indent: usize,
}

impl<'a> Writer<'a> {
    fn name(&self, name: Name, kind: NameKind) -> String {
        self.mapper.map_name(self.interner.lookup(name), kind)
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
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

    fn emit_function(&mut self, module: &SirModule, name: Name, f: &statik_sir::SirFunction) -> Result<(), EmitError> {
        let ret = types::spell(f.return_type, self.types);
        let params: Vec<String> = f
            .params
            .iter()
            .map(|(n, t)| format!("{} {}", types::spell(*t, self.types), self.name(*n, NameKind::Parameter)))
            .collect();
        self.writeln(&format!("{} {}({}) {{", ret, self.name(name, NameKind::Function), params.join(", ")));
        self.indent += 1;
        for &stmt in self.arena.children(f.body) {
            self.emit_stmt(module, stmt)?;
        }
        self.indent -= 1;
        self.writeln("}");
        self.newline();
        Ok(())
    }

    fn emit_stmt(&mut self, module: &SirModule, id: SirId) -> Result<(), EmitError> {
        match self.arena.kind(id).clone() {
            SirNodeKind::Assign { target, value } => {
                let v = self.emit_expr(module, value)?;
                let ty = types::spell(self.arena.type_of(id), self.types);
                self.writeln(&format!("{} {} = {};", ty, self.name(target, NameKind::Variable), v));
            }
            SirNodeKind::If { condition, then_branch, else_branch } => {
                let c = self.emit_expr(module, condition)?;
                self.writeln(&format!("if ({c}) {{"));
                self.indent += 1;
                for &s in self.arena.children(then_branch) {
                    self.emit_stmt(module, s)?;
                }
                self.indent -= 1;
                if !else_branch.is_empty() {
                    self.writeln("} else {");
                    self.indent += 1;
                    for &s in self.arena.children(else_branch) {
                        self.emit_stmt(module, s)?;
                    }
                    self.indent -= 1;
                }
                self.writeln("}");
            }
            SirNodeKind::While { condition, body } => {
                let c = self.emit_expr(module, condition)?;
                self.writeln(&format!("while ({c}) {{"));
                self.indent += 1;
                for &s in self.arena.children(body) {
                    self.emit_stmt(module, s)?;
                }
                self.indent -= 1;
                self.writeln("}");
            }
            SirNodeKind::For { target, start, stop, step, iterable, body } => {
                let var = self.name(target, NameKind::Variable);
                if let Some(iterable) = iterable {
                    let it = self.emit_expr(module, iterable)?;
                    self.writeln(&format!("STATIK_FOREACH(int64_t, {var}, {it}) {{"));
                } else {
                    let start = start.map(|e| self.emit_expr(module, e)).transpose()?.unwrap_or_else(|| "0".to_string());
                    let stop = stop.map(|e| self.emit_expr(module, e)).transpose()?.unwrap_or_default();
                    let step = step.map(|e| self.emit_expr(module, e)).transpose()?.unwrap_or_else(|| "1".to_string());
                    self.writeln(&format!(
                        "for (int64_t {var} = {start}; {var} < {stop}; {var} += {step}) {{"
                    ));
                }
                self.indent += 1;
                for &s in self.arena.children(body) {
                    self.emit_stmt(module, s)?;
                }
                self.indent -= 1;
                self.writeln("}");
            }
            SirNodeKind::Return(value) => match value {
                Some(v) => {
                    let v = self.emit_expr(module, v)?;
                    self.writeln(&format!("return {v};"));
                }
                None => self.writeln("return;"),
            },
            SirNodeKind::FunctionDef(_) => {
                return Err(EmitError::UnsupportedByBackend {
                    detail: "nested function definitions are not lowered by this target".to_string(),
                    span: self.arena.span_of(id),
                });
            }
            other => {
                let e = self.emit_expr_kind(module, id, &other)?;
                self.writeln(&format!("{e};"));
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
                    return Ok(format!("pow({lhs}, {rhs})"));
                }
                Ok(format!("({} {} {})", lhs, c_binop(*op), rhs))
            }
            SirNodeKind::UnaryOp { op, operand } => {
                let operand = self.emit_expr(module, *operand)?;
                let sym = match op {
                    UnaryOp::Neg => "-",
                    UnaryOp::Not => "!",
                };
                Ok(format!("({sym}{operand})"))
            }
            SirNodeKind::Compare { op: CompareOp::In | CompareOp::NotIn, .. } => Err(EmitError::UnsupportedByBackend {
                detail: "membership comparisons have no contract-level lowering for this target".to_string(),
                span: self.arena.span_of(id),
            }),
            SirNodeKind::Compare { op, lhs, rhs } => {
                let lhs = self.emit_expr(module, *lhs)?;
                let rhs = self.emit_expr(module, *rhs)?;
                Ok(format!("({} {} {})", lhs, c_compare(*op), rhs))
            }
            SirNodeKind::Call { target, args } => self.emit_call(module, *target, *args, id),
            SirNodeKind::MethodCall { receiver, target, args } => {
                let recv = self.emit_expr(module, *receiver)?;
                self.emit_method_call(module, &recv, *target, *args, id)
            }
            SirNodeKind::Index { receiver, index } => {
                let recv = self.emit_expr(module, *receiver)?;
                let idx = self.emit_expr(module, *index)?;
                Ok(self.containers.build_expr(statik_sir::ContainerOpKind::Get, &statik_backend::EmittedExpr::new(recv), &[statik_backend::EmittedExpr::new(idx)]).0)
            }
            SirNodeKind::SliceIndex { .. } => Err(EmitError::UnsupportedByBackend {
                detail: "slice indexing has no contract-level lowering for this target".to_string(),
                span: self.arena.span_of(id),
            }),
            SirNodeKind::Attr { receiver, field } => {
                let recv = self.emit_expr(module, *receiver)?;
                Ok(format!("{recv}.{}", self.name(*field, NameKind::Field)))
            }
            SirNodeKind::ContainerLit { kind, elements, values } => {
                let elems: Vec<String> = self.arena.children(*elements).to_vec().iter().map(|e| self.emit_expr(module, *e)).collect::<Result<_, _>>()?;
                if !values.is_empty() {
                    let vals: Vec<String> = self.arena.children(*values).to_vec().iter().map(|e| self.emit_expr(module, *e)).collect::<Result<_, _>>()?;
                    let pairs: Vec<String> = elems.into_iter().zip(vals).map(|(k, v)| format!("{{{k}, {v}}}")).collect();
                    Ok(format!("STATIK_DICT_LIT({})", pairs.join(", ")))
                } else {
                    let ctor = match kind {
                        statik_ir::ast::ContainerKind::List => "STATIK_LIST_LIT",
                        statik_ir::ast::ContainerKind::Set => "STATIK_SET_LIT",
                        statik_ir::ast::ContainerKind::Tuple => "STATIK_TUPLE_LIT",
                        statik_ir::ast::ContainerKind::Dict => unreachable!("dict literals always carry values"),
                    };
                    Ok(format!("{ctor}({})", elems.join(", ")))
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
                let element = self.emit_expr(module, c.element)?;
                let var = self.name(gen.target, NameKind::Variable);
                match &c.condition {
                    Some(cond) => {
                        let cond = self.emit_expr(module, *cond)?;
                        Ok(format!(
                            "STATIK_COMPREHENSION_FILTER(int64_t, {var}, {iter}, {cond}, {element})"
                        ))
                    }
                    None => Ok(format!("STATIK_COMPREHENSION(int64_t, {var}, {iter}, {element})")),
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
            Const::Float(v) => format!("{v:?}"),
            Const::Bool(v) => v.to_string(),
            Const::Str(name) => format!("STATIK_STR({:?})", self.interner.lookup(*name)),
            Const::None => "NULL".to_string(),
        }
    }

    fn emit_call(&mut self, module: &SirModule, target: CallTarget, args: statik_sir::SirRange, id: SirId) -> Result<String, EmitError> {
        let args: Vec<String> = self.arena.children(args).to_vec().iter().map(|a| self.emit_expr(module, *a)).collect::<Result<_, _>>()?;
        match target {
            CallTarget::User(name) => Ok(format!("{}({})", self.name(name, NameKind::Function), args.join(", "))),
            CallTarget::Builtin(op) => Ok(format!("{}({})", self.abi.helper_symbol(op), args.join(", "))),
            CallTarget::Container(_) => Err(EmitError::UnsupportedByBackend {
                detail: "container operations are only reachable through a MethodCall receiver".to_string(),
                span: self.arena.span_of(id),
            }),
        }
    }

    fn emit_method_call(&mut self, module: &SirModule, recv: &str, target: CallTarget, args: statik_sir::SirRange, id: SirId) -> Result<String, EmitError> {
        let arg_exprs: Vec<String> = self.arena.children(args).to_vec().iter().map(|a| self.emit_expr(module, *a)).collect::<Result<_, _>>()?;
        match target {
            CallTarget::Builtin(op) => Ok(format!("{}({}, {})", self.abi.helper_symbol(op), recv, arg_exprs.join(", "))),
            CallTarget::Container(op) => {
                let emitted_args: Vec<statik_backend::EmittedExpr> = arg_exprs.into_iter().map(statik_backend::EmittedExpr::new).collect();
                Ok(self.containers.build_expr(op, &statik_backend::EmittedExpr::new(recv.to_string()), &emitted_args).0)
            }
            CallTarget::User(name) => Ok(format!("{}({}, {})", self.name(name, NameKind::Function), recv, arg_exprs.join(", "))),
            #[expect(unreachable_patterns, reason = "keeps this arm exhaustive if CallTarget grows")]
            _ => Err(EmitError::UnsupportedByBackend {
                detail: "method call target could not be resolved to a lowering rule".to_string(),
                span: self.arena.span_of(id),
            }),
        }
    }
}

/// `FloorDiv` reuses C's truncating `/`: correct for same-signed operands,
/// a known gap for mixed-sign ones — full floor-division lowering is the
/// low-level IR backend's job (spec.md §4.7), not this contract-level one.
const fn c_binop(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::FloorDiv => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Pow => "**",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
    }
}

/// Never called for `In`/`NotIn` — [`Writer::emit_expr_kind`] rejects those
/// before reaching here.
const fn c_compare(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "==",
        CompareOp::NotEq => "!=",
        CompareOp::Lt => "<",
        CompareOp::LtEq => "<=",
        CompareOp::Gt => ">",
        CompareOp::GtEq => ">=",
        CompareOp::In | CompareOp::NotIn => unreachable!("handled by caller"),
    }
}
