//! Walks a built SIR module and renders Go surface syntax. Structured the
//! same way as the manual-memory target's emitter (one `Writer` carrying
//! the interners/tables, one method per SIR node family) but with Go's own
//! syntax: `:=` declarations, native `range` loops, no semicolons.

use statik_backend::{ContainerSystem, EmitError, Emitter, Feature, NameKind, NameMapper, Preferences, RuntimeAbi};
use statik_ir::ast::{BinaryOp, CompareOp, UnaryOp};
use statik_ir::{Name, StringInterner};
use statik_sir::{CallTarget, Const, SirArena, SirId, SirModule, SirNodeKind, SirRange};
use statik_types::TypeInterner;

use crate::container_system::GoContainerSystem;
use crate::name_mapper::GoNameMapper;
use crate::runtime_abi::GoRuntimeAbi;
use crate::types;

pub struct GoEmitter;

impl Emitter for GoEmitter {
    fn emit(&self, module: &SirModule, interner: &StringInterner, types: &TypeInterner, preferences: &Preferences) -> Result<String, EmitError> {
        let mapper = GoNameMapper { convention: preferences.naming_convention };
        let mut w = Writer {
            arena: &module.arena,
            interner,
            types,
            mapper: &mapper,
            abi: &GoRuntimeAbi,
            containers: &GoContainerSystem,
            out: String::new(),
            indent: 0,
        };
        w.writeln("package main");
        w.newline();
        w.writeln("import (\"fmt\"; \"math\"; \"strings\"; \"statik\")");
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
    mapper: &'a dyn NameMapper,
    abi: &'a GoRuntimeAbi,
    containers: &'a GoContainerSystem,
    out: String,
    indent: usize,
}

impl<'a> Writer<'a> {
    fn name(&self, name: Name, kind: NameKind) -> String {
        self.mapper.map_name(self.interner.lookup(name), kind)
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("\t");
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

    fn emit_class(&mut self, class: &statik_sir::ClassRecord) {
        let fields: Vec<String> = class.fields.iter().map(|(n, t)| format!("\t{} {}", self.name(*n, NameKind::Field), types::spell(*t, self.types))).collect();
        self.writeln(&format!("type {} struct {{", self.name(class.name, NameKind::Class)));
        for field in fields {
            self.writeln(&field);
        }
        self.writeln("}");
        self.newline();
    }

    fn emit_function(&mut self, module: &SirModule, name: Name, f: &statik_sir::SirFunction) -> Result<(), EmitError> {
        let ret = types::spell(f.return_type, self.types);
        let params: Vec<String> = f
            .params
            .iter()
            .map(|(n, t)| format!("{} {}", self.name(*n, NameKind::Parameter), types::spell(*t, self.types)))
            .collect();
        self.writeln(&format!("func {}({}) {} {{", self.name(name, NameKind::Function), params.join(", "), ret));
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
                self.writeln(&format!("{} := {}", self.name(target, NameKind::Variable), v));
            }
            SirNodeKind::If { condition, then_branch, else_branch } => {
                let c = self.emit_expr(module, condition)?;
                self.writeln(&format!("if {c} {{"));
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
                self.writeln(&format!("for {c} {{"));
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
                    self.writeln(&format!("for _, {var} := range {it} {{"));
                } else {
                    let start = start.map(|e| self.emit_expr(module, e)).transpose()?.unwrap_or_else(|| "0".to_string());
                    let stop = stop.map(|e| self.emit_expr(module, e)).transpose()?.unwrap_or_default();
                    let step = step.map(|e| self.emit_expr(module, e)).transpose()?.unwrap_or_else(|| "1".to_string());
                    self.writeln(&format!("for {var} := {start}; {var} < {stop}; {var} += {step} {{"));
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
                    self.writeln(&format!("return {v}"));
                }
                None => self.writeln("return"),
            },
            SirNodeKind::FunctionDef(_) => {
                return Err(EmitError::UnsupportedByBackend {
                    detail: "nested function definitions are not lowered by this target".to_string(),
                    span: self.arena.span_of(id),
                });
            }
            other => {
                let e = self.emit_expr_kind(module, id, &other)?;
                self.writeln(&e);
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
                    return Ok(format!("math.Pow({lhs}, {rhs})"));
                }
                Ok(format!("({} {} {})", lhs, go_binop(*op), rhs))
            }
            SirNodeKind::UnaryOp { op, operand } => {
                let operand = self.emit_expr(module, *operand)?;
                let sym = match op {
                    UnaryOp::Neg => "-",
                    UnaryOp::Not => "!",
                };
                Ok(format!("({sym}{operand})"))
            }
            SirNodeKind::Compare { op: CompareOp::In | CompareOp::NotIn, lhs, rhs } => {
                let lhs = self.emit_expr(module, *lhs)?;
                let rhs = self.emit_expr(module, *rhs)?;
                Ok(format!("statik.Contains({rhs}, {lhs})"))
            }
            SirNodeKind::Compare { op, lhs, rhs } => {
                let lhs = self.emit_expr(module, *lhs)?;
                let rhs = self.emit_expr(module, *rhs)?;
                Ok(format!("({} {} {})", lhs, go_compare(*op), rhs))
            }
            SirNodeKind::Call { target, args } => self.emit_call(module, *target, *args, id),
            SirNodeKind::MethodCall { receiver, target, args } => {
                let recv = self.emit_expr(module, *receiver)?;
                self.emit_method_call(module, &recv, *target, *args, id)
            }
            SirNodeKind::Index { receiver, index } => {
                let recv = self.emit_expr(module, *receiver)?;
                let idx = self.emit_expr(module, *index)?;
                Ok(format!("{recv}[{idx}]"))
            }
            SirNodeKind::SliceIndex { receiver, start, stop, .. } => {
                let recv = self.emit_expr(module, *receiver)?;
                let start = start.map(|e| self.emit_expr(module, e)).transpose()?.unwrap_or_default();
                let stop = stop.map(|e| self.emit_expr(module, e)).transpose()?.unwrap_or_default();
                Ok(format!("{recv}[{start}:{stop}]"))
            }
            SirNodeKind::Attr { receiver, field } => {
                let recv = self.emit_expr(module, *receiver)?;
                Ok(format!("{recv}.{}", self.name(*field, NameKind::Field)))
            }
            SirNodeKind::ContainerLit { kind, elements, values } => {
                let elems: Vec<String> = self.arena.children(*elements).to_vec().iter().map(|e| self.emit_expr(module, *e)).collect::<Result<_, _>>()?;
                let ty = self.containers.type_spelling(*kind, &["interface{}".to_string(), "interface{}".to_string()]);
                if !values.is_empty() {
                    let vals: Vec<String> = self.arena.children(*values).to_vec().iter().map(|e| self.emit_expr(module, *e)).collect::<Result<_, _>>()?;
                    let pairs: Vec<String> = elems.into_iter().zip(vals).map(|(k, v)| format!("{k}: {v}")).collect();
                    Ok(format!("{ty}{{{}}}", pairs.join(", ")))
                } else {
                    Ok(format!("{ty}{{{}}}", elems.join(", ")))
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
                    Some(_) => Ok(format!("statik.ListComprehensionWithFilter({iter})")),
                    None => Ok(format!("statik.Map({iter})")),
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
            Const::Str(name) => format!("{:?}", self.interner.lookup(*name)),
            Const::None => "nil".to_string(),
        }
    }

    fn emit_call(&mut self, module: &SirModule, target: CallTarget, args: SirRange, id: SirId) -> Result<String, EmitError> {
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

    fn emit_method_call(&mut self, module: &SirModule, recv: &str, target: CallTarget, args: SirRange, id: SirId) -> Result<String, EmitError> {
        let arg_exprs: Vec<String> = self.arena.children(args).to_vec().iter().map(|a| self.emit_expr(module, *a)).collect::<Result<_, _>>()?;
        match target {
            CallTarget::Builtin(op) => Ok(format!("{}({recv}, {})", self.abi.helper_symbol(op), arg_exprs.join(", "))),
            CallTarget::Container(op) => {
                let emitted_args: Vec<statik_backend::EmittedExpr> = arg_exprs.into_iter().map(statik_backend::EmittedExpr::new).collect();
                Ok(self.containers.build_expr(op, &statik_backend::EmittedExpr::new(recv.to_string()), &emitted_args).0)
            }
            CallTarget::User(name) => Ok(format!("{recv}.{}({})", self.name(name, NameKind::Function), arg_exprs.join(", "))),
        }
    }
}

const fn go_binop(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::FloorDiv => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Pow => unreachable!("handled by caller"),
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
    }
}

const fn go_compare(op: CompareOp) -> &'static str {
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
