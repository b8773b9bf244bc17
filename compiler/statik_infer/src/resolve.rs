//! Resolves a parsed surface-syntax [`ParsedType`] into an interned
//! [`TypeId`]. Stage A calls this directly on every annotation; Stage B
//! never calls it (it only ever produces `TypeTerm`s by unification).

use statik_ir::ast::ParsedType;
use statik_ir::{Span, StringInterner};
use statik_types::{TypeId, TypeInterner, TypeTerm};

use crate::error::InferError;

pub fn resolve_parsed_type(
    ty: &ParsedType,
    span: Span,
    interner: &StringInterner,
    types: &mut TypeInterner,
) -> Result<TypeId, InferError> {
    match ty {
        ParsedType::Name(name) => resolve_bare_name(interner.lookup(*name), span, types),
        ParsedType::Generic(name, args) => resolve_generic(interner.lookup(*name), args, span, interner, types),
        ParsedType::Optional(inner) => {
            let inner_id = resolve_parsed_type(inner, span, interner, types)?;
            Ok(optional_of(inner_id, types))
        }
    }
}

fn resolve_bare_name(name: &str, span: Span, types: &mut TypeInterner) -> Result<TypeId, InferError> {
    Ok(match name {
        "int" => types.int(),
        "float" => types.float(),
        "bool" => types.bool(),
        "str" => types.str(),
        "None" | "NoneType" => types.none(),
        // Bare container names with no element type argument default to an
        // element type of `Unknown`, narrowed later if usage pins it down.
        "list" => types.intern(TypeTerm::List(types.unknown())),
        "set" => types.intern(TypeTerm::Set(types.unknown())),
        "dict" => types.intern(TypeTerm::Dict(types.unknown(), types.unknown())),
        "tuple" => types.intern(TypeTerm::Tuple(Vec::new())),
        _ => return Err(InferError::UnknownType { span }),
    })
}

fn resolve_generic(
    name: &str,
    args: &[ParsedType],
    span: Span,
    interner: &StringInterner,
    types: &mut TypeInterner,
) -> Result<TypeId, InferError> {
    match name {
        "list" => {
            let [elem] = require_arity(args, 1, "list", span)?;
            let elem_id = resolve_parsed_type(elem, span, interner, types)?;
            Ok(types.intern(TypeTerm::List(elem_id)))
        }
        "set" => {
            let [elem] = require_arity(args, 1, "set", span)?;
            let elem_id = resolve_parsed_type(elem, span, interner, types)?;
            Ok(types.intern(TypeTerm::Set(elem_id)))
        }
        "dict" => {
            if args.len() != 2 {
                return Err(InferError::GenericArityMismatch { name: "dict", expected: "2", found: args.len(), span });
            }
            let key_id = resolve_parsed_type(&args[0], span, interner, types)?;
            let value_id = resolve_parsed_type(&args[1], span, interner, types)?;
            Ok(types.intern(TypeTerm::Dict(key_id, value_id)))
        }
        "tuple" => {
            let mut ids = Vec::with_capacity(args.len());
            for arg in args {
                ids.push(resolve_parsed_type(arg, span, interner, types)?);
            }
            Ok(types.intern(TypeTerm::Tuple(ids)))
        }
        // The parser doesn't special-case `Optional[T]` into
        // `ParsedType::Optional` today, so it arrives here as a generic
        // named "Optional"; resolved identically either way.
        "Optional" => {
            let [inner] = require_arity(args, 1, "Optional", span)?;
            let inner_id = resolve_parsed_type(inner, span, interner, types)?;
            Ok(optional_of(inner_id, types))
        }
        _ => Err(InferError::UnknownType { span }),
    }
}

fn require_arity<'a>(
    args: &'a [ParsedType],
    expected: usize,
    name: &'static str,
    span: Span,
) -> Result<&'a [ParsedType; 1], InferError> {
    debug_assert_eq!(expected, 1, "only single-argument generics use this helper");
    args.try_into().map_err(|_| InferError::GenericArityMismatch {
        name,
        expected: "1",
        found: args.len(),
        span,
    })
}

fn optional_of(inner: TypeId, types: &mut TypeInterner) -> TypeId {
    let none_id = types.none();
    let (joined, _widened) = statik_types::unify(types, inner, none_id);
    joined
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use statik_ir::ast::ParsedType;

    #[test]
    fn resolves_primitive_names() {
        let mut interner = StringInterner::new();
        let mut types = TypeInterner::new();
        let name = interner.intern("int");
        let id = resolve_parsed_type(&ParsedType::Name(name), Span::DUMMY, &interner, &mut types).unwrap();
        assert_eq!(id, types.int());
    }

    #[test]
    fn resolves_optional_to_a_union_with_none() {
        let mut interner = StringInterner::new();
        let mut types = TypeInterner::new();
        let name = interner.intern("str");
        let id =
            resolve_parsed_type(&ParsedType::Optional(Box::new(ParsedType::Name(name))), Span::DUMMY, &interner, &mut types)
                .unwrap();
        match types.lookup(id) {
            TypeTerm::Union(members) => assert_eq!(members.len(), 2),
            other => panic!("expected a union, got {other:?}"),
        }
    }
}
