//! Type spellings for the garbage-collected service target: Go's builtin
//! generic collection syntax, available directly (no generated
//! instantiation needed the way the manual-memory target requires).

use statik_types::{TypeId, TypeInterner, TypeTerm};

pub fn spell(type_id: TypeId, types: &TypeInterner) -> String {
    match types.lookup(type_id) {
        TypeTerm::Int => "int64".to_string(),
        TypeTerm::Float => "float64".to_string(),
        TypeTerm::Bool => "bool".to_string(),
        TypeTerm::Str => "string".to_string(),
        TypeTerm::NoneType => "struct{}".to_string(),
        TypeTerm::List(elem) => format!("[]{}", spell(*elem, types)),
        TypeTerm::Dict(key, value) => format!("map[{}]{}", spell(*key, types), spell(*value, types)),
        TypeTerm::Set(elem) => format!("map[{}]struct{{}}", spell(*elem, types)),
        TypeTerm::Tuple(items) => {
            let joined: Vec<String> = items.iter().map(|t| spell(*t, types)).collect();
            format!("struct {{ {} }}", joined.iter().enumerate().map(|(i, t)| format!("F{i} {t}")).collect::<Vec<_>>().join("; "))
        }
        TypeTerm::Union(_) | TypeTerm::Unknown => "interface{}".to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn list_of_int_is_a_go_slice() {
        let mut types = TypeInterner::new();
        let list_int = types.intern(TypeTerm::List(types.int()));
        assert_eq!(spell(list_int, &types), "[]int64");
    }

    #[test]
    fn dict_is_a_go_map() {
        let mut types = TypeInterner::new();
        let d = types.intern(TypeTerm::Dict(types.str(), types.int()));
        assert_eq!(spell(d, &types), "map[string]int64");
    }
}
