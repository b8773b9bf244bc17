//! Type spellings for the systems target: fixed-width integers and an
//! explicit pointer for every reference-counted-by-convention container,
//! grounded on `ori_codegen::c::types`'s "every Ori type maps to one C
//! spelling" table.

use statik_types::{TypeId, TypeInterner, TypeTerm};

pub fn spell(type_id: TypeId, types: &TypeInterner) -> String {
    match types.lookup(type_id) {
        TypeTerm::Int => "int64_t".to_string(),
        TypeTerm::Float => "double".to_string(),
        TypeTerm::Bool => "bool".to_string(),
        TypeTerm::Str => "statik_str_t".to_string(),
        TypeTerm::NoneType => "void".to_string(),
        TypeTerm::List(elem) => format!("statik_list_{}_t", mangled(*elem, types)),
        TypeTerm::Dict(key, value) => format!("statik_dict_{}_{}_t", mangled(*key, types), mangled(*value, types)),
        TypeTerm::Set(elem) => format!("statik_set_{}_t", mangled(*elem, types)),
        TypeTerm::Tuple(items) => {
            let joined: Vec<_> = items.iter().map(|t| mangled(*t, types)).collect();
            format!("statik_tuple_{}_t", joined.join("_"))
        }
        TypeTerm::Union(_) | TypeTerm::Unknown => "void*".to_string(),
    }
}

/// An identifier-safe spelling for a type, used to build generated
/// container-instantiation type names (C has no generics to key off).
fn mangled(type_id: TypeId, types: &TypeInterner) -> String {
    spell(type_id, types).replace(['*', ' '], "_")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn scalars_map_to_fixed_width_c_types() {
        let mut types = TypeInterner::new();
        assert_eq!(spell(types.int(), &types), "int64_t");
        assert_eq!(spell(types.float(), &types), "double");
        assert_eq!(spell(types.bool(), &types), "bool");
    }

    #[test]
    fn list_of_int_names_a_generated_container_type() {
        let mut types = TypeInterner::new();
        let list_int = types.intern(TypeTerm::List(types.int()));
        assert_eq!(spell(list_int, &types), "statik_list_int64_t_t");
    }
}
