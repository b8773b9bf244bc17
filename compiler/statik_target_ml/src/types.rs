//! Type spellings for the functional target. Compound containers spell
//! directly into ML-family built-in type constructors (`'a list`, a tuple
//! type) or a generated module name when the `hashtables` preference picks
//! a persistent map over the stdlib's mutable `Hashtbl`, grounded on the
//! same per-type match that `statik_target_c::types`/`statik_target_go::types`
//! use, one level more polymorphic since ML has real generics.

use statik_backend::{HashtableStrategy, Preferences};
use statik_types::{TypeId, TypeInterner, TypeTerm};

pub fn spell(type_id: TypeId, types: &TypeInterner, preferences: &Preferences) -> String {
    match types.lookup(type_id) {
        TypeTerm::Int => "int".to_string(),
        TypeTerm::Float => "float".to_string(),
        TypeTerm::Bool => "bool".to_string(),
        TypeTerm::Str => "string".to_string(),
        TypeTerm::NoneType => "unit".to_string(),
        TypeTerm::List(elem) => format!("{} list", parenthesize(spell(*elem, types, preferences))),
        TypeTerm::Set(elem) => format!("{} StatikSet.t", parenthesize(spell(*elem, types, preferences))),
        TypeTerm::Dict(key, value) => {
            let k = spell(*key, types, preferences);
            let v = spell(*value, types, preferences);
            match preferences.hashtables {
                HashtableStrategy::Stdlib => format!("({k}, {v}) Hashtbl.t"),
                HashtableStrategy::Map => format!("{v} StatikMap.t"),
            }
        }
        TypeTerm::Tuple(items) => {
            if items.is_empty() {
                "unit".to_string()
            } else {
                items.iter().map(|t| parenthesize(spell(*t, types, preferences))).collect::<Vec<_>>().join(" * ")
            }
        }
        // `Obj.t`: OCaml's own escape hatch for "a value whose static type
        // this program doesn't track" — the idiomatic ML spelling of
        // `Unknown`/`Union`, not a fabricated placeholder.
        TypeTerm::Union(_) | TypeTerm::Unknown => "Obj.t".to_string(),
    }
}

fn parenthesize(spelling: String) -> String {
    if spelling.contains(' ') && !spelling.ends_with("list") && !spelling.ends_with(".t") {
        format!("({spelling})")
    } else {
        spelling
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn list_of_int_is_an_ml_list() {
        let mut types = TypeInterner::new();
        let list_int = types.intern(TypeTerm::List(types.int()));
        assert_eq!(spell(list_int, &types, &Preferences::default()), "int list");
    }

    #[test]
    fn dict_follows_the_hashtables_preference() {
        let mut types = TypeInterner::new();
        let d = types.intern(TypeTerm::Dict(types.str(), types.int()));
        let mut prefs = Preferences::default();
        prefs.hashtables = HashtableStrategy::Stdlib;
        assert_eq!(spell(d, &types, &prefs), "(string, int) Hashtbl.t");
        prefs.hashtables = HashtableStrategy::Map;
        assert_eq!(spell(d, &types, &prefs), "int StatikMap.t");
    }
}
