//! Identifier spelling for the functional target: the shared convention
//! renderer plus OCaml keyword escaping and the one ML-specific wrinkle —
//! class names are type/module-like and must start with an uppercase
//! letter, regardless of naming convention.

use statik_backend::{to_camel_case, to_snake_case, NameKind, NameMapper, NamingConvention};

const ML_KEYWORDS: &[&str] = &[
    "let", "rec", "and", "fun", "function", "match", "with", "if", "then", "else", "type", "module", "begin", "end",
    "in", "for", "while", "do", "done", "of", "mutable", "ref", "struct", "sig", "val", "open", "try", "raise",
];

pub struct MlNameMapper {
    pub convention: NamingConvention,
}

impl NameMapper for MlNameMapper {
    fn map_name(&self, source: &str, kind: NameKind) -> String {
        let mapped = match self.convention {
            NamingConvention::SnakeCase => to_snake_case(source),
            NamingConvention::CamelCase => to_camel_case(source),
        };
        let mapped = if ML_KEYWORDS.contains(&mapped.as_str()) { format!("{mapped}_") } else { mapped };
        if kind == NameKind::Class {
            capitalize(&mapped)
        } else {
            mapped
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn class_names_are_capitalized_regardless_of_convention() {
        let mapper = MlNameMapper { convention: NamingConvention::SnakeCase };
        assert_eq!(mapper.map_name("point", NameKind::Class), "Point");
    }

    #[test]
    fn keyword_collisions_are_escaped() {
        let mapper = MlNameMapper { convention: NamingConvention::SnakeCase };
        assert_eq!(mapper.map_name("match", NameKind::Variable), "match_");
    }

    #[test]
    fn ordinary_names_pass_through() {
        let mapper = MlNameMapper { convention: NamingConvention::SnakeCase };
        assert_eq!(mapper.map_name("count", NameKind::Variable), "count");
    }
}
