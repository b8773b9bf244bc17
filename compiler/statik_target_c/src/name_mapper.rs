//! Identifier spelling for the systems target: the shared convention
//! renderer plus C keyword escaping, grounded on
//! `ori_codegen::CodegenContext::mangle`'s `ori_`-prefix escape (this target
//! instead only prefixes the handful of names that collide with a C
//! keyword, since case-folding already avoids most collisions).

use statik_backend::{to_camel_case, to_snake_case, NameKind, NameMapper, NamingConvention};

const C_KEYWORDS: &[&str] = &[
    "int", "float", "double", "char", "void", "struct", "union", "return", "if", "else", "while", "for", "switch",
    "case", "break", "continue", "static", "const", "sizeof", "typedef", "goto", "default", "do", "extern",
];

pub struct CNameMapper {
    pub convention: NamingConvention,
}

impl NameMapper for CNameMapper {
    fn map_name(&self, source: &str, _kind: NameKind) -> String {
        let mapped = match self.convention {
            NamingConvention::SnakeCase => to_snake_case(source),
            NamingConvention::CamelCase => to_camel_case(source),
        };
        if C_KEYWORDS.contains(&mapped.as_str()) {
            format!("{mapped}_")
        } else {
            mapped
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn keyword_collisions_are_escaped() {
        let mapper = CNameMapper { convention: NamingConvention::SnakeCase };
        assert_eq!(mapper.map_name("while", NameKind::Variable), "while_");
    }

    #[test]
    fn ordinary_names_pass_through() {
        let mapper = CNameMapper { convention: NamingConvention::SnakeCase };
        assert_eq!(mapper.map_name("count", NameKind::Variable), "count");
    }
}
