use statik_backend::{to_camel_case, to_snake_case, NameKind, NameMapper, NamingConvention};

const GO_KEYWORDS: &[&str] = &[
    "func", "package", "import", "var", "const", "type", "struct", "interface", "map", "chan", "go", "defer",
    "select", "range", "return", "if", "else", "for", "switch", "case", "break", "continue", "default", "fallthrough",
];

pub struct GoNameMapper {
    pub convention: NamingConvention,
}

impl NameMapper for GoNameMapper {
    fn map_name(&self, source: &str, kind: NameKind) -> String {
        if source == "main" && kind == NameKind::Function {
            return "main".to_string();
        }
        let mapped = match self.convention {
            NamingConvention::SnakeCase => to_snake_case(source),
            NamingConvention::CamelCase => to_camel_case(source),
        };
        if GO_KEYWORDS.contains(&mapped.as_str()) {
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
    fn main_is_never_renamed() {
        let mapper = GoNameMapper { convention: NamingConvention::CamelCase };
        assert_eq!(mapper.map_name("main", NameKind::Function), "main");
    }

    #[test]
    fn keyword_collisions_are_escaped() {
        let mapper = GoNameMapper { convention: NamingConvention::SnakeCase };
        assert_eq!(mapper.map_name("range", NameKind::Variable), "range_");
    }
}
