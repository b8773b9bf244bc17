//! Identifier spelling for the scalar low-level-IR target. Function names
//! become `@`-prefixed globals and locals become numbered SSA registers
//! ([`crate::lower`] allocates those directly), so this mapper only ever
//! has to spell a *function* name — grounded on `ori_llvm`'s codegen, which
//! likewise mangles nothing beyond the source function name itself.

use statik_backend::{to_snake_case, NameKind, NameMapper, NamingConvention};

pub struct LowIrNameMapper {
    pub convention: NamingConvention,
}

impl NameMapper for LowIrNameMapper {
    fn map_name(&self, source: &str, kind: NameKind) -> String {
        match (self.convention, kind) {
            (NamingConvention::SnakeCase, _) => to_snake_case(source),
            (NamingConvention::CamelCase, _) => statik_backend::to_camel_case(source),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn function_names_follow_the_chosen_convention() {
        let mapper = LowIrNameMapper { convention: NamingConvention::SnakeCase };
        assert_eq!(mapper.map_name("computeTotal", NameKind::Function), "compute_total");
    }
}
