//! Build-artifact generation for the functional target: a makefile invoking
//! an OCaml-family toolchain, following the same symbolic-toolchain-variable
//! shape as `statik_target_c::builder`/`statik_target_go::builder`.

use statik_backend::Builder;

pub struct MlBuilder;

impl Builder for MlBuilder {
    fn generate_build_file(&self, artifacts: &[&str], program_name: &str) -> String {
        let sources = artifacts.join(" ");
        format!(
            "OCAMLFIND ?= ocamlfind\nOCAMLFLAGS ?= -package str\n\n.PHONY: all clean\n\nall: {program_name}\n\n{program_name}: {sources}\n\t$(OCAMLFIND) ocamlopt $(OCAMLFLAGS) -linkpkg -o {program_name} {sources}\n\nclean:\n\trm -f {program_name} *.cmi *.cmx *.o\n"
        )
    }

    fn get_compile_flags(&self) -> Vec<String> {
        vec!["-package".to_string(), "str".to_string()]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn build_file_references_only_produced_artifacts() {
        let builder = MlBuilder;
        let makefile = builder.generate_build_file(&["main.ml"], "main");
        assert!(makefile.contains("main.ml"));
        assert!(makefile.contains(".PHONY"));
        assert!(makefile.contains("$(OCAMLFIND)"));
    }
}
