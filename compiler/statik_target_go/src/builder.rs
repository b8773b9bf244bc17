//! Build-artifact generation for the service target: a makefile invoking
//! the Go toolchain, following the same symbolic-toolchain-variable shape
//! as `statik_target_c::builder` and `statik_lowir::builder`
//! (`original_source/tests/test_backend_llvm_basic.py::TestLLVMBuilder`),
//! substituting `GO` for `CC`/`LLC`.

use statik_backend::Builder;

pub struct GoBuilder;

impl Builder for GoBuilder {
    fn generate_build_file(&self, artifacts: &[&str], program_name: &str) -> String {
        let sources = artifacts.join(" ");
        format!(
            "GO ?= go\nGOFLAGS ?= -trimpath\n\n.PHONY: all clean\n\nall: {program_name}\n\n{program_name}: {sources}\n\t$(GO) build $(GOFLAGS) -o {program_name} {sources}\n\nclean:\n\trm -f {program_name}\n"
        )
    }

    fn get_compile_flags(&self) -> Vec<String> {
        vec!["-trimpath".to_string()]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn build_file_references_only_produced_artifacts() {
        let builder = GoBuilder;
        let makefile = builder.generate_build_file(&["main.go"], "main");
        assert!(makefile.contains("main.go"));
        assert!(makefile.contains(".PHONY"));
        assert!(makefile.contains("$(GO)"));
    }
}
