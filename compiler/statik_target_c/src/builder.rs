//! Build-artifact generation for the systems target: a makefile invoking
//! the host C compiler, grounded on the same
//! `original_source/tests/test_backend_llvm_basic.py::TestLLVMBuilder`
//! shape `statik_lowir::builder` implements (symbolic toolchain variable +
//! produced artifacts + `.PHONY`), substituting `CC` for `LLC`/`CLANG`.

use statik_backend::Builder;

pub struct CBuilder;

impl Builder for CBuilder {
    fn generate_build_file(&self, artifacts: &[&str], program_name: &str) -> String {
        let sources = artifacts.join(" ");
        format!(
            "CC ?= cc\nCFLAGS ?= -std=c11 -O2\n\n.PHONY: all clean\n\nall: {program_name}\n\n{program_name}: {sources}\n\t$(CC) $(CFLAGS) -o {program_name} {sources}\n\nclean:\n\trm -f {program_name}\n"
        )
    }

    fn get_compile_flags(&self) -> Vec<String> {
        vec!["-std=c11".to_string(), "-O2".to_string()]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn build_file_references_only_produced_artifacts() {
        let builder = CBuilder;
        let makefile = builder.generate_build_file(&["main.c"], "main");
        assert!(makefile.contains("main.c"));
        assert!(makefile.contains(".PHONY"));
        assert!(makefile.contains("$(CC)"));
    }
}
