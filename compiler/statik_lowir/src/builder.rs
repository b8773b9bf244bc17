//! Build-artifact generation for the low-level IR target: a makefile
//! driving `llc`/`clang` over the emitted `.ll`-flavored text, grounded on
//! `original_source/tests/test_backend_llvm_basic.py::TestLLVMBuilder`'s
//! exact assertions (symbolic `LLC`/`CLANG` toolchain variables, the
//! produced artifact and program name appearing in the recipe, and a
//! `.PHONY` target).

use statik_backend::Builder;

pub struct LowIrBuilder;

impl Builder for LowIrBuilder {
    fn generate_build_file(&self, artifacts: &[&str], program_name: &str) -> String {
        let objects: Vec<String> = artifacts.iter().map(|a| format!("{a}.o")).collect();
        let ir_to_obj: String = artifacts
            .iter()
            .zip(&objects)
            .map(|(ir, obj)| format!("{obj}: {ir}\n\t$(LLC) $(LLCFLAGS) -o {obj} {ir}\n\n"))
            .collect();
        format!(
            "LLC ?= llc\nLLCFLAGS ?= -filetype=obj\nCLANG ?= clang\n\n.PHONY: all clean\n\nall: {program_name}\n\n{ir_to_obj}{program_name}: {objs}\n\t$(CLANG) -o {program_name} {objs}\n\nclean:\n\trm -f {program_name} {objs}\n",
            objs = objects.join(" "),
        )
    }

    fn get_compile_flags(&self) -> Vec<String> {
        vec!["-filetype=obj".to_string()]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn build_file_names_the_toolchain_and_produced_artifacts() {
        let builder = LowIrBuilder;
        let makefile = builder.generate_build_file(&["test.ll"], "test_program");
        assert!(makefile.contains("LLC"));
        assert!(makefile.contains("CLANG"));
        assert!(makefile.contains("test_program"));
        assert!(makefile.contains("test.ll"));
        assert!(makefile.contains(".PHONY"));
    }

    #[test]
    fn compile_flags_select_object_output() {
        let builder = LowIrBuilder;
        assert!(builder.get_compile_flags().contains(&"-filetype=obj".to_string()));
    }
}
