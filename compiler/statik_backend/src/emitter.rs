use statik_ir::StringInterner;
use statik_sir::SirModule;
use statik_types::TypeInterner;

use crate::emit_error::EmitError;
use crate::preferences::Preferences;

/// Lowers a fully-built SIR module to one target's surface source text.
/// Never mutates `module` (spec.md §5: "emitters borrow, never mutate") and
/// is byte-stable for a given `(SIR, preferences, target version)`. Takes
/// the string/type interners alongside the module rather than baking a
/// reference to either into the emitter itself, mirroring
/// `ori_codegen::CodegenContext::new`'s `(interner, type_interner, ...)`
/// argument order one layer further from the type-checker.
pub trait Emitter {
    fn emit(&self, module: &SirModule, interner: &StringInterner, types: &TypeInterner, preferences: &Preferences) -> Result<String, EmitError>;
}
