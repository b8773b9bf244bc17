//! The typed preference record every target reads instead of a bare
//! `HashMap<String, String>` (spec.md §4.4). Grounded on
//! `ori_codegen::CodegenContext`'s typed-field-over-stringly-typed-config
//! style, generalized to a small enumerated schema validated once at
//! construction rather than probed ad hoc by each emitter.

use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum NamingConvention {
    SnakeCase,
    CamelCase,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum HashtableStrategy {
    /// The target language's own standard-library hash map/set.
    Stdlib,
    /// An explicit `Map`/`Set`-flavored type distinct from an array-backed
    /// collection (relevant for targets whose stdlib has more than one).
    Map,
}

/// One caller-supplied preference key was not part of the schema.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("unknown preference key `{0}`")]
pub struct UnknownPreferenceKey(pub String);

/// A validated preference set (spec.md §4.4). Every field defaults to the
/// conservative choice; [`Preferences::from_map`] is the only way to build
/// one from free-form input, so an unrecognized key is rejected once, here,
/// rather than silently ignored downstream by every emitter.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Preferences {
    pub naming_convention: NamingConvention,
    pub prefer_immutable: bool,
    pub use_pattern_matching: bool,
    pub hashtables: HashtableStrategy,
    pub prefer_idiomatic_syntax: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            naming_convention: NamingConvention::SnakeCase,
            prefer_immutable: true,
            use_pattern_matching: true,
            hashtables: HashtableStrategy::Stdlib,
            prefer_idiomatic_syntax: true,
        }
    }
}

impl Preferences {
    /// Builds a [`Preferences`] from a free-form `key = value` map (as a CLI
    /// driver or config file would hand in), rejecting any key outside the
    /// fixed schema rather than silently dropping it.
    pub fn from_map(entries: &FxHashMap<String, String>) -> Result<Self, UnknownPreferenceKey> {
        let mut prefs = Preferences::default();
        for (key, value) in entries {
            match key.as_str() {
                "naming_convention" => {
                    prefs.naming_convention = match value.as_str() {
                        "camelCase" => NamingConvention::CamelCase,
                        _ => NamingConvention::SnakeCase,
                    };
                }
                "prefer_immutable" => prefs.prefer_immutable = value == "true",
                "use_pattern_matching" => prefs.use_pattern_matching = value == "true",
                "hashtables" => {
                    prefs.hashtables = match value.as_str() {
                        "map" => HashtableStrategy::Map,
                        _ => HashtableStrategy::Stdlib,
                    };
                }
                "prefer_idiomatic_syntax" => prefs.prefer_idiomatic_syntax = value == "true",
                other => return Err(UnknownPreferenceKey(other.to_string())),
            }
        }
        Ok(prefs)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn unknown_key_is_rejected() {
        let mut entries = FxHashMap::default();
        entries.insert("bogus".to_string(), "x".to_string());
        assert_eq!(Preferences::from_map(&entries), Err(UnknownPreferenceKey("bogus".to_string())));
    }

    #[test]
    fn known_keys_override_defaults() {
        let mut entries = FxHashMap::default();
        entries.insert("naming_convention".to_string(), "camelCase".to_string());
        entries.insert("prefer_immutable".to_string(), "false".to_string());
        let prefs = Preferences::from_map(&entries).expect("valid preferences");
        assert_eq!(prefs.naming_convention, NamingConvention::CamelCase);
        assert!(!prefs.prefer_immutable);
        assert!(prefs.use_pattern_matching, "unspecified keys keep their default");
    }

    #[test]
    fn empty_map_is_all_defaults() {
        let prefs = Preferences::from_map(&FxHashMap::default()).expect("empty map is valid");
        assert_eq!(prefs, Preferences::default());
    }
}
