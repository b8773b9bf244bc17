/// A confidence score in `[0, 1]`, clamped on every construction and
/// combination. Stage A assigns `1.0` to annotation-derived signatures;
/// Stage B's dataflow pass multiplies by `0.9` per implicit numeric
/// coercion it has to make to unify two branches (spec.md §4.2).
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct Confidence(f64);

impl Confidence {
    pub const CERTAIN: Confidence = Confidence(1.0);
    /// Per-coercion penalty applied when unification widens e.g. `Int` to
    /// `Float` rather than matching a term to itself exactly.
    pub const COERCION_PENALTY: f64 = 0.9;

    pub fn new(value: f64) -> Self {
        Confidence(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Combines two confidences feeding the same join point by taking the
    /// lesser of the two, scaled by the coercion penalty if the join
    /// widened either side's term (see [`crate::unify::unify`]).
    pub fn combine(self, other: Confidence, widened: bool) -> Confidence {
        let base = self.0.min(other.0);
        Confidence::new(if widened { base * Self::COERCION_PENALTY } else { base })
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Confidence::CERTAIN
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(Confidence::new(1.5).value(), 1.0);
        assert_eq!(Confidence::new(-0.2).value(), 0.0);
    }

    #[test]
    fn widened_combination_applies_penalty() {
        let a = Confidence::CERTAIN;
        let b = Confidence::CERTAIN;
        let combined = a.combine(b, true);
        assert!((combined.value() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn unwidened_combination_takes_the_minimum() {
        let a = Confidence::new(0.9);
        let b = Confidence::CERTAIN;
        let combined = a.combine(b, false);
        assert!((combined.value() - 0.9).abs() < 1e-9);
    }
}
