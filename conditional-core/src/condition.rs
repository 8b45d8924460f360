//! Tri-state result of a single precondition check.

/// Result of evaluating one precondition header
/// ([RFC 7232 §3](https://tools.ietf.org/html/rfc7232#section-3)).
///
/// `Neutral` keeps "header absent or not applicable" apart from "header
/// present but evaluated to false".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Condition {
    /// The precondition is absent, empty, unparseable or does not apply.
    #[default]
    Neutral,
    /// The precondition holds.
    True,
    /// The precondition does not hold.
    False,
}

impl Condition {
    /// Returns `true` for [`Condition::Neutral`].
    pub fn is_neutral(self) -> bool {
        self == Condition::Neutral
    }

    /// Chains checks where the first non-neutral result wins.
    ///
    /// If `self` is `Neutral`, evaluates `f`; otherwise returns `self` without
    /// calling it.
    ///
    /// ```
    /// use conditional_core::Condition;
    ///
    /// assert_eq!(Condition::Neutral.or_else(|| Condition::False), Condition::False);
    /// assert_eq!(Condition::True.or_else(|| Condition::False), Condition::True);
    /// ```
    pub fn or_else<F>(self, f: F) -> Condition
    where
        F: FnOnce() -> Condition,
    {
        match self {
            Condition::Neutral => f(),
            decided => decided,
        }
    }
}

impl From<bool> for Condition {
    fn from(value: bool) -> Self {
        if value {
            Condition::True
        } else {
            Condition::False
        }
    }
}
