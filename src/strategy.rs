//! The strategy tag: a single-valued record of the most recently
//! invoked allocation entry.

/// One of the five allocation strategies.
///
/// Values outside `{1..=5}` are only reachable through [`StrategyTag::from_raw`]
/// and exist so [`strategy_name`] can demonstrate the "unknown" fallback the
/// reference implementation's `switch` default case produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyTag(u8);

impl StrategyTag {
    pub const FIRST: StrategyTag = StrategyTag(1);
    pub const NEXT: StrategyTag = StrategyTag(2);
    pub const BEST: StrategyTag = StrategyTag(3);
    pub const WORST: StrategyTag = StrategyTag(4);
    pub const BUDDY: StrategyTag = StrategyTag(5);

    /// Builds a tag from a raw value without validating it against the
    /// known enumeration.
    pub const fn from_raw(value: u8) -> Self {
        Self(value)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    /// `self` if it names one of the five known strategies, otherwise
    /// [`StrategyTag::FIRST`]. This is what the reference implementation's
    /// `allocator_current_strategy()` does with a never-set or corrupted
    /// tag, as opposed to [`strategy_name`]'s "unknown" fallback, which
    /// only applies to display.
    pub const fn or_first(self) -> Self {
        match self.0 {
            1..=5 => self,
            _ => Self::FIRST,
        }
    }
}

/// Maps a tag to its fixed lowercase name; anything outside `{1..=5}`
/// reads as `"unknown"`.
pub fn strategy_name(tag: StrategyTag) -> &'static str {
    match tag.0 {
        1 => "first-fit",
        2 => "next-fit",
        3 => "best-fit",
        4 => "worst-fit",
        5 => "buddy",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_the_fixed_enumeration() {
        assert_eq!(strategy_name(StrategyTag::FIRST), "first-fit");
        assert_eq!(strategy_name(StrategyTag::NEXT), "next-fit");
        assert_eq!(strategy_name(StrategyTag::BEST), "best-fit");
        assert_eq!(strategy_name(StrategyTag::WORST), "worst-fit");
        assert_eq!(strategy_name(StrategyTag::BUDDY), "buddy");
    }

    #[test]
    fn out_of_range_tag_is_unknown() {
        assert_eq!(strategy_name(StrategyTag::from_raw(0)), "unknown");
        assert_eq!(strategy_name(StrategyTag::from_raw(6)), "unknown");
        assert_eq!(strategy_name(StrategyTag::from_raw(255)), "unknown");
    }

    #[test]
    fn out_of_range_tag_defaults_to_first_via_or_first() {
        assert_eq!(StrategyTag::from_raw(0).or_first(), StrategyTag::FIRST);
        assert_eq!(StrategyTag::from_raw(6).or_first(), StrategyTag::FIRST);
        assert_eq!(StrategyTag::from_raw(255).or_first(), StrategyTag::FIRST);
        assert_eq!(StrategyTag::BUDDY.or_first(), StrategyTag::BUDDY);
    }
}
