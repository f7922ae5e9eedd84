//! Parse limits.
//!
//! Recursion depth during parsing is bounded by the nesting depth of the
//! input, so a pathologically deep document could exhaust the stack. The
//! parser fails with `NestingTooDeep` beyond the configured limit instead.

/// Default maximum container nesting depth.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth for arrays/objects.
    pub max_nesting_depth: usize,
}

impl Limits {
    /// Limits with the given maximum nesting depth.
    pub const fn with_max_depth(max_nesting_depth: usize) -> Self {
        Self { max_nesting_depth }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        assert_eq!(
            Limits::default().max_nesting_depth,
            DEFAULT_MAX_NESTING_DEPTH
        );
    }

    #[test]
    fn test_with_max_depth() {
        assert_eq!(Limits::with_max_depth(4).max_nesting_depth, 4);
    }
}
