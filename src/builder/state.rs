//! Build state tracking.
//!
//! `BuildState` carries the options that affect the walk and guards the
//! recursion depth. Untrusted markup can nest arbitrarily deep, so the walk
//! fails with [`Error::DepthExceeded`] instead of exhausting the stack.

use crate::error::{Error, Result};
use crate::Options;

/// Per-document walk state.
#[derive(Debug, Clone)]
pub struct BuildState {
    depth: usize,
    max_depth: usize,
    inline_formatting: bool,
}

impl BuildState {
    /// Create state from extraction options.
    #[must_use]
    pub fn new(opts: &Options) -> Self {
        Self {
            depth: 0,
            max_depth: opts.max_tree_depth,
            inline_formatting: opts.inline_formatting,
        }
    }

    /// Enter one element level.
    pub fn descend(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::DepthExceeded(self.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave one element level.
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether paragraphs are built from styled runs.
    #[must_use]
    pub fn inline_formatting(&self) -> bool {
        self.inline_formatting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descend_until_limit() {
        let opts = Options {
            max_tree_depth: 2,
            ..Options::default()
        };
        let mut state = BuildState::new(&opts);

        assert!(state.descend().is_ok());
        assert!(state.descend().is_ok());
        assert!(matches!(state.descend(), Err(Error::DepthExceeded(2))));

        state.ascend();
        assert_eq!(state.depth(), 1);
        assert!(state.descend().is_ok());
    }

    #[test]
    fn test_ascend_saturates() {
        let mut state = BuildState::new(&Options::default());
        state.ascend();
        assert_eq!(state.depth(), 0);
        assert!(!state.inline_formatting());
    }
}
