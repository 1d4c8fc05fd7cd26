//! Configuration for chapter comparison.

/// Tunable parameters for the comparison engine.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Characters of surrounding context to include in discrepancy snippets.
    pub context_window: usize,

    /// Minimum diff span length (max of the two sides) to report.
    ///
    /// Values below 1 are treated as 1: zero-length operations at block
    /// boundaries are alignment noise, never content.
    pub min_diff_len: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            context_window: 40,
            min_diff_len: 1,
        }
    }

    /// Set the snippet context window (characters on each side).
    pub fn with_context_window(mut self, chars: usize) -> Self {
        self.context_window = chars;
        self
    }

    /// Set the minimum reportable diff span length.
    pub fn with_min_diff_len(mut self, len: usize) -> Self {
        self.min_diff_len = len;
        self
    }

    /// Effective minimum diff length, clamped to at least 1.
    pub fn effective_min_diff_len(&self) -> usize {
        self.min_diff_len.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.context_window, 40);
        assert_eq!(config.min_diff_len, 1);
    }

    #[test]
    fn test_builder() {
        let config = AuditConfig::new()
            .with_context_window(60)
            .with_min_diff_len(2);
        assert_eq!(config.context_window, 60);
        assert_eq!(config.min_diff_len, 2);
    }

    #[test]
    fn test_min_diff_len_clamped() {
        let config = AuditConfig::new().with_min_diff_len(0);
        assert_eq!(config.effective_min_diff_len(), 1);
    }
}
