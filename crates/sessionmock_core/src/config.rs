//! Transaction ledger configuration.

/// Configuration for a transaction ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Whether beginning a transaction requires the previous one to be
    /// disposed.
    pub ensure_previous_transaction_is_closed: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            ensure_previous_transaction_is_closed: true,
        }
    }
}

impl LedgerConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the previous transaction must be disposed before the
    /// next one begins.
    #[must_use]
    pub const fn ensure_previous_transaction_is_closed(mut self, value: bool) -> Self {
        self.ensure_previous_transaction_is_closed = value;
        self
    }
}
