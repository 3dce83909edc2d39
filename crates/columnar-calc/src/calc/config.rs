//! Settings of the arithmetic operators that come from the session rather than the call.
use super::QueryContext;
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// What happens to a row whose result overflows or divides by zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// The row becomes nil and the operation continues.
    #[default]
    Nil,
    /// The operation fails with the first such row.
    Abort,
}

impl ErrorMode {
    /// Returns true if a faulty row fails the operation.
    #[must_use]
    pub fn aborts(self) -> bool {
        self == Self::Abort
    }
}

impl From<bool> for ErrorMode {
    /// `true` means abort on error.
    fn from(abort_on_error: bool) -> Self {
        if abort_on_error {
            Self::Abort
        } else {
            Self::Nil
        }
    }
}

/// Session settings of the arithmetic operators.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArithmeticConfig {
    /// Handling of overflow and division by zero
    pub error_mode: ErrorMode,
    /// Query timeout in milliseconds. `None` means no timeout
    pub query_timeout_ms: Option<u64>,
}

impl ArithmeticConfig {
    /// The query timeout, if any.
    #[must_use]
    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_ms.map(Duration::from_millis)
    }

    /// Starts a query under these settings.
    #[must_use]
    pub fn start_query(&self) -> QueryContext {
        QueryContext::start(self.query_timeout())
    }
}
