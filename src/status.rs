//! Order Statuses
//!
//! Statuses are plain tokens drawn from a set configured per deployment.
//! Which changes between them are allowed is decided by a
//! [`TransitionPolicy`].

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Statuses used when a deployment does not configure its own.
pub const DEFAULT_STATUSES: [&str; 4] = ["PENDING", "PAID", "DELIVERED", "CANCELLED"];

/// Order status token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    /// Creates a status token. No membership check is performed.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the status, returning the token.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Errors raised while building or querying a status set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    /// No statuses were configured.
    #[error("at least one order status must be configured")]
    Empty,

    /// A configured status was blank.
    #[error("order statuses cannot be blank")]
    Blank,

    /// A status was configured twice.
    #[error("order status {0} is configured more than once")]
    Duplicate(String),

    /// A status is not part of the configured set.
    #[error("unknown order status {token}, valid statuses are {allowed}")]
    Unknown {
        /// Rejected token
        token: String,

        /// Comma separated list of valid statuses
        allowed: String,
    },
}

/// The configured set of order statuses.
///
/// The first status is the one new orders start in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatuses {
    statuses: Vec<OrderStatus>,
}

impl OrderStatuses {
    /// Builds a status set from tokens. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// - [`StatusError::Empty`]: no tokens were given.
    /// - [`StatusError::Blank`]: a token is empty after trimming.
    /// - [`StatusError::Duplicate`]: a token appears twice.
    pub fn new<I, S>(tokens: I) -> Result<Self, StatusError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut statuses: Vec<OrderStatus> = Vec::new();

        for token in tokens {
            let token = token.as_ref().trim();

            if token.is_empty() {
                return Err(StatusError::Blank);
            }

            if statuses.iter().any(|status| status.as_str() == token) {
                return Err(StatusError::Duplicate(token.to_string()));
            }

            statuses.push(OrderStatus::new(token));
        }

        if statuses.is_empty() {
            return Err(StatusError::Empty);
        }

        Ok(Self { statuses })
    }

    /// Status assigned to newly created orders.
    #[expect(
        clippy::indexing_slicing,
        reason = "construction guarantees at least one status"
    )]
    pub fn initial(&self) -> &OrderStatus {
        &self.statuses[0]
    }

    /// Returns `true` when `status` belongs to the set.
    pub fn contains(&self, status: &OrderStatus) -> bool {
        self.statuses.contains(status)
    }

    /// Resolves a token against the set.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::Unknown`] when the token is not configured.
    pub fn parse(&self, token: &str) -> Result<OrderStatus, StatusError> {
        self.statuses
            .iter()
            .find(|status| status.as_str() == token)
            .cloned()
            .ok_or_else(|| StatusError::Unknown {
                token: token.to_string(),
                allowed: self.to_string(),
            })
    }

    /// Iterates the configured statuses in order.
    pub fn iter(&self) -> impl Iterator<Item = &OrderStatus> {
        self.statuses.iter()
    }
}

impl Default for OrderStatuses {
    fn default() -> Self {
        Self {
            statuses: DEFAULT_STATUSES.into_iter().map(OrderStatus::from).collect(),
        }
    }
}

impl Display for OrderStatuses {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let tokens: Vec<&str> = self.statuses.iter().map(OrderStatus::as_str).collect();

        f.write_str(&tokens.join(", "))
    }
}

/// Decides whether an order may move from one status to another.
///
/// Re-applying the current status never reaches the policy.
pub trait TransitionPolicy: Debug + Send + Sync {
    /// Returns `true` when moving from `from` to `to` is allowed.
    fn permits(&self, from: &OrderStatus, to: &OrderStatus) -> bool;
}

/// Allows every transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyTransition;

impl TransitionPolicy for AnyTransition {
    fn permits(&self, _from: &OrderStatus, _to: &OrderStatus) -> bool {
        true
    }
}

/// Forbids leaving any of the listed statuses.
#[derive(Debug, Clone, Default)]
pub struct TerminalStatuses {
    terminal: Vec<OrderStatus>,
}

impl TerminalStatuses {
    /// Creates a policy with the given terminal statuses.
    pub fn new(terminal: impl IntoIterator<Item = OrderStatus>) -> Self {
        Self {
            terminal: terminal.into_iter().collect(),
        }
    }

    /// Returns `true` when no status is terminal.
    pub fn is_empty(&self) -> bool {
        self.terminal.is_empty()
    }
}

impl TransitionPolicy for TerminalStatuses {
    fn permits(&self, from: &OrderStatus, _to: &OrderStatus) -> bool {
        !self.terminal.contains(from)
    }
}
