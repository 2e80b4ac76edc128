//! Stable ID newtypes for supply-chain entities.
//!
//! All numeric IDs are distinct newtype wrappers over `u64`, providing type
//! safety so that a `MaterialId` cannot be accidentally used where a
//! `TradeId` is expected. [`Address`] wraps the on-chain account string that
//! scopes every registry lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Material identifier, unique across the whole platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u64);

/// Processing operation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(pub u64);

/// Trade identifier, scoped to a supplier address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeId(pub u64);

/// Line identifier, scoped to its parent trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId(pub u64);

/// Product category identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub u64);

/// Actor scope for registry and trade lookups.
///
/// An on-chain account address identifying the supplier/owner under which
/// operations and trades are indexed. Lookups are never global: every query
/// carries an `Address`. Display prints the inner string verbatim, which the
/// graph layer relies on when formatting trade resource ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    /// Creates an address from anything string-like.
    pub fn new(addr: impl Into<String>) -> Self {
        Address(addr.into())
    }

    /// Borrows the inner address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Address {
    fn from(addr: &str) -> Self {
        Address(addr.to_string())
    }
}

// Display implementations -- just print the inner value.

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
