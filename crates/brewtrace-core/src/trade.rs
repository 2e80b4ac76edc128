//! Trades and their line items.
//!
//! The platform records two trade variants sharing one shape: a *basic*
//! trade (a plain transfer of goods) and an *order* trade (adds deadlines,
//! an arbiter, an escrow address and a negotiation status). [`Trade`] models
//! the pair as a tagged union; the variant tag comes from the on-chain type
//! code and dispatch is a pattern match, never downcasting.
//!
//! Line items bind a quantity of a product category to an optional material.
//! The material binding is what the provenance layer searches on; a line
//! without a binding never matches any lookup. Lines are mutable only until
//! the trade is finalized, and that finalization is enforced by the external
//! contracts -- this crate treats every fetched trade as a point-in-time
//! snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::{Address, LineId, MaterialId, TradeId};
use crate::material::{Material, ProductCategory};

/// Wire codes for the two trade variants.
const TRADE_TYPE_BASIC: u8 = 0;
const TRADE_TYPE_ORDER: u8 = 1;

/// The trade variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    /// Plain transfer of goods.
    Basic,
    /// Negotiated order with escrow and deadlines.
    Order,
}

impl TradeType {
    /// Parses the on-chain type code.
    ///
    /// Any code outside the known set is [`CoreError::InvalidTradeType`];
    /// callers abort the surrounding lookup rather than guessing.
    pub fn from_code(code: u8) -> Result<Self, CoreError> {
        match code {
            TRADE_TYPE_BASIC => Ok(TradeType::Basic),
            TRADE_TYPE_ORDER => Ok(TradeType::Order),
            _ => Err(CoreError::InvalidTradeType { code }),
        }
    }

    /// The wire code for this variant.
    pub fn code(&self) -> u8 {
        match self {
            TradeType::Basic => TRADE_TYPE_BASIC,
            TradeType::Order => TRADE_TYPE_ORDER,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Basic => write!(f, "basic"),
            TradeType::Order => write!(f, "order"),
        }
    }
}

/// Negotiation state of an order trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegotiationStatus {
    /// Order created, counterparty has not responded.
    Initialized,
    /// Counterparty edits pending.
    Pending,
    /// Both sides signed; lines are frozen.
    Completed,
    /// Deadline passed without agreement.
    Expired,
}

/// Price attached to an order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePrice {
    /// Amount in the given fiat currency.
    pub amount: f64,
    /// ISO currency code.
    pub fiat: String,
}

/// A single line item within a trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Line identifier, scoped to the parent trade.
    pub id: LineId,
    /// The material this line moves. Unset until the supplier assigns one.
    pub material: Option<Material>,
    /// Product category the line was negotiated against.
    pub category: ProductCategory,
    /// Quantity in `unit`.
    pub quantity: f64,
    /// Measurement unit (e.g. "kg", "bags").
    pub unit: String,
    /// Price, populated only on order-trade lines.
    pub price: Option<LinePrice>,
}

impl Line {
    /// Creates an unpriced line (basic-trade shape).
    pub fn new(
        id: LineId,
        material: Option<Material>,
        category: ProductCategory,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        Line {
            id,
            material,
            category,
            quantity,
            unit: unit.into(),
            price: None,
        }
    }

    /// Attaches a price, producing the order-line shape.
    pub fn with_price(mut self, amount: f64, fiat: impl Into<String>) -> Self {
        self.price = Some(LinePrice {
            amount,
            fiat: fiat.into(),
        });
        self
    }

    /// True when this line's bound material equals `material`.
    ///
    /// Unbound lines match nothing.
    pub fn matches_material(&self, material: MaterialId) -> bool {
        self.material.as_ref().map(|m| m.id) == Some(material)
    }
}

/// Fields shared by both trade variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeInfo {
    /// Trade identifier, scoped to the supplier address.
    pub id: TradeId,
    /// The organization that sold the goods.
    pub supplier: Address,
    /// The organization that bought the goods.
    pub customer: Address,
    /// The organization that brokered the trade, if distinct.
    pub commissioner: Address,
    /// External metadata reference (document store pointer).
    pub external_url: String,
}

/// A plain transfer of goods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicTrade {
    /// Shared trade fields.
    pub info: TradeInfo,
    /// Line items, in recorded order.
    pub lines: Vec<Line>,
}

/// A negotiated order with escrow and deadlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTrade {
    /// Shared trade fields.
    pub info: TradeInfo,
    /// Line items, in recorded order.
    pub lines: Vec<Line>,
    /// Payment deadline, unix seconds.
    pub payment_deadline: u64,
    /// Shipping deadline, unix seconds.
    pub shipping_deadline: u64,
    /// Dispute arbiter.
    pub arbiter: Address,
    /// Escrow contract holding the locked funds.
    pub escrow: Address,
    /// Negotiation state.
    pub status: NegotiationStatus,
}

/// A trade record, basic or order.
///
/// The two variants expose one capability surface: shared fields via
/// [`Trade::info`], lines via [`Trade::lines`] and [`Trade::line`]. Code
/// that needs variant-specific fields pattern-matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Trade {
    /// Plain transfer.
    Basic(BasicTrade),
    /// Negotiated order.
    Order(OrderTrade),
}

impl Trade {
    /// The shared trade fields.
    pub fn info(&self) -> &TradeInfo {
        match self {
            Trade::Basic(t) => &t.info,
            Trade::Order(t) => &t.info,
        }
    }

    /// All line items of the trade.
    pub fn lines(&self) -> &[Line] {
        match self {
            Trade::Basic(t) => &t.lines,
            Trade::Order(t) => &t.lines,
        }
    }

    /// Looks up a single line by id.
    pub fn line(&self, id: LineId) -> Result<&Line, CoreError> {
        self.lines()
            .iter()
            .find(|l| l.id == id)
            .ok_or(CoreError::LineNotFound {
                trade: self.id(),
                line: id,
            })
    }

    /// The variant tag.
    pub fn trade_type(&self) -> TradeType {
        match self {
            Trade::Basic(_) => TradeType::Basic,
            Trade::Order(_) => TradeType::Order,
        }
    }

    /// Trade identifier.
    pub fn id(&self) -> TradeId {
        self.info().id
    }

    /// The selling organization.
    pub fn supplier(&self) -> &Address {
        &self.info().supplier
    }

    /// Formats the platform-wide resource identifier for this trade,
    /// `"{supplier}_trade_{id}"`.
    pub fn resource_id(&self) -> String {
        format!("{}_trade_{}", self.info().supplier, self.info().id)
    }
}
