//! Trade lookup index: which of a supplier's trades moved a given material.
//!
//! [`find_trades_by_material`] walks a supplier's trade registry and returns
//! every trade with at least one line bound to the queried material, paired
//! with exactly those matching lines. Trades with zero matches are omitted
//! entirely, never returned with an empty line list.
//!
//! Result order follows the registry's trade-id enumeration order, which is
//! insertion order -- not guaranteed chronological across suppliers.

use brewtrace_core::{Address, Line, MaterialId, Trade, TradeType};
use brewtrace_ledger::{LedgerError, TradeLedger};

use crate::error::ResolveError;

/// One trade that carried the queried material, with the lines that bind it.
#[derive(Debug, Clone)]
pub struct TradeMatch {
    /// The full trade record.
    pub trade: Trade,
    /// Only the lines whose bound material matched the query.
    pub lines: Vec<Line>,
}

/// Finds every trade under `supplier` whose lines reference `material`.
///
/// Per trade: the stored type code is parsed first -- a code outside the
/// known variant set aborts the whole lookup. The full trade record is
/// fetched through the variant-specific accessor, and only for trades that
/// matched. Accessor failures propagate unchanged; this function performs no
/// retries.
pub async fn find_trades_by_material(
    ledger: &dyn TradeLedger,
    supplier: &Address,
    material: MaterialId,
) -> Result<Vec<TradeMatch>, ResolveError> {
    let mut matches = Vec::new();

    for trade_id in ledger.trade_ids(supplier).await? {
        let code = ledger.trade_type_code(supplier, trade_id).await?;
        let kind = TradeType::from_code(code).map_err(LedgerError::from)?;

        let lines: Vec<Line> = ledger
            .trade_lines(supplier, trade_id)
            .await?
            .into_iter()
            .filter(|line| line.matches_material(material))
            .collect();
        if lines.is_empty() {
            continue;
        }

        let trade = match kind {
            TradeType::Basic => Trade::Basic(ledger.basic_trade(supplier, trade_id).await?),
            TradeType::Order => Trade::Order(ledger.order_trade(supplier, trade_id).await?),
        };
        matches.push(TradeMatch { trade, lines });
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewtrace_core::{
        BasicTrade, CategoryId, LineId, Material, NegotiationStatus, OrderTrade, ProductCategory,
        TradeId, TradeInfo,
    };
    use brewtrace_ledger::InMemoryLedger;

    fn category() -> ProductCategory {
        ProductCategory::new(CategoryId(1), "Arabica", 85, "")
    }

    fn material(id: u64) -> Material {
        Material::new(MaterialId(id), category())
    }

    fn line(id: u64, material_id: Option<u64>) -> Line {
        Line::new(
            LineId(id),
            material_id.map(material),
            category(),
            10.0,
            "kg",
        )
    }

    fn info(id: u64, supplier: &str) -> TradeInfo {
        TradeInfo {
            id: TradeId(id),
            supplier: Address::new(supplier),
            customer: Address::new("0xCUST"),
            commissioner: Address::new("0xCOMM"),
            external_url: String::new(),
        }
    }

    #[tokio::test]
    async fn zero_match_trades_are_omitted() {
        let ledger = InMemoryLedger::new();
        let scope = Address::new("0xB");
        ledger.add_basic_trade(
            &scope,
            BasicTrade {
                info: info(1, "0xA"),
                lines: vec![line(1, Some(5))],
            },
        );
        ledger.add_basic_trade(
            &scope,
            BasicTrade {
                info: info(2, "0xA"),
                lines: vec![line(1, Some(6)), line(2, None)],
            },
        );

        let matches = find_trades_by_material(&ledger, &scope, MaterialId(5))
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].trade.id(), TradeId(1));
    }

    #[tokio::test]
    async fn only_matching_lines_are_kept() {
        let ledger = InMemoryLedger::new();
        let scope = Address::new("0xB");
        ledger.add_basic_trade(
            &scope,
            BasicTrade {
                info: info(1, "0xA"),
                lines: vec![
                    line(1, Some(5)),
                    line(2, Some(6)),
                    line(3, Some(5)),
                    line(4, None),
                ],
            },
        );

        let matches = find_trades_by_material(&ledger, &scope, MaterialId(5))
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        let kept: Vec<LineId> = matches[0].lines.iter().map(|l| l.id).collect();
        assert_eq!(kept, vec![LineId(1), LineId(3)]);
    }

    #[tokio::test]
    async fn order_trades_resolve_through_their_accessor() {
        let ledger = InMemoryLedger::new();
        let scope = Address::new("0xB");
        ledger.add_order_trade(
            &scope,
            OrderTrade {
                info: info(7, "0xA"),
                lines: vec![line(1, Some(5))],
                payment_deadline: 1_700_000_000,
                shipping_deadline: 1_700_600_000,
                arbiter: Address::new("0xARB"),
                escrow: Address::new("0xESC"),
                status: NegotiationStatus::Completed,
            },
        );

        let matches = find_trades_by_material(&ledger, &scope, MaterialId(5))
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches!(matches[0].trade, Trade::Order(_)));
    }

    #[tokio::test]
    async fn unknown_type_code_aborts_whole_lookup() {
        let ledger = InMemoryLedger::new();
        let scope = Address::new("0xB");
        // The corrupt trade would not even match the query; the lookup must
        // still abort on it.
        ledger.add_basic_trade(
            &scope,
            BasicTrade {
                info: info(1, "0xA"),
                lines: vec![line(1, Some(99))],
            },
        );
        ledger.add_basic_trade(
            &scope,
            BasicTrade {
                info: info(2, "0xA"),
                lines: vec![line(1, Some(5))],
            },
        );
        ledger.override_trade_type_code(&scope, TradeId(1), 9).unwrap();

        let err = find_trades_by_material(&ledger, &scope, MaterialId(5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Ledger(LedgerError::Core(
                brewtrace_core::CoreError::InvalidTradeType { code: 9 }
            ))
        ));
    }

    #[tokio::test]
    async fn remote_failure_propagates_uncaught() {
        let ledger = InMemoryLedger::new();
        let scope = Address::new("0xB");
        ledger.inject_remote_faults(1);

        let err = find_trades_by_material(&ledger, &scope, MaterialId(5))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Ledger(e) if e.is_transient()));
    }
}
