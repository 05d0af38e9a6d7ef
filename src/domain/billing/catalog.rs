//! Static plan catalog.
//!
//! | Key | Name | USD | Tokens | Kind |
//! |-----|------|-----|--------|------|
//! | starter | Starter | 19 | 150 000 | subscription |
//! | pro | Pro | 49 | 500 000 | subscription |
//! | ultra | Ultra | 99 | 1 200 000 | subscription |
//! | pack1 | 150K Tokens | 5 | 150 000 | token pack |
//! | pack2 | 400K Tokens | 10 | 400 000 | token pack |

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Whether a catalog entry is billed recurringly or once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Subscription,
    TokenPack,
}

/// A purchasable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub key: &'static str,
    pub name: &'static str,
    /// Price in whole US dollars.
    pub price: u32,
    pub tokens: u64,
    pub price_id: &'static str,
    pub kind: PlanKind,
}

pub static PLANS: [Plan; 3] = [
    Plan {
        key: "starter",
        name: "Starter",
        price: 19,
        tokens: 150_000,
        price_id: "price_1RdfNTP1x2coidHcaMps3STo",
        kind: PlanKind::Subscription,
    },
    Plan {
        key: "pro",
        name: "Pro",
        price: 49,
        tokens: 500_000,
        price_id: "price_1RdfO7P1x2coidHcPT71SJlt",
        kind: PlanKind::Subscription,
    },
    Plan {
        key: "ultra",
        name: "Ultra",
        price: 99,
        tokens: 1_200_000,
        price_id: "price_1RdfOfP1x2coidHcln5m4KEi",
        kind: PlanKind::Subscription,
    },
];

pub static TOKEN_PACKS: [Plan; 2] = [
    Plan {
        key: "pack1",
        name: "150K Tokens",
        price: 5,
        tokens: 150_000,
        price_id: "price_1RdfS0P1x2coidHcafwMvRba",
        kind: PlanKind::TokenPack,
    },
    Plan {
        key: "pack2",
        name: "400K Tokens",
        price: 10,
        tokens: 400_000,
        price_id: "price_1RdfT4P1x2coidHcbpqY6Wjh",
        kind: PlanKind::TokenPack,
    },
];

static BY_PRICE_ID: Lazy<HashMap<&'static str, &'static Plan>> = Lazy::new(|| {
    PLANS
        .iter()
        .chain(TOKEN_PACKS.iter())
        .map(|plan| (plan.price_id, plan))
        .collect()
});

/// Looks up any catalog entry by its external price id.
pub fn find_by_price_id(price_id: &str) -> Option<&'static Plan> {
    BY_PRICE_ID.get(price_id).copied()
}

/// Looks up a subscription tier by price id. Token packs are not plans.
pub fn plan_for_price(price_id: &str) -> Option<&'static Plan> {
    find_by_price_id(price_id).filter(|plan| plan.kind == PlanKind::Subscription)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pro_plan_resolves_by_price_id() {
        let plan = plan_for_price("price_1RdfO7P1x2coidHcPT71SJlt").unwrap();
        assert_eq!(plan.name, "Pro");
        assert_eq!(plan.price, 49);
        assert_eq!(plan.tokens, 500_000);
    }

    #[test]
    fn token_pack_is_not_a_subscription_plan() {
        assert!(plan_for_price("price_1RdfT4P1x2coidHcbpqY6Wjh").is_none());
        let pack = find_by_price_id("price_1RdfT4P1x2coidHcbpqY6Wjh").unwrap();
        assert_eq!(pack.name, "400K Tokens");
        assert_eq!(pack.kind, PlanKind::TokenPack);
    }

    #[test]
    fn unknown_price_id_resolves_to_nothing() {
        assert!(find_by_price_id("price_unknown").is_none());
    }

    #[test]
    fn price_ids_are_unique() {
        assert_eq!(BY_PRICE_ID.len(), PLANS.len() + TOKEN_PACKS.len());
    }

    #[test]
    fn tiers_are_ordered_by_price() {
        let prices: Vec<u32> = PLANS.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![19, 49, 99]);
    }
}
