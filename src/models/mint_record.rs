use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Currency, MintPhase};

/// One entry in the off-chain mint ledger
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::mints)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MintRecord {
    pub id: String,
    pub address: String,
    pub quantity: i64,
    pub currency: Currency,
    pub unit_price: f64,
    pub total_price: f64,
    pub phase: MintPhase,
    pub minted_at: i64,
}

impl MintRecord {
    pub fn new(
        address: String,
        quantity: i64,
        currency: Currency,
        unit_price: f64,
        phase: MintPhase,
        minted_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            address,
            quantity,
            currency,
            unit_price,
            total_price: unit_price * quantity as f64,
            phase,
            minted_at,
        }
    }
}
