//! Read-only summaries computed over the whole store.

use serde::Serialize;
use uuid::Uuid;

use crate::{Money, charities};

/// Marketplace totals, read from one consistent snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Stats {
    /// Sum of every donation amount, equal to the sum of raised totals.
    #[serde(rename = "total_raised_usd")]
    pub total_raised: Money,
    pub total_charities: u64,
    pub total_donations: u64,
    /// `None` only when no charity is registered.
    pub top_charity: Option<TopCharity>,
}

/// The charity with the highest raised total.
///
/// Ties go to the charity registered first, then to the lowest id.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopCharity {
    pub id: Uuid,
    pub name: String,
    pub raised_usd: Money,
}

impl From<charities::Model> for TopCharity {
    fn from(model: charities::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            raised_usd: Money::new(model.raised_usd),
        }
    }
}
