//! Donation primitives.
//!
//! A `Donation` is immutable once recorded: the engine exposes no update or
//! delete path for it.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::Serialize;
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Donation {
    pub id: Uuid,
    pub charity_id: Uuid,
    pub donor: String,
    pub amount_usd: Money,
    /// Empty when the donor left no message.
    pub message: String,
    pub ts: DateTime<Utc>,
}

impl Donation {
    pub fn new(
        charity_id: Uuid,
        donor: String,
        amount_usd: Money,
        message: String,
    ) -> ResultEngine<Self> {
        if !amount_usd.is_positive() {
            return Err(EngineError::Validation(
                "donation amount must be > 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            charity_id,
            donor,
            amount_usd,
            message,
            ts: Utc::now(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub charity_id: Uuid,
    pub donor: String,
    pub amount_usd: i64,
    pub message: String,
    pub ts: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::charities::Entity",
        from = "Column::CharityId",
        to = "super::charities::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Charity,
}

impl Related<super::charities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Charity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Donation> for ActiveModel {
    fn from(value: &Donation) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            charity_id: ActiveValue::Set(value.charity_id),
            donor: ActiveValue::Set(value.donor.clone()),
            amount_usd: ActiveValue::Set(value.amount_usd.cents()),
            message: ActiveValue::Set(value.message.clone()),
            ts: ActiveValue::Set(value.ts),
        }
    }
}

impl From<Model> for Donation {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            charity_id: model.charity_id,
            donor: model.donor,
            amount_usd: Money::new(model.amount_usd),
            message: model.message,
            ts: model.ts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        for cents in [0, -1, -5_000] {
            let err = Donation::new(
                Uuid::new_v4(),
                "Alice".to_string(),
                Money::new(cents),
                String::new(),
            )
            .unwrap_err();
            assert!(err.is_validation());
        }
    }

    #[test]
    fn new_donation_keeps_fields() {
        let charity_id = Uuid::new_v4();
        let donation = Donation::new(
            charity_id,
            "Alice".to_string(),
            Money::new(5_000),
            "Good luck".to_string(),
        )
        .unwrap();
        assert_eq!(donation.charity_id, charity_id);
        assert_eq!(donation.amount_usd, Money::new(5_000));
        assert_eq!(donation.message, "Good luck");
    }
}
