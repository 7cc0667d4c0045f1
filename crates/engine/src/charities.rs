//! The module contains `Charity` struct and its storage model.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::Serialize;
use uuid::Uuid;

use crate::{Category, EngineError, Money, ResultEngine};

/// A registered nonprofit with a fundraising goal.
///
/// `raised_usd` is owned by the engine: it only moves when a donation is
/// recorded and always equals the sum of the charity's donations.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Charity {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub goal_usd: Money,
    pub raised_usd: Money,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Charity {
    /// A fresh, unverified charity with nothing raised yet.
    pub fn new(
        name: String,
        category: Category,
        description: String,
        goal_usd: Money,
    ) -> ResultEngine<Self> {
        if goal_usd.is_negative() {
            return Err(EngineError::Validation(
                "goal must be >= 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            category,
            description,
            goal_usd,
            raised_usd: Money::ZERO,
            verified: false,
            created_at: Utc::now(),
        })
    }

    /// Percentage of the goal raised so far; `0.0` when the goal is zero.
    pub fn progress_percent(&self) -> f64 {
        if self.goal_usd.is_positive() {
            self.raised_usd.as_dollars() / self.goal_usd.as_dollars() * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "charities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub description: String,
    pub goal_usd: i64,
    pub raised_usd: i64,
    pub verified: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::donations::Entity")]
    Donations,
}

impl Related<super::donations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Charity> for ActiveModel {
    fn from(value: &Charity) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            name: ActiveValue::Set(value.name.clone()),
            category: ActiveValue::Set(value.category.as_str().to_string()),
            description: ActiveValue::Set(value.description.clone()),
            goal_usd: ActiveValue::Set(value.goal_usd.cents()),
            raised_usd: ActiveValue::Set(value.raised_usd.cents()),
            verified: ActiveValue::Set(value.verified),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for Charity {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            category: model.category.parse()?,
            description: model.description,
            goal_usd: Money::new(model.goal_usd),
            raised_usd: Money::new(model.raised_usd),
            verified: model.verified,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charity(goal_cents: i64) -> Charity {
        Charity::new(
            "Books for All".to_string(),
            Category::Education,
            "Libraries".to_string(),
            Money::new(goal_cents),
        )
        .unwrap()
    }

    #[test]
    fn new_charity_starts_empty_and_unverified() {
        let charity = charity(100_000);
        assert_eq!(charity.raised_usd, Money::ZERO);
        assert!(!charity.verified);
        assert_eq!(charity.progress_percent(), 0.0);
    }

    #[test]
    fn negative_goal_is_rejected() {
        let err = Charity::new(
            "Nope".to_string(),
            Category::Arts,
            String::new(),
            Money::new(-1),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn progress_is_relative_to_goal() {
        let mut charity = charity(100_000);
        charity.raised_usd = Money::new(5_000);
        assert!((charity.progress_percent() - 5.0).abs() < f64::EPSILON);

        let mut zero_goal = self::charity(0);
        zero_goal.raised_usd = Money::new(5_000);
        assert_eq!(zero_goal.progress_percent(), 0.0);
    }

    #[test]
    fn model_round_trip_keeps_category() {
        let charity = charity(1_000);
        let model = Model {
            id: charity.id,
            name: charity.name.clone(),
            category: "health".to_string(),
            description: charity.description.clone(),
            goal_usd: 1_000,
            raised_usd: 250,
            verified: true,
            created_at: charity.created_at,
        };
        let restored = Charity::try_from(model).unwrap();
        assert_eq!(restored.category, Category::Health);
        assert_eq!(restored.raised_usd, Money::new(250));
        assert!(restored.verified);
    }

    #[test]
    fn model_with_unknown_category_is_rejected() {
        let charity = charity(1_000);
        let mut model = Model {
            id: charity.id,
            name: charity.name,
            category: "space".to_string(),
            description: charity.description,
            goal_usd: 0,
            raised_usd: 0,
            verified: false,
            created_at: charity.created_at,
        };
        assert!(Charity::try_from(model.clone()).is_err());
        model.category = "arts".to_string();
        assert!(Charity::try_from(model).is_ok());
    }
}
