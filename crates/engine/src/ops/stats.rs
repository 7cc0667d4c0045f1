use sea_orm::{QueryOrder, QuerySelect, TransactionTrait, prelude::*};

use crate::{EngineError, Money, ResultEngine, Stats, TopCharity, charities, donations};

use super::{Engine, with_tx};

impl Engine {
    /// Returns marketplace totals.
    ///
    /// All figures are read inside one transaction, so `total_raised` always
    /// matches the raised totals of the charities it is reported with.
    /// See [`TopCharity`] for the tie-break rule.
    ///
    /// Each charity total fits in `i64` cents but their sum may not: that case
    /// is a `Validation` error rather than a wrapped figure.
    pub async fn get_stats(&self) -> ResultEngine<Stats> {
        with_tx!(self, |db_tx| {
            let raised: Vec<i64> = charities::Entity::find()
                .select_only()
                .column(charities::Column::RaisedUsd)
                .into_tuple()
                .all(&db_tx)
                .await?;

            let total_raised = raised
                .iter()
                .try_fold(Money::ZERO, |total, cents| total.checked_add(Money::new(*cents)))
                .ok_or_else(|| {
                    EngineError::Validation(format!(
                        "total raised exceeds {}",
                        Money::new(i64::MAX)
                    ))
                })?;

            let total_donations = donations::Entity::find().count(&db_tx).await?;

            let top_charity = charities::Entity::find()
                .order_by_desc(charities::Column::RaisedUsd)
                .order_by_asc(charities::Column::CreatedAt)
                .order_by_asc(charities::Column::Id)
                .one(&db_tx)
                .await?
                .map(TopCharity::from);

            Ok(Stats {
                total_raised,
                total_charities: raised.len() as u64,
                total_donations,
                top_charity,
            })
        })
    }
}
