use uuid::Uuid;

use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr};

use crate::{Donation, EngineError, Money, Receipt, ResultEngine, charities, donations};

use super::{
    Engine, charity_not_found, normalize_optional_text, normalize_required_text, with_tx,
};

impl Engine {
    /// Records a donation and raises the charity total by the same amount.
    ///
    /// Both writes share one transaction. The increment runs first and its
    /// affected-row count doubles as the existence check, so the write lock
    /// is taken before anything is read and an unknown charity fails without
    /// any row being written.
    pub async fn donate(
        &self,
        charity_id: Uuid,
        donor: &str,
        amount_usd: Money,
        message: Option<&str>,
    ) -> ResultEngine<Donation> {
        let donor = normalize_required_text(donor, "donor")?;
        let donation = Donation::new(
            charity_id,
            donor,
            amount_usd,
            normalize_optional_text(message),
        )?;
        let model: donations::ActiveModel = (&donation).into();

        with_tx!(self, |db_tx| {
            let increment = charities::Entity::update_many()
                .col_expr(
                    charities::Column::RaisedUsd,
                    Expr::col(charities::Column::RaisedUsd).add(amount_usd.cents()),
                )
                .filter(charities::Column::Id.eq(charity_id))
                .filter(charities::Column::RaisedUsd.lte(i64::MAX - amount_usd.cents()))
                .exec(&db_tx)
                .await?;

            if increment.rows_affected == 0 {
                // Either the charity is missing or its total would overflow.
                let existing = self.require_charity(&db_tx, charity_id).await?;
                return Err(EngineError::Validation(format!(
                    "raised total of charity {} cannot grow past {}",
                    existing.id,
                    Money::new(i64::MAX)
                )));
            }

            model.insert(&db_tx).await?;
            Ok(donation)
        })
    }

    /// Return a donation snapshot from DB.
    pub async fn get_donation(&self, donation_id: Uuid) -> ResultEngine<Donation> {
        with_tx!(self, |db_tx| {
            let model = donations::Entity::find_by_id(donation_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| donation_not_found(donation_id))?;
            Ok(Donation::from(model))
        })
    }

    /// Lists the donations of one charity, newest first.
    pub async fn donations_for_charity(&self, charity_id: Uuid) -> ResultEngine<Vec<Donation>> {
        with_tx!(self, |db_tx| {
            self.require_charity(&db_tx, charity_id).await?;

            let models = donations::Entity::find()
                .filter(donations::Column::CharityId.eq(charity_id))
                .order_by_desc(donations::Column::Ts)
                .order_by_asc(donations::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(models.into_iter().map(Donation::from).collect::<Vec<_>>())
        })
    }

    /// Loads a donation together with its charity name.
    pub async fn receipt(&self, donation_id: Uuid) -> ResultEngine<Receipt> {
        with_tx!(self, |db_tx| {
            let (donation, charity) = donations::Entity::find_by_id(donation_id)
                .find_also_related(charities::Entity)
                .one(&db_tx)
                .await?
                .ok_or_else(|| donation_not_found(donation_id))?;
            let charity = charity.ok_or_else(|| charity_not_found(donation.charity_id))?;

            Ok(Receipt {
                donation: Donation::from(donation),
                charity_name: charity.name,
            })
        })
    }

    /// Renders the printable receipt of a donation.
    pub async fn generate_receipt(&self, donation_id: Uuid) -> ResultEngine<String> {
        Ok(self.receipt(donation_id).await?.to_string())
    }
}

fn donation_not_found(donation_id: Uuid) -> EngineError {
    EngineError::NotFound(format!("donation {donation_id}"))
}
