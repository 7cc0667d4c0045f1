use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{Category, Charity, CharitySort, Money, ResultEngine, charities};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Registers a new charity.
    ///
    /// The charity starts unverified with nothing raised. Names are trimmed and
    /// must not be empty, but they are not unique.
    pub async fn register_charity(
        &self,
        name: &str,
        category: Category,
        description: &str,
        goal_usd: Money,
    ) -> ResultEngine<Charity> {
        let name = normalize_required_text(name, "charity name")?;
        let charity = Charity::new(name, category, description.trim().to_string(), goal_usd)?;
        let model: charities::ActiveModel = (&charity).into();

        with_tx!(self, |db_tx| {
            model.insert(&db_tx).await?;
            Ok(charity)
        })
    }

    /// Return a charity snapshot from DB.
    pub async fn charity(&self, charity_id: Uuid) -> ResultEngine<Charity> {
        with_tx!(self, |db_tx| {
            let model = self.require_charity(&db_tx, charity_id).await?;
            Charity::try_from(model)
        })
    }

    /// Lists charities, optionally restricted to one category.
    ///
    /// - [`CharitySort::Raised`]: highest raised first, ties by registration
    ///   order then id.
    /// - [`CharitySort::Created`]: newest first, ties by id.
    ///
    /// An empty category is an empty list, not an error.
    pub async fn get_charities(
        &self,
        category: Option<Category>,
        sort_by: CharitySort,
    ) -> ResultEngine<Vec<Charity>> {
        with_tx!(self, |db_tx| {
            let mut query = charities::Entity::find();
            if let Some(category) = category {
                query = query.filter(charities::Column::Category.eq(category.as_str()));
            }
            query = match sort_by {
                CharitySort::Raised => query
                    .order_by_desc(charities::Column::RaisedUsd)
                    .order_by_asc(charities::Column::CreatedAt),
                CharitySort::Created => query.order_by_desc(charities::Column::CreatedAt),
            };

            let models = query
                .order_by_asc(charities::Column::Id)
                .all(&db_tx)
                .await?;
            models
                .into_iter()
                .map(Charity::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Marks a charity as verified.
    ///
    /// The charity must exist: the lookup happens before any write, so an
    /// unknown id fails without touching the store. Verifying an already
    /// verified charity is a no-op.
    pub async fn verify_charity(&self, charity_id: Uuid) -> ResultEngine<Charity> {
        with_tx!(self, |db_tx| {
            let model = self.require_charity(&db_tx, charity_id).await?;
            let model = if model.verified {
                model
            } else {
                let active = charities::ActiveModel {
                    id: ActiveValue::Set(charity_id),
                    verified: ActiveValue::Set(true),
                    ..Default::default()
                };
                active.update(&db_tx).await?
            };
            Charity::try_from(model)
        })
    }
}
