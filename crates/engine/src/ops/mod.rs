use sea_orm::{DatabaseConnection, DatabaseTransaction, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

mod charities;
mod donations;
mod stats;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
///
/// The transaction is dropped without commit when the block fails, which rolls
/// it back.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Handle to the charity store.
///
/// Cloning is cheap: clones share the same connection pool, so one engine can
/// serve any number of concurrent callers.
#[derive(Clone, Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    async fn require_charity(
        &self,
        db_tx: &DatabaseTransaction,
        charity_id: Uuid,
    ) -> ResultEngine<crate::charities::Model> {
        crate::charities::Entity::find_by_id(charity_id)
            .one(db_tx)
            .await?
            .ok_or_else(|| charity_not_found(charity_id))
    }
}

fn charity_not_found(charity_id: Uuid) -> EngineError {
    EngineError::NotFound(format!("charity {charity_id}"))
}

fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database.
    ///
    /// The schema must already be in place (see the `migration` crate).
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
