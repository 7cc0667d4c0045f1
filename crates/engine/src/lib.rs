//! Storage and aggregation core of the charity marketplace.
//!
//! [`Engine`] owns every read and write against the database. Each public
//! operation runs inside exactly one database transaction, so a donation and
//! the matching increment of its charity's raised total are always committed
//! (or discarded) together.

pub use category::{Category, CharitySort};
pub use charities::Charity;
pub use donations::Donation;
pub use error::EngineError;
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use receipt::Receipt;
pub use stats::{Stats, TopCharity};

mod category;
mod charities;
mod donations;
mod error;
mod money;
mod ops;
mod receipt;
mod stats;

type ResultEngine<T> = Result<T, EngineError>;
