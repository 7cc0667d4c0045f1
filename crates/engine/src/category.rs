//! The closed set of charity categories and the list orderings.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Classification tag of a charity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Education,
    Environment,
    Health,
    Housing,
    Animals,
    Arts,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Education,
        Category::Environment,
        Category::Health,
        Category::Housing,
        Category::Animals,
        Category::Arts,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Environment => "environment",
            Self::Health => "health",
            Self::Housing => "housing",
            Self::Animals => "animals",
            Self::Arts => "arts",
        }
    }

    fn choices() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                EngineError::Validation(format!(
                    "category must be one of: {} (got {s:?})",
                    Self::choices()
                ))
            })
    }
}

/// Ordering of [`Engine::get_charities`](crate::Engine::get_charities).
///
/// Both orders are descending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CharitySort {
    /// Highest raised total first; ties keep registration order.
    #[default]
    Raised,
    /// Most recently registered first.
    Created,
}

impl FromStr for CharitySort {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raised" => Ok(Self::Raised),
            "created" => Ok(Self::Created),
            other => Err(EngineError::Validation(format!(
                "sort must be one of: raised, created (got {other:?})"
            ))),
        }
    }
}
