//! Recurrence patterns and their date arithmetic.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates::add_one_month;
use crate::errors::TodoError;

/// How often a task repeats once completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    #[default]
    None,
}

impl Recurrence {
    /// True for every pattern except `none`
    pub fn is_recurring(self) -> bool {
        self != Self::None
    }

    /// Next occurrence after `from`, or `None` for non-recurring tasks.
    ///
    /// Monthly keeps the day-of-month, clamped to the last day of the target
    /// month (Jan 31 -> Feb 28, or Feb 29 in a leap year).
    pub fn next_after(self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Daily => from.checked_add_days(Days::new(1)),
            Self::Weekly => from.checked_add_days(Days::new(7)),
            Self::Monthly => add_one_month(from),
            Self::None => None,
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for Recurrence {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "none" => Ok(Self::None),
            _ => Err(TodoError::InvalidRecurrence {
                recurrence: s.to_string(),
            }),
        }
    }
}
