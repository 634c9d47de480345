//! Organization currency settings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub org_id: Uuid,

    /// ISO 4217 code, e.g. "PHP"
    pub currency_code: String,

    /// Markup over the reference rate in hundredths of a percent
    pub markup_hundredths: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub updated_by: String,
}
