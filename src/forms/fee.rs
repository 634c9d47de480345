//! Fee and commission schedule form.
//!
//! Tier rows are posted as `MinVolume{i}`, `MaxVolume{i}` and `Rate{i}` for
//! `i` in `0..tier_count`.

use crate::forms::{FieldErrors, FormFields, FormReader};
use crate::models::{
    fees::{FeeKind, FeeTier, RateKind},
    partner::PartnerType,
};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct FeeForm {
    pub partner: PartnerType,
    pub fee_kind: FeeKind,
    pub rate_kind: RateKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub tiers: Vec<FeeTier>,
}

pub fn parse_fee(fields: &FormFields, max_rows: usize) -> Result<FeeForm, FieldErrors> {
    let mut form = FormReader::new(fields);

    let partner = partner_field(&mut form, "partner");
    let fee_kind = FeeKind::parse(&form.required("fee_kind")).unwrap_or_else(|| {
        form.error("fee_kind", "Choose fee or commission");
        FeeKind::default()
    });
    let rate_kind = RateKind::parse(&form.required("rate_kind")).unwrap_or_else(|| {
        form.error("rate_kind", "Choose fixed or percentage");
        RateKind::default()
    });

    let start_date = form.required_date("start_date");
    let end_date = form.required_date("end_date");
    form.date_range("end_date", start_date, end_date);

    let tier_count = form.count("tier_count", max_rows);
    if tier_count == 0 && !form.has_error("tier_count") {
        form.error("tier_count", "Add at least one tier");
    }

    let mut tiers = Vec::with_capacity(tier_count);
    for i in 0..tier_count {
        let min_field = format!("MinVolume{i}");
        let max_field = format!("MaxVolume{i}");
        let rate_field = format!("Rate{i}");

        let min_volume_cents = form.hundredths(&min_field);
        let max_volume_cents = form.hundredths(&max_field);
        let rate_hundredths = form.hundredths(&rate_field);

        if !form.has_error(&min_field) && !form.has_error(&max_field) && min_volume_cents >= max_volume_cents {
            form.error(&max_field, "Maximum must be greater than minimum");
        }
        if tiers
            .last()
            .is_some_and(|previous: &FeeTier| min_volume_cents < previous.max_volume_cents)
        {
            form.error(&min_field, "Tiers must not overlap");
        }
        if rate_kind == RateKind::Percentage && rate_hundredths > 10_000 {
            form.error(&rate_field, "Percentage cannot exceed 100%");
        }

        tiers.push(FeeTier {
            min_volume_cents,
            max_volume_cents,
            rate_hundredths,
        });
    }

    // Missing dates are already field errors, so the defaults never escape.
    form.finish(FeeForm {
        partner,
        fee_kind,
        rate_kind,
        start_date: start_date.unwrap_or_default(),
        end_date: end_date.unwrap_or_default(),
        tiers,
    })
}

/// Read a partner code field, recording an error when it is missing or unknown.
pub(crate) fn partner_field(form: &mut FormReader<'_>, name: &str) -> PartnerType {
    let raw = form.required(name);
    PartnerType::from_code(&raw).unwrap_or_else(|| {
        if !raw.is_empty() {
            form.error(name, "Unknown partner");
        }
        PartnerType::WesternUnion
    })
}
