//! Partner integration form.
//!
//! Parameters are posted as `param_{name}`; which names are required
//! depends on the partner's catalog entry.

use crate::forms::{FieldErrors, FormFields, FormReader, fee::partner_field};
use crate::models::partner::{PartnerStatus, PartnerType};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct PartnerForm {
    pub partner: PartnerType,
    pub params: BTreeMap<String, String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: PartnerStatus,
}

pub fn parse_partner(fields: &FormFields) -> Result<PartnerForm, FieldErrors> {
    let mut form = FormReader::new(fields);
    let partner = partner_field(&mut form, "partner");

    let mut params = BTreeMap::new();
    if !form.has_error("partner") {
        for name in partner.required_params() {
            let value = form.required_max(&format!("param_{name}"), 100);
            params.insert((*name).to_string(), value);
        }
    }

    let start_date = form.required_date("start_date");
    let end_date = form.date("end_date");
    form.date_range("end_date", start_date, end_date);

    let status = if fields.has("enabled") {
        PartnerStatus::Enabled
    } else {
        PartnerStatus::Disabled
    };

    form.finish(PartnerForm {
        partner,
        params,
        start_date,
        end_date,
        status,
    })
}

/// Parse the enable/disable toggle posted from the partner list.
pub fn parse_partner_status(fields: &FormFields) -> Result<PartnerStatus, FieldErrors> {
    let mut form = FormReader::new(fields);
    let status = match form.required("status").to_ascii_lowercase().as_str() {
        "enable" | "enabled" => PartnerStatus::Enabled,
        "disable" | "disabled" => PartnerStatus::Disabled,
        "" => PartnerStatus::Disabled,
        _ => {
            form.error("status", "Choose enable or disable");
            PartnerStatus::Disabled
        }
    };
    form.finish(status)
}
