//! Currency settings form.

use crate::forms::{FieldErrors, FormFields, FormReader};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyForm {
    pub currency_code: String,
    pub markup_hundredths: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub fn parse_currency(fields: &FormFields) -> Result<CurrencyForm, FieldErrors> {
    let mut form = FormReader::new(fields);

    let currency_code = form.required("currency_code").to_ascii_uppercase();
    if !currency_code.is_empty()
        && (currency_code.len() != 3 || !currency_code.chars().all(|c| c.is_ascii_alphabetic()))
    {
        form.error("currency_code", "Use a three-letter ISO 4217 code");
    }

    let markup_hundredths = form.hundredths("markup");
    if markup_hundredths > 10_000 {
        form.error("markup", "Markup cannot exceed 100%");
    }

    let start_date = form.required_date("start_date");
    let end_date = form.date("end_date");
    form.date_range("end_date", start_date, end_date);

    form.finish(CurrencyForm {
        currency_code,
        markup_hundredths,
        start_date,
        end_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::fields;

    #[test]
    fn parses_valid_settings() {
        let form = parse_currency(&fields(&[
            ("currency_code", "php"),
            ("markup", "1.25"),
            ("start_date", "2024-01-01"),
        ]))
        .unwrap();
        assert_eq!(form.currency_code, "PHP");
        assert_eq!(form.markup_hundredths, 125);
        assert!(form.end_date.is_none());
    }

    #[test]
    fn rejects_bad_code_and_markup() {
        let errors = parse_currency(&fields(&[
            ("currency_code", "PESO"),
            ("markup", "150"),
            ("start_date", "2024-01-01"),
        ]))
        .unwrap_err();
        assert!(errors.contains("currency_code"));
        assert!(errors.contains("markup"));
    }
}
