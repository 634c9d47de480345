//! Branch (location) form.

use crate::forms::{FieldErrors, FormFields, FormReader};

#[derive(Debug, Clone, PartialEq)]
pub struct BranchForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub zip: String,
    pub phone: String,
}

pub fn parse_branch(fields: &FormFields) -> Result<BranchForm, FieldErrors> {
    let mut form = FormReader::new(fields);
    let name = form.required_max("name", 100);
    let address = form.required_max("address", 255);
    let city = form.required_max("city", 100);
    let province = form.required_max("province", 100);

    let zip = form.required("zip");
    if !zip.is_empty() && (zip.len() != 4 || !zip.chars().all(|c| c.is_ascii_digit())) {
        form.error("zip", "Enter a 4-digit ZIP code");
    }

    let phone: String = form
        .required("phone")
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+'))
        .collect();
    if !form.has_error("phone") && (!(7..=13).contains(&phone.len()) || !phone.chars().all(|c| c.is_ascii_digit())) {
        form.error("phone", "Enter a phone number of 7 to 13 digits");
    }

    form.finish(BranchForm {
        name,
        address,
        city,
        province,
        zip,
        phone,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::fields;

    fn valid() -> Vec<(&'static str, &'static str)> {
        vec![
            ("name", "Main"),
            ("address", "1 Ayala Ave"),
            ("city", "Makati"),
            ("province", "Metro Manila"),
            ("zip", "1226"),
            ("phone", "+63 (2) 8123-4567"),
        ]
    }

    #[test]
    fn normalizes_phone() {
        let branch = parse_branch(&fields(&valid())).unwrap();
        assert_eq!(branch.phone, "63281234567");
    }

    #[test]
    fn rejects_bad_zip_and_phone() {
        let mut pairs = valid();
        pairs[4] = ("zip", "12345");
        pairs[5] = ("phone", "12");
        let errors = parse_branch(&fields(&pairs)).unwrap_err();
        assert!(errors.contains("zip"));
        assert!(errors.contains("phone"));
    }
}
