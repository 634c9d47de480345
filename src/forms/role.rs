//! Role creation form.

use crate::forms::{FieldErrors, FormFields, FormReader};

#[derive(Debug, Clone, PartialEq)]
pub struct RoleForm {
    pub name: String,
    pub description: String,
}

pub fn parse_role(fields: &FormFields) -> Result<RoleForm, FieldErrors> {
    let mut form = FormReader::new(fields);
    let name = form.required_max("name", 64);
    let description = form.optional("description");
    if description.chars().count() > 255 {
        form.error("description", "Must be at most 255 characters");
    }
    form.finish(RoleForm { name, description })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::fields;

    #[test]
    fn name_is_required_and_bounded() {
        assert!(parse_role(&fields(&[])).unwrap_err().contains("name"));
        let long = "x".repeat(65);
        assert!(parse_role(&fields(&[("name", &long)])).unwrap_err().contains("name"));
        let role = parse_role(&fields(&[("name", "Reviewer")])).unwrap();
        assert_eq!(role.name, "Reviewer");
        assert!(role.description.is_empty());
    }
}
