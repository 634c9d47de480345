//! Applicant review forms: status decisions and DSA code assignment.

use crate::forms::{FieldErrors, FormFields, FormReader};
use crate::models::{
    filters::{FilterTable, ORG_STATUS, lookup},
    org::{OrgStatus, TransactionTypes},
};

/// Decision verbs posted by the review buttons, on top of the status names.
const DECISIONS: FilterTable<OrgStatus> = &[
    ("accept", OrgStatus::Accepted),
    ("reject", OrgStatus::Rejected),
    ("request-documents", OrgStatus::PendingDocuments),
];

#[derive(Debug, Clone, PartialEq)]
pub struct StatusForm {
    pub status: OrgStatus,
    pub remark: String,
}

/// Parse a review decision. Rejections must carry a remark.
pub fn parse_status(fields: &FormFields) -> Result<StatusForm, FieldErrors> {
    let mut form = FormReader::new(fields);
    let raw = form.required("status");
    let status = match lookup(DECISIONS, &raw).or_else(|| lookup(ORG_STATUS, &raw)) {
        Some(status) => status,
        None => {
            if !raw.is_empty() {
                form.error("status", "Unknown status");
            }
            OrgStatus::Unknown
        }
    };

    let remark = form.optional("remark");
    if status == OrgStatus::Rejected && remark.is_empty() {
        form.error("remark", "Give a reason for the rejection");
    }
    if remark.chars().count() > 500 {
        form.error("remark", "Must be at most 500 characters");
    }

    form.finish(StatusForm { status, remark })
}

#[derive(Debug, Clone, PartialEq)]
pub struct DsaCodeForm {
    pub dsa_code: String,
    pub transaction_types: TransactionTypes,
    pub terminal_id_otc: String,
    pub terminal_id_digital: String,
}

/// Parse a DSA code assignment.
///
/// At least one channel must be selected, and each selected channel needs
/// its terminal id.
pub fn parse_dsa_code(fields: &FormFields) -> Result<DsaCodeForm, FieldErrors> {
    let mut form = FormReader::new(fields);

    let dsa_code = form.required_max("dsa_code", 20);
    if !dsa_code.chars().all(|c| c.is_ascii_alphanumeric()) {
        form.error("dsa_code", "Use letters and digits only");
    }

    let transaction_types = TransactionTypes {
        otc: fields.has("TransactionOTC"),
        digital: fields.has("TransactionDIGITAL"),
    };
    if !transaction_types.otc && !transaction_types.digital {
        form.error("transaction_types", "Select at least one transaction type");
    }

    let terminal_id_otc = if transaction_types.otc {
        form.required_max("terminal_id_otc", 20)
    } else {
        String::new()
    };
    let terminal_id_digital = if transaction_types.digital {
        form.required_max("terminal_id_digital", 20)
    } else {
        String::new()
    };

    form.finish(DsaCodeForm {
        dsa_code: dsa_code.to_ascii_uppercase(),
        transaction_types,
        terminal_id_otc,
        terminal_id_digital,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{REQUIRED, fields};

    #[test]
    fn rejection_needs_remark() {
        let errors = parse_status(&fields(&[("status", "rejected")])).unwrap_err();
        assert!(errors.contains("remark"));

        let form = parse_status(&fields(&[("status", "rejected"), ("remark", "expired permit")])).unwrap();
        assert_eq!(form.status, OrgStatus::Rejected);
    }

    #[test]
    fn accepts_known_statuses_only() {
        let form = parse_status(&fields(&[("status", "accepted")])).unwrap();
        assert_eq!(form.status, OrgStatus::Accepted);
        assert!(parse_status(&fields(&[("status", "approved-ish")])).unwrap_err().contains("status"));
    }

    #[test]
    fn decision_verbs_map_to_statuses() {
        let decide = |raw: &str| parse_status(&fields(&[("status", raw), ("remark", "checked")])).map(|f| f.status);
        assert_eq!(decide("accept"), Ok(OrgStatus::Accepted));
        assert_eq!(decide("Reject"), Ok(OrgStatus::Rejected));
        assert_eq!(decide("pending-documents"), Ok(OrgStatus::PendingDocuments));
        assert_eq!(decide("request-documents"), Ok(OrgStatus::PendingDocuments));
    }

    #[test]
    fn dsa_code_requires_terminal_per_channel() {
        let errors = parse_dsa_code(&fields(&[
            ("dsa_code", "ab12"),
            ("TransactionOTC", "on"),
            ("TransactionDIGITAL", "on"),
            ("terminal_id_otc", "T-1"),
        ]))
        .unwrap_err();
        assert_eq!(errors.get("terminal_id_digital"), Some(REQUIRED));
        assert!(!errors.contains("terminal_id_otc"));
    }

    #[test]
    fn dsa_code_happy_path() {
        let form = parse_dsa_code(&fields(&[
            ("dsa_code", "ab12"),
            ("TransactionOTC", "on"),
            ("terminal_id_otc", "T-1"),
        ]))
        .unwrap();
        assert_eq!(form.dsa_code, "AB12");
        assert_eq!(form.transaction_types.to_tags(), "OTC");
        assert!(form.terminal_id_digital.is_empty());
    }

    #[test]
    fn dsa_code_needs_a_channel() {
        let errors = parse_dsa_code(&fields(&[("dsa_code", "AB-12")])).unwrap_err();
        assert!(errors.contains("transaction_types"));
        assert!(errors.contains("dsa_code"));
    }
}
