//! Applicant document uploads and the required-document checklist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UploadType {
    IdPhoto,
    NbiClearance,
    BusinessPermit,
    SecRegistration,
    FinancialStatement,
    BankStatement,
    ProofOfAddress,
    MayorsPermit,
    BirCertificate,
    SignatureSpecimen,
    Other,
}

impl UploadType {
    pub fn label(self) -> &'static str {
        match self {
            UploadType::IdPhoto => "ID Photo",
            UploadType::NbiClearance => "NBI Clearance",
            UploadType::BusinessPermit => "Business Permit",
            UploadType::SecRegistration => "SEC/DTI Registration",
            UploadType::FinancialStatement => "Financial Statement",
            UploadType::BankStatement => "Bank Statement",
            UploadType::ProofOfAddress => "Proof of Address",
            UploadType::MayorsPermit => "Mayor's Permit",
            UploadType::BirCertificate => "BIR Certificate",
            UploadType::SignatureSpecimen => "Signature Specimen",
            UploadType::Other => "Other",
        }
    }
}

/// Documents every applicant must submit before review can complete.
pub const REQUIRED_DOCUMENTS: [UploadType; 9] = [
    UploadType::IdPhoto,
    UploadType::NbiClearance,
    UploadType::BusinessPermit,
    UploadType::SecRegistration,
    UploadType::FinancialStatement,
    UploadType::BankStatement,
    UploadType::ProofOfAddress,
    UploadType::MayorsPermit,
    UploadType::BirCertificate,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUpload {
    pub upload_type: UploadType,
    #[serde(default)]
    pub file_names: Vec<String>,
    pub submitted: bool,
    pub checked_at: Option<DateTime<Utc>>,
}

/// True iff every required document type has a submitted upload.
pub fn all_docs_submitted(uploads: &[FileUpload]) -> bool {
    REQUIRED_DOCUMENTS.iter().all(|required| {
        uploads
            .iter()
            .any(|upload| upload.upload_type == *required && upload.submitted)
    })
}

/// One checklist row on the applicant detail page.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentStatus {
    pub label: &'static str,
    pub required: bool,
    pub submitted: bool,
    pub checked_at: Option<DateTime<Utc>>,
}

/// Required documents first (in checklist order), then any optional uploads.
pub fn document_checklist(uploads: &[FileUpload]) -> Vec<DocumentStatus> {
    let mut rows: Vec<DocumentStatus> = REQUIRED_DOCUMENTS
        .iter()
        .map(|required| {
            let upload = uploads.iter().find(|u| u.upload_type == *required);
            DocumentStatus {
                label: required.label(),
                required: true,
                submitted: upload.is_some_and(|u| u.submitted),
                checked_at: upload.and_then(|u| u.checked_at),
            }
        })
        .collect();

    rows.extend(
        uploads
            .iter()
            .filter(|u| !REQUIRED_DOCUMENTS.contains(&u.upload_type))
            .map(|u| DocumentStatus {
                label: u.upload_type.label(),
                required: false,
                submitted: u.submitted,
                checked_at: u.checked_at,
            }),
    );
    rows
}
