//! Two-stage document classification.
//!
//! Stage one asks the zero-shot classification service to rank the fixed
//! label set against the (normalized, truncated) text. Stage two runs a
//! deterministic keyword-override table over the full lowercased original
//! text, first match wins. The overrides exist because a general-purpose
//! zero-shot model frequently mislabels domain-specific legal documents;
//! they reassign within the fixed label set, never outside it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::inference::{ModelError, ModelService};
use crate::text::normalize_for_classification;

/// The closed set of document types the service can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "legal agreement")]
    LegalAgreement,
    #[serde(rename = "contract document")]
    ContractDocument,
    #[serde(rename = "official notice")]
    OfficialNotice,
    #[serde(rename = "privacy policy")]
    PrivacyPolicy,
    #[serde(rename = "court judgment")]
    CourtJudgment,
    #[serde(rename = "employment offer letter")]
    EmploymentOfferLetter,
    #[serde(rename = "terms and conditions")]
    TermsAndConditions,
    #[serde(rename = "legal affidavit")]
    LegalAffidavit,
    #[serde(rename = "service level agreement")]
    ServiceLevelAgreement,
    #[serde(rename = "memorandum of understanding")]
    MemorandumOfUnderstanding,
}

impl DocumentType {
    /// Every document type, in the order presented to the classification
    /// service.
    pub const ALL: [DocumentType; 10] = [
        DocumentType::LegalAgreement,
        DocumentType::ContractDocument,
        DocumentType::OfficialNotice,
        DocumentType::PrivacyPolicy,
        DocumentType::CourtJudgment,
        DocumentType::EmploymentOfferLetter,
        DocumentType::TermsAndConditions,
        DocumentType::LegalAffidavit,
        DocumentType::ServiceLevelAgreement,
        DocumentType::MemorandumOfUnderstanding,
    ];

    /// The wire label for this document type.
    pub fn as_label(&self) -> &'static str {
        match self {
            DocumentType::LegalAgreement => "legal agreement",
            DocumentType::ContractDocument => "contract document",
            DocumentType::OfficialNotice => "official notice",
            DocumentType::PrivacyPolicy => "privacy policy",
            DocumentType::CourtJudgment => "court judgment",
            DocumentType::EmploymentOfferLetter => "employment offer letter",
            DocumentType::TermsAndConditions => "terms and conditions",
            DocumentType::LegalAffidavit => "legal affidavit",
            DocumentType::ServiceLevelAgreement => "service level agreement",
            DocumentType::MemorandumOfUnderstanding => "memorandum of understanding",
        }
    }

    /// Parse a wire label back into a document type.
    pub fn from_label(label: &str) -> Option<DocumentType> {
        DocumentType::ALL.into_iter().find(|d| d.as_label() == label)
    }

    /// The candidate labels sent to the classification service.
    pub fn candidate_labels() -> [&'static str; 10] {
        DocumentType::ALL.map(|d| d.as_label())
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

/// One override: if any keyword occurs in the lowercased document, the
/// document type is reassigned.
struct OverrideRule {
    keywords: &'static [&'static str],
    doc_type: DocumentType,
}

/// Override rules in priority order; the first rule with a keyword hit wins
/// outright. Matching is plain substring containment, not whole-word.
/// Affidavits, SLAs, and MOUs have no rule and are reachable only through
/// the model's own ranking.
const OVERRIDE_RULES: [OverrideRule; 6] = [
    OverrideRule {
        keywords: &["court", "judge", "tribunal", "case number"],
        doc_type: DocumentType::CourtJudgment,
    },
    OverrideRule {
        keywords: &["privacy", "policy", "data protection"],
        doc_type: DocumentType::PrivacyPolicy,
    },
    OverrideRule {
        keywords: &["agreement", "contract", "party", "obligation"],
        doc_type: DocumentType::LegalAgreement,
    },
    OverrideRule {
        keywords: &["notice", "hereby", "serve notice"],
        doc_type: DocumentType::OfficialNotice,
    },
    OverrideRule {
        keywords: &["employment", "employee", "offer letter"],
        doc_type: DocumentType::EmploymentOfferLetter,
    },
    OverrideRule {
        keywords: &["terms", "conditions", "usage", "agreement of service"],
        doc_type: DocumentType::TermsAndConditions,
    },
];

/// Run the override table against the full, untruncated document text.
///
/// Returns the first matching rule's document type, or `None` when no
/// keyword group is present.
pub fn apply_override_rules(text: &str) -> Option<DocumentType> {
    let lowered = text.to_lowercase();
    OVERRIDE_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|rule| rule.doc_type)
}

/// Classify `text` into one of the ten document types.
///
/// The classification service sees the normalized text (whitespace-collapsed,
/// truncated); the override rules see the original in full. A service label
/// outside the candidate set is rejected as malformed so the result is
/// always one of the ten types.
pub async fn classify_document(
    models: &dyn ModelService,
    text: &str,
) -> Result<DocumentType, ModelError> {
    let normalized = normalize_for_classification(text);
    let ranked = models
        .classify(&normalized, &DocumentType::candidate_labels())
        .await?;

    let top = ranked.first().ok_or_else(|| {
        ModelError::MalformedResponse("classification returned no labels".to_string())
    })?;
    let provisional = DocumentType::from_label(&top.label).ok_or_else(|| {
        ModelError::MalformedResponse(format!(
            "label '{}' is not in the candidate set",
            top.label
        ))
    })?;

    let resolved = apply_override_rules(text).unwrap_or(provisional);
    debug!(provisional = %provisional, resolved = %resolved, "classified document");
    Ok(resolved)
}
