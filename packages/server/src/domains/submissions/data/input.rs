//! Public submission form and admin review input, with validation.
//!
//! Every field is accepted as optional loosely-typed JSON so that a missing
//! value or a value of the wrong type surfaces as a field error instead of a
//! deserialization failure. `validate` collects every problem before
//! returning.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use super::types::{ReviewDecision, SubmissionStatus, SubmissionType};
use crate::domains::resources::models::ResourceType;
use crate::domains::tag::normalize::{
    normalize_tags, split_raw_tags, MAX_RAW_TAGS_LEN, MAX_TAGS, MAX_TAG_LEN,
};

pub const MAX_SUBMITTER_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_NAME_LEN: usize = 200;
pub const MAX_URL_LEN: usize = 500;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MAX_UPDATE_REASON_LEN: usize = 1000;
pub const MAX_ADMIN_NOTES_LEN: usize = 500;

lazy_static! {
    // Simplified address shape: local@domain.tld, no whitespace
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap();
    static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// Field and form level errors, serialized as `{fieldErrors, formErrors}`
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub field_errors: BTreeMap<String, Vec<String>>,
    pub form_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single error not tied to any field
    pub fn form(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.form_errors.push(message.into());
        errors
    }

    /// A single error on one field
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.form_errors.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.field_errors.contains_key(field)
    }
}

/// Tags arrive either as free text or as a JSON list
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TagsInput {
    Text(String),
    List(Vec<String>),
    Other(serde_json::Value),
}

/// A form value that should be text but may arrive as any JSON value
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FormText {
    Text(String),
    Other(serde_json::Value),
}

impl From<&str> for FormText {
    fn from(value: &str) -> Self {
        FormText::Text(value.to_string())
    }
}

impl From<String> for FormText {
    fn from(value: String) -> Self {
        FormText::Text(value)
    }
}

/// The public submission form, as posted by the site
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInput {
    pub submission_type: Option<FormText>,
    pub resource_type: Option<FormText>,
    pub submitter_name: Option<FormText>,
    pub submitter_email: Option<FormText>,

    // New resource fields
    pub name: Option<FormText>,
    pub website: Option<FormText>,
    pub description: Option<FormText>,
    pub image: Option<FormText>,
    pub conference_date: Option<FormText>,
    pub cfp_date: Option<FormText>,
    pub tags: Option<TagsInput>,

    // Edit request fields
    pub existing_resource_name: Option<FormText>,
    pub update_reason: Option<FormText>,

    /// Honeypot. Hidden on the form, so humans leave it empty.
    pub homepage: Option<FormText>,
}

/// A submission that passed validation, ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSubmission {
    pub submission_type: SubmissionType,
    pub resource_type: ResourceType,
    pub submitter_name: String,
    pub submitter_email: String,
    pub name: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub conference_date: Option<NaiveDate>,
    pub cfp_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub existing_resource_name: Option<String>,
    pub update_reason: Option<String>,
}

/// Trim, treating blank as absent. A non-text value is reported on `field`
/// and treated as absent.
fn clean(errors: &mut ValidationErrors, field: &str, value: &Option<FormText>) -> Option<String> {
    match value {
        None | Some(FormText::Other(serde_json::Value::Null)) => None,
        Some(FormText::Text(text)) => Some(text.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        Some(FormText::Other(other)) => {
            errors.add(field, format!("Expected text, received {}", json_kind(other)));
            None
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn check_len(errors: &mut ValidationErrors, field: &str, value: &Option<String>, max: usize, message: &str) {
    if let Some(value) = value {
        if value.chars().count() > max {
            errors.add(field, message);
        }
    }
}

fn check_https_url(errors: &mut ValidationErrors, field: &str, value: &Option<String>, label: &str) {
    let Some(value) = value else {
        return;
    };

    if value.chars().count() > MAX_URL_LEN {
        errors.add(field, format!("{label} must be less than {MAX_URL_LEN} characters"));
        return;
    }

    match Url::parse(value) {
        Ok(url) if url.scheme() == "https" && url.host_str().is_some() => {}
        Ok(_) => errors.add(field, format!("{label} must use HTTPS")),
        Err(_) => errors.add(field, format!("Please enter a valid {}", label.to_lowercase())),
    }
}

fn parse_date(errors: &mut ValidationErrors, field: &str, value: &Option<String>) -> Option<NaiveDate> {
    let value = value.as_deref()?;

    if !DATE_REGEX.is_match(value) {
        errors.add(field, "Date must be in YYYY-MM-DD format");
        return None;
    }

    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Date must be a real calendar date");
            None
        }
    }
}

fn parse_tags(errors: &mut ValidationErrors, tags: &Option<TagsInput>) -> Vec<String> {
    let raw: Vec<String> = match tags {
        None => return Vec::new(),
        Some(TagsInput::Text(text)) => {
            if text.trim().chars().count() > MAX_RAW_TAGS_LEN {
                errors.add("tags", format!("Tags must be less than {MAX_RAW_TAGS_LEN} characters"));
                return Vec::new();
            }
            split_raw_tags(text)
        }
        Some(TagsInput::List(list)) => {
            if list.join(",").chars().count() > MAX_RAW_TAGS_LEN {
                errors.add("tags", format!("Tags must be less than {MAX_RAW_TAGS_LEN} characters"));
                return Vec::new();
            }
            list.clone()
        }
        Some(TagsInput::Other(serde_json::Value::Null)) => return Vec::new(),
        Some(TagsInput::Other(_)) => {
            errors.add("tags", "Tags must be text or a list of strings");
            return Vec::new();
        }
    };

    let tags = normalize_tags(raw);
    if tags.len() > MAX_TAGS {
        errors.add("tags", format!("Maximum {MAX_TAGS} tags allowed"));
    }
    if tags.iter().any(|tag| tag.chars().count() > MAX_TAG_LEN) {
        errors.add("tags", format!("Each tag must be at most {MAX_TAG_LEN} characters"));
    }
    tags
}

impl SubmissionInput {
    pub fn validate(&self) -> Result<ValidSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let submission_type = match clean(&mut errors, "submissionType", &self.submission_type) {
            None if errors.has_field("submissionType") => None,
            None => Some(SubmissionType::New),
            Some(raw) => raw.parse::<SubmissionType>().ok(),
        };
        if submission_type.is_none() && !errors.has_field("submissionType") {
            errors.add("submissionType", "Please select a submission type");
        }

        let resource_type = clean(&mut errors, "resourceType", &self.resource_type)
            .and_then(|raw| raw.parse::<ResourceType>().ok());
        if resource_type.is_none() && !errors.has_field("resourceType") {
            errors.add("resourceType", "Please select a resource type");
        }

        let submitter_name = clean(&mut errors, "submitterName", &self.submitter_name);
        match &submitter_name {
            None if errors.has_field("submitterName") => {}
            None => errors.add("submitterName", "Name is required"),
            Some(name) if name.chars().count() > MAX_SUBMITTER_NAME_LEN => errors.add(
                "submitterName",
                format!("Name must be less than {MAX_SUBMITTER_NAME_LEN} characters"),
            ),
            Some(_) => {}
        }

        let submitter_email = clean(&mut errors, "submitterEmail", &self.submitter_email)
            .map(|email| email.to_lowercase());
        match &submitter_email {
            None if errors.has_field("submitterEmail") => {}
            None => errors.add("submitterEmail", "Email is required"),
            Some(email) if email.chars().count() > MAX_EMAIL_LEN => errors.add(
                "submitterEmail",
                format!("Email must be less than {MAX_EMAIL_LEN} characters"),
            ),
            Some(email) if !EMAIL_REGEX.is_match(email) => {
                errors.add("submitterEmail", "Please enter a valid email address")
            }
            Some(_) => {}
        }

        let name = clean(&mut errors, "name", &self.name);
        check_len(&mut errors, "name", &name, MAX_NAME_LEN, "Name must be less than 200 characters");

        let website = clean(&mut errors, "website", &self.website);
        check_https_url(&mut errors, "website", &website, "URL");

        let description = clean(&mut errors, "description", &self.description);
        check_len(
            &mut errors,
            "description",
            &description,
            MAX_DESCRIPTION_LEN,
            "Description must be less than 1000 characters",
        );

        let image = clean(&mut errors, "image", &self.image);
        check_https_url(&mut errors, "image", &image, "Image URL");

        let conference_date = clean(&mut errors, "conferenceDate", &self.conference_date);
        let conference_date = parse_date(&mut errors, "conferenceDate", &conference_date);
        let cfp_date = clean(&mut errors, "cfpDate", &self.cfp_date);
        let cfp_date = parse_date(&mut errors, "cfpDate", &cfp_date);

        let tags = parse_tags(&mut errors, &self.tags);

        let existing_resource_name =
            clean(&mut errors, "existingResourceName", &self.existing_resource_name);
        check_len(
            &mut errors,
            "existingResourceName",
            &existing_resource_name,
            MAX_NAME_LEN,
            "Resource name must be less than 200 characters",
        );

        let update_reason = clean(&mut errors, "updateReason", &self.update_reason);
        check_len(
            &mut errors,
            "updateReason",
            &update_reason,
            MAX_UPDATE_REASON_LEN,
            "Update reason must be less than 1000 characters",
        );

        let honeypot_filled = match &self.homepage {
            None | Some(FormText::Other(serde_json::Value::Null)) => false,
            Some(FormText::Text(text)) => !text.trim().is_empty(),
            Some(FormText::Other(_)) => true,
        };
        if honeypot_filled {
            errors.add("homepage", "This field must be empty");
        }

        match submission_type {
            Some(SubmissionType::New) => {
                if name.is_none() || website.is_none() || description.is_none() {
                    errors.add(
                        "name",
                        "Name, website, and description are required for new resource submissions",
                    );
                }
            }
            Some(SubmissionType::Edit) => {
                if existing_resource_name.is_none() || update_reason.is_none() {
                    errors.add(
                        "existingResourceName",
                        "Resource name and update reason are required for edit submissions",
                    );
                }
            }
            None => {}
        }

        match (submission_type, resource_type, submitter_name, submitter_email) {
            (Some(submission_type), Some(resource_type), Some(submitter_name), Some(submitter_email))
                if errors.is_empty() =>
            {
                Ok(ValidSubmission {
                    submission_type,
                    resource_type,
                    submitter_name,
                    submitter_email,
                    name,
                    website,
                    description,
                    image,
                    conference_date,
                    cfp_date,
                    tags,
                    existing_resource_name,
                    update_reason,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Admin notes must fit in the column; blank notes are dropped
pub fn validate_admin_notes(notes: Option<&str>) -> Result<Option<String>, ValidationErrors> {
    let notes = notes.map(str::trim).filter(|s| !s.is_empty());
    match notes {
        Some(notes) if notes.chars().count() > MAX_ADMIN_NOTES_LEN => Err(ValidationErrors::field(
            "adminNotes",
            format!("Notes must be less than {MAX_ADMIN_NOTES_LEN} characters"),
        )),
        notes => Ok(notes.map(str::to_string)),
    }
}

/// Body of `PATCH /api/admin/submissions/:id`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub status: Option<String>,
    pub admin_notes: Option<String>,
}

/// Optional body of the approve and reject endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewNotesInput {
    pub admin_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReview {
    pub decision: ReviewDecision,
    pub admin_notes: Option<String>,
}

impl ReviewInput {
    pub fn validate(&self) -> Result<ValidReview, ValidationErrors> {
        let decision = match self.status.as_deref().map(str::trim) {
            Some("approved") => Some(ReviewDecision::Approve),
            Some("rejected") => Some(ReviewDecision::Reject),
            _ => None,
        };

        let notes = validate_admin_notes(self.admin_notes.as_deref());

        match (decision, notes) {
            (Some(decision), Ok(admin_notes)) => Ok(ValidReview {
                decision,
                admin_notes,
            }),
            (decision, notes) => {
                let mut errors = notes.err().unwrap_or_default();
                if decision.is_none() {
                    errors.add("status", "Status must be approved or rejected");
                }
                Err(errors)
            }
        }
    }
}

/// Parse the `status` filter of the admin list, defaulting to pending
pub fn parse_status_filter(raw: Option<&str>) -> Result<SubmissionStatus, ValidationErrors> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(SubmissionStatus::Pending),
        Some(raw) => raw.parse::<SubmissionStatus>().map_err(|_| {
            ValidationErrors::field(
                "status",
                "Status must be one of: pending, approved, rejected",
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_submission() -> SubmissionInput {
        SubmissionInput {
            resource_type: Some("meetup".into()),
            submitter_name: Some("  Ada Lovelace ".into()),
            submitter_email: Some(" Ada@Example.COM ".into()),
            name: Some("Rust Meetup".into()),
            website: Some("https://rust.example.org".into()),
            description: Some("Monthly Rust talks".into()),
            tags: Some(TagsInput::Text("Rust, Systems  Programming, rust".to_string())),
            ..Default::default()
        }
    }

    fn edit_submission() -> SubmissionInput {
        SubmissionInput {
            submission_type: Some("edit".into()),
            resource_type: Some("conference".into()),
            submitter_name: Some("Grace".into()),
            submitter_email: Some("grace@example.com".into()),
            existing_resource_name: Some("DevFest".into()),
            update_reason: Some("The date moved".into()),
            ..Default::default()
        }
    }

    #[test]
    fn valid_new_submission_is_normalized() {
        let valid = new_submission().validate().unwrap();
        assert_eq!(valid.submission_type, SubmissionType::New);
        assert_eq!(valid.resource_type, ResourceType::Meetup);
        assert_eq!(valid.submitter_name, "Ada Lovelace");
        assert_eq!(valid.submitter_email, "ada@example.com");
        assert_eq!(valid.tags, vec!["rust", "systems programming"]);
    }

    #[test]
    fn valid_edit_submission_needs_no_website() {
        let valid = edit_submission().validate().unwrap();
        assert_eq!(valid.submission_type, SubmissionType::Edit);
        assert_eq!(valid.existing_resource_name.as_deref(), Some("DevFest"));
        assert!(valid.website.is_none());
    }

    #[test]
    fn collects_every_error() {
        let input = SubmissionInput {
            resource_type: Some("workshop".into()),
            submitter_email: Some("not-an-email".into()),
            website: Some("http://insecure.example.org".into()),
            conference_date: Some("2025-02-30".into()),
            cfp_date: Some("next week".into()),
            ..Default::default()
        };

        let errors = input.validate().unwrap_err();
        for field in [
            "resourceType",
            "submitterName",
            "submitterEmail",
            "website",
            "conferenceDate",
            "cfpDate",
            "name",
        ] {
            assert!(errors.has_field(field), "missing error for {field}");
        }
        assert!(errors.form_errors.is_empty());
    }

    #[test]
    fn new_submission_requires_core_fields_under_name() {
        let input = SubmissionInput {
            description: None,
            ..new_submission()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.field_errors.len(), 1);
        assert!(errors.field_errors["name"][0].contains("required for new resource"));
    }

    #[test]
    fn edit_submission_requires_reason_under_existing_name() {
        let input = SubmissionInput {
            update_reason: Some("   ".into()),
            ..edit_submission()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.has_field("existingResourceName"));
        assert!(!errors.has_field("updateReason"));
    }

    #[test]
    fn unknown_submission_type_is_rejected() {
        let input = SubmissionInput {
            submission_type: Some("delete".into()),
            ..new_submission()
        };
        assert!(input.validate().unwrap_err().has_field("submissionType"));
    }

    #[test]
    fn empty_website_means_absent() {
        let input = SubmissionInput {
            website: Some("".into()),
            ..edit_submission()
        };
        assert!(input.validate().unwrap().website.is_none());
    }

    #[test]
    fn image_must_be_https() {
        let input = SubmissionInput {
            image: Some("ftp://files.example.org/logo.png".into()),
            ..new_submission()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.field_errors["image"], vec!["Image URL must use HTTPS"]);
    }

    #[test]
    fn length_limits_are_inclusive() {
        let input = SubmissionInput {
            submitter_name: Some("a".repeat(100).into()),
            name: Some("n".repeat(200).into()),
            ..new_submission()
        };
        assert!(input.validate().is_ok());

        let input = SubmissionInput {
            submitter_name: Some("a".repeat(101).into()),
            description: Some("d".repeat(1001).into()),
            ..new_submission()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.has_field("submitterName"));
        assert!(errors.has_field("description"));
    }

    #[test]
    fn honeypot_must_be_empty() {
        let input = SubmissionInput {
            homepage: Some("http://spam.example".into()),
            ..new_submission()
        };
        assert!(input.validate().unwrap_err().has_field("homepage"));

        let input = SubmissionInput {
            homepage: Some(String::new().into()),
            ..new_submission()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn tags_accept_a_list() {
        let input = SubmissionInput {
            tags: Some(TagsInput::List(vec![" Web ".to_string(), "AI".to_string()])),
            ..new_submission()
        };
        assert_eq!(input.validate().unwrap().tags, vec!["web", "ai"]);
    }

    #[test]
    fn tags_accept_json_array_text() {
        let input = SubmissionInput {
            tags: Some(TagsInput::Text(r#"["Cloud", "DevOps"]"#.to_string())),
            ..new_submission()
        };
        assert_eq!(input.validate().unwrap().tags, vec!["cloud", "devops"]);
    }

    #[test]
    fn too_many_tags_are_rejected() {
        let raw = (0..11).map(|i| format!("tag{i}")).collect::<Vec<_>>().join(",");
        let input = SubmissionInput {
            tags: Some(TagsInput::Text(raw)),
            ..new_submission()
        };
        assert!(input.validate().unwrap_err().has_field("tags"));
    }

    #[test]
    fn overlong_tag_is_rejected() {
        let input = SubmissionInput {
            tags: Some(TagsInput::List(vec!["x".repeat(51)])),
            ..new_submission()
        };
        assert!(input.validate().unwrap_err().has_field("tags"));
    }

    #[test]
    fn tags_of_the_wrong_shape_are_a_field_error() {
        let input: SubmissionInput = serde_json::from_value(serde_json::json!({
            "resourceType": "online",
            "submitterName": "Ada",
            "submitterEmail": "ada@example.com",
            "name": "Docs",
            "website": "https://docs.example.org",
            "description": "Reference docs",
            "tags": [1, 2]
        }))
        .unwrap();
        assert!(input.validate().unwrap_err().has_field("tags"));
    }

    #[test]
    fn wrong_types_are_field_errors_alongside_others() {
        let input: SubmissionInput = serde_json::from_value(serde_json::json!({
            "resourceType": "meetup",
            "submitterName": 5,
            "submitterEmail": "not-an-email",
            "website": ["https://a.example.org"],
            "cfpDate": null
        }))
        .unwrap();

        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.field_errors["submitterName"],
            vec!["Expected text, received number"]
        );
        assert_eq!(
            errors.field_errors["submitterEmail"],
            vec!["Please enter a valid email address"]
        );
        assert_eq!(
            errors.field_errors["website"],
            vec!["Expected text, received array"]
        );
        assert!(!errors.has_field("cfpDate"));
        assert!(errors.form_errors.is_empty());
    }

    #[test]
    fn non_text_honeypot_is_filled() {
        let input = SubmissionInput {
            homepage: Some(FormText::Other(serde_json::json!(true))),
            ..new_submission()
        };
        assert!(input.validate().unwrap_err().has_field("homepage"));
    }

    #[test]
    fn errors_serialize_as_field_and_form_errors() {
        let json = serde_json::to_value(ValidationErrors::field("name", "bad")).unwrap();
        assert_eq!(json["fieldErrors"]["name"][0], "bad");
        assert_eq!(json["formErrors"], serde_json::json!([]));
    }

    #[test]
    fn review_input_accepts_terminal_statuses() {
        let review = ReviewInput {
            status: Some("approved".into()),
            admin_notes: Some("  looks good ".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(review.decision, ReviewDecision::Approve);
        assert_eq!(review.admin_notes.as_deref(), Some("looks good"));
    }

    #[test]
    fn review_input_rejects_pending_and_long_notes() {
        let errors = ReviewInput {
            status: Some("pending".into()),
            admin_notes: Some("n".repeat(501).into()),
        }
        .validate()
        .unwrap_err();
        assert!(errors.has_field("status"));
        assert!(errors.has_field("adminNotes"));
    }

    #[test]
    fn status_filter_defaults_to_pending() {
        assert_eq!(parse_status_filter(None).unwrap(), SubmissionStatus::Pending);
        assert_eq!(parse_status_filter(Some("")).unwrap(), SubmissionStatus::Pending);
        assert_eq!(
            parse_status_filter(Some("rejected")).unwrap(),
            SubmissionStatus::Rejected
        );
        assert!(parse_status_filter(Some("all")).is_err());
    }
}
