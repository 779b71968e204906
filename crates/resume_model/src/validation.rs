//! Field validation for resume submissions
//!
//! These rules run upstream of the renderers: the form layer and the CRUD
//! endpoints reject invalid data before any export is attempted.

use crate::error::{FieldError, FieldIssue, Result, ValidationError};
use crate::resume::ResumeData;
use regex_lite::Regex;
use std::sync::OnceLock;

/// Minimum phone length in characters
pub const MIN_PHONE_LENGTH: usize = 10;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// Check an email address for basic `local@domain.tld` shape
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(value.trim()))
}

struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    fn required(&mut self, field: impl Into<String>, value: &str) {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, FieldIssue::Required));
        }
    }

    fn min_length(&mut self, field: impl Into<String>, value: &str, min: usize) {
        let actual = value.chars().count();
        if actual < min {
            self.errors
                .push(FieldError::new(field, FieldIssue::TooShort { min, actual }));
        }
    }
}

impl ResumeData {
    /// Validate every field rule, collecting all failures rather than
    /// stopping at the first one.
    pub fn validate(&self) -> Result<()> {
        let mut c = Collector { errors: Vec::new() };
        let info = &self.personal_info;

        c.required("personalInfo.fullName", &info.full_name);
        if !is_valid_email(&info.email) {
            c.errors
                .push(FieldError::new("personalInfo.email", FieldIssue::InvalidEmail));
        }
        c.min_length("personalInfo.phone", &info.phone, MIN_PHONE_LENGTH);

        for (i, edu) in self.education.iter().enumerate() {
            c.required(format!("education[{i}].institution"), &edu.institution);
            c.required(format!("education[{i}].degree"), &edu.degree);
        }

        for (i, exp) in self.experience.iter().enumerate() {
            c.required(format!("experience[{i}].company"), &exp.company);
            c.required(format!("experience[{i}].position"), &exp.position);
        }

        for (i, project) in self.projects.iter().enumerate() {
            c.required(format!("projects[{i}].name"), &project.name);
        }

        for (i, cert) in self.certificates.iter().enumerate() {
            c.required(format!("certificates[{i}].name"), &cert.name);
        }

        if c.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(c.errors))
        }
    }
}
