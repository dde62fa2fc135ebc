//! Category editor rules.
//!
//! Name and slug are both required and must be between 3 and 40 characters.
//! Slugs are stored lowercased; no other normalisation is applied, so
//! `"My Slug"` becomes `"my slug"`.

use crate::domain::error::{DomainError, FieldViolation};

pub const MIN_FIELD_CHARS: usize = 3;
pub const MAX_FIELD_CHARS: usize = 40;

pub const NAME_FIELD: &str = "Name";
pub const SLUG_FIELD: &str = "Slug";

const NAME_REQUIRED: &str = "O Nome é obrigatório";
const SLUG_REQUIRED: &str = "O Slug é obrigatório";
const LENGTH_OUT_OF_RANGE: &str = "Este campo deve ter entre 3 a 40 caracteres";

/// Validated name/slug pair ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    name: String,
    slug: String,
}

impl CategoryDraft {
    /// Validate raw editor input, collecting every field violation before failing.
    pub fn new(name: Option<String>, slug: Option<String>) -> Result<Self, DomainError> {
        let mut violations = Vec::new();

        let name = check_field(name, NAME_FIELD, NAME_REQUIRED, &mut violations);
        let slug = check_field(slug, SLUG_FIELD, SLUG_REQUIRED, &mut violations);

        match (name, slug) {
            (Some(name), Some(slug)) if violations.is_empty() => Ok(Self {
                name,
                slug: normalize_slug(&slug),
            }),
            _ => Err(DomainError::validation(violations)),
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn into_parts(self) -> (String, String) {
        (self.name, self.slug)
    }
}

pub fn normalize_slug(slug: &str) -> String {
    slug.to_lowercase()
}

fn check_field(
    value: Option<String>,
    field: &'static str,
    required_message: &'static str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    let Some(value) = value.filter(|value| !value.trim().is_empty()) else {
        violations.push(FieldViolation::new(field, required_message));
        return None;
    };

    let chars = value.chars().count();
    if !(MIN_FIELD_CHARS..=MAX_FIELD_CHARS).contains(&chars) {
        violations.push(FieldViolation::new(field, LENGTH_OUT_OF_RANGE));
        return None;
    }

    Some(value)
}
