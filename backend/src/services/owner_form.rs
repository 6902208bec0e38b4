//! Owner form binding and field checks.
//!
//! Submitted forms never carry an id: the field is not part of [`OwnerForm`],
//! so a posted `id` is dropped during deserialization.

use serde::{Deserialize, Serialize};

use crate::api::Owner;

/// Maximum number of digits accepted in a telephone number.
pub const TELEPHONE_MAX_DIGITS: usize = 10;

/// Error code attached to `lastName` when a search finds nobody.
pub const NOT_FOUND_CODE: &str = "notFound";

/// Owner fields accepted from a create or edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub telephone: String,
}

/// A rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// The error shown on the search form when no owner matched.
    pub fn not_found(field: impl Into<String>) -> Self {
        Self::new(field, NOT_FOUND_CODE, "not found")
    }
}

impl From<&Owner> for OwnerForm {
    fn from(owner: &Owner) -> Self {
        Self {
            first_name: owner.first_name.clone(),
            last_name: owner.last_name.clone(),
            address: owner.address.clone(),
            city: owner.city.clone(),
            telephone: owner.telephone.clone(),
        }
    }
}

impl OwnerForm {
    /// Check the submitted values.
    ///
    /// Returns every problem found, in field order; an empty vector means the
    /// form can be saved.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("telephone", &self.telephone),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, "required", "must not be empty"));
            }
        }

        let telephone = self.telephone.trim();
        if !telephone.is_empty()
            && (telephone.len() > TELEPHONE_MAX_DIGITS
                || !telephone.chars().all(|c| c.is_ascii_digit()))
        {
            errors.push(FieldError::new(
                "telephone",
                "digits",
                format!(
                    "numeric value out of bounds (<{} digits>.<0 digits> expected)",
                    TELEPHONE_MAX_DIGITS
                ),
            ));
        }

        errors
    }

    /// Convert into an unsaved owner, trimming surrounding whitespace.
    pub fn into_owner(self) -> Owner {
        Owner::new(
            self.first_name.trim(),
            self.last_name.trim(),
            self.address.trim(),
            self.city.trim(),
            self.telephone.trim(),
        )
    }
}
