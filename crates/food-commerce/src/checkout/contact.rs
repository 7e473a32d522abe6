//! Customer contact details.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four checkout form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    Name,
    Address,
    PhoneNumber,
    Email,
}

impl ContactField {
    /// All fields in form order.
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Address,
        ContactField::PhoneNumber,
        ContactField::Email,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Address => "address",
            ContactField::PhoneNumber => "phoneNumber",
            ContactField::Email => "email",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Address => "Address",
            ContactField::PhoneNumber => "Phone Number",
            ContactField::Email => "Email",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized form field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown contact field: {0}")]
pub struct ParseFieldError(String);

impl FromStr for ContactField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(ContactField::Name),
            "address" => Ok(ContactField::Address),
            "phone" | "phonenumber" | "phone_number" => Ok(ContactField::PhoneNumber),
            "email" => Ok(ContactField::Email),
            _ => Err(ParseFieldError(s.to_string())),
        }
    }
}

/// Contact details typed into the checkout form.
///
/// Fields are free text while editing; completeness is only checked when an
/// order is submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
}

impl ContactDetails {
    /// Create contact details with every field filled in.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone_number: phone_number.into(),
            email: email.into(),
        }
    }

    /// Get a field's current value.
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Address => &self.address,
            ContactField::PhoneNumber => &self.phone_number,
            ContactField::Email => &self.email,
        }
    }

    /// Replace a field's value. The value is stored as typed.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Address => &mut self.address,
            ContactField::PhoneNumber => &mut self.phone_number,
            ContactField::Email => &mut self.email,
        };
        *slot = value.into();
    }

    /// Fields that are empty or whitespace-only, in form order.
    pub fn missing_fields(&self) -> Vec<ContactField> {
        ContactField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Check if every field has non-blank content.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Reset every field to the empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_details() {
        let details = ContactDetails::new("Asha", "12 Beach Rd", "98400", "asha@example.com");
        assert!(details.is_complete());
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut details = ContactDetails::new("Asha", "   ", "98400", "\t");
        assert_eq!(
            details.missing_fields(),
            vec![ContactField::Address, ContactField::Email]
        );

        details.set(ContactField::Address, "12 Beach Rd");
        details.set(ContactField::Email, "asha@example.com");
        assert!(details.is_complete());
    }

    #[test]
    fn test_field_parse() {
        assert_eq!("phoneNumber".parse::<ContactField>(), Ok(ContactField::PhoneNumber));
        assert_eq!("PHONE".parse::<ContactField>(), Ok(ContactField::PhoneNumber));
        assert_eq!("Email".parse::<ContactField>(), Ok(ContactField::Email));
        assert!("zip".parse::<ContactField>().is_err());
    }

    #[test]
    fn test_serializes_with_form_names() {
        let details = ContactDetails::new("A", "B", "C", "D");
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["phoneNumber"], "C");
        assert!(json.get("phone_number").is_none());
    }

    #[test]
    fn test_clear() {
        let mut details = ContactDetails::new("A", "B", "C", "D");
        details.clear();
        assert_eq!(details, ContactDetails::default());
        assert_eq!(details.missing_fields().len(), 4);
    }
}
