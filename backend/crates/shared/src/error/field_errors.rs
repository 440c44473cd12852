//! Field Errors - Field-scoped validation error accumulation
//!
//! Validation failures are reported per input field, accumulated across
//! fields rather than short-circuiting on the first bad field. Serializes
//! to the `{"field": ["message", ...]}` wire shape.

use std::collections::BTreeMap;

use serde::Serialize;

/// Accumulator for field-keyed validation errors
///
/// Each field carries the messages of its failed checks, in the order the
/// checks ran. A field with no failed checks has no entry.
///
/// ## Examples
/// ```rust
/// use kernel::error::field_errors::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.add("email", "Enter a valid email address.");
/// assert!(!errors.is_empty());
/// assert_eq!(errors.messages("email"), &["Enter a valid email address."]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed check for `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Whether `field` already has a recorded failure
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for `field` (empty slice when the field is clean)
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when no field has a recorded failure
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one failure
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, messages)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let errors = FieldErrors::new();
        assert!(errors.is_empty());
        assert_eq!(errors.len(), 0);
        assert!(!errors.has("email"));
        assert!(errors.messages("email").is_empty());
    }

    #[test]
    fn test_accumulates_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("password", "first");
        errors.add("password", "second");
        errors.add("email", "bad address");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.messages("password"), &["first", "second"]);
        assert_eq!(errors.messages("email"), &["bad address"]);
    }

    #[test]
    fn test_serializes_to_field_map() {
        let mut errors = FieldErrors::new();
        errors.add("confirm_password", "Password do not match");

        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"confirm_password":["Password do not match"]}"#);
    }

    #[test]
    fn test_display_joins_entries() {
        let mut errors = FieldErrors::new();
        errors.add("email", "Enter a valid email address.");
        errors.add("first_name", "This field is required.");

        let rendered = errors.to_string();
        assert!(rendered.contains("email: Enter a valid email address."));
        assert!(rendered.contains("first_name: This field is required."));
    }
}
