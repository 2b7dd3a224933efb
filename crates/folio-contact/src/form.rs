//! Contact form fields and validation

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Minimum message length, counted in characters after trimming
pub const MESSAGE_MIN_CHARS: usize = 10;

/// A form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Sender name
    Name,
    /// Sender email
    Email,
    /// Message subject
    Subject,
    /// Message body
    Message,
}

impl Field {
    /// Field name as submitted
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Translation key of the field's label
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Name => "contact.modal.form.name",
            Self::Email => "contact.modal.form.email",
            Self::Subject => "contact.modal.form.subject",
            Self::Message => "contact.modal.form.message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures keyed by field; each value is a translation key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl FieldErrors {
    fn insert(&mut self, field: Field, key: &'static str) {
        self.errors.insert(field, key);
    }

    /// Translation key of the error on `field`
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Fields with an error, in form order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    /// `(field, translation key)` pairs in form order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(field, key)| (*field, *key))
    }

    /// Drop the error on `field`
    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    /// Number of fields with an error
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether every field validated
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Resolve every key through `translate`
    pub fn translate<F>(&self, translate: F) -> BTreeMap<Field, String>
    where
        F: Fn(&str) -> String,
    {
        self.iter().map(|(field, key)| (field, translate(key))).collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, key) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {key}")?;
            first = false;
        }
        Ok(())
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside the domain
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex pattern")
});

/// Whether `email` has the shape accepted by the contact form
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// The contact form as the visitor filled it in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Message subject
    pub subject: String,
    /// Message body
    pub message: String,
}

impl ContactForm {
    /// Build a filled-in form
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Current value of `field`
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Replace the value of `field`
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Empty every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check every field, reporting all failures at once
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.insert(Field::Name, "contact.modal.validation.nameRequired");
        }

        if self.email.trim().is_empty() {
            errors.insert(Field::Email, "contact.modal.validation.emailRequired");
        } else if !is_valid_email(&self.email) {
            errors.insert(Field::Email, "contact.modal.validation.emailInvalid");
        }

        if self.subject.trim().is_empty() {
            errors.insert(Field::Subject, "contact.modal.validation.subjectRequired");
        }

        let message = self.message.trim();
        if message.is_empty() {
            errors.insert(Field::Message, "contact.modal.validation.messageRequired");
        } else if message.chars().count() < MESSAGE_MIN_CHARS {
            errors.insert(Field::Message, "contact.modal.validation.messageMinLength");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactForm {
        ContactForm::new("Ana", "ana@example.com", "Hola", "Me gustaría hablar de un proyecto")
    }

    #[test]
    fn test_valid_form() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_empty_form_reports_required_keys() {
        let errors = ContactForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(Field::Name), Some("contact.modal.validation.nameRequired"));
        assert_eq!(errors.get(Field::Email), Some("contact.modal.validation.emailRequired"));
        assert_eq!(errors.get(Field::Subject), Some("contact.modal.validation.subjectRequired"));
        assert_eq!(errors.get(Field::Message), Some("contact.modal.validation.messageRequired"));
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let mut form = valid();
        form.set(Field::Name, "   ");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Name]);
    }

    #[test]
    fn test_message_length_is_trimmed_chars() {
        let mut form = valid();
        form.set(Field::Message, "   corto   ");
        assert_eq!(
            form.validate().unwrap_err().get(Field::Message),
            Some("contact.modal.validation.messageMinLength")
        );

        form.set(Field::Message, "ñandú ñandú");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email(" a@b.co"));
        assert!(is_valid_email("josé@correo.com.ar"));
    }

    #[test]
    fn test_invalid_email_key() {
        let mut form = valid();
        form.set(Field::Email, "ana@example");
        assert_eq!(
            form.validate().unwrap_err().get(Field::Email),
            Some("contact.modal.validation.emailInvalid")
        );
    }

    #[test]
    fn test_translate_and_display() {
        let errors = ContactForm::new("", "x@y.z", "s", "long enough message").validate().unwrap_err();
        let translated = errors.translate(|key| key.rsplit('.').next().unwrap_or(key).to_uppercase());
        assert_eq!(translated.get(&Field::Name).map(String::as_str), Some("NAMEREQUIRED"));
        assert_eq!(errors.to_string(), "name: contact.modal.validation.nameRequired");
    }
}
