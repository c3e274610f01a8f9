//! Contact form acknowledgment.
//!
//! Only the visitor's name is captured. The storefront does not forward or
//! store the message; it thanks the visitor and clears the form.

use thiserror::Error;

/// Why a contact submission was not acknowledged.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please tell us your name.")]
    MissingName,
}

/// A thank-you for a contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAck {
    name: String,
}

impl ContactAck {
    /// Acknowledge a submission from `name` (trimmed).
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::MissingName`] if the name is blank.
    pub fn new(name: &str) -> Result<Self, ContactError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ContactError::MissingName);
        }
        Ok(Self {
            name: name.to_owned(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Feedback line shown under the form.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Thanks, {}! We'll reach out shortly.", self.name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledges_trimmed_name() {
        let ack = ContactAck::new("  Ada Lovelace ").unwrap();
        assert_eq!(ack.name(), "Ada Lovelace");
        assert_eq!(ack.message(), "Thanks, Ada Lovelace! We'll reach out shortly.");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert_eq!(ContactAck::new(""), Err(ContactError::MissingName));
        assert_eq!(ContactAck::new(" \t "), Err(ContactError::MissingName));
        assert_eq!(
            ContactError::MissingName.to_string(),
            "Please tell us your name."
        );
    }
}
