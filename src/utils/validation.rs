use serde::{Deserialize, Serialize};

use super::error::ValidationError;

const MIN_PASSWORD_LEN: usize = 8;

/// The sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub password: String,
    pub nickhabbo: String,
}

impl RegisterForm {
    /// Check the form locally so obviously bad sign-ups never reach the backend.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [&self.email, &self.name, &self.password, &self.nickhabbo];
        if fields.iter().any(|field| is_blank(field)) {
            return Err(ValidationError::MissingFields);
        }
        if !is_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_strong_password(&self.password) {
            return Err(ValidationError::WeakPassword);
        }
        Ok(())
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// At least 8 characters with a lowercase letter, an uppercase letter and a digit.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// A loose shape check: something before a single `@` and a dotted domain after it.
pub fn is_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str) -> RegisterForm {
        RegisterForm {
            email: "valid@x.com".to_string(),
            name: "Valentina".to_string(),
            password: password.to_string(),
            nickhabbo: "Vale".to_string(),
        }
    }

    #[test]
    fn accepts_a_strong_password() {
        assert_eq!(form("Passw0rd1").validate(), Ok(()));
    }

    #[test]
    fn rejects_weak_passwords() {
        for weak in ["short1A", "alllowercase1", "ALLUPPERCASE1", "NoDigitsHere"] {
            assert_eq!(
                form(weak).validate(),
                Err(ValidationError::WeakPassword),
                "{weak} should be weak"
            );
        }
    }

    #[test]
    fn blank_fields_come_first() {
        let mut blank_nick = form("Passw0rd1");
        blank_nick.nickhabbo = "   ".to_string();

        assert_eq!(blank_nick.validate(), Err(ValidationError::MissingFields));
        assert_eq!(
            RegisterForm::default().validate(),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn email_shape() {
        assert!(is_email("valid@x.com"));
        assert!(is_email("  a.b@club.habbo.es "));
        assert!(!is_email("nodomain@"));
        assert!(!is_email("@x.com"));
        assert!(!is_email("two@@x.com"));
        assert!(!is_email("no-at.com"));
        assert!(!is_email("dot@less"));
        assert!(!is_email("sp ace@x.com"));
    }
}
