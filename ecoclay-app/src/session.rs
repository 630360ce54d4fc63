//! # Session
//! The single current-user slot. This is a login *simulation*: the caller
//! hands over an email, the display name is derived from its local part, and
//! nothing is verified. A production build replaces this with a real identity
//! provider; nothing here is a security contract.

use crate::EcoClay;
use crate::error::AppError;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub email: String,
    pub full_name: String,
}

impl EcoClay {
    /// The signed-in user, or `None`.
    pub fn me(&self) -> Option<User> {
        self.session.load()
    }

    pub fn login(&self, email: &str) -> Result<User, AppError> {
        let email = email.trim();
        let full_name = match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => local.to_string(),
            _ => return Err(AppError::InvalidEmail(email.to_string())),
        };

        let user = User {
            email: email.to_string(),
            full_name,
        };
        self.session.save(&user)?;
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), AppError> {
        self.session.clear()?;
        Ok(())
    }

    pub(crate) fn require_user(&self) -> Result<User, AppError> {
        self.me().ok_or(AppError::NotSignedIn)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use claystore::MemoryStorage;

    use super::*;

    fn app() -> EcoClay {
        EcoClay::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn login_derives_the_display_name_and_sticks() {
        let app = app();
        assert!(app.me().is_none());

        let user = app.login("ana@example.com").unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.full_name, "ana");

        assert_eq!(app.me(), Some(user));

        app.logout().unwrap();
        assert!(app.me().is_none());
    }

    #[test]
    fn login_trims_surrounding_whitespace() {
        let app = app();
        let user = app.login("  ana@example.com  ").unwrap();
        assert_eq!(user.email, "ana@example.com");
    }

    #[test]
    fn unusable_input_is_rejected() {
        let app = app();
        for bad in ["", "   ", "no-at-sign", "@example.com", "ana@"] {
            assert!(matches!(app.login(bad), Err(AppError::InvalidEmail(_))));
        }
        assert!(app.me().is_none());
    }
}
