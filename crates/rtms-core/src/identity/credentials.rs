use serde::{Deserialize, Serialize};
use std::fmt;

use super::Role;
use crate::error::{Result, RtmsError};

/// Payload of the login form.
///
/// `user_type` is the tab the user picked (student or staff); the backend
/// decides the actual role of the returned identity.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
    pub user_type: Role,
    #[serde(default)]
    pub remember_me: bool,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("user_type", &self.user_type)
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>, user_type: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            user_type,
            remember_me: false,
        }
    }

    pub fn with_remember_me(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    /// Form-level checks performed before anything goes over the wire.
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(RtmsError::validation("Email is required"));
        }
        if !self.email.contains('@') {
            return Err(RtmsError::validation("Please enter a valid email address"));
        }
        if self.password.is_empty() {
            return Err(RtmsError::validation("Password is required"));
        }
        if self.user_type == Role::Anonymous {
            return Err(RtmsError::validation("Please choose student or staff login"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_validate_ok() {
        let creds = LoginCredentials::new("a@b.edu", "secret", Role::Student);
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let err = LoginCredentials::new("", "secret", Role::Student)
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = LoginCredentials::new("a@b.edu", "", Role::Staff)
            .validate()
            .unwrap_err();
        assert_eq!(err.user_message(), "Password is required");
    }

    #[test]
    fn test_serializes_camel_case() {
        let creds = LoginCredentials::new("a@b.edu", "pw", Role::Staff).with_remember_me(true);
        let value = serde_json::to_value(&creds).unwrap();
        assert_eq!(value["userType"], "staff");
        assert_eq!(value["rememberMe"], true);
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = LoginCredentials::new("a@b.edu", "hunter2", Role::Student);
        let debug = format!("{:?}", creds);
        assert!(debug.contains("a@b.edu"));
        assert!(!debug.contains("hunter2"));
    }
}
