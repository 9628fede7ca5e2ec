//! Credential checks for session login.

use std::collections::HashMap;

/// Decides whether a username/secret pair may open a session.
pub trait Authenticator {
    fn verify(&self, username: &str, secret: &str) -> bool;
}

/// Fixed in-memory accounts.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthenticator {
    users: HashMap<String, String>,
}

impl StaticAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The classroom demo accounts.
    pub fn demo() -> Self {
        Self::new()
            .with_user("student1", "pass123")
            .with_user("student2", "eco456")
            .with_user("guest", "guest123")
    }

    pub fn with_user(mut self, username: &str, secret: &str) -> Self {
        self.users.insert(username.to_string(), secret.to_string());
        self
    }

    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.users.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Authenticator for StaticAuthenticator {
    fn verify(&self, username: &str, secret: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_accounts() {
        let auth = StaticAuthenticator::demo();
        assert!(auth.verify("student1", "pass123"));
        assert!(auth.verify("guest", "guest123"));
        assert!(!auth.verify("student1", "eco456"));
        assert!(!auth.verify("nobody", "pass123"));
        assert_eq!(auth.usernames(), vec!["guest", "student1", "student2"]);
    }
}
