use crate::{EngineError, ResultEngine, User, UserId};

use super::{Book, normalize_required_name};

fn normalize_email(value: &str) -> ResultEngine<String> {
    let email = value.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(EngineError::InvalidEmail(format!("\"{}\"", value.trim()))),
    }
}

impl Book {
    /// Registers a user under a display name. Emails are unique, compared
    /// case-insensitively.
    pub fn register_user(&mut self, name: &str, email: &str) -> ResultEngine<UserId> {
        let name = normalize_required_name(name, "user")?;
        let email = normalize_email(email)?;
        if self.users.values().any(|user| user.email == email) {
            return Err(EngineError::ExistingKey("email already in use".to_string()));
        }

        let id = UserId::new();
        self.users.insert(id, User { id, name, email });
        tracing::debug!(user = %id, "registered user");
        Ok(id)
    }

    pub fn user(&self, user_id: UserId) -> ResultEngine<&User> {
        self.require_user(user_id)
    }

    /// Every user, ordered by name then id.
    pub fn users(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        users
    }

    pub fn rename_user(&mut self, user_id: UserId, name: &str) -> ResultEngine<()> {
        let name = normalize_required_name(name, "user")?;
        self.require_user_mut(user_id)?.name = name;
        tracing::debug!(user = %user_id, "renamed user");
        Ok(())
    }
}
