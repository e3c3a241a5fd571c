use crate::domain::errors::DomainError;

/// bcrypt with a configurable work factor. Tests use a low cost.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plain: &str) -> Result<String, DomainError> {
        bcrypt::hash(plain, self.cost)
            .map_err(|e| DomainError::Internal(format!("password hashing failed: {}", e)))
    }

    /// A malformed stored hash counts as a mismatch.
    pub fn verify(&self, plain: &str, hash: &str) -> bool {
        match bcrypt::verify(plain, hash) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("stored password hash could not be checked: {}", e);
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("testpassword").unwrap();

        assert_ne!(hash, "testpassword");
        assert!(hasher.verify("testpassword", &hash));
        assert!(!hasher.verify("wrongpassword", &hash));
    }

    #[test]
    fn garbage_hash_never_matches() {
        assert!(!PasswordHasher::new(4).verify("anything", "not-a-bcrypt-hash"));
    }
}
