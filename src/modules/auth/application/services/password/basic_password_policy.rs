use crate::auth::application::ports::incoming::password_policy::{
    PasswordPolicy, PasswordPolicyError,
};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

pub struct BasicPasswordPolicy;

impl PasswordPolicy for BasicPasswordPolicy {
    fn validate(&self, password: &str) -> Result<(), PasswordPolicyError> {
        let length = password.chars().count();

        if length < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort(MIN_PASSWORD_LENGTH));
        }

        if length > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong(MAX_PASSWORD_LENGTH));
        }

        if password.chars().all(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::EntirelyNumeric);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_reasonable_password() {
        assert!(BasicPasswordPolicy.validate("correct horse").is_ok());
    }

    #[test]
    fn test_rejects_short_password() {
        assert_eq!(
            BasicPasswordPolicy.validate("abc12"),
            Err(PasswordPolicyError::TooShort(MIN_PASSWORD_LENGTH))
        );
    }

    #[test]
    fn test_rejects_long_password() {
        let long = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        assert_eq!(
            BasicPasswordPolicy.validate(&long),
            Err(PasswordPolicyError::TooLong(MAX_PASSWORD_LENGTH))
        );
    }

    #[test]
    fn test_rejects_numeric_password() {
        assert_eq!(
            BasicPasswordPolicy.validate("1234567890"),
            Err(PasswordPolicyError::EntirelyNumeric)
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 8 multi-byte characters
        assert!(BasicPasswordPolicy.validate("ééééééé1").is_ok());
    }
}
