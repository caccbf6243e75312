use rand::{distributions::Alphanumeric, Rng};

use crate::auth::application::domain::entities::ACCOUNT_TOKEN_LENGTH;
use crate::auth::application::ports::outgoing::TokenGenerator;

/// Alphanumeric values drawn from the thread-local CSPRNG.
#[derive(Debug, Clone, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ACCOUNT_TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generates_32_alphanumeric_chars() {
        let value = RandomTokenGenerator.generate();

        assert_eq!(value.len(), 32);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_values_do_not_repeat() {
        let generator = RandomTokenGenerator;
        let values: HashSet<String> = (0..200).map(|_| generator.generate()).collect();
        assert_eq!(values.len(), 200);
    }
}
