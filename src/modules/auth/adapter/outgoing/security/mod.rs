pub mod argon2_hasher;
pub mod random_token_generator;
