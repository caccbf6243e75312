pub mod account_token_repository;
pub mod password_hasher;
pub mod token_blacklist_repository;
pub mod token_generator;
pub mod token_provider;
pub mod user_query;
pub mod user_repository;

pub use account_token_repository::{AccountTokenRepository, AccountTokenRepositoryError};
pub use password_hasher::{HashError, PasswordHasher};
pub use token_blacklist_repository::{TokenBlacklistError, TokenBlacklistRepository};
pub use token_generator::TokenGenerator;
pub use token_provider::{TokenProvider, TokenError};
pub use user_query::{UserQuery, UserQueryError};
pub use user_repository::{UserRepository, UserRepositoryError};
