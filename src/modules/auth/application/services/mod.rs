pub mod hash;
pub mod password;
pub mod token_issuer;

pub use token_issuer::TokenIssuer;
