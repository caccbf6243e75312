pub mod activation_tokens;
pub mod password_reset_tokens;
pub mod users;
