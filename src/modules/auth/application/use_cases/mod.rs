pub mod activate_account;
pub mod create_user;
pub mod login_user;
pub mod logout_user;
pub mod request_password_reset;
pub mod request_reactivation;
pub mod reset_password;
