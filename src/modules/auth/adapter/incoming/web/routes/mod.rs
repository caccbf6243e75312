mod activate_account;
mod login_user;
mod logout_user;
mod register_user;
mod request_password_reset;
mod request_reactivation;
mod reset_password;

pub use activate_account::*;
pub use login_user::*;
pub use logout_user::*;
pub use register_user::*;
pub use request_password_reset::*;
pub use request_reactivation::*;
pub use reset_password::*;
