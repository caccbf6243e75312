mod create_profile;
mod get_profile;
mod profile_request;
mod update_profile;

pub use create_profile::*;
pub use get_profile::*;
pub use profile_request::ProfileRequest;
pub use update_profile::*;

