mod create_profile;
mod get_profile;
mod update_profile;

pub use create_profile::{CreateProfileError, CreateProfileUseCase};
pub use get_profile::{GetProfileError, GetProfileUseCase, ProfileDetail, PROFILE_RECENT_POSTS};
pub use update_profile::{UpdateProfileError, UpdateProfileUseCase};
