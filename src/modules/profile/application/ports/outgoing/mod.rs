mod profile_query;
mod profile_repository;

pub use profile_query::{ProfileQuery, ProfileQueryError, ProfileView, RecentPost};
pub use profile_repository::{
    CreateProfileData, ProfileRepository, ProfileRepositoryError, UpdateProfileData,
};
