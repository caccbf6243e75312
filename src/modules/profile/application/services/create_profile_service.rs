use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::UserQuery;
use crate::profile::application::domain::entities::{Profile, ProfileFields};
use crate::profile::application::ports::{
    incoming::use_cases::{CreateProfileError, CreateProfileUseCase},
    outgoing::{CreateProfileData, ProfileQuery, ProfileRepository, ProfileRepositoryError},
};

pub struct CreateProfileService<R, P, U>
where
    R: ProfileRepository,
    P: ProfileQuery,
    U: UserQuery,
{
    repository: R,
    query: P,
    users: U,
}

impl<R, P, U> CreateProfileService<R, P, U>
where
    R: ProfileRepository,
    P: ProfileQuery,
    U: UserQuery,
{
    pub fn new(repository: R, query: P, users: U) -> Self {
        Self {
            repository,
            query,
            users,
        }
    }
}

#[async_trait]
impl<R, P, U> CreateProfileUseCase for CreateProfileService<R, P, U>
where
    R: ProfileRepository + Send + Sync,
    P: ProfileQuery + Send + Sync,
    U: UserQuery + Send + Sync,
{
    async fn execute(
        &self,
        user_id: Uuid,
        fields: ProfileFields,
    ) -> Result<Profile, CreateProfileError> {
        fields.validate(Utc::now().date_naive())?;

        let existing = self
            .query
            .find_by_user_id(user_id)
            .await
            .map_err(|e| CreateProfileError::RepositoryError(e.to_string()))?;
        if existing.is_some() {
            return Err(CreateProfileError::ProfileAlreadyExists);
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| CreateProfileError::RepositoryError(e.to_string()))?
            .ok_or(CreateProfileError::UserNotFound)?;

        let data = CreateProfileData {
            user_id,
            gender: fields.gender,
            date_of_birth: fields.date_of_birth,
            avatar: fields.resolved_avatar(&user.email),
            bio: fields.bio,
            info: fields.info,
        };

        let profile = self
            .repository
            .create_profile(data)
            .await
            .map_err(|e| match e {
                ProfileRepositoryError::ProfileAlreadyExists => {
                    CreateProfileError::ProfileAlreadyExists
                }
                other => CreateProfileError::RepositoryError(other.to_string()),
            })?;

        info!(user_id = %user_id, profile_id = %profile.id, "Profile created");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::application::domain::entities::{gravatar_url, Gender};
    use crate::profile::application::ports::outgoing::{
        ProfileQueryError, ProfileView, RecentPost, UpdateProfileData,
    };
    use crate::tests::support::fakes::{sample_user, InMemoryUserStore};
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    // ──────────────────────────────────────────────────────────
    // Mocks
    // ──────────────────────────────────────────────────────────

    #[derive(Clone, Default)]
    struct RecordingRepo {
        created: Arc<Mutex<Vec<CreateProfileData>>>,
        conflict: bool,
    }

    #[async_trait]
    impl ProfileRepository for RecordingRepo {
        async fn create_profile(
            &self,
            data: CreateProfileData,
        ) -> Result<Profile, ProfileRepositoryError> {
            if self.conflict {
                return Err(ProfileRepositoryError::ProfileAlreadyExists);
            }
            self.created.lock().unwrap().push(data.clone());
            Ok(Profile {
                id: Uuid::new_v4(),
                user_id: data.user_id,
                gender: data.gender,
                date_of_birth: data.date_of_birth,
                bio: data.bio,
                info: data.info,
                avatar: data.avatar,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        }

        async fn update_profile(
            &self,
            _profile_id: Uuid,
            _data: UpdateProfileData,
        ) -> Result<Profile, ProfileRepositoryError> {
            unimplemented!("not used in create_profile tests")
        }
    }

    #[derive(Clone)]
    struct StubQuery {
        existing: Option<Profile>,
    }

    #[async_trait]
    impl ProfileQuery for StubQuery {
        async fn find_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<ProfileView>, ProfileQueryError> {
            unimplemented!("not used in create_profile tests")
        }

        async fn find_by_user_id(
            &self,
            _user_id: Uuid,
        ) -> Result<Option<Profile>, ProfileQueryError> {
            Ok(self.existing.clone())
        }

        async fn latest_published_posts(
            &self,
            _user_id: Uuid,
            _limit: u64,
        ) -> Result<Vec<RecentPost>, ProfileQueryError> {
            unimplemented!("not used in create_profile tests")
        }
    }

    fn fields(avatar: Option<&str>) -> ProfileFields {
        ProfileFields {
            gender: Gender::Male,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            bio: "Backend developer".to_string(),
            info: "Rust and tea".to_string(),
            avatar: avatar.map(str::to_string),
        }
    }

    // ──────────────────────────────────────────────────────────
    // Tests
    // ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_profile_derives_gravatar() {
        let user = sample_user("alice", "alice@example.com", true);
        let user_id = user.id;
        let repo = RecordingRepo::default();
        let service = CreateProfileService::new(
            repo.clone(),
            StubQuery { existing: None },
            InMemoryUserStore::with_user(user),
        );

        let profile = service.execute(user_id, fields(None)).await.unwrap();

        assert_eq!(profile.user_id, user_id);
        assert_eq!(profile.avatar, gravatar_url("alice@example.com"));
        assert_eq!(repo.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_profile_keeps_supplied_avatar() {
        let user = sample_user("alice", "alice@example.com", true);
        let user_id = user.id;
        let service = CreateProfileService::new(
            RecordingRepo::default(),
            StubQuery { existing: None },
            InMemoryUserStore::with_user(user),
        );

        let profile = service
            .execute(user_id, fields(Some("https://img.example.com/a.png")))
            .await
            .unwrap();

        assert_eq!(profile.avatar, "https://img.example.com/a.png");
    }

    #[tokio::test]
    async fn test_second_profile_is_rejected() {
        let user = sample_user("alice", "alice@example.com", true);
        let user_id = user.id;
        let repo = RecordingRepo::default();
        let existing = repo
            .create_profile(CreateProfileData {
                user_id,
                gender: Gender::Male,
                date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
                bio: String::new(),
                info: String::new(),
                avatar: String::new(),
            })
            .await
            .unwrap();

        let service = CreateProfileService::new(
            repo.clone(),
            StubQuery {
                existing: Some(existing),
            },
            InMemoryUserStore::with_user(user),
        );

        let err = service.execute(user_id, fields(None)).await.unwrap_err();
        assert_eq!(err, CreateProfileError::ProfileAlreadyExists);
        assert_eq!(repo.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_race_maps_to_already_exists() {
        let user = sample_user("alice", "alice@example.com", true);
        let user_id = user.id;
        let service = CreateProfileService::new(
            RecordingRepo {
                conflict: true,
                ..RecordingRepo::default()
            },
            StubQuery { existing: None },
            InMemoryUserStore::with_user(user),
        );

        let err = service.execute(user_id, fields(None)).await.unwrap_err();
        assert_eq!(err, CreateProfileError::ProfileAlreadyExists);
    }

    #[tokio::test]
    async fn test_underage_birth_date_is_rejected() {
        let user = sample_user("alice", "alice@example.com", true);
        let user_id = user.id;
        let service = CreateProfileService::new(
            RecordingRepo::default(),
            StubQuery { existing: None },
            InMemoryUserStore::with_user(user),
        );

        let mut input = fields(None);
        input.date_of_birth = Utc::now().date_naive();

        let err = service.execute(user_id, input).await.unwrap_err();
        assert!(matches!(err, CreateProfileError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let service = CreateProfileService::new(
            RecordingRepo::default(),
            StubQuery { existing: None },
            InMemoryUserStore::default(),
        );

        let err = service
            .execute(Uuid::new_v4(), fields(None))
            .await
            .unwrap_err();
        assert_eq!(err, CreateProfileError::UserNotFound);
    }
}
