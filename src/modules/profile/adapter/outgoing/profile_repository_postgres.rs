use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::user_repository_postgres::is_unique_violation;
use crate::profile::application::domain::entities::Profile;
use crate::profile::application::ports::outgoing::{
    CreateProfileData, ProfileRepository, ProfileRepositoryError, UpdateProfileData,
};

use super::sea_orm_entity::profiles::{
    ActiveModel as ProfileActiveModel, Entity as ProfileEntity, Model as ProfileModel,
};

#[derive(Debug, Clone)]
pub struct ProfileRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProfileRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> ProfileRepositoryError {
        ProfileRepositoryError::DatabaseError(e.to_string())
    }

    fn to_domain(model: ProfileModel) -> Result<Profile, ProfileRepositoryError> {
        model
            .to_domain()
            .map_err(ProfileRepositoryError::DatabaseError)
    }
}

#[async_trait]
impl ProfileRepository for ProfileRepositoryPostgres {
    async fn create_profile(
        &self,
        data: CreateProfileData,
    ) -> Result<Profile, ProfileRepositoryError> {
        let active = ProfileActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(data.user_id),
            gender: Set(data.gender.as_str().to_string()),
            date_of_birth: Set(data.date_of_birth),
            bio: Set(data.bio),
            info: Set(data.info),
            avatar: Set(data.avatar),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active.insert(&*self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                return ProfileRepositoryError::ProfileAlreadyExists;
            }
            tracing::error!(error = %e, "Failed to insert profile");
            Self::map_db_err(e)
        })?;

        Self::to_domain(inserted)
    }

    async fn update_profile(
        &self,
        profile_id: Uuid,
        data: UpdateProfileData,
    ) -> Result<Profile, ProfileRepositoryError> {
        let existing = ProfileEntity::find_by_id(profile_id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .ok_or(ProfileRepositoryError::NotFound)?;

        let mut active: ProfileActiveModel = existing.into();
        active.gender = Set(data.gender.as_str().to_string());
        active.date_of_birth = Set(data.date_of_birth);
        active.bio = Set(data.bio);
        active.info = Set(data.info);
        active.avatar = Set(data.avatar);

        let updated = active.update(&*self.db).await.map_err(Self::map_db_err)?;

        Self::to_domain(updated)
    }
}
