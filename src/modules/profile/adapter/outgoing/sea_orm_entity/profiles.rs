use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::profile::application::domain::entities::{Gender, Profile};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub gender: String,
    pub date_of_birth: Date,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub info: String,
    pub avatar: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    #[cfg(feature = "no_db_triggers")]
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(chrono::Utc::now().into());
        }
        Ok(self)
    }
}

impl Model {
    /// Fails only if the stored gender is outside the check constraint.
    pub fn to_domain(self) -> Result<Profile, String> {
        let gender = Gender::parse(&self.gender)
            .ok_or_else(|| format!("unknown gender '{}' on profile {}", self.gender, self.id))?;

        Ok(Profile {
            id: self.id,
            user_id: self.user_id,
            gender,
            date_of_birth: self.date_of_birth,
            bio: self.bio,
            info: self.info,
            avatar: self.avatar,
            created_at: self.created_at.with_timezone(&chrono::Utc),
            updated_at: self.updated_at.with_timezone(&chrono::Utc),
        })
    }
}
