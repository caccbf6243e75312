use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::{Date, DateTimeWithTimeZone};
use sea_orm::{
    ColumnTrait, DatabaseBackend, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    Statement,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::profile::application::domain::entities::Profile;
use crate::profile::application::ports::outgoing::{
    ProfileQuery, ProfileQueryError, ProfileView, RecentPost,
};

use super::sea_orm_entity::profiles::{
    Column as ProfileColumn, Entity as ProfileEntity, Model as ProfileModel,
};

#[derive(Debug, FromQueryResult)]
struct ProfileWithUserRow {
    id: Uuid,
    user_id: Uuid,
    gender: String,
    date_of_birth: Date,
    bio: String,
    info: String,
    avatar: String,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
}

#[derive(Debug, FromQueryResult)]
struct RecentPostRow {
    id: Uuid,
    title: String,
    slug: String,
    image_url: String,
    publish: DateTimeWithTimeZone,
}

#[derive(Debug, Clone)]
pub struct ProfileQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProfileQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_profile(model: ProfileModel) -> Result<Profile, ProfileQueryError> {
        model.to_domain().map_err(ProfileQueryError::DatabaseError)
    }
}

#[async_trait]
impl ProfileQuery for ProfileQueryPostgres {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<ProfileView>, ProfileQueryError> {
        let row = ProfileWithUserRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"SELECT p.id, p.user_id, p.gender, p.date_of_birth, p.bio, p.info, p.avatar,
                      p.created_at, p.updated_at,
                      u.username, u.email, u.first_name, u.last_name
               FROM profiles p
               JOIN users u ON u.id = p.user_id
               WHERE u.username = $1"#,
            [username.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| ProfileQueryError::DatabaseError(e.to_string()))?;

        row.map(|r| {
            let profile = Self::to_profile(ProfileModel {
                id: r.id,
                user_id: r.user_id,
                gender: r.gender,
                date_of_birth: r.date_of_birth,
                bio: r.bio,
                info: r.info,
                avatar: r.avatar,
                created_at: r.created_at,
                updated_at: r.updated_at,
            })?;

            Ok(ProfileView {
                profile,
                username: r.username,
                first_name: r.first_name,
                last_name: r.last_name,
                email: r.email,
            })
        })
        .transpose()
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, ProfileQueryError> {
        ProfileEntity::find()
            .filter(ProfileColumn::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(|e| ProfileQueryError::DatabaseError(e.to_string()))?
            .map(Self::to_profile)
            .transpose()
    }

    async fn latest_published_posts(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<RecentPost>, ProfileQueryError> {
        let rows = RecentPostRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"SELECT id, title, slug, image_url, publish
               FROM posts
               WHERE author_id = $1 AND status = 'published'
               ORDER BY publish DESC, created_at DESC
               LIMIT $2"#,
            [user_id.into(), (limit as i64).into()],
        ))
        .all(&*self.db)
        .await
        .map_err(|e| ProfileQueryError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| RecentPost {
                id: r.id,
                title: r.title,
                slug: r.slug,
                image_url: r.image_url,
                publish: r.publish.with_timezone(&Utc),
            })
            .collect())
    }
}
