use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    DatabaseBackend, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, Statement, Value,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::blog::application::domain::entities::{Post, PostView};
use crate::blog::application::domain::search::PostFilter;
use crate::blog::application::ports::outgoing::{PostQuery, PostQueryError};

use super::sea_orm_entity::posts::{Entity as PostEntity, Model as PostModel};

const POST_VIEW_COLUMNS: &str = "p.id, p.author_id, p.category_id, p.title, p.slug, p.body, \
     p.image_url, p.status, p.publish, p.created_at, p.updated_at, \
     u.username AS author_username, c.name AS category_name, c.slug AS category_slug";

const POST_VIEW_JOINS: &str = "FROM posts p \
     JOIN users u ON u.id = p.author_id \
     JOIN categories c ON c.id = p.category_id";

#[derive(Debug, FromQueryResult)]
struct PostViewRow {
    id: Uuid,
    author_id: Uuid,
    category_id: Uuid,
    title: String,
    slug: String,
    body: String,
    image_url: String,
    status: String,
    publish: DateTimeWithTimeZone,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    author_username: String,
    category_name: String,
    category_slug: String,
}

impl PostViewRow {
    fn into_view(self) -> Result<PostView, PostQueryError> {
        let post = PostModel {
            id: self.id,
            author_id: self.author_id,
            category_id: self.category_id,
            title: self.title,
            slug: self.slug,
            body: self.body,
            image_url: self.image_url,
            status: self.status,
            publish: self.publish,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .to_domain()
        .map_err(PostQueryError::DatabaseError)?;

        Ok(PostView {
            post,
            author_username: self.author_username,
            category_name: self.category_name,
            category_slug: self.category_slug,
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct ExistsRow {
    taken: bool,
}

/// Start of `day` in UTC; publish dates are compared on the UTC calendar.
fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Escapes LIKE metacharacters and wraps the needle in `%`.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// WHERE clause over the `p`/`u`/`c` joins plus its positional values.
fn filter_clause(filter: &PostFilter) -> (String, Vec<Value>) {
    let mut clauses = vec!["p.status = 'published'".to_string()];
    let mut values: Vec<Value> = Vec::new();

    let mut bind = |value: Value| {
        values.push(value);
        values.len()
    };

    if let Some(slug) = &filter.category_slug {
        clauses.push(format!("c.slug = ${}", bind(slug.clone().into())));
    }
    if let Some(username) = &filter.author_username {
        clauses.push(format!("u.username = ${}", bind(username.clone().into())));
    }
    if let Some(title) = &filter.title {
        clauses.push(format!("p.title ILIKE ${}", bind(like_pattern(title).into())));
    }
    if let Some(text) = &filter.text {
        let n = bind(like_pattern(text).into());
        clauses.push(format!("(p.title ILIKE ${n} OR p.body ILIKE ${n})"));
    }
    if let Some(date) = &filter.date {
        let (start, end) = date.range();
        let from = bind(day_start(start).into());
        let to = bind(day_start(end).into());
        clauses.push(format!("p.publish >= ${from} AND p.publish < ${to}"));
    }

    (format!("WHERE {}", clauses.join(" AND ")), values)
}

#[derive(Debug, Clone)]
pub struct PostQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PostQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> PostQueryError {
        PostQueryError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl PostQuery for PostQueryPostgres {
    async fn count_published(&self, filter: &PostFilter) -> Result<u64, PostQueryError> {
        let (clause, values) = filter_clause(filter);
        let sql = format!("SELECT COUNT(*) AS count {POST_VIEW_JOINS} {clause}");

        let row = CountRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            values,
        ))
        .one(&*self.db)
        .await
        .map_err(Self::map_db_err)?;

        Ok(row.map_or(0, |r| r.count.max(0) as u64))
    }

    async fn list_published(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<PostView>, PostQueryError> {
        let (clause, mut values) = filter_clause(filter);
        let limit_at = values.len() + 1;
        values.push((limit as i64).into());
        values.push((offset as i64).into());

        let sql = format!(
            "SELECT {POST_VIEW_COLUMNS} {POST_VIEW_JOINS} {clause} \
             ORDER BY p.publish DESC, p.created_at DESC \
             LIMIT ${limit_at} OFFSET ${}",
            limit_at + 1
        );

        PostViewRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            values,
        ))
        .all(&*self.db)
        .await
        .map_err(Self::map_db_err)?
        .into_iter()
        .map(PostViewRow::into_view)
        .collect()
    }

    async fn find_published(
        &self,
        publish_date: NaiveDate,
        slug: &str,
    ) -> Result<Option<PostView>, PostQueryError> {
        let next_day = publish_date.succ_opt().unwrap_or(NaiveDate::MAX);
        let sql = format!(
            "SELECT {POST_VIEW_COLUMNS} {POST_VIEW_JOINS} \
             WHERE p.status = 'published' AND p.slug = $1 \
             AND p.publish >= $2 AND p.publish < $3"
        );

        PostViewRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            [
                slug.into(),
                day_start(publish_date).into(),
                day_start(next_day).into(),
            ],
        ))
        .one(&*self.db)
        .await
        .map_err(Self::map_db_err)?
        .map(PostViewRow::into_view)
        .transpose()
    }

    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<Post>, PostQueryError> {
        PostEntity::find_by_id(post_id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .map(|m| m.to_domain().map_err(PostQueryError::DatabaseError))
            .transpose()
    }

    async fn slug_taken(
        &self,
        slug: &str,
        publish_date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<bool, PostQueryError> {
        let next_day = publish_date.succ_opt().unwrap_or(NaiveDate::MAX);
        let mut values: Vec<Value> = vec![
            slug.into(),
            day_start(publish_date).into(),
            day_start(next_day).into(),
        ];
        let mut sql = "SELECT EXISTS (SELECT 1 FROM posts \
             WHERE slug = $1 AND publish >= $2 AND publish < $3"
            .to_string();
        if let Some(id) = exclude {
            values.push(id.into());
            sql.push_str(" AND id <> $4");
        }
        sql.push_str(") AS taken");

        let row = ExistsRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            values,
        ))
        .one(&*self.db)
        .await
        .map_err(Self::map_db_err)?;

        Ok(row.is_some_and(|r| r.taken))
    }
}
