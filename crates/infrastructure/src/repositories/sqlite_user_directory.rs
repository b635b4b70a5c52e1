use crate::database::{run_blocking, users, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use domain::{DomainError, User, UserDirectory, UserId};
use std::collections::HashMap;

// Stay well under SQLite's bound-parameter limit
const BATCH_CHUNK_SIZE: usize = 500;

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct UserModel {
    id: String,
    username: String,
    profile_pic_url: Option<String>,
}

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let id: UserId = model.id.parse().map_err(|e| {
            DomainError::RepositoryError(format!("Corrupt user id {}: {}", model.id, e))
        })?;

        Ok(User {
            id,
            username: model.username,
            profile_pic_url: model.profile_pic_url,
        })
    }
}

impl From<&User> for UserModel {
    fn from(user: &User) -> Self {
        UserModel {
            id: user.id.to_string(),
            username: user.username.clone(),
            profile_pic_url: user.profile_pic_url.clone(),
        }
    }
}

/// User directory backed by the `users` table.
///
/// Users are written by the identity subsystem; `upsert_user` exists for
/// seeding and tests.
pub struct SqliteUserDirectory {
    pool: SqlitePool,
}

impl SqliteUserDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn upsert_user(&self, user: &User) -> Result<User, DomainError> {
        let model = UserModel::from(user);
        run_blocking(&self.pool, move |conn| {
            diesel::replace_into(users::table)
                .values(&model)
                .execute(conn)
        })
        .await?;

        Ok(user.clone())
    }
}

#[async_trait]
impl UserDirectory for SqliteUserDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let id = id.to_string();
        let result = run_blocking(&self.pool, move |conn| {
            users::table
                .filter(users::id.eq(id))
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
                .optional()
        })
        .await?;

        result.map(User::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<HashMap<UserId, User>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        let result = run_blocking(&self.pool, move |conn| {
            let mut models = Vec::with_capacity(keys.len());
            for chunk in keys.chunks(BATCH_CHUNK_SIZE) {
                let mut found = users::table
                    .filter(users::id.eq_any(chunk))
                    .select(UserModel::as_select())
                    .load::<UserModel>(conn)?;
                models.append(&mut found);
            }
            Ok(models)
        })
        .await?;

        result
            .into_iter()
            .map(|model| User::try_from(model).map(|user| (user.id, user)))
            .collect()
    }
}
