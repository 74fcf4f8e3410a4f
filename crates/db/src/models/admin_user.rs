use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// Back-office account. The password column holds a bcrypt hash and is never
/// serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminUser {
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as!(
            AdminUser,
            r#"SELECT id         AS "id!: Uuid",
                      username   AS "username!: String",
                      password   AS "password!: String",
                      created_at AS "created_at!: DateTime<Utc>",
                      updated_at AS "updated_at!: DateTime<Utc>"
               FROM admin_users
               WHERE username = $1"#,
            username
        )
        .fetch_optional(pool)
        .await
    }

    /// Creates the account if the username is free. An existing account keeps
    /// its password.
    pub async fn upsert(
        pool: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query!(
            r#"INSERT INTO admin_users (id, username, password)
               VALUES ($1, $2, $3)
               ON CONFLICT(username) DO NOTHING"#,
            id,
            username,
            password_hash
        )
        .execute(pool)
        .await?;

        Self::find_by_username(pool, username)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DBService;

    #[tokio::test]
    async fn test_upsert_keeps_existing_password() {
        let db = DBService::new_in_memory().await.unwrap();
        let first = AdminUser::upsert(&db.pool, "admin", "hash-1").await.unwrap();
        let second = AdminUser::upsert(&db.pool, "admin", "hash-2").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.password, "hash-1");
        assert!(AdminUser::find_by_username(&db.pool, "nobody").await.unwrap().is_none());
    }

    #[test]
    fn test_password_is_not_serialized() {
        let user = AdminUser {
            id: Uuid::new_v4(),
            username: "admin".into(),
            password: "secret-hash".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "admin");
    }
}
