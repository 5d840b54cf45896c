use regex::Regex;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::core::error::{self, Error};
use crate::types::user::User;

#[derive(Clone)]
pub(crate) struct UserController {
    pool: PgPool,
    email_pattern: Regex,
}

impl std::fmt::Debug for UserController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController")
            .field("email_pattern", &self.email_pattern.as_str())
            .finish()
    }
}

impl UserController {
    pub(crate) fn new(pool: PgPool) -> Result<Self, error::ConfigError> {
        Ok(Self {
            pool,
            email_pattern: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?,
        })
    }

    pub(crate) async fn register(
        &self,
        email: &str,
        name: Option<&str>,
        password: &str,
    ) -> Result<User, Error> {
        if !self.email_pattern.is_match(email) {
            return Err(Error::InvalidEmail);
        }

        if password.len() < 8 {
            return Err(Error::InvalidPassword(
                "Password must be at least 8 characters".to_owned(),
            ));
        }

        let password_hash = self.hash(password)?;

        let id: i32 = match sqlx::query(
            "INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3) RETURNING id;",
        )
        .bind(email)
        .bind(name)
        .bind(&password_hash)
        .map(|row: PgRow| row.get("id"))
        .fetch_one(&self.pool)
        .await
        {
            Ok(id) => id,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(Error::UserAlreadyExists)
            }
            Err(e) => return Err(Error::Sql(e)),
        };

        Ok(User {
            id,
            email: email.into(),
            name: name.map(str::to_string),
            image: None,
            password_hash,
        })
    }

    pub(crate) async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        let user = self
            .get_by_email(email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if let false = bcrypt::verify(password, &user.password_hash)? {
            return Err(Error::InvalidCredentials);
        };

        Ok(user)
    }

    pub(crate) async fn get(&self, id: i32) -> Result<Option<User>, Error> {
        match sqlx::query("SELECT id, email, name, image, password_hash FROM users WHERE id = $1;")
            .bind(id)
            .map(map_user)
            .fetch_one(&self.pool)
            .await
        {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        match sqlx::query(
            "SELECT id, email, name, image, password_hash FROM users WHERE email = $1;",
        )
        .bind(email)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    fn hash(&self, value: &str) -> Result<String, Error> {
        bcrypt::hash(value, 12).map_err(Error::Bcrypt)
    }
}

fn map_user(row: PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        name: row.get("name"),
        image: row.get("image"),
        password_hash: row.get("password_hash"),
    }
}
