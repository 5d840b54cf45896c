use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::core::error::Error;
use crate::types::response;

#[derive(Clone, Debug)]
pub(crate) struct CommentController {
    pool: PgPool,
}

impl CommentController {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn list(&self, image: i32) -> Result<Vec<response::Comment>, Error> {
        let comments = sqlx::query(
            "SELECT
                comments.id,
                comments.image_id,
                comments.body,
                comments.created_at,
                users.id AS author_id,
                users.name AS author_name,
                users.email AS author_email
            FROM comments
            JOIN users ON users.id = comments.author_id
            WHERE comments.image_id = $1
            ORDER BY comments.created_at DESC;",
        )
        .bind(image)
        .map(map_comment)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    pub(crate) async fn create(
        &self,
        author: i32,
        image: i32,
        text: &str,
    ) -> Result<response::Comment, Error> {
        let comment = match sqlx::query(
            "WITH inserted AS (
                INSERT INTO comments (image_id, author_id, body)
                VALUES ($1, $2, $3)
                RETURNING id, image_id, author_id, body, created_at
            )
            SELECT
                inserted.id,
                inserted.image_id,
                inserted.body,
                inserted.created_at,
                users.id AS author_id,
                users.name AS author_name,
                users.email AS author_email
            FROM inserted
            JOIN users ON users.id = inserted.author_id;",
        )
        .bind(image)
        .bind(author)
        .bind(text)
        .map(map_comment)
        .fetch_one(&self.pool)
        .await
        {
            Ok(comment) => comment,
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                return Err(Error::ImageNotFound)
            }
            Err(e) => return Err(Error::Sql(e)),
        };

        Ok(comment)
    }

    /// Deletes a comment, but only for its author.
    pub(crate) async fn delete(&self, author: i32, comment: i32) -> Result<(), Error> {
        let owner: i32 = match sqlx::query("SELECT author_id FROM comments WHERE id = $1;")
            .bind(comment)
            .map(|row: PgRow| row.get("author_id"))
            .fetch_one(&self.pool)
            .await
        {
            Ok(owner) => owner,
            Err(sqlx::Error::RowNotFound) => return Err(Error::CommentNotFound),
            Err(e) => return Err(Error::Sql(e)),
        };

        if owner != author {
            return Err(Error::Forbidden);
        }

        sqlx::query("DELETE FROM comments WHERE id = $1;")
            .bind(comment)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn map_comment(row: PgRow) -> response::Comment {
    response::Comment {
        id: row.get("id"),
        image_id: row.get("image_id"),
        text: row.get("body"),
        created_at: row.get("created_at"),
        author: response::CommentAuthor {
            id: row.get("author_id"),
            name: row.get("author_name"),
            email: row.get("author_email"),
        },
    }
}
