use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::core::error::Error;
use crate::types::response;

#[derive(Clone, Debug)]
pub(crate) struct ImageController {
    pool: PgPool,
}

/// A published image as stored, for the retrieval endpoint.
#[derive(Clone, Debug, sqlx::FromRow)]
pub(crate) struct StoredImage {
    pub(crate) image_url: String,
    pub(crate) image_data: Option<Vec<u8>>,
    pub(crate) image_mime: Option<String>,
    pub(crate) stored: bool,
}

impl ImageController {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn publish(
        &self,
        publisher: i32,
        image_url: &str,
        prompt: &str,
    ) -> Result<response::PublishedImage, Error> {
        let image = sqlx::query(
            "INSERT INTO published_images (image_url, prompt, publisher_id)
            VALUES ($1, $2, $3)
            RETURNING id, image_url, prompt, created_at;",
        )
        .bind(image_url)
        .bind(prompt)
        .bind(publisher)
        .map(map_published_image)
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    pub(crate) async fn get(&self, id: i32) -> Result<Option<StoredImage>, Error> {
        match sqlx::query_as::<_, StoredImage>(
            "SELECT image_url, image_data, image_mime, stored FROM published_images WHERE id = $1;",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        {
            Ok(image) => Ok(Some(image)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    /// Newest-first feed. `viewer` personalizes the `liked` flag; anonymous
    /// callers get `false` everywhere.
    pub(crate) async fn feed(&self, viewer: Option<i32>) -> Result<Vec<response::FeedImage>, Error> {
        let images = sqlx::query(
            "SELECT
                images.id,
                images.image_url,
                images.prompt,
                images.created_at,
                images.like_count,
                users.id AS publisher_id,
                users.name AS publisher_name,
                EXISTS(
                    SELECT 1 FROM likes
                    WHERE likes.image_id = images.id AND likes.user_id = $1
                ) AS liked
            FROM published_images images
            LEFT JOIN users ON users.id = images.publisher_id
            ORDER BY images.created_at DESC;",
        )
        .bind(viewer)
        .map(map_feed_image)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    /// Flips the caller's like in a single transaction.
    ///
    /// The image row is locked first so that the existence check, the like
    /// insert-or-delete and the counter adjustment commit as one unit.
    /// Concurrent toggles for the same image serialize on the row lock, and
    /// the (user_id, image_id) primary key makes a double insert collide
    /// rather than apply twice.
    pub(crate) async fn toggle_like(
        &self,
        user: i32,
        image: i32,
    ) -> Result<response::LikeStatus, Error> {
        let mut tx = self.pool.begin().await?;

        match sqlx::query("SELECT id FROM published_images WHERE id = $1 FOR UPDATE;")
            .bind(image)
            .fetch_one(&mut *tx)
            .await
        {
            Ok(_) => (),
            Err(sqlx::Error::RowNotFound) => return Err(Error::ImageNotFound),
            Err(e) => return Err(Error::Sql(e)),
        }

        let existing = sqlx::query("SELECT 1 FROM likes WHERE user_id = $1 AND image_id = $2;")
            .bind(user)
            .bind(image)
            .fetch_optional(&mut *tx)
            .await?;

        let (liked, like_count) = if existing.is_some() {
            sqlx::query("DELETE FROM likes WHERE user_id = $1 AND image_id = $2;")
                .bind(user)
                .bind(image)
                .execute(&mut *tx)
                .await?;

            let like_count = sqlx::query(
                "UPDATE published_images SET like_count = like_count - 1
                WHERE id = $1 RETURNING like_count;",
            )
            .bind(image)
            .map(|row: PgRow| row.get::<i32, _>("like_count"))
            .fetch_one(&mut *tx)
            .await?;

            (false, like_count)
        } else {
            sqlx::query("INSERT INTO likes (user_id, image_id) VALUES ($1, $2);")
                .bind(user)
                .bind(image)
                .execute(&mut *tx)
                .await?;

            let like_count = sqlx::query(
                "UPDATE published_images SET like_count = like_count + 1
                WHERE id = $1 RETURNING like_count;",
            )
            .bind(image)
            .map(|row: PgRow| row.get::<i32, _>("like_count"))
            .fetch_one(&mut *tx)
            .await?;

            (true, like_count)
        };

        tx.commit().await?;

        Ok(response::LikeStatus {
            image_id: image,
            liked,
            like_count,
        })
    }
}

fn map_published_image(row: PgRow) -> response::PublishedImage {
    response::PublishedImage {
        id: row.get("id"),
        image_url: row.get("image_url"),
        prompt: row.get("prompt"),
        created_at: row.get("created_at"),
    }
}

fn map_feed_image(row: PgRow) -> response::FeedImage {
    let publisher = row
        .get::<Option<i32>, _>("publisher_id")
        .map(|id| response::Publisher {
            id,
            name: row.get("publisher_name"),
        });

    response::FeedImage {
        id: row.get("id"),
        image_url: row.get("image_url"),
        prompt: row.get("prompt"),
        created_at: row.get("created_at"),
        publisher,
        like_count: row.get("like_count"),
        liked: row.get("liked"),
    }
}
