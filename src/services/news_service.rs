use crate::error::AppError;
use crate::models::news::News;
use sqlx::{Pool, Postgres, Row};

pub struct NewsService;

impl NewsService {
    pub async fn create(
        db: &Pool<Postgres>,
        title: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<News, AppError> {
        let row = sqlx::query(
            "INSERT INTO news (title, content, image_url) \
             VALUES ($1, $2, $3) \
             RETURNING id, created_at",
        )
        .bind(title)
        .bind(content)
        .bind(image_url)
        .fetch_one(db)
        .await?;

        Ok(News {
            id: row.get("id"),
            title: title.to_string(),
            content: content.to_string(),
            image_url: image_url.map(str::to_string),
            created_at: row.get("created_at"),
        })
    }

    pub async fn list(db: &Pool<Postgres>) -> Result<Vec<News>, AppError> {
        let rows = sqlx::query(
            "SELECT id, title, content, image_url, created_at \
             FROM news \
             ORDER BY created_at DESC",
        )
        .fetch_all(db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| News {
                id: row.get("id"),
                title: row.get("title"),
                content: row.get("content"),
                image_url: row.get("image_url"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
