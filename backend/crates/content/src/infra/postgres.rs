//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, CommentId, PostId, UserId};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::entities::{Category, Comment, CommentView, Post, PostView};
use crate::domain::repository::{ContentRepository, PostQuery};
use crate::domain::value_objects::{CategoryName, PostTitle};
use crate::error::{ContentError, ContentResult};

/// PostgreSQL-backed content repository
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_view(&self, post_id: &PostId) -> ContentResult<PostView> {
        self.find_post(post_id)
            .await?
            .ok_or_else(|| ContentError::Internal("Post vanished after write".to_string()))
    }

    async fn load_categories(&self, post_id: &PostId) -> ContentResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT c.category_id, c.name
            FROM categories c
            JOIN post_categories pc ON pc.category_id = c.category_id
            WHERE pc.post_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn hydrate(&self, rows: Vec<PostRow>) -> ContentResult<Vec<PostView>> {
        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            let post_id = PostId::from_uuid(row.post_id);
            let categories = self.load_categories(&post_id).await?;
            views.push(row.into_view(categories));
        }
        Ok(views)
    }
}

/// Resolve a category id get-or-create style inside a transaction
///
/// Concurrent duplicate creation collapses through the unique constraint:
/// the insert is a no-op for the loser and the follow-up select sees the
/// winner's row.
async fn resolve_category(
    conn: &mut PgConnection,
    name: &CategoryName,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query("INSERT INTO categories (category_id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
        .bind(Uuid::new_v4())
        .bind(name.as_str())
        .execute(&mut *conn)
        .await?;

    sqlx::query_scalar("SELECT category_id FROM categories WHERE name = $1")
        .bind(name.as_str())
        .fetch_one(conn)
        .await
}

async fn attach_categories(
    conn: &mut PgConnection,
    post_id: &PostId,
    categories: &[CategoryName],
) -> Result<(), sqlx::Error> {
    for name in categories {
        let category_id = resolve_category(&mut *conn, name).await?;
        sqlx::query(
            "INSERT INTO post_categories (post_id, category_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(post_id.as_uuid())
        .bind(category_id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

const POST_SELECT: &str = r#"
    SELECT
        p.post_id,
        p.title,
        p.body,
        p.author_id,
        u.username AS author_username,
        p.created_at,
        p.updated_at
    FROM posts p
    JOIN users u ON u.user_id = p.author_id
"#;

impl ContentRepository for PgContentRepository {
    async fn create_post(
        &self,
        post: &Post,
        categories: &[CategoryName],
    ) -> ContentResult<PostView> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                title,
                body,
                author_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.title.as_str())
        .bind(&post.body)
        .bind(post.author_id.as_uuid())
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await?;

        attach_categories(&mut *tx, &post.post_id, categories).await?;

        tx.commit().await?;

        self.load_view(&post.post_id).await
    }

    async fn update_post(
        &self,
        post: &Post,
        categories: Option<&[CategoryName]>,
    ) -> ContentResult<PostView> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE posts SET
                title = $2,
                body = $3,
                updated_at = $4
            WHERE post_id = $1
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.title.as_str())
        .bind(&post.body)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await?;

        if let Some(categories) = categories {
            sqlx::query("DELETE FROM post_categories WHERE post_id = $1")
                .bind(post.post_id.as_uuid())
                .execute(&mut *tx)
                .await?;

            attach_categories(&mut *tx, &post.post_id, categories).await?;
        }

        tx.commit().await?;

        self.load_view(&post.post_id).await
    }

    async fn delete_post(&self, post_id: &PostId) -> ContentResult<()> {
        sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_post(&self, post_id: &PostId) -> ContentResult<Option<PostView>> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{POST_SELECT} WHERE p.post_id = $1"))
            .bind(post_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let categories = self.load_categories(post_id).await?;
                Ok(Some(row.into_view(categories)))
            }
            None => Ok(None),
        }
    }

    async fn list_posts(&self, query: &PostQuery) -> ContentResult<Vec<PostView>> {
        let rows = match (&query.author, &query.category) {
            (Some(author), _) => {
                sqlx::query_as::<_, PostRow>(&format!(
                    "{POST_SELECT} WHERE u.username_canonical = $1 ORDER BY p.created_at DESC LIMIT $2 OFFSET $3"
                ))
                .bind(author)
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(category)) => {
                sqlx::query_as::<_, PostRow>(&format!(
                    r#"{POST_SELECT}
                    WHERE EXISTS (
                        SELECT 1 FROM post_categories pc
                        JOIN categories c ON c.category_id = pc.category_id
                        WHERE pc.post_id = p.post_id AND c.name LIKE '%' || $1 || '%'
                    )
                    ORDER BY p.created_at DESC LIMIT $2 OFFSET $3"#
                ))
                .bind(category)
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&self.pool)
                .await?
            }
            (None, None) => {
                sqlx::query_as::<_, PostRow>(&format!(
                    "{POST_SELECT} ORDER BY p.created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        self.hydrate(rows).await
    }

    async fn count_posts(&self, query: &PostQuery) -> ContentResult<i64> {
        let count: i64 = match (&query.author, &query.category) {
            (Some(author), _) => {
                sqlx::query_scalar(
                    r#"
                    SELECT COUNT(*) FROM posts p
                    JOIN users u ON u.user_id = p.author_id
                    WHERE u.username_canonical = $1
                    "#,
                )
                .bind(author)
                .fetch_one(&self.pool)
                .await?
            }
            (None, Some(category)) => {
                sqlx::query_scalar(
                    r#"
                    SELECT COUNT(*) FROM posts p
                    WHERE EXISTS (
                        SELECT 1 FROM post_categories pc
                        JOIN categories c ON c.category_id = pc.category_id
                        WHERE pc.post_id = p.post_id AND c.name LIKE '%' || $1 || '%'
                    )
                    "#,
                )
                .bind(category)
                .fetch_one(&self.pool)
                .await?
            }
            (None, None) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM posts")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count)
    }

    async fn list_posts_by_user(&self, author_id: &UserId) -> ContentResult<Vec<PostView>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "{POST_SELECT} WHERE p.author_id = $1 ORDER BY p.created_at DESC"
        ))
        .bind(author_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn create_comment(&self, comment: &Comment) -> ContentResult<CommentView> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                post_id,
                author_id,
                content,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.post_id.as_uuid())
        .bind(comment.author_id.as_uuid())
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_comment(&comment.post_id, &comment.comment_id)
            .await?
            .ok_or_else(|| ContentError::Internal("Comment vanished after write".to_string()))
    }

    async fn find_comment(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
    ) -> ContentResult<Option<CommentView>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                c.comment_id,
                c.post_id,
                c.author_id,
                u.username AS author_username,
                c.content,
                c.created_at,
                c.updated_at
            FROM comments c
            JOIN users u ON u.user_id = c.author_id
            WHERE c.comment_id = $1 AND c.post_id = $2
            "#,
        )
        .bind(comment_id.as_uuid())
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_view))
    }

    async fn list_comments(&self, post_id: &PostId) -> ContentResult<Vec<CommentView>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                c.comment_id,
                c.post_id,
                c.author_id,
                u.username AS author_username,
                c.content,
                c.created_at,
                c.updated_at
            FROM comments c
            JOIN users u ON u.user_id = c.author_id
            WHERE c.post_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_view).collect())
    }

    async fn update_comment(&self, comment: &Comment) -> ContentResult<CommentView> {
        sqlx::query(
            r#"
            UPDATE comments SET
                content = $2,
                updated_at = $3
            WHERE comment_id = $1
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(&comment.content)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        self.find_comment(&comment.post_id, &comment.comment_id)
            .await?
            .ok_or_else(|| ContentError::Internal("Comment vanished after write".to_string()))
    }

    async fn delete_comment(&self, comment_id: &CommentId) -> ContentResult<()> {
        sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    title: String,
    body: String,
    author_id: Uuid,
    author_username: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_view(self, categories: Vec<Category>) -> PostView {
        PostView {
            post: Post {
                post_id: PostId::from_uuid(self.post_id),
                title: PostTitle::from_db(self.title),
                body: self.body,
                author_id: UserId::from_uuid(self.author_id),
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author_username: self.author_username,
            categories,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: Uuid,
    name: String,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            category_id: CategoryId::from_uuid(self.category_id),
            name: CategoryName::from_db(self.name),
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    post_id: Uuid,
    author_id: Uuid,
    author_username: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_view(self) -> CommentView {
        CommentView {
            comment: Comment {
                comment_id: CommentId::from_uuid(self.comment_id),
                post_id: PostId::from_uuid(self.post_id),
                author_id: UserId::from_uuid(self.author_id),
                content: self.content,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author_username: self.author_username,
        }
    }
}
