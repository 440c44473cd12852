//! Unit tests for the content crate
//!
//! Use cases are driven end-to-end against an in-memory repository and
//! recording/failing index fakes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use kernel::id::{CommentId, PostId, UserId};

use crate::application::comments::{
    CommentInput, CreateCommentUseCase, DeleteCommentUseCase, UpdateCommentUseCase,
};
use crate::application::config::ContentConfig;
use crate::application::posts::{
    CreatePostUseCase, DeletePostUseCase, ListPostsInput, ListPostsUseCase, MyPostsUseCase,
    PostInput, UpdatePostUseCase,
};
use crate::domain::entities::{Category, Comment, CommentView, Post, PostView};
use crate::domain::index::{IndexError, PostDocument, SearchIndex};
use crate::domain::repository::{ContentRepository, PostQuery};
use crate::domain::value_objects::CategoryName;
use crate::error::{ContentError, ContentResult};

// ============================================================================
// In-memory fakes
// ============================================================================

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, String>,
    posts: Vec<Post>,
    categories: Vec<Category>,
    post_categories: Vec<(Uuid, Uuid)>,
    comments: Vec<Comment>,
}

/// In-memory stand-in for the Postgres repository
#[derive(Clone, Default)]
struct MemoryContentRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryContentRepository {
    fn add_user(&self, username: &str) -> UserId {
        let user_id = UserId::new();
        self.state
            .lock()
            .unwrap()
            .users
            .insert(*user_id.as_uuid(), username.to_string());
        user_id
    }

    fn category_count(&self) -> usize {
        self.state.lock().unwrap().categories.len()
    }

    fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }

    fn post_title(&self, post_id: &PostId) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|p| p.post_id == *post_id)
            .map(|p| p.title.as_str().to_string())
    }

    fn comment_content(&self, comment_id: &CommentId) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .comments
            .iter()
            .find(|c| c.comment_id == *comment_id)
            .map(|c| c.content.clone())
    }

    fn view_locked(state: &MemoryState, post: &Post) -> PostView {
        let author_username = state
            .users
            .get(post.author_id.as_uuid())
            .cloned()
            .unwrap_or_default();
        let categories = state
            .post_categories
            .iter()
            .filter(|(post_id, _)| post_id == post.post_id.as_uuid())
            .filter_map(|(_, category_id)| {
                state
                    .categories
                    .iter()
                    .find(|c| c.category_id.as_uuid() == category_id)
                    .cloned()
            })
            .collect();

        PostView {
            post: post.clone(),
            author_username,
            categories,
        }
    }

    fn comment_view_locked(state: &MemoryState, comment: &Comment) -> CommentView {
        CommentView {
            comment: comment.clone(),
            author_username: state
                .users
                .get(comment.author_id.as_uuid())
                .cloned()
                .unwrap_or_default(),
        }
    }

    fn resolve_category_locked(state: &mut MemoryState, name: &CategoryName) -> Uuid {
        if let Some(existing) = state.categories.iter().find(|c| c.name == *name) {
            return *existing.category_id.as_uuid();
        }
        let category = Category::new(name.clone());
        let id = *category.category_id.as_uuid();
        state.categories.push(category);
        id
    }
}

impl ContentRepository for MemoryContentRepository {
    async fn create_post(
        &self,
        post: &Post,
        categories: &[CategoryName],
    ) -> ContentResult<PostView> {
        let mut state = self.state.lock().unwrap();
        state.posts.push(post.clone());

        for name in categories {
            let category_id = Self::resolve_category_locked(&mut state, name);
            state
                .post_categories
                .push((*post.post_id.as_uuid(), category_id));
        }

        let post = post.clone();
        Ok(Self::view_locked(&state, &post))
    }

    async fn update_post(
        &self,
        post: &Post,
        categories: Option<&[CategoryName]>,
    ) -> ContentResult<PostView> {
        let mut state = self.state.lock().unwrap();

        if let Some(existing) = state
            .posts
            .iter_mut()
            .find(|p| p.post_id == post.post_id)
        {
            *existing = post.clone();
        }

        if let Some(categories) = categories {
            state
                .post_categories
                .retain(|(post_id, _)| post_id != post.post_id.as_uuid());
            for name in categories {
                let category_id = Self::resolve_category_locked(&mut state, name);
                state
                    .post_categories
                    .push((*post.post_id.as_uuid(), category_id));
            }
        }

        let post = post.clone();
        Ok(Self::view_locked(&state, &post))
    }

    async fn delete_post(&self, post_id: &PostId) -> ContentResult<()> {
        let mut state = self.state.lock().unwrap();
        state.posts.retain(|p| p.post_id != *post_id);
        state
            .post_categories
            .retain(|(id, _)| id != post_id.as_uuid());
        state.comments.retain(|c| c.post_id != *post_id);
        Ok(())
    }

    async fn find_post(&self, post_id: &PostId) -> ContentResult<Option<PostView>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .iter()
            .find(|p| p.post_id == *post_id)
            .cloned()
            .map(|p| Self::view_locked(&state, &p)))
    }

    async fn list_posts(&self, query: &PostQuery) -> ContentResult<Vec<PostView>> {
        let state = self.state.lock().unwrap();

        let mut matching: Vec<&Post> = state
            .posts
            .iter()
            .filter(|p| match &query.author {
                Some(author) => state
                    .users
                    .get(p.author_id.as_uuid())
                    .is_some_and(|u| u.to_lowercase() == *author),
                None => true,
            })
            .filter(|p| match &query.category {
                Some(category) => state.post_categories.iter().any(|(post_id, category_id)| {
                    post_id == p.post_id.as_uuid()
                        && state
                            .categories
                            .iter()
                            .any(|c| c.category_id.as_uuid() == category_id
                                && c.name.as_str().contains(category))
                }),
                None => true,
            })
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .map(|p| Self::view_locked(&state, p))
            .collect())
    }

    async fn count_posts(&self, query: &PostQuery) -> ContentResult<i64> {
        let state = self.state.lock().unwrap();
        let count = state
            .posts
            .iter()
            .filter(|p| match &query.author {
                Some(author) => state
                    .users
                    .get(p.author_id.as_uuid())
                    .is_some_and(|u| u.to_lowercase() == *author),
                None => true,
            })
            .count();
        Ok(count as i64)
    }

    async fn list_posts_by_user(&self, author_id: &UserId) -> ContentResult<Vec<PostView>> {
        let state = self.state.lock().unwrap();
        let mut matching: Vec<&Post> = state
            .posts
            .iter()
            .filter(|p| p.author_id == *author_id)
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching
            .into_iter()
            .map(|p| Self::view_locked(&state, p))
            .collect())
    }

    async fn create_comment(&self, comment: &Comment) -> ContentResult<CommentView> {
        let mut state = self.state.lock().unwrap();
        state.comments.push(comment.clone());
        let comment = comment.clone();
        Ok(Self::comment_view_locked(&state, &comment))
    }

    async fn find_comment(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
    ) -> ContentResult<Option<CommentView>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .comments
            .iter()
            .find(|c| c.comment_id == *comment_id && c.post_id == *post_id)
            .cloned()
            .map(|c| Self::comment_view_locked(&state, &c)))
    }

    async fn list_comments(&self, post_id: &PostId) -> ContentResult<Vec<CommentView>> {
        let state = self.state.lock().unwrap();
        let mut matching: Vec<&Comment> = state
            .comments
            .iter()
            .filter(|c| c.post_id == *post_id)
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching
            .into_iter()
            .map(|c| Self::comment_view_locked(&state, c))
            .collect())
    }

    async fn update_comment(&self, comment: &Comment) -> ContentResult<CommentView> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .comments
            .iter_mut()
            .find(|c| c.comment_id == comment.comment_id)
        {
            *existing = comment.clone();
        }
        let comment = comment.clone();
        Ok(Self::comment_view_locked(&state, &comment))
    }

    async fn delete_comment(&self, comment_id: &CommentId) -> ContentResult<()> {
        let mut state = self.state.lock().unwrap();
        state.comments.retain(|c| c.comment_id != *comment_id);
        Ok(())
    }
}

/// Index fake that records every call
#[derive(Clone, Default)]
struct RecordingIndex {
    upserts: Arc<Mutex<Vec<Uuid>>>,
    removes: Arc<Mutex<Vec<Uuid>>>,
}

impl RecordingIndex {
    fn upserts(&self) -> Vec<Uuid> {
        self.upserts.lock().unwrap().clone()
    }

    fn removes(&self) -> Vec<Uuid> {
        self.removes.lock().unwrap().clone()
    }
}

impl SearchIndex for RecordingIndex {
    async fn upsert(&self, document: &PostDocument) -> Result<(), IndexError> {
        self.upserts.lock().unwrap().push(document.id);
        Ok(())
    }

    async fn remove(&self, post_id: &PostId) -> Result<(), IndexError> {
        self.removes.lock().unwrap().push(*post_id.as_uuid());
        Ok(())
    }
}

/// Index fake that always fails
#[derive(Clone, Default)]
struct FailingIndex;

impl SearchIndex for FailingIndex {
    async fn upsert(&self, _document: &PostDocument) -> Result<(), IndexError> {
        Err(IndexError::Unavailable("connection refused".to_string()))
    }

    async fn remove(&self, _post_id: &PostId) -> Result<(), IndexError> {
        Err(IndexError::Unavailable("connection refused".to_string()))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn post_input(title: &str, categories: &[&str]) -> PostInput {
    PostInput {
        title: Some(title.to_string()),
        body: Some("This is a post about Django".to_string()),
        categories: Some(categories.iter().map(|c| c.to_string()).collect()),
    }
}

async fn create_post(
    repo: &Arc<MemoryContentRepository>,
    index: &Arc<RecordingIndex>,
    author: UserId,
    title: &str,
    categories: &[&str],
) -> PostView {
    CreatePostUseCase::new(repo.clone(), index.clone())
        .execute(author, post_input(title, categories))
        .await
        .expect("post creation should succeed")
}

// ============================================================================
// Posts
// ============================================================================

mod post_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_stamps_acting_identity_as_author() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let jane = repo.add_user("janedoe");

        let view = create_post(&repo, &index, jane, "Introduction to Django", &["Django"]).await;

        assert_eq!(view.post.author_id, jane);
        assert_eq!(view.author_username, "janedoe");
    }

    #[tokio::test]
    async fn test_case_variant_categories_collapse_to_one() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let jane = repo.add_user("janedoe");

        let first = create_post(&repo, &index, jane, "First", &["Django"]).await;
        let second = create_post(&repo, &index, jane, "Second", &["django"]).await;

        assert_eq!(repo.category_count(), 1);
        assert_eq!(first.categories[0].name.as_str(), "django");
        assert_eq!(
            first.categories[0].category_id,
            second.categories[0].category_id
        );
    }

    #[tokio::test]
    async fn test_duplicate_categories_in_one_post_collapse() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let jane = repo.add_user("janedoe");

        let view = create_post(&repo, &index, jane, "First", &["Django", "DJANGO", "django"]).await;

        assert_eq!(view.categories.len(), 1);
        assert_eq!(repo.category_count(), 1);
    }

    #[tokio::test]
    async fn test_non_owner_update_is_forbidden_and_changes_nothing() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let jane = repo.add_user("janedoe");
        let warren = repo.add_user("warren");

        let view = create_post(&repo, &index, jane, "Introduction to Django", &["Django"]).await;
        let post_id = view.post.post_id;

        let err = UpdatePostUseCase::new(repo.clone(), index.clone())
            .execute(warren, post_id, post_input("Hijacked", &["Django"]))
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::PostForbidden));
        assert_eq!(
            repo.post_title(&post_id).as_deref(),
            Some("Introduction to Django")
        );
    }

    #[tokio::test]
    async fn test_non_owner_delete_is_forbidden_and_post_survives() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let jane = repo.add_user("janedoe");
        let warren = repo.add_user("warren");

        let view = create_post(&repo, &index, jane, "Introduction to Django", &["Django"]).await;

        let err = DeletePostUseCase::new(repo.clone(), index.clone())
            .execute(warren, view.post.post_id)
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::PostForbidden));
        assert_eq!(repo.post_count(), 1);
    }

    #[tokio::test]
    async fn test_absent_post_is_not_found_not_forbidden() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let jane = repo.add_user("janedoe");

        let err = DeletePostUseCase::new(repo.clone(), index.clone())
            .execute(jane, PostId::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::PostNotFound));
    }

    #[tokio::test]
    async fn test_owner_can_update_own_post() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let jane = repo.add_user("janedoe");

        let view = create_post(&repo, &index, jane, "Old title", &["Django"]).await;

        let detail = UpdatePostUseCase::new(repo.clone(), index.clone())
            .execute(jane, view.post.post_id, post_input("New title", &["Python"]))
            .await
            .unwrap();

        assert_eq!(detail.view.post.title.as_str(), "New title");
        assert_eq!(detail.view.categories[0].name.as_str(), "python");
    }

    #[tokio::test]
    async fn test_missing_fields_are_field_errors() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let jane = repo.add_user("janedoe");

        let err = CreatePostUseCase::new(repo.clone(), index.clone())
            .execute(jane, PostInput::default())
            .await
            .unwrap_err();

        let ContentError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        for field in ["title", "body", "categories"] {
            assert_eq!(errors.messages(field), &["This field is required."]);
        }
    }
}

// ============================================================================
// Listing
// ============================================================================

mod listing_tests {
    use super::*;

    async fn seed(repo: &Arc<MemoryContentRepository>, index: &Arc<RecordingIndex>) -> UserId {
        let jane = repo.add_user("JaneDoe");
        create_post(repo, index, jane, "First", &["Django"]).await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        create_post(repo, index, jane, "Second", &["Python"]).await;
        jane
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        seed(&repo, &index).await;

        let use_case = ListPostsUseCase::new(repo.clone(), Arc::new(ContentConfig::default()));
        let views = use_case.execute(ListPostsInput::default()).await.unwrap();

        assert_eq!(views[0].post.title.as_str(), "Second");
        assert_eq!(views[1].post.title.as_str(), "First");
    }

    #[tokio::test]
    async fn test_author_filter_is_case_insensitive() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        seed(&repo, &index).await;

        let use_case = ListPostsUseCase::new(repo.clone(), Arc::new(ContentConfig::default()));
        let views = use_case
            .execute(ListPostsInput {
                author: Some("janedoe".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(views.len(), 2);
    }

    #[tokio::test]
    async fn test_author_with_no_posts_is_not_found_with_message() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        seed(&repo, &index).await;

        let use_case = ListPostsUseCase::new(repo.clone(), Arc::new(ContentConfig::default()));
        let err = use_case
            .execute(ListPostsInput {
                author: Some("nobody".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        let ContentError::NoPostsForAuthor(author) = &err else {
            panic!("expected NoPostsForAuthor, got {err:?}");
        };
        assert_eq!(author, "nobody");
        assert_eq!(err.to_string(), "No posts found for author nobody");
    }

    #[tokio::test]
    async fn test_category_filter_matches_contains() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        seed(&repo, &index).await;

        let use_case = ListPostsUseCase::new(repo.clone(), Arc::new(ContentConfig::default()));
        let views = use_case
            .execute(ListPostsInput {
                category: Some("JANG".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].post.title.as_str(), "First");
    }

    #[tokio::test]
    async fn test_default_page_size_applies() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let jane = repo.add_user("janedoe");
        for i in 0..5 {
            create_post(&repo, &index, jane, &format!("Post {i}"), &["Django"]).await;
        }

        let use_case = ListPostsUseCase::new(repo.clone(), Arc::new(ContentConfig::default()));
        let views = use_case.execute(ListPostsInput::default()).await.unwrap();

        assert_eq!(views.len(), 3);
    }

    #[tokio::test]
    async fn test_my_posts_is_scoped_to_acting_identity() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let jane = repo.add_user("janedoe");
        let warren = repo.add_user("warren");
        create_post(&repo, &index, jane, "Jane's post", &["Django"]).await;
        create_post(&repo, &index, warren, "Warren's post", &["Python"]).await;

        let details = MyPostsUseCase::new(repo.clone()).execute(jane).await.unwrap();

        assert_eq!(details.len(), 1);
        assert_eq!(details[0].view.post.title.as_str(), "Jane's post");
    }
}

// ============================================================================
// Comments
// ============================================================================

mod comment_tests {
    use super::*;

    async fn seed_with_comment(
        repo: &Arc<MemoryContentRepository>,
        index: &Arc<RecordingIndex>,
    ) -> (UserId, UserId, PostId, CommentId) {
        let jane = repo.add_user("janedoe");
        let warren = repo.add_user("warren");
        let view = create_post(repo, index, jane, "Introduction to Django", &["Django"]).await;

        let comment = CreateCommentUseCase::new(repo.clone())
            .execute(
                jane,
                view.post.post_id,
                CommentInput {
                    content: Some("This is a comment about Django".to_string()),
                },
            )
            .await
            .unwrap();

        (jane, warren, view.post.post_id, comment.comment.comment_id)
    }

    #[tokio::test]
    async fn test_comment_on_absent_post_is_not_found() {
        let repo = Arc::new(MemoryContentRepository::default());
        let jane = repo.add_user("janedoe");

        let err = CreateCommentUseCase::new(repo.clone())
            .execute(
                jane,
                PostId::new(),
                CommentInput {
                    content: Some("hello".to_string()),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::PostNotFound));
    }

    #[tokio::test]
    async fn test_comment_lookup_is_scoped_to_post() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let (jane, _, _, comment_id) = seed_with_comment(&repo, &index).await;

        // A second post; the comment does not belong to it
        let other = create_post(&repo, &index, jane, "Another post", &["Python"]).await;

        let err = UpdateCommentUseCase::new(repo.clone())
            .execute(
                jane,
                other.post.post_id,
                comment_id,
                CommentInput {
                    content: Some("edited".to_string()),
                },
            )
            .await
            .unwrap_err();

        // Scope failure answers not-found before any ownership question
        assert!(matches!(err, ContentError::CommentNotFound));
    }

    #[tokio::test]
    async fn test_non_owner_comment_update_forbidden() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let (_, warren, post_id, comment_id) = seed_with_comment(&repo, &index).await;

        let err = UpdateCommentUseCase::new(repo.clone())
            .execute(
                warren,
                post_id,
                comment_id,
                CommentInput {
                    content: Some("hijacked".to_string()),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::CommentUpdateForbidden));
        assert_eq!(
            repo.comment_content(&comment_id).as_deref(),
            Some("This is a comment about Django")
        );
    }

    #[tokio::test]
    async fn test_non_owner_comment_delete_forbidden() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let (_, warren, post_id, comment_id) = seed_with_comment(&repo, &index).await;

        let err = DeleteCommentUseCase::new(repo.clone())
            .execute(warren, post_id, comment_id)
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::CommentDeleteForbidden));
        assert!(repo.comment_content(&comment_id).is_some());
    }

    #[tokio::test]
    async fn test_owner_can_update_own_comment() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let (jane, _, post_id, comment_id) = seed_with_comment(&repo, &index).await;

        let view = UpdateCommentUseCase::new(repo.clone())
            .execute(
                jane,
                post_id,
                comment_id,
                CommentInput {
                    content: Some("Django is fun".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(view.comment.content, "Django is fun");
    }
}

// ============================================================================
// Search index hook
// ============================================================================

mod index_tests {
    use super::*;

    #[tokio::test]
    async fn test_hook_fires_on_create_update_delete() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let jane = repo.add_user("janedoe");

        let view = create_post(&repo, &index, jane, "Introduction to Django", &["Django"]).await;
        let post_id = view.post.post_id;
        assert_eq!(index.upserts(), vec![*post_id.as_uuid()]);

        UpdatePostUseCase::new(repo.clone(), index.clone())
            .execute(jane, post_id, post_input("Updated", &["Django"]))
            .await
            .unwrap();
        assert_eq!(index.upserts().len(), 2);

        DeletePostUseCase::new(repo.clone(), index.clone())
            .execute(jane, post_id)
            .await
            .unwrap();
        assert_eq!(index.removes(), vec![*post_id.as_uuid()]);
    }

    #[tokio::test]
    async fn test_index_failure_never_fails_the_save() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(FailingIndex);
        let jane = repo.add_user("janedoe");

        let view = CreatePostUseCase::new(repo.clone(), index.clone())
            .execute(jane, post_input("Survives", &["Django"]))
            .await
            .expect("index failure must not fail the save");

        assert_eq!(repo.post_count(), 1);

        DeletePostUseCase::new(repo.clone(), index.clone())
            .execute(jane, view.post.post_id)
            .await
            .expect("index failure must not fail the delete");

        assert_eq!(repo.post_count(), 0);
    }

    #[tokio::test]
    async fn test_document_carries_title_and_categories() {
        let repo = Arc::new(MemoryContentRepository::default());
        let index = Arc::new(RecordingIndex::default());
        let jane = repo.add_user("janedoe");

        let view = create_post(&repo, &index, jane, "Introduction to Django", &["Django"]).await;

        let document = PostDocument::from_view(&view);
        assert_eq!(document.title, "Introduction to Django");
        assert_eq!(document.categories.len(), 1);
        assert_eq!(document.categories[0].name, "django");
    }
}

// ============================================================================
// Error responses
// ============================================================================

mod error_tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_forbidden_body_carries_action_specific_message() {
        let response = ContentError::CommentUpdateForbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "You are not allowed to update this comment.");
    }

    #[tokio::test]
    async fn test_author_miss_body_names_the_author() {
        let response = ContentError::NoPostsForAuthor("janedoe".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "No posts found for author janedoe");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ContentError::PostNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ContentError::PostForbidden.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ContentError::CommentDeleteForbidden.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ContentError::NoPostsForAuthor("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
