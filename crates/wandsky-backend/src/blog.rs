//! Blog posts and comments.

use reqwest::Method;
use serde_json::Value;

use crate::client::BackendClient;
use crate::error::BackendError;
use crate::types::{BlogQuery, NewBlogPost, NewComment};

impl BackendClient {
    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn list_blog_posts(&self, query: &BlogQuery) -> Result<Value, BackendError> {
        self.get_json_with_query(&["api", "blog"], query, None)
            .await
    }

    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx (404 for an unknown post).
    pub async fn get_blog_post(&self, post_id: &str) -> Result<Value, BackendError> {
        self.get_json(&["api", "blog", post_id], None).await
    }

    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn create_blog_post(
        &self,
        token: &str,
        post: &NewBlogPost,
    ) -> Result<Value, BackendError> {
        self.send_json(Method::POST, &["api", "blog"], Some(token), Some(post))
            .await
    }

    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn list_comments(&self, post_id: &str) -> Result<Value, BackendError> {
        self.get_json(&["api", "blog", post_id, "comments"], None)
            .await
    }

    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn create_comment(
        &self,
        token: &str,
        post_id: &str,
        comment: &NewComment,
    ) -> Result<Value, BackendError> {
        self.send_json(
            Method::POST,
            &["api", "blog", post_id, "comments"],
            Some(token),
            Some(comment),
        )
        .await
    }
}
