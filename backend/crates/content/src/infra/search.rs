//! Search Index Client
//!
//! HTTP implementation of the search-index port. The index is a
//! write-through sink: documents are PUT on save and DELETEd on delete.
//! When no index endpoint is configured the client degrades to a no-op,
//! which keeps development environments working without an index.

use kernel::id::PostId;

use crate::domain::index::{IndexError, PostDocument, SearchIndex};

/// Search index transport
pub enum SearchIndexClient {
    Http {
        client: reqwest::Client,
        base_url: String,
    },
    Noop,
}

impl SearchIndexClient {
    /// Create the HTTP client against an index base URL
    pub fn http(base_url: impl Into<String>) -> Self {
        Self::Http {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create the no-op client
    pub fn noop() -> Self {
        Self::Noop
    }
}

impl SearchIndex for SearchIndexClient {
    async fn upsert(&self, document: &PostDocument) -> Result<(), IndexError> {
        match self {
            Self::Http { client, base_url } => {
                let url = format!("{}/posts/{}", base_url, document.id);
                let response = client
                    .put(&url)
                    .json(document)
                    .send()
                    .await
                    .map_err(|e| IndexError::Unavailable(e.to_string()))?;

                if !response.status().is_success() {
                    return Err(IndexError::Rejected(response.status().as_u16()));
                }

                Ok(())
            }
            Self::Noop => Ok(()),
        }
    }

    async fn remove(&self, post_id: &PostId) -> Result<(), IndexError> {
        match self {
            Self::Http { client, base_url } => {
                let url = format!("{}/posts/{}", base_url, post_id.as_uuid());
                let response = client
                    .delete(&url)
                    .send()
                    .await
                    .map_err(|e| IndexError::Unavailable(e.to_string()))?;

                // A document missing from the index is not an error on delete
                if !response.status().is_success() && response.status().as_u16() != 404 {
                    return Err(IndexError::Rejected(response.status().as_u16()));
                }

                Ok(())
            }
            Self::Noop => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_client_always_succeeds() {
        let client = SearchIndexClient::noop();

        let document = PostDocument {
            id: uuid::Uuid::new_v4(),
            title: "Introduction to Django".to_string(),
            categories: vec![],
        };

        assert!(client.upsert(&document).await.is_ok());
        assert!(client.remove(&PostId::new()).await.is_ok());
    }

    #[test]
    fn test_http_client_trims_trailing_slash() {
        let client = SearchIndexClient::http("http://localhost:9200/");
        let SearchIndexClient::Http { base_url, .. } = client else {
            panic!("expected http client");
        };
        assert_eq!(base_url, "http://localhost:9200");
    }
}
