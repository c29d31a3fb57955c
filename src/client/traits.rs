use crate::model::{SearchCriteria, SearchError, SearchResponse};

#[async_trait::async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResponse, SearchError>;
}
