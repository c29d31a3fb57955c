// Search service access: the trait seam plus the HTTP implementation.

pub mod traits;
pub mod fetcher;

pub use fetcher::HttpSearchClient;
pub use traits::SearchService;
