/// Business logic layer
pub mod posts;
pub mod recommender;
pub mod storage;

pub use posts::PostService;
pub use recommender::{HttpTagRecommender, TagRecommender};
pub use storage::{build_s3_client, BlobStore, S3BlobStore};
