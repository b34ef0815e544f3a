//! Store implementations of the domain repository traits.

mod memory_url_repository;
mod redis_url_repository;

pub use memory_url_repository::MemoryUrlRepository;
pub use redis_url_repository::RedisUrlRepository;
