pub mod tmdb;

use async_trait::async_trait;

pub use tmdb::TmdbClient;

/// Result of one external lookup. Keeps "the service said no" apart from
/// "we could not ask", so failed rows can be retried later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome<T> {
    Found(T),
    ConfirmedAbsent,
    Failed(String),
}

#[async_trait]
pub trait MovieLookup: Send + Sync {
    /// First listed genre of the movie.
    async fn fetch_genre(&self, movie_id: &str) -> LookupOutcome<String>;

    /// Name of the collection (franchise) the movie belongs to.
    async fn fetch_franchise(&self, movie_id: &str) -> LookupOutcome<String>;
}
