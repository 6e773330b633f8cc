use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{LookupOutcome, MovieLookup};
use crate::config::TmdbConfig;
use crate::utils::Error;

#[derive(Debug, Clone)]
pub struct TmdbClient {
    base_url: String,
    api_key: String,
    language: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(cfg: &TmdbConfig) -> Result<Self, Error> {
        if cfg.api_key.trim().is_empty() {
            return Err(Error::Other(
                "TMDB API key is missing (set tmdb.api_key or TMDB_API_KEY)".to_string(),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if cfg.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(cfg.timeout_secs));
        }

        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            language: cfg.language.clone(),
            client: builder.build()?,
        })
    }

    fn movie_url(&self, movie_id: &str) -> String {
        format!("{}/movie/{}", self.base_url, movie_id)
    }

    pub async fn get_movie(&self, movie_id: &str) -> Result<MovieDetails, Error> {
        let url = self.movie_url(movie_id);
        debug!(target: "moviedata::tmdb", url = %url, "Fetching movie details");

        let resp = self
            .client
            .get(url)
            .query(&[("language", self.language.as_str())])
            .header("accept", "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus(status));
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MovieLookup for TmdbClient {
    async fn fetch_genre(&self, movie_id: &str) -> LookupOutcome<String> {
        match self.get_movie(movie_id).await {
            Ok(details) => details.primary_genre(),
            Err(e) => {
                warn!("Failed to fetch genre for movie_id {movie_id}: {e}");
                LookupOutcome::Failed(e.to_string())
            }
        }
    }

    async fn fetch_franchise(&self, movie_id: &str) -> LookupOutcome<String> {
        match self.get_movie(movie_id).await {
            Ok(details) => details.collection_name(),
            Err(e) => {
                warn!("Failed to fetch franchise info for movie_id {movie_id}: {e}");
                LookupOutcome::Failed(e.to_string())
            }
        }
    }
}

// ================================================================================================
// Models
// ================================================================================================

/// Subset of `GET /movie/{id}` we care about.
#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct MovieDetails {
    pub id: Option<i64>,
    pub title: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub belongs_to_collection: Option<CollectionRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct Genre {
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct CollectionRef {
    pub id: Option<i64>,
    pub name: String,
}

impl MovieDetails {
    pub fn primary_genre(&self) -> LookupOutcome<String> {
        match self.genres.as_deref().and_then(<[Genre]>::first) {
            Some(g) => LookupOutcome::Found(g.name.clone()),
            None => LookupOutcome::ConfirmedAbsent,
        }
    }

    pub fn collection_name(&self) -> LookupOutcome<String> {
        match &self.belongs_to_collection {
            Some(c) => LookupOutcome::Found(c.name.clone()),
            None => LookupOutcome::ConfirmedAbsent,
        }
    }
}
