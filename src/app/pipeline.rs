use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use super::common::{ensure_output_dir, output_path};
use crate::config::Config;
use crate::core::cleaning::{clean_financials, clean_metadata, clean_ratings};
use crate::core::enrich::{EnrichOptions, Enricher};
use crate::core::lookup::{MovieLookup, TmdbClient};
use crate::core::table::{read_csv, write_csv, Table};
use crate::utils::MovieDataResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Ratings,
    Metadata,
    Financials,
}

impl Dataset {
    pub fn name(self) -> &'static str {
        match self {
            Dataset::Ratings => "ratings",
            Dataset::Metadata => "metadata",
            Dataset::Financials => "financials",
        }
    }

    pub fn clean(self, table: Table, config: &Config) -> MovieDataResult<Table> {
        match self {
            Dataset::Ratings => clean_ratings(table, config.cleaning.min_votes),
            Dataset::Metadata => clean_metadata(table),
            Dataset::Financials => clean_financials(table),
        }
    }
}

pub async fn run(config: &Config) -> MovieDataResult<()> {
    let output_dir = ensure_output_dir(config)?;

    let inputs = [
        (Dataset::Ratings, &config.data.ratings),
        (Dataset::Metadata, &config.data.metadata),
        (Dataset::Financials, &config.data.financials),
    ];
    for (dataset, path) in inputs {
        if let Some(path) = path {
            clean_file(dataset, Path::new(path), &output_dir, config)?;
        }
    }

    if let Some(target) = &config.data.enrich_target {
        let client: Arc<dyn MovieLookup> = Arc::new(TmdbClient::new(&config.tmdb)?);
        enrich_file(client, Path::new(target), &output_dir, config).await?;
    }

    Ok(())
}

pub fn clean_file(
    dataset: Dataset,
    input: &Path,
    output_dir: &Path,
    config: &Config,
) -> MovieDataResult<PathBuf> {
    let raw = read_csv(input)?;
    let raw_rows = raw.len();
    let cleaned = dataset.clean(raw, config)?;
    if cleaned.is_empty() && raw_rows > 0 {
        warn!(
            "Cleaning {} data from '{}' removed all {} rows",
            dataset.name(),
            input.display(),
            raw_rows
        );
    }

    let output = output_path(output_dir, input, "clean");
    write_csv(&cleaned, &output)?;
    info!(
        "Cleaned {} data: {} -> {} rows, written to '{}'",
        dataset.name(),
        raw_rows,
        cleaned.len(),
        output.display()
    );
    Ok(output)
}

pub async fn enrich_file(
    lookup: Arc<dyn MovieLookup>,
    input: &Path,
    output_dir: &Path,
    config: &Config,
) -> MovieDataResult<PathBuf> {
    let mut table = read_csv(input)?;
    let enricher = Enricher::new(lookup, EnrichOptions::from(&config.enrich));

    if config.enrich.fill_genres {
        enricher.fill_missing_genres(&mut table).await?;
    }
    if config.enrich.fill_franchise {
        enricher.fill_franchise_info(&mut table).await?;
    }

    let output = output_path(output_dir, input, "enriched");
    write_csv(&table, &output)?;
    info!("Enriched table written to '{}'", output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::core::lookup::LookupOutcome;

    struct FixedLookup;

    #[async_trait]
    impl MovieLookup for FixedLookup {
        async fn fetch_genre(&self, _movie_id: &str) -> LookupOutcome<String> {
            LookupOutcome::Found("Action".to_string())
        }

        async fn fetch_franchise(&self, movie_id: &str) -> LookupOutcome<String> {
            if movie_id == "9799" {
                LookupOutcome::Found("The Fast and the Furious Collection".to_string())
            } else {
                LookupOutcome::ConfirmedAbsent
            }
        }
    }

    #[test]
    fn cleans_each_dataset_to_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("tn.movie_budgets.csv");
        std::fs::write(
            &input,
            "release_date,movie,production_budget,domestic_gross,worldwide_gross\n\
             \"Jun 7, 2019\",Dark Phoenix,\"$350,000,000\",\"$42,762,350\",\"$149,762,350\"\n\
             \"May 1, 2015\",Untitled,\"$1,000\",,\"$0\"\n",
        )
        .unwrap();

        let out = clean_file(Dataset::Financials, &input, tmp.path(), &Config::default()).unwrap();
        assert_eq!(out, tmp.path().join("tn.movie_budgets_clean.csv"));
        let content = std::fs::read_to_string(out).unwrap();
        assert_eq!(
            content,
            "release_date,movie,production_budget,domestic_gross,worldwide_gross\n\
             2019-06-07,Dark Phoenix,350000000,42762350,149762350\n"
        );
    }

    #[test]
    fn ratings_below_vote_threshold_leave_header_only() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("ratings.csv");
        std::fs::write(&input, "averagerating,numvotes,primary_name\n6.1,12,Someone\n").unwrap();

        let out = clean_file(Dataset::Ratings, &input, tmp.path(), &Config::default()).unwrap();
        assert!(read_csv(&out).unwrap().is_empty());
        assert_eq!(
            std::fs::read_to_string(out).unwrap(),
            "averagerating,numvotes,primary_name\n"
        );
    }

    #[tokio::test]
    async fn enriches_target_table() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("merged.csv");
        std::fs::write(
            &input,
            "id_x,title,primary_genre\n9799.0,The Fast and the Furious,\n550.0,Fight Club,Drama\n",
        )
        .unwrap();

        let out = enrich_file(Arc::new(FixedLookup), &input, tmp.path(), &Config::default())
            .await
            .unwrap();
        let content = std::fs::read_to_string(out).unwrap();
        assert_eq!(
            content,
            "id_x,title,primary_genre,franchise,collection\n\
             9799.0,The Fast and the Furious,Action,true,The Fast and the Furious Collection\n\
             550.0,Fight Club,Drama,false,\n"
        );
    }
}
