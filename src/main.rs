use clap::Parser;
use color_eyre::Result;

use lastchart::api::{LastfmClient, ResponseCache, MAX_PAGE_SIZE};
use lastchart::chart::fetch_chart;
use lastchart::cli::Args;
use lastchart::config::Credentials;
use lastchart::dataset::Dataset;
use lastchart::enrich::{enrich, LogProgress};
use lastchart::export::{upload_s3, write_local};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args = Args::parse();
    let credentials = Credentials::from_env()?;

    let cache = match &args.cache_dir {
        Some(dir) => ResponseCache::new(dir.clone()),
        None => ResponseCache::default(),
    }
    .bypass_reads(args.no_cache);
    let client = LastfmClient::new(credentials, cache)?;

    let limit = args.limit.min(MAX_PAGE_SIZE);
    let pages = fetch_chart(&client, &args.method, limit, args.max_pages).await;
    if pages.is_empty() {
        log::warn!("no chart pages fetched; the dataset will be empty");
    }

    let mut dataset = Dataset::assemble(pages)?;
    log::info!("assembled {} distinct artists", dataset.len());

    enrich(&client, &mut dataset, &mut LogProgress::default()).await;
    let tagged = dataset.rows().iter().filter(|r| r.tags.is_some()).count();
    log::info!("tags attached for {tagged}/{} artists", dataset.len());

    if let Some(path) = &args.output {
        write_local(&dataset, path)?;
    }
    if let Some(bucket) = &args.s3_bucket {
        upload_s3(&dataset, bucket, &args.s3_prefix).await?;
    }

    Ok(())
}
