use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "lastchart",
    about = "Fetch the Last.fm top-artists chart, enrich it with tags, export CSV"
)]
pub struct Args {
    /// Chart method to fetch
    #[arg(long, default_value = "chart.gettopartists")]
    pub method: String,

    /// Artists per page (provider caps this at 500)
    #[arg(long, default_value_t = 500)]
    pub limit: usize,

    /// Upper bound on chart pages to fetch
    #[arg(long, default_value_t = 1)]
    pub max_pages: usize,

    /// Local CSV destination
    #[arg(long, required_unless_present = "s3_bucket")]
    pub output: Option<PathBuf>,

    /// S3 bucket to upload the CSV to
    #[arg(long)]
    pub s3_bucket: Option<String>,

    /// Key prefix inside the bucket
    #[arg(long, default_value = "Artists")]
    pub s3_prefix: String,

    /// Response cache directory (defaults to the user cache dir)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Ignore cached responses (fresh responses are still recorded)
    #[arg(long)]
    pub no_cache: bool,
}
