use std::path::Path;

use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Local};

use crate::dataset::Dataset;
use crate::Error;

static CSV_HEADER: &str = "name,playcount,listeners,mbid,url,streamable,tags";

/// Render the whole dataset to CSV in memory. Both sinks consume this same
/// buffer, so a sink failure can never leave a half-written artifact behind.
pub fn to_csv(dataset: &Dataset) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for row in dataset.rows() {
        let fields = [
            csv_field(&row.name),
            row.playcount.to_string(),
            row.listeners.to_string(),
            csv_field(&row.mbid),
            csv_field(&row.url),
            csv_field(&row.streamable),
            csv_field(row.tags.as_deref().unwrap_or("")),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// RFC 4180 quoting: wrap when the value contains a comma, quote, or line
/// break, doubling any embedded quotes.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn write_local<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<(), Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, to_csv(dataset))?;
    log::info!("wrote {} rows to {}", dataset.len(), path.display());
    Ok(())
}

/// Object key templated by extraction date, so successive runs land in
/// date-partitioned prefixes: `{prefix}/extracted_at={date}/artists_{ts}.csv`.
pub fn object_key(prefix: &str, now: DateTime<Local>) -> String {
    format!(
        "{}/extracted_at={}/artists_{}.csv",
        prefix.trim_end_matches('/'),
        now.format("%Y-%m-%d"),
        now.format("%Y-%m-%dT%H-%M-%S")
    )
}

pub async fn upload_s3(dataset: &Dataset, bucket: &str, prefix: &str) -> Result<(), Error> {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_s3::Client::new(&config);

    let key = object_key(prefix, Local::now());
    let csv = to_csv(dataset);

    client
        .put_object()
        .bucket(bucket)
        .key(&key)
        .content_type("text/csv")
        .body(ByteStream::from(csv.into_bytes()))
        .send()
        .await
        .map_err(Error::custom)?;

    log::info!("uploaded {} rows to s3://{bucket}/{key}", dataset.len());
    Ok(())
}
