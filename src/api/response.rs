use serde::{Deserialize, Deserializer};

/// Deserialize a JSON value while keeping the path to whatever field failed.
/// Last.fm nests its payloads deeply enough that a bare serde error is
/// useless for debugging.
#[macro_export]
macro_rules! parse_json {
    ($type: ty: $value: expr) => {{
        let jd = &mut serde_json::Deserializer::from_str($value);
        serde_path_to_error::deserialize::<_, $type>(jd)
    }};
}

pub use crate::parse_json;

/// Pagination attributes are reported as strings ("page": "1").
pub fn deserialize_stringly_usize<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

/// Envelope of `chart.gettopartists`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopArtists {
    pub artists: ChartPage,
}

/// One page of the top-artists chart: the raw artist entries plus the
/// provider's own pagination metadata.
///
/// The `image` field Last.fm attaches to every entry is deliberately not
/// modeled; it never reaches the dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartPage {
    #[serde(default = "Vec::new")]
    pub artist: Vec<RawArtist>,
    #[serde(rename = "@attr")]
    pub attr: PageAttr,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageAttr {
    /// The page this response actually covers, as reported by the provider.
    #[serde(deserialize_with = "deserialize_stringly_usize")]
    pub page: usize,
    /// Total pages available for the requested page size.
    #[serde(rename = "totalPages", deserialize_with = "deserialize_stringly_usize")]
    pub total_pages: usize,
}

/// One chart entry as the provider ships it. Counts stay as strings here;
/// coercion to integers is the assembler's job and its failures must be
/// loud, not hidden in deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawArtist {
    pub name: String,
    pub playcount: String,
    pub listeners: String,
    #[serde(default)]
    pub mbid: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub streamable: String,
}

/// Envelope of `artist.getTopTags`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopTags {
    pub toptags: TagList,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TagList {
    #[serde(default = "Vec::new")]
    pub tag: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}
