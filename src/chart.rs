use crate::api::response::{ChartPage, TopArtists};
use crate::api::{Gateway, LastfmRequest};
use crate::parse_json;

/// Walk the paginated chart endpoint and collect whatever pages arrive.
///
/// The cursor starts at page 1 and follows the page number the provider
/// reports back; the loop runs until the provider's reported `totalPages`,
/// capped by `max_pages`. Any transport failure or malformed payload stops
/// the walk and yields the pages fetched so far — a short or empty result is
/// a degraded outcome for the caller to inspect, never an error.
pub async fn fetch_chart<G: Gateway>(
    gateway: &G,
    method: &str,
    limit: usize,
    max_pages: usize,
) -> Vec<ChartPage> {
    let mut pages = Vec::new();
    let mut page = 1usize;
    let mut total_pages = max_pages.max(1);

    while page <= total_pages {
        log::info!("requesting chart page {page}/{total_pages}");

        let request = LastfmRequest::new(method)
            .param("limit", limit)
            .param("page", page);

        let response = match gateway.get(request).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("chart fetch stopped on page {page}: {e}");
                break;
            }
        };

        let parsed = match parse_json!(TopArtists: &response.body) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("chart fetch stopped on page {page}: {e}");
                break;
            }
        };

        page = parsed.artists.attr.page;
        total_pages = parsed.artists.attr.total_pages.min(max_pages.max(1));

        pages.push(parsed.artists);
        page += 1;
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedGateway;

    fn page_body(page: usize, total_pages: usize, names: &[&str]) -> String {
        let artists = names
            .iter()
            .map(|name| {
                format!(
                    r#"{{"name": "{name}", "playcount": "10", "listeners": "5",
                        "mbid": "", "url": "", "streamable": "0"}}"#
                )
            })
            .collect::<Vec<_>>()
            .join(",");
        format!(
            r#"{{"artists": {{"artist": [{artists}],
                "@attr": {{"page": "{page}", "totalPages": "{total_pages}"}}}}}}"#
        )
    }

    #[tokio::test]
    async fn single_page_walk() {
        let gateway = ScriptedGateway::new([ScriptedGateway::ok(&page_body(1, 20, &["A", "B"]))]);
        let pages = fetch_chart(&gateway, "chart.gettopartists", 500, 1).await;

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].artist.len(), 2);
        assert_eq!(gateway.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn provider_total_is_honored_up_to_the_cap() {
        let gateway = ScriptedGateway::new([
            ScriptedGateway::ok(&page_body(1, 3, &["A"])),
            ScriptedGateway::ok(&page_body(2, 3, &["B"])),
            ScriptedGateway::ok(&page_body(3, 3, &["C"])),
        ]);
        let pages = fetch_chart(&gateway, "chart.gettopartists", 500, 10).await;

        assert_eq!(pages.len(), 3);
        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests[1].params.get("page"), Some(&"2".to_string()));
        assert_eq!(requests[2].params.get("page"), Some(&"3".to_string()));
    }

    #[tokio::test]
    async fn cap_truncates_a_deep_chart() {
        let gateway = ScriptedGateway::new([
            ScriptedGateway::ok(&page_body(1, 50, &["A"])),
            ScriptedGateway::ok(&page_body(2, 50, &["B"])),
        ]);
        let pages = fetch_chart(&gateway, "chart.gettopartists", 500, 2).await;
        assert_eq!(pages.len(), 2);
        assert_eq!(gateway.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failure_on_page_two_keeps_page_one() {
        let gateway = ScriptedGateway::new([
            ScriptedGateway::ok(&page_body(1, 5, &["A", "B"])),
            ScriptedGateway::failure(),
        ]);
        let pages = fetch_chart(&gateway, "chart.gettopartists", 500, 5).await;

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].artist[0].name, "A");
    }

    #[tokio::test]
    async fn immediate_failure_yields_nothing() {
        let gateway = ScriptedGateway::new([ScriptedGateway::failure()]);
        let pages = fetch_chart(&gateway, "chart.gettopartists", 500, 1).await;
        assert!(pages.is_empty());
    }

    #[tokio::test]
    async fn malformed_payload_stops_the_walk() {
        let gateway = ScriptedGateway::new([
            ScriptedGateway::ok(&page_body(1, 5, &["A"])),
            ScriptedGateway::ok("{\"artists\": \"not an object\"}"),
        ]);
        let pages = fetch_chart(&gateway, "chart.gettopartists", 500, 5).await;
        assert_eq!(pages.len(), 1);
    }
}
