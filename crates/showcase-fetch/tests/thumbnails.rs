//! Integration tests for `ThumbnailBatcher` using wiremock HTTP mocks.

use showcase_core::ItemId;
use showcase_fetch::{JsonFetcher, RetryPolicy, ThumbnailBatcher, DEFAULT_BATCH_SIZE};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Answers every request with one thumbnail per requested universe id.
struct EchoThumbnails;

impl Respond for EchoThumbnails {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let ids = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "universeIds")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();
        let data: Vec<serde_json::Value> = ids
            .split(',')
            .filter(|id| !id.is_empty())
            .map(|id| {
                serde_json::json!({
                    "targetId": id.parse::<u64>().unwrap_or(0),
                    "universeId": id,
                    "thumbnails": [ { "imageUrl": format!("https://img.example.com/{id}.png") } ]
                })
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": data }))
    }
}

fn test_batcher(base_url: &str) -> ThumbnailBatcher {
    let fetcher = JsonFetcher::new(5, "showcase-test/0.1", None, RetryPolicy::none())
        .expect("fetcher construction should not fail");
    ThumbnailBatcher::new(fetcher, base_url, DEFAULT_BATCH_SIZE)
}

fn ids(range: std::ops::RangeInclusive<u64>) -> Vec<ItemId> {
    range.map(ItemId::from).collect()
}

fn joined(range: std::ops::RangeInclusive<u64>) -> String {
    range.map(|n| n.to_string()).collect::<Vec<_>>().join(",")
}

async fn chunk_sizes(server: &MockServer) -> Vec<usize> {
    let mut sizes: Vec<usize> = server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "universeIds")
                .map_or(0, |(_, v)| v.split(',').count())
        })
        .collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}

#[tokio::test]
async fn one_hundred_twenty_ids_make_three_chunk_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/games/multiget/thumbnails"))
        .and(query_param("size", "768x432"))
        .and(query_param("format", "Png"))
        .and(query_param("isCircular", "false"))
        .respond_with(EchoThumbnails)
        .expect(3)
        .mount(&server)
        .await;

    let map = test_batcher(&server.uri()).resolve(&ids(1..=120)).await;

    assert_eq!(map.len(), 120);
    assert_eq!(map[&ItemId::from(120)], "https://img.example.com/120.png");
    assert_eq!(chunk_sizes(&server).await, [50, 50, 20]);
}

#[tokio::test]
async fn failing_middle_chunk_does_not_block_siblings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("universeIds", joined(51..=100).as_str()))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(EchoThumbnails)
        .mount(&server)
        .await;

    let map = test_batcher(&server.uri()).resolve(&ids(1..=120)).await;

    assert_eq!(map.len(), 70);
    for n in (1..=50).chain(101..=120) {
        assert!(map.contains_key(&ItemId::from(n)), "id {n} should resolve");
    }
    for n in 51..=100 {
        assert!(!map.contains_key(&ItemId::from(n)), "id {n} should be unresolved");
    }
    assert_eq!(chunk_sizes(&server).await, [50, 50, 20]);
}

#[tokio::test]
async fn rows_without_thumbnails_stay_unresolved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "universeId": 1,
                    "thumbnails": [ { "imageUrl": "https://img.example.com/1.png" } ]
                },
                { "universeId": 2, "thumbnails": [] },
                { "thumbnails": [ { "imageUrl": "https://img.example.com/x.png" } ] }
            ]
        })))
        .mount(&server)
        .await;

    let map = test_batcher(&server.uri()).resolve(&ids(1..=3)).await;
    assert_eq!(map.len(), 1);
    assert_eq!(map[&ItemId::from(1)], "https://img.example.com/1.png");
}

#[tokio::test]
async fn empty_input_issues_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(EchoThumbnails)
        .expect(0)
        .mount(&server)
        .await;

    let map = test_batcher(&server.uri()).resolve(&[]).await;
    assert!(map.is_empty());
}
