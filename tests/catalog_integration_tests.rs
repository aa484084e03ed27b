use std::sync::Arc;
use std::time::Duration;

use libris::catalog::{CatalogError, CatalogProvider, GoogleBooksProvider};
use libris::core::action::{Action, Effect, update};
use libris::core::book::BookRecord;
use libris::core::favorites::{AddOutcome, FavoritesStore};
use libris::core::search::{self, SearchQuery};
use libris::core::state::App;
use libris::storage::MemoryStore;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param, query_param_is_missing},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn provider_for(server: &MockServer, api_key: Option<&str>) -> GoogleBooksProvider {
    GoogleBooksProvider::new(
        api_key.map(str::to_string),
        Some(server.uri()),
        Duration::from_secs(5),
    )
    .unwrap()
}

async fn search_for(
    provider: &GoogleBooksProvider,
    raw: &str,
    page_size: u32,
) -> Result<Vec<BookRecord>, CatalogError> {
    let query = SearchQuery::parse(raw).unwrap();
    search::run(provider, &query, page_size).await
}

fn dune_volumes() -> serde_json::Value {
    serde_json::json!({
        "kind": "books#volumes",
        "totalItems": 3,
        "items": [
            {
                "id": "B1",
                "volumeInfo": {
                    "title": "Dune",
                    "authors": ["Frank Herbert"],
                    "publishedDate": "1965",
                    "description": "Desert planet.",
                    "imageLinks": {
                        "smallThumbnail": "http://books.example/b1-small.jpg",
                        "thumbnail": "http://books.example/b1.jpg"
                    }
                }
            },
            {
                "id": "B2",
                "volumeInfo": {
                    "title": "Dune Messiah",
                    "authors": ["Frank Herbert"]
                }
            },
            {
                "id": "B3",
                "volumeInfo": {}
            }
        ]
    })
}

// ============================================================================
// Google Books Provider Tests
// ============================================================================

#[tokio::test]
async fn test_search_returns_records_in_provider_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("q", "dune"))
        .and(query_param("maxResults", "20"))
        .and(query_param_is_missing("key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dune_volumes()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, None);
    let records = search_for(&provider, "  dune ", 20).await.unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["B1", "B2", "B3"]);

    let first = &records[0];
    assert_eq!(first.display_title(), "Dune");
    assert_eq!(first.display_authors(), "Frank Herbert");
    assert_eq!(first.published(), Some("1965"));
    assert_eq!(first.thumbnail(), Some("http://books.example/b1.jpg"));

    // Sparse record falls back to placeholders
    let sparse = &records[2];
    assert_eq!(sparse.display_title(), "Untitled");
    assert_eq!(sparse.display_authors(), "Unknown author");
    assert_eq!(sparse.display_description(), "No description available.");
}

#[tokio::test]
async fn test_blank_query_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dune_volumes()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let catalog: Arc<dyn CatalogProvider> = Arc::new(provider_for(&mock_server, None));
    let favorites = Arc::new(FavoritesStore::new(Arc::new(MemoryStore::new())));
    let mut app = App::new(catalog, favorites, 20);

    let effect = update(&mut app, Action::SubmitSearch("   ".to_string()));
    assert_eq!(effect, Effect::None);
    assert!(app.results.is_empty());
    assert!(!app.is_searching);
}

#[tokio::test]
async fn test_missing_items_is_empty_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/volumes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"kind": "books#volumes", "totalItems": 0})),
        )
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, None);
    let records = search_for(&provider, "zzzzqqq", 20).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_api_key_and_page_size_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("key", "test-key"))
        .and(query_param("maxResults", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dune_volumes()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Some("test-key"));
    let records = search_for(&provider, "dune", 5).await.unwrap();
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn test_results_truncated_to_page_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dune_volumes()))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, None);
    let records = search_for(&provider, "dune", 2).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].id, "B2");
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/volumes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, None);
    let result = search_for(&provider, "dune", 20).await;

    match result {
        Err(CatalogError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("backend exploded"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_maps_to_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, None);
    let result = search_for(&provider, "dune", 20).await;
    assert!(matches!(result, Err(CatalogError::Parse(_))));
}

#[tokio::test]
async fn test_unreachable_server_maps_to_network_error() {
    // Nothing listens on this port once the server is dropped
    let uri = {
        let mock_server = MockServer::start().await;
        mock_server.uri()
    };
    let provider =
        GoogleBooksProvider::new(None, Some(uri), Duration::from_secs(2)).unwrap();
    let result = search_for(&provider, "dune", 20).await;
    assert!(matches!(result, Err(CatalogError::Network(_))));
}

#[tokio::test]
async fn test_provider_name() {
    let mock_server = MockServer::start().await;
    let provider = provider_for(&mock_server, None);
    assert_eq!(provider.name(), "google-books");
}

// ============================================================================
// Search → Favorites
// ============================================================================

#[tokio::test]
async fn test_selected_result_round_trips_through_favorites() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dune_volumes()))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, None);
    let records = search_for(&provider, "dune", 20).await.unwrap();
    let selected: BookRecord = records[0].clone();

    let store = FavoritesStore::new(Arc::new(MemoryStore::new()));
    assert!(matches!(
        store.add(selected.clone()).await.unwrap(),
        AddOutcome::Added
    ));
    assert!(matches!(
        store.add(selected.clone()).await.unwrap(),
        AddOutcome::AlreadyPresent(_)
    ));

    let saved = store.list().await.unwrap();
    assert_eq!(saved, vec![selected]);
}
