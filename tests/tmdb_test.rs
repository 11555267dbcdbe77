//! TMDB provider tests against a wiremock server.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plexletter::config::TmdbConfig;
use plexletter::metadata::providers::TmdbProvider;
use plexletter::metadata::{search_media, MediaKind, MetadataProvider};

fn provider(server: &MockServer) -> TmdbProvider {
    TmdbProvider::new(&TmdbConfig {
        api_key: "test-key".into(),
        base_url: server.uri(),
        image_base_url: "https://img.test/t/p".into(),
    })
}

#[tokio::test]
async fn movie_details_are_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/329865"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Arrival",
            "release_date": "2016-11-10",
            "vote_average": 7.6,
            "vote_count": 18000,
            "genres": [{"id": 18, "name": "Drama"}, {"id": 878, "name": "Science Fiction"}],
            "poster_path": "/x2FJsf1ElAgr63Y3PNPtJrcmpoe.jpg",
            "overview": "Linguist meets visitors.",
            "imdb_id": "tt2543164"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let details = provider(&server).movie_details("329865").await.unwrap();
    assert_eq!(details.title, "Arrival");
    assert_eq!(details.release_date, "2016-11-10");
    assert_eq!(details.vote_count, 18000);
    assert_eq!(details.genres, vec!["Drama", "Science Fiction"]);
    assert_eq!(
        details.poster_url.as_deref(),
        Some("https://img.test/t/p/w500/x2FJsf1ElAgr63Y3PNPtJrcmpoe.jpg")
    );
    assert_eq!(details.imdb_id.as_deref(), Some("tt2543164"));
}

#[tokio::test]
async fn tv_details_use_name_and_first_air_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/95396"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Severance",
            "first_air_date": "2022-02-17",
            "vote_average": 8.4,
            "vote_count": 2100,
            "genres": [{"id": 18, "name": "Drama"}],
            "poster_path": null
        })))
        .mount(&server)
        .await;

    let details = provider(&server).tv_details("95396").await.unwrap();
    assert_eq!(details.title, "Severance");
    assert_eq!(details.release_date, "2022-02-17");
    assert_eq!(details.poster_url, None);
    assert_eq!(details.overview, "");
    assert_eq!(details.imdb_id, None);
}

#[tokio::test]
async fn not_found_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status_message": "The resource you requested could not be found."
        })))
        .mount(&server)
        .await;

    assert!(provider(&server).movie_details("1").await.is_err());
}

#[tokio::test]
async fn non_numeric_ids_never_reach_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Wrong" })))
        .expect(0)
        .mount(&server)
        .await;

    let tmdb = provider(&server);
    let err = tmdb.movie_details("1?language=fr").await.unwrap_err();
    assert!(err.to_string().contains("invalid TMDB movie id"));
    assert!(tmdb.tv_details("../tv/5").await.is_err());
}

#[tokio::test]
async fn search_merges_both_catalogs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "dune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": 438631, "title": "Dune", "release_date": "2021-09-15",
                 "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg", "popularity": 120.5},
                {"id": 1, "title": "Dune (unreleased)", "release_date": "",
                 "poster_path": "/a.jpg", "popularity": 900.0},
                {"id": 2, "title": "No Poster Dune", "release_date": "1984-12-14",
                 "poster_path": null, "popularity": 300.0}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .and(query_param("query", "dune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": 90228, "name": "Dune: Prophecy", "first_air_date": "2024-11-17",
                 "poster_path": "/p.jpg", "popularity": 200.0}
            ]
        })))
        .mount(&server)
        .await;

    let hits = search_media(&provider(&server), "dune").await.unwrap();
    assert_eq!(hits.len(), 2);

    assert_eq!(hits[0].id, 90228);
    assert_eq!(hits[0].kind, MediaKind::Tv);
    assert_eq!(hits[0].title, "Dune: Prophecy");
    assert_eq!(hits[0].year, "2024");
    assert_eq!(hits[0].poster_url, "https://img.test/t/p/w200/p.jpg");

    assert_eq!(hits[1].id, 438631);
    assert_eq!(hits[1].kind, MediaKind::Movie);
    assert_eq!(hits[1].year, "2021");
}

#[tokio::test]
async fn search_fails_when_either_catalog_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = search_media(&provider(&server), "dune").await.unwrap_err();
    assert_eq!(err.http_status(), 500);
}
