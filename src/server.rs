use std::io;
use std::sync::Arc;

use ntex::web;
use ntex::web::HttpRequest;
use serde::Serialize;
use spdlog::{debug, info};

use crate::config::Config;
use crate::content_store::ContentStore;
use crate::listing::{related, ListingPage, ListingView};
use crate::query_string::QueryString;
use crate::ranking::{highlights, RankingWeights};
use crate::record::{ContentRecord, ContentType, RecordKey};

struct AppState {
    store: ContentStore,
    blog: ListingView,
    resources: ListingView,
    tutorials: ListingView,
    weights: RankingWeights,
    trending_count: usize,
    related_count: usize,
}

impl AppState {
    fn from_config(config: &Config, store: ContentStore) -> Self {
        let listing = &config.listing;
        AppState {
            store,
            blog: ListingView::blog(listing.blog_page_size),
            resources: ListingView::resources(listing.resources_page_size),
            tutorials: ListingView::tutorials(listing.tutorials_page_size),
            weights: config.ranking,
            trending_count: listing.trending_count,
            related_count: listing.related_count,
        }
    }
}

#[derive(Serialize)]
struct ListResponse<'a> {
    view: &'a str,
    /// Canonical query string of the state actually shown.
    query: String,
    #[serde(flatten)]
    listing: ListingPage<'a>,
}

#[derive(Serialize)]
struct RelatedResponse<'a> {
    record: &'a ContentRecord,
    related: Vec<&'a ContentRecord>,
}

fn render_list<'a>(req: &HttpRequest, state: &'a AppState, view: &'a ListingView) -> ListResponse<'a> {
    let qs = QueryString::from(req.uri().query().unwrap_or(""));
    let mut filter_state = qs.to_filter_state();
    let listing = view.run(state.store.records(), &filter_state);

    // the page may have been clamped against the new result set
    filter_state.set_page(listing.page);
    let query = qs.with_filter_state(&filter_state).encode();

    debug!("Listing {} query='{}' total={} page={}/{}",
        view.name, query, listing.total, listing.page, listing.total_pages);

    ListResponse {
        view: &view.name,
        query,
        listing,
    }
}

#[web::get("/api/blog")]
async fn blog(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    web::HttpResponse::Ok().json(&render_list(&req, &state, &state.blog))
}

#[web::get("/api/resources")]
async fn resources(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    web::HttpResponse::Ok().json(&render_list(&req, &state, &state.resources))
}

#[web::get("/api/tutorials")]
async fn tutorials(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    web::HttpResponse::Ok().json(&render_list(&req, &state, &state.tutorials))
}

#[web::get("/api/highlights")]
async fn highlights_list(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let res = highlights(state.store.records(), &state.weights, state.trending_count);
    web::HttpResponse::Ok().json(&res)
}

#[web::get("/api/{content_type}/{slug}/related")]
async fn related_list(path: web::types::Path<(String, String)>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let (content_type, slug) = path.into_inner();
    let content_type: ContentType = match content_type.parse() {
        Ok(t) => t,
        Err(e) => return web::HttpResponse::NotFound().body(e),
    };

    let key = RecordKey::new(content_type, &slug);
    let Some(record) = state.store.find(&key) else {
        return web::HttpResponse::NotFound()
            .body(format!("Could not find {}", key));
    };

    web::HttpResponse::Ok().json(&RelatedResponse {
        record,
        related: related(state.store.records(), &key, state.related_count),
    })
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let store = ContentStore::from_file(&config.paths.content_file)?;
    for content_type in [ContentType::Blog, ContentType::Tutorial, ContentType::Link] {
        info!("{} records: {}", content_type, store.of_type(content_type).len());
    }

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState::from_config(&config, store));

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(blog)
            .service(resources)
            .service(tutorials)
            .service(highlights_list)
            .service(related_list)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use ntex::http::StatusCode;
    use ntex::web::test;
    use serde_json::Value;

    use crate::config::parse_config;
    use crate::test_data::LIBRARY_RECORDS;

    use super::*;

    fn test_state() -> Arc<AppState> {
        let config = parse_config(r##"
[paths]
content_file = "records.json"

[listing]
blog_page_size = 1

[server]
address = "127.0.0.1"
port = 8001
"##).unwrap();
        let store = ContentStore::from_json(LIBRARY_RECORDS).unwrap();
        Arc::new(AppState::from_config(&config, store))
    }

    #[ntex::test]
    async fn test_blog_listing() {
        let app = test::init_service(
            web::App::new().state(test_state()).service(blog)
        ).await;

        let req = test::TestRequest::with_uri("/api/blog?page=9&ref=home").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["view"], "blog");
        assert_eq!(body["total"], 2);
        assert_eq!(body["page"], 2);
        assert_eq!(body["query"], "ref=home&page=2");
        assert_eq!(body["items"][0]["route"], "/blog/rust-ownership");
    }

    #[ntex::test]
    async fn test_malformed_query() {
        let app = test::init_service(
            web::App::new().state(test_state()).service(resources)
        ).await;

        let req = test::TestRequest::with_uri("/api/resources?page=oops&featured=maybe&category=").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["page"], 1);
        assert_eq!(body["total"], 6);
    }

    #[ntex::test]
    async fn test_related() {
        let app = test::init_service(
            web::App::new().state(test_state()).service(related_list)
        ).await;

        let req = test::TestRequest::with_uri("/api/blog/rust-ownership/related").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["record"]["id"], "b1");
        assert_eq!(body["related"].as_array().unwrap().len(), 3);

        let req = test::TestRequest::with_uri("/api/video/rust-ownership/related").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::with_uri("/api/tutorial/nope/related").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
