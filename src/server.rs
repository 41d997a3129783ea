//! REST API for vecsearch.
//!
//! Serves one in-memory [`VectorStore`] shared by every worker. The store is
//! behind a read-write lock: searches run side by side, inserts are exclusive.
//! Nothing is written to disk; the data lives as long as the process.
//!
//! ## Endpoints
//!
//! - `POST /insert` - Append vectors
//! - `POST /search` - Search for similar vectors
//! - `POST /get` - Retrieve vectors by ID
//! - `GET /count` - Number of stored vectors
//!
//! ## Usage
//!
//! ```rust,no_run
//! use actix_web::{App, HttpServer};
//! use vecsearch::{server, VectorStore};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let state = server::app_state(VectorStore::new());
//!     HttpServer::new(move || App::new().app_data(state.clone()).configure(server::config))
//!         .bind("0.0.0.0:7878")?
//!         .run()
//!         .await
//! }
//! ```

use actix_web::{error::InternalError, web, HttpResponse, Responder};
use parking_lot::RwLock;
use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};
use crate::{Vector, VectorStore};

pub type SharedStore = RwLock<VectorStore>;

/// Wraps a store for use as actix-web application data.
pub fn app_state(store: VectorStore) -> web::Data<SharedStore> {
    web::Data::new(RwLock::new(store))
}

// --- Request structs ---

#[derive(Deserialize)]
struct Query {
    value: Vec<f32>,
    top_k: usize,
}

#[derive(Deserialize)]
struct InsertRequest {
    vectors: Vec<Vector>,
}

#[derive(Deserialize)]
struct SearchRequest {
    queries: Vec<Query>,
}

#[derive(Deserialize)]
struct GetRequest {
    ids: Vec<String>,
}

// --- Response structs ---

#[derive(Serialize)]
struct InsertResponse {
    inserted: usize,
    count: usize,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<SearchResultGroup>,
}

#[derive(Serialize)]
struct SearchResultGroup {
    matches: Vec<MatchResult>,
}

#[derive(Serialize)]
struct MatchResult {
    id: String,
    metadata: String,
    score: f64,
    values: Vec<f32>,
}

#[derive(Serialize)]
struct GetResponse {
    results: Vec<GetResult>,
}

#[derive(Serialize)]
struct GetResult {
    id: String,
    values: Option<Vec<f32>>,
    metadata: Option<String>,
}

#[derive(Serialize)]
struct CountResponse {
    count: usize,
    dimension: Option<usize>,
}

// --- Handlers ---

async fn insert_handler(
    store: web::Data<SharedStore>,
    body: web::Json<InsertRequest>,
) -> impl Responder {
    let InsertRequest { vectors } = body.into_inner();
    let inserted = vectors.len();

    let count = {
        let mut store = store.write();
        store.extend(vectors);
        store.len()
    };

    info!(inserted, count, "insert request");
    HttpResponse::Ok().json(InsertResponse { inserted, count })
}

async fn search_handler(
    store: web::Data<SharedStore>,
    body: web::Json<SearchRequest>,
) -> impl Responder {
    let store = store.read();

    let results = body.queries.iter()
        .map(|q| SearchResultGroup {
            matches: store.query(&q.value, q.top_k)
                .into_iter()
                .map(|r| MatchResult {
                    id: r.vector.id,
                    metadata: r.vector.metadata,
                    score: r.similarity,
                    values: r.vector.values,
                })
                .collect(),
        })
        .collect();

    debug!(queries = body.queries.len(), "search request");
    HttpResponse::Ok().json(SearchResponse { results })
}

async fn get_handler(
    store: web::Data<SharedStore>,
    body: web::Json<GetRequest>,
) -> impl Responder {
    let store = store.read();

    let results = body.ids.iter()
        .map(|id| {
            let found = store.get(id);
            GetResult {
                id: id.clone(),
                values: found.map(|v| v.values.clone()),
                metadata: found.map(|v| v.metadata.clone()),
            }
        })
        .collect();

    HttpResponse::Ok().json(GetResponse { results })
}

async fn count_handler(store: web::Data<SharedStore>) -> impl Responder {
    let store = store.read();
    HttpResponse::Ok().json(CountResponse { count: store.len(), dimension: store.dimension() })
}

/// Rejects malformed bodies, including a negative `top_k`, with a JSON 400.
fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    warn!(error = %message, "rejected request body");
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(serde_json::json!({"error": message})),
    )
    .into()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
       .service(web::resource("/insert").route(web::post().to(insert_handler)))
       .service(web::resource("/search").route(web::post().to(search_handler)))
       .service(web::resource("/get").route(web::post().to(get_handler)))
       .service(web::resource("/count").route(web::get().to(count_handler)));
}
