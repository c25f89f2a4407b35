// Private Laws Dashboard - Web Server
// REST API + embedded dashboard page with Axum

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use private_laws_dashboard::{
    config, dashboard_stats, export_csv, export_filename, page_offset, theme, truncate_label,
    Dataset, FilterState, PrivateLaw, TimelineView,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Shared application state - the dataset is loaded once and read-only
#[derive(Clone)]
struct AppState {
    dataset: Arc<Dataset>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Query parameters shared by the laws, stats, and export endpoints
#[derive(Debug, Default, Deserialize)]
struct LawsQuery {
    year_from: Option<i32>,
    year_to: Option<i32>,
    subject: Option<String>,
    relief: Option<String>,
    q: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
    /// Timeline x-axis: "year" (default) or "congress"
    view: Option<String>,
}

impl LawsQuery {
    fn filter_state(&self, dataset: &Dataset) -> FilterState {
        let (year_min, year_max) = dataset.year_bounds();
        let mut state = FilterState::new(
            self.year_from.unwrap_or(year_min),
            self.year_to.unwrap_or(year_max),
        );
        state.subject = self.subject.clone().filter(|s| !s.is_empty());
        state.relief = self.relief.clone().filter(|s| !s.is_empty());
        state.search = self.q.clone().unwrap_or_default();
        state
    }

    fn page_size(&self) -> usize {
        let size = self.page_size.unwrap_or(config::DEFAULT_PAGE_SIZE);
        if config::PAGE_SIZES.contains(&size) {
            size
        } else {
            config::DEFAULT_PAGE_SIZE
        }
    }
}

/// Table row (truncated subject, like the dashboard table)
#[derive(Serialize)]
struct LawRow {
    id: u32,
    congress: Option<u32>,
    volume: Option<u32>,
    chapter: Option<u32>,
    title: String,
    date: String,
    subject_short: String,
}

impl From<&PrivateLaw> for LawRow {
    fn from(law: &PrivateLaw) -> Self {
        Self {
            id: law.id,
            congress: law.congress,
            volume: law.volume,
            chapter: law.chapter,
            title: law.title.clone(),
            date: law.date.clone(),
            subject_short: truncate_label(&law.subject_category, 33),
        }
    }
}

/// Full record for the info panel
#[derive(Serialize)]
struct LawDetail {
    id: u32,
    congress: Option<u32>,
    congress_display: String,
    volume: Option<u32>,
    chapter: Option<u32>,
    title: String,
    date: String,
    date_display: String,
    year: Option<i32>,
    subject_category: String,
    relief_category: String,
    summary: String,
    pdf_link: String,
    details_link: String,
}

impl From<&PrivateLaw> for LawDetail {
    fn from(law: &PrivateLaw) -> Self {
        Self {
            id: law.id,
            congress: law.congress,
            congress_display: law.congress_display(),
            volume: law.volume,
            chapter: law.chapter,
            title: law.title.clone(),
            date: law.date.clone(),
            date_display: law.display_date(),
            year: law.year,
            subject_category: law.subject_category.clone(),
            relief_category: law.relief_category.clone(),
            summary: law.summary.clone(),
            pdf_link: law.pdf_link.clone(),
            details_link: law.details_link.clone(),
        }
    }
}

/// One page of the filtered table
#[derive(Serialize)]
struct LawsPageResponse {
    total: usize,
    page: usize,
    page_size: usize,
    rows: Vec<LawRow>,
}

/// Both category label lists, for building the filter widgets
#[derive(Serialize)]
struct CategoriesResponse {
    subject: Vec<&'static str>,
    relief: Vec<&'static str>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/laws - Filtered, paged record list
async fn get_laws(State(state): State<AppState>, Query(query): Query<LawsQuery>) -> impl IntoResponse {
    let filter = query.filter_state(&state.dataset);
    let filtered = filter.apply(&state.dataset.laws);

    let page_size = query.page_size();
    let (page, offset) = page_offset(filtered.len(), query.page.unwrap_or(0), page_size);

    let rows: Vec<LawRow> = filtered
        .iter()
        .skip(offset)
        .take(page_size)
        .map(|law| LawRow::from(*law))
        .collect();

    Json(ApiResponse::ok(LawsPageResponse {
        total: filtered.len(),
        page,
        page_size,
        rows,
    }))
}

/// GET /api/laws/:id - Single record detail
async fn get_law(State(state): State<AppState>, Path(id): Path<u32>) -> impl IntoResponse {
    match state.dataset.law_by_id(id) {
        Some(law) => {
            (StatusCode::OK, Json(ApiResponse::ok(Some(LawDetail::from(law))))).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Option<LawDetail>> {
                success: false,
                data: None,
                error: Some(format!("No private law with id {}", id)),
            }),
        )
            .into_response(),
    }
}

/// GET /api/stats - Timeline and category breakdowns
async fn get_stats(State(state): State<AppState>, Query(query): Query<LawsQuery>) -> impl IntoResponse {
    let filter = query.filter_state(&state.dataset);
    let view = TimelineView::parse(query.view.as_deref().unwrap_or("year"));

    Json(ApiResponse::ok(dashboard_stats(&state.dataset, &filter, view)))
}

/// GET /api/categories - Subject and relief label lists
async fn get_categories() -> impl IntoResponse {
    Json(ApiResponse::ok(CategoriesResponse {
        subject: config::SUBJECT_CATEGORIES.to_vec(),
        relief: config::RELIEF_CATEGORIES.to_vec(),
    }))
}

/// GET /api/export - CSV download of the current filter state
async fn export(State(state): State<AppState>, Query(query): Query<LawsQuery>) -> impl IntoResponse {
    let filter = query.filter_state(&state.dataset);
    let filtered = filter.apply(&state.dataset.laws);

    match export_csv(&filtered) {
        Ok(csv) => {
            let filename = export_filename(filter.year_from, filter.year_to);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Err(e) => {
            eprintln!("Error exporting CSV: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "export failed").into_response()
        }
    }
}

/// GET / - Serve the dashboard page with theme variables injected
async fn serve_index() -> impl IntoResponse {
    let page = include_str!("../web/index.html").replace("/*__THEME__*/", &theme::css_variables());
    Html(page)
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Private Law Database - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let data_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DATA_FILE.to_string());
    let data_path = std::path::Path::new(&data_file);

    let dataset = if data_path.exists() {
        match Dataset::load_csv(data_path) {
            Ok(dataset) => dataset,
            Err(e) => {
                eprintln!("❌ Failed to load {}: {:#}", data_file, e);
                std::process::exit(1);
            }
        }
    } else if config::USE_SAMPLE_IF_MISSING {
        println!("⚠ {} not found. Using sample data for testing.", data_file);
        Dataset::sample(config::SAMPLE_RECORD_COUNT)
    } else {
        eprintln!("❌ Data file not found: {}", data_file);
        std::process::exit(1);
    };

    let (year_min, year_max) = dataset.year_bounds();
    println!("✓ Loaded {} private laws ({} - {})", dataset.len(), year_min, year_max);

    // Create shared state
    let state = AppState {
        dataset: Arc::new(dataset),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/laws", get(get_laws))
        .route("/laws/:id", get(get_law))
        .route("/stats", get(get_stats))
        .route("/categories", get(get_categories))
        .route("/export", get(export))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive());

    // Start server
    let listener = tokio::net::TcpListener::bind(config::SERVER_ADDR)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:8050");
    println!("   API: http://localhost:8050/api/laws");
    println!("   UI:  http://localhost:8050");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
