use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod document;
pub mod quotation;
pub mod session;
pub mod state;

pub use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn conflict(message: &str) -> Self {
        Self::new("Conflict", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::session::handlers::get_quotation,
        crate::session::handlers::reset_quotation,
        crate::session::handlers::update_client,
        crate::session::handlers::update_contractor,
        crate::session::handlers::update_terms,
        crate::session::handlers::update_issue,
        crate::session::handlers::add_service,
        crate::session::handlers::clear_services,
        crate::session::handlers::duplicate_last_service,
        crate::session::handlers::remove_last_service,
        crate::session::handlers::update_service,
        crate::session::handlers::remove_service,
        crate::session::handlers::get_summary,
        crate::session::handlers::get_preview,
        crate::session::handlers::get_checklist,
        crate::session::handlers::generate_quotation,
        crate::session::handlers::get_presets
    ),
    components(
        schemas(
            quotation::Quotation,
            quotation::ServiceLineItem,
            quotation::MeasurementKind,
            quotation::ClientInfo,
            quotation::ContractorInfo,
            quotation::Terms,
            quotation::presets::TermPresets,
            document::ValidationError,
            document::Checklist,
            document::validation::ChecklistItem,
            session::handlers::UpdateIssueRequest,
            session::handlers::ValidationFailureResponse,
            session::views::QuotationSummary,
            session::views::SummaryItem,
            session::views::QuotationPreview,
            session::views::PreviewLine,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Quotation", description = "Quotation editing and PDF generation."),
        (name = "Services", description = "Service line item endpoints.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Localhost server")
    )
)]
pub struct ApiDoc;

/// Registers every API route; mounted under `/api` by [`run`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(session::config);
}

pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::AppConfig::from_env()?;
    let contractor = config.load_contractor()?;
    let app_state = web::Data::new(AppState::from_config(&config, contractor));

    if !config.logo_path().is_file() {
        log::warn!(
            "logo {} not found, documents will use the text heading",
            config.logo_path().display()
        );
    }

    log::info!(
        "generated documents are written to {}",
        app_state.generator.output_path().display()
    );

    let prometheus = PrometheusMetricsBuilder::new("quotation_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create Prometheus metrics middleware: {}", e))?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(web::scope("/api").configure(configure))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
