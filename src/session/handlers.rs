use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::document::{Checklist, GenerationError, ValidationError};
use crate::quotation::presets::TermPresets;
use crate::quotation::{ClientInfo, ContractorInfo, EditError, Quotation, ServiceLineItem, Terms};
use crate::session::views::{QuotationPreview, QuotationSummary};
use crate::{AppState, ErrorResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateIssueRequest {
    #[schema(example = "2024-10-30")]
    pub issue_date: Option<NaiveDate>,
    #[schema(example = "Brasília - DF")]
    pub issue_location: Option<String>,
}

/// Body of a refused generation: every unmet condition plus the full checklist.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationFailureResponse {
    pub error: String,
    pub message: String,
    pub failures: Vec<ValidationError>,
    pub checklist: Checklist,
}

fn edit_error_response(error: EditError) -> HttpResponse {
    match error {
        EditError::NoSuchService(_) => {
            HttpResponse::NotFound().json(ErrorResponse::not_found(&error.to_string()))
        }
        EditError::LastService => {
            HttpResponse::Conflict().json(ErrorResponse::conflict(&error.to_string()))
        }
        EditError::NegativeAmount(_) => {
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&error.to_string()))
        }
    }
}

fn edit_result<T>(state: &web::Data<AppState>, result: Result<T, EditError>) -> HttpResponse {
    match result {
        Ok(_) => {
            log::info!("service list updated");
            HttpResponse::Ok().json(state.snapshot())
        }
        Err(e) => {
            log::debug!("edit refused: {}", e);
            edit_error_response(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/quotation",
    tag = "Quotation",
    responses(
        (status = 200, description = "Current session quotation", body = Quotation)
    )
)]
pub async fn get_quotation(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.snapshot())
}

#[utoipa::path(
    delete,
    path = "/api/quotation",
    tag = "Quotation",
    responses(
        (status = 200, description = "Session reset to a fresh quotation", body = Quotation)
    )
)]
pub async fn reset_quotation(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.reset())
}

#[utoipa::path(
    put,
    path = "/api/quotation/client",
    tag = "Quotation",
    request_body = ClientInfo,
    responses(
        (status = 200, description = "Client updated", body = Quotation)
    )
)]
pub async fn update_client(
    state: web::Data<AppState>,
    item: web::Json<ClientInfo>,
) -> impl Responder {
    state.update(|q| q.client = item.into_inner());
    log::info!("client data updated");
    HttpResponse::Ok().json(state.snapshot())
}

#[utoipa::path(
    put,
    path = "/api/quotation/contractor",
    tag = "Quotation",
    request_body = ContractorInfo,
    responses(
        (status = 200, description = "Contractor updated", body = Quotation)
    )
)]
pub async fn update_contractor(
    state: web::Data<AppState>,
    item: web::Json<ContractorInfo>,
) -> impl Responder {
    state.update(|q| q.contractor = item.into_inner());
    log::info!("contractor data updated");
    HttpResponse::Ok().json(state.snapshot())
}

#[utoipa::path(
    put,
    path = "/api/quotation/terms",
    tag = "Quotation",
    request_body = Terms,
    responses(
        (status = 200, description = "Terms updated", body = Quotation)
    )
)]
pub async fn update_terms(state: web::Data<AppState>, item: web::Json<Terms>) -> impl Responder {
    state.update(|q| q.terms = item.into_inner());
    log::info!("terms updated");
    HttpResponse::Ok().json(state.snapshot())
}

#[utoipa::path(
    put,
    path = "/api/quotation/issue",
    tag = "Quotation",
    request_body = UpdateIssueRequest,
    responses(
        (status = 200, description = "Issue date and location updated", body = Quotation)
    )
)]
pub async fn update_issue(
    state: web::Data<AppState>,
    item: web::Json<UpdateIssueRequest>,
) -> impl Responder {
    let request = item.into_inner();
    state.update(|q| {
        if let Some(date) = request.issue_date {
            q.issue_date = date;
        }
        if let Some(location) = request.issue_location {
            q.issue_location = location;
        }
    });
    log::info!("issue date and location updated");
    HttpResponse::Ok().json(state.snapshot())
}

#[utoipa::path(
    post,
    path = "/api/quotation/services",
    tag = "Services",
    responses(
        (status = 200, description = "Blank service appended", body = Quotation)
    )
)]
pub async fn add_service(state: web::Data<AppState>) -> impl Responder {
    let index = state.update(|q| q.add_service());
    log::info!("service {} added", index + 1);
    HttpResponse::Ok().json(state.snapshot())
}

#[utoipa::path(
    delete,
    path = "/api/quotation/services",
    tag = "Services",
    responses(
        (status = 200, description = "Services cleared, one blank service left", body = Quotation)
    )
)]
pub async fn clear_services(state: web::Data<AppState>) -> impl Responder {
    state.update(|q| q.clear_services());
    log::info!("services cleared");
    HttpResponse::Ok().json(state.snapshot())
}

#[utoipa::path(
    post,
    path = "/api/quotation/services/duplicate",
    tag = "Services",
    responses(
        (status = 200, description = "Last service duplicated", body = Quotation),
        (status = 404, description = "No service to duplicate", body = ErrorResponse)
    )
)]
pub async fn duplicate_last_service(state: web::Data<AppState>) -> impl Responder {
    let result = state.update(|q| q.duplicate_last_service());
    edit_result(&state, result)
}

#[utoipa::path(
    delete,
    path = "/api/quotation/services/last",
    tag = "Services",
    responses(
        (status = 200, description = "Last service removed", body = Quotation),
        (status = 409, description = "Only one service left", body = ErrorResponse)
    )
)]
pub async fn remove_last_service(state: web::Data<AppState>) -> impl Responder {
    let result = state.update(|q| q.remove_last_service());
    edit_result(&state, result)
}

#[utoipa::path(
    put,
    path = "/api/quotation/services/{index}",
    tag = "Services",
    params(
        ("index" = usize, Path, description = "Zero-based service position")
    ),
    request_body = ServiceLineItem,
    responses(
        (status = 200, description = "Service updated", body = Quotation),
        (status = 400, description = "Negative quantity or unit price", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    )
)]
pub async fn update_service(
    state: web::Data<AppState>,
    path: web::Path<usize>,
    item: web::Json<ServiceLineItem>,
) -> impl Responder {
    let index = path.into_inner();
    let result = state.update(|q| q.update_service(index, item.into_inner()));
    edit_result(&state, result)
}

#[utoipa::path(
    delete,
    path = "/api/quotation/services/{index}",
    tag = "Services",
    params(
        ("index" = usize, Path, description = "Zero-based service position")
    ),
    responses(
        (status = 200, description = "Service removed", body = Quotation),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 409, description = "Only one service left", body = ErrorResponse)
    )
)]
pub async fn remove_service(state: web::Data<AppState>, path: web::Path<usize>) -> impl Responder {
    let index = path.into_inner();
    let result = state.update(|q| q.remove_service(index));
    edit_result(&state, result)
}

#[utoipa::path(
    get,
    path = "/api/quotation/summary",
    tag = "Quotation",
    responses(
        (status = 200, description = "Service count, total and short preview", body = QuotationSummary)
    )
)]
pub async fn get_summary(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(QuotationSummary::of(&state.snapshot()))
}

#[utoipa::path(
    get,
    path = "/api/quotation/preview",
    tag = "Quotation",
    responses(
        (status = 200, description = "Billed services with their calculations", body = QuotationPreview)
    )
)]
pub async fn get_preview(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(QuotationPreview::of(&state.snapshot()))
}

#[utoipa::path(
    get,
    path = "/api/quotation/checklist",
    tag = "Quotation",
    responses(
        (status = 200, description = "Status of every generation precondition", body = Checklist)
    )
)]
pub async fn get_checklist(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(Checklist::for_quotation(&state.snapshot()))
}

#[utoipa::path(
    post,
    path = "/api/quotation/generate",
    tag = "Quotation",
    responses(
        (status = 200, description = "Generated PDF", content_type = "application/pdf"),
        (status = 422, description = "Quotation is incomplete", body = ValidationFailureResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn generate_quotation(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.snapshot();
    let generator = state.generator.clone();
    let quotation = snapshot.clone();

    let result = web::block(move || generator.generate(&quotation)).await;

    match result {
        Ok(Ok(document)) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(document.filename)],
            })
            .body(document.pdf),
        Ok(Err(GenerationError::Validation(errors))) => {
            HttpResponse::UnprocessableEntity().json(ValidationFailureResponse {
                error: "ValidationFailed".to_string(),
                message: errors.to_message(),
                failures: errors.errors().to_vec(),
                checklist: Checklist::for_quotation(&snapshot),
            })
        }
        Ok(Err(e)) => {
            log::error!("quotation generation failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&format!(
                "Erro ao gerar orçamento: {}",
                e
            )))
        }
        Err(e) => {
            log::error!("generation task failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Erro ao gerar orçamento"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/presets",
    tag = "Quotation",
    responses(
        (status = 200, description = "Preset payment, validity and delivery terms", body = TermPresets)
    )
)]
pub async fn get_presets() -> impl Responder {
    HttpResponse::Ok().json(TermPresets::all())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/quotation")
            .route(web::get().to(get_quotation))
            .route(web::delete().to(reset_quotation)),
    )
    .service(web::resource("/quotation/client").route(web::put().to(update_client)))
    .service(web::resource("/quotation/contractor").route(web::put().to(update_contractor)))
    .service(web::resource("/quotation/terms").route(web::put().to(update_terms)))
    .service(web::resource("/quotation/issue").route(web::put().to(update_issue)))
    .service(
        web::resource("/quotation/services")
            .route(web::post().to(add_service))
            .route(web::delete().to(clear_services)),
    )
    .service(
        web::resource("/quotation/services/duplicate")
            .route(web::post().to(duplicate_last_service)),
    )
    .service(
        web::resource("/quotation/services/last").route(web::delete().to(remove_last_service)),
    )
    .service(
        web::resource("/quotation/services/{index}")
            .route(web::put().to(update_service))
            .route(web::delete().to(remove_service)),
    )
    .service(web::resource("/quotation/summary").route(web::get().to(get_summary)))
    .service(web::resource("/quotation/preview").route(web::get().to(get_preview)))
    .service(web::resource("/quotation/checklist").route(web::get().to(get_checklist)))
    .service(web::resource("/quotation/generate").route(web::post().to(generate_quotation)))
    .service(web::resource("/presets").route(web::get().to(get_presets)));
}
