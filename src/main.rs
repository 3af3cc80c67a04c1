use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{ErrorRes, HealthRes, HealthService};
use tdr_core::{CoreConfig, CoreError, ProjectService, Upload, validation};
use tdr_model::{GeminiClient, ModelConfig, ModelError};
use tdr_staging::{HttpBlobStore, StagingConfig};
use tdr_types::{
    Analysis, AssessedRequirement, Bid, CompanyQuestions, Project, Requirement, Rfp,
};

/// Application state shared across REST API handlers
///
/// Holds the `ProjectService` that owns the single project and performs
/// all stage invocations.
#[derive(Clone)]
struct AppState {
    project_service: ProjectService,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, get_project, submit_rfp, submit_bid, run_analysis, reset_project),
    components(schemas(
        HealthRes,
        ErrorRes,
        Project,
        Rfp,
        Requirement,
        Bid,
        AssessedRequirement,
        Analysis,
        CompanyQuestions
    ))
)]
struct ApiDoc;

type ApiError = (StatusCode, Json<ErrorRes>);

/// Main entry point for the TDR application
///
/// Starts the REST server for the tender review workflow: RFP extraction,
/// bid assessment and comparative analysis, each delegated to a
/// schema-constrained model call.
///
/// # Environment Variables
/// - `TDR_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PROJECT_DATA_DIR`: Directory for the durable project store (default: "/project_data")
/// - `GEMINI_API_KEY`: API key for the model endpoint (required)
/// - `TDR_MODEL`: Model name override (optional)
/// - `GEMINI_BASE_URL`: Model API base URL override (optional)
/// - `BLOB_STORE_URL`: Base URL of the blob staging service (required)
/// - `BLOB_STORE_TOKEN`: Bearer token for the blob staging service (required)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("tdr=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("TDR_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir = std::env::var("PROJECT_DATA_DIR").unwrap_or_else(|_| "/project_data".into());

    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY is not set"))?;
    let blob_url = std::env::var("BLOB_STORE_URL")
        .map_err(|_| anyhow::anyhow!("BLOB_STORE_URL is not set"))?;
    let blob_token = std::env::var("BLOB_STORE_TOKEN")
        .map_err(|_| anyhow::anyhow!("BLOB_STORE_TOKEN is not set"))?;

    let mut model_config = ModelConfig::new(api_key).map_err(anyhow::Error::from)?;
    if let Ok(model) = std::env::var("TDR_MODEL") {
        model_config = model_config.with_model(model);
    }
    if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
        model_config = model_config.with_base_url(base_url);
    }

    let staging = HttpBlobStore::new(StagingConfig::new(blob_url, blob_token)?)?;
    let model = GeminiClient::new(model_config)?;

    let core_config = CoreConfig::new(data_dir.into())?;
    let project_service =
        ProjectService::new(&core_config, Arc::new(staging), Arc::new(model));

    tracing::info!("++ Starting TDR REST on {}", rest_addr);

    let app = Router::new()
        .route("/health", get(health))
        .route("/project", get(get_project))
        .route("/project", delete(reset_project))
        .route("/rfp", post(submit_rfp))
        .route("/bids", post(submit_bid))
        .route("/analysis", post(run_analysis))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(12 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .with_state(AppState { project_service });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Maps a core error to the REST status-code classes: validation failures
/// are the caller's fault, model timeouts are gateway timeouts, and other
/// staging/model trouble is an upstream failure.
fn error_response(err: CoreError) -> ApiError {
    let status = match &err {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Model(ModelError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
        CoreError::Staging(_) | CoreError::Model(_) => StatusCode::BAD_GATEWAY,
        CoreError::InvalidConfig(_)
        | CoreError::StoreSerialization(_)
        | CoreError::StoreWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("stage failure: {err:?}");
    }
    (status, Json(ErrorRes::new(err.to_string())))
}

fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorRes::new(message)))
}

/// The parts of a multipart submission TDR understands.
#[derive(Default)]
struct Submission {
    upload: Option<Upload>,
    requirements: Option<String>,
}

/// Reads the multipart body, collecting the `file` part and the optional
/// `requirements` part. Unknown parts are ignored.
async fn read_submission(mut multipart: Multipart) -> Result<Submission, ApiError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().map(|s| s.to_string());
                let content_type = field.content_type().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("failed to read file part: {e}")))?;
                submission.upload = Some(Upload {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            Some("requirements") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("failed to read requirements part: {e}")))?;
                submission.requirements = Some(text);
            }
            _ => {}
        }
    }

    Ok(submission)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/project",
    responses(
        (status = 200, description = "Current project state", body = Project)
    )
)]
/// Returns the current project: the RFP, all assessed bids and the latest
/// analysis, exactly as persisted.
async fn get_project(State(state): State<AppState>) -> Json<Project> {
    Json(state.project_service.snapshot().await)
}

#[utoipa::path(
    post,
    path = "/rfp",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "A `file` part carrying the RFP PDF (max 10 MiB)"),
    responses(
        (status = 200, description = "Extracted RFP", body = Rfp),
        (status = 400, description = "Missing, non-PDF or oversize file, or an RFP is already loaded", body = ErrorRes),
        (status = 502, description = "Staging or model failure", body = ErrorRes),
        (status = 504, description = "Model call timed out", body = ErrorRes)
    )
)]
/// Submit an RFP document for requirement extraction
///
/// Stages the PDF, invokes the extraction model call and makes the result
/// the project's RFP. Legal only while no RFP is loaded.
async fn submit_rfp(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Rfp>, ApiError> {
    let submission = read_submission(multipart).await?;
    let upload = submission.upload.unwrap_or_else(empty_upload);

    state
        .project_service
        .load_rfp(&upload)
        .await
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    post,
    path = "/bids",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "A `file` part carrying the bid PDF, plus an optional `requirements` part (JSON array) overriding the stored RFP's requirements"),
    responses(
        (status = 200, description = "Assessed bid, appended to the project", body = Bid),
        (status = 400, description = "File invalid, no RFP loaded, or requirements malformed", body = ErrorRes),
        (status = 502, description = "Staging or model failure", body = ErrorRes),
        (status = 504, description = "Model call timed out", body = ErrorRes)
    )
)]
/// Submit a bid document for assessment against the RFP requirements
async fn submit_bid(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Bid>, ApiError> {
    let submission = read_submission(multipart).await?;
    let upload = submission.upload.unwrap_or_else(empty_upload);

    let requirements = match submission.requirements.as_deref() {
        Some(raw) => Some(
            validation::parse_requirements(raw)
                .map_err(|e| error_response(CoreError::from(e)))?,
        ),
        None => None,
    };

    state
        .project_service
        .add_bid(&upload, requirements)
        .await
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    post,
    path = "/analysis",
    responses(
        (status = 200, description = "Cross-bid recommendation and open questions", body = Analysis),
        (status = 400, description = "No RFP loaded or no bids to analyse", body = ErrorRes),
        (status = 502, description = "Model failure", body = ErrorRes),
        (status = 504, description = "Model call timed out", body = ErrorRes)
    )
)]
/// Run the comparative analysis over all accumulated bids
///
/// Replaces any prior analysis wholesale.
async fn run_analysis(State(state): State<AppState>) -> Result<Json<Analysis>, ApiError> {
    state
        .project_service
        .run_analysis()
        .await
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/project",
    responses(
        (status = 204, description = "Project cleared and durable store wiped"),
        (status = 500, description = "Store could not be wiped", body = ErrorRes)
    )
)]
/// Reset the project unconditionally
async fn reset_project(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state
        .project_service
        .reset()
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(error_response)
}

/// Stand-in for a submission with no `file` part; fails validation with the
/// specific missing-file constraint inside the stage.
fn empty_upload() -> Upload {
    Upload {
        filename: None,
        content_type: None,
        bytes: Vec::new(),
    }
}
