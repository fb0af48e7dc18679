use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use rollcut_core::{
    report, CalculationForm, CuttingPlan, CuttingPlanner, CuttingRequest, PlannerConfig,
    PlannerError,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const OPENAPI_SPEC: &str = include_str!("../../../openapi.yaml");
const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Roll Cutting API Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            SwaggerUIBundle({
                url: '/openapi.yaml',
                dom_id: '#swagger-ui',
                presets: [SwaggerUIBundle.presets.apis],
                layout: 'BaseLayout',
            });
        };
    </script>
</body>
</html>"#;

type SharedPlanner = Arc<CuttingPlanner>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting Roll Cutting API");

    let config = match std::env::var("ROLLCUT_CONFIG") {
        Ok(path) => {
            info!("Loading planner config from {}", path);
            PlannerConfig::from_path(&path)?
        }
        Err(_) => PlannerConfig::default(),
    };
    let planner = Arc::new(CuttingPlanner::new(&config));
    info!(
        "Catalog has {} widths, edge trim {}, run basis {:?}",
        planner.catalog().len(),
        if planner.edge_trim() { "on" } else { "off" },
        planner.run_basis()
    );

    let addr = std::env::var("ROLLCUT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let local = listener.local_addr()?;
    info!("API server listening on http://{}", local);
    info!("Try: {}", health_hint(local));

    axum::serve(listener, app(planner)).await?;

    Ok(())
}

/// Curl command for the health endpoint of a bound listener.
fn health_hint(local: SocketAddr) -> String {
    let host = if local.ip().is_unspecified() {
        "localhost".to_string()
    } else {
        match local {
            SocketAddr::V4(v4) => v4.ip().to_string(),
            SocketAddr::V6(v6) => format!("[{}]", v6.ip()),
        }
    };
    format!("curl http://{}:{}/api/health", host, local.port())
}

/// Builds the router around a shared planner.
fn app(planner: SharedPlanner) -> Router {
    Router::new()
        .route("/", get(serve_ui))
        .route("/api/health", get(health_check))
        .route("/api/widths", get(allowed_widths))
        .route("/api/calculate", post(calculate))
        .route("/api/calculate/form", post(calculate_form))
        .route("/api/report", post(download_report))
        .route("/api/generate/svg", post(generate_svg))
        .route("/openapi.yaml", get(serve_openapi_spec))
        .route("/docs", get(serve_swagger_ui))
        .layer(CorsLayer::permissive())
        .with_state(planner)
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "rollcut-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Active width catalog and planner flags
async fn allowed_widths(State(planner): State<SharedPlanner>) -> Json<serde_json::Value> {
    Json(json!({
        "widths": planner.catalog().widths(),
        "edge_trim": planner.edge_trim(),
        "run_basis": planner.run_basis(),
    }))
}

/// Main calculation endpoint
async fn calculate(
    State(planner): State<SharedPlanner>,
    Json(request): Json<CuttingRequest>,
) -> Result<Json<CuttingPlan>, AppError> {
    info!(
        "Received calculation: material {} mm, target {} mm, length {} m",
        request.material_width, request.target_width, request.length
    );

    let plan = planner.compute(&request)?;
    log_plan(&plan);

    Ok(Json(plan))
}

/// Calculation from raw form fields
async fn calculate_form(
    State(planner): State<SharedPlanner>,
    Form(form): Form<CalculationForm>,
) -> Result<Json<CuttingPlan>, AppError> {
    let request = form.parse()?;
    let plan = planner.compute(&request)?;
    log_plan(&plan);

    Ok(Json(plan))
}

fn log_plan(plan: &CuttingPlan) {
    info!(
        "Calculation complete: {} rolls per length, {} mm waste, {:.2}% waste",
        plan.rolls_per_length, plan.waste, plan.waste_percentage
    );
}

/// Plain-text report as a file download
async fn download_report(Json(plan): Json<CuttingPlan>) -> Result<Response, AppError> {
    let text = report::render_text(&plan).map_err(anyhow::Error::from)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"cutting-report.txt\"",
            ),
        ],
        text,
    )
        .into_response())
}

/// Generate SVG visualization
async fn generate_svg(Json(plan): Json<CuttingPlan>) -> Result<Response, AppError> {
    info!("Generating SVG for {} rolls", plan.rolls_per_length);

    let svg = report::render_svg(&plan).map_err(anyhow::Error::from)?;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

/// Application error type
struct AppError(anyhow::Error);

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        AppError(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let status = if self.0.downcast_ref::<PlannerError>().is_some() {
            warn!("Rejected request: {}", message);
            StatusCode::BAD_REQUEST
        } else {
            error!("Request error: {}", message);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(json!({
                "error": message,
            })),
        )
            .into_response()
    }
}

async fn serve_ui() -> impl IntoResponse {
    match std::fs::read_to_string("web/index.html") {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <title>Roll Cutting Calculator</title>
            </head>
            <body>
                <h1>Roll Cutting API</h1>
                <p>Web UI file not found. Please ensure web/index.html exists.</p>
                <h2>API Endpoints:</h2>
                <ul>
                    <li>GET /api/health - Health check</li>
                    <li>GET /api/widths - Allowed roll widths</li>
                    <li>POST /api/calculate - Run calculation (JSON)</li>
                    <li>POST /api/calculate/form - Run calculation (form fields)</li>
                    <li>POST /api/report - Download text report</li>
                    <li>POST /api/generate/svg - Generate SVG visualization</li>
                </ul>
            </body>
            </html>
        "#
            .to_string(),
        ),
    }
}

async fn serve_openapi_spec() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/yaml")],
        OPENAPI_SPEC,
    )
}

async fn serve_swagger_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(Arc::new(CuttingPlanner::default()))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_form(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/calculate/form")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/api/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "healthy");
    }

    #[tokio::test]
    async fn test_widths_lists_catalog() {
        let request = Request::get("/api/widths").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["widths"].as_array().unwrap().len(), 22);
        assert_eq!(value["run_basis"], "main_only");
    }

    #[tokio::test]
    async fn test_calculate_returns_plan() {
        let (status, body) = send(post_json(
            "/api/calculate",
            json!({
                "material_width": 900,
                "target_width": 70,
                "length": 100,
                "rolls_needed": 20
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        let plan: CuttingPlan = serde_json::from_slice(&body).unwrap();
        assert_eq!(plan.main_count, 12);
        assert_eq!(plan.additional_width, Some(60.0));
        assert_eq!(plan.run.unwrap().stock_rolls, 6);
    }

    #[tokio::test]
    async fn test_calculate_rejects_out_of_catalog_width() {
        let (status, body) = send(post_json(
            "/api/calculate",
            json!({"material_width": 900, "target_width": 999, "length": 100}),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value["error"],
            PlannerError::InvalidTargetWidth.to_string()
        );
    }

    #[tokio::test]
    async fn test_form_calculation() {
        let (status, body) =
            send(post_form("material_width=910&usable_width=880&target_width=100&length=100")).await;

        assert_eq!(status, StatusCode::OK);
        let plan: CuttingPlan = serde_json::from_slice(&body).unwrap();
        assert_eq!(plan.waste_per_side, 15.0);
    }

    #[tokio::test]
    async fn test_form_rejects_non_numeric_input() {
        let (status, body) =
            send(post_form("material_width=wide&target_width=100&length=100")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value["error"],
            PlannerError::InvalidNumericInput.to_string()
        );
    }

    #[tokio::test]
    async fn test_report_and_svg_from_plan() {
        let plan = CuttingPlanner::default()
            .compute(&CuttingRequest::new(900, 100.0, 100.0))
            .unwrap();
        let plan_json = serde_json::to_value(&plan).unwrap();

        let (status, body) = send(post_json("/api/report", plan_json.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("Main width:         100 mm x 9"));

        let (status, body) = send(post_json("/api/generate/svg", plan_json)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("<svg"));
    }

    #[tokio::test]
    async fn test_svg_ignores_inflated_roll_count() {
        let mut plan = CuttingPlanner::default()
            .compute(&CuttingRequest::new(900, 70.0, 100.0))
            .unwrap();
        plan.main_count = u32::MAX;

        let (status, body) =
            send(post_json("/api/generate/svg", serde_json::to_value(&plan).unwrap())).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.len() < 10_000);
        let svg = String::from_utf8(body).unwrap();
        assert_eq!(svg.matches(r##"fill="#4CAF50""##).count(), 12);
    }

    #[test]
    fn test_health_hint_uses_bound_address() {
        assert_eq!(
            health_hint("0.0.0.0:8080".parse().unwrap()),
            "curl http://localhost:8080/api/health"
        );
        assert_eq!(
            health_hint("127.0.0.1:3000".parse().unwrap()),
            "curl http://127.0.0.1:3000/api/health"
        );
        assert_eq!(
            health_hint("[::1]:4000".parse().unwrap()),
            "curl http://[::1]:4000/api/health"
        );
        assert_eq!(
            health_hint("[::]:4000".parse().unwrap()),
            "curl http://localhost:4000/api/health"
        );
    }
}
