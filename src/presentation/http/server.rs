use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::http::{
    handlers::{DocumentHandler, ExtractionHandler, FhirHandler, MedicalHandler, QaHandler},
    middleware::ApiKey,
    routes::{
        document_routes, extraction_routes, fhir_routes, health_routes, medical_routes, qa_routes,
    },
};

const API_PREFIX: &str = "/api/v1";
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub struct HttpServer {
    document_handler: Arc<DocumentHandler>,
    extraction_handler: Arc<ExtractionHandler>,
    fhir_handler: Arc<FhirHandler>,
    medical_handler: Arc<MedicalHandler>,
    qa_handler: Arc<QaHandler>,
    api_key: ApiKey,
    app_name: String,
    port: u16,
}

impl HttpServer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        document_handler: Arc<DocumentHandler>,
        extraction_handler: Arc<ExtractionHandler>,
        fhir_handler: Arc<FhirHandler>,
        medical_handler: Arc<MedicalHandler>,
        qa_handler: Arc<QaHandler>,
        api_key: ApiKey,
        app_name: String,
        port: Option<u16>,
    ) -> Self {
        Self {
            document_handler,
            extraction_handler,
            fhir_handler,
            medical_handler,
            qa_handler,
            api_key,
            app_name,
            port: port.unwrap_or(3000),
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let api = Router::new()
            .merge(document_routes(
                self.document_handler.clone(),
                self.api_key.clone(),
            ))
            .merge(extraction_routes(self.extraction_handler.clone()))
            .merge(fhir_routes(self.fhir_handler.clone()))
            .merge(medical_routes(self.medical_handler.clone()))
            .merge(qa_routes(self.qa_handler.clone()));

        Router::new()
            .merge(health_routes(self.app_name.clone()))
            .nest(API_PREFIX, api)
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            )
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("{} listening on {}", self.app_name, addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
