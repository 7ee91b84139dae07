use actix_web::HttpResponse;
use chrono::{SecondsFormat, Utc};

#[derive(serde::Serialize)]
struct Liveness {
    status: &'static str,
    message: &'static str,
    timestamp: String,
}

/// Endpoint used by clients to know if the server is working
#[tracing::instrument(name = "Health Check handler")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(Liveness {
        status: "ok",
        message: "Lead intake endpoint is running",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
