//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, overdues, sanctions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Circulade API",
        version = "0.3.0",
        description = "Library Circulation Oversight REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Overdues
        overdues::list_overdues,
        // Sanctions
        sanctions::list_sanctions,
        sanctions::apply_sanction,
        sanctions::remove_sanction,
        sanctions::clear_sanctions,
    ),
    components(
        schemas(
            // Overdues
            crate::models::loan::LoanRecord,
            crate::models::overdue::OverdueFilter,
            crate::models::overdue::BorrowerOverdueSummary,
            overdues::OverduesQuery,
            // Sanctions
            crate::models::sanction::Sanction,
            crate::models::sanction::ApplySanction,
            sanctions::SanctionDetails,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "overdues", description = "Per-borrower overdue reporting"),
        (name = "sanctions", description = "Borrower sanction lifecycle")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
