//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ADS-B Relay API",
        version = "0.1.0",
        description = "Copies one day of ADS-B aircraft position snapshots from the public archive into object storage, and mirrors them locally for preparation."
    ),
    paths(
        handlers::aircraft::download_data,
        handlers::aircraft::prepare_data,
    ),
    components(schemas(error::ErrorResponse)),
    tags(
        (name = "s4", description = "Aircraft snapshot download and preparation")
    )
)]
pub struct ApiDoc;
