pub mod auth;
pub mod health_checks;
pub mod ideas;
pub mod request_error;
pub mod topics;
pub mod validated_json;
pub mod votes;

use serde::Deserialize;

/// Common `?page=&page_size=` query parameters.
///
/// Missing or out-of-range values are not an error; the pagination engine
/// coerces them to the first page and the default page size.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub page_size: i64,
}
