use listkeep_core::ListId;

use crate::app::errors;

/// Parse the `{id}` path segment; anything that is not a canonical integer
/// names no list and answers 404.
pub fn parse_list_id(raw: &str) -> Result<ListId, axum::response::Response> {
    raw.parse::<ListId>().map_err(errors::domain_error_to_response)
}
