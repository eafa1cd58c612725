use lambda_http::RequestExt;
use lambda_http::{http::StatusCode, tracing, Error, IntoResponse, Request};
use shared::core::{LinkRepository, LinkResolver};
use shared::error::ServiceError;
use shared::utils::{empty_response, error_response, redirect_response};

pub(crate) async fn function_handler<R: LinkRepository>(
    link_resolver: &LinkResolver<R>,
    event: Request,
) -> Result<impl IntoResponse, Error> {
    tracing::info!("Received event: {:?}", event);

    let short_key = event
        .path_parameters_ref()
        .and_then(|params| params.first("short_key"))
        .unwrap_or("");

    if short_key.is_empty() {
        return empty_response(&StatusCode::NOT_FOUND);
    }

    // The lookup also persists the counter, a failed increment never redirects.
    match link_resolver.visit(short_key).await {
        Ok(short_link) => match redirect_response(&short_link.url) {
            Ok(response) => Ok(response),
            Err(e) => {
                tracing::error!("Stored URL for {} is not a valid header: {:?}", short_key, e);
                error_response(&ServiceError::CorruptRecord(short_key.to_string()))
            }
        },
        Err(e) => {
            tracing::error!("Failed to resolve short key {}: {:?}", short_key, e);
            error_response(&e)
        }
    }
}
