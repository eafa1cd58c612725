use lambda_http::{http::StatusCode, tracing, Error, IntoResponse, Request};
use shared::error::ServiceError;
use shared::pages::show_ip_page;
use shared::utils::{error_response, html_response};

const COUNTRY_HEADER: &str = "CloudFront-Viewer-Country";
const FORWARDED_FOR_HEADER: &str = "X-Forwarded-For";

pub(crate) async fn function_handler(event: Request) -> Result<impl IntoResponse, Error> {
    tracing::info!("Received event: {:?}", event);

    match viewer_details(&event) {
        Ok((ip, country)) => {
            html_response(&StatusCode::OK, show_ip_page(&ip, &country).into_string())
        }
        Err(e) => {
            tracing::error!("Failed to read viewer details: {:?}", e);
            error_response(&e)
        }
    }
}

fn viewer_details(event: &Request) -> Result<(String, String), ServiceError> {
    let country = header_value(event, COUNTRY_HEADER)?;
    // The first hop in X-Forwarded-For is the client, the rest are proxies.
    let ip = header_value(event, FORWARDED_FOR_HEADER)?
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    Ok((ip, country))
}

fn header_value(event: &Request, name: &str) -> Result<String, ServiceError> {
    event
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
        .ok_or_else(|| ServiceError::MissingField(name.to_string()))
}
