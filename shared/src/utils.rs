use crate::error::ServiceError;
use lambda_http::http::{header, StatusCode};
use lambda_http::{Error, Response};

pub fn html_response(status: &StatusCode, body: String) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/html")
        .body(body)
        .map_err(Box::new)?;

    Ok(response)
}

pub fn redirect_response(location: &str) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(&StatusCode::MOVED_PERMANENTLY)
        .header(header::LOCATION, location)
        .body("".to_string())
        .map_err(Box::new)?;

    Ok(response)
}

pub fn empty_response(status: &StatusCode) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(status)
        .body("".to_string())
        .map_err(Box::new)?;

    Ok(response)
}

/// Plain text `Error: ...` body, with the status the error maps to.
pub fn error_response(error: &ServiceError) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(error.status_code())
        .header(header::CONTENT_TYPE, "text/plain")
        .body(format!("Error: {}", error))
        .map_err(Box::new)?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_is_permanent() {
        let response = redirect_response("http://example.com").unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "http://example.com");
    }

    #[test]
    fn error_body_is_prefixed() {
        let response =
            error_response(&ServiceError::RecordNotFound("abc123".to_string())).unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.body(), "Error: Short key 'abc123' not found");
    }
}
