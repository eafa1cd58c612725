use lambda_http::request::RequestContext;
use lambda_http::{
    http::{Method, StatusCode},
    tracing, Error, IntoResponse, Request, RequestExt,
};
use shared::core::{
    normalize_url, original_url_from_form, IdGenerator, LinkRepository, LinkShortener,
};
use shared::error::ServiceError;
use shared::pages::{create_form_page, link_created_page, Markup};
use shared::utils::{error_response, html_response};

pub(crate) async fn function_handler<R: LinkRepository, G: IdGenerator>(
    url_shortener: &LinkShortener<R, G>,
    event: Request,
) -> Result<impl IntoResponse, Error> {
    tracing::info!("Received event: {:?}", event);

    let page = match *event.method() {
        Method::GET => Ok(create_form_page()),
        Method::POST => create_link(url_shortener, &event).await,
        ref method => Err(ServiceError::UnsupportedMethod(method.to_string())),
    };

    match page {
        Ok(page) => html_response(&StatusCode::OK, page.into_string()),
        Err(e) => {
            tracing::error!("Failed to create short link: {:?}", e);
            error_response(&e)
        }
    }
}

async fn create_link<R: LinkRepository, G: IdGenerator>(
    url_shortener: &LinkShortener<R, G>,
    event: &Request,
) -> Result<Markup, ServiceError> {
    let url = normalize_url(&original_url_from_form(event.body().as_ref())?)?;
    let short_link = url_shortener.shorten(&url).await?;
    let short_url = format!("{}/{}", lambda_url(event), short_link.short_key);

    Ok(link_created_page(&short_link.url, &short_url))
}

/// Externally reachable URL of this function, as seen by the caller.
fn lambda_url(event: &Request) -> String {
    let (domain, path) = match event.request_context_ref() {
        Some(RequestContext::ApiGatewayV1(ctx)) => (ctx.domain_name.clone(), ctx.path.clone()),
        Some(RequestContext::ApiGatewayV2(ctx)) => {
            (ctx.domain_name.clone(), ctx.http.path.clone())
        }
        _ => (None, None),
    };
    let domain = domain
        .or_else(|| {
            event
                .headers()
                .get("host")
                .and_then(|host| host.to_str().ok())
                .map(|host| host.to_string())
        })
        .or_else(|| event.uri().host().map(|host| host.to_string()))
        .unwrap_or_default();
    let path = path.unwrap_or_else(|| event.uri().path().to_string());

    format!("https://{}{}", domain, path.trim_end_matches('/'))
}
