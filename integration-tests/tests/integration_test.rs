use aws_sdk_cloudformation::types::Output;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::env;

fn http_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(2))
        .redirect(Policy::none())
        .build()
        .unwrap()
}

#[ignore]
#[tokio::test]
async fn when_url_is_submitted_should_create_link_and_redirect() {
    let api_endpoint = retrieve_api_endpoint().await;
    let http_client = http_client();

    let response = http_client
        .post(format!("{}create", api_endpoint))
        .form(&[("original_url", "example.com")])
        .send()
        .await
        .expect("Create endpoint should be reachable");

    assert_eq!(response.status(), 200);
    let page = response.text().await.unwrap();
    assert!(page.contains("http://example.com"));

    let short_url = extract_short_url(&page).expect("Page should contain the short URL");
    let redirect_response = http_client
        .get(short_url)
        .send()
        .await
        .expect("Accessing redirect should be successful.");

    assert_eq!(redirect_response.status(), 301);
    assert_eq!(
        redirect_response.headers()["location"],
        "http://example.com"
    );
}

#[ignore]
#[tokio::test]
async fn when_original_url_missing_should_return_400() {
    let api_endpoint = retrieve_api_endpoint().await;

    let response = http_client()
        .post(format!("{}create", api_endpoint))
        .form(&[("not_original_url", "example.com")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[ignore]
#[tokio::test]
async fn when_short_key_unknown_should_return_404() {
    let api_endpoint = retrieve_api_endpoint().await;

    let response = http_client()
        .get(format!("{}create/zzzzzz", api_endpoint))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

fn extract_short_url(page: &str) -> Option<String> {
    let id_at = page.find(r#"id="short_url""#)?;
    let tag_start = page[..id_at].rfind("<a")?;
    let tag_end = page[tag_start..].find('>')? + tag_start;
    let tag = &page[tag_start..tag_end];
    let href_start = tag.find(r#"href=""#)? + r#"href=""#.len();
    let href_end = tag[href_start..].find('"')? + href_start;
    Some(tag[href_start..href_end].to_string())
}

async fn retrieve_api_endpoint() -> String {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let cloudformation_client = aws_sdk_cloudformation::Client::new(&config);
    let stack_name = env::var("STACK_NAME").unwrap_or("rust-link-shortener".to_string());

    let get_stacks = cloudformation_client
        .describe_stacks()
        .set_stack_name(Some(stack_name.clone()))
        .send()
        .await
        .unwrap_or_else(|_| panic!("CloudFormation stack named {} should exist", stack_name));

    let outputs = get_stacks.stacks.unwrap()[0].clone().outputs.unwrap();
    let api_outputs: Vec<Output> = outputs
        .into_iter()
        .filter(|output| output.output_key.clone().unwrap() == "LinkShortenerEndpoint")
        .collect();

    api_outputs[0].clone().output_value.unwrap()
}
