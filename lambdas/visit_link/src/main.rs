use http_handler::function_handler;
use lambda_http::{run, service_fn, tracing, Error};
use shared::adapters::DynamoDbLinkRepository;
use shared::configuration::Configuration;
use shared::core::LinkResolver;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = Configuration::load()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&aws_config);
    let link_repo = DynamoDbLinkRepository::new(config.table_name.clone(), dynamodb_client);
    let resolver = LinkResolver::new(link_repo);

    run(service_fn(|event| function_handler(&resolver, event))).await
}
