// demos/htx_account_ws.rs
use nexus_connector_rs::htx::spot::accountws::{AccountWsClient, AccountWsConfig};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    dotenv::dotenv().ok();

    let key = env::var("HTX_KEY").expect("HTX_KEY not set");
    let secret = env::var("HTX_SECRET").expect("HTX_SECRET not set");

    let client = AccountWsClient::connect(AccountWsConfig::new(
        "wss://api.huobi.pro/ws/v2".to_string(),
        key,
        secret,
    ))
    .await?;

    let topic = "accounts.update#2";
    client.register_listener(topic, |event| {
        println!("account event: {:?}", event);
    });
    client.subscribe(topic).await?;
    println!("subscribed to {}, ctrl-c to exit", topic);

    tokio::signal::ctrl_c().await?;
    client.stop().await;
    Ok(())
}
