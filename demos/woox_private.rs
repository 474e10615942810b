// demos/woox_private.rs
use nexus_connector_rs::woox::client::{WooxClient, WOOX_REST_URL};
use nexus_connector_rs::woox::types::GetOrdersParam;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    dotenv::dotenv().ok();

    let key = env::var("WOOX_KEY").expect("WOOX_KEY not set");
    let secret = env::var("WOOX_SECRET").expect("WOOX_SECRET not set");

    let client = WooxClient::new(WOOX_REST_URL, &key, &secret, None, true)?;

    let balances = client.get_balances().await?;
    for holding in &balances.data.holding {
        println!("{}: {}", holding.token, holding.holding);
    }

    let orders = client
        .get_orders(&GetOrdersParam {
            symbol: Some("SPOT_BTC_USDT".to_string()),
            ..Default::default()
        })
        .await?;
    println!("{} open orders", orders.rows.len());
    Ok(())
}
