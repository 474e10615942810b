// demos/htx_market_ws.rs
use nexus_connector_rs::htx::spot::marketws::{MarketWsClient, MarketWsConfig};
use tokio::time::{sleep, Duration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = MarketWsClient::connect(
        MarketWsConfig::new("wss://api.huobi.pro/ws".to_string()).with_debug(true),
    )
    .await?;

    let topic = "market.btcusdt.ticker";
    client.register_listener(topic, |event| {
        println!("ticker event: {:?}", event);
    });
    client.subscribe(topic).await?;
    println!("subscribed to {}", topic);

    sleep(Duration::from_secs(30)).await;

    client.unsubscribe(topic).await?;
    client.stop().await;
    Ok(())
}
