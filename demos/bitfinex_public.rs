// demos/bitfinex_public.rs
use nexus_connector_rs::bitfinex::rest_pub::{RestPubClient, BITFINEX_REST_URL};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = RestPubClient::new(BITFINEX_REST_URL, None, true)?;

    let status = client.platform_status().await?;
    println!("platform status: {:?}", status);

    let tickers = client.get_tickers("tBTCUSD,tETHUSD").await?;
    for row in &tickers {
        println!("{:?}", row);
    }
    Ok(())
}
