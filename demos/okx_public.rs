// demos/okx_public.rs
use nexus_connector_rs::okx::client::{OkxRestClient, OKX_REST_URL};
use nexus_connector_rs::okx::types::{GetInstrumentsParam, GetMarketTickersParam};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = OkxRestClient::new_public(OKX_REST_URL, None, true)?;

    let instruments = client
        .get_instruments(&GetInstrumentsParam {
            inst_type: "SPOT".to_string(),
            ..Default::default()
        })
        .await?;
    println!("{} spot instruments", instruments.data.len());

    let tickers = client
        .get_market_tickers(&GetMarketTickersParam {
            inst_type: "SPOT".to_string(),
            ..Default::default()
        })
        .await?;
    for ticker in tickers.data.iter().take(5) {
        println!("{}: last={}", ticker.inst_id, ticker.last);
    }
    Ok(())
}
