// demos/okx_trade.rs
use nexus_connector_rs::okx::client::{OkxRestClient, OKX_REST_URL};
use nexus_connector_rs::okx::types::PlaceOrderParam;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    dotenv::dotenv().ok();

    let key = env::var("OKX_KEY").expect("OKX_KEY not set");
    let secret = env::var("OKX_SECRET").expect("OKX_SECRET not set");
    let passphrase = env::var("OKX_PASSPHRASE").expect("OKX_PASSPHRASE not set");

    // demo=true sends x-simulated-trading so nothing real executes
    let client = OkxRestClient::new(OKX_REST_URL, &key, &secret, &passphrase, true, None, true)?;

    let resp = client
        .place_order(&PlaceOrderParam {
            inst_id: "BTC-USDT".to_string(),
            td_mode: "cash".to_string(),
            side: "buy".to_string(),
            ord_type: "market".to_string(),
            sz: "10".to_string(),
            ..Default::default()
        })
        .await?;

    if resp.is_ok() {
        println!("order placed: {:?}", resp.data);
    } else {
        eprintln!("order rejected: code={} msg={}", resp.code, resp.msg);
    }
    Ok(())
}
