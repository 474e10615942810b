//! OKX public-data and market endpoints. No signing required.

use crate::error::Result;
use crate::okx::client::OkxRestClient;
use crate::okx::types::*;

impl OkxRestClient {
    /// GET /api/v5/public/instruments
    pub async fn get_instruments(
        &self,
        param: &GetInstrumentsParam,
    ) -> Result<OkxResponse<Instrument>> {
        self.get_public("/api/v5/public/instruments", Some(param))
            .await
    }

    /// GET /api/v5/market/tickers
    pub async fn get_market_tickers(
        &self,
        param: &GetMarketTickersParam,
    ) -> Result<OkxResponse<MarketTicker>> {
        self.get_public("/api/v5/market/tickers", Some(param)).await
    }

    /// GET /api/v5/market/index-tickers
    pub async fn get_index_tickers(
        &self,
        param: &GetIndexTickersParam,
    ) -> Result<OkxResponse<IndexTicker>> {
        self.get_public("/api/v5/market/index-tickers", Some(param))
            .await
    }
}
