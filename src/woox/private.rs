//! WooX private endpoints: orders, trades, balances, account, asset
//! transfers and positions.

use crate::error::{NexusError, Result};
use crate::woox::client::WooxClient;
use crate::woox::types::*;
use reqwest::Method;

impl WooxClient {
    /// POST /v1/order
    pub async fn send_order(&self, params: &SendOrderReq) -> Result<SendOrderResp> {
        for (name, value) in [
            ("symbol", &params.symbol),
            ("order_type", &params.order_type),
            ("side", &params.side),
        ] {
            if value.is_empty() {
                return Err(NexusError::ParameterRequiredError {
                    param: name.to_string(),
                });
            }
        }
        self.send_v1(Method::POST, "/v1/order", Some(params)).await
    }

    /// DELETE /v1/order
    pub async fn cancel_order(&self, params: &CancelOrderParam) -> Result<CancelOrderResp> {
        self.send_v1(Method::DELETE, "/v1/order", Some(params)).await
    }

    /// DELETE /v1/client/order
    pub async fn cancel_order_by_client_order_id(
        &self,
        params: &CancelOrderByClientOrderIdParam,
    ) -> Result<CancelOrderResp> {
        self.send_v1(Method::DELETE, "/v1/client/order", Some(params))
            .await
    }

    /// DELETE /v1/orders (all orders on a symbol)
    pub async fn cancel_orders(&self, params: &CancelOrdersParam) -> Result<CancelOrderResp> {
        self.send_v1(Method::DELETE, "/v1/orders", Some(params)).await
    }

    /// GET /v1/order/:oid
    pub async fn get_order(&self, order_id: i64) -> Result<OrderInfo> {
        self.send_v1::<(), _>(Method::GET, &format!("/v1/order/{}", order_id), None)
            .await
    }

    /// GET /v1/client/order/:client_order_id
    pub async fn get_order_by_client_order_id(&self, client_order_id: i64) -> Result<OrderInfo> {
        self.send_v1::<(), _>(
            Method::GET,
            &format!("/v1/client/order/{}", client_order_id),
            None,
        )
        .await
    }

    /// GET /v1/orders
    pub async fn get_orders(&self, params: &GetOrdersParam) -> Result<GetOrdersResp> {
        self.send_v1(Method::GET, "/v1/orders", Some(params)).await
    }

    /// GET /v1/client/trade/:tid
    pub async fn get_trade(&self, trade_id: i64) -> Result<GetTradeResp> {
        self.send_v1::<(), _>(Method::GET, &format!("/v1/client/trade/{}", trade_id), None)
            .await
    }

    /// GET /v1/client/trade_history
    pub async fn get_trade_history(
        &self,
        params: &GetTradeHistoryParam,
    ) -> Result<GetTradeHistoryResp> {
        self.send_v1(Method::GET, "/v1/client/trade_history", Some(params))
            .await
    }

    /// GET /v3/balances
    pub async fn get_balances(&self) -> Result<BalancesResp> {
        self.send_v3::<(), _>(Method::GET, "/v3/balances", None).await
    }

    /// GET /v3/accountinfo
    pub async fn get_account_info(&self) -> Result<AccountInfoResp> {
        self.send_v3::<(), _>(Method::GET, "/v3/accountinfo", None)
            .await
    }

    /// GET /v1/asset/history
    pub async fn get_asset_history(
        &self,
        params: &GetAssetHistoryParam,
    ) -> Result<AssetHistoryResp> {
        self.send_v1(Method::GET, "/v1/asset/history", Some(params))
            .await
    }

    /// GET /v1/sub_account/all
    pub async fn get_sub_accounts(&self) -> Result<SubAccountsResp> {
        self.send_v1::<(), _>(Method::GET, "/v1/sub_account/all", None)
            .await
    }

    /// POST /v1/asset/main_sub_transfer
    pub async fn transfer_asset(&self, params: &TransferAssetParam) -> Result<TransferAssetResp> {
        self.send_v1(Method::POST, "/v1/asset/main_sub_transfer", Some(params))
            .await
    }

    /// POST /v1/client/leverage
    pub async fn update_leverage_setting(
        &self,
        params: &UpdateLeverageParam,
    ) -> Result<WooxResponse> {
        if ![1, 2, 3, 4, 5, 10, 15, 20].contains(&params.leverage) {
            return Err(NexusError::ParameterValueError {
                param: "leverage".to_string(),
                value: params.leverage.to_string(),
                allowed: vec!["1", "2", "3", "4", "5", "10", "15", "20"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            });
        }
        self.send_v1(Method::POST, "/v1/client/leverage", Some(params))
            .await
    }

    /// GET /v1/sub_account/ip_restriction
    pub async fn get_ip_restriction(&self) -> Result<IpRestrictionResp> {
        self.send_v1::<(), _>(Method::GET, "/v1/sub_account/ip_restriction", None)
            .await
    }

    /// GET /v3/positions/:symbol
    pub async fn get_one_position_info(&self, symbol: &str) -> Result<GetOnePositionResp> {
        if symbol.is_empty() {
            return Err(NexusError::ParameterRequiredError {
                param: "symbol".to_string(),
            });
        }
        self.send_v3::<(), _>(Method::GET, &format!("/v3/positions/{}", symbol), None)
            .await
    }

    /// GET /v3/positions
    pub async fn get_all_position_info(&self) -> Result<GetAllPositionsResp> {
        self.send_v3::<(), _>(Method::GET, "/v3/positions", None).await
    }
}
