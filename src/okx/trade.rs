//! OKX trade endpoints.

use crate::error::{NexusError, Result};
use crate::okx::client::OkxRestClient;
use crate::okx::types::*;

impl OkxRestClient {
    /// POST /api/v5/trade/order
    pub async fn place_order(
        &self,
        param: &PlaceOrderParam,
    ) -> Result<OkxResponse<PlaceOrderData>> {
        for (name, value) in [
            ("inst_id", &param.inst_id),
            ("td_mode", &param.td_mode),
            ("side", &param.side),
            ("ord_type", &param.ord_type),
            ("sz", &param.sz),
        ] {
            if value.is_empty() {
                return Err(NexusError::ParameterRequiredError {
                    param: name.to_string(),
                });
            }
        }

        self.post_signed("/api/v5/trade/order", param).await
    }

    /// GET /api/v5/trade/order
    pub async fn get_order(&self, param: &GetOrderParam) -> Result<OkxResponse<OrderDetail>> {
        self.get_signed("/api/v5/trade/order", Some(param)).await
    }
}
