//! Response envelopes used by the catalog endpoint.

use dsog_commerce::checkout::{OrderConfirmation, OrderNumber};
use dsog_commerce::OrderId;
use serde::{Deserialize, Serialize};

use crate::FetchError;

/// `{success, data?, error?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Payload of a successful envelope.
    pub fn into_data(self) -> Result<T, FetchError> {
        if !self.success {
            return Err(FetchError::Rejected(
                self.error.unwrap_or_else(|| "success was false".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| FetchError::Rejected("response has no data".to_string()))
    }
}

/// Reply to `submitOrder`. Also the shape reported back to callers when an
/// order is refused locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<OrderNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OrderResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            order_number: None,
            order_id: None,
            error: Some(error.into()),
        }
    }

    pub fn into_confirmation(self) -> Result<OrderConfirmation, FetchError> {
        match (self.success, self.order_number, self.order_id) {
            (true, Some(order_number), Some(order_id)) => Ok(OrderConfirmation {
                order_number,
                order_id,
            }),
            (true, _, _) => Err(FetchError::Parse(
                "order response is missing orderNumber or orderId".to_string(),
            )),
            (false, _, _) => Err(FetchError::Rejected(
                self.error.unwrap_or_else(|| "order was not accepted".to_string()),
            )),
        }
    }
}

impl From<OrderConfirmation> for OrderResponse {
    fn from(confirmation: OrderConfirmation) -> Self {
        Self {
            success: true,
            order_number: Some(confirmation.order_number),
            order_id: Some(confirmation.order_id),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_false_is_rejected() {
        let env: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success": false, "error": "Invalid action"}"#).unwrap();
        assert_eq!(
            env.into_data().unwrap_err(),
            FetchError::Rejected("Invalid action".into())
        );
    }

    #[test]
    fn test_missing_data_is_rejected() {
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(env.into_data(), Err(FetchError::Rejected(_))));
    }

    #[test]
    fn test_order_response_numeric_id() {
        let resp: OrderResponse = serde_json::from_str(
            r#"{"success": true, "orderNumber": "DSOG-20261019-0A1B2C", "orderId": 12}"#,
        )
        .unwrap();
        let confirmation = resp.into_confirmation().unwrap();
        assert_eq!(confirmation.order_id.as_str(), "12");
        assert_eq!(confirmation.order_number.as_str(), "DSOG-20261019-0A1B2C");
    }

    #[test]
    fn test_failure_shape() {
        let json = serde_json::to_value(OrderResponse::failure("Missing required fields")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "Missing required fields"})
        );
    }
}
