//! Compatibility test client.
//!
//! Single round trip with no persistence: two partner records in, one scored
//! message out. The scoring itself is a backend concern. The verdict arrives
//! in the same `{ "data": ... }` envelope as the resource endpoints.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::HeartSyncClient;
use crate::error::ApiError;

/// One partner's details for the compatibility test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    pub age: u32,
    /// Comma-separated free-form interests.
    pub interests: String,
}

/// Request body for `POST /compatibility/test`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityRequest {
    pub partner1: Partner,
    pub partner2: Partner,
}

/// Compatibility verdict from the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct CompatibilityResult {
    pub message: String,
}

impl HeartSyncClient {
    /// Run the compatibility test.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, request))]
    pub async fn evaluate_compatibility(
        &self,
        request: &CompatibilityRequest,
    ) -> Result<CompatibilityResult, ApiError> {
        self.post_data("/compatibility/test", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = CompatibilityRequest {
            partner1: Partner {
                name: "Ada".to_string(),
                age: 33,
                interests: "chess, hiking".to_string(),
            },
            partner2: Partner {
                name: "Grace".to_string(),
                age: 35,
                interests: "sailing".to_string(),
            },
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["partner1"]["age"], 33);
        assert_eq!(json["partner2"]["name"], "Grace");
    }

    #[test]
    fn test_result_ignores_extra_fields() {
        let result: CompatibilityResult =
            serde_json::from_str(r#"{"message":"A strong match","score":87}"#).expect("parse");
        assert_eq!(result.message, "A strong match");
    }

    #[test]
    fn test_result_arrives_enveloped() {
        let envelope: crate::client::Envelope<CompatibilityResult> =
            serde_json::from_str(r#"{"data":{"message":"A strong match"}}"#).expect("parse");
        assert_eq!(envelope.data.message, "A strong match");
    }
}
