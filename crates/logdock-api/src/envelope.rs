//! The uniform response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

/// Success envelope wrapping every 2xx response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always true for success responses.
    pub success: bool,
    /// The payload.
    pub data: T,
    /// Human-readable outcome description.
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}

/// Payload of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Fixed "OK" marker.
    pub status: String,
    /// Current server time, ISO-8601.
    pub timestamp: String,
    /// Seconds since the server started.
    pub uptime: f64,
    /// Deployment environment name.
    pub environment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let response = ApiResponse::new(vec![1, 2, 3], "Logs retrieved successfully");
        let json = serde_json::to_value(&response).expect("serialize");

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["message"], "Logs retrieved successfully");
    }

    #[test]
    fn health_status_round_trip() {
        let health = HealthStatus {
            status: "OK".to_string(),
            timestamp: "2024-06-01T12:00:00Z".to_string(),
            uptime: 12.5,
            environment: "development".to_string(),
        };

        let json = serde_json::to_string(&health).expect("serialize");
        let parsed: HealthStatus = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.status, "OK");
        assert!((parsed.uptime - 12.5).abs() < f64::EPSILON);
    }
}
