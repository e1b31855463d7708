//! JSON-RPC-backed collector.

use async_trait::async_trait;
use chainopt_core::{unix_now, NetworkSnapshot};
use serde::Deserialize;

use crate::{CollectorError, MetricsCollector};

/// Health payload as reported by a node's RPC surface.
#[derive(Debug, Deserialize)]
struct HealthResult {
    gas_price: f64,
    tps: u32,
    block_time: f64,
    congestion_level: f64,
    active_users: u64,
    #[serde(default)]
    timestamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RpcReply {
    #[serde(default)]
    result: Option<HealthResult>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Collector that polls a node's JSON-RPC endpoint for network health.
#[derive(Debug, Clone)]
pub struct RpcCollector {
    client: reqwest::Client,
    endpoint: String,
}

impl RpcCollector {
    /// Create a collector against the given RPC endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn into_snapshot(result: HealthResult) -> Result<NetworkSnapshot, CollectorError> {
        if !(0.0..=1.0).contains(&result.congestion_level) || result.block_time <= 0.0 {
            return Err(CollectorError::Decode(format!(
                "out-of-range health values: congestion {} block_time {}",
                result.congestion_level, result.block_time
            )));
        }
        Ok(NetworkSnapshot {
            timestamp: result.timestamp.unwrap_or_else(unix_now),
            gas_price: result.gas_price,
            tps: result.tps,
            block_time: result.block_time,
            congestion_level: result.congestion_level,
            active_users: result.active_users,
        })
    }
}

#[async_trait]
impl MetricsCollector for RpcCollector {
    async fn collect(&self) -> Result<NetworkSnapshot, CollectorError> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "chain_networkHealth",
            "params": [],
        });

        let reply: RpcReply = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = reply.error {
            return Err(CollectorError::Unavailable(error.to_string()));
        }

        let result = reply
            .result
            .ok_or_else(|| CollectorError::Decode("reply carries neither result nor error".into()))?;

        tracing::debug!(endpoint = %self.endpoint, "health sample received");
        Self::into_snapshot(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_health_result_onto_snapshot() {
        let result = HealthResult {
            gas_price: 95.0,
            tps: 480,
            block_time: 2.1,
            congestion_level: 0.55,
            active_users: 12_000,
            timestamp: Some(1_700_000_000),
        };
        let snap = RpcCollector::into_snapshot(result).unwrap();
        assert_eq!(snap.timestamp, 1_700_000_000);
        assert_eq!(snap.tps, 480);
    }

    #[test]
    fn stamps_missing_timestamps() {
        let result = HealthResult {
            gas_price: 95.0,
            tps: 480,
            block_time: 2.1,
            congestion_level: 0.55,
            active_users: 12_000,
            timestamp: None,
        };
        let snap = RpcCollector::into_snapshot(result).unwrap();
        assert!(snap.timestamp > 0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let result = HealthResult {
            gas_price: 95.0,
            tps: 480,
            block_time: 2.1,
            congestion_level: 1.4,
            active_users: 12_000,
            timestamp: None,
        };
        assert!(matches!(
            RpcCollector::into_snapshot(result),
            Err(CollectorError::Decode(_))
        ));
    }
}
