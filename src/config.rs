use crate::error::{MaintError, Result};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct MaintConfig {
    pub lookup_timeout_ms: u64,
    pub event_channel_capacity: usize,
    pub telemetry_enabled: bool,
    pub custom_settings: HashMap<String, String>,
}

impl Default for MaintConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: 5000,
            event_channel_capacity: 1000,
            telemetry_enabled: true,
            custom_settings: HashMap::new(),
        }
    }
}

impl MaintConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(timeout) = std::env::var("MAINT_LOOKUP_TIMEOUT_MS") {
            config.lookup_timeout_ms = timeout.parse().map_err(|e| {
                MaintError::ConfigurationError(format!("Invalid lookup_timeout_ms: {e}"))
            })?;
        }

        if let Ok(capacity) = std::env::var("MAINT_EVENT_CHANNEL_CAPACITY") {
            config.event_channel_capacity = capacity.parse().map_err(|e| {
                MaintError::ConfigurationError(format!("Invalid event_channel_capacity: {e}"))
            })?;
        }

        Ok(config)
    }

    /// Lookup timeout as a tokio-compatible duration
    pub fn lookup_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.lookup_timeout_ms)
    }
}
