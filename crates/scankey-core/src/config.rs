//! Module: config
//! Responsibility: caller-tunable knobs for scan boundary computation.
//! Does not own: the reserved separator byte (fixed process-wide).

use crate::MIN_TABLE_TIMESTAMP;
use serde::{Deserialize, Serialize};

///
/// ScanConfig
///
/// `debug` enables `[debug]` trace lines while computing scan bounds.
/// `min_timestamp` is the inclusive start of every scan time range.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub debug: bool,
    pub min_timestamp: u64,
}

impl ScanConfig {
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub(crate) fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            debug: false,
            min_timestamp: MIN_TABLE_TIMESTAMP,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::ScanConfig;
    use crate::MIN_TABLE_TIMESTAMP;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ScanConfig =
            serde_json::from_str(r#"{"debug":true}"#).expect("config should deserialize");

        assert!(config.debug);
        assert_eq!(config.min_timestamp, MIN_TABLE_TIMESTAMP);
        assert_eq!(
            serde_json::from_str::<ScanConfig>("{}").expect("empty config should deserialize"),
            ScanConfig::default()
        );
    }
}
