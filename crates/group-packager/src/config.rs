//! Configuration for the packager.

use serde::{Deserialize, Serialize};

/// Packager configuration.
///
/// The packager has no options; this exists so hosts that import and export
/// per-component settings have something to hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagerConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serializes_empty() {
        let json = serde_json::to_string(&PackagerConfig::default()).unwrap();
        assert_eq!(json, "{}");

        let decoded: PackagerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, PackagerConfig::default());
    }
}
