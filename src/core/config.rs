use serde::{Deserialize, Serialize};
use crate::core::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Index builder
    pub index_batch_size: usize,        // Records per unit of work
    pub progress_log_interval: usize,   // Log build progress every N records
    pub parallel_analysis: bool,        // Analyze each batch on the rayon pool

    // Analyzer
    pub min_token_len: usize,           // Tokens shorter than this are dropped
    pub prefix_min_len: usize,          // Shortest prefix posting
    pub prefix_max_len: usize,          // Longest prefix posting

    // Result cache
    pub cache_high_water: usize,        // Evict once entries exceed this
    pub cache_retain: usize,            // Entries kept after eviction
    pub clear_cache_on_reload: bool,    // Drop cached results when the index is rebuilt
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            index_batch_size: 1000,
            progress_log_interval: 5000,
            parallel_analysis: true,

            min_token_len: 2,
            prefix_min_len: 3,
            prefix_max_len: 6,

            cache_high_water: 100,
            cache_retain: 50,
            clear_cache_on_reload: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.index_batch_size == 0 {
            return Err(Error::invalid_input("index_batch_size must be greater than 0"));
        }
        if self.prefix_min_len == 0 || self.prefix_min_len > self.prefix_max_len {
            return Err(Error::invalid_input(format!(
                "invalid prefix range {}..={}",
                self.prefix_min_len, self.prefix_max_len
            )));
        }
        if self.cache_retain > self.cache_high_water {
            return Err(Error::invalid_input(format!(
                "cache_retain {} exceeds cache_high_water {}",
                self.cache_retain, self.cache_high_water
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"cache_retain": 10}"#).unwrap();
        assert_eq!(config.cache_retain, 10);
        assert_eq!(config.cache_high_water, 100);
        assert_eq!(config.index_batch_size, 1000);
    }

    #[test]
    fn test_rejects_inverted_prefix_range() {
        let config = EngineConfig { prefix_min_len: 7, ..EngineConfig::default() };
        assert_eq!(config.validate().unwrap_err().kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_rejects_retain_above_high_water() {
        let config = EngineConfig { cache_retain: 200, ..EngineConfig::default() };
        assert!(config.validate().is_err());
    }
}
