// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_NUM_STREAMS, FALLBACK_PARALLELISM, INFERENCE_NUM_THREADS, NUM_STREAMS, STREAMS_AUTO,
    THREADS_PER_STREAM,
};
use crate::config::PropertyValue;
use crate::errors::{PluginError, PluginResult};

/// Host parallelism, used when `num_streams` is `AUTO`.
fn default_parallelism() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(FALLBACK_PARALLELISM)
}

/// Options for the streams executor that runs inference work.
///
/// The stream count doubles as the optimal number of inference requests a
/// caller should keep in flight. Thread counts of zero mean "let the executor
/// decide".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamsExecutorConfig {
    pub name: String,
    pub streams: u32,
    pub threads: u32,
    pub threads_per_stream: u32,
}

impl Default for StreamsExecutorConfig {
    fn default() -> Self {
        Self {
            name: "TemplateStreamsExecutor".to_string(),
            streams: DEFAULT_NUM_STREAMS,
            threads: 0,
            threads_per_stream: 0,
        }
    }
}

impl StreamsExecutorConfig {
    /// Property names this configuration recognizes.
    pub fn supported_properties() -> Vec<String> {
        vec![
            NUM_STREAMS.to_string(),
            INFERENCE_NUM_THREADS.to_string(),
            THREADS_PER_STREAM.to_string(),
        ]
    }

    pub fn is_supported(name: &str) -> bool {
        matches!(name, NUM_STREAMS | INFERENCE_NUM_THREADS | THREADS_PER_STREAM)
    }

    pub fn set_property(&mut self, name: &str, value: &PropertyValue) -> PluginResult<()> {
        match name {
            NUM_STREAMS => {
                self.streams = parse_streams(value)?;
            }
            INFERENCE_NUM_THREADS => {
                self.threads = parse_count(name, value)?;
            }
            THREADS_PER_STREAM => {
                self.threads_per_stream = parse_count(name, value)?;
            }
            _ => return Err(PluginError::unknown_option(name)),
        }
        Ok(())
    }

    pub fn get_property(&self, name: &str) -> PluginResult<PropertyValue> {
        match name {
            NUM_STREAMS => Ok(PropertyValue::from(self.streams)),
            INFERENCE_NUM_THREADS => Ok(PropertyValue::from(self.threads)),
            THREADS_PER_STREAM => Ok(PropertyValue::from(self.threads_per_stream)),
            _ => Err(PluginError::unknown_option(name)),
        }
    }
}

fn parse_streams(value: &PropertyValue) -> PluginResult<u32> {
    if value
        .as_str()
        .is_some_and(|text| text.eq_ignore_ascii_case(STREAMS_AUTO))
    {
        return Ok(default_parallelism());
    }

    match parse_count(NUM_STREAMS, value)? {
        0 => Err(PluginError::invalid_value(
            NUM_STREAMS,
            "stream count must be at least 1",
        )),
        streams => Ok(streams),
    }
}

fn parse_count(name: &str, value: &PropertyValue) -> PluginResult<u32> {
    let raw = value.as_u64().ok_or_else(|| {
        PluginError::invalid_value(name, format!("expected an unsigned integer, got {:?}", value))
    })?;
    u32::try_from(raw)
        .map_err(|_| PluginError::invalid_value(name, format!("{} is out of range", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StreamsExecutorConfig::default();
        assert_eq!(config.streams, 1);
        assert_eq!(config.threads, 0);
        assert_eq!(config.threads_per_stream, 0);
    }

    #[test]
    fn test_set_and_get_stream_count() {
        let mut config = StreamsExecutorConfig::default();
        config.set_property(NUM_STREAMS, &PropertyValue::UInt(4)).unwrap();

        assert_eq!(config.get_property(NUM_STREAMS).unwrap(), PropertyValue::UInt(4));
    }

    #[test]
    fn test_auto_streams_uses_host_parallelism() {
        let mut config = StreamsExecutorConfig::default();
        config.set_property(NUM_STREAMS, &PropertyValue::from("auto")).unwrap();

        assert_eq!(config.streams, default_parallelism());
        assert!(config.streams >= 1);
    }

    #[test]
    fn test_zero_streams_rejected() {
        let mut config = StreamsExecutorConfig::default();
        let result = config.set_property(NUM_STREAMS, &PropertyValue::UInt(0));

        assert!(matches!(result, Err(PluginError::InvalidValue { .. })));
        assert_eq!(config.streams, 1);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut config = StreamsExecutorConfig::default();
        assert!(matches!(
            config.set_property("cpu_bind_thread", &PropertyValue::Bool(true)),
            Err(PluginError::UnknownOption { .. })
        ));
        assert!(matches!(
            config.get_property("cpu_bind_thread"),
            Err(PluginError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_supported_properties_match_is_supported() {
        for name in StreamsExecutorConfig::supported_properties() {
            assert!(StreamsExecutorConfig::is_supported(&name));
        }
    }
}
