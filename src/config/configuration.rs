// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEVICE_ID, DISABLE_TRANSFORMATIONS, ENABLE_PROFILING};
use crate::config::{PropertyMap, PropertyValue, StreamsExecutorConfig};
use crate::errors::{PluginError, PluginResult};

/// Frozen set of options governing compilation and reporting.
///
/// A `Configuration` is built once from caller input layered over a set of
/// defaults (normally the plugin's), validated, and then handed by value to
/// the compiled model. There is no mutation path after that point.
///
/// # Example
/// ```
/// use template_plugin::config::{Configuration, PropertyMap, PropertyValue};
///
/// let mut overrides = PropertyMap::new();
/// overrides.insert("device_id".to_string(), PropertyValue::UInt(1));
/// overrides.insert("num_streams".to_string(), PropertyValue::UInt(4));
///
/// let config = Configuration::default().merged(&overrides).unwrap();
/// assert_eq!(config.device_id, 1);
/// assert_eq!(config.streams_executor_config.streams, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Configuration {
    pub device_id: u32,
    pub enable_profiling: bool,
    pub disable_transformations: bool,
    pub streams_executor_config: StreamsExecutorConfig,
    /// Unrecognized keys kept verbatim when validation is relaxed.
    extra: PropertyMap,
}

impl Configuration {
    /// Apply `properties` on top of `defaults`.
    ///
    /// Unrecognized keys fail with `UnknownOption` when
    /// `throw_on_unsupported` is set; otherwise they are stored and handed
    /// back unchanged by [`Configuration::get`].
    pub fn new(
        properties: &PropertyMap,
        defaults: &Configuration,
        throw_on_unsupported: bool,
    ) -> PluginResult<Self> {
        let mut config = defaults.clone();

        for (name, value) in properties {
            match name.as_str() {
                DEVICE_ID => {
                    let id = value.as_u64().ok_or_else(|| {
                        PluginError::invalid_value(
                            name,
                            format!("expected a device number, got {:?}", value),
                        )
                    })?;
                    config.device_id = u32::try_from(id).map_err(|_| {
                        PluginError::invalid_value(name, format!("{} is out of range", id))
                    })?;
                }
                ENABLE_PROFILING => {
                    config.enable_profiling = parse_flag(name, value)?;
                }
                DISABLE_TRANSFORMATIONS => {
                    config.disable_transformations = parse_flag(name, value)?;
                }
                key if StreamsExecutorConfig::is_supported(key) => {
                    config.streams_executor_config.set_property(key, value)?;
                }
                _ if throw_on_unsupported => {
                    return Err(PluginError::unknown_option(name.as_str()));
                }
                _ => {
                    config.extra.insert(name.clone(), value.clone());
                }
            }
        }

        Ok(config)
    }

    /// Layer `overrides` over this configuration, rejecting unknown keys.
    pub fn merged(&self, overrides: &PropertyMap) -> PluginResult<Self> {
        Self::new(overrides, self, true)
    }

    /// Parse a YAML mapping of option names to values and layer it over
    /// `defaults`.
    ///
    /// # Example
    /// ```
    /// use template_plugin::config::Configuration;
    ///
    /// let config = Configuration::from_yaml_str(
    ///     "device_id: 3\nenable_profiling: YES\n",
    ///     &Configuration::default(),
    /// ).unwrap();
    /// assert_eq!(config.device_id, 3);
    /// assert!(config.enable_profiling);
    /// ```
    pub fn from_yaml_str(text: &str, defaults: &Configuration) -> PluginResult<Self> {
        let properties: PropertyMap = serde_yaml::from_str(text)
            .map_err(|e| PluginError::invalid_value("<configuration>", e.to_string()))?;
        Self::new(&properties, defaults, true)
    }

    /// Look up an option by name.
    pub fn get(&self, name: &str) -> PluginResult<PropertyValue> {
        match name {
            DEVICE_ID => Ok(PropertyValue::from(self.device_id)),
            ENABLE_PROFILING => Ok(PropertyValue::Bool(self.enable_profiling)),
            DISABLE_TRANSFORMATIONS => Ok(PropertyValue::Bool(self.disable_transformations)),
            key if StreamsExecutorConfig::is_supported(key) => {
                self.streams_executor_config.get_property(key)
            }
            _ => self
                .extra
                .get(name)
                .cloned()
                .ok_or_else(|| PluginError::unknown_option(name)),
        }
    }
}

fn parse_flag(name: &str, value: &PropertyValue) -> PluginResult<bool> {
    value.as_bool().ok_or_else(|| {
        PluginError::invalid_value(name, format!("expected a boolean, got {:?}", value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::NUM_STREAMS;

    fn properties(entries: &[(&str, PropertyValue)]) -> PropertyMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::default();

        assert_eq!(config.device_id, 0);
        assert!(!config.enable_profiling);
        assert!(!config.disable_transformations);
        assert_eq!(config.streams_executor_config.streams, 1);
    }

    #[test]
    fn test_overrides_apply_over_defaults() {
        let defaults = Configuration::new(
            &properties(&[(ENABLE_PROFILING, PropertyValue::Bool(true))]),
            &Configuration::default(),
            true,
        )
        .unwrap();

        let config = defaults
            .merged(&properties(&[
                (DEVICE_ID, PropertyValue::from("2")),
                (NUM_STREAMS, PropertyValue::UInt(4)),
            ]))
            .unwrap();

        assert_eq!(config.device_id, 2);
        assert!(config.enable_profiling);
        assert_eq!(config.streams_executor_config.streams, 4);
    }

    #[test]
    fn test_unknown_key_rejected_when_strict() {
        let result = Configuration::new(
            &properties(&[("vendor_knob", PropertyValue::UInt(1))]),
            &Configuration::default(),
            true,
        );

        assert!(matches!(
            result,
            Err(PluginError::UnknownOption { name }) if name == "vendor_knob"
        ));
    }

    #[test]
    fn test_unknown_key_stored_when_relaxed() {
        let config = Configuration::new(
            &properties(&[("vendor_knob", PropertyValue::UInt(1))]),
            &Configuration::default(),
            false,
        )
        .unwrap();

        assert_eq!(config.get("vendor_knob").unwrap(), PropertyValue::UInt(1));
    }

    #[test]
    fn test_get_recognized_and_missing_names() {
        let config = Configuration::default();

        assert_eq!(config.get(DEVICE_ID).unwrap(), PropertyValue::UInt(0));
        assert_eq!(config.get(ENABLE_PROFILING).unwrap(), PropertyValue::Bool(false));
        assert_eq!(config.get(NUM_STREAMS).unwrap(), PropertyValue::UInt(1));
        assert!(matches!(
            config.get("not_a_real_property"),
            Err(PluginError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_invalid_flag_value() {
        let result = Configuration::default()
            .merged(&properties(&[(DISABLE_TRANSFORMATIONS, PropertyValue::UInt(3))]));

        assert!(matches!(result, Err(PluginError::InvalidValue { .. })));
    }

    #[test]
    fn test_from_yaml_rejects_non_mapping() {
        let result = Configuration::from_yaml_str("- just\n- a list\n", &Configuration::default());
        assert!(matches!(result, Err(PluginError::InvalidValue { .. })));
    }
}
