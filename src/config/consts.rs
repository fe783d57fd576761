// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Property names and built-in defaults.

/// Friendly name of the compiled model's graph.
pub const MODEL_NAME: &str = "model_name";
/// Whether the compiled model was reconstructed from an exported stream.
pub const LOADED_FROM_CACHE: &str = "loaded_from_cache";
/// Devices the compiled model executes on, as `<device-family>.<device-id>`.
pub const EXECUTION_DEVICES: &str = "execution_devices";
/// Recommended size of an inference request pool.
pub const OPTIMAL_NUMBER_OF_INFER_REQUESTS: &str = "optimal_number_of_infer_requests";
/// Every supported property name, tagged with its mutability.
pub const SUPPORTED_PROPERTIES: &str = "supported_properties";

/// Legacy enumeration of read-only names.
pub const SUPPORTED_METRICS: &str = "SUPPORTED_METRICS";
/// Legacy enumeration of read-write names.
pub const SUPPORTED_CONFIG_KEYS: &str = "SUPPORTED_CONFIG_KEYS";

pub const DEVICE_ID: &str = "device_id";
pub const ENABLE_PROFILING: &str = "enable_profiling";
pub const DISABLE_TRANSFORMATIONS: &str = "disable_transformations";

pub const NUM_STREAMS: &str = "num_streams";
pub const INFERENCE_NUM_THREADS: &str = "inference_num_threads";
pub const THREADS_PER_STREAM: &str = "threads_per_stream";

/// Accepted by `num_streams` to size the stream count from the host.
pub const STREAMS_AUTO: &str = "AUTO";

/// Device family reported by the template backend.
pub const DEFAULT_DEVICE_NAME: &str = "TEMPLATE";
pub const DEFAULT_NUM_STREAMS: u32 = 1;
/// Stream count used for `AUTO` when host parallelism can't be detected.
pub const FALLBACK_PARALLELISM: u32 = 4;
