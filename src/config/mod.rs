// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod configuration;
mod streams;
mod value;

pub mod consts;

pub use configuration::Configuration;
pub use streams::StreamsExecutorConfig;
pub use value::{PropertyMap, PropertyMutability, PropertyName, PropertyValue};
