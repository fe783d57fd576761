// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod compilation;
mod pass;
mod plugin;

pub use compilation::CompileFailure;
pub use pass::PassError;
pub use plugin::{PluginError, PluginResult};
