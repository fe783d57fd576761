// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // device backends
pub mod config;     // properties + configuration
pub mod engine;     // executors + async requests
pub mod errors;     // error handling
pub mod graph;      // model graph + serializer
pub mod observability;
pub mod traits;     // host-runtime contracts
