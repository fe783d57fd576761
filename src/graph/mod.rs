// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The model graph consumed by the backend.
//!
//! A [`Model`] is a topologically ordered list of nodes: parameters feed
//! operations, constants carry raw weight bytes, and results mark the
//! outputs. The backend never interprets operation semantics; it only needs
//! the friendly name, mutable access for transformation passes, and the
//! two-artifact serializer in [`serialize`].

mod model;
mod serialize;
mod tensor;

pub use model::{Model, Node, NodeId, OpKind};
pub use serialize::{deserialize, serialize, SerializedModel};
pub use tensor::{ElementType, Tensor, TensorDesc};
