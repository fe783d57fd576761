// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Two-artifact serialization of a [`Model`].
//!
//! The structure artifact is a JSON document describing topology and
//! attributes. Constant nodes reference their bytes by `{offset, size}` in
//! the constants artifact, which is the plain concatenation of all constant
//! data in node order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{PluginError, PluginResult};
use crate::graph::{Model, Node, NodeId, OpKind, TensorDesc};

/// Structure and constants artifacts for one model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SerializedModel {
    pub structure: Vec<u8>,
    pub constants: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
struct StructureDoc {
    friendly_name: String,
    nodes: Vec<NodeDoc>,
}

#[derive(Serialize, Deserialize)]
struct NodeDoc {
    id: NodeId,
    name: String,
    kind: OpKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    inputs: Vec<NodeId>,
    output: TensorDesc,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    constant: Option<ConstantSlice>,
}

#[derive(Serialize, Deserialize)]
struct ConstantSlice {
    offset: u64,
    size: u64,
}

/// Serialize a model without touching it.
///
/// Output is deterministic: identical models produce identical bytes.
pub fn serialize(model: &Model) -> PluginResult<SerializedModel> {
    let mut constants = Vec::new();
    let mut nodes = Vec::with_capacity(model.nodes().len());

    for node in model.nodes() {
        let constant = node.data.as_ref().map(|data| {
            let slice = ConstantSlice {
                offset: constants.len() as u64,
                size: data.len() as u64,
            };
            constants.extend_from_slice(data);
            slice
        });

        nodes.push(NodeDoc {
            id: node.id,
            name: node.name.clone(),
            kind: node.kind.clone(),
            inputs: node.inputs.clone(),
            output: node.output.clone(),
            attributes: node.attributes.clone(),
            constant,
        });
    }

    let doc = StructureDoc {
        friendly_name: model.friendly_name().to_string(),
        nodes,
    };

    Ok(SerializedModel {
        structure: serde_json::to_vec(&doc)?,
        constants,
    })
}

/// Rebuild a model from its structure and constants artifacts.
pub fn deserialize(structure: &[u8], constants: &[u8]) -> PluginResult<Model> {
    let doc: StructureDoc = serde_json::from_slice(structure)?;

    let nodes = doc
        .nodes
        .into_iter()
        .map(|node| {
            let data = node
                .constant
                .map(|slice| constant_bytes(&node.name, &slice, constants))
                .transpose()?;
            Ok(Node {
                id: node.id,
                name: node.name,
                kind: node.kind,
                inputs: node.inputs,
                output: node.output,
                attributes: node.attributes,
                data,
            })
        })
        .collect::<PluginResult<Vec<_>>>()?;

    Model::from_nodes(doc.friendly_name, nodes)
}

fn constant_bytes(name: &str, slice: &ConstantSlice, constants: &[u8]) -> PluginResult<Vec<u8>> {
    let out_of_range = || {
        PluginError::MalformedStream(format!(
            "constant '{}' slice {}+{} exceeds {} constant bytes",
            name,
            slice.offset,
            slice.size,
            constants.len()
        ))
    };

    let start = usize::try_from(slice.offset).map_err(|_| out_of_range())?;
    let size = usize::try_from(slice.size).map_err(|_| out_of_range())?;
    let end = start.checked_add(size).ok_or_else(out_of_range)?;

    constants
        .get(start..end)
        .map(<[u8]>::to_vec)
        .ok_or_else(out_of_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ElementType;

    fn sample_model() -> Model {
        let desc = TensorDesc::new(ElementType::F32, vec![2]);
        let mut model = Model::new("net1");
        let input = model.add_parameter("input", desc.clone());
        let weight = model
            .add_constant("weight", desc.clone(), vec![1, 2, 3, 4, 5, 6, 7, 8])
            .unwrap();
        let bias = model.add_constant("bias", desc.clone(), vec![9; 8]).unwrap();
        let mul = model.add_op("mul", "Multiply", vec![input, weight], desc.clone()).unwrap();
        let add = model.add_op("add", "Add", vec![mul, bias], desc).unwrap();
        model.nodes_mut()[add.0]
            .attributes
            .insert("auto_broadcast".to_string(), "numpy".to_string());
        model.add_result("output", add).unwrap();
        model
    }

    #[test]
    fn test_constants_block_is_concatenated_in_node_order() {
        let serialized = serialize(&sample_model()).unwrap();

        assert_eq!(serialized.constants.len(), 16);
        assert_eq!(&serialized.constants[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&serialized.constants[8..], &[9; 8]);
    }

    #[test]
    fn test_deserialize_rebuilds_equal_model() {
        let model = sample_model();
        let serialized = serialize(&model).unwrap();

        let rebuilt = deserialize(&serialized.structure, &serialized.constants).unwrap();
        assert_eq!(rebuilt, model);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let model = sample_model();
        assert_eq!(serialize(&model).unwrap(), serialize(&model).unwrap());
    }

    #[test]
    fn test_truncated_constants_rejected() {
        let serialized = serialize(&sample_model()).unwrap();
        let result = deserialize(&serialized.structure, &serialized.constants[..10]);

        assert!(matches!(result, Err(PluginError::MalformedStream(_))));
    }

    #[test]
    fn test_constant_slice_must_match_descriptor() {
        let structure = br#"{
            "friendly_name": "crafted",
            "nodes": [{
                "id": 0,
                "name": "w",
                "kind": "constant",
                "output": {"element_type": "f32", "shape": [1000]},
                "constant": {"offset": 0, "size": 3}
            }]
        }"#;

        let result = deserialize(structure, &[1, 2, 3]);
        assert!(matches!(result, Err(PluginError::InvalidGraph(_))));
    }

    #[test]
    fn test_garbage_structure_rejected() {
        let result = deserialize(b"<net/>", &[]);
        assert!(matches!(result, Err(PluginError::Serialization(_))));
    }
}
