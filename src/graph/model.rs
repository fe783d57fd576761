// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::errors::{PluginError, PluginResult};
use crate::graph::TensorDesc;

/// Index of a node within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Parameter,
    Constant,
    Result,
    /// Any computation, identified by its operation type (e.g. `"MatMul"`).
    Operation(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: OpKind,
    pub inputs: Vec<NodeId>,
    pub output: TensorDesc,
    pub attributes: BTreeMap<String, String>,
    /// Raw little-endian bytes, present only on `Constant` nodes.
    pub data: Option<Vec<u8>>,
}

/// A computation graph with a friendly name.
///
/// Nodes are stored in insertion order and may only reference nodes added
/// before them, so the node list is always a valid topological order.
///
/// # Example
/// ```
/// use template_plugin::graph::{ElementType, Model, TensorDesc};
///
/// let desc = TensorDesc::new(ElementType::F32, vec![2]);
/// let mut model = Model::new("net1");
/// let input = model.add_parameter("input", desc.clone());
/// let bias = model.add_constant("bias", desc.clone(), vec![0; 8]).unwrap();
/// let add = model.add_op("add", "Add", vec![input, bias], desc).unwrap();
/// model.add_result("output", add).unwrap();
///
/// assert_eq!(model.friendly_name(), "net1");
/// assert_eq!(model.parameters().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    friendly_name: String,
    nodes: Vec<Node>,
}

impl Model {
    pub fn new(friendly_name: impl Into<String>) -> Self {
        Self {
            friendly_name: friendly_name.into(),
            nodes: Vec::new(),
        }
    }

    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    pub fn set_friendly_name(&mut self, name: impl Into<String>) {
        self.friendly_name = name.into();
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable node access for transformation passes.
    ///
    /// Passes may rewrite names, attributes and descriptors in place.
    /// Rewiring inputs must keep every reference pointing at an earlier node;
    /// [`Model::validate`] checks this.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.kind == OpKind::Parameter)
    }

    pub fn results(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.kind == OpKind::Result)
    }

    pub fn constant_data(&self, id: NodeId) -> Option<&[u8]> {
        self.node(id).and_then(|n| n.data.as_deref())
    }

    pub fn add_parameter(&mut self, name: impl Into<String>, desc: TensorDesc) -> NodeId {
        self.push(name.into(), OpKind::Parameter, Vec::new(), desc, None)
    }

    pub fn add_constant(
        &mut self,
        name: impl Into<String>,
        desc: TensorDesc,
        data: Vec<u8>,
    ) -> PluginResult<NodeId> {
        let name = name.into();
        check_constant(&name, &desc, &data)?;
        Ok(self.push(name, OpKind::Constant, Vec::new(), desc, Some(data)))
    }

    pub fn add_op(
        &mut self,
        name: impl Into<String>,
        op_type: impl Into<String>,
        inputs: Vec<NodeId>,
        output: TensorDesc,
    ) -> PluginResult<NodeId> {
        let name = name.into();
        self.check_inputs(&name, &inputs)?;
        Ok(self.push(name, OpKind::Operation(op_type.into()), inputs, output, None))
    }

    pub fn add_result(&mut self, name: impl Into<String>, input: NodeId) -> PluginResult<NodeId> {
        let name = name.into();
        self.check_inputs(&name, &[input])?;
        let desc = self.nodes[input.0].output.clone();
        Ok(self.push(name, OpKind::Result, vec![input], desc, None))
    }

    /// Check the invariants passes are expected to preserve.
    pub fn validate(&self) -> PluginResult<()> {
        let mut names = HashSet::new();
        for (index, node) in self.nodes.iter().enumerate() {
            if node.id.0 != index {
                return Err(PluginError::InvalidGraph(format!(
                    "node '{}' has id {} at position {}",
                    node.name, node.id, index
                )));
            }
            if !names.insert(node.name.as_str()) {
                return Err(PluginError::InvalidGraph(format!(
                    "duplicate node name '{}'",
                    node.name
                )));
            }
            if let Some(input) = node.inputs.iter().find(|input| input.0 >= index) {
                return Err(PluginError::InvalidGraph(format!(
                    "node '{}' references {} which does not precede it",
                    node.name, input
                )));
            }
            checked_byte_size(&node.name, &node.output)?;

            match (&node.kind, &node.data) {
                (OpKind::Constant, Some(data)) => check_constant(&node.name, &node.output, data)?,
                (OpKind::Constant, None) | (_, Some(_)) => {
                    return Err(PluginError::InvalidGraph(format!(
                        "node '{}' constant data does not match its kind",
                        node.name
                    )));
                }
                _ => {}
            }

            match node.kind {
                OpKind::Parameter | OpKind::Constant if !node.inputs.is_empty() => {
                    return Err(PluginError::InvalidGraph(format!(
                        "node '{}' takes no inputs",
                        node.name
                    )));
                }
                OpKind::Result => self.check_result(node)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn check_result(&self, node: &Node) -> PluginResult<()> {
        let [input] = node.inputs.as_slice() else {
            return Err(PluginError::InvalidGraph(format!(
                "result '{}' has {} inputs, expected exactly one",
                node.name,
                node.inputs.len()
            )));
        };
        if self.nodes[input.0].output != node.output {
            return Err(PluginError::InvalidGraph(format!(
                "result '{}' does not match the descriptor of its input",
                node.name
            )));
        }
        Ok(())
    }

    /// Rebuild a model from already-validated parts.
    pub(crate) fn from_nodes(friendly_name: String, nodes: Vec<Node>) -> PluginResult<Self> {
        let model = Self {
            friendly_name,
            nodes,
        };
        model.validate()?;
        Ok(model)
    }

    fn check_inputs(&self, name: &str, inputs: &[NodeId]) -> PluginResult<()> {
        match inputs.iter().find(|input| input.0 >= self.nodes.len()) {
            Some(missing) => Err(PluginError::InvalidGraph(format!(
                "node '{}' references unknown node {}",
                name, missing
            ))),
            None => Ok(()),
        }
    }

    fn push(
        &mut self,
        name: String,
        kind: OpKind,
        inputs: Vec<NodeId>,
        output: TensorDesc,
        data: Option<Vec<u8>>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            name,
            kind,
            inputs,
            output,
            attributes: BTreeMap::new(),
            data,
        });
        id
    }
}

fn checked_byte_size(name: &str, desc: &TensorDesc) -> PluginResult<usize> {
    desc.byte_size().ok_or_else(|| {
        PluginError::InvalidGraph(format!(
            "node '{}' has shape {:?} whose size overflows",
            name, desc.shape
        ))
    })
}

fn check_constant(name: &str, desc: &TensorDesc, data: &[u8]) -> PluginResult<()> {
    let expected = checked_byte_size(name, desc)?;
    if data.len() != expected {
        return Err(PluginError::InvalidGraph(format!(
            "constant '{}' has {} bytes, descriptor needs {}",
            name,
            data.len(),
            expected
        )));
    }
    Ok(())
}
