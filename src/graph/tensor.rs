// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::errors::{PluginError, PluginResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    F32,
    F16,
    I32,
    I64,
    U8,
    Boolean,
}

impl ElementType {
    pub fn size_bytes(&self) -> usize {
        match self {
            ElementType::F32 | ElementType::I32 => 4,
            ElementType::F16 => 2,
            ElementType::I64 => 8,
            ElementType::U8 | ElementType::Boolean => 1,
        }
    }
}

/// Element type and static shape of a tensor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TensorDesc {
    pub element_type: ElementType,
    pub shape: Vec<usize>,
}

impl TensorDesc {
    pub fn new(element_type: ElementType, shape: Vec<usize>) -> Self {
        Self { element_type, shape }
    }

    /// Number of elements, or `None` if it does not fit in `usize`.
    pub fn element_count(&self) -> Option<usize> {
        self.shape
            .iter()
            .try_fold(1usize, |count, &dim| count.checked_mul(dim))
    }

    /// Size of the densely packed data, or `None` on overflow.
    pub fn byte_size(&self) -> Option<usize> {
        self.element_count()?.checked_mul(self.element_type.size_bytes())
    }
}

/// A host-side tensor: a descriptor plus densely packed little-endian data.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    desc: TensorDesc,
    data: Vec<u8>,
}

impl Tensor {
    pub fn new(desc: TensorDesc, data: Vec<u8>) -> PluginResult<Self> {
        let expected = required_bytes(&desc)?;
        if data.len() != expected {
            return Err(PluginError::Infer(format!(
                "tensor data is {} bytes but {:?}{:?} needs {}",
                data.len(),
                desc.element_type,
                desc.shape,
                expected
            )));
        }
        Ok(Self { desc, data })
    }

    pub fn zeros(desc: TensorDesc) -> PluginResult<Self> {
        let data = vec![0u8; required_bytes(&desc)?];
        Ok(Self { desc, data })
    }

    pub fn from_f32(shape: Vec<usize>, values: &[f32]) -> PluginResult<Self> {
        let data = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        Self::new(TensorDesc::new(ElementType::F32, shape), data)
    }

    pub fn desc(&self) -> &TensorDesc {
        &self.desc
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decode the data as `f32` values, if that is the element type.
    pub fn to_f32(&self) -> Option<Vec<f32>> {
        if self.desc.element_type != ElementType::F32 {
            return None;
        }
        Some(
            self.data
                .chunks_exact(4)
                .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
                .collect(),
        )
    }
}

fn required_bytes(desc: &TensorDesc) -> PluginResult<usize> {
    desc.byte_size().ok_or_else(|| {
        PluginError::Infer(format!(
            "tensor shape {:?} of {:?} overflows the address space",
            desc.shape, desc.element_type
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_size() {
        let desc = TensorDesc::new(ElementType::F16, vec![2, 3]);
        assert_eq!(desc.element_count(), Some(6));
        assert_eq!(desc.byte_size(), Some(12));
    }

    #[test]
    fn test_scalar_shape_has_one_element() {
        let desc = TensorDesc::new(ElementType::I64, vec![]);
        assert_eq!(desc.byte_size(), Some(8));
    }

    #[test]
    fn test_overflowing_shape_has_no_size() {
        let desc = TensorDesc::new(ElementType::F32, vec![usize::MAX, 2]);
        assert_eq!(desc.element_count(), None);
        assert_eq!(desc.byte_size(), None);

        let desc = TensorDesc::new(ElementType::I64, vec![usize::MAX / 4]);
        assert!(desc.element_count().is_some());
        assert_eq!(desc.byte_size(), None);
        assert!(Tensor::zeros(desc).is_err());
    }

    #[test]
    fn test_tensor_rejects_wrong_data_size() {
        let desc = TensorDesc::new(ElementType::F32, vec![2]);
        assert!(Tensor::new(desc, vec![0; 7]).is_err());
    }

    #[test]
    fn test_f32_round_trip() {
        let tensor = Tensor::from_f32(vec![3], &[1.0, -2.5, 4.0]).unwrap();
        assert_eq!(&tensor.data()[..4], &1.0f32.to_le_bytes());
        assert_eq!(tensor.to_f32().unwrap(), vec![1.0, -2.5, 4.0]);
    }
}
