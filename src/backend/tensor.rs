use std::fmt;
use std::str::FromStr;

use crate::model::ImageFrame;

/// Wire datatypes this backend exchanges. BYTES carries variable-length
/// byte strings (one per element), UINT8 a flat numeric array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Bytes,
    Uint8,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Bytes => "BYTES",
            DataType::Uint8 => "UINT8",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BYTES" => Ok(DataType::Bytes),
            "UINT8" => Ok(DataType::Uint8),
            other => Err(format!("unsupported tensor datatype: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TensorData {
    Bytes(Vec<Vec<u8>>),
    Uint8(Vec<u8>),
}

/// A named, typed, shaped array: the unit of exchange across the
/// inference protocol boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tensor {
    pub name: String,
    pub datatype: DataType,
    pub shape: Vec<i64>,
    pub data: TensorData,
}

impl Tensor {
    pub fn bytes(name: impl Into<String>, elements: Vec<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            datatype: DataType::Bytes,
            shape: vec![elements.len() as i64],
            data: TensorData::Bytes(elements),
        }
    }

    /// Wraps an image frame as a fresh `(H, W, 3)` UINT8 tensor. The
    /// payload is copied; the frame itself stays untouched.
    pub fn image(name: impl Into<String>, frame: &ImageFrame) -> Self {
        Self {
            name: name.into(),
            datatype: DataType::Uint8,
            shape: vec![frame.height() as i64, frame.width() as i64, 3],
            data: TensorData::Uint8(frame.as_bytes().to_vec()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InferRequest {
    pub inputs: Vec<Tensor>,
}

impl InferRequest {
    pub fn input(&self, name: &str) -> Option<&Tensor> {
        self.inputs.iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InferResponse {
    pub outputs: Vec<Tensor>,
}

impl InferResponse {
    pub fn output(&self, name: &str) -> Option<&Tensor> {
        self.outputs.iter().find(|t| t.name == name)
    }
}
