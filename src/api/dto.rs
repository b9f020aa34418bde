use serde::{Deserialize, Serialize};

use crate::backend::{DataType, InferRequest, InferResponse, Tensor, TensorData};

// ---- Inference API (KServe v2 style JSON) ----

#[derive(Debug, Deserialize)]
pub struct InferRequestBody {
    pub inputs: Vec<TensorBody>,
}

#[derive(Debug, Serialize)]
pub struct InferResponseBody {
    pub model_name: String,
    pub model_version: String,
    pub outputs: Vec<TensorBody>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TensorBody {
    pub name: String,
    pub shape: Vec<i64>,
    pub datatype: String,
    pub data: TensorPayload,
}

/// BYTES tensors carry their elements as JSON strings, UINT8 tensors as
/// a flat array of numbers.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TensorPayload {
    Bytes(Vec<String>),
    Uint8(Vec<u8>),
}

impl InferRequestBody {
    pub fn into_infer_request(self) -> Result<InferRequest, String> {
        let mut inputs = Vec::with_capacity(self.inputs.len());
        for body in self.inputs {
            inputs.push(body.into_tensor()?);
        }
        Ok(InferRequest { inputs })
    }
}

impl TensorBody {
    fn into_tensor(self) -> Result<Tensor, String> {
        let datatype: DataType = self.datatype.parse()?;
        let data = match (datatype, self.data) {
            (DataType::Bytes, TensorPayload::Bytes(elements)) => {
                TensorData::Bytes(elements.into_iter().map(String::into_bytes).collect())
            }
            (DataType::Uint8, TensorPayload::Uint8(bytes)) => TensorData::Uint8(bytes),
            (datatype, _) => {
                return Err(format!(
                    "tensor \"{}\": data does not match datatype {datatype}",
                    self.name
                ));
            }
        };
        Ok(Tensor {
            name: self.name,
            datatype,
            shape: self.shape,
            data,
        })
    }

    fn from_tensor(tensor: Tensor) -> Self {
        let data = match tensor.data {
            TensorData::Bytes(elements) => TensorPayload::Bytes(
                elements
                    .into_iter()
                    .map(|e| String::from_utf8_lossy(&e).into_owned())
                    .collect(),
            ),
            TensorData::Uint8(bytes) => TensorPayload::Uint8(bytes),
        };
        Self {
            name: tensor.name,
            shape: tensor.shape,
            datatype: tensor.datatype.as_str().to_string(),
            data,
        }
    }
}

impl InferResponseBody {
    pub fn from_response(model_name: &str, model_version: &str, response: InferResponse) -> Self {
        Self {
            model_name: model_name.to_string(),
            model_version: model_version.to_string(),
            outputs: response
                .outputs
                .into_iter()
                .map(TensorBody::from_tensor)
                .collect(),
        }
    }
}
