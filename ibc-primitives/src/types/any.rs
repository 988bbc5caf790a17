use ibc_proto::google::protobuf::Any;

use crate::prelude::*;

/// Encodes an [`Any`] envelope itself, the form in which values are written
/// to a client store.
pub fn encode_any(any: Any) -> Vec<u8> {
    prost::Message::encode_to_vec(&any)
}

/// Decodes an [`Any`] envelope from store bytes.
pub fn decode_any(bytes: &[u8]) -> Result<Any, prost::DecodeError> {
    <Any as prost::Message>::decode(bytes)
}
