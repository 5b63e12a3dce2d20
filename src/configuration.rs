use std::fs::File;
use std::io::BufReader;

use log::debug;
use serde::{
    Deserialize,
    Serialize
};

use crate::error::CodecError;
use crate::function::tabulatedfunction::StorageKind;

/// Byte order of the binary record stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endianness {
    #[default]
    BigEndian,
    LittleEndian,
}

/// Settings of `TabulatedFunctionCodec`, read from JSON. Missing fields take
/// their defaults:
///
/// ```json
/// { "byte_order": "big_endian", "storage": "array", "text_precision": null }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfiguration {
    byte_order: Endianness,
    storage: StorageKind,
    text_precision: Option<usize>
}

impl CodecConfiguration {
    pub fn new(byte_order: Endianness, storage: StorageKind, text_precision: Option<usize>) -> CodecConfiguration {
        CodecConfiguration { byte_order, storage, text_precision }
    }

    pub fn byte_order(&self) -> Endianness {
        self.byte_order
    }

    /// Storage strategy of the functions built by reads.
    pub fn storage(&self) -> StorageKind {
        self.storage
    }

    /// Fixed number of decimals for text output; `None` writes the shortest
    /// representation that reads back to the same value.
    ///
    /// A fixed precision is lossy: the text reads back as the rounded
    /// samples, and reading fails with `InvalidArgument` when rounding
    /// brings neighbouring abscissas within `EPSILON` of each other.
    pub fn text_precision(&self) -> Option<usize> {
        self.text_precision
    }

    pub fn from_json(json_value: serde_json::Value) -> Result<CodecConfiguration, CodecError> {
        let configuration: CodecConfiguration = serde_json::from_value(json_value)?;
        debug!("codec configuration loaded: {:?}", configuration);
        Ok(configuration)
    }

    pub fn from_reader(file_path: &str) -> Result<CodecConfiguration, CodecError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: CodecConfiguration = serde_json::from_reader(reader)?;
        debug!("codec configuration loaded from {}: {:?}", file_path, configuration);
        Ok(configuration)
    }
}
