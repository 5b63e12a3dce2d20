use std::io::{
    Read,
    Write
};

use log::debug;
use serde::{
    Deserialize,
    Serialize
};

use crate::codec::binaryformat::{
    read_binary,
    write_binary
};
use crate::codec::textformat::{
    read_text,
    write_text
};
use crate::configuration::CodecConfiguration;
use crate::error::CodecError;
use crate::function::sample::Sample;
use crate::function::tabulatedfunction::TabulatedFunction;
use crate::function::tabulatedfunctions::create;

#[derive(Serialize, Deserialize)]
struct TabulatedFunctionJsonProp {
    points: Vec<Sample>
}

/// Persists tabulated functions as binary records, whitespace-separated text
/// or JSON.
///
/// Reads always go through the regular constructors, so a stream whose
/// points are too few or out of order fails with `InvalidArgument` once it
/// has been read, never with a half-built function.
#[derive(Debug, Clone, Default)]
pub struct TabulatedFunctionCodec {
    configuration: CodecConfiguration
}

impl TabulatedFunctionCodec {
    pub fn new(configuration: CodecConfiguration) -> TabulatedFunctionCodec {
        TabulatedFunctionCodec { configuration }
    }

    pub fn configuration(&self) -> &CodecConfiguration {
        &self.configuration
    }

    pub fn write_binary<W, F>(&self, function: &F, writer: &mut W) -> Result<(), CodecError> where
        W: Write,
        F: TabulatedFunction + ?Sized {
        write_binary(writer, function, self.configuration.byte_order())
    }

    pub fn read_binary<R>(&self, reader: &mut R) -> Result<Box<dyn TabulatedFunction>, CodecError> where
        R: Read {
        let points = read_binary(reader, self.configuration.byte_order())?;
        self.build(points)
    }

    pub fn write_text<W, F>(&self, function: &F, writer: &mut W) -> Result<(), CodecError> where
        W: Write,
        F: TabulatedFunction + ?Sized {
        write_text(writer, function, self.configuration.text_precision())
    }

    pub fn read_text<R>(&self, reader: &mut R) -> Result<Box<dyn TabulatedFunction>, CodecError> where
        R: Read {
        let points = read_text(reader)?;
        self.build(points)
    }

    pub fn write_json<W, F>(&self, function: &F, writer: &mut W) -> Result<(), CodecError> where
        W: Write,
        F: TabulatedFunction + ?Sized {
        let json_prop = TabulatedFunctionJsonProp { points: function.points() };
        serde_json::to_writer(&mut *writer, &json_prop)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_json<R>(&self, reader: &mut R) -> Result<Box<dyn TabulatedFunction>, CodecError> where
        R: Read {
        let json_prop: TabulatedFunctionJsonProp = serde_json::from_reader(reader)?;
        self.build(json_prop.points)
    }

    fn build(&self, points: Vec<Sample>) -> Result<Box<dyn TabulatedFunction>, CodecError> {
        debug!("building {:?} function from {} points", self.configuration.storage(), points.len());
        Ok(create(self.configuration.storage(), &points)?)
    }
}
