use std::io::{
    Read,
    Write
};

use byteorder::{
    BigEndian,
    ByteOrder,
    LittleEndian,
    ReadBytesExt,
    WriteBytesExt
};
use log::{
    debug,
    trace
};

use crate::configuration::Endianness;
use crate::error::{
    CodecError,
    TabulatedFunctionError
};
use crate::function::sample::Sample;
use crate::function::tabulatedfunction::TabulatedFunction;

// Record layout: i32 count, then count × (f64 x, f64 y). No header, no padding.

/// Upper bound on the samples reserved up front, so a corrupt count cannot
/// trigger a huge allocation before the stream runs dry.
const PREALLOCATION_LIMIT: usize = 1 << 16;

pub fn write_binary<W, F>(writer: &mut W, function: &F, byte_order: Endianness) -> Result<(), CodecError> where
    W: Write,
    F: TabulatedFunction + ?Sized {
    match byte_order {
        Endianness::BigEndian => write_records::<BigEndian, W>(writer, &function.points()),
        Endianness::LittleEndian => write_records::<LittleEndian, W>(writer, &function.points()),
    }
}

pub fn read_binary<R>(reader: &mut R, byte_order: Endianness) -> Result<Vec<Sample>, CodecError> where
    R: Read {
    match byte_order {
        Endianness::BigEndian => read_records::<BigEndian, R>(reader),
        Endianness::LittleEndian => read_records::<LittleEndian, R>(reader),
    }
}

fn write_records<B: ByteOrder, W: Write>(writer: &mut W, points: &[Sample]) -> Result<(), CodecError> {
    let count = i32::try_from(points.len()).map_err(|_| TabulatedFunctionError::InvalidArgument(
        format!("{} points do not fit the record count", points.len())
    ))?;
    writer.write_i32::<B>(count)?;
    for point in points {
        writer.write_f64::<B>(point.x())?;
        writer.write_f64::<B>(point.y())?;
    }
    writer.flush()?;
    trace!("wrote {} binary records", count);
    Ok(())
}

fn read_records<B: ByteOrder, R: Read>(reader: &mut R) -> Result<Vec<Sample>, CodecError> {
    let count = reader.read_i32::<B>()?;
    let count = usize::try_from(count).map_err(|_| {
        debug!("negative record count {}", count);
        TabulatedFunctionError::InvalidArgument(format!("negative point count {}", count))
    })?;
    let mut points = Vec::with_capacity(count.min(PREALLOCATION_LIMIT));
    for _ in 0..count {
        let x = reader.read_f64::<B>()?;
        let y = reader.read_f64::<B>()?;
        points.push(Sample::new(x, y));
    }
    trace!("read {} binary records", count);
    Ok(points)
}
