use std::io::{
    Read,
    Write
};

use log::{
    debug,
    trace
};

use crate::error::{
    CodecError,
    TabulatedFunctionError
};
use crate::function::sample::Sample;
use crate::function::tabulatedfunction::TabulatedFunction;

/// Writes the point count on the first line, then one `x y` pair per line.
pub fn write_text<W, F>(writer: &mut W, function: &F, precision: Option<usize>) -> Result<(), CodecError> where
    W: Write,
    F: TabulatedFunction + ?Sized {
    let points = function.points();
    writeln!(writer, "{}", points.len())?;
    for point in &points {
        match precision {
            Some(digits) => writeln!(writer, "{:.*} {:.*}", digits, point.x(), digits, point.y())?,
            None => writeln!(writer, "{} {}", point.x(), point.y())?,
        }
    }
    writer.flush()?;
    trace!("wrote {} text records", points.len());
    Ok(())
}

/// Reads whitespace-separated tokens: a count followed by that many `x y`
/// pairs. Line breaks carry no meaning and trailing tokens are ignored.
pub fn read_text<R>(reader: &mut R) -> Result<Vec<Sample>, CodecError> where
    R: Read {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let mut tokens = content.split_whitespace();

    let count_token = tokens
        .next()
        .ok_or_else(|| CodecError::Parse("missing point count".to_owned()))?;
    let count: i64 = count_token
        .parse()
        .map_err(|_| CodecError::Parse(format!("invalid point count '{}'", count_token)))?;
    let count = usize::try_from(count).map_err(|_| {
        TabulatedFunctionError::InvalidArgument(format!("negative point count {}", count))
    })?;

    let mut points = Vec::new();
    for index in 0..count {
        let x = next_number(&mut tokens, "x", index)?;
        let y = next_number(&mut tokens, "y", index)?;
        points.push(Sample::new(x, y));
    }
    if tokens.next().is_some() {
        debug!("ignoring tokens after {} text records", count);
    }
    Ok(points)
}

fn next_number<'a, I>(tokens: &mut I, coordinate: &str, index: usize) -> Result<f64, CodecError> where
    I: Iterator<Item = &'a str> {
    let token = tokens
        .next()
        .ok_or_else(|| CodecError::Parse(format!("missing {} of point {}", coordinate, index)))?;
    token
        .parse()
        .map_err(|_| CodecError::Parse(format!("invalid {} of point {}: '{}'", coordinate, index, token)))
}
