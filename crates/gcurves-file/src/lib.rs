//! Curve-set codec for the GCURVES line-oriented text format.
//!
//! ```text
//! GCURVES
//! curve {
//!     type <polyline|hermite|bspline>
//!     cpcount <N>
//!     cp <x> <y> <z> <w>
//! }
//! ```
//!
//! Files conventionally use the `.curves` extension. The codec is the only
//! part of the workspace that performs I/O; curves themselves are pure
//! in-memory data.

pub mod lexer;
pub mod parser;
pub mod writer;

pub use parser::parse_curves;
pub use writer::write_curves;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use gcurves_core::Result;
use gcurves_geometry::Curve;

/// Read a curve set from an open stream.
pub fn read_curves<R: Read>(mut input: R) -> Result<Vec<Curve>> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    parse_curves(&text)
}

/// Load a curve set from a file. An unopenable file or a damaged stream is
/// an overall failure; no partial set is ever returned.
pub fn load_curves<P: AsRef<Path>>(path: P) -> Result<Vec<Curve>> {
    let file = File::open(path)?;
    read_curves(BufReader::new(file))
}

/// Save a curve set to a file, overwriting it.
pub fn save_curves<P: AsRef<Path>>(path: P, curves: &[Curve]) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_curves(&mut out, curves)?;
    out.flush()?;
    Ok(())
}
