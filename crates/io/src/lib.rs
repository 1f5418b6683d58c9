//! # boreas-io
//!
//! Reads gridded climate variables from NetCDF files into
//! [`boreas_grid::Grid`]s and writes grids back out, bridging external file
//! formats into the pipeline's in-memory data model.
//!
//! Files are expected to follow the common climate layout: a data variable
//! over `time x lat x lon` (a singleton extra dimension such as a lone
//! pressure level is squeezed), 1-D coordinate variables, and CF-style
//! time units (`"days since ..."` decoded to calendar dates,
//! `"months since ..."` kept as integer offsets). Declared fill values
//! become NaN on read.

mod error;
mod netcdf_read;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::{ReaderConfig, read_grid};
pub use writer::{WriterConfig, write_grid};
