//! Batch driver: compute the determinant of every matrix record found in an input
//! directory and write the results into same named files in an output directory.

use std::path::{Path, PathBuf};

use detkit_determinant::*;
use detkit_matrix_record::*;
use serde::{Deserialize, Serialize};

mod batch;
mod config;
mod pool;

pub use batch::*;
pub use config::*;
pub use pool::*;
