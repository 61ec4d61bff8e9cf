// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Primitive types for representing exported media files and their metadata.

mod category;
mod conv;
mod file;

pub use category::*;
pub use conv::*;
pub use file::*;
