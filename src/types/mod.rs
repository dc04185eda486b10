//! Assorted types supporting the library.

pub mod err;
