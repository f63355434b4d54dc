#![warn(missing_docs)]
//! Test fixtures: throwaway port asset directories.

mod fixture;

pub use fixture::*;
