//! Library side of the `labfill` binary: logging, terminal operator and
//! rendering, kept here so integration tests can reach them.

pub mod logging;
pub mod summary;
pub mod terminal;
