//! Sample generators built on [`weft_codegen`].
//!
//! Each sample mirrors what a real incremental generator does for one
//! declaration site: gate the site, open the target declaration and append
//! members. The `weft` binary renders them from JSON site descriptions.

pub mod samples;

pub use samples::Sample;
