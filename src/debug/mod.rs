//! SVG snapshots of the mesh while it is being built.
//!
//! Enabled by the `debugging` feature and configured through environment variables, see [env].

pub mod env;
pub(crate) mod svg;
