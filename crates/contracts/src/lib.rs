//! Contract bindings, the records they return, and the plumbing to turn
//! compiler output into deployable creation code.
pub mod alloy;
pub mod artifact;
pub mod compiler;
pub mod healthcare;

pub use {
    artifact::{Artifact, ArtifactError},
    healthcare::{Role, UnknownRole, UserRecord},
};
