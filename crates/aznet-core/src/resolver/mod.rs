//! Reference resolver - canonical identity graph over string-ID references.
//!
//! Every resource identifier maps to exactly one canonical node, no matter
//! how many resources reference it. References to identifiers absent from
//! the snapshot produce unresolved placeholder nodes instead of being
//! dropped, so downstream consumers can render them as external.

pub mod graph;
pub mod ip_index;
pub mod types;

mod builder;

pub use graph::{CanonicalGraph, Edge};
pub use ip_index::FirewallIpIndex;
pub use types::{CanonicalNode, NodeKind, Relation};
