//! aegis-core: In-memory risk graph engine.
//!
//! A pure Rust library that keeps a directed, risk-weighted location graph
//! and answers two queries: the safest (minimum cumulative risk) route
//! between two locations, and the critical locations whose removal would
//! disconnect the network.
//!
//! The engine runs on its own primitives: an index-linked [`List`], a
//! [`Stack`] on top of it, and a binary [`MinHeap`]. Query scratch state is
//! allocated per call, so a built graph is read-only during queries.

mod critical;
mod error;
mod graph;
mod heap;
mod list;
mod route;
mod stack;

pub use error::{CollectionError, GraphError};
pub use graph::{Edge, Graph, Risk, Vertex, VertexIdx};
pub use heap::MinHeap;
pub use list::{IntoIter as ListIntoIter, Iter as ListIter, List};
pub use route::Route;
pub use stack::Stack;
