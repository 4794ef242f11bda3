pub mod edge;
pub mod graph;
pub mod node;
pub mod properties;
pub mod records;

pub use edge::Edge;
pub use graph::{build_graph, Graph};
pub use node::{classify_kind, Node, NodeKind, Staleness};
pub use properties::Properties;
pub use records::{ConnectionRecord, RecordSet, ResourceRecord};
