/*!
 * Core Module
 * Identifiers and store-wide constants
 */

pub mod id;
pub mod limits;

// Re-export for convenience
pub use id::{AtomicGenerator, HandleId, HandleIdGenerator, IdGenerator, NodeId, NodeIdGenerator};
