/*!
 * ID Generation System
 * Type-safe identifiers for tree nodes and open handles
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// ============================================================================
// Type-Safe ID Wrappers
// ============================================================================

/// Stable arena slot of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Diagnostic identity of an open file handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandleId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<u64> for HandleId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// ============================================================================
// ID Generator Trait
// ============================================================================

/// Generic ID generator interface
pub trait IdGenerator<T> {
    /// Generate next ID
    fn next(&self) -> T;
}

// ============================================================================
// Atomic Counter Generator
// ============================================================================

/// Monotonic atomic counter shared by every clone
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - Lock-free, never recycles
#[repr(C, align(64))]
pub struct AtomicGenerator<T> {
    counter: Arc<AtomicU64>,
    _marker: PhantomData<T>,
}

impl<T> AtomicGenerator<T> {
    /// Create new generator starting at given value
    #[inline]
    pub fn new(start: u64) -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(start)),
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for AtomicGenerator<T> {
    fn clone(&self) -> Self {
        Self {
            counter: Arc::clone(&self.counter),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for AtomicGenerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicGenerator")
            .field("next", &self.counter.load(Ordering::Relaxed))
            .finish()
    }
}

impl<T: From<u64>> IdGenerator<T> for AtomicGenerator<T> {
    #[inline]
    fn next(&self) -> T {
        T::from(self.counter.fetch_add(1, Ordering::SeqCst))
    }
}

// ============================================================================
// Convenience Type Aliases
// ============================================================================

/// Node slot generator (no recycling - detached nodes may outlive their slot)
pub type NodeIdGenerator = AtomicGenerator<NodeId>;

/// Handle identifier generator
pub type HandleIdGenerator = AtomicGenerator<HandleId>;
