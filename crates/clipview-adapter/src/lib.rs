//! Clipview Adapter - reactive producer properties for UI bindings
//!
//! Wraps a shared handle to an engine producer and republishes its
//! metadata as cheap, always-valid reads plus change notifications:
//! - `ProducerView`: derived accessors guarded against invalid producers
//! - `Signal`: ordered listener lists, one per event kind
//! - `ProducerAdapter`: producer rebinding, local position, seek requests

pub mod adapter;
pub mod signal;
pub mod view;

pub use adapter::ProducerAdapter;
pub use signal::{AdapterEvent, ConnectionId, Signal};
pub use view::ProducerView;
