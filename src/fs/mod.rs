//! Storage contracts, clipboard/selection state, and the file-operation
//! orchestrator.

pub mod clipboard;
pub mod memory;
pub mod operations;
pub mod selection;
pub mod storage;
