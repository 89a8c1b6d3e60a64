//! Shared data model and wire format for `TaskOrganizer`.

pub mod codec;
pub mod intent;
pub mod task;
pub mod wire;
