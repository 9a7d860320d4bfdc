//! habit.frame.v1 input schema
//!
//! This module defines the line-oriented record format hosts use to feed model
//! output, clock ticks and user actions into a detection session.

mod adapter;
mod frame_record;

pub use adapter::*;
pub use frame_record::*;
