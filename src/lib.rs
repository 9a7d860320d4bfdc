//! habitwatch - On-device habit detection engine
//!
//! habitwatch decides, frame by frame, whether a hand is touching the face area
//! tied to a body-focused repetitive habit (hair pulling, nail biting, skin
//! picking, ...) and turns that noisy signal into rate-limited alerts:
//! landmarks/mask → mode registry → matcher → debounce/rate-limit state machine
//! (pause gated) → alert sink + session counters.
//!
//! Landmark and segmentation models are supplied by the host; the engine only
//! consumes their normalized output.
//!
//! ## Modules
//!
//! - **Matchers**: fingertip-to-landmark proximity and hair-mask neighborhood search
//! - **Session**: stateful detection loop, pause control and published snapshots
//! - **Schema**: the habit.frame.v1 record stream read by the CLI and FFI

pub mod alert;
pub mod config;
pub mod error;
pub mod geometry;
pub mod matcher;
pub mod modes;
pub mod pause;
pub mod report;
pub mod schema;
pub mod session;
pub mod stats;
pub mod ticker;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use alert::{AlertEvent, ContactPhase, DetectionState};
pub use config::{ConfigUpdate, DetectionConfig};
pub use error::EngineError;
pub use modes::{Contact, ModeRegistry};
pub use pause::PauseController;
pub use report::{ReportEncoder, SessionReport};
pub use session::{AlertSink, DetectionSession, FrameOutcome, SessionSnapshot, SnapshotHandle};
pub use stats::SessionStats;
pub use ticker::{Clock, ManualClock, MonotonicClock, PauseTicker, StreamClock};
pub use types::{FramePacket, HabitMode, Landmark, SegmentationMask};

// Schema exports
pub use schema::{FrameRecord, FrameRecordAdapter, SCHEMA_VERSION};

/// Engine version embedded in all reports
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "habitwatch";
