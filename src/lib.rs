// bevy-rts-select - RTS unit selection and control groups for Bevy
//
// The selection core is plain Rust over a generational unit registry; the
// selection module wraps it with the Bevy systems that drive it from mouse
// and keyboard and surface feedback as events, audio cues and ring visuals.

pub mod constants;
pub mod math_utils;
pub mod registry;
pub mod selection;

// Re-export the types most apps touch
pub use registry::{UnitId, UnitRecord, UnitRegistry};
pub use selection::{
    CameraLens, GroupSlot, PickCamera, SelectionConfig, SelectionContext, SelectionCore,
    SelectionPlugin,
};
