use bevy::prelude::Color;

// ===== SELECTION SYSTEM =====

/// Hard cap on simultaneously selected units
pub const MAX_SELECTED: usize = 12;
/// Number of control-group slots (digit keys 1-9)
pub const CONTROL_GROUP_COUNT: usize = 9;
/// Pixels of pointer travel before a press becomes a box drag
pub const DRAG_THRESHOLD_PX: f32 = 5.0;

// Selection ring visuals
pub const SELECTION_RING_COLOR: Color = Color::srgba(0.2, 0.9, 1.0, 0.7);   // Cyan
pub const PRIMARY_RING_COLOR: Color = Color::srgba(0.6, 1.0, 1.0, 0.9);     // Brighter cyan for the primary unit
pub const SELECTION_RING_THICKNESS: f32 = 0.25;     // Radial width of the ring band, world units
pub const SELECTION_RING_HEIGHT: f32 = 0.05;        // Lift above ground to avoid z-fighting

// Drag rectangle visuals
pub const DRAG_RECT_FILL_COLOR: Color = Color::srgba(0.2, 0.9, 1.0, 0.08);
pub const DRAG_RECT_BORDER_COLOR: Color = Color::srgba(0.2, 0.9, 1.0, 0.8);
pub const DRAG_RECT_BORDER_PX: f32 = 1.0;

// Audio
pub const VOLUME_SELECT_CUE: f32 = 0.4;

// ===== RTS CAMERA =====

pub const CAMERA_SPEED: f32 = 50.0;
pub const CAMERA_ZOOM_SPEED: f32 = 10.0;
pub const CAMERA_MIN_DISTANCE: f32 = 15.0;
pub const CAMERA_MAX_DISTANCE: f32 = 250.0;
pub const CAMERA_ROTATION_SPEED: f32 = 0.005;
pub const CAMERA_INITIAL_DISTANCE: f32 = 80.0;

// ===== DEMO SCENE =====

pub const BATTLEFIELD_SIZE: f32 = 400.0;
pub const GROUND_CHECKER_CELLS: u32 = 16;           // Checkerboard subdivisions per side
pub const UNITS_PER_TEAM: usize = 24;
pub const UNIT_GRID_WIDTH: usize = 6;               // Units per spawn row
pub const UNIT_SPACING: f32 = 6.0;
pub const SPAWN_JITTER: f32 = 1.2;                  // Random XZ offset so rows look organic
pub const UNIT_COLLIDER_RADIUS: f32 = 1.6;          // Pick sphere radius
pub const UNIT_FOOTPRINT_RADIUS: f32 = 1.3;         // Selection ring radius
pub const MARCH_SPEED: f32 = 9.0;
pub const ARRIVAL_THRESHOLD: f32 = 1.0;             // Distance at which a move order counts as done
pub const ORDER_SPREAD: f32 = 3.0;                  // Per-unit offset around a shared move target
