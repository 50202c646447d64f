//! Catch detection
//!
//! A crystal is caught while it falls through a fixed band just above the
//! ship, if it is also horizontally close enough. Both bounds are strict,
//! matching the reference behavior.

use super::state::FieldConfig;

/// True if a crystal at vertical position `y` is inside the catch band
pub fn in_catch_band(y: f32, config: &FieldConfig) -> bool {
    y > config.band_top() && y < config.band_bottom()
}

/// Full catch predicate: band check plus horizontal proximity
///
/// Horizontal proximity compares left edges, as the reference does: the
/// crystal is close enough when the edges are less than one ship width apart.
pub fn ship_catches(crystal_x: f32, crystal_y: f32, ship_x: f32, config: &FieldConfig) -> bool {
    in_catch_band(crystal_y, config) && (crystal_x - ship_x).abs() < config.ship_size
}
