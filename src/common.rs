//! Global tuning constants, in pixel-seconds units.

/// Number of pixels that represent one meter of simulated space.
pub const PIXELS_PER_METER: f32 = 50.0;

/// Default downward gravity, in pixels per second squared. Positive y points
/// down the screen.
pub const DEFAULT_GRAVITY: f32 = 9.8 * PIXELS_PER_METER;

/// Minimum number of sub-steps a world step is divided into.
pub const MIN_SUBSTEPS: u32 = 1;

/// Maximum number of sub-steps per world step. More sub-steps buy stability,
/// not accuracy; past this point the cost is pure waste.
pub const MAX_SUBSTEPS: u32 = 128;

/// Smallest allowed body area, in square pixels. Anything below this is
/// invisible at the unit scale and numerically fragile.
pub const MIN_BODY_AREA: f32 = 1.0;

/// Largest allowed body area, in square pixels.
pub const MAX_BODY_AREA: f32 = 4096.0 * 4096.0;

/// Smallest allowed density. Half the density of water on the g/cm^3 scale.
pub const MIN_DENSITY: f32 = 0.5;

/// Largest allowed density. Roughly platinum on the g/cm^3 scale.
pub const MAX_DENSITY: f32 = 21.4;
