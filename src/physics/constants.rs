//! Physical constants.
//!
//! Rounded teaching values, matching the numbers quoted in introductory
//! astronomy material rather than CODATA precision.

/// Gravitational constant (m³ kg⁻¹ s⁻²)
pub const G: f64 = 6.67e-11;

/// Solar mass (kg)
pub const M_SUN: f64 = 1.99e30;

/// Astronomical unit, mean Earth-Sun distance (m)
pub const AU: f64 = 1.5e11;

/// Light-year (m)
pub const LY: f64 = 9.46e15;

/// Speed of light (m/s)
pub const C: f64 = 2.998e8;
