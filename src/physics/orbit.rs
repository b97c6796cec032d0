//! Keplerian rotation curves around a Schwarzschild black hole.
//!
//! Two closed-form quantities — circular-orbit velocity and Schwarzschild
//! radius — plus [`compute_rotation_curve`], which samples a radius range
//! and packages everything the plot needs for one parameter setting.

use thiserror::Error;

use crate::physics::constants::{C, G, M_SUN};

/// Out-of-domain numeric input. Every error is local to a single call and
/// fully recoverable by the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DomainError {
    #[error("orbital radius must be positive, got {0} m")]
    NonPositiveRadius(f64),

    #[error("mass must be positive, got {0} kg")]
    NonPositiveMass(f64),

    #[error("query radius must be non-negative, got {0}")]
    NegativeQueryRadius(f64),

    #[error("distance scale must be positive, got {0} m")]
    NonPositiveScale(f64),

    #[error("need at least 2 samples to form a curve, got {0}")]
    TooFewSamples(usize),

    #[error("Schwarzschild radius {rs} lies beyond the plot range {max_radius}")]
    HorizonBeyondRange { rs: f64, max_radius: f64 },
}

/// One point on the rotation curve: radius in display units, velocity in km/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub radius: f64,
    pub velocity: f64,
}

/// Everything the renderer needs for one parameter setting.
///
/// Radii are in display units (meters divided by the `distance_scale` the
/// curve was computed with), velocities in km/s. `samples` ascends in
/// radius, starting exactly at the Schwarzschild radius.
#[derive(Debug, Clone)]
pub struct RotationCurve {
    pub samples: Vec<CurveSample>,
    /// Schwarzschild radius in display units.
    pub schwarzschild_radius: f64,
    /// The raw queried radius, never clamped, even inside the horizon.
    pub marker_radius: f64,
    /// Orbital velocity at the query radius (km/s); pinned to the horizon
    /// velocity when the query lies inside the horizon.
    pub marker_velocity: f64,
    /// Whether the query radius is at or inside the event horizon.
    pub fell_in: bool,
}

/// Circular-orbit (Keplerian) velocity `v = sqrt(G M / a)` in m/s.
///
/// `a` is the orbital radius in meters, `m` the central mass in kg.
pub fn kepler_velocity(a: f64, m: f64) -> Result<f64, DomainError> {
    // Negated comparisons so NaN lands in the error branch too.
    if !(a > 0.0) {
        return Err(DomainError::NonPositiveRadius(a));
    }
    if !(m > 0.0) {
        return Err(DomainError::NonPositiveMass(m));
    }
    Ok((G * m / a).sqrt())
}

/// Schwarzschild radius `rs = 2 G M / c²` in meters for a mass in kg.
pub fn schwarzschild_radius(mbh: f64) -> Result<f64, DomainError> {
    if !(mbh > 0.0) {
        return Err(DomainError::NonPositiveMass(mbh));
    }
    Ok(2.0 * G * mbh / (C * C))
}

/// Compute the full rotation curve for one slider setting.
///
/// `current_radius` and `max_radius` are in display units; `distance_scale`
/// is meters per display unit (pass [`crate::physics::constants::AU`] to
/// work in astronomical units). `log_mass_solar` is log10 of the black hole
/// mass in solar masses.
///
/// Sampling starts exactly at the Schwarzschild radius and never below it,
/// so the velocity formula stays in domain; the curve is simply not drawn
/// inside the horizon. The marker keeps the raw query radius but its
/// velocity is pinned to the horizon value when the query lies inside.
/// `current_radius > max_radius` is valid — the marker then sits outside
/// the sampled domain and the renderer decides how to show it.
pub fn compute_rotation_curve(
    current_radius: f64,
    log_mass_solar: f64,
    max_radius: f64,
    sample_count: usize,
    distance_scale: f64,
) -> Result<RotationCurve, DomainError> {
    if sample_count < 2 {
        return Err(DomainError::TooFewSamples(sample_count));
    }
    if !(distance_scale > 0.0) {
        return Err(DomainError::NonPositiveScale(distance_scale));
    }
    if !(current_radius >= 0.0) {
        return Err(DomainError::NegativeQueryRadius(current_radius));
    }

    // A NaN log mass becomes a NaN mass and is rejected here.
    let mass = 10f64.powf(log_mass_solar) * M_SUN;
    let rs = schwarzschild_radius(mass)? / distance_scale;
    if !(max_radius >= rs) {
        return Err(DomainError::HorizonBeyondRange { rs, max_radius });
    }

    let step = (max_radius - rs) / (sample_count - 1) as f64;
    let mut samples = Vec::with_capacity(sample_count);
    for i in 0..sample_count {
        // Land exactly on max_radius despite rounding in the step.
        let x = if i == sample_count - 1 {
            max_radius
        } else {
            rs + step * i as f64
        };
        let velocity = kepler_velocity(x * distance_scale, mass)? / 1000.0;
        samples.push(CurveSample {
            radius: x,
            velocity,
        });
    }

    // Inside the horizon there is no meaningful orbit; pin the marker
    // velocity to the horizon value. The marker radius stays raw.
    let effective_radius = current_radius.max(rs);
    let marker_velocity = kepler_velocity(effective_radius * distance_scale, mass)? / 1000.0;

    Ok(RotationCurve {
        samples,
        schwarzschild_radius: rs,
        marker_radius: current_radius,
        marker_velocity,
        // Equality counts as fallen in.
        fell_in: current_radius <= rs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::constants::AU;
    use approx::assert_relative_eq;

    #[test]
    fn kepler_earth_sun() {
        // One solar mass at 1 AU: Earth's orbital speed, within the rounded
        // constants' accuracy.
        let v = kepler_velocity(1.5e11, 1.99e30).unwrap();
        assert_relative_eq!(v, 29747.0, epsilon = 1.0);
    }

    #[test]
    fn kepler_monotonic_in_radius_and_mass() {
        let m = 1.99e30;
        let mut prev = f64::INFINITY;
        for a in [1.0e9, 1.0e10, 1.0e11, 1.0e12] {
            let v = kepler_velocity(a, m).unwrap();
            assert!(v > 0.0);
            assert!(v < prev, "velocity must fall with radius");
            prev = v;
        }

        let a = 1.5e11;
        let mut prev = 0.0;
        for m in [1.0e29, 1.0e30, 1.0e31, 1.0e32] {
            let v = kepler_velocity(a, m).unwrap();
            assert!(v > prev, "velocity must grow with mass");
            prev = v;
        }
    }

    #[test]
    fn kepler_rejects_out_of_domain() {
        assert_eq!(
            kepler_velocity(-1.0, 10.0),
            Err(DomainError::NonPositiveRadius(-1.0))
        );
        assert_eq!(
            kepler_velocity(0.0, 10.0),
            Err(DomainError::NonPositiveRadius(0.0))
        );
        assert_eq!(
            kepler_velocity(1.0, 0.0),
            Err(DomainError::NonPositiveMass(0.0))
        );
    }

    #[test]
    fn schwarzschild_closed_form() {
        let m = 1.99e30;
        let rs = schwarzschild_radius(m).unwrap();
        assert_relative_eq!(rs, 2.0 * G * m / (C * C));
        // About 3 km for one solar mass.
        assert_relative_eq!(rs, 2953.6, epsilon = 0.1);
    }

    #[test]
    fn schwarzschild_linear_in_mass() {
        let m = 3.7e32;
        let rs = schwarzschild_radius(m).unwrap();
        let rs2 = schwarzschild_radius(2.0 * m).unwrap();
        assert_relative_eq!(rs2, 2.0 * rs, max_relative = 1e-15);
    }

    #[test]
    fn schwarzschild_rejects_non_positive_mass() {
        assert_eq!(
            schwarzschild_radius(-5.0),
            Err(DomainError::NonPositiveMass(-5.0))
        );
        assert_eq!(
            schwarzschild_radius(0.0),
            Err(DomainError::NonPositiveMass(0.0))
        );
    }

    #[test]
    fn curve_at_origin_has_fallen_in() {
        let curve = compute_rotation_curve(0.0, 7.0, 100.0, 1000, AU).unwrap();
        assert!(curve.fell_in);
        assert_eq!(curve.marker_radius, 0.0);
        assert_eq!(curve.samples.len(), 1000);

        // Sampling starts exactly at the horizon and ascends strictly.
        assert_eq!(curve.samples[0].radius, curve.schwarzschild_radius);
        assert_eq!(curve.samples.last().unwrap().radius, 100.0);
        for pair in curve.samples.windows(2) {
            assert!(pair[1].radius > pair[0].radius);
            assert!(pair[1].velocity < pair[0].velocity);
        }

        // Marker velocity is pinned to the horizon velocity.
        assert_relative_eq!(
            curve.marker_velocity,
            curve.samples[0].velocity,
            max_relative = 1e-12
        );
    }

    #[test]
    fn curve_at_outer_edge_orbits() {
        let curve = compute_rotation_curve(100.0, 7.0, 100.0, 1000, AU).unwrap();
        assert!(!curve.fell_in);
        assert_eq!(curve.marker_radius, 100.0);

        let mass = 10f64.powf(7.0) * M_SUN;
        let expected = kepler_velocity(100.0 * AU, mass).unwrap() / 1000.0;
        assert_relative_eq!(curve.marker_velocity, expected, max_relative = 1e-12);
    }

    #[test]
    fn horizon_boundary_is_inclusive() {
        let rs = compute_rotation_curve(0.0, 7.0, 100.0, 1000, AU)
            .unwrap()
            .schwarzschild_radius;

        let at = compute_rotation_curve(rs, 7.0, 100.0, 1000, AU).unwrap();
        assert!(at.fell_in, "sitting exactly on the horizon counts as fallen in");
        assert_eq!(at.marker_radius, rs);

        let outside = compute_rotation_curve(rs * 1.001, 7.0, 100.0, 1000, AU).unwrap();
        assert!(!outside.fell_in);
    }

    #[test]
    fn marker_inside_horizon_is_pinned() {
        let rs = compute_rotation_curve(0.0, 8.0, 100.0, 1000, AU)
            .unwrap()
            .schwarzschild_radius;

        let curve = compute_rotation_curve(rs / 2.0, 8.0, 100.0, 1000, AU).unwrap();
        assert!(curve.fell_in);
        // Raw radius reported, horizon velocity used.
        assert_eq!(curve.marker_radius, rs / 2.0);
        assert_relative_eq!(
            curve.marker_velocity,
            curve.samples[0].velocity,
            max_relative = 1e-12
        );
    }

    #[test]
    fn marker_beyond_plot_range_is_valid() {
        let curve = compute_rotation_curve(250.0, 7.0, 100.0, 1000, AU).unwrap();
        assert!(!curve.fell_in);
        assert_eq!(curve.marker_radius, 250.0);
        assert_eq!(curve.samples.last().unwrap().radius, 100.0);
    }

    #[test]
    fn curve_rejects_bad_parameters() {
        assert!(matches!(
            compute_rotation_curve(0.0, 7.0, 100.0, 1, AU),
            Err(DomainError::TooFewSamples(1))
        ));
        assert!(matches!(
            compute_rotation_curve(-1.0, 7.0, 100.0, 1000, AU),
            Err(DomainError::NegativeQueryRadius(_))
        ));
        assert!(matches!(
            compute_rotation_curve(0.0, 7.0, 100.0, 1000, 0.0),
            Err(DomainError::NonPositiveScale(_))
        ));
        // A 10^9 solar mass horizon does not fit in a 0.1 AU window.
        assert!(matches!(
            compute_rotation_curve(0.0, 9.0, 0.1, 1000, AU),
            Err(DomainError::HorizonBeyondRange { .. })
        ));
    }

    #[test]
    fn nan_inputs_are_rejected() {
        // NaN fails every ordered comparison, so the guards must be written
        // to put it in the error branch rather than the formula.
        assert!(matches!(
            kepler_velocity(f64::NAN, 1.0),
            Err(DomainError::NonPositiveRadius(_))
        ));
        assert!(matches!(
            kepler_velocity(1.0, f64::NAN),
            Err(DomainError::NonPositiveMass(_))
        ));
        assert!(matches!(
            schwarzschild_radius(f64::NAN),
            Err(DomainError::NonPositiveMass(_))
        ));

        assert!(matches!(
            compute_rotation_curve(f64::NAN, 7.0, 100.0, 1000, AU),
            Err(DomainError::NegativeQueryRadius(_))
        ));
        assert!(matches!(
            compute_rotation_curve(0.0, f64::NAN, 100.0, 1000, AU),
            Err(DomainError::NonPositiveMass(_))
        ));
        assert!(matches!(
            compute_rotation_curve(0.0, 7.0, f64::NAN, 1000, AU),
            Err(DomainError::HorizonBeyondRange { .. })
        ));
        assert!(matches!(
            compute_rotation_curve(0.0, 7.0, 100.0, 1000, f64::NAN),
            Err(DomainError::NonPositiveScale(_))
        ));
    }

    #[test]
    fn horizon_at_plot_edge_gives_constant_series() {
        let rs = compute_rotation_curve(0.0, 7.0, 100.0, 1000, AU)
            .unwrap()
            .schwarzschild_radius;

        // max_radius == rs is the narrowest window still allowed: every
        // sample collapses onto the horizon.
        let curve = compute_rotation_curve(rs, 7.0, rs, 1000, AU).unwrap();
        assert!(curve.fell_in);
        assert_eq!(curve.samples.len(), 1000);
        for sample in &curve.samples {
            assert_eq!(sample.radius, rs);
            assert_eq!(sample.velocity, curve.samples[0].velocity);
        }
        assert_relative_eq!(
            curve.marker_velocity,
            curve.samples[0].velocity,
            max_relative = 1e-12
        );
    }
}
