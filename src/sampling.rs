use std::f64::consts::TAU;

use rand::Rng;

use crate::Point;

/// Draws `count` points uniformly from the disk of `radius` around `center`.
///
/// The angle is uniform and the distance from the center is `radius * sqrt(u)`
/// for uniform `u`, which keeps the density even across the disk instead of
/// bunching points near the middle.
pub fn points_in_radius<R>(rng: &mut R, count: usize, center: Point, radius: f64) -> Vec<Point>
where
    R: Rng,
{
    (0..count)
        .map(|_| {
            let angle = rng.random_range(0.0..TAU);
            let r = radius * rng.random::<f64>().sqrt();
            Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
        })
        .collect()
}

/// [`points_in_radius`] with the thread-local generator.
pub fn generate_points_in_radius(count: usize, center: Point, radius: f64) -> Vec<Point> {
    points_in_radius(&mut rand::rng(), count, center, radius)
}
