use rand::Rng;

/// Sampling bounds for latitude and longitude, degrees.
pub const LAT_BOUNDS: (f64, f64) = (-90.0, 90.0);
pub const LNG_BOUNDS: (f64, f64) = (-180.0, 180.0);

/// A random (latitude, longitude) pair used to seed city lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Draw `count` coordinates independently and uniformly from the bounds.
///
/// The rng is injected so runs can be reproduced with a seeded
/// `StdRng`; production callers pass `rand::rng()`.
pub fn sample_coordinates<R: Rng>(rng: &mut R, count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|_| Coordinate {
            latitude: rng.random_range(LAT_BOUNDS.0..=LAT_BOUNDS.1),
            longitude: rng.random_range(LNG_BOUNDS.0..=LNG_BOUNDS.1),
        })
        .collect()
}
