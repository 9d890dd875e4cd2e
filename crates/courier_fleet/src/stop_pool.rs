use courier_matrix_providers::coordinate::Coordinate;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Depot used by the reference fleet, in central Aarhus.
pub const REFERENCE_DEPOT: Coordinate = Coordinate::new(56.161147, 10.13455);

/// Latitude and longitude ranges stops are drawn from.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StopBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Default for StopBounds {
    fn default() -> Self {
        StopBounds {
            min_lat: 56.1,
            max_lat: 56.2,
            min_lon: 10.1,
            max_lon: 10.2,
        }
    }
}

impl StopBounds {
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coordinate.lat)
            && (self.min_lon..=self.max_lon).contains(&coordinate.lon)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StopPool {
    stops: Vec<Coordinate>,
}

impl StopPool {
    /// Draws `count` stops uniformly inside `bounds`. The same seed always
    /// yields the same stops.
    pub fn random(count: usize, bounds: StopBounds, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let stops = (0..count)
            .map(|_| {
                Coordinate::new(
                    sample(&mut rng, bounds.min_lat, bounds.max_lat),
                    sample(&mut rng, bounds.min_lon, bounds.max_lon),
                )
            })
            .collect();

        StopPool { stops }
    }

    pub fn stops(&self) -> &[Coordinate] {
        &self.stops
    }

    pub fn into_stops(self) -> Vec<Coordinate> {
        self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

fn sample(rng: &mut SmallRng, min: f64, max: f64) -> f64 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_pool_is_seeded() {
        let bounds = StopBounds::default();

        let first = StopPool::random(50, bounds, 7);
        let second = StopPool::random(50, bounds, 7);
        let other = StopPool::random(50, bounds, 8);

        assert_eq!(first.len(), 50);
        assert_eq!(first, second);
        assert_ne!(first, other);
        assert!(first.stops().iter().all(|stop| bounds.contains(stop)));
    }

    #[test]
    fn test_degenerate_bounds() {
        let bounds = StopBounds {
            min_lat: 56.15,
            max_lat: 56.15,
            min_lon: 10.1,
            max_lon: 10.2,
        };

        let pool = StopPool::random(3, bounds, 1);
        assert!(pool.stops().iter().all(|stop| stop.lat == 56.15));
    }
}
