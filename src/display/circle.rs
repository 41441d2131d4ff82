// Circle - Random circle parameters
//
// Every frame draws one circle with a uniformly random center, radius and
// color. Bounds come from the session configuration so that the whole
// circle stays inside the surface.

use super::surface::Rgba;
use rand::Rng;
use std::ops::RangeInclusive;

/// Ranges random circles are drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleBounds {
    /// Center X range
    pub x: RangeInclusive<i32>,
    /// Center Y range
    pub y: RangeInclusive<i32>,
    /// Radius range
    pub radius: RangeInclusive<u32>,
}

impl CircleBounds {
    /// Check whether a circle was drawn from these ranges
    pub fn contains(&self, circle: &Circle) -> bool {
        self.x.contains(&circle.x)
            && self.y.contains(&circle.y)
            && self.radius.contains(&circle.radius)
    }
}

/// A filled circle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    /// Center X coordinate
    pub x: i32,
    /// Center Y coordinate
    pub y: i32,
    /// Radius in pixels
    pub radius: u32,
    /// Fill color
    pub color: Rgba,
}

impl Circle {
    /// Create a circle
    pub fn new(x: i32, y: i32, radius: u32, color: Rgba) -> Self {
        Self {
            x,
            y,
            radius,
            color,
        }
    }

    /// Draw a random circle
    ///
    /// Center and radius are uniform over `bounds`; each color channel is
    /// uniform over the full byte range.
    ///
    /// # Panics
    /// Panics if any of the ranges in `bounds` is empty
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: &CircleBounds) -> Self {
        let x = rng.gen_range(bounds.x.clone());
        let y = rng.gen_range(bounds.y.clone());
        let radius = rng.gen_range(bounds.radius.clone());
        let color = Rgba::new(rng.gen(), rng.gen(), rng.gen(), rng.gen());

        Self::new(x, y, radius, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds() -> CircleBounds {
        CircleBounds {
            x: 50..=589,
            y: 50..=429,
            radius: 5..=50,
        }
    }

    #[test]
    fn test_random_circles_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let bounds = bounds();

        for _ in 0..10_000 {
            let circle = Circle::random(&mut rng, &bounds);
            assert!(bounds.contains(&circle), "{:?} out of bounds", circle);
        }
    }

    #[test]
    fn test_random_colors_cover_byte_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let bounds = bounds();
        let mut seen_low = [false; 4];
        let mut seen_high = [false; 4];

        for _ in 0..10_000 {
            let c = Circle::random(&mut rng, &bounds).color;
            for (i, channel) in [c.r, c.g, c.b, c.a].into_iter().enumerate() {
                seen_low[i] |= channel < 16;
                seen_high[i] |= channel > 239;
            }
        }

        assert_eq!(seen_low, [true; 4]);
        assert_eq!(seen_high, [true; 4]);
    }

    #[test]
    fn test_degenerate_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = CircleBounds {
            x: 10..=10,
            y: 20..=20,
            radius: 3..=3,
        };

        let circle = Circle::random(&mut rng, &bounds);
        assert_eq!((circle.x, circle.y, circle.radius), (10, 20, 3));
    }

    #[test]
    fn test_contains_rejects_outside() {
        let bounds = bounds();
        let color = Rgba::new(0, 0, 0, 255);
        assert!(!bounds.contains(&Circle::new(49, 100, 10, color)));
        assert!(!bounds.contains(&Circle::new(100, 430, 10, color)));
        assert!(!bounds.contains(&Circle::new(100, 100, 51, color)));
        assert!(bounds.contains(&Circle::new(589, 429, 50, color)));
    }
}
