use std::fmt::Display;

use rand::Rng;

const RED_WEIGHT: u32 = 2;
const GREEN_WEIGHT: u32 = 4;
const BLUE_WEIGHT: u32 = 3;

/// 8 bit RGB color
///
/// Ordering is lexicographic over (red, green, blue).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.random(), rng.random(), rng.random())
    }

    /// weighted squared euclidean distance, green counts most and red least
    ///
    /// No square root is taken, only the order of distances is ever used.
    pub fn distance(&self, other: &Rgb) -> u32 {
        let delta_red = self.red.abs_diff(other.red) as u32;
        let delta_green = self.green.abs_diff(other.green) as u32;
        let delta_blue = self.blue.abs_diff(other.blue) as u32;
        RED_WEIGHT * delta_red * delta_red
            + GREEN_WEIGHT * delta_green * delta_green
            + BLUE_WEIGHT * delta_blue * delta_blue
    }

    /// grayscale intensity, 0.21 R + 0.72 G + 0.07 B truncated
    ///
    /// Evaluated in `f64` from left to right, so rounding errors truncate too: white maps
    /// to 254.
    pub fn intensity(&self) -> u8 {
        let weighted =
            0.21 * self.red as f64 + 0.72 * self.green as f64 + 0.07 * self.blue as f64;
        weighted as u8
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(value: image::Rgb<u8>) -> Self {
        let [red, green, blue] = value.0;
        Self::new(red, green, blue)
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(value: Rgb) -> Self {
        image::Rgb([value.red, value.green, value.blue])
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from(value: (u8, u8, u8)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::Rgb;

    #[test]
    fn distance_to_itself_is_zero() {
        let color = Rgb::new(12, 200, 77);
        assert_eq!(color.distance(&color), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let first = Rgb::random(&mut rng);
            let second = Rgb::random(&mut rng);
            assert_eq!(first.distance(&second), second.distance(&first));
        }
    }

    #[test]
    fn distance_weights_green_over_blue_over_red() {
        let black = Rgb::new(0, 0, 0);
        let red = black.distance(&Rgb::new(10, 0, 0));
        let green = black.distance(&Rgb::new(0, 10, 0));
        let blue = black.distance(&Rgb::new(0, 0, 10));
        assert_eq!(red, 200);
        assert_eq!(green, 400);
        assert_eq!(blue, 300);
    }

    #[test]
    fn distance_between_extremes_does_not_overflow() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.distance(&white), 9 * 255 * 255);
    }

    #[test]
    fn intensity_of_gray() {
        assert_eq!(Rgb::new(128, 128, 128).intensity(), 128);
        assert_eq!(Rgb::new(100, 100, 100).intensity(), 100);
        assert_eq!(Rgb::new(0, 0, 0).intensity(), 0);
    }

    #[test]
    fn intensity_truncates_float_rounding_errors() {
        // the weighted sums fall just below the exact values
        assert_eq!(Rgb::new(255, 255, 255).intensity(), 254);
        assert_eq!(Rgb::new(5, 5, 5).intensity(), 4);
    }

    #[test]
    fn intensity_is_truncated() {
        // 0.21 * 255 = 53.55
        assert_eq!(Rgb::new(255, 0, 0).intensity(), 53);
        // 0.72 * 100 + 0.07 * 50 = 75.5
        assert_eq!(Rgb::new(0, 100, 50).intensity(), 75);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut colors = vec![
            Rgb::new(3, 0, 0),
            Rgb::new(1, 9, 9),
            Rgb::new(1, 2, 8),
            Rgb::new(1, 2, 3),
        ];
        colors.sort();
        assert_eq!(
            colors,
            vec![
                Rgb::new(1, 2, 3),
                Rgb::new(1, 2, 8),
                Rgb::new(1, 9, 9),
                Rgb::new(3, 0, 0),
            ]
        );
    }

    #[test]
    fn convert_from_image_pixel() {
        let color = Rgb::from(image::Rgb([1, 2, 3]));
        assert_eq!(color, Rgb::new(1, 2, 3));
        let pixel: image::Rgb<u8> = color.into();
        assert_eq!(pixel.0, [1, 2, 3]);
    }
}
