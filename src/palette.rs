use std::fmt::Display;

use rand::Rng;

use crate::{
    color::Rgb,
    grid::{Grid, RgbGrid},
};

const SWATCH_BLOCK_WIDTH: usize = 50;
const SWATCH_BLOCK_HEIGHT: usize = 100;

/// Ordered set of representative colors.
///
/// Colors are not required to be unique; the position of a color is its cluster index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// `size` uniformly random colors, sorted
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut colors: Vec<Rgb> = (0..size).map(|_| Rgb::random(rng)).collect();
        colors.sort();
        Self { colors }
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains(&self, color: &Rgb) -> bool {
        self.colors.contains(color)
    }

    /// index of the nearest color, ties go to the lowest index
    ///
    /// Panics on an empty palette.
    pub fn closest_index(&self, color: &Rgb) -> usize {
        assert!(!self.colors.is_empty(), "Palette must not be empty");
        let mut closest = 0;
        let mut closest_distance = color.distance(&self.colors[0]);
        for (index, candidate) in self.colors.iter().enumerate().skip(1) {
            let distance = color.distance(candidate);
            if distance < closest_distance {
                closest = index;
                closest_distance = distance;
            }
        }
        closest
    }

    pub fn closest_color(&self, color: &Rgb) -> Rgb {
        self.colors[self.closest_index(color)]
    }

    /// copy of `grid` with every dot replaced by its closest palette color
    pub fn recolor(&self, grid: &RgbGrid) -> RgbGrid {
        grid.map(|color| self.closest_color(color))
    }

    /// one 50x100 block per color, placed left to right
    pub fn swatch(&self) -> RgbGrid {
        Grid::from_fn(
            self.colors.len() * SWATCH_BLOCK_WIDTH,
            SWATCH_BLOCK_HEIGHT,
            |x, _| self.colors[x / SWATCH_BLOCK_WIDTH],
        )
    }
}

impl Display for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (index, color) in self.colors.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", color)?;
        }
        write!(f, "]")
    }
}
