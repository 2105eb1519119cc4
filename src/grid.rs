use crate::color::Rgb;

pub mod patch;
pub mod reader;
pub mod writer;

/// Rectangular grid of dots, indexed by `(x, y)` with `x` in `0..width` and `y` in
/// `0..height`.
///
/// Dots are stored column by column: all dots of column `x` are contiguous, so the
/// dot at `(x, y)` lives at `x * height + y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    dots: Vec<T>,
}

pub type RgbGrid = Grid<Rgb>;
pub type IntensityGrid = Grid<u8>;

impl<T> Grid<T> {
    /// creates a grid from dots in column-major order
    pub fn new(width: usize, height: usize, dots: Vec<T>) -> Self {
        assert_eq!(
            dots.len(),
            width * height,
            "Number of dots does not match grid size {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            dots,
        }
    }

    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut dots = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                dots.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            dots,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "Coordinate ({}, {}) outside of {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        x * self.height + y
    }

    pub fn column(&self, x: usize) -> &[T] {
        let start = self.index(x, 0);
        &self.dots[start..start + self.height]
    }

    pub fn dots(&self) -> impl Iterator<Item = &T> {
        self.dots.iter()
    }

    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            width: self.width,
            height: self.height,
            dots: self.dots.iter().map(f).collect(),
        }
    }
}

impl<T: Copy> Grid<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self::new(width, height, vec![value; width * height])
    }

    pub fn dot(&self, x: usize, y: usize) -> T {
        self.dots[self.index(x, y)]
    }

    pub fn set_dot(&mut self, x: usize, y: usize, value: T) {
        let index = self.index(x, y);
        self.dots[index] = value;
    }

    /// splits into the columns `0..column` and `column..width`
    pub fn split_at_column(&self, column: usize) -> (Grid<T>, Grid<T>) {
        let column = column.min(self.width);
        let (left, right) = self.dots.split_at(column * self.height);
        (
            Grid::new(column, self.height, left.to_vec()),
            Grid::new(self.width - column, self.height, right.to_vec()),
        )
    }

    /// places `right` next to `left`, both must have the same height
    pub fn join_columns(left: &Grid<T>, right: &Grid<T>) -> Grid<T> {
        assert_eq!(
            left.height, right.height,
            "Only grids of equal height can be joined"
        );
        let mut dots = Vec::with_capacity(left.dots.len() + right.dots.len());
        dots.extend_from_slice(&left.dots);
        dots.extend_from_slice(&right.dots);
        Grid::new(left.width + right.width, left.height, dots)
    }
}

impl Grid<Rgb> {
    pub fn grayscale(&self) -> IntensityGrid {
        self.map(Rgb::intensity)
    }

    /// sum of color distances between equally sized grids, lower is more similar
    pub fn similarity(&self, other: &Grid<Rgb>) -> u64 {
        assert!(
            self.width == other.width && self.height == other.height,
            "Only grids of equal size can be compared"
        );
        self.dots
            .iter()
            .zip(other.dots.iter())
            .map(|(first, second)| first.distance(second) as u64)
            .sum()
    }
}

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<RgbGrid>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}
