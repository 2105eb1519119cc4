use super::IntensityGrid;

/// Square neighborhood of intensities around a center dot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patch {
    values: Vec<u8>,
    center: (usize, usize),
}

impl Patch {
    /// Cuts the `size`x`size` window centered at `center` out of `grid`.
    ///
    /// Returns `None` if `size` is even or the window would leave the grid, i.e. unless
    /// `radius <= x < width - radius` and `radius <= y < height - radius`.
    /// Values are ordered by window column, then by window row, the same order the grid
    /// stores its dots in.
    pub fn extract(grid: &IntensityGrid, center: (usize, usize), size: usize) -> Option<Self> {
        if size % 2 == 0 {
            return None;
        }
        let (x, y) = center;
        let radius = size / 2;
        if x < radius || y < radius || x + radius >= grid.width() || y + radius >= grid.height()
        {
            return None;
        }
        let mut values = Vec::with_capacity(size * size);
        for column in x - radius..=x + radius {
            values.extend_from_slice(&grid.column(column)[y - radius..=y + radius]);
        }
        Some(Self { values, center })
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn center(&self) -> (usize, usize) {
        self.center
    }

    /// sum of squared differences, lower is more similar
    pub fn similarity(&self, other: &Patch) -> u64 {
        debug_assert_eq!(
            self.values.len(),
            other.values.len(),
            "Only patches of equal size can be compared"
        );
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(&first, &second)| {
                let difference = first.abs_diff(second) as u64;
                difference * difference
            })
            .sum()
    }
}

/// every center a patch fits around, column by column
pub fn patch_centers(
    width: usize,
    height: usize,
    size: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let radius = size / 2;
    let columns = radius..width.saturating_sub(radius);
    columns.flat_map(move |x| (radius..height.saturating_sub(radius)).map(move |y| (x, y)))
}

/// all patches of the grid in the order of [`patch_centers`]
pub fn extract_all_patches(grid: &IntensityGrid, size: usize) -> Vec<Patch> {
    patch_centers(grid.width(), grid.height(), size)
        .filter_map(|center| Patch::extract(grid, center, size))
        .collect()
}

#[cfg(test)]
mod test {
    use super::{extract_all_patches, patch_centers, Patch};
    use crate::grid::{Grid, IntensityGrid};

    fn create_test_grid() -> IntensityGrid {
        // value encodes the coordinate as x * 10 + y
        Grid::from_fn(5, 4, |x, y| (x * 10 + y) as u8)
    }

    #[test]
    fn extract_patch_in_window_order() {
        let grid = create_test_grid();
        let patch = Patch::extract(&grid, (2, 1), 3).expect("patch should fit");
        #[rustfmt::skip]
        let expected = [
            10, 11, 12,
            20, 21, 22,
            30, 31, 32,
        ];
        assert_eq!(patch.values(), &expected);
        assert_eq!(patch.center(), (2, 1));
    }

    #[test]
    fn extract_patch_has_size_squared_values() {
        let grid = Grid::filled(9, 9, 0_u8);
        for size in [1, 3, 5, 7, 9] {
            let patch = Patch::extract(&grid, (4, 4), size).expect("patch should fit");
            assert_eq!(patch.values().len(), size * size);
        }
    }

    #[test]
    fn extract_patch_at_border_is_absent() {
        let grid = create_test_grid();
        assert!(Patch::extract(&grid, (0, 1), 3).is_none());
        assert!(Patch::extract(&grid, (1, 0), 3).is_none());
        assert!(Patch::extract(&grid, (4, 1), 3).is_none());
        assert!(Patch::extract(&grid, (1, 3), 3).is_none());
        assert!(Patch::extract(&grid, (3, 2), 3).is_some());
        assert!(Patch::extract(&grid, (1, 1), 3).is_some());
    }

    #[test]
    fn extract_patch_larger_than_grid_is_absent() {
        let grid = create_test_grid();
        assert!(Patch::extract(&grid, (2, 2), 5).is_none());
    }

    #[test]
    fn extract_patch_with_even_size_is_absent() {
        let grid = create_test_grid();
        assert!(Patch::extract(&grid, (2, 2), 2).is_none());
        assert!(Patch::extract(&grid, (2, 2), 0).is_none());
    }

    #[test]
    fn patch_of_size_one_is_the_dot() {
        let grid = create_test_grid();
        let patch = Patch::extract(&grid, (0, 0), 1).expect("single dot patch should fit");
        assert_eq!(patch.values(), &[0]);
    }

    #[test]
    fn similarity_is_sum_of_squared_differences() {
        let first = Patch::extract(&Grid::filled(3, 3, 10), (1, 1), 3).unwrap();
        let second = Patch::extract(&Grid::filled(3, 3, 13), (1, 1), 3).unwrap();
        assert_eq!(first.similarity(&second), 9 * 9);
        assert_eq!(second.similarity(&first), 9 * 9);
        assert_eq!(first.similarity(&first), 0);
    }

    #[test]
    fn all_patches_skip_border() {
        let grid = create_test_grid();
        let patches = extract_all_patches(&grid, 3);
        let centers: Vec<(usize, usize)> = patches.iter().map(Patch::center).collect();
        assert_eq!(
            centers,
            vec![(1, 1), (1, 2), (2, 1), (2, 2), (3, 1), (3, 2)]
        );
    }

    #[test]
    fn no_centers_in_too_small_grid() {
        assert_eq!(patch_centers(2, 10, 3).count(), 0);
        assert_eq!(patch_centers(0, 0, 1).count(), 0);
    }
}
