//! Colorizes the right half of an image from the colors of its left half.
//!
//! The left half is clustered into a palette and recolored with it. Every pixel of the
//! right half that a patch fits around then gets the color voted by the most similar
//! grayscale patches of the left half. Pixels closer to the border of the right half than
//! the patch radius keep their original color.

use std::sync::{mpsc, Arc};

use threadpool::ThreadPool;

use crate::{
    cluster::{ColorClusterer, DEFAULT_MAX_ITERATIONS},
    color::Rgb,
    error::Error,
    grid::{
        patch::{extract_all_patches, patch_centers, Patch},
        Grid, IntensityGrid, RgbGrid,
    },
    logger::log_palette,
    matcher::PatchMatcher,
    palette::Palette,
    Arguments, Result,
};

pub const DEFAULT_PRECISION: usize = 15;
pub const DEFAULT_PATCH_SIZE: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct ColorizationOptions {
    /// number of palette colors
    pub precision: usize,
    /// edge length of the square patches, odd
    pub patch_size: usize,
    /// number of best matching patches voting for a color
    pub match_count: usize,
    pub max_iterations: usize,
    pub seed: Option<u64>,
    pub number_of_threads: usize,
}

impl Default for ColorizationOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            patch_size: DEFAULT_PATCH_SIZE,
            match_count: DEFAULT_PRECISION + 1,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
            number_of_threads: 1,
        }
    }
}

impl From<&Arguments> for ColorizationOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            precision: value.precision,
            patch_size: value.patch_size,
            match_count: value.match_count.unwrap_or(value.precision + 1),
            max_iterations: value.max_iterations,
            seed: value.seed,
            number_of_threads: value.number_of_threads,
        }
    }
}

impl ColorizationOptions {
    pub fn validate(&self) -> Result<()> {
        if self.precision == 0 {
            return Err(Error::InvalidPaletteSize(self.precision));
        }
        if self.patch_size % 2 == 0 {
            return Err(Error::InvalidPatchSize(self.patch_size));
        }
        if self.match_count == 0 {
            return Err(Error::InvalidMatchCount(self.match_count));
        }
        if self.number_of_threads == 0 {
            return Err(Error::InvalidNumberOfThreads(self.number_of_threads));
        }
        Ok(())
    }
}

pub struct Colorization {
    pub palette: Palette,
    /// left half, recolored with the palette, shared with the matching jobs
    pub reference: Arc<RgbGrid>,
    /// right half, colorized
    pub target: RgbGrid,
    /// number of right half pixels that received a predicted color
    pub colorized_pixels: usize,
    /// sum of color distances between the colorized and the original right half
    pub target_distance: u64,
}

impl Colorization {
    /// recolored left half next to the colorized right half
    pub fn full_image(&self) -> RgbGrid {
        Grid::join_columns(self.reference.as_ref(), &self.target)
    }
}

pub struct Colorizer<'a> {
    options: &'a ColorizationOptions,
    threadpool: &'a ThreadPool,
}

impl<'a> Colorizer<'a> {
    pub fn new(options: &'a ColorizationOptions, threadpool: &'a ThreadPool) -> Self {
        Self {
            options,
            threadpool,
        }
    }

    /// `options` must have passed [`ColorizationOptions::validate`]
    pub fn colorize(&self, image: &RgbGrid) -> Result<Colorization> {
        let middle = image.width() / 2;
        let patch_size = self.options.patch_size;
        let target_has_patches =
            patch_centers(image.width() - middle, image.height(), patch_size)
                .next()
                .is_some();
        let reference_has_patches = patch_centers(middle, image.height(), patch_size)
            .next()
            .is_some();
        if target_has_patches && !reference_has_patches {
            return Err(Error::ImageTooSmallForPatchSize {
                width: image.width(),
                height: image.height(),
                patch_size,
            });
        }

        let grayscale = image.grayscale();
        let (reference_rgb, target_rgb) = image.split_at_column(middle);
        let (reference_gray, target_gray) = grayscale.split_at_column(middle);

        let clustering = ColorClusterer::with_seed(
            self.options.precision,
            self.options.max_iterations,
            self.options.seed,
        )
        .cluster(&reference_rgb);
        log_palette(&clustering.palette);
        let reference = Arc::new(clustering.palette.recolor(&reference_rgb));

        let (target, colorized_pixels) = if target_has_patches {
            let reference_patches = extract_all_patches(&reference_gray, patch_size);
            log::info!(
                "Matching against {} reference patches of size {}",
                reference_patches.len(),
                patch_size
            );
            let matcher = PatchMatcher::new(reference_patches, self.options.match_count);
            self.colorize_target(matcher, Arc::clone(&reference), target_gray, &target_rgb)?
        } else {
            log::warn!(
                "No patch of size {} fits into the right half, it stays unchanged",
                patch_size
            );
            (target_rgb.clone(), 0)
        };
        let target_distance = target.similarity(&target_rgb);
        log::info!(
            "Colorized {} pixels, distance to the original colors is {}",
            colorized_pixels,
            target_distance
        );

        Ok(Colorization {
            palette: clustering.palette,
            reference,
            target,
            colorized_pixels,
            target_distance,
        })
    }

    /// predicts every column of the target on the threadpool, border pixels keep `target_rgb`
    fn colorize_target(
        &self,
        matcher: PatchMatcher,
        reference: Arc<RgbGrid>,
        target_gray: IntensityGrid,
        target_rgb: &RgbGrid,
    ) -> Result<(RgbGrid, usize)> {
        let patch_size = self.options.patch_size;
        let radius = patch_size / 2;
        let columns: Vec<usize> = (radius..target_gray.width().saturating_sub(radius)).collect();

        let matcher = Arc::new(matcher);
        let target_gray = Arc::new(target_gray);
        let (sender, receiver) = mpsc::channel();
        for &column in columns.iter() {
            let matcher = Arc::clone(&matcher);
            let reference = Arc::clone(&reference);
            let target_gray = Arc::clone(&target_gray);
            let sender = sender.clone();
            self.threadpool.execute(move || {
                let colors = predict_column(&matcher, &reference, &target_gray, column, patch_size);
                // the receiver outlives all jobs unless colorization was abandoned
                let _ = sender.send((column, colors));
            });
        }
        drop(sender);

        let mut target = target_rgb.clone();
        let mut delivered_columns = 0;
        let mut colorized_pixels = 0;
        for (column, colors) in receiver.iter() {
            log::trace!("Received {} colors of column {}", colors.len(), column);
            for (row, color) in colors {
                target.set_dot(column, row, color);
                colorized_pixels += 1;
            }
            delivered_columns += 1;
        }
        if delivered_columns != columns.len() {
            return Err(Error::ColorizationWorkerFailed(
                columns.len() - delivered_columns,
            ));
        }
        Ok((target, colorized_pixels))
    }
}

fn predict_column(
    matcher: &PatchMatcher,
    reference: &RgbGrid,
    target_gray: &IntensityGrid,
    column: usize,
    patch_size: usize,
) -> Vec<(usize, Rgb)> {
    (0..target_gray.height())
        .filter_map(|row| Patch::extract(target_gray, (column, row), patch_size))
        .map(|patch| (patch.center().1, matcher.predict_color(&patch, reference)))
        .collect()
}

#[cfg(test)]
mod tests {
    use threadpool::ThreadPool;

    use super::{ColorizationOptions, Colorizer};
    use crate::{
        color::Rgb,
        error::Error,
        grid::{Grid, RgbGrid},
        palette::Palette,
    };

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);
    const GRAY: Rgb = Rgb::new(128, 128, 128);

    fn seeded_options(precision: usize, number_of_threads: usize) -> ColorizationOptions {
        ColorizationOptions {
            precision,
            match_count: precision + 1,
            seed: Some(1),
            number_of_threads,
            ..Default::default()
        }
    }

    fn colorize(
        image: &RgbGrid,
        options: &ColorizationOptions,
    ) -> crate::Result<super::Colorization> {
        let threadpool = ThreadPool::new(options.number_of_threads);
        Colorizer::new(options, &threadpool).colorize(image)
    }

    #[test]
    fn colorize_gray_half_from_red_half() {
        let image = Grid::from_fn(4, 4, |x, _| if x < 2 { RED } else { GRAY });
        let options = ColorizationOptions {
            patch_size: 1,
            ..seeded_options(1, 1)
        };
        let colorization = colorize(&image, &options).expect("Colorization failed");
        assert_eq!(colorization.palette, Palette::new(vec![RED]));
        assert!(colorization.reference.dots().all(|&dot| dot == RED));
        assert!(colorization.target.dots().all(|&dot| dot == RED));
        assert_eq!(colorization.colorized_pixels, 8);
    }

    #[test]
    fn border_of_target_keeps_original_colors() {
        let image = Grid::from_fn(8, 5, |x, _| if x < 4 { RED } else { GRAY });
        let colorization = colorize(&image, &seeded_options(1, 2)).expect("Colorization failed");
        let target = &colorization.target;
        for x in 0..4 {
            for y in 0..5 {
                let inner = (1..3).contains(&x) && (1..4).contains(&y);
                let expected = if inner { RED } else { GRAY };
                assert_eq!(target.dot(x, y), expected, "wrong color at ({}, {})", x, y);
            }
        }
        assert_eq!(colorization.colorized_pixels, 6);
    }

    #[test]
    fn colorize_by_matching_intensity() {
        // reference half: dark rows on top, bright rows below
        let dark = Rgb::new(0, 0, 40);
        let bright = Rgb::new(250, 200, 200);
        let image = Grid::from_fn(12, 12, |x, y| match (x < 6, y < 6) {
            (true, true) => dark,
            (true, false) => bright,
            (false, true) => Rgb::new(5, 5, 5),
            (false, false) => Rgb::new(220, 220, 220),
        });
        let options = ColorizationOptions {
            match_count: 3,
            ..seeded_options(2, 3)
        };
        let colorization = colorize(&image, &options).expect("Colorization failed");
        let recolored_dark = colorization.reference.dot(0, 0);
        let recolored_bright = colorization.reference.dot(0, 11);
        assert_eq!(colorization.target.dot(3, 2), recolored_dark);
        assert_eq!(colorization.target.dot(3, 9), recolored_bright);
    }

    #[test]
    fn result_does_not_depend_on_number_of_threads() {
        let image = Grid::from_fn(16, 10, |x, y| {
            Rgb::new((x * 15) as u8, (y * 25) as u8, ((x + y) * 7) as u8)
        });
        let single = colorize(&image, &seeded_options(4, 1)).expect("Colorization failed");
        let multi = colorize(&image, &seeded_options(4, 4)).expect("Colorization failed");
        assert_eq!(single.target, multi.target);
        assert_eq!(single.reference, multi.reference);
    }

    #[test]
    fn full_image_joins_both_halves() {
        let image = Grid::from_fn(7, 4, |x, _| if x < 3 { BLUE } else { GRAY });
        let colorization = colorize(&image, &seeded_options(1, 1)).expect("Colorization failed");
        let full = colorization.full_image();
        assert_eq!(full.width(), 7);
        assert_eq!(full.height(), 4);
        assert_eq!(full.dot(0, 0), BLUE);
        assert_eq!(full.dot(4, 1), BLUE);
    }

    #[test]
    fn reject_reference_too_small_for_patch() {
        let image = Grid::filled(5, 4, RED);
        let options = ColorizationOptions {
            patch_size: 3,
            ..seeded_options(1, 1)
        };
        match colorize(&image, &options) {
            Err(Error::ImageTooSmallForPatchSize { patch_size, .. }) => assert_eq!(patch_size, 3),
            _ => panic!("Too small image not detected"),
        }
    }

    #[test]
    fn target_without_patch_centers_stays_unchanged() {
        let image = Grid::from_fn(4, 4, |x, _| if x < 2 { RED } else { GRAY });
        let colorization = colorize(&image, &seeded_options(1, 1)).expect("Colorization failed");
        assert_eq!(colorization.palette, Palette::new(vec![RED]));
        assert!(colorization.reference.dots().all(|&dot| dot == RED));
        assert!(colorization.target.dots().all(|&dot| dot == GRAY));
        assert_eq!(colorization.colorized_pixels, 0);
        assert_eq!(colorization.target_distance, 0);
    }

    #[test]
    fn validate_options() {
        assert!(ColorizationOptions::default().validate().is_ok());
        let even_patch_size = ColorizationOptions {
            patch_size: 4,
            ..Default::default()
        };
        assert!(matches!(
            even_patch_size.validate(),
            Err(Error::InvalidPatchSize(4))
        ));
        let zero_precision = ColorizationOptions {
            precision: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_precision.validate(),
            Err(Error::InvalidPaletteSize(0))
        ));
        let zero_matches = ColorizationOptions {
            match_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_matches.validate(),
            Err(Error::InvalidMatchCount(0))
        ));
        let zero_threads = ColorizationOptions {
            number_of_threads: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_threads.validate(),
            Err(Error::InvalidNumberOfThreads(0))
        ));
    }
}
