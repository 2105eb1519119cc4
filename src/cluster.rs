//! Lloyd's k-means over RGB colors.
//!
//! Each iteration assigns every pixel to its closest palette color (see
//! [`Palette::closest_index`]) and replaces every color by the truncated mean of its
//! members. A color without members is reseeded with a random color that is not in the
//! palette yet. Clustering stops as soon as an iteration leaves the palette unchanged or
//! the iteration cap is reached.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{color::Rgb, grid::RgbGrid, palette::Palette};

pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// outcome of a clustering run
#[derive(Clone, Debug)]
pub struct Clustering {
    pub palette: Palette,
    /// number of iterations that were run
    pub iterations: usize,
    /// whether the last iteration reproduced its input palette
    pub converged: bool,
    /// palette after every iteration, only filled if requested
    pub history: Vec<Palette>,
}

#[derive(Clone, Copy, Default)]
struct ColorSum {
    red: u64,
    green: u64,
    blue: u64,
    count: u64,
}

impl ColorSum {
    fn add(&mut self, color: &Rgb) {
        self.red += color.red as u64;
        self.green += color.green as u64;
        self.blue += color.blue as u64;
        self.count += 1;
    }

    fn mean(&self) -> Option<Rgb> {
        if self.count == 0 {
            return None;
        }
        Some(Rgb::new(
            (self.red / self.count) as u8,
            (self.green / self.count) as u8,
            (self.blue / self.count) as u8,
        ))
    }
}

pub struct ColorClusterer<R: Rng> {
    size: usize,
    max_iterations: usize,
    record_history: bool,
    rng: R,
}

impl ColorClusterer<StdRng> {
    /// clusterer drawing from a seeded generator, or from the thread generator if `seed` is unset
    pub fn with_seed(size: usize, max_iterations: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self::new(size, max_iterations, rng)
    }
}

impl<R: Rng> ColorClusterer<R> {
    pub fn new(size: usize, max_iterations: usize, rng: R) -> Self {
        assert!(size > 0, "Palette size must be at least one");
        Self {
            size,
            max_iterations,
            record_history: false,
            rng,
        }
    }

    pub fn record_history(mut self, record_history: bool) -> Self {
        self.record_history = record_history;
        self
    }

    pub fn cluster(&mut self, pixels: &RgbGrid) -> Clustering {
        let mut palette = Palette::random(self.size, &mut self.rng);
        let mut history = Vec::new();
        log::debug!("Initial palette {}", palette);
        for iteration in 1..=self.max_iterations {
            let next = self.step(pixels, &palette);
            log::debug!("Palette after iteration {}: {}", iteration, next);
            if self.record_history {
                history.push(next.clone());
            }
            let converged = next == palette;
            palette = next;
            if converged {
                log::info!(
                    "Clustering into {} colors converged after {} iterations",
                    self.size,
                    iteration
                );
                return Clustering {
                    palette,
                    iterations: iteration,
                    converged: true,
                    history,
                };
            }
        }
        log::info!(
            "Clustering into {} colors stopped after {} iterations without converging",
            self.size,
            self.max_iterations
        );
        Clustering {
            palette,
            iterations: self.max_iterations,
            converged: false,
            history,
        }
    }

    /// one assignment and update round, `previous` is left untouched
    pub fn step(&mut self, pixels: &RgbGrid, previous: &Palette) -> Palette {
        let mut sums = vec![ColorSum::default(); previous.len()];
        for pixel in pixels.dots() {
            sums[previous.closest_index(pixel)].add(pixel);
        }

        let mut colors = previous.colors().to_vec();
        let mut empty_clusters = Vec::new();
        for (index, sum) in sums.iter().enumerate() {
            match sum.mean() {
                Some(mean) => colors[index] = mean,
                None => empty_clusters.push(index),
            }
        }
        for &index in empty_clusters.iter() {
            let reseeded = self.unused_random_color(&colors);
            colors[index] = reseeded;
        }
        if !empty_clusters.is_empty() {
            log::debug!("Reseeded empty clusters {:?}", empty_clusters);
        }
        Palette::new(colors)
    }

    fn unused_random_color(&mut self, colors: &[Rgb]) -> Rgb {
        loop {
            let candidate = Rgb::random(&mut self.rng);
            if !colors.contains(&candidate) {
                return candidate;
            }
        }
    }
}
