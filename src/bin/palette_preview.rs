use std::path::{Path, PathBuf};

use clap::{arg, value_parser, ArgMatches, Command};
use patch_colorizer::cluster::ColorClusterer;
use patch_colorizer::grid::{
    reader::FileImageReader, writer::FileImageWriter, ImageReader, ImageWriter,
};
use patch_colorizer::Error;

const DEFAULT_COLORS: usize = 5;
const SNAPSHOT_ITERATIONS: usize = 50;

fn create_command() -> Command {
    Command::new("palette_preview")
        .about("Clusters a whole image and writes the palette of every iteration")
        .arg(
            arg!(<IMAGE> "Image to cluster")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!([COLORS] "Number of palette colors")
                .default_value(DEFAULT_COLORS.to_string())
                .value_parser(value_parser!(usize)),
        )
}

fn extract_input_file(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<PathBuf>("IMAGE")
        .expect("Required argument IMAGE not provided")
        .clone()
}

fn extract_colors(matches: &ArgMatches) -> Result<usize, Error> {
    let colors = matches
        .get_one::<usize>("COLORS")
        .copied()
        .unwrap_or(DEFAULT_COLORS);
    if colors == 0 {
        return Err(Error::InvalidPaletteSize(colors));
    }
    Ok(colors)
}

fn sibling_path(input_file: &Path, prefix: &str) -> PathBuf {
    let file_name = input_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    input_file.with_file_name(format!("{}_{}", prefix, file_name))
}

fn main() -> Result<(), Error> {
    let matches = create_command().get_matches();
    let input_file = extract_input_file(&matches);
    let colors = extract_colors(&matches)?;

    let image = FileImageReader::new(&input_file).read_image()?;
    println!("{} x {}", image.width(), image.height());

    // every palette of the run is kept to watch the clusters settle
    let clustering = ColorClusterer::with_seed(colors, SNAPSHOT_ITERATIONS, None)
        .record_history(true)
        .cluster(&image);
    for (iteration, palette) in clustering.history.iter().enumerate() {
        let snapshot_file = sibling_path(&input_file, &format!("reps{}", iteration + 1));
        FileImageWriter::new(&snapshot_file, &palette.swatch()).write_image()?;
    }
    println!(
        "{} colors after {} iterations, converged: {}",
        clustering.palette.len(),
        clustering.iterations,
        clustering.converged
    );
    println!("{}", clustering.palette);

    let recolored = clustering.palette.recolor(&image);
    FileImageWriter::new(&sibling_path(&input_file, "recol"), &recolored).write_image()?;
    FileImageWriter::new(&sibling_path(&input_file, "gray"), &image.grayscale()).write_image()?;
    Ok(())
}
