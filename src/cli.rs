use crate::cluster::DEFAULT_MAX_ITERATIONS;
use crate::colorizer::{DEFAULT_PATCH_SIZE, DEFAULT_PRECISION};
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_directory_argument(command);
        let command = Self::register_precision_argument(command);
        let command = Self::register_patch_size_argument(command);
        let command = Self::register_matches_argument(command);
        let command = Self::register_iterations_argument(command);
        let command = Self::register_seed_argument(command);
        let command = Self::register_threads_argument(command);
        let command = Self::register_full_image_argument(command);
        let command = Self::register_palette_swatch_argument(command);
        Self::register_grayscale_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_directory_argument(command: Command) -> Command {
        command.arg(Self::create_output_directory_argument())
    }

    fn register_precision_argument(command: Command) -> Command {
        command.arg(Self::create_precision_argument())
    }

    fn register_patch_size_argument(command: Command) -> Command {
        command.arg(Self::create_patch_size_argument())
    }

    fn register_matches_argument(command: Command) -> Command {
        command.arg(Self::create_matches_argument())
    }

    fn register_iterations_argument(command: Command) -> Command {
        command.arg(Self::create_iterations_argument())
    }

    fn register_seed_argument(command: Command) -> Command {
        command.arg(Self::create_seed_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn register_full_image_argument(command: Command) -> Command {
        command.arg(Self::create_full_image_argument())
    }

    fn register_palette_swatch_argument(command: Command) -> Command {
        command.arg(Self::create_palette_swatch_argument())
    }

    fn register_grayscale_argument(command: Command) -> Command {
        command.arg(Self::create_grayscale_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to the image whose right half is colorized")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_directory_argument() -> Arg {
        arg!(output_directory: -o --output_directory <DIR> "Directory of the colorized image, defaults to the directory of the input")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_precision_argument() -> Arg {
        arg!(precision: -p --precision <COLORS> "Number of palette colors")
            .default_value(DEFAULT_PRECISION.to_string())
            .value_parser(value_parser!(usize))
    }

    fn create_patch_size_argument() -> Arg {
        arg!(patch_size: -s --patch_size <SIZE> "Edge length of the compared patches, must be odd")
            .default_value(DEFAULT_PATCH_SIZE.to_string())
            .value_parser(value_parser!(usize))
    }

    fn create_matches_argument() -> Arg {
        arg!(matches: -m --matches <COUNT> "Number of best matching patches voting for a color, defaults to precision + 1")
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_iterations_argument() -> Arg {
        arg!(iterations: -i --iterations <COUNT> "Maximum number of k-means iterations")
            .default_value(DEFAULT_MAX_ITERATIONS.to_string())
            .value_parser(value_parser!(usize))
    }

    fn create_seed_argument() -> Arg {
        arg!(--seed <SEED> "Seed for the random palette initialization")
            .required(false)
            .value_parser(value_parser!(u64))
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_full_image_argument() -> Arg {
        arg!(--full_image "Write the recolored left half next to the colorized right half")
    }

    fn create_palette_swatch_argument() -> Arg {
        arg!(--palette_swatch <PATH> "Also write an image of the palette colors")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_grayscale_argument() -> Arg {
        arg!(--grayscale <PATH> "Also write the grayscale version of the input")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_directory: Self::extract_output_directory_argument(matches),
            precision: Self::extract_precision_argument(matches),
            patch_size: Self::extract_patch_size_argument(matches),
            match_count: Self::extract_matches_argument(matches),
            max_iterations: Self::extract_iterations_argument(matches),
            seed: Self::extract_seed_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
            full_image: Self::extract_full_image_argument(matches),
            palette_swatch_file: Self::extract_palette_swatch_argument(matches),
            grayscale_file: Self::extract_grayscale_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_directory_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("output_directory").cloned()
    }

    fn extract_precision_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("precision")
            .expect("Precision must be provided, but was unset.")
            .to_owned()
    }

    fn extract_patch_size_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("patch_size")
            .expect("Patch size must be provided, but was unset.")
            .to_owned()
    }

    fn extract_matches_argument(matches: &ArgMatches) -> Option<usize> {
        matches.get_one::<usize>("matches").copied()
    }

    fn extract_iterations_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("iterations")
            .expect("Iterations must be provided, but was unset.")
            .to_owned()
    }

    fn extract_seed_argument(matches: &ArgMatches) -> Option<u64> {
        matches.get_one::<u64>("seed").copied()
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }

    fn extract_full_image_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("full_image")
    }

    fn extract_palette_swatch_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("palette_swatch").cloned()
    }

    fn extract_grayscale_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("grayscale").cloned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
