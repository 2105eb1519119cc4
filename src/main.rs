use std::env::args_os;
use std::process::ExitCode;

use patch_colorizer::{colorize_image, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match colorize_image(&arguments) {
        Ok(output_file) => {
            println!("Colorization successful, wrote {}", output_file.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Colorization failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
