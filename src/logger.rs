use crate::palette::Palette;

const LOG_CONFIG_FILE: &str = "log4rs.yaml";

#[ctor::ctor]
fn init() {
    if let Err(e) = log4rs::init_file(LOG_CONFIG_FILE, Default::default()) {
        eprintln!(
            "Logging disabled, unable to load '{}': {}",
            LOG_CONFIG_FILE, e
        );
    }
}

pub fn log_palette(palette: &Palette) {
    for (index, color) in palette.colors().iter().enumerate() {
        log::info!("Palette color {:>3}: {}", index, color);
    }
}
