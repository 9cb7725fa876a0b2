pub use self::error::{Error, Result};

use clap::Parser;
use image::Rgb;
use wild::ArgsOs;

use segmenter::ObjectSegmenter;

mod arg_validators;
mod error;
mod segmenter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image files
    #[arg(required(true))]
    files: Vec<String>,
    /// Number of color clusters
    #[arg(short, long, default_value_t = 5, value_parser = arg_validators::validate_positive_integer)]
    cluster_count: usize,
    /// Minimum region size (pixels)
    #[arg(short, long, default_value_t = 100, value_parser = arg_validators::validate_positive_integer)]
    min_region_size: usize,
    /// Background brightness threshold (per channel)
    #[arg(short('t'), long, default_value_t = 240)]
    background_threshold: u8,
    /// Background color of output images
    #[arg(short, long, default_value = "#FFFFFF", value_parser = arg_validators::validate_background_color)]
    background_color: Rgb<u8>,
    /// Maximum clustering iterations
    #[arg(short('i'), long, default_value_t = 100, value_parser = arg_validators::validate_positive_integer)]
    max_iterations: usize,
    /// Clustering random seed
    #[arg(short, long)]
    seed: Option<u64>,
    /// Save edge-map image alongside objects
    #[arg(short('e'), long, default_value_t = false)]
    save_edge_map: bool,
    /// Verbose messages
    #[arg(short('v'), long, default_value_t = false)]
    verbose: bool,
}

pub fn run(args: ArgsOs) -> Result<()> {
    let args = Args::parse_from(args);
    for file_pattern in &args.files {
        for file in glob::glob(file_pattern)? {
            let object_segmenter = ObjectSegmenter::new(file?, &args);
            object_segmenter.process()?;
            println!();
        }
    }
    Ok(())
}
