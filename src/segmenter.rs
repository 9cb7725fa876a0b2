use std::path::PathBuf;

use image::Pixel;
use image::Rgb;
use image::RgbImage;
use itertools::Itertools;
use rand::SeedableRng;
use rand_xoshiro::Xoroshiro128PlusPlus;

use crate::Args;
use crate::Result;

mod background;
mod clustering;
mod compositing;
mod filters;
mod io;
mod labeling;
mod regions;

/// One object cut out of the input image, identified by the color cluster
/// it belongs to and its 1-based rank within that cluster
pub struct SegmentedObject {
    pub cluster_id: usize,
    pub object_number: usize,
    pub image: RgbImage,
}

pub struct ObjectSegmenter {
    file: PathBuf,
    base_path: PathBuf,
    cluster_count: usize,
    min_region_size: usize,
    background_threshold: u8,
    background_color: Rgb<u8>,
    max_iterations: usize,
    seed: Option<u64>,
    save_edge_map: bool,
    verbose: bool,
}

impl ObjectSegmenter {
    pub fn new(file: PathBuf, args: &Args) -> Self {
        let base_path = file.parent().unwrap().join(file.file_stem().unwrap());
        Self {
            file,
            base_path,
            cluster_count: args.cluster_count,
            min_region_size: args.min_region_size,
            background_threshold: args.background_threshold,
            background_color: args.background_color,
            max_iterations: args.max_iterations,
            seed: args.seed,
            save_edge_map: args.save_edge_map,
            verbose: args.verbose,
        }
    }

    pub fn process(self) -> Result<()> {
        let image = io::open_image(&self.file)?.to_rgb8();
        println!("{}: {}x{}", self.file.display(), image.width(), image.height());

        if self.save_edge_map {
            let edges = filters::edge_map(&image);
            io::save_luma_image_as(&edges, &self.base_path, "edges")?;
        }

        let objects = self.segment(&image)?;
        println!("{}: found {} objects", self.file.display(), objects.len());
        for object in &objects {
            let suffix = format!(
                "cluster-{}-object-{}",
                object.cluster_id + 1,
                object.object_number
            );
            io::save_rgb_image_as(&object.image, &self.base_path, &suffix)?;
        }

        Ok(())
    }

    /// Run the segmentation pipeline on an in-memory image
    ///
    /// Results come back grouped by cluster id, each cluster's objects in
    /// reading order (top to bottom, then left to right).
    pub fn segment(&self, image: &RgbImage) -> Result<Vec<SegmentedObject>> {
        let filtered = background::filter_background(image, self.background_threshold);
        if self.verbose {
            let total = image.width() as usize * image.height() as usize;
            println!(
                "{}: {} of {} pixels are foreground",
                self.file.display(),
                filtered.len(),
                total
            );
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        if self.verbose {
            println!("{}: clustering with seed {seed}", self.file.display());
        }
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
        let clustering = clustering::cluster_colors(
            &filtered.pixels,
            self.cluster_count,
            self.max_iterations,
            &mut rng,
        )?;
        if !clustering.converged {
            println!(
                "{}: clustering stopped after {} iterations without settling, using last assignment",
                self.file.display(),
                clustering.iterations
            );
        } else if self.verbose {
            println!(
                "{}: clustering settled after {} iterations",
                self.file.display(),
                clustering.iterations
            );
        }

        let grid = labeling::LabelGrid::build(
            image.width(),
            image.height(),
            &filtered.indices,
            &clustering.assignments,
        );

        let mut objects = Vec::new();
        for (cluster_id, centroid) in clustering.centroids.iter().enumerate() {
            let sorted =
                regions::sort_regions(regions::find_regions(&grid, cluster_id, self.min_region_size));
            if self.verbose {
                println!(
                    "{}: cluster {} ({}) has {} regions",
                    self.file.display(),
                    cluster_id + 1,
                    color_hex(centroid),
                    sorted.len()
                );
            }
            for (index, region) in sorted.iter().enumerate() {
                objects.push(SegmentedObject {
                    cluster_id,
                    object_number: index + 1,
                    image: compositing::render_region(image, region, self.background_color),
                });
            }
        }
        Ok(objects)
    }
}

/// Format a color as hex #RRGGBB
fn color_hex(color: &Rgb<u8>) -> String {
    format!(
        "#{}",
        color.channels().iter().map(|c| format!("{c:02X}")).join("")
    )
}
