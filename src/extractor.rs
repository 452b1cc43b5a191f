use anyhow::Result;
use clap::Parser;
use image_tools_lib::{extract_images, ExtractorConfig, MoveFile};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory tree to extract one image per directory from
    #[arg(long)]
    source_dir: PathBuf,

    /// Flat directory the selected images are moved into
    #[arg(long, default_value = "extracted_images")]
    output_dir: PathBuf,
}

impl ExtractorConfig for Args {
    fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    println!("Extracting one image from each directory...");
    println!("Source: {}", args.source_dir.display());
    println!("Output: {}\n", args.output_dir.display());

    // Move the selected images; a failed move is counted, not fatal
    let summary = extract_images(&args, &MoveFile)?;

    println!("\nSummary:");
    println!("  Images moved: {}", summary.moved);
    println!("  Directories skipped (no images): {}", summary.skipped);
    println!("  Output directory: {}", args.output_dir.display());

    println!("\nDone!");

    Ok(())
}
