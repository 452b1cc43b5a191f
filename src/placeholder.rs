use anyhow::{Context, Result};
use clap::Parser;
use image_tools_lib::write_placeholder;
use std::path::{self, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output JPEG path
    #[arg(short, long, default_value = "data/extracted_images/placeholder_bot.jpg")]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let output_path = path::absolute(&args.output)
        .with_context(|| format!("Failed to resolve output path {}", args.output.display()))?;

    write_placeholder(&output_path)?;

    println!("{}", output_path.display());

    Ok(())
}
