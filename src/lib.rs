pub mod extractor_lib;
pub mod placeholder_lib;

pub use extractor_lib::{
    extract_images, flattened_name, image_files_in, unique_destination, CopyFile,
    ExtractionSummary, ExtractorConfig, MoveFile, Relocate, IMAGE_EXTENSIONS,
};
pub use placeholder_lib::{
    render_bot_silhouette, write_placeholder, BLACK, CANVAS_HEIGHT, CANVAS_WIDTH, SILHOUETTE,
};
