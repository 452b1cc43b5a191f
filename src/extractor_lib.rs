use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions that qualify a file as an image. Matching is case-sensitive;
/// the uppercase variants cover what cameras commonly emit.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "JPG", "JPEG", "PNG"];

// Trait to abstract where the extractor reads from and writes to
pub trait ExtractorConfig {
    fn source_dir(&self) -> &Path;
    fn output_dir(&self) -> &Path;
}

/// How a selected image gets from its source directory to the output
/// directory. The default is a destructive move; tests and callers that
/// must not mutate the source tree can substitute [`CopyFile`] without
/// changing the selection, naming, or counting logic.
pub trait Relocate {
    fn relocate(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Moves the file. Falls back to copy-then-delete when rename fails,
/// which covers moves across filesystems.
pub struct MoveFile;

impl Relocate for MoveFile {
    fn relocate(&self, from: &Path, to: &Path) -> io::Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(_) => {
                fs::copy(from, to)?;
                fs::remove_file(from)
            }
        }
    }
}

/// Copies the file, leaving the source in place.
pub struct CopyFile;

impl Relocate for CopyFile {
    fn relocate(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Images moved to the output directory.
    pub moved: usize,
    /// Directories visited without a qualifying image, plus failed moves.
    pub skipped: usize,
}

/// List the immediate image files of one directory, sorted by file name.
/// Subdirectories are not descended into here; the walk visits them
/// separately.
pub fn image_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files = entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.is_file() && has_image_extension(&path) {
                Some(path)
            } else {
                None
            }
        })
        .collect::<Vec<PathBuf>>();

    // Sort for consistent selection
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Build the flat destination file name for an image: its path relative to
/// the source root, with path separators replaced by underscores.
pub fn flattened_name(source_root: &Path, image: &Path) -> Result<String> {
    let relative = image.strip_prefix(source_root).with_context(|| {
        format!(
            "Image {} is not under source root {}",
            image.display(),
            source_root.display()
        )
    })?;

    let name = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("_");

    Ok(name)
}

/// Resolve a destination path that does not collide with an existing file:
/// `name.ext`, then `name_1.ext`, `name_2.ext`, ... The counter is always
/// inserted before the extension of the original flattened name.
pub fn unique_destination(output_dir: &Path, file_name: &str) -> PathBuf {
    let destination = output_dir.join(file_name);
    if !destination.exists() {
        return destination;
    }

    let stem = Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let suffix = Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1;
    loop {
        let candidate = output_dir.join(format!("{}_{}{}", stem, counter, suffix));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Walk every directory under the source root and relocate the first image
/// (by sorted file name) from each into the flat output directory.
///
/// A directory without a qualifying image counts as a skip; so do a
/// directory that cannot be listed and a failed move. A single failure
/// never aborts the run.
pub fn extract_images<C: ExtractorConfig, R: Relocate>(
    config: &C,
    mover: &R,
) -> Result<ExtractionSummary> {
    let source_dir = config.source_dir();
    let output_dir = config.output_dir();

    if !source_dir.exists() {
        anyhow::bail!("Source directory does not exist: {}", source_dir.display());
    }

    // Create output directory if it doesn't exist
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut summary = ExtractionSummary::default();

    // Walk through all directories, the source root included
    for entry in WalkDir::new(source_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }

        // A directory we cannot list counts as a skip; only the missing
        // source root is fatal
        let image_files = match image_files_in(entry.path()) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("Error reading {}: {}", entry.path().display(), e);
                summary.skipped += 1;
                continue;
            }
        };

        // Take the first image; directories with none count as skipped
        let Some(source_image) = image_files.first() else {
            summary.skipped += 1;
            continue;
        };

        let safe_name = flattened_name(source_dir, source_image)?;
        let destination = unique_destination(output_dir, &safe_name);

        match mover.relocate(source_image, &destination) {
            Ok(()) => {
                println!(
                    "Moved: {} -> {}",
                    file_name_lossy(source_image),
                    file_name_lossy(&destination)
                );
                summary.moved += 1;
            }
            Err(e) => {
                eprintln!("Error moving {}: {}", source_image.display(), e);
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
