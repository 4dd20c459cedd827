pub mod completions;
pub mod convert;
pub mod inspect;

use clap::{Parser, Subcommand};

/// vectile - RasterFill symbol vectorizer for QGIS styles
#[derive(Parser, Debug)]
#[command(name = "vectile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert embedded raster-tile fills to native vector symbol layers
    Convert(convert::ConvertArgs),

    /// Show how each embedded tile would be classified, without converting
    Inspect(inspect::InspectArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Collect the QML files named by a set of paths.
///
/// Directories are walked recursively for `.qml` files; explicit file
/// arguments are taken as-is.
pub(crate) fn collect_qml_files(
    paths: &[std::path::PathBuf],
) -> crate::error::Result<Vec<std::path::PathBuf>> {
    use crate::error::VectileError;

    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in walkdir::WalkDir::new(path).sort_by_file_name() {
                let entry = entry.map_err(|e| VectileError::Io {
                    path: path.clone(),
                    message: format!("Failed to walk directory: {}", e),
                })?;
                if entry.file_type().is_file()
                    && entry.path().extension().and_then(|ext| ext.to_str()) == Some("qml")
                {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_walks_directories_for_qml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.qml"), "<qgis/>").unwrap();
        fs::write(dir.path().join("b.txt"), "not qml").unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("c.qml"), "<qgis/>").unwrap();

        let files = collect_qml_files(&[dir.path().to_path_buf()]).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.qml", "c.qml"]);
    }

    #[test]
    fn test_collect_passes_files_through() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("style.qml");
        fs::write(&file, "<qgis/>").unwrap();

        let files = collect_qml_files(&[file.clone()]).unwrap();

        assert_eq!(files, vec![file]);
    }
}
