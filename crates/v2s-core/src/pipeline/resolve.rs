use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::VIDEO_EXTENSION;
use crate::error::{Result, V2sError};

use super::config::ArtifactLayout;

/// True when the file name carries the supported container extension.
pub fn is_supported_video(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(VIDEO_EXTENSION))
}

/// Expand a configured location into the videos to process.
///
/// A directory yields its immediate video files sorted by file name;
/// subdirectories and other extensions are skipped, and an empty result is
/// not an error. A file yields itself.
pub fn resolve_videos(location: &Path) -> Result<Vec<PathBuf>> {
    if location.is_dir() {
        let mut names = Vec::new();
        for entry in fs::read_dir(location)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_supported_video(&path) {
                names.push(entry.file_name());
            }
        }
        names.sort();
        let videos: Vec<PathBuf> = names.iter().map(|n| location.join(n)).collect();
        debug!(dir = %location.display(), videos = videos.len(), "Resolved video directory");
        Ok(videos)
    } else if location.is_file() {
        if !is_supported_video(location) {
            return Err(V2sError::UnsupportedVideo(location.to_path_buf()));
        }
        Ok(vec![location.to_path_buf()])
    } else if location.exists() {
        Err(V2sError::InvalidInput(location.to_path_buf()))
    } else {
        Err(V2sError::InputNotFound(location.to_path_buf()))
    }
}

/// Directory receiving the artifacts of `video`.
///
/// `Auto` is expected to be narrowed with [`ArtifactLayout::for_location`]
/// first; on its own it behaves like `Beside`.
pub fn artifact_dir(video: &Path, layout: ArtifactLayout) -> PathBuf {
    let parent = video.parent().unwrap_or(Path::new("")).to_path_buf();
    match layout {
        ArtifactLayout::Auto | ArtifactLayout::Beside => parent,
        ArtifactLayout::PerVideo => match video.file_stem() {
            Some(stem) => parent.join(stem),
            None => parent,
        },
    }
}

/// Distinct artifact directories of `videos`, in first-seen order.
pub fn artifact_dirs(videos: &[PathBuf], layout: ArtifactLayout) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::with_capacity(videos.len());
    for video in videos {
        let dir = artifact_dir(video, layout);
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}
