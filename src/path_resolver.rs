//! Turns a Banshee track URI into a path that can be matched against Plex.

use crate::error::SkipReason;
use mime_guess2::Mime;
use std::fmt;
use std::path::Path;
use tracing::debug;

const FILE_SCHEME: &str = "file://";

/// An absolute path to an existing audio file, as a UTF-8 string so it can be
/// compared byte-for-byte with Plex's `media_parts.file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const AUDIO_TYPE: &str = "audio";

/// Guesses a MIME type, e.g. `audio/mpeg`, from the file extension alone.
pub fn guess_media_type(path: &Path) -> Option<Mime> {
    mime_guess2::from_path(path).first()
}

/// Percent-decodes `uri` and strips the `file://` scheme. No filesystem access.
pub fn uri_to_path(uri: &str) -> Result<String, SkipReason> {
    let decoded = urlencoding::decode(uri).map_err(|_| SkipReason::UndecodableUri)?;
    if let Some(path) = decoded
        .strip_prefix(FILE_SCHEME)
        .filter(|p| p.starts_with('/'))
    {
        return Ok(path.to_string());
    }
    Ok(decoded.into_owned())
}

/// Resolves a Banshee uri to an existing audio file on disk.
pub fn resolve_uri(uri: Option<&str>) -> Result<CanonicalPath, SkipReason> {
    let uri = uri
        .filter(|u| !u.trim().is_empty())
        .ok_or(SkipReason::MissingUri)?;
    let path = uri_to_path(uri)?;

    if !Path::new(&path).is_file() {
        return Err(SkipReason::FileNotFound);
    }

    let media_type = guess_media_type(Path::new(&path)).ok_or(SkipReason::UnknownMediaType)?;
    debug!("{} guessed as {}", path, media_type);
    if media_type.type_().as_str() != AUDIO_TYPE {
        return Err(SkipReason::NotAudio);
    }

    Ok(CanonicalPath(path))
}
