use std::io::ErrorKind;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Something that can remember the high score between sessions.  Both
/// operations are best-effort and never fail the caller.
pub(crate) trait HighScoreStore: std::fmt::Debug {
    /// Return the stored high score, or 0 if there isn't one or it can't be
    /// read
    fn load_high_score(&self) -> u32;

    /// Store `score` as the high score, giving up quietly on failure
    fn save_high_score(&self, score: u32);
}

/// A high score stored as a bare decimal integer in a text file
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub(crate) fn new(path: PathBuf) -> HighScoreFile {
        HighScoreFile { path }
    }

    /// Return the default high score file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("turtlesnake").join("highscore.txt"))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Read the high score from disk.  A missing or blank file counts as a
    /// high score of 0.
    pub(crate) fn load(&self) -> Result<u32, LoadError> {
        let src = match fs_err::read_to_string(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(LoadError::read(e)),
        };
        let src = src.trim();
        if src.is_empty() {
            Ok(0)
        } else {
            src.parse::<u32>().map_err(LoadError::parse)
        }
    }

    pub(crate) fn save(&self, score: u32) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        fs_err::write(&self.path, score.to_string()).map_err(SaveError::write)?;
        Ok(())
    }
}

impl HighScoreStore for HighScoreFile {
    fn load_high_score(&self) -> u32 {
        match self.load() {
            Ok(score) => {
                tracing::debug!(score, path = %self.path.display(), "Loaded high score");
                score
            }
            Err(e) => {
                tracing::warn!(error = %ErrorChain(&e), "Using high score of 0");
                0
            }
        }
    }

    fn save_high_score(&self, score: u32) {
        match self.save(score) {
            Ok(()) => tracing::info!(score, path = %self.path.display(), "Saved high score"),
            Err(e) => tracing::warn!(error = %ErrorChain(&e), "High score not saved"),
        }
    }
}

/// A store for when there's nowhere to keep the high score
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct NoStore;

impl HighScoreStore for NoStore {
    fn load_high_score(&self) -> u32 {
        0
    }

    fn save_high_score(&self, _score: u32) {}
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load_high_score(&self) -> u32 {
        (**self).load_high_score()
    }

    fn save_high_score(&self, score: u32) {
        (**self).save_high_score(score);
    }
}

/// Display an error together with all of its sources, separated by colons
#[derive(Clone, Copy, Debug)]
pub(crate) struct ErrorChain<'a>(pub(crate) &'a (dyn std::error::Error + 'static));

impl std::fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(e) = source {
            write!(f, ": {e}")?;
            source = e.source();
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn parse(e: ParseIntError) -> Self {
        LoadError(LoadErrorSource::Parse(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("high score file does not contain an integer")]
    Parse(#[source] ParseIntError),
}
