//! Audio catalog — the clips the PlayAudio intent chooses from.

use r2skill_core::error::Error;
use rand::Rng;

/// Built-in clip locations. Deployments point `skill.audio_sources` at
/// their own hosted files.
pub const DEFAULT_AUDIO_SOURCES: [&str; 4] = ["url1", "url2", "Url3", "Url4"];

/// A non-empty list of audio URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCatalog {
    sources: Vec<String>,
}

impl AudioCatalog {
    pub fn new(sources: Vec<String>) -> Result<Self, Error> {
        if sources.is_empty() {
            return Err(Error::Config {
                message: "audio catalog needs at least one source".into(),
            });
        }
        Ok(Self { sources })
    }

    /// The configured sources, or the built-in clips when none are configured.
    pub fn from_config(sources: &[String]) -> Result<Self, Error> {
        if sources.is_empty() {
            Ok(Self::default())
        } else {
            Self::new(sources.to_vec())
        }
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn contains(&self, source: &str) -> bool {
        self.sources.iter().any(|s| s == source)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Draw one source uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.sources[rng.random_range(0..self.sources.len())]
    }
}

impl Default for AudioCatalog {
    fn default() -> Self {
        Self {
            sources: DEFAULT_AUDIO_SOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
