//! Shuffled cursor over an image list.

use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;

/// A cursor into a shuffled image list.
///
/// Running past the end wraps back to the first position and reshuffles.
#[derive(Debug, Clone)]
pub struct ImageCycle {
    images: Vec<PathBuf>,
    index: usize,
}

impl ImageCycle {
    /// Builds a cycle over `images`, shuffled with `rng`.
    pub fn new<R: Rng + ?Sized>(mut images: Vec<PathBuf>, rng: &mut R) -> Self {
        images.shuffle(rng);
        Self { images, index: 0 }
    }

    /// Returns the image under the cursor, or `None` for an empty list.
    #[must_use]
    pub fn current(&self) -> Option<&Path> { self.images.get(self.index).map(PathBuf::as_path) }

    /// Moves the cursor forward, reshuffling after a full pass.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.index += 1;
        if self.index >= self.images.len() {
            self.index = 0;
            self.images.shuffle(rng);
        }
    }
}
