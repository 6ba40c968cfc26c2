//! Client-side collection of raw/edited training pairs.

use std::fmt;

/// Pairs required before the analyzer may be asked for a profile.
pub const MIN_PAIRS_FOR_ANALYSIS: usize = 3;

/// Pairs the analyzer looks at; later pairs stay in the collection only.
pub const MAX_PAIRS_SENT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(u64);

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pair-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingPair<T> {
    pub id: PairId,
    pub raw: T,
    pub edited: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadError {
    /// A batch needs a raw and an edited file.
    UploadIncomplete { received: usize },
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::UploadIncomplete { received } => {
                write!(f, "UploadIncomplete: {} file(s) received, 2 needed", received)
            }
        }
    }
}

/// Ordered training pairs for one Style Hub session.
///
/// The first file of a batch is the raw image, the second the edited one.
/// Duplicates are kept as distinct pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct PairCollector<T> {
    pairs: Vec<TrainingPair<T>>,
    next_id: u64,
}

impl<T> Default for PairCollector<T> {
    fn default() -> Self {
        Self {
            pairs: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> PairCollector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one pair from an upload batch. Files past the second are ignored.
    pub fn add_batch(&mut self, files: Vec<T>) -> Result<PairId, UploadError> {
        let received = files.len();
        let mut files = files.into_iter();
        let (raw, edited) = match (files.next(), files.next()) {
            (Some(raw), Some(edited)) => (raw, edited),
            _ => return Err(UploadError::UploadIncomplete { received }),
        };

        let id = PairId(self.next_id);
        self.next_id += 1;
        self.pairs.push(TrainingPair { id, raw, edited });
        Ok(id)
    }

    pub fn remove(&mut self, id: PairId) -> bool {
        match self.pairs.iter().position(|p| p.id == id) {
            Some(idx) => {
                self.pairs.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn pairs(&self) -> &[TrainingPair<T>] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn can_analyze(&self) -> bool {
        self.pairs.len() >= MIN_PAIRS_FOR_ANALYSIS
    }
}
