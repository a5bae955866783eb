/*!
Mapping class scores back to human-readable labels.
*/

use crate::error::{InceptorError, Result};
use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Index-aligned class names, one per line of the label file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl From<Vec<String>> for LabelTable {
    fn from(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl LabelTable {
    /// Read one label per line. Line terminators (`\n` or `\r\n`) are stripped.
    pub fn from_reader(reader: impl BufRead) -> std::io::Result<Self> {
        let labels = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self { labels })
    }

    /// Load the label file at `path`.
    ///
    /// # Errors
    ///
    /// [`InceptorError::Io`] if the file can't be opened or read.
    pub fn load(path: &Path) -> Result<Self> {
        let io_error = |source| InceptorError::Io {
            path: path.to_owned(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let table = Self::from_reader(BufReader::new(file)).map_err(io_error)?;
        log::debug!("loaded {} labels from {:?}", table.len(), path);

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}

/// The winning class for one probability vector.
#[derive(Clone, Debug, PartialEq)]
pub struct BestMatch {
    pub index: usize,
    pub score: f32,
    pub label: String,
}

impl BestMatch {
    /// The score as a percentage, unrounded.
    pub fn percentage(&self) -> f32 {
        self.score * 100.0
    }
}

impl fmt::Display for BestMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BEST MATCH: ({:2.0}% likely) {}",
            self.percentage(),
            self.label
        )
    }
}

/// Find the highest scoring class in `probabilities` and look up its label.
///
/// Ties keep the first maximal index.
///
/// # Errors
///
/// [`InceptorError::IndexOutOfRange`] if `probabilities` is empty, or `labels`
/// has fewer entries than `probabilities`.
pub fn best_label(probabilities: &[f32], labels: &LabelTable) -> Result<BestMatch> {
    if probabilities.is_empty() || labels.len() < probabilities.len() {
        return Err(InceptorError::IndexOutOfRange {
            index: probabilities.len().saturating_sub(1),
            len: labels.len(),
        });
    }

    let mut best = 0;
    for (idx, score) in probabilities.iter().enumerate() {
        if *score > probabilities[best] {
            best = idx;
        }
    }

    Ok(BestMatch {
        index: best,
        score: probabilities[best],
        label: labels.labels[best].clone(),
    })
}
