//! Composition statistics: per-symbol percentages and the CG/AT ratio.
//!
//! Values are rounded half away from zero to one decimal. They are meant for
//! display and are not fed back into other computations.
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{DnaError, Result};
use crate::record::ALPHABET;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    /// Occurrences of A, C, G, T in that order.
    pub counts: [usize; 4],
    pub percentages: BTreeMap<char, f64>,
    /// `(C + G) / (A + T) * 100`; `None` when the sequence has no A or T.
    pub cg_ratio: Option<f64>,
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Count the four symbols of `sequence` and derive the statistics.
///
/// Characters outside A/C/G/T are ignored. A sequence with none of the four
/// symbols yields [`DnaError::EmptySequenceStatistics`].
pub fn composition(sequence: &str) -> Result<Composition> {
    let mut counts = [0usize; 4];
    for c in sequence.chars() {
        if let Some(i) = ALPHABET.iter().position(|&s| s == c) {
            counts[i] += 1;
        }
    }
    let total: usize = counts.iter().sum();
    if total == 0 {
        return Err(DnaError::EmptySequenceStatistics);
    }
    let percentages = ALPHABET
        .iter()
        .zip(counts)
        .map(|(&s, n)| (s, round1(n as f64 / total as f64 * 100.0)))
        .collect();
    let [a, c, g, t] = counts;
    let cg_ratio = (a + t > 0).then(|| round1((c + g) as f64 / (a + t) as f64 * 100.0));
    Ok(Composition { counts, percentages, cg_ratio })
}

impl Composition {
    pub fn percentage(&self, symbol: char) -> Option<f64> {
        self.percentages.get(&symbol).copied()
    }
}

/// Renders the indented block printed under a "Sequence <id> statistics:" line.
impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Percentages:")?;
        for (sym, perc) in &self.percentages {
            writeln!(f, "\t*{sym}: {perc:.1}%")?;
        }
        match self.cg_ratio {
            Some(r) => write!(f, "\t*%CG: {r:.1}"),
            None => write!(f, "\t*%CG: n/a"),
        }
    }
}
