//! # Seeded Matrix Generation
//!
//! Puzzles are generated from a seed so that a game can be replayed and a
//! recorded stat points back at the exact matrix that was solved.
//!
//! Cells are integers in `-9..=9`, filled row by row from a [`CellSource`].
//! A candidate is rejected when it is already upper-triangular or when one of
//! its rows is entirely zero; the next candidate keeps drawing from the same
//! source, so no value is ever reused.
//!
//! Two sources exist:
//! - [`SineSource`]: the hash used by the browser version of the game
//!   (`frac(sin(counter) * 10000)`), so seeds carry over between the two.
//! - [`ChaChaSource`]: a ChaCha8 stream seeded with the puzzle seed.

use std::fmt;
use std::str::FromStr;

use log::debug;
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::{UpperTriangular, WIN_TOLERANCE};

pub const CELL_MIN: i32 = -9;
pub const CELL_MAX: i32 = 9;

/// Upper bound on rejected candidates before giving up.
pub const MAX_ATTEMPTS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("matrix shape {rows}x{cols} has no cells")]
    EmptyShape { rows: usize, cols: usize },

    /// A single row has nothing below the diagonal, so every matrix is already solved.
    #[error("a {rows}x{cols} matrix is always upper-triangular; at least 2 rows are required")]
    AlwaysTriangular { rows: usize, cols: usize },

    #[error("no playable {rows}x{cols} matrix found after {attempts} attempts")]
    Exhausted {
        rows: usize,
        cols: usize,
        attempts: usize,
    },
}

/// Deterministic stream of cell values.
pub trait CellSource {
    /// Next cell, always within `CELL_MIN..=CELL_MAX`.
    fn next_cell(&mut self) -> i32;
}

/// Counter-based sine hash. The counter is hashed as an `f64`, so seeds past
/// `2^53` stop advancing and every cell repeats; settings cap the seed there.
#[derive(Debug, Clone)]
pub struct SineSource {
    counter: u64,
}

impl SineSource {
    pub fn new(seed: u64) -> Self {
        SineSource { counter: seed }
    }

    fn unit(&mut self) -> f64 {
        self.counter = self.counter.wrapping_add(1);
        let x = (self.counter as f64).sin() * 10_000.0;
        x - x.floor()
    }
}

impl CellSource for SineSource {
    fn next_cell(&mut self) -> i32 {
        let span = f64::from(CELL_MAX - CELL_MIN + 1);
        // frac() can round up to exactly 1.0 for tiny negative products
        let cell = (self.unit() * span).floor() as i32 + CELL_MIN;
        cell.clamp(CELL_MIN, CELL_MAX)
    }
}

#[derive(Debug, Clone)]
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    pub fn new(seed: u64) -> Self {
        ChaChaSource {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl CellSource for ChaChaSource {
    fn next_cell(&mut self) -> i32 {
        self.rng.random_range(CELL_MIN..=CELL_MAX)
    }
}

/// Which [`CellSource`] a generator draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Sine,
    ChaCha,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Sine => write!(f, "sine"),
            SourceKind::ChaCha => write!(f, "chacha"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" => Ok(SourceKind::Sine),
            "chacha" => Ok(SourceKind::ChaCha),
            other => Err(format!("unknown cell source '{}' (expected sine or chacha)", other)),
        }
    }
}

/// Fills candidates from `source` until one is playable.
pub fn generate_from<S: CellSource>(
    source: &mut S,
    rows: usize,
    cols: usize,
) -> Result<Array2<f64>, GenerateError> {
    if rows == 0 || cols == 0 {
        return Err(GenerateError::EmptyShape { rows, cols });
    }
    if rows < 2 {
        return Err(GenerateError::AlwaysTriangular { rows, cols });
    }

    for attempt in 1..=MAX_ATTEMPTS {
        let mut candidate = Array2::<f64>::zeros((rows, cols));
        // iter_mut walks a fresh array in row-major order
        for cell in candidate.iter_mut() {
            *cell = f64::from(source.next_cell());
        }

        if !candidate.is_upper_triangular(WIN_TOLERANCE) && !candidate.has_zero_row() {
            if attempt > 1 {
                debug!("Accepted {}x{} candidate after {} attempts", rows, cols, attempt);
            }
            return Ok(candidate);
        }
    }

    Err(GenerateError::Exhausted {
        rows,
        cols,
        attempts: MAX_ATTEMPTS,
    })
}

/// Generates the puzzle for `seed` with the default (browser compatible) source.
pub fn generate(seed: u64, rows: usize, cols: usize) -> Result<Array2<f64>, GenerateError> {
    MatrixGenerator::builder()
        .seed(seed)
        .rows(rows)
        .cols(cols)
        .build()
        .generate()
}

/// A fully configured generator. Create one through [`MatrixGenerator::builder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixGenerator {
    rows: usize,
    cols: usize,
    seed: u64,
    source: SourceKind,
}

impl MatrixGenerator {
    pub fn builder() -> MatrixGeneratorBuilder {
        MatrixGeneratorBuilder::new()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    pub fn generate(&self) -> Result<Array2<f64>, GenerateError> {
        debug!(
            "Generating {}x{} matrix from seed {} ({} source)",
            self.rows, self.cols, self.seed, self.source
        );
        match self.source {
            SourceKind::Sine => {
                generate_from(&mut SineSource::new(self.seed), self.rows, self.cols)
            }
            SourceKind::ChaCha => {
                generate_from(&mut ChaChaSource::new(self.seed), self.rows, self.cols)
            }
        }
    }
}

/// Builder for [`MatrixGenerator`].
///
/// ```
/// use rowop_puzzle::generator::{MatrixGenerator, SourceKind};
///
/// let matrix = MatrixGenerator::builder()
///     .rows(4)
///     .cols(3)
///     .seed(1234)
///     .source(SourceKind::ChaCha)
///     .build()
///     .generate()
///     .unwrap();
/// assert_eq!(matrix.dim(), (4, 3));
/// ```
#[derive(Debug, Clone)]
pub struct MatrixGeneratorBuilder {
    rows: usize,
    cols: usize,
    seed: Option<u64>,
    source: SourceKind,
}

impl Default for MatrixGeneratorBuilder {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            seed: None,
            source: SourceKind::default(),
        }
    }
}

impl MatrixGeneratorBuilder {
    /// Default values:
    /// - `rows`: 3
    /// - `cols`: 3
    /// - `seed`: 1
    /// - `source`: sine
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn cols(mut self, cols: usize) -> Self {
        self.cols = cols;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn source(mut self, source: SourceKind) -> Self {
        self.source = source;
        self
    }

    pub fn build(self) -> MatrixGenerator {
        MatrixGenerator {
            rows: self.rows,
            cols: self.cols,
            seed: self.seed.unwrap_or(1),
            source: self.source,
        }
    }
}
