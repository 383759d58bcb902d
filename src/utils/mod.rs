use std::fmt::Debug;

use num_traits::{Float, FromPrimitive};

/// Entries smaller than this in magnitude count as zero when checking for a win.
pub const WIN_TOLERANCE: f64 = 1e-3;

/// Cell types a puzzle matrix can hold.
pub trait CellFloat: Float + FromPrimitive + Debug + Default + Send + Sync + 'static {}

impl CellFloat for f32 {}
impl CellFloat for f64 {}

/// Elementary row operations. Row indices are zero based.
pub trait RowOperations<T: CellFloat> {
    /// `target = first + second`, element-wise. `target` may alias either source.
    fn add_rows(&mut self, first: usize, second: usize, target: usize) -> anyhow::Result<()>;

    /// `target = first - second`, element-wise. `target` may alias either source.
    fn subtract_rows(&mut self, first: usize, second: usize, target: usize) -> anyhow::Result<()>;

    fn swap_rows(&mut self, first: usize, second: usize) -> anyhow::Result<()>;

    fn multiply_row(&mut self, row: usize, factor: T) -> anyhow::Result<()>;

    fn divide_row(&mut self, row: usize, divisor: T) -> anyhow::Result<()>;
}

pub trait UpperTriangular {
    /// True when every entry strictly below the main diagonal is within `tolerance` of zero.
    fn is_upper_triangular(&self, tolerance: f64) -> bool;

    /// True when at least one row consists only of exact zeros.
    fn has_zero_row(&self) -> bool;
}

/// Formats a cell the way the board shows it: integers verbatim, everything
/// else rounded to two decimals with trailing zeros dropped.
pub fn format_cell(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
