use anyhow::bail;
use ndarray::{Array1, Array2, Zip};

use crate::utils::{CellFloat, RowOperations, UpperTriangular};

fn check_row(matrix_rows: usize, row: usize) -> anyhow::Result<()> {
    if row >= matrix_rows {
        bail!(
            "Row index ({}) is out of range for a matrix with {} rows",
            row,
            matrix_rows
        );
    }
    Ok(())
}

fn combine_into<T, F>(
    matrix: &mut Array2<T>,
    first: usize,
    second: usize,
    target: usize,
    combine: F,
) -> anyhow::Result<()>
where
    T: CellFloat,
    F: Fn(T, T) -> T,
{
    for row in [first, second, target] {
        check_row(matrix.nrows(), row)?;
    }

    // Both sources are read in full before the target is written.
    let combined: Array1<T> = Zip::from(matrix.row(first))
        .and(matrix.row(second))
        .map_collect(|&a, &b| combine(a, b));
    matrix.row_mut(target).assign(&combined);
    Ok(())
}

impl<T: CellFloat> RowOperations<T> for Array2<T> {
    fn add_rows(&mut self, first: usize, second: usize, target: usize) -> anyhow::Result<()> {
        combine_into(self, first, second, target, |a, b| a + b)
    }

    fn subtract_rows(&mut self, first: usize, second: usize, target: usize) -> anyhow::Result<()> {
        combine_into(self, first, second, target, |a, b| a - b)
    }

    fn swap_rows(&mut self, first: usize, second: usize) -> anyhow::Result<()> {
        check_row(self.nrows(), first)?;
        check_row(self.nrows(), second)?;
        if first == second {
            bail!("Cannot swap row {} with itself", first);
        }
        for col in 0..self.ncols() {
            self.swap([first, col], [second, col]);
        }
        Ok(())
    }

    fn multiply_row(&mut self, row: usize, factor: T) -> anyhow::Result<()> {
        check_row(self.nrows(), row)?;
        if factor.is_zero() || !factor.is_finite() {
            bail!("Row factor must be finite and non-zero, got {:?}", factor);
        }
        self.row_mut(row).mapv_inplace(|v| v * factor);
        Ok(())
    }

    fn divide_row(&mut self, row: usize, divisor: T) -> anyhow::Result<()> {
        check_row(self.nrows(), row)?;
        if divisor.is_zero() || !divisor.is_finite() {
            bail!("Row divisor must be finite and non-zero, got {:?}", divisor);
        }
        self.row_mut(row).mapv_inplace(|v| v / divisor);
        Ok(())
    }
}

impl<T: CellFloat> UpperTriangular for Array2<T> {
    fn is_upper_triangular(&self, tolerance: f64) -> bool {
        let tolerance = T::from_f64(tolerance).unwrap_or_else(T::epsilon);
        self.rows().into_iter().enumerate().skip(1).all(|(i, row)| {
            row.iter()
                .take(i.min(self.ncols()))
                .all(|value| value.abs() <= tolerance)
        })
    }

    fn has_zero_row(&self) -> bool {
        self.rows()
            .into_iter()
            .any(|row| row.iter().all(|value| value.is_zero()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::WIN_TOLERANCE;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_add_and_subtract_into_third_row() {
        let mut m = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        m.add_rows(0, 1, 2).unwrap();
        assert_eq!(m, array![[1.0, 2.0], [3.0, 4.0], [4.0, 6.0]]);

        m.subtract_rows(2, 0, 2).unwrap();
        assert_eq!(m, array![[1.0, 2.0], [3.0, 4.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_subtracting_second_source_recovers_first() {
        // The target is overwritten, so undoing an add means subtracting from the sum itself
        let original = array![[1.0, -2.0, 3.0], [4.0, 0.0, -6.0], [7.0, 8.0, 9.0]];
        let mut m = original.clone();
        m.add_rows(0, 1, 2).unwrap();
        m.subtract_rows(2, 1, 2).unwrap();
        assert_eq!(m.row(2), original.row(0));
    }

    #[test]
    fn test_target_aliases_source() {
        let mut m = array![[1.0, 2.0], [10.0, 20.0]];
        m.add_rows(0, 1, 0).unwrap();
        assert_eq!(m, array![[11.0, 22.0], [10.0, 20.0]]);

        let mut m = array![[1.0, 2.0], [10.0, 20.0]];
        m.subtract_rows(0, 1, 1).unwrap();
        assert_eq!(m, array![[1.0, 2.0], [-9.0, -18.0]]);

        // Both sources the same row as the target
        let mut m = array![[3.0, 4.0], [0.0, 1.0]];
        m.subtract_rows(0, 1, 0).unwrap();
        assert_eq!(m, array![[3.0, 3.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_swap_is_its_own_inverse() {
        let original = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let mut m = original.clone();
        m.swap_rows(0, 2).unwrap();
        assert_eq!(m.row(0), original.row(2));
        assert_eq!(m.row(2), original.row(0));
        m.swap_rows(0, 2).unwrap();
        assert_eq!(m, original);
    }

    #[test]
    fn test_multiply_then_divide_restores_row() {
        let original = array![[1.0, -7.0, 3.0], [2.0, 9.0, -4.0]];
        for factor in [3.0, -0.5, 7.0, 1e-3, 2.5] {
            let mut m = original.clone();
            m.multiply_row(1, factor).unwrap();
            m.divide_row(1, factor).unwrap();
            for (a, b) in m.iter().zip(original.iter()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_scale_rejects_zero_and_nan() {
        let original = array![[1.0, 2.0], [3.0, 4.0]];
        let mut m = original.clone();
        assert!(m.multiply_row(0, 0.0).is_err());
        assert!(m.divide_row(0, 0.0).is_err());
        assert!(m.multiply_row(0, f64::NAN).is_err());
        assert!(m.divide_row(1, f64::INFINITY).is_err());
        assert_eq!(m, original);
    }

    #[test]
    fn test_row_index_errors() {
        let mut m = Array2::<f64>::ones((2, 2));
        assert!(m.add_rows(0, 2, 1).is_err());
        assert!(m.swap_rows(0, 5).is_err());
        assert!(m.swap_rows(1, 1).is_err());
        assert!(m.multiply_row(3, 2.0).is_err());
        assert_eq!(m, Array2::<f64>::ones((2, 2)));
    }

    #[test]
    fn test_upper_triangular() {
        let identity = Array2::<f64>::eye(4);
        assert!(identity.is_upper_triangular(WIN_TOLERANCE));

        let mut m = array![[2.0, 1.0, 5.0], [0.0, 3.0, 1.0], [0.0, 0.0, 4.0]];
        assert!(m.is_upper_triangular(WIN_TOLERANCE));

        m[[2, 1]] = 0.0005;
        assert!(m.is_upper_triangular(WIN_TOLERANCE));

        m[[2, 1]] = -0.002;
        assert!(!m.is_upper_triangular(WIN_TOLERANCE));
    }

    #[test]
    fn test_upper_triangular_non_square() {
        // Wide: only the columns left of the diagonal matter
        let wide = array![[1.0, 2.0, 3.0, 4.0], [0.0, 1.0, 2.0, 3.0]];
        assert!(wide.is_upper_triangular(WIN_TOLERANCE));

        // Tall: rows below the last column must be all zero
        let tall = array![[1.0, 2.0], [0.0, 3.0], [0.0, 0.0], [0.0, 0.01]];
        assert!(!tall.is_upper_triangular(WIN_TOLERANCE));

        let single_row = array![[5.0, -1.0]];
        assert!(single_row.is_upper_triangular(WIN_TOLERANCE));
    }

    #[test]
    fn test_has_zero_row() {
        assert!(array![[1.0, 2.0], [0.0, 0.0]].has_zero_row());
        assert!(!array![[1.0, 2.0], [0.0, 1e-9]].has_zero_row());
        assert!(!Array2::<f32>::eye(3).has_zero_row());
    }
}
