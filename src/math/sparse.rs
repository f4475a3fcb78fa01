//! Sparse matrix utilities for the augmented stiffness system
//!
//! Stiffness matrices are assembled as (row, col, value) triplets and summed
//! on conversion to compressed storage. The augmented system carries zero
//! diagonal entries in its Lagrange-multiplier block, so it is symmetric but
//! indefinite and is factorized with a pivoting sparse LU rather than Cholesky.

use faer::linalg::solvers::Solve;
use faer::sparse::linalg::solvers::{Lu, SymbolicLu};
use faer::sparse::{SparseColMat, Triplet};
use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CscMatrix, CsrMatrix};

/// Sparse matrix builder using COO triplets.
/// Duplicate entries accumulate.
#[derive(Debug, Clone)]
pub struct SparseMatrixBuilder {
    size: usize,
    entries: Vec<(usize, usize, f64)>,
}

impl SparseMatrixBuilder {
    /// Create an empty `size` x `size` builder
    pub fn new(size: usize) -> Self {
        Self::with_capacity(size, 0)
    }

    /// Create a builder with room for `nnz` triplets
    pub fn with_capacity(size: usize, nnz: usize) -> Self {
        Self {
            size,
            entries: Vec::with_capacity(nnz),
        }
    }

    /// Add a value to the matrix (accumulates if already exists)
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.size && col < self.size);
        self.entries.push((row, col, value));
    }

    /// Append a batch of triplets
    pub fn extend<I>(&mut self, triplets: I)
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        self.entries.extend(triplets);
    }

    /// Copy of this builder resized to `size` x `size`, keeping all entries.
    /// Used to grow the stiffness block into the augmented system.
    pub fn resized(&self, size: usize) -> Self {
        assert!(size >= self.size, "cannot shrink a sparse builder");
        Self {
            size,
            entries: self.entries.clone(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stored triplets (before duplicates are summed)
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    fn to_coo(&self) -> CooMatrix<f64> {
        let mut coo = CooMatrix::new(self.size, self.size);
        for &(row, col, val) in &self.entries {
            coo.push(row, col, val);
        }
        coo
    }

    /// Convert to CSR format, summing duplicates
    pub fn to_csr(&self) -> CsrMatrix<f64> {
        CsrMatrix::from(&self.to_coo())
    }

    /// Convert to CSC format, summing duplicates and dropping entries whose
    /// accumulated magnitude is below `prune_tol`
    pub fn to_csc(&self, prune_tol: f64) -> CscMatrix<f64> {
        CscMatrix::from(&self.to_coo()).filter(|_, _, v| v.abs() >= prune_tol)
    }

    /// Convert to dense matrix (for comparison/debugging)
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut mat = DMatrix::zeros(self.size, self.size);
        for &(row, col, val) in &self.entries {
            mat[(row, col)] += val;
        }
        mat
    }
}

/// Sparse matrix-vector multiplication
pub fn sparse_matvec(csr: &CsrMatrix<f64>, x: &DVector<f64>) -> DVector<f64> {
    let n = csr.nrows();
    let mut y = DVector::zeros(n);

    let row_offsets = csr.row_offsets();
    let col_indices = csr.col_indices();
    let values = csr.values();

    for row in 0..n {
        let mut sum = 0.0;
        for idx in row_offsets[row]..row_offsets[row + 1] {
            sum += values[idx] * x[col_indices[idx]];
        }
        y[row] = sum;
    }

    y
}

/// Sparse LU solver backed by `faer`.
///
/// Split into the same three phases as a classic direct solver so each can
/// be timed: [`analyze_pattern`](Self::analyze_pattern) computes the
/// fill-reducing ordering from the sparsity pattern, [`factorize`](Self::factorize)
/// computes the numeric factors, and [`solve`](Self::solve) runs the
/// triangular solves.
pub struct SparseLuSolver {
    dimension: usize,
    matrix: SparseColMat<usize, f64>,
    symbolic: Option<SymbolicLu<usize>>,
    factorization: Option<Lu<usize, f64>>,
}

impl SparseLuSolver {
    /// Convert the matrix and run symbolic analysis
    pub fn analyze_pattern(csc: &CscMatrix<f64>) -> Result<Self, String> {
        if csc.nrows() != csc.ncols() {
            return Err(format!(
                "Matrix must be square, got {}x{}",
                csc.nrows(),
                csc.ncols()
            ));
        }
        if csc.nrows() == 0 {
            return Err("Cannot factorize empty matrix".into());
        }

        let triplets: Vec<Triplet<usize, usize, f64>> = csc
            .triplet_iter()
            .map(|(row, col, &val)| Triplet { row, col, val })
            .collect();
        let matrix = SparseColMat::try_new_from_triplets(csc.nrows(), csc.ncols(), &triplets)
            .map_err(|e| format!("Failed to construct sparse matrix: {e:?}"))?;

        let symbolic = SymbolicLu::try_new(matrix.symbolic())
            .map_err(|e| format!("Symbolic analysis failed: {e:?}"))?;

        Ok(Self {
            dimension: csc.nrows(),
            matrix,
            symbolic: Some(symbolic),
            factorization: None,
        })
    }

    /// Numeric LU factorization using the symbolic structure
    pub fn factorize(&mut self) -> Result<(), String> {
        let symbolic = self
            .symbolic
            .take()
            .ok_or_else(|| "Symbolic analysis missing or already consumed".to_string())?;

        let lu = Lu::try_new_with_symbolic(symbolic, self.matrix.as_ref())
            .map_err(|e| format!("LU factorization failed: {e:?}"))?;

        self.factorization = Some(lu);
        Ok(())
    }

    /// Solve A x = b with the cached factors
    pub fn solve(&self, rhs: &DVector<f64>) -> Result<DVector<f64>, String> {
        let lu = self
            .factorization
            .as_ref()
            .ok_or_else(|| "Solver not factorized. Call factorize() first.".to_string())?;

        if rhs.len() != self.dimension {
            return Err(format!(
                "RHS length ({}) != matrix dimension ({})",
                rhs.len(),
                self.dimension
            ));
        }

        let rhs_mat: faer::Mat<f64> = faer::Mat::from_fn(self.dimension, 1, |i, _| rhs[i]);
        let sol = lu.solve(&rhs_mat);

        let x = DVector::from_fn(self.dimension, |i, _| sol[(i, 0)]);
        if let Some(i) = x.iter().position(|v| !v.is_finite()) {
            return Err(format!("Zero pivot: non-finite solution at unknown {i}"));
        }
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sparse_builder_accumulates() {
        let mut builder = SparseMatrixBuilder::new(3);
        builder.add(0, 0, 4.0);
        builder.add(0, 0, 1.0);
        builder.add(1, 2, 2.0);

        let dense = builder.to_dense();
        assert_relative_eq!(dense[(0, 0)], 5.0);
        assert_relative_eq!(dense[(1, 2)], 2.0);

        let csr = builder.to_csr();
        assert_eq!(csr.nnz(), 2);
    }

    #[test]
    fn test_prune_after_summation() {
        let mut builder = SparseMatrixBuilder::new(2);
        builder.add(0, 0, 1.0);
        builder.add(0, 1, 3.0);
        builder.add(0, 1, -3.0);
        builder.add(1, 1, 1e-16);
        let csc = builder.to_csc(1e-14);
        assert_eq!(csc.nnz(), 1);
    }

    #[test]
    fn test_resized_keeps_entries() {
        let mut builder = SparseMatrixBuilder::new(2);
        builder.add(1, 1, 2.0);
        let big = builder.resized(4);
        assert_eq!(big.size(), 4);
        assert_relative_eq!(big.to_dense()[(1, 1)], 2.0);
    }

    #[test]
    fn test_lu_solves_indefinite_system() {
        // [ 2  0  1 ] [x]   [1]
        // [ 0  3  0 ] [y] = [6]
        // [ 1  0  0 ] [l]   [0.5]
        let mut builder = SparseMatrixBuilder::new(3);
        builder.add(0, 0, 2.0);
        builder.add(1, 1, 3.0);
        builder.add(0, 2, 1.0);
        builder.add(2, 0, 1.0);

        let csc = builder.to_csc(1e-14);
        let mut solver = SparseLuSolver::analyze_pattern(&csc).unwrap();
        solver.factorize().unwrap();
        let x = solver
            .solve(&DVector::from_vec(vec![1.0, 6.0, 0.5]))
            .unwrap();

        assert_relative_eq!(x[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[2], 0.0, epsilon = 1e-12);

        let ax = sparse_matvec(&builder.to_csr(), &x);
        assert_relative_eq!(ax[2], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_requires_factorization() {
        let mut builder = SparseMatrixBuilder::new(1);
        builder.add(0, 0, 1.0);
        let solver = SparseLuSolver::analyze_pattern(&builder.to_csc(0.0)).unwrap();
        assert!(solver.solve(&DVector::from_vec(vec![1.0])).is_err());
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let builder = SparseMatrixBuilder::new(0);
        assert!(SparseLuSolver::analyze_pattern(&builder.to_csc(0.0)).is_err());
    }
}
