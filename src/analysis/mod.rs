//! Analysis options and the static solve pipeline

mod linear;
mod recovery;

pub use linear::solve;
pub use recovery::{element_forces, nodal_forces, node_table, tie_forces};

use serde::{Deserialize, Serialize};

/// Linear solver used for the augmented system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Sparse LU with fill-reducing ordering
    #[default]
    SparseLu,
    /// Dense LU with partial pivoting. Only practical for small models.
    DenseLu,
}

/// Options for a static solve
///
/// The `save_*` flags, filenames and CSV settings are only read by
/// [`crate::io::save_results`]; they do not affect the computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Log phase progress at info level instead of debug
    pub verbose: bool,
    /// Results with magnitude below this are reported as exactly zero
    pub epsilon: f64,
    /// Formulate elements on the rayon thread pool
    pub parallel_assembly: bool,
    pub solver: SolverKind,
    /// Digits after the decimal point in the scientific notation written to
    /// CSV files
    pub csv_precision: usize,
    pub csv_delimiter: String,
    pub save_nodal_displacements: bool,
    pub nodal_displacements_filename: String,
    pub save_nodal_forces: bool,
    pub nodal_forces_filename: String,
    pub save_tie_forces: bool,
    pub tie_forces_filename: String,
    pub save_element_forces: bool,
    pub element_forces_filename: String,
    pub save_report: bool,
    pub report_filename: String,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            epsilon: 1e-14,
            parallel_assembly: true,
            solver: SolverKind::SparseLu,
            csv_precision: 14,
            csv_delimiter: ",".to_string(),
            save_nodal_displacements: false,
            nodal_displacements_filename: "nodal_displacements.csv".to_string(),
            save_nodal_forces: false,
            nodal_forces_filename: "nodal_forces.csv".to_string(),
            save_tie_forces: false,
            tie_forces_filename: "tie_forces.csv".to_string(),
            save_element_forces: false,
            element_forces_filename: "element_forces.csv".to_string(),
            save_report: false,
            report_filename: "report.txt".to_string(),
        }
    }
}

impl AnalysisOptions {
    /// Enable verbose progress logging
    pub fn with_verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Set the zero-rounding threshold
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Choose the linear solver
    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    /// Enable or disable parallel element formulation
    pub fn with_parallel_assembly(mut self, parallel: bool) -> Self {
        self.parallel_assembly = parallel;
        self
    }

    /// Set CSV precision and delimiter
    pub fn with_csv_format(mut self, precision: usize, delimiter: &str) -> Self {
        self.csv_precision = precision;
        self.csv_delimiter = delimiter.to_string();
        self
    }

    pub fn save_nodal_displacements(mut self, filename: &str) -> Self {
        self.save_nodal_displacements = true;
        self.nodal_displacements_filename = filename.to_string();
        self
    }

    pub fn save_nodal_forces(mut self, filename: &str) -> Self {
        self.save_nodal_forces = true;
        self.nodal_forces_filename = filename.to_string();
        self
    }

    pub fn save_tie_forces(mut self, filename: &str) -> Self {
        self.save_tie_forces = true;
        self.tie_forces_filename = filename.to_string();
        self
    }

    pub fn save_element_forces(mut self, filename: &str) -> Self {
        self.save_element_forces = true;
        self.element_forces_filename = filename.to_string();
        self
    }

    pub fn save_report(mut self, filename: &str) -> Self {
        self.save_report = true;
        self.report_filename = filename.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_options_deserialize_with_defaults() {
        let options: AnalysisOptions =
            serde_json::from_str(r#"{"epsilon": 1e-9, "solver": "dense_lu"}"#).unwrap();
        assert_eq!(options.epsilon, 1e-9);
        assert_eq!(options.solver, SolverKind::DenseLu);
        assert_eq!(options.csv_delimiter, ",");
        assert!(!options.save_report);
    }

    #[test]
    fn test_builders() {
        let options = AnalysisOptions::default()
            .with_verbose()
            .with_csv_format(6, ";")
            .save_tie_forces("ties.csv");
        assert!(options.verbose);
        assert_eq!(options.csv_precision, 6);
        assert!(options.save_tie_forces);
        assert_eq!(options.tie_forces_filename, "ties.csv");
    }
}
