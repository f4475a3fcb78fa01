//! File input and output around the solver core

mod csv;
mod job_file;

pub use self::csv::{format_rows, write_rows};
pub use job_file::JobFile;

use std::fs;
use std::path::Path;
use std::time::Instant;

use log::info;

use crate::analysis::AnalysisOptions;
use crate::error::FEAResult;
use crate::results::Summary;

/// Write the tables and report selected in `options`.
///
/// Paths are taken as given, relative to the working directory. The elapsed
/// time is stored in `summary.timings.file_save_ms`.
pub fn save_results(summary: &mut Summary, options: &AnalysisOptions) -> FEAResult<()> {
    save_results_in(summary, options, Path::new(""))
}

/// Same as [`save_results`] with every filename resolved against `dir`
pub fn save_results_in(summary: &mut Summary, options: &AnalysisOptions, dir: &Path) -> FEAResult<()> {
    let start = Instant::now();
    let precision = options.csv_precision;
    let delimiter = options.csv_delimiter.as_str();

    if options.save_nodal_displacements {
        let path = dir.join(&options.nodal_displacements_filename);
        write_rows(&path, &summary.nodal_displacements, precision, delimiter)?;
        info!("Saved nodal displacements to {}", path.display());
    }
    if options.save_nodal_forces {
        let path = dir.join(&options.nodal_forces_filename);
        write_rows(&path, &summary.nodal_forces, precision, delimiter)?;
        info!("Saved nodal forces to {}", path.display());
    }
    if options.save_tie_forces {
        let path = dir.join(&options.tie_forces_filename);
        write_rows(&path, &summary.tie_forces, precision, delimiter)?;
        info!("Saved tie forces to {}", path.display());
    }
    if options.save_element_forces {
        let path = dir.join(&options.element_forces_filename);
        write_rows(&path, &summary.element_forces, precision, delimiter)?;
        info!("Saved element forces to {}", path.display());
    }

    summary.timings.file_save_ms = start.elapsed().as_secs_f64() * 1000.0;

    // Written last so it includes the file save time
    if options.save_report {
        let path = dir.join(&options.report_filename);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&path, summary.full_report())?;
        info!("Saved report to {}", path.display());
    }
    Ok(())
}
