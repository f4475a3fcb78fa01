//! JSON job files

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{self, AnalysisOptions};
use crate::constraints::{BoundaryCondition, Equation, Tie};
use crate::elements::{Element, ElementProperty, Node};
use crate::error::FEAResult;
use crate::loads::Force;
use crate::model::Job;
use crate::results::Summary;

/// Everything needed for one analysis, as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFile {
    pub nodes: Vec<Node>,
    pub elems: Vec<Element>,
    pub props: Vec<ElementProperty>,
    #[serde(default)]
    pub bcs: Vec<BoundaryCondition>,
    #[serde(default)]
    pub forces: Vec<Force>,
    #[serde(default)]
    pub ties: Vec<Tie>,
    #[serde(default)]
    pub equations: Vec<Equation>,
    #[serde(default)]
    pub options: AnalysisOptions,
}

impl JobFile {
    /// Parse a job from JSON text
    pub fn from_json(json: &str) -> FEAResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a job file
    pub fn load(path: &Path) -> FEAResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> FEAResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The geometry part of the file
    pub fn job(&self) -> Job {
        Job::new(self.nodes.clone(), self.elems.clone(), self.props.clone())
    }

    /// Solve with the file's own options
    pub fn solve(&self) -> FEAResult<Summary> {
        analysis::solve(
            &self.job(),
            &self.bcs,
            &self.forces,
            &self.ties,
            &self.equations,
            &self.options,
        )
    }
}
