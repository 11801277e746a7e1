use super::error::SasaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PROBE_RADIUS: f64 = 1.4;
pub const DEFAULT_SHRAKE_RUPLEY_N_POINTS: usize = 100;
pub const DEFAULT_LEE_RICHARDS_N_SLICES: usize = 20;
pub const DEFAULT_N_THREADS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    #[default]
    LeeRichards,
    ShrakeRupley,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown SASA algorithm '{0}'")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "lee-richards" | "lr" => Ok(Algorithm::LeeRichards),
            "shrake-rupley" | "sr" => Ok(Algorithm::ShrakeRupley),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Algorithm::LeeRichards => "lee-richards",
                Algorithm::ShrakeRupley => "shrake-rupley",
            }
        )
    }
}

/// Settings shared by both SASA algorithms.
///
/// Each algorithm only reads its own resolution field; the other is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    pub algorithm: Algorithm,
    /// Solvent probe radius in Angstroms, added to every atom radius.
    pub probe_radius: f64,
    /// Test points per atom for Shrake-Rupley.
    pub shrake_rupley_n_points: usize,
    /// Slices per atom diameter for Lee-Richards.
    pub lee_richards_n_slices: usize,
    /// Worker threads; `0` and `1` both mean the calling thread only.
    pub n_threads: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            probe_radius: DEFAULT_PROBE_RADIUS,
            shrake_rupley_n_points: DEFAULT_SHRAKE_RUPLEY_N_POINTS,
            lee_richards_n_slices: DEFAULT_LEE_RICHARDS_N_SLICES,
            n_threads: DEFAULT_N_THREADS,
        }
    }
}

impl Parameters {
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::new()
    }

    pub fn load(path: &Path) -> Result<Self, ParameterLoadError> {
        let origin = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ParameterLoadError::Io {
            path: origin.clone(),
            source: e,
        })?;
        Self::parse(&content, &origin)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ParameterLoadError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ParameterLoadError> {
        let params: Parameters = toml::from_str(content).map_err(|e| ParameterLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        params.validate().map_err(|e| ParameterLoadError::Invalid {
            path: origin.to_string(),
            source: e,
        })?;
        Ok(params)
    }

    /// Checks the fields every algorithm depends on.
    ///
    /// The resolution of the algorithm that is not selected is checked as well, so a
    /// `Parameters` value that validates can be handed to either engine.
    pub fn validate(&self) -> Result<(), SasaError> {
        if !self.probe_radius.is_finite() || self.probe_radius < 0.0 {
            return Err(SasaError::Configuration(format!(
                "probe radius must be finite and non-negative, got {}",
                self.probe_radius
            )));
        }
        if self.shrake_rupley_n_points == 0 {
            return Err(SasaError::Configuration(
                "Shrake-Rupley needs at least one test point per atom".to_string(),
            ));
        }
        if self.lee_richards_n_slices == 0 {
            return Err(SasaError::Configuration(
                "Lee-Richards needs at least one slice per atom".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of worker threads to actually use, mapping `0` to `1`.
    pub fn effective_threads(&self) -> usize {
        self.n_threads.max(1)
    }
}

#[derive(Debug, Error)]
pub enum ParameterLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid parameters in '{path}': {source}")]
    Invalid { path: String, source: SasaError },
}

#[derive(Default)]
pub struct ParametersBuilder {
    algorithm: Option<Algorithm>,
    probe_radius: Option<f64>,
    shrake_rupley_n_points: Option<usize>,
    lee_richards_n_slices: Option<usize>,
    n_threads: Option<usize>,
}

impl ParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }
    pub fn probe_radius(mut self, radius: f64) -> Self {
        self.probe_radius = Some(radius);
        self
    }
    pub fn shrake_rupley_n_points(mut self, n: usize) -> Self {
        self.shrake_rupley_n_points = Some(n);
        self
    }
    pub fn lee_richards_n_slices(mut self, n: usize) -> Self {
        self.lee_richards_n_slices = Some(n);
        self
    }
    pub fn n_threads(mut self, n: usize) -> Self {
        self.n_threads = Some(n);
        self
    }

    /// Fills unset fields from [`Parameters::default`] and validates the result.
    pub fn build(self) -> Result<Parameters, SasaError> {
        let defaults = Parameters::default();
        let params = Parameters {
            algorithm: self.algorithm.unwrap_or(defaults.algorithm),
            probe_radius: self.probe_radius.unwrap_or(defaults.probe_radius),
            shrake_rupley_n_points: self
                .shrake_rupley_n_points
                .unwrap_or(defaults.shrake_rupley_n_points),
            lee_richards_n_slices: self
                .lee_richards_n_slices
                .unwrap_or(defaults.lee_richards_n_slices),
            n_threads: self.n_threads.unwrap_or(defaults.n_threads),
        };
        params.validate()?;
        Ok(params)
    }
}
