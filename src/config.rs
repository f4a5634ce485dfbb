use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "profile.json";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_size: [f32; 2],
    /// Research document offered for download in the portfolio.
    pub document_path: PathBuf,
    /// Bounds of the metric range slider.
    pub metric_range: [f64; 2],
    pub profile: Profile,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: [1200.0, 800.0],
            document_path: PathBuf::from("assets/research.pdf"),
            metric_range: [0.0, 10.0],
            profile: Profile::default(),
        }
    }
}

/// Text shown on the static profile pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub degree: String,
    pub institution: String,
    pub status: String,
    pub email: String,
    pub linkedin: Option<String>,
    pub summary: Vec<String>,
    pub research_areas: Vec<String>,
    pub research_output: Vec<String>,
    pub teaching: Vec<String>,
    pub skills: Vec<String>,
    pub availability: String,
}

impl Default for Profile {
    fn default() -> Self {
        let lines = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            name: "Kutloano Sikosana".into(),
            degree: "BSc Physics, BSc Physics Honours".into(),
            institution: "University of Pretoria".into(),
            status: "MSc Physics Candidate".into(),
            email: "name@example.com".into(),
            linkedin: None,
            summary: lines(&[
                "Physics graduate with a strong background in experimental and computational \
                 physics, with research experience in organic photovoltaics and nanomaterials. \
                 Current work focuses on incorporating metallic nanoparticles into nanoscale \
                 bulk heterojunctions to improve polymer solar cell efficiency, combining \
                 laboratory experimentation with simulation-based modelling.",
                "Demonstrated strengths in scientific writing, microscopy and microanalysis, \
                 numerical methods, and technical communication, supported by tutoring, \
                 mentoring, and leadership experience.",
            ]),
            research_areas: lines(&[
                "Organic Photovoltaics",
                "Metallic Nanoparticles and Nanocomposites",
                "Computational Physics and Modelling",
                "Statistical Mechanics and Optimisation",
            ]),
            research_output: lines(&[
                "Tiny Metals: electron microscopy review into the synthesis and \
                 characterisation of multi-element metallic nanoparticles",
                "Mn:Ni:Ce Nanocomposite-Enhanced Bulk Heterojunction Inverted Organic Solar Cells",
            ]),
            teaching: lines(&[
                "Computational Physics Tutor (PHY 255), University of Pretoria",
                "Physics Demonstrator (PHY 114M)",
                "Assisted students with debugging, numerical methods, and scientific reasoning",
            ]),
            skills: lines(&[
                "Python (NumPy, Pandas, Matplotlib)",
                "Genetic Algorithms and Optimisation",
                "SEM and EDS Microscopy",
                "Thin-Film and Bulk Heterojunction Fabrication",
                "Numerical Analysis and Scientific Computing",
            ]),
            availability: "Open to postgraduate research opportunities, academic collaboration, \
                           and funded MSc projects."
                .into(),
        }
    }
}

impl AppConfig {
    /// Parse a JSON config file. Missing keys fall back to defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        anyhow::ensure!(
            config.metric_range[0] <= config.metric_range[1],
            "metric_range lower bound {} exceeds upper bound {}",
            config.metric_range[0],
            config.metric_range[1]
        );
        Ok(config)
    }

    /// Load [`CONFIG_FILE`] from `dir` if it exists, otherwise use defaults.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            log::info!("Loading configuration from {}", path.display());
            Self::from_path(&path)
        } else {
            log::info!("No {CONFIG_FILE} found, using built-in defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "document_path": "docs/thesis.pdf", "profile": { "name": "A. Researcher" } }"#,
        )
        .unwrap();

        let config = AppConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.document_path, PathBuf::from("docs/thesis.pdf"));
        assert_eq!(config.profile.name, "A. Researcher");
        assert_eq!(config.profile.institution, "University of Pretoria");
        assert_eq!(config.metric_range, [0.0, 10.0]);
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.window_size, [1200.0, 800.0]);
    }

    #[test]
    fn inverted_metric_range_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "metric_range": [5.0, 1.0] }"#).unwrap();
        let err = AppConfig::from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("metric_range"));
    }
}
