use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SfError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub distribute: DistributeConfig,
    #[serde(default)]
    pub validator: ValidatorConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            sweep: SweepConfig::default(),
            distribute: DistributeConfig::default(),
            validator: ValidatorConfig::default(),
            check: CheckConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the global config-dir file, then
    /// the project `skillfan.toml`, then environment overrides. An explicit
    /// path (flag or `SF_CONFIG`) replaces both file layers.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        Self::load_layered(explicit_path, root, dirs::config_dir().as_deref())
    }

    fn load_layered(
        explicit_path: Option<&Path>,
        root: &Path,
        config_dir: Option<&Path>,
    ) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SF_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global(config_dir)? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_global(config_dir: Option<&Path>) -> Result<Option<ConfigPatch>> {
        let Some(config_dir) = config_dir else {
            return Ok(None);
        };
        Self::load_patch(&config_dir.join("skillfan/config.toml"))
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&root.join("skillfan.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SfError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SfError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.paths {
            self.paths.merge(patch);
        }
        if let Some(patch) = patch.sweep {
            self.sweep.merge(patch);
        }
        if let Some(patch) = patch.distribute {
            self.distribute.merge(patch);
        }
        if let Some(patch) = patch.validator {
            self.validator.merge(patch);
        }
        if let Some(patch) = patch.check {
            self.check.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_string("SF_SOURCE_DIR") {
            self.paths.source_dir = value;
        }
        if let Some(value) = env_string("SF_SKILLS_DIR") {
            self.paths.skills_dir = value;
        }
        if let Some(value) = env_string("SF_CANONICAL_DIR") {
            self.paths.canonical_dir = Some(value);
        }
        if let Some(values) = env_list("SF_SWEEP_PREFIXES") {
            self.sweep.prefixes = values;
        }
        if let Some(value) = env_string("SF_PREFIX") {
            self.distribute.prefix = value;
        }
        if let Some(value) = env_string("SF_VALIDATOR_VENV") {
            self.validator.venv_dir = value;
        }
        if let Some(value) = env_string("SF_EXPECTED_VERSION") {
            self.check.expected_version = Some(value);
        }
    }
}

/// Directory layout, relative to the project root unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Compiled skills that get distributed (one subdirectory per skill).
    #[serde(default)]
    pub source_dir: String,
    /// Authored skills used by validate/catalog/check-version.
    #[serde(default)]
    pub skills_dir: String,
    /// Canonical per-user directory; defaults to `~/.agents/skills`.
    #[serde(default)]
    pub canonical_dir: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: "dist/skills".to_string(),
            skills_dir: "skills".to_string(),
            canonical_dir: None,
        }
    }
}

impl PathsConfig {
    fn merge(&mut self, patch: PathsPatch) {
        if let Some(value) = patch.source_dir {
            self.source_dir = value;
        }
        if let Some(value) = patch.skills_dir {
            self.skills_dir = value;
        }
        if let Some(value) = patch.canonical_dir {
            self.canonical_dir = Some(value);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Entry-name prefixes removed from canonical and target directories
    /// before installing. The list accumulates across renames so old
    /// prefixes keep getting cleaned up.
    #[serde(default)]
    pub prefixes: Vec<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            prefixes: vec![
                "busirocket-".to_string(),
                "brp-".to_string(),
                "brp".to_string(),
                "react-doctor".to_string(),
            ],
        }
    }
}

impl SweepConfig {
    fn merge(&mut self, patch: SweepPatch) {
        if let Some(values) = patch.prefixes {
            self.prefixes = values;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributeConfig {
    /// Discovery prefix: only source subdirectories starting with this are
    /// distributed. Empty matches every subdirectory.
    #[serde(default)]
    pub prefix: String,
}

impl Default for DistributeConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
        }
    }
}

impl DistributeConfig {
    fn merge(&mut self, patch: DistributePatch) {
        if let Some(value) = patch.prefix {
            self.prefix = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Project-local venv holding the skills-ref validator.
    #[serde(default)]
    pub venv_dir: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            venv_dir: ".venv-validate".to_string(),
        }
    }
}

impl ValidatorConfig {
    fn merge(&mut self, patch: ValidatorPatch) {
        if let Some(value) = patch.venv_dir {
            self.venv_dir = value;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Version every skill's `metadata.version` must match.
    #[serde(default)]
    pub expected_version: Option<String>,
}

impl CheckConfig {
    fn merge(&mut self, patch: CheckPatch) {
        if let Some(value) = patch.expected_version {
            self.expected_version = Some(value);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub paths: Option<PathsPatch>,
    pub sweep: Option<SweepPatch>,
    pub distribute: Option<DistributePatch>,
    pub validator: Option<ValidatorPatch>,
    pub check: Option<CheckPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PathsPatch {
    pub source_dir: Option<String>,
    pub skills_dir: Option<String>,
    pub canonical_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SweepPatch {
    pub prefixes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DistributePatch {
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ValidatorPatch {
    pub venv_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CheckPatch {
    pub expected_version: Option<String>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(key).ok().map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(ToString::to_string)
            .collect()
    })
}
