use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, SfError};
use crate::registry::{self, Target};

pub struct AppContext {
    /// Project root: where dist/skills and skillfan.toml live.
    pub root: PathBuf,
    /// Home directory used to build the target registry. Injected via
    /// `SF_HOME` so tests can run against a fake home.
    pub home: PathBuf,
    pub config: Config,
    pub registry: Vec<Target>,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let home = Self::resolve_home()?;
        let config = Config::load(cli.config.as_deref(), &root)?;
        let registry = registry::targets(&home);

        Ok(Self {
            root,
            home,
            config,
            registry,
            robot_mode: cli.robot,
        })
    }

    /// Compiled-skills directory the fan-out reads from.
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.source_dir)
    }

    /// Authored-skills directory used by validate/catalog/check-version.
    #[must_use]
    pub fn skills_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.skills_dir)
    }

    #[must_use]
    pub fn canonical_dir(&self) -> PathBuf {
        self.config
            .paths
            .canonical_dir
            .as_deref()
            .map_or_else(|| registry::canonical_skills_dir(&self.home), |dir| self.resolve(dir))
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("SF_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, "skillfan.toml") {
            return Ok(found);
        }
        Ok(cwd)
    }

    fn resolve_home() -> Result<PathBuf> {
        if let Ok(home) = std::env::var("SF_HOME") {
            return Ok(PathBuf::from(home));
        }
        dirs::home_dir().ok_or_else(|| SfError::Config("home directory not found".to_string()))
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(name).is_file() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_keeps_absolute_paths() {
        let ctx_root = PathBuf::from("/proj");
        let ctx = AppContext {
            root: ctx_root.clone(),
            home: PathBuf::from("/home/u"),
            config: Config::default(),
            registry: Vec::new(),
            robot_mode: false,
        };
        assert_eq!(ctx.resolve("/abs/skills"), PathBuf::from("/abs/skills"));
        assert_eq!(ctx.resolve("dist/skills"), ctx_root.join("dist/skills"));
    }

    #[test]
    fn canonical_defaults_under_home() {
        let ctx = AppContext {
            root: PathBuf::from("/proj"),
            home: PathBuf::from("/home/u"),
            config: Config::default(),
            registry: Vec::new(),
            robot_mode: false,
        };
        assert_eq!(
            ctx.canonical_dir(),
            PathBuf::from("/home/u/.agents/skills")
        );
    }

    #[test]
    fn find_upwards_stops_at_first_match() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("a/skillfan.toml"), "").unwrap();

        let found = find_upwards(&nested, "skillfan.toml").unwrap();
        assert_eq!(found, dir.path().join("a"));
    }
}
