//! Project configuration.
//!
//! A project is the directory holding `.config/entable.styx`. The file may
//! name the entity definitions file, relative to that directory:
//!
//! ```styx
//! entities schema/entities.styx
//! ```

use std::path::{Path, PathBuf};

use facet::Facet;
use thiserror::Error;

/// Config file location, relative to the project root.
const CONFIG_FILE: &str = ".config/entable.styx";

/// Contents of `.config/entable.styx`.
#[derive(Debug, Facet)]
struct Config {
    entities: Option<String>,
}

/// A discovered project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Path of the config file that was loaded
    pub config_path: PathBuf,

    /// Entity definitions file, already resolved against the project root
    pub entities: Option<PathBuf>,
}

/// Find the project enclosing `start` and resolve its entities file.
pub fn load_from(start: &Path) -> Result<Project, ConfigError> {
    let root = find_project_root(start)?;
    let config_path = root.join(CONFIG_FILE);
    let content =
        std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io(e.to_string()))?;
    let config = parse(&content)?;

    let entities = config.entities.map(|entities| root.join(entities));
    tracing::debug!(
        path = %config_path.display(),
        entities = ?entities,
        "loaded config"
    );

    Ok(Project {
        config_path,
        entities,
    })
}

fn parse(content: &str) -> Result<Config, ConfigError> {
    facet_styx::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Nearest ancestor of `start` (itself included) holding the config file.
fn find_project_root(start: &Path) -> Result<&Path, ConfigError> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE).is_file())
        .ok_or(ConfigError::NotFound)
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No .config/entable.styx found in current directory or any parent")]
    NotFound,

    #[error("Failed to read .config/entable.styx: {0}")]
    Io(String),

    #[error("Failed to parse .config/entable.styx: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch::ScratchDir;
    use facet_testhelpers::test;

    #[test]
    fn parse_entities_path() {
        let config = parse("entities schema/entities.styx").unwrap();
        assert_eq!(config.entities.as_deref(), Some("schema/entities.styx"));
    }

    #[test]
    fn nested_start_finds_ancestor_config() {
        let dir = ScratchDir::new("nested");
        dir.write(CONFIG_FILE, "entities schema/entities.styx");
        let start = dir.mkdir("src/models/deep");

        let project = load_from(&start).unwrap();
        assert_eq!(project.config_path, dir.path().join(CONFIG_FILE));
        assert_eq!(
            project.entities,
            Some(dir.path().join("schema/entities.styx"))
        );
    }

    #[test]
    fn nearest_config_wins() {
        let dir = ScratchDir::new("nearest");
        dir.write(CONFIG_FILE, "entities outer.styx");
        dir.write("inner/.config/entable.styx", "entities inner.styx");
        let start = dir.mkdir("inner/src");

        let project = load_from(&start).unwrap();
        assert_eq!(project.entities, Some(dir.path().join("inner/inner.styx")));
    }

    #[test]
    fn no_entities_configured() {
        let dir = ScratchDir::new("no-entities");
        dir.write(CONFIG_FILE, "");

        let project = load_from(dir.path()).unwrap();
        assert_eq!(project.entities, None);
    }

    #[test]
    fn missing_config_is_not_found() {
        let dir = ScratchDir::new("missing");
        let start = dir.mkdir("a/b");

        // A config above the temp dir would be found first; only assert when
        // the walk really reaches the filesystem root.
        if std::env::temp_dir()
            .ancestors()
            .all(|d| !d.join(CONFIG_FILE).is_file())
        {
            assert!(matches!(load_from(&start), Err(ConfigError::NotFound)));
        }
    }

    #[test]
    fn unparseable_config_is_parse_error() {
        let dir = ScratchDir::new("unparseable");
        dir.write(CONFIG_FILE, "entities {");

        let err = load_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn config_directory_named_like_file_is_skipped() {
        let dir = ScratchDir::new("not-a-file");
        dir.mkdir(CONFIG_FILE);
        let start = dir.mkdir("src");

        match load_from(&start) {
            Ok(project) => assert_ne!(project.config_path, dir.path().join(CONFIG_FILE)),
            Err(err) => assert!(matches!(err, ConfigError::NotFound), "got {err:?}"),
        }
    }
}
