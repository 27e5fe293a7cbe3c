//! Glossary project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents a Kotoba glossary project
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .kotoba/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current =
            std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            let kotoba_dir = current.join(".kotoba");
            if kotoba_dir.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Resolve a project: an explicit root if given, discovery otherwise
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ProjectError> {
        match explicit {
            Some(path) => Self::discover_from(path),
            None => Self::discover(),
        }
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let kotoba_dir = root.join(".kotoba");
        if kotoba_dir.exists() {
            return Err(ProjectError::AlreadyExists(root.clone()));
        }

        Self::write_structure(&root)?;
        Ok(Self { root })
    }

    /// Force initialization even if .kotoba/ exists
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::write_structure(&root)?;
        Ok(Self { root })
    }

    fn write_structure(root: &Path) -> Result<(), ProjectError> {
        let kotoba_dir = root.join(".kotoba");
        std::fs::create_dir_all(&kotoba_dir)
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        let config_path = kotoba_dir.join("config.yaml");
        if !config_path.exists() {
            std::fs::write(&config_path, Self::default_config())
                .map_err(|e| ProjectError::IoError(e.to_string()))?;
        }

        Ok(())
    }

    fn default_config() -> &'static str {
        r#"# Kotoba Project Configuration

# Default operator attribution for new/edited terms
# (can be overridden by global config or KOTOBA_OPERATOR)
# operator: ""

# Generative Language API key for `kotoba explain`
# (GEMINI_API_KEY takes precedence)
# api_key: ""

# Model used by `kotoba explain`
# model: gemini-2.5-flash
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .kotoba configuration directory
    pub fn kotoba_dir(&self) -> PathBuf {
        self.root.join(".kotoba")
    }

    /// Fixed location of the durable term dataset
    pub fn terms_path(&self) -> PathBuf {
        self.kotoba_dir().join("terms.json")
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a Kotoba project (searched from {searched_from:?}). Run 'kotoba init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("Kotoba project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.kotoba_dir().exists());
        assert!(project.kotoba_dir().join("config.yaml").exists());
        assert_eq!(
            project.terms_path(),
            project.kotoba_dir().join("terms.json")
        );
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
    }

    #[test]
    fn test_project_discover_finds_kotoba_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_kotoba_dir() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }
}
