//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::Project;

/// Kotoba configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default operator attribution for create/edit
    pub operator: Option<String>,

    /// Generative Language API key for `kotoba explain`
    pub api_key: Option<String>,

    /// Model used by `kotoba explain`
    pub model: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/kotoba/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Project config (.kotoba/config.yaml)
        if let Ok(project) = Project::discover() {
            let project_config_path = project.kotoba_dir().join("config.yaml");
            if project_config_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&project_config_path) {
                    if let Ok(project_config) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(project_config);
                    }
                }
            }
        }

        // 4. Environment variables
        if let Ok(operator) = std::env::var("KOTOBA_OPERATOR") {
            config.operator = Some(operator);
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("KOTOBA_MODEL") {
            config.model = Some(model);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "kotoba")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.operator.is_some() {
            self.operator = other.operator;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
    }

    /// Get the operator name, falling back to git config or username
    pub fn operator(&self) -> String {
        if let Some(ref operator) = self.operator {
            return operator.clone();
        }

        // Try git config
        if let Ok(output) = std::process::Command::new("git")
            .args(["config", "user.name"])
            .output()
        {
            if output.status.success() {
                let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !name.is_empty() {
                    return name;
                }
            }
        }

        // Fall back to username
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }

    /// Get the API key for the explanation service, if configured
    pub fn api_key(&self) -> Option<String> {
        self.api_key.clone()
    }

    /// Get the explanation model
    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| "gemini-2.5-flash".to_string())
    }
}
