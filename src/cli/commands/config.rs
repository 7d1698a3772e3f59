//! Config Command
//!
//! Manage docweave configuration.
//!
//! Usage:
//!   docweave config show [--path <project>] [-f json]
//!   docweave config path [--path <project>]
//!   docweave config init [-g] [--force]

use std::path::Path;

use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::types::{DocError, Result};

/// Print the effective configuration for a project
pub fn show(project: &Path, format: &str) -> Result<()> {
    let as_json = match format {
        "json" => true,
        "toml" | "text" => false,
        other => {
            return Err(DocError::Config(format!(
                "Unknown format: {}. Valid values: toml, json",
                other
            )));
        }
    };
    let config = ConfigLoader::load(Some(project))?;
    println!("{}", ConfigLoader::render(&config, as_json)?);
    Ok(())
}

/// Print configuration file locations and whether they exist
pub fn path(project: &Path, output: &Output) -> Result<()> {
    let mark = |p: &Path| if p.exists() { "" } else { " (not found)" };

    match ConfigLoader::global_config_path() {
        Some(global) => output.info(&format!("Global:  {}{}", global.display(), mark(&global))),
        None => output.warning("Global:  cannot determine config directory"),
    }
    let project = ConfigLoader::project_config_path(project);
    output.info(&format!("Project: {}{}", project.display(), mark(&project)));
    Ok(())
}

/// Write a commented config template
pub fn init(project: &Path, global: bool, force: bool, output: &Output) -> Result<()> {
    let target = if global {
        ConfigLoader::global_config_path().ok_or_else(|| {
            DocError::Config("cannot determine global config directory".to_string())
        })?
    } else {
        ConfigLoader::project_config_path(project)
    };

    if ConfigLoader::init(&target, force)? {
        output.success(&format!("Initialized configuration: {}", target.display()));
    } else {
        output.warning(&format!(
            "Config exists: {} (use --force to overwrite)",
            target.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_project_config_respects_force() {
        let dir = TempDir::new().unwrap();
        let output = Output::new().quiet(true);
        let target = ConfigLoader::project_config_path(dir.path());

        init(dir.path(), false, false, &output).unwrap();
        assert!(target.is_file());

        std::fs::write(&target, "# edited\n").unwrap();
        init(dir.path(), false, false, &output).unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "# edited\n");

        init(dir.path(), false, true, &output).unwrap();
        assert_ne!(std::fs::read_to_string(&target).unwrap(), "# edited\n");
    }

    #[test]
    fn test_show_rejects_unknown_format() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(show(dir.path(), "xml"), Err(DocError::Config(_))));
    }
}
