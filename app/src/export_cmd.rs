use crate::cli::ExportArgs;
use crate::config::Config;
use anyhow::{Context, Result};
use resume_export::{DirectorySaver, ExportSettings, Exporter, SettingsManager};
use resume_model::ResumeData;
use std::path::{Path, PathBuf};

/// Load export settings from `path`, or defaults when no path is configured
pub fn load_settings(path: Option<&Path>) -> Result<ExportSettings> {
    let Some(path) = path else {
        return Ok(ExportSettings::default());
    };
    let mut manager = SettingsManager::new(path);
    let settings = manager
        .load_sync()
        .with_context(|| format!("Failed to load export settings from {}", path.display()))?;
    Ok(settings.clone())
}

/// Validate the input, then render each requested format into the output directory
pub fn run(args: &ExportArgs, config: &Config) -> Result<Vec<PathBuf>> {
    let contents = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let data: ResumeData =
        serde_json::from_str(&contents).with_context(|| "Failed to parse resume JSON")?;
    data.validate().with_context(|| "Resume data is invalid")?;

    let settings_path = args.settings.as_deref().or(config.export_settings.as_deref());
    let settings = load_settings(settings_path)?;
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| settings.output_dir.clone());

    let exporter = Exporter::new(settings, DirectorySaver::new(out_dir));
    args.format
        .formats()
        .iter()
        .map(|format| {
            exporter
                .export(*format, &data)
                .with_context(|| format!("Failed to export {}", format.filename()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FormatArg;
    use tempfile::TempDir;

    const JANE: &str = r#"{
        "personalInfo": {"fullName": "Jane Doe", "email": "jane@x.com", "phone": "1234567890"},
        "skills": ["Rust"]
    }"#;

    fn args(dir: &Path, input: &str, format: FormatArg) -> ExportArgs {
        let path = dir.join("resume.json");
        std::fs::write(&path, input).unwrap();
        ExportArgs {
            input: path,
            format,
            out_dir: Some(dir.join("out")),
            settings: None,
        }
    }

    #[test]
    fn test_exports_all_formats() {
        let temp_dir = TempDir::new().unwrap();
        let paths = run(&args(temp_dir.path(), JANE, FormatArg::All), &Config::default()).unwrap();
        assert_eq!(
            paths,
            vec![
                temp_dir.path().join("out").join("resume.pdf"),
                temp_dir.path().join("out").join("resume.docx"),
            ]
        );
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_invalid_input_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let invalid = JANE.replace("jane@x.com", "nope");
        let err = run(&args(temp_dir.path(), &invalid, FormatArg::Pdf), &Config::default()).unwrap_err();
        assert!(err.downcast_ref::<resume_model::ValidationError>().is_some());
        assert!(!temp_dir.path().join("out").exists());
    }

    #[test]
    fn test_settings_file_used() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("export.json");
        std::fs::write(&settings_path, r#"{"pdf":{"pageSize":"letter"}}"#).unwrap();

        let settings = load_settings(Some(&settings_path)).unwrap();
        assert_eq!(settings.pdf.page_size, resume_export::PageSize::Letter);
        assert_eq!(load_settings(None).unwrap(), ExportSettings::default());
    }
}
