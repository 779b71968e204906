use clap::{Args, Parser, Subcommand, ValueEnum};
use resume_export::ExportFormat;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs the resume CRUD, upload and export HTTP API
    Serve(ServeArgs),
    /// Renders a resume JSON file to resume.pdf and/or resume.docx
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on, overriding PORT
    #[clap(long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Resume data as JSON
    #[clap(long)]
    pub input: PathBuf,

    #[clap(long, value_enum, default_value_t = FormatArg::All)]
    pub format: FormatArg,

    /// Output directory, overriding the settings file
    #[clap(long)]
    pub out_dir: Option<PathBuf>,

    /// Export settings JSON, overriding EXPORT_SETTINGS
    #[clap(long)]
    pub settings: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Pdf,
    Docx,
    All,
}

impl FormatArg {
    pub fn formats(self) -> &'static [ExportFormat] {
        match self {
            FormatArg::Pdf => &[ExportFormat::Pdf],
            FormatArg::Docx => &[ExportFormat::Docx],
            FormatArg::All => &ExportFormat::ALL,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_defaults() {
        let cli = Cli::parse_from(["resume-builder", "export", "--input", "resume.json"]);
        let Commands::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.input, PathBuf::from("resume.json"));
        assert_eq!(args.format, FormatArg::All);
        assert_eq!(args.format.formats(), &ExportFormat::ALL);
        assert!(args.out_dir.is_none());
    }

    #[test]
    fn test_export_format() {
        let cli = Cli::parse_from([
            "resume-builder",
            "export",
            "--input",
            "r.json",
            "--format",
            "docx",
            "--out-dir",
            "out",
        ]);
        let Commands::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.format.formats(), &[ExportFormat::Docx]);
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_serve_port() {
        let cli = Cli::parse_from(["resume-builder", "serve", "--port", "8080"]);
        assert!(matches!(cli.command, Commands::Serve(ServeArgs { port: Some(8080) })));
    }
}
