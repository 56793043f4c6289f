use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use corestack::cli::{self, CommonArgs};
use corestack::style::{ExtractionMode, TargetPlatform};

#[derive(Parser)]
#[command(name = "corestack", version)]
#[command(about = "Build bootstrap prompts and design systems for code-generation tools", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a project (or agent) draft into a bootstrap prompt
    Render {
        /// Project or agent JSON file
        #[arg(long)]
        project: String,

        /// Treat the file as an agent draft
        #[arg(long)]
        agent: bool,

        /// Style system JSON to append as style guidelines
        #[arg(long)]
        style: Option<String>,

        /// Target platform for the style guidelines (lovable, vibe, cursor, generic)
        #[arg(long, default_value = "generic")]
        platform: TargetPlatform,
    },

    /// Expand a one-line idea into a project skeleton
    MagicFill {
        /// The project idea
        idea: String,

        /// Existing project JSON to merge into (non-destructively)
        #[arg(long)]
        project: Option<String>,

        /// Output file (defaults to the project file, or stdout)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Extract a style system from CSS, a description, or an image
    AnalyseStyle {
        /// Input mode: css, description, image
        #[arg(long)]
        mode: ExtractionMode,

        /// Source file
        source: String,

        /// Target platform (lovable, vibe, cursor, generic)
        #[arg(long, default_value = "generic")]
        platform: TargetPlatform,

        /// Write the extracted style system JSON here
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Generate HTML for one component using a style system
    GenerateComponent {
        /// Style system JSON file
        #[arg(long)]
        style: String,

        /// Component name (e.g., "Button")
        name: String,

        /// Visual context to match (overrides the extracted observation)
        #[arg(long)]
        context: Option<String>,

        /// Free-text instruction, prioritized over the tokens
        #[arg(long)]
        instruction: Option<String>,
    },

    /// Report credential presence and probe the candidate models
    Diagnostics,

    /// Run the HTTP API
    Serve {
        /// Bind address (defaults to server.bind from config)
        #[arg(long)]
        bind: Option<String>,

        /// JSON file with learning topics for course generation
        #[arg(long)]
        topics: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let common = cli.common;

    match cli.command {
        Commands::Render {
            project,
            agent,
            style,
            platform,
        } => cli::render::run(project, agent, style, platform)?,
        Commands::MagicFill {
            idea,
            project,
            output,
        } => cli::magic_fill::run(common, idea, project, output).await?,
        Commands::AnalyseStyle {
            mode,
            source,
            platform,
            output,
        } => cli::style::analyse(common, mode, source, platform, output).await?,
        Commands::GenerateComponent {
            style,
            name,
            context,
            instruction,
        } => cli::style::component(common, style, name, context, instruction).await?,
        Commands::Diagnostics => cli::diagnostics::run(common).await?,
        Commands::Serve { bind, topics } => cli::serve::run(common, bind, topics).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_render_defaults() {
        let cli = Cli::try_parse_from(["corestack", "render", "--project", "p.json"]).unwrap();
        match cli.command {
            Commands::Render {
                project,
                agent,
                style,
                platform,
            } => {
                assert_eq!(project, "p.json");
                assert!(!agent);
                assert!(style.is_none());
                assert_eq!(platform, TargetPlatform::Generic);
            }
            _ => panic!("expected render"),
        }
        assert!(!cli.common.dry_run);
    }

    #[test]
    fn test_parse_analyse_style_with_global_flags() {
        let cli = Cli::try_parse_from([
            "corestack",
            "analyse-style",
            "--mode",
            "image",
            "shot.png",
            "--platform",
            "cursor",
            "--model",
            "gemini-exp-1206",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::AnalyseStyle {
                mode,
                source,
                platform,
                output,
            } => {
                assert_eq!(mode, ExtractionMode::Image);
                assert_eq!(source, "shot.png");
                assert_eq!(platform, TargetPlatform::Cursor);
                assert!(output.is_none());
            }
            _ => panic!("expected analyse-style"),
        }
        assert!(cli.common.dry_run);
        assert_eq!(cli.common.model.as_deref(), Some("gemini-exp-1206"));
    }

    #[test]
    fn test_parse_unknown_mode_fails() {
        let result = Cli::try_parse_from(["corestack", "analyse-style", "--mode", "pdf", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_magic_fill() {
        let cli = Cli::try_parse_from([
            "corestack",
            "magic-fill",
            "pet sitting app",
            "--project",
            "p.json",
            "-o",
            "out.json",
        ])
        .unwrap();
        match cli.command {
            Commands::MagicFill {
                idea,
                project,
                output,
            } => {
                assert_eq!(idea, "pet sitting app");
                assert_eq!(project.as_deref(), Some("p.json"));
                assert_eq!(output.as_deref(), Some("out.json"));
            }
            _ => panic!("expected magic-fill"),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "corestack",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--topics",
            "topics.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve { bind, topics } => {
                assert_eq!(bind.as_deref(), Some("0.0.0.0:8080"));
                assert_eq!(topics.as_deref(), Some("topics.json"));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_missing_subcommand() {
        assert!(Cli::try_parse_from(["corestack"]).is_err());
    }
}
