use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "quicktask")]
#[command(about = "Turn free-form text into tasks with deadlines and priorities")]
#[command(long_about = "quicktask - quick-add task parsing

Parses free-form text the way the quick-add box, the Telegram bot and the
ingestion webhook do: one deadline phrase and one priority keyword are
pulled out, and whatever is left becomes the title.

QUICK START:
  quicktask parse \"Call mom tomorrow\"          Show what would be extracted
  quicktask add \"Urgent: Fix production bug\"   Validate and print the task payload

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

LOGGING:
  Set QUICKTASK_LOG (e.g. QUICKTASK_LOG=debug) to see which phrases matched.")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Path to the config file
    #[arg(long, global = true, env = "QUICKTASK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse text and show the extracted title, deadline and priority
    ///
    /// Nothing is validated or created; blank input prints an empty title.
    ///
    /// # Examples
    ///
    ///   quicktask parse "Call mom tomorrow"
    ///   quicktask parse "Submit report by Friday" -o json
    ///   quicktask parse "tomorrow urgent" --now 2025-12-10T08:00:00Z
    ///
    /// # Supported Patterns
    ///
    ///   Deadlines:  today, tonight, this evening, tomorrow, tmr, tmrw,
    ///               next week, this week, end of week, on/by/before <weekday>
    ///   Priority:   urgent, asap, critical, emergency, immediately (10)
    ///               important, high priority, high, must (7)
    ///               medium priority, moderate, should (5)
    ///               low priority, low, whenever, someday, maybe (2)
    #[command(alias = "p")]
    Parse(ParseArgs),

    /// Validate text as a quick-add request and print the task payload
    ///
    /// Applies the input length limit and the title validity check, then
    /// prints the payload the task store would receive. Rejected input
    /// exits with status 2.
    ///
    /// # Examples
    ///
    ///   quicktask add "Urgent: Fix production bug"
    ///   quicktask add "Call mom tomorrow" -o json
    #[command(alias = "a")]
    Add(ParseArgs),

    /// Generate shell completions
    ///
    /// Example: quicktask completions bash > ~/.bash_completion.d/quicktask
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments shared by `parse` and `add`.
#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// The task text in natural language
    pub text: String,

    /// Resolve deadlines against this instant instead of the current time
    /// (RFC 3339, e.g. 2025-12-10T08:00:00+01:00)
    #[arg(long)]
    pub now: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommand() {
        let cli = Cli::try_parse_from(["quicktask", "parse", "Call mom tomorrow"]).unwrap();
        match cli.command {
            Commands::Parse(args) => {
                assert_eq!(args.text, "Call mom tomorrow");
                assert!(args.now.is_none());
            },
            _ => panic!("expected parse"),
        }
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_global_output_after_subcommand() {
        let cli = Cli::try_parse_from([
            "quicktask",
            "add",
            "Call mom",
            "--now",
            "2025-12-10T08:00:00Z",
            "-o",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Commands::Add(args) => assert_eq!(args.now.as_deref(), Some("2025-12-10T08:00:00Z")),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_alias() {
        let cli = Cli::try_parse_from(["quicktask", "p", "x"]).unwrap();
        assert!(matches!(cli.command, Commands::Parse(_)));
    }
}
