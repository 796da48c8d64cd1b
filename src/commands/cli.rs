use clap::Parser;

/// How the commit gate gets its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmMode {
    Prompt,
    Yes,
    DryRun,
}

/// Command-line arguments for quakefeed
#[derive(Parser, Debug)]
#[command(name = "quakefeed")]
#[command(about = "Fetches new earthquakes from the USGS summary feeds")]
#[command(version)]
pub struct Cli {
    /// significant | 4.5 | 2.5 | 1.0 | all
    #[arg(short, long, default_value = "all")]
    pub level: String,

    /// hour | day | week | month
    #[arg(short, long, default_value = "day")]
    pub period: String,

    /// Commit without asking
    #[arg(short, long, conflicts_with = "dry_run")]
    pub yes: bool,

    /// Reconcile, report, then discard
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn confirm_mode(&self) -> ConfirmMode {
        if self.yes {
            ConfirmMode::Yes
        } else if self.dry_run {
            ConfirmMode::DryRun
        } else {
            ConfirmMode::Prompt
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("quakefeed").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_to_all_day_prompt() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.level, "all");
        assert_eq!(cli.period, "day");
        assert_eq!(cli.confirm_mode(), ConfirmMode::Prompt);
    }

    #[test]
    fn reads_flags() {
        let cli = parse(&["-l", "4.5", "--period=week", "-y"]).unwrap();
        assert_eq!((cli.level.as_str(), cli.period.as_str()), ("4.5", "week"));
        assert_eq!(cli.confirm_mode(), ConfirmMode::Yes);

        let cli = parse(&["--level", "significant", "-p", "month", "--dry-run"]).unwrap();
        assert_eq!((cli.level.as_str(), cli.period.as_str()), ("significant", "month"));
        assert_eq!(cli.confirm_mode(), ConfirmMode::DryRun);
    }

    #[test]
    fn yes_and_dry_run_conflict() {
        let err = parse(&["-y", "-n"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn help_and_errors() {
        assert_eq!(parse(&["-h"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert!(parse(&["-l"]).is_err());
        assert_eq!(parse(&["--verbose"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn values_are_not_validated_here() {
        let cli = parse(&["-l", "9.9"]).unwrap();
        assert_eq!(cli.level, "9.9");
    }
}
