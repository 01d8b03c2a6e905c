//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::config::SettingsOverrides;

/// Audiobook segment generator.
///
/// Reads detected silences from an XML file, groups them into chapters, and
/// writes playback segments as JSON.
#[derive(Debug, Parser)]
#[command(name = "sgen", version, about, long_about = None)]
pub struct Cli {
    /// XML file with the detected silences.
    #[arg(short, long)]
    pub source: PathBuf,

    /// Silence duration in milliseconds that marks a chapter transition.
    #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..))]
    pub transition: Option<i64>,

    /// Minimum silence in milliseconds around a part before a long chapter
    /// may be cut there.
    #[arg(short, long, value_parser = clap::value_parser!(i64).range(0..))]
    pub min_silence: Option<i64>,

    /// Segment duration in milliseconds after which a chapter is broken up.
    #[arg(short = 'd', long = "max-duration", value_parser = clap::value_parser!(i64).range(0..))]
    pub max_duration: Option<i64>,

    /// Write the result to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show the processing steps on stderr.
    #[arg(long, visible_alias = "verbose")]
    pub debug: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Settings given on the command line, taking precedence over every
    /// other source.
    pub const fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            transition: self.transition,
            min_silence: self.min_silence,
            max_segment: self.max_duration,
            debug: if self.debug { Some(true) } else { None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from([
            "sgen", "-s", "in.xml", "-t", "2000", "-m", "500", "-d", "60000", "-o", "out.json",
        ])
        .unwrap();

        assert_eq!(cli.source, PathBuf::from("in.xml"));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        let overrides = cli.overrides();
        assert_eq!(overrides.transition, Some(2_000));
        assert_eq!(overrides.min_silence, Some(500));
        assert_eq!(overrides.max_segment, Some(60_000));
        assert_eq!(overrides.debug, None);
    }

    #[test]
    fn parses_long_flags() {
        let cli = Cli::try_parse_from([
            "sgen",
            "--source",
            "in.xml",
            "--transition",
            "2000",
            "--min-silence",
            "500",
            "--max-duration",
            "60000",
            "--debug",
        ])
        .unwrap();

        assert!(cli.debug);
        assert_eq!(cli.overrides().debug, Some(true));
        assert_eq!(cli.overrides().max_segment, Some(60_000));
    }

    #[test]
    fn source_is_required() {
        assert!(Cli::try_parse_from(["sgen", "-t", "2000"]).is_err());
    }

    #[test]
    fn transition_must_be_positive() {
        assert!(Cli::try_parse_from(["sgen", "-s", "in.xml", "-t", "0"]).is_err());
        assert!(Cli::try_parse_from(["sgen", "-s", "in.xml", "-t", "abc"]).is_err());
    }
}
