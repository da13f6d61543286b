// crates/iploc-cli/src/args.rs

use clap::{Parser, ValueEnum};

/// CLI arguments for iploc
#[derive(Debug, Parser)]
#[command(
    name = "iploc",
    version,
    about = "Resolve IP addresses and countries against a range-based geolocation dataset"
)]
pub struct CliArgs {
    /// IP addresses or country names/codes to resolve
    pub query: Vec<String>,

    /// List the countries present in the dataset
    #[arg(long)]
    pub list: bool,

    /// Show every record in the dataset
    #[arg(long)]
    pub all: bool,

    /// Skip the first N matches
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Return at most N matches (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    /// Output format for resolved records
    #[arg(long, value_enum, default_value_t = OutputFormat::Default)]
    pub format: OutputFormat,

    /// Suppress the banner and per-query headers
    #[arg(long)]
    pub silent: bool,

    /// Don't print the result summary
    #[arg(long = "no-summary", alias = "ns")]
    pub no_summary: bool,

    /// Path to the dataset file
    #[arg(short = 'i', long, default_value = "geoip.csv")]
    pub input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored human-readable lines
    Default,
    /// One JSON object per record
    Json,
    /// 7-field CSV rows with dotted-decimal addresses
    Csv,
}

impl CliArgs {
    /// Fatal argument problems, checked before any dataset access.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.query.is_empty() && !self.all && !self.list {
            anyhow::bail!("nothing to do: pass a query or use --list/--all (see --help)");
        }
        Ok(())
    }

    /// Non-fatal oddities worth telling the user about.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.query.is_empty() && (self.all || self.list) {
            warnings.push("queries take precedence; --list/--all have no effect".to_string());
        } else if self.all && self.list {
            warnings.push("--list takes precedence; --all has no effect".to_string());
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(argv).expect("argv should parse")
    }

    #[test]
    fn defaults_mean_no_offset_and_no_limit() {
        let args = parse(&["iploc", "8.8.8.8"]);
        assert_eq!(args.offset, 0);
        assert_eq!(args.limit, 0);
        assert_eq!(args.format, OutputFormat::Default);
        assert_eq!(args.input, "geoip.csv");
        assert!(!args.silent && !args.no_summary);
        assert_eq!(args.query, ["8.8.8.8"]);
    }

    #[test]
    fn multiple_query_tokens_are_collected_in_order() {
        let args = parse(&["iploc", "8.8.8.8", "AU", "Germany"]);
        assert_eq!(args.query, ["8.8.8.8", "AU", "Germany"]);
    }

    #[test]
    fn pagination_and_format_flags_parse() {
        let args = parse(&[
            "iploc", "--offset", "5", "--limit", "10", "--format", "json", "AU",
        ]);
        assert_eq!(args.offset, 5);
        assert_eq!(args.limit, 10);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn negative_pagination_is_rejected_at_parse_time() {
        assert!(CliArgs::try_parse_from(["iploc", "--offset", "-1", "AU"]).is_err());
        assert!(CliArgs::try_parse_from(["iploc", "--limit", "-3", "AU"]).is_err());
    }

    #[test]
    fn no_work_at_all_is_a_fatal_argument_error() {
        let args = parse(&["iploc"]);
        assert!(args.validate().is_err());

        assert!(parse(&["iploc", "--list"]).validate().is_ok());
        assert!(parse(&["iploc", "--all"]).validate().is_ok());
        assert!(parse(&["iploc", "AU"]).validate().is_ok());
    }

    #[test]
    fn conflicting_modes_warn_but_do_not_fail() {
        let args = parse(&["iploc", "--list", "--all", "AU"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.warnings().len(), 1);

        let args = parse(&["iploc", "--list", "--all"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.warnings().len(), 1);

        let args = parse(&["iploc", "AU"]);
        assert!(args.warnings().is_empty());
    }

    #[test]
    fn ns_is_an_alias_for_no_summary() {
        assert!(parse(&["iploc", "--ns", "AU"]).no_summary);
        assert!(parse(&["iploc", "--no-summary", "AU"]).no_summary);
    }
}
