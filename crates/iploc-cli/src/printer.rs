// crates/iploc-cli/src/printer.rs
//
// All terminal rendering lives here; the core crate only hands us
// structured records.

use std::time::Duration;

use colored::Colorize;
use iploc_core::{CountryTriple, GeoIpRecord};

use crate::args::OutputFormat;

const BANNER: &str = r#"
 _         _
(_)  _ __ | |  ___    ___
| | | '_ \| | / _ \  / __|
| | | |_) | || (_) || (__
|_| | .__/|_| \___/  \___|
    |_|
"#;

/// Renders resolved records in the selected output format.
pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn record(&self, record: &GeoIpRecord) -> anyhow::Result<()> {
        let line = match self.format {
            OutputFormat::Json => json_line(record),
            OutputFormat::Csv => csv_line(record)?,
            OutputFormat::Default => human_line(record),
        };
        println!("{line}");
        Ok(())
    }
}

pub fn banner() {
    println!("{}", BANNER.bold());
}

pub fn query_header(token: &str) {
    println!("\n{} {}", "--------->".blue(), token.bold());
}

pub fn warning(message: &str) {
    eprintln!("{}: {message}", "warning".magenta().bold());
}

pub fn error(message: &str) {
    eprintln!("{}: {message}", "error".red().bold());
}

/// One entry of the `--list` output: `0.  Australia [AU / AUS]`.
pub fn country_line(index: usize, country: &CountryTriple) {
    println!(
        "{index}.\t{} [{} / {}]",
        country[2].bold(),
        country[0],
        country[1]
    );
}

/// Result summary: per-query counts, total, elapsed time.
pub fn summary(counts: &[usize], elapsed: Duration) {
    let total: usize = counts.iter().sum();
    let parts: Vec<String> = counts.iter().map(ToString::to_string).collect();
    println!(
        "\n- found {} = ({total}) results / {elapsed:?}",
        parts.join(" + ")
    );
}

fn json_line(record: &GeoIpRecord) -> String {
    serde_json::json!({
        "from": record.from_ip().to_string(),
        "to": record.to_ip().to_string(),
        "registry": record.registry,
        "num": record.num,
        "country": record.country,
    })
    .to_string()
}

fn csv_line(record: &GeoIpRecord) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record([
            record.from_ip().to_string(),
            record.to_ip().to_string(),
            record.registry.clone(),
            record.num.to_string(),
            record.country[0].clone(),
            record.country[1].clone(),
            record.country[2].clone(),
        ])?;
        writer.flush()?;
    }
    Ok(String::from_utf8(buf)?.trim_end().to_string())
}

fn human_line(record: &GeoIpRecord) -> String {
    format!(
        "{}-{}\t\t{}\t{}\t{} [{} / {}]",
        record.from_ip().to_string().green(),
        record.to_ip().to_string().red(),
        record.registry.yellow(),
        record.num,
        record.country_name().bold(),
        record.code2(),
        record.code3()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> GeoIpRecord {
        GeoIpRecord {
            from: 16_777_216,
            to: 16_777_471,
            registry: "APNIC".to_string(),
            num: 1,
            country: [
                "AU".to_string(),
                "AUS".to_string(),
                "Australia".to_string(),
            ],
        }
    }

    #[test]
    fn json_view_uses_dotted_decimal_addresses() {
        let value: serde_json::Value = serde_json::from_str(&json_line(&record())).unwrap();
        assert_eq!(value["from"], "1.0.0.0");
        assert_eq!(value["to"], "1.0.0.255");
        assert_eq!(value["registry"], "APNIC");
        assert_eq!(value["num"], 1);
        assert_eq!(
            value["country"],
            serde_json::json!(["AU", "AUS", "Australia"])
        );
    }

    #[test]
    fn csv_view_matches_the_input_shape_with_dotted_addresses() {
        let line = csv_line(&record()).unwrap();
        assert_eq!(line, "1.0.0.0,1.0.0.255,APNIC,1,AU,AUS,Australia");
    }

    #[test]
    fn csv_view_quotes_names_containing_the_delimiter() {
        let mut r = record();
        r.country[2] = "Bolivia, Plurinational State of".to_string();

        let line = csv_line(&r).unwrap();
        assert!(line.ends_with("\"Bolivia, Plurinational State of\""));
    }
}
