//! Rendering of extraction outcomes.

use idcheck_core::models::identity::{ExtractionOutcome, IdentityRecord};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text card
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_outcome(
    outcome: &ExtractionOutcome,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Json => Ok(serde_json::to_string(outcome)?),
        OutputFormat::Csv => format_csv(&outcome.data),
        OutputFormat::Text => Ok(format_text(&outcome.data)),
    }
}

pub fn format_csv(record: &IdentityRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let fields = record.fields();
    wtr.write_record(fields.iter().map(|(key, _)| *key))?;
    wtr.write_record(fields.iter().map(|(_, value)| *value))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(record: &IdentityRecord) -> String {
    let mut output = String::new();

    for (key, value) in record.fields() {
        output.push_str(&format!("{}: {}\n", field_label(key), value));
    }

    output
}

/// `date_of_birth` -> `Date Of Birth`.
pub fn field_label(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
