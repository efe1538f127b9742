///! Output formatting for CLI
///!
///! Every format prints the scalar cell values of the resolved columns, so
///! what the table shows and what gets exported always agree.

use anyhow::Result;
use colored::Colorize;
use quotaboard_common::columns::ColumnDescriptor;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use tabled::builder::Builder;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "csv" => Ok(OutputFormat::Csv),
            other => anyhow::bail!("unknown output format '{}' (expected table, json, yaml or csv)", other),
        }
    }
}

/// Scalar values of a list, one row per item
#[derive(Debug, Clone, PartialEq)]
pub struct ListOutput {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ListOutput {
    /// A failed cell exports as an empty string
    pub fn from_columns<T>(columns: &[ColumnDescriptor<T>], items: &[T]) -> Self {
        Self {
            ids: columns.iter().map(|c| c.id.clone()).collect(),
            labels: columns.iter().map(|c| c.label.clone()).collect(),
            rows: items
                .iter()
                .map(|item| {
                    columns
                        .iter()
                        .map(|c| c.cell(item).value_or_empty().to_string())
                        .collect()
                })
                .collect(),
        }
    }

    fn records(&self) -> Vec<BTreeMap<&str, &str>> {
        self.rows
            .iter()
            .map(|row| {
                self.ids
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter().map(String::as_str))
                    .collect()
            })
            .collect()
    }
}

pub fn render(output: &ListOutput, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Table => render_table(output),
        OutputFormat::Csv => render_csv(output),
        OutputFormat::Json => serde_json::to_string_pretty(&output.records())?,
        OutputFormat::Yaml => serde_yaml::to_string(&output.records())?,
    })
}

pub fn render_table(output: &ListOutput) -> String {
    let mut builder = Builder::default();
    builder.push_record(output.labels.iter().cloned());
    for row in &output.rows {
        builder.push_record(row.iter().cloned());
    }
    builder.build().to_string()
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// RFC 4180 CSV with a header row of column ids
pub fn render_csv(output: &ListOutput) -> String {
    std::iter::once(&output.ids)
        .chain(output.rows.iter())
        .map(|row| row.iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(","))
        .map(|line| line + "\n")
        .collect()
}

pub fn print_list(output: &ListOutput, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Table && output.rows.is_empty() {
        println!("{}", "No results found".yellow());
        return Ok(());
    }

    let text = render(output, format)?;
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
        _ => println!("{}", serde_json::to_string_pretty(data)?),
    }
    Ok(())
}

pub fn print_created(resource_type: &str, name: &str, namespace: &str) {
    println!(
        "{} {} '{}' created in {}",
        "✓".green().bold(),
        resource_type.green(),
        name.green().bold(),
        namespace.dimmed()
    );
}

pub fn print_saved(key: &str, value: &str, path: &std::path::Path) {
    println!(
        "{} {} = '{}' saved to {}",
        "✓".green().bold(),
        key.green(),
        value.green().bold(),
        path.display().to_string().dimmed()
    );
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ListOutput {
        ListOutput {
            ids: vec!["name".into(), "requests".into()],
            labels: vec!["Name".into(), "Request".into()],
            rows: vec![
                vec!["compute".into(), "cpu: 1/2, memory: 1Gi/4Gi".into()],
                vec!["empty".into(), String::new()],
            ],
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_csv_quotes_list_values() {
        assert_eq!(
            render_csv(&sample()),
            "name,requests\ncompute,\"cpu: 1/2, memory: 1Gi/4Gi\"\nempty,\n"
        );
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_table_uses_labels() {
        let table = render_table(&sample());
        let header = table.lines().nth(1).unwrap();
        assert!(header.contains("Name"));
        assert!(header.contains("Request"));
        assert!(table.contains("compute"));
    }

    #[test]
    fn test_json_keys_are_column_ids() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let parsed: Vec<BTreeMap<String, String>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["name"], "compute");
        assert_eq!(parsed[1]["requests"], "");
    }
}
