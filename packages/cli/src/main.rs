#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Command-line Vietnamese address conversion tool.
//!
//! Converts a single address string (parsed from free text) or one
//! column of a CSV file from the retired province/district/ward
//! hierarchy to the post-reform format. Prints the converted address to
//! stdout on success; on any failure prints the error description to
//! stdout and exits non-zero.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use vn_address_converter::{ConvertError, MissingDistrictPolicy, convert_with_policy};
use vn_address_database::AdministrativeDatabase;

#[derive(Parser)]
#[command(name = "vn_address_cli", about = "Vietnamese address conversion tool")]
struct Cli {
    /// Address string to convert, e.g.
    /// "Phường Bến Thành, Quận 1, Thành phố Hồ Chí Minh"
    address: Option<String>,

    /// Path to an external canonical ward mapping JSON file
    /// (defaults to the bundled dataset)
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Path to a manual alias overlay JSON file (a missing file is
    /// treated as an empty overlay)
    #[arg(long, requires = "mapping")]
    aliases: Option<PathBuf>,

    /// Return district-less input unchanged instead of rejecting it as
    /// incomplete
    #[arg(long)]
    keep_new_format: bool,

    /// Convert one column of a CSV file instead of a single address
    #[arg(long, conflicts_with = "address")]
    csv: Option<PathBuf>,

    /// Output path for the converted CSV (defaults to stdout)
    #[arg(long, requires = "csv")]
    output: Option<PathBuf>,

    /// Name of the CSV column containing the address
    #[arg(long, default_value = "address")]
    column: String,
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let loaded;
    let db: &AdministrativeDatabase = match &cli.mapping {
        Some(mapping) => {
            loaded = AdministrativeDatabase::from_files(mapping, cli.aliases.as_ref())?;
            &loaded
        }
        None => AdministrativeDatabase::bundled(),
    };

    let policy = if cli.keep_new_format {
        MissingDistrictPolicy::PassThrough
    } else {
        MissingDistrictPolicy::Reject
    };

    if let Some(csv_path) = &cli.csv {
        return convert_csv(db, policy, csv_path, cli.output.as_deref(), &cli.column);
    }

    let Some(address) = &cli.address else {
        return Err("an address string (or --csv) is required".into());
    };

    let parsed = vn_address_converter::parse(address)?;
    let converted = convert_with_policy(db, &parsed, policy)?;
    println!("{converted}");
    Ok(())
}

/// Converts one column of a CSV file row by row, appending the converted
/// address and any per-row error as extra columns. Row-level failures
/// are counted and reported but do not stop the batch.
fn convert_csv(
    db: &AdministrativeDatabase,
    policy: MissingDistrictPolicy,
    input: &std::path::Path,
    output: Option<&std::path::Path>,
    column: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();
    let column_index = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| format!("CSV has no column named {column:?}"))?;

    let mut writer: csv::Writer<Box<dyn std::io::Write>> = match output {
        Some(path) => csv::Writer::from_writer(Box::new(std::fs::File::create(path)?)),
        None => csv::Writer::from_writer(Box::new(std::io::stdout())),
    };

    let mut out_headers = headers.clone();
    out_headers.push_field("converted_address");
    out_headers.push_field("conversion_error");
    writer.write_record(&out_headers)?;

    let mut converted_count = 0_u64;
    let mut failed_count = 0_u64;

    for record in reader.records() {
        let record = record?;
        let Some(text) = record.get(column_index) else {
            continue;
        };

        let result = vn_address_converter::parse(text)
            .map_err(ConvertError::from)
            .and_then(|parsed| convert_with_policy(db, &parsed, policy));

        let mut out = record;
        match result {
            Ok(converted) => {
                converted_count += 1;
                out.push_field(&converted.to_string());
                out.push_field("");
            }
            Err(e) => {
                failed_count += 1;
                log::warn!("row {}: {e}", converted_count + failed_count);
                out.push_field("");
                out.push_field(&e.to_string());
            }
        }
        writer.write_record(&out)?;
    }

    writer.flush()?;
    log::info!("converted {converted_count} addresses, {failed_count} failed");
    Ok(())
}
