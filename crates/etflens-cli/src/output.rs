//! Output rendering: JSON for machines, an ASCII table for eyeballs.

use std::io::Write;

use crate::cli::OutputFormat;
use crate::commands::SymbolReport;
use crate::error::CliError;

pub fn render(
    reports: &[SymbolReport],
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let rendered = if pretty {
                serde_json::to_string_pretty(reports)?
            } else {
                serde_json::to_string(reports)?
            };
            writeln!(out, "{rendered}")?;
        }
        OutputFormat::Table => {
            for report in reports {
                render_table(&mut out, report)?;
            }
        }
    }

    Ok(())
}

fn render_table(out: &mut impl Write, report: &SymbolReport) -> Result<(), CliError> {
    writeln!(
        out,
        "{} ({} resolution, {} daily records)",
        report.symbol, report.resolution, report.daily_count
    )?;
    writeln!(
        out,
        "{:<12} {:>10} {:>10} {:>10} {:>10} {:>14} {:>8}  {}",
        "period", "open", "high", "low", "close", "volume", "members", "as of"
    )?;

    for period in &report.periods {
        writeln!(
            out,
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>14} {:>8}  {}",
            period.period_key,
            period.open,
            period.high,
            period.low,
            period.close,
            period.volume,
            period.member_count,
            period.representative_date
        )?;
    }

    writeln!(out)?;
    Ok(())
}
