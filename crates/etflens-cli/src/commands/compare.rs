use etflens_core::EtfDataService;

use crate::cli::CompareArgs;
use crate::error::CliError;

use super::{load_report, SymbolReport};

/// Fetch every symbol once and aggregate each at the shared resolution.
///
/// A failing symbol fails the whole command with its own message; partial
/// comparisons are never presented as complete.
pub async fn run(
    args: &CompareArgs,
    service: &EtfDataService,
) -> Result<Vec<SymbolReport>, CliError> {
    let mut reports = Vec::with_capacity(args.symbols.len());
    for raw_symbol in &args.symbols {
        let report = load_report(service, raw_symbol, &args.resolution, &args.output_size).await?;
        reports.push(report);
    }
    Ok(reports)
}
