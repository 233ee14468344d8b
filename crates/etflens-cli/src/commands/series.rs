use etflens_core::EtfDataService;

use crate::cli::SeriesArgs;
use crate::error::CliError;

use super::{load_report, SymbolReport};

pub async fn run(args: &SeriesArgs, service: &EtfDataService) -> Result<SymbolReport, CliError> {
    load_report(service, &args.symbol, &args.resolution, &args.output_size).await
}
