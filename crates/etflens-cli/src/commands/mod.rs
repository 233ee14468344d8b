mod compare;
mod series;

use std::str::FromStr;
use std::sync::Arc;

use etflens_core::{
    aggregate, AlphaVantageConfig, EtfDataService, OutputSize, PeriodBar, ReqwestHttpClient,
    Resolution, Symbol,
};
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// One symbol's aggregated series, as rendered by the output layer.
#[derive(Debug, Serialize)]
pub struct SymbolReport {
    pub symbol: String,
    pub resolution: Resolution,
    pub daily_count: usize,
    pub periods: Vec<PeriodBar>,
}

pub async fn run(cli: &Cli) -> Result<Vec<SymbolReport>, CliError> {
    // Configuration failures abort here, before any request is built.
    let config = AlphaVantageConfig::from_env()?;
    let service = EtfDataService::new(config, Arc::new(ReqwestHttpClient::new()));

    match &cli.command {
        Command::Series(args) => Ok(vec![series::run(args, &service).await?]),
        Command::Compare(args) => compare::run(args, &service).await,
    }
}

/// Fetch, normalize, and aggregate one symbol.
pub(crate) async fn load_report(
    service: &EtfDataService,
    raw_symbol: &str,
    resolution: &str,
    output_size: &str,
) -> Result<SymbolReport, CliError> {
    let symbol = Symbol::parse(raw_symbol)?;
    let resolution = Resolution::from_str(resolution)?;
    let output_size = OutputSize::from_str(output_size)?;

    let bars = service.fetch_daily_bars(&symbol, output_size).await?;
    let periods = aggregate(&bars, resolution);

    Ok(SymbolReport {
        symbol: symbol.to_string(),
        resolution,
        daily_count: bars.len(),
        periods,
    })
}
