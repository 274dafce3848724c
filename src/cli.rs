//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, BacktestConfig};
use crate::domain::config_validation::{validate_backtest_config, validate_strategy_config};
use crate::domain::error::SigtraderError;
use crate::domain::metrics::Metrics;
use crate::domain::series::attach_signals;
use crate::domain::strategy::Strategy;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::{FailureRow, ReportPort, SummaryRow};

#[derive(Parser, Debug)]
#[command(name = "sigtrader", about = "Signal-driven trading backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single-symbol backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        strategy: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run every configured (symbol, strategy) combination
    Batch {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols with data files available
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate configuration without touching data
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            strategy,
            output,
        } => run_single(&config, symbol.as_deref(), strategy.as_deref(), output),
        Command::Batch { config } => run_batch(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SigtraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> BacktestConfig {
    BacktestConfig {
        starting_cash: adapter.get_double("backtest", "starting_cash", 10_000.0),
        periods_per_year: adapter.get_double("backtest", "periods_per_year", 252.0),
    }
}

/// Symbols for this run: an explicit override wins, then the `symbols`
/// list, then the single `symbol` key.
pub fn resolve_symbols(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(s) = symbol_override {
        return vec![s.trim().to_uppercase()];
    }

    if let Some(symbols) = config.get_string("backtest", "symbols") {
        return symbols
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
    }

    if let Some(symbol) = config.get_string("backtest", "symbol") {
        let symbol = symbol.trim().to_uppercase();
        if !symbol.is_empty() {
            return vec![symbol];
        }
    }

    vec![]
}

/// Strategy names for a batch run: the `strategies` list, falling back to
/// the single configured `[strategy] name`.
pub fn resolve_strategy_names(config: &dyn ConfigPort) -> Vec<String> {
    if let Some(names) = config.get_string("backtest", "strategies") {
        return names
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    match config.get_string("strategy", "name") {
        Some(name) if !name.trim().is_empty() => vec![name.trim().to_string()],
        _ => vec![],
    }
}

/// Run one (symbol, strategy) combination end to end: fetch closes,
/// generate signals, simulate, persist the equity curve, return the
/// summary row.
pub fn run_symbol_strategy(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    strategy: &Strategy,
    symbol: &str,
    config: &BacktestConfig,
) -> Result<SummaryRow, SigtraderError> {
    let bars = data_port.fetch_closes(symbol)?;
    let signals = strategy.signals(&bars);
    let records = attach_signals(&bars, &signals);

    let result = run_backtest(&records, config)?;

    report_port.write_equity_curve(strategy.name(), symbol, &result.equity_curve)?;

    Ok(SummaryRow {
        symbol: symbol.to_string(),
        strategy: strategy.name().to_string(),
        metrics: result.metrics,
    })
}

fn print_metrics(symbol: &str, strategy: &str, metrics: &Metrics) {
    eprintln!("\n=== Results: {} [{}] ===", symbol, strategy);
    eprintln!("Start Equity:    {:.2}", metrics.start_equity);
    eprintln!("End Equity:      {:.2}", metrics.end_equity);
    eprintln!("Percent Return:  {:.2}%", metrics.percent_return);
    eprintln!("Total Trades:    {}", metrics.total_trades);
    eprintln!("Win Rate:        {:.2}%", metrics.win_rate);
    eprintln!("Sharpe Ratio:    {:.2}", metrics.sharpe_ratio);
    eprintln!("Max Drawdown:    {:.2}%", metrics.max_drawdown);
}

fn data_dir(adapter: &dyn ConfigPort) -> PathBuf {
    PathBuf::from(
        adapter
            .get_string("backtest", "data_dir")
            .unwrap_or_else(|| "data".to_string()),
    )
}

fn results_dir(adapter: &dyn ConfigPort) -> PathBuf {
    PathBuf::from(
        adapter
            .get_string("backtest", "results_dir")
            .unwrap_or_else(|| "results".to_string()),
    )
}

fn run_single(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    strategy_override: Option<&str>,
    output_override: Option<PathBuf>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let strategy = match strategy_override {
        Some(name) => Strategy::from_name(name, &adapter),
        None => {
            if let Err(e) = validate_strategy_config(&adapter) {
                eprintln!("error: {e}");
                return (&e).into();
            }
            Strategy::from_config(&adapter)
        }
    };
    let strategy = match strategy {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = resolve_symbols(symbol_override, &adapter);
    let symbol = match symbols.first() {
        Some(s) => s.clone(),
        None => {
            eprintln!("error: no symbol configured");
            return ExitCode::from(2);
        }
    };

    let bt_config = build_backtest_config(&adapter);
    let data_port = CsvAdapter::new(data_dir(&adapter));
    let report_port = CsvReportAdapter::new(output_override.unwrap_or_else(|| results_dir(&adapter)));

    eprintln!(
        "Running backtest: {} [{}], starting cash {:.2}",
        symbol,
        strategy.name(),
        bt_config.starting_cash,
    );

    match run_symbol_strategy(&data_port, &report_port, &strategy, &symbol, &bt_config) {
        Ok(row) => {
            print_metrics(&row.symbol, &row.strategy, &row.metrics);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_batch(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let symbols = resolve_symbols(None, &adapter);
    if symbols.is_empty() {
        eprintln!("error: no symbols configured");
        return ExitCode::from(2);
    }

    let strategy_names = resolve_strategy_names(&adapter);
    if strategy_names.is_empty() {
        eprintln!("error: no strategies configured");
        return ExitCode::from(2);
    }

    let mut strategies = Vec::with_capacity(strategy_names.len());
    for name in &strategy_names {
        match Strategy::from_name(name, &adapter) {
            Ok(s) => strategies.push(s),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    let bt_config = build_backtest_config(&adapter);
    let data_port = CsvAdapter::new(data_dir(&adapter));
    let report_port = CsvReportAdapter::new(results_dir(&adapter));

    eprintln!(
        "Running {} backtests ({} strategies x {} symbols)",
        strategies.len() * symbols.len(),
        strategies.len(),
        symbols.len(),
    );

    // One bad unit must not abort the batch: failures are collected and
    // logged, the loop continues.
    let mut summaries: Vec<SummaryRow> = Vec::new();
    let mut failures: Vec<FailureRow> = Vec::new();

    for strategy in &strategies {
        for symbol in &symbols {
            match run_symbol_strategy(&data_port, &report_port, strategy, symbol, &bt_config) {
                Ok(row) => summaries.push(row),
                Err(e) => {
                    eprintln!("warning: {} [{}] failed: {}", symbol, strategy.name(), e);
                    failures.push(FailureRow {
                        symbol: symbol.clone(),
                        strategy: strategy.name().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    for strategy in &strategies {
        let rows: Vec<SummaryRow> = summaries
            .iter()
            .filter(|row| row.strategy == strategy.name())
            .cloned()
            .collect();
        if let Err(e) = report_port.write_summary(strategy.name(), &rows) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }
    if let Err(e) = report_port.write_summary("all", &summaries) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = report_port.write_failures(&failures) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!(
        "\nBatch complete: {} succeeded, {} failed",
        summaries.len(),
        failures.len(),
    );
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let data_port = CsvAdapter::new(data_dir(&adapter));
    let symbols = match data_port.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No data files found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let strategy = match Strategy::from_config(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let bt_config = build_backtest_config(&adapter);
    let symbols = resolve_symbols(None, &adapter);

    eprintln!("\nResolved configuration:");
    eprintln!("  strategy:      {:?}", strategy);
    eprintln!("  starting cash: {:.2}", bt_config.starting_cash);
    eprintln!("  periods/year:  {}", bt_config.periods_per_year);
    eprintln!("  symbols:       {}", symbols.join(", "));

    eprintln!("\nConfiguration is valid");
    ExitCode::SUCCESS
}
