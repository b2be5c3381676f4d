//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use crate::adapters::console_report::{ConsoleReport, DisplayCurrency};
use crate::adapters::csv_market_data::CsvMarketData;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::paper_execution::PaperExecution;
use crate::domain::candle::closing_prices;
use crate::domain::config_validation::{parse_instruments, validate_run_config};
use crate::domain::engine::{self, EngineConfig};
use crate::domain::error::CrosstraderError;
use crate::domain::ledger::{Ledger, RejectReason, TradeOutcome};
use crate::domain::policy::TradePolicy;
use crate::domain::signal::classify;
use crate::domain::sma::moving_average;
use crate::domain::valuation::value_portfolio;
use crate::ports::config_port::ConfigPort;
use crate::ports::execution_port::ExecutionPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::report_port::ReportPort;

/// Extra candles requested beyond the long window so one or two missing
/// bars do not stall signal generation.
const HISTORY_MARGIN: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "crosstrader", about = "Moving-average crossover paper trader")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the trading loop
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Stop after this many cycles (default: run until interrupted)
        #[arg(long)]
        cycles: Option<u64>,
    },
    /// Evaluate one instrument and print its signal
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        instrument: String,
    },
    /// List instruments available in the data directory
    ListInstruments {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run { config, cycles } => run_trade(&config, cycles),
        Command::Analyze { config, instrument } => run_analyze(&config, &instrument),
        Command::ListInstruments { config } => run_list_instruments(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Everything a trading run needs, resolved from a validated config.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub engine: EngineConfig,
    pub policy: TradePolicy,
    pub initial_cash: f64,
    pub instruments: Vec<String>,
    pub data_dir: PathBuf,
    pub check_interval: Duration,
    pub display: Option<DisplayCurrency>,
}

impl RunSettings {
    /// Candles to request per evaluation.
    pub fn history_limit(&self) -> usize {
        self.engine.long_window + HISTORY_MARGIN
    }
}

pub fn build_run_settings(config: &dyn ConfigPort) -> Result<RunSettings, CrosstraderError> {
    validate_run_config(config)?;

    let instruments = parse_instruments(
        // Present and non-empty after validation.
        &config.get_string("engine", "instruments").unwrap_or_default(),
    );
    let data_dir = PathBuf::from(config.get_string("engine", "data_dir").unwrap_or_default());

    let display = config
        .get_string("report", "display_currency")
        .map(|code| DisplayCurrency {
            code,
            rate: config.get_double("report", "display_rate", 0.0),
        });

    Ok(RunSettings {
        engine: EngineConfig {
            short_window: config.get_int("strategy", "short_window", 5) as usize,
            long_window: config.get_int("strategy", "long_window", 20) as usize,
        },
        policy: TradePolicy::new(config.get_double("portfolio", "trade_notional", 0.0)),
        initial_cash: config.get_double("portfolio", "initial_cash", 0.0),
        instruments,
        data_dir,
        check_interval: Duration::from_secs(
            config.get_int("engine", "check_interval_secs", 60) as u64
        ),
        display,
    })
}

/// One full pass over the configured instruments: evaluate each, apply
/// any resulting trade, then report the portfolio.
///
/// Per-instrument failures are logged and skipped; nothing here aborts
/// the process. Returns the number of instruments evaluated to a signal.
pub fn run_trading_cycle(
    data_port: &dyn MarketDataPort,
    executor: &mut dyn ExecutionPort,
    report: &dyn ReportPort,
    settings: &RunSettings,
    ledger: &mut Ledger,
    cycle: u64,
) -> usize {
    let mut evaluated = 0;

    for instrument in &settings.instruments {
        let candles = match data_port.fetch_candles(instrument, settings.history_limit()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("warning: skipping {instrument} ({e})");
                continue;
            }
        };
        let closes = closing_prices(&candles);

        let evaluation =
            match engine::evaluate(instrument, &closes, &settings.engine, &settings.policy, ledger)
            {
                Ok(ev) => ev,
                Err(e) if e.is_recoverable() => {
                    eprintln!("warning: skipping {instrument} ({e})");
                    continue;
                }
                Err(e) => {
                    eprintln!("error: {instrument}: {e}");
                    continue;
                }
            };
        evaluated += 1;

        let signal = &evaluation.signal;
        eprintln!(
            "[cycle {cycle}] {instrument}: price=${:.2} | SMA{}=${:.2} | SMA{}=${:.2} | {} ({:.2}%)",
            signal.reference_price,
            settings.engine.short_window,
            signal.short_avg,
            settings.engine.long_window,
            signal.long_avg,
            signal.kind,
            signal.strength,
        );

        if let Some(intent) = &evaluation.intent {
            match evaluation.outcome {
                Some(TradeOutcome::Applied) => {
                    match executor.submit(intent, signal.reference_price) {
                        Ok(order_id) => eprintln!(
                            "[cycle {cycle}] {instrument}: {} {:.6} applied (order {order_id})",
                            intent.side, intent.quantity,
                        ),
                        Err(e) => eprintln!("warning: order submission failed: {e}"),
                    }
                }
                Some(TradeOutcome::Rejected(reason)) => {
                    let reason = match reason {
                        RejectReason::InsufficientFunds => "insufficient funds",
                        RejectReason::InsufficientHoldings => "insufficient holdings",
                    };
                    eprintln!(
                        "[cycle {cycle}] {instrument}: {} rejected ({reason})",
                        intent.side,
                    );
                }
                None => {}
            }
        }
    }

    // Value held instruments at their latest price; a failed lookup falls
    // back to cost inside the valuation.
    let mut price_map = std::collections::HashMap::new();
    for instrument in ledger.holdings.keys() {
        if let Ok(price) = data_port.latest_price(instrument) {
            price_map.insert(instrument.clone(), price);
        }
    }

    let valuation = value_portfolio(ledger, &price_map);
    if let Err(e) = report.cycle_summary(cycle, &valuation, ledger) {
        eprintln!("warning: failed to write cycle summary: {e}");
    }

    evaluated
}

fn run_trade(config_path: &PathBuf, cycles: Option<u64>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let settings = match build_run_settings(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Strategy: SMA{} vs SMA{} crossover | notional ${:.2} per trade",
        settings.engine.short_window, settings.engine.long_window, settings.policy.trade_notional,
    );
    eprintln!(
        "Monitoring {} instruments: {}",
        settings.instruments.len(),
        settings.instruments.join(", "),
    );

    let data_port = CsvMarketData::new(settings.data_dir.clone());
    let mut executor = PaperExecution::new();
    let report = ConsoleReport::new(settings.display.clone(), settings.policy.trade_notional);
    let mut ledger = Ledger::new(settings.initial_cash);

    let mut cycle: u64 = 0;
    loop {
        cycle += 1;
        eprintln!("\n[cycle {cycle}] starting analysis...");
        run_trading_cycle(
            &data_port,
            &mut executor,
            &report,
            &settings,
            &mut ledger,
            cycle,
        );

        if let Some(max) = cycles {
            if cycle >= max {
                break;
            }
        }
        eprintln!("Waiting {}s...", settings.check_interval.as_secs());
        thread::sleep(settings.check_interval);
    }

    ExitCode::SUCCESS
}

fn run_analyze(config_path: &PathBuf, instrument: &str) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let settings = match build_run_settings(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = CsvMarketData::new(settings.data_dir.clone());
    let instrument = instrument.to_uppercase();

    let candles = match data_port.fetch_candles(&instrument, settings.history_limit()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let closes = closing_prices(&candles);

    let signal = match moving_average(&closes, settings.engine.short_window)
        .and_then(|short_avg| {
            let long_avg = moving_average(&closes, settings.engine.long_window)?;
            classify(&instrument, short_avg, long_avg, closes[closes.len() - 1])
        }) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!(
        "{}: price=${:.2} SMA{}=${:.2} SMA{}=${:.2} signal={} strength={:.2}%",
        instrument,
        signal.reference_price,
        settings.engine.short_window,
        signal.short_avg,
        settings.engine.long_window,
        signal.long_avg,
        signal.kind,
        signal.strength,
    );
    ExitCode::SUCCESS
}

fn run_list_instruments(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let data_dir = match adapter.get_string("engine", "data_dir") {
        Some(d) => PathBuf::from(d),
        None => {
            let err = CrosstraderError::ConfigMissing {
                section: "engine".into(),
                key: "data_dir".into(),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let data_port = CsvMarketData::new(data_dir);
    match data_port.list_instruments() {
        Ok(instruments) if instruments.is_empty() => {
            eprintln!("No instruments found");
            ExitCode::SUCCESS
        }
        Ok(instruments) => {
            for instrument in &instruments {
                println!("{instrument}");
            }
            eprintln!("{} instruments found", instruments.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match build_run_settings(&adapter) {
        Ok(settings) => {
            eprintln!("Config is valid");
            eprintln!(
                "  strategy:    SMA{} vs SMA{}",
                settings.engine.short_window, settings.engine.long_window
            );
            eprintln!("  initial cash: ${:.2}", settings.initial_cash);
            eprintln!("  notional:     ${:.2}", settings.policy.trade_notional);
            eprintln!("  instruments:  {}", settings.instruments.join(", "));
            eprintln!("  data dir:     {}", settings.data_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
