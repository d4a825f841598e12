
use std::io::{sink, stdout, Write};
use std::process::ExitCode;

use common::command::{Axis, Encoding};
use slam_lib::{script, Host, Monitor, Slam, SlamConfig};

use clap::{Parser, ValueEnum};
use clap_stdin::FileOrStdin;
use log::info;

#[derive(Clone, Copy, ValueEnum)]
enum EncodingArg {
    Movement,
    Spike,
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisArg {
    X,
    Y,
}

/// SLAM position peripheral scenario runner
#[derive(Parser)]
#[command(about)]
struct Args {
    /// Scenario script
    script: FileOrStdin,

    /// How words written to the input register are interpreted
    #[arg(long, value_enum, default_value_t = EncodingArg::Movement)]
    encoding: EncodingArg,

    /// Axis the interrupt monitor compares
    #[arg(long, value_enum, default_value_t = AxisArg::X)]
    axis: AxisArg,

    /// Interrupt threshold (defaults to the encoding's)
    #[arg(long)]
    limit: Option<u32>,

    /// Only report failures.
    #[arg(long, short)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> SlamConfig {
        let encoding = match self.encoding {
            EncodingArg::Movement => Encoding::Movement,
            EncodingArg::Spike => Encoding::Spike,
        };
        let axis = match self.axis {
            AxisArg::X => Axis::X,
            AxisArg::Y => Axis::Y,
        };
        let config = SlamConfig::for_encoding(encoding);
        let limit = self.limit.unwrap_or(config.monitor.limit);
        config.with_monitor(Monitor::new(axis, limit))
    }
}


fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let config = args.config();
    let quiet = args.quiet;

    let input = match args.script.contents() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("slam_cli: {e}");
            return ExitCode::FAILURE;
        }
    };

    let lines = match script::parse(input.as_str()) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("slam_cli: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut host = Host::new(Slam::new(config));
    info!("Running {} operations with {:?}", lines.len(), host.device().config());
    host.reset();

    let mut out: Box<dyn Write> = if quiet { Box::new(sink()) } else { Box::new(stdout().lock()) };
    if let Err(e) = script::run(&mut host, &lines, &mut out) {
        eprintln!("slam_cli: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
