mod app;
mod clock;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod util;
mod view;
use crate::app::App;
use crate::config::Config;
use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

static USAGE: &str = concat!(
    "Usage: luckysnake [-c <file>] [--log-file <file>] [--seed <n>]\n",
    "\n",
    "Options:\n",
    "  -c, --config <file>   Read configuration from the given file\n",
    "      --log-file <file> Write log messages to the given file\n",
    "      --seed <n>        Seed the random number generator\n",
    "  -h, --help            Show this help and exit\n",
    "  -V, --version         Show the program version and exit\n",
);

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<io::Error>() {
            Some(ioe) if ioe.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
            _ => {
                eprintln!("luckysnake: {e:?}");
                ExitCode::from(2)
            }
        },
    }
}

fn run() -> anyhow::Result<()> {
    let args = match Cli::from_parser(lexopt::Parser::from_env())? {
        Cli::Run(args) => args,
        Cli::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        Cli::Version => {
            println!("luckysnake {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };
    let config = match args.config {
        Some(ref path) => Config::load(path, false),
        None => Config::default_path().and_then(|path| Config::load(&path, true)),
    }
    .context("failed to load configuration")?;
    logging::init(&config.logging, args.log_file.as_deref())?;
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let terminal = ratatui::init();
    let r = App::new(rng).run(terminal);
    ratatui::restore();
    r.context("terminal I/O failed")
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    seed: Option<u64>,
}

impl Cli {
    fn from_parser(mut parser: lexopt::Parser) -> Result<Cli, lexopt::Error> {
        use lexopt::prelude::*;
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Short('c') | Long("config") => args.config = Some(parser.value()?.into()),
                Long("log-file") => args.log_file = Some(parser.value()?.into()),
                Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Short('h') | Long("help") => return Ok(Cli::Help),
                Short('V') | Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }
}
