//! Define the application's command line interface
use crate::config::Config;
use simplelog::LevelFilter;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use structopt::StructOpt;

mod annotate;
use annotate::{annotate_command, AnnotateOpts};
mod plan_route;
use plan_route::{plan_route_command, PlanRouteOpts};

/// Turn computed transit itineraries into annotated map overlay plans
#[derive(Debug, StructOpt)]
pub struct Cli {
    /// Set logging level to debug, use a second time (e.g. -vv) to set logging to trace
    #[structopt(short, long, parse(from_occurrences))]
    verbose: i32,
    /// Suppress info logging messages use a second time (e.g. -qq) to hide warnings
    #[structopt(short, long, parse(from_occurrences))]
    quiet: i32,
    /// Operations that produce overlay plans
    #[structopt(subcommand)]
    cmd: Command,
}

impl Cli {
    /// Return the verbose flag counts as a log level filter
    pub fn verbosity(&self, default: LevelFilter) -> LevelFilter {
        if self.quiet == 1 {
            LevelFilter::Warn
        } else if self.quiet > 1 {
            LevelFilter::Error
        } else if self.verbose == 1 {
            LevelFilter::Debug
        } else if self.verbose == 2 {
            LevelFilter::Trace
        } else if self.verbose > 2 {
            LevelFilter::Off
        } else {
            default
        }
    }

    /// Consume options struct and return the result of subcommand execution
    pub fn execute_subcommand(self, config: Config) -> Result<(), Box<dyn std::error::Error>> {
        self.cmd.execute(config)
    }
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Plan a journey via the routing service and emit its overlay plan
    #[structopt(name = "plan-route")]
    PlanRoute(PlanRouteOpts),
    /// Build an overlay plan from an itinerary JSON document
    #[structopt(name = "annotate")]
    Annotate(AnnotateOpts),
}

impl Command {
    /// Consume enum variant and return the result of the command's execution
    fn execute(self, config: Config) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Command::PlanRoute(opts) => plan_route_command(config, opts),
            Command::Annotate(opts) => annotate_command(config, opts),
        }
    }
}

/// Write plan JSON to the given path, stdout when the path is "-" or absent
fn write_output(data: &[u8], output: Option<PathBuf>) -> io::Result<()> {
    if let Some(path) = output {
        if path.to_string_lossy() == "-" {
            write_to_stdout(data)
        } else {
            let mut fp = File::create(path)?;
            fp.write_all(data)
        }
    } else {
        write_to_stdout(data)
    }
}

fn write_to_stdout(data: &[u8]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(data)
}
