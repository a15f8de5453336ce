//! Define annotate subcommand
use super::write_output;
use crate::config::Config;
use crate::itinerary::Itinerary;
use crate::overlay::{apply_zoom, build_plan};
use log::warn;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use structopt::StructOpt;

/// Build a map overlay plan from an itinerary JSON document, offline
#[derive(Debug, StructOpt)]
pub struct AnnotateOpts {
    /// itinerary JSON file to annotate, if "-" is used we will read from stdin
    #[structopt(name = "INPUT", parse(from_os_str))]
    input: PathBuf,
    /// zoom level to evaluate label visibility at, defaults to the configured value
    #[structopt(short, long)]
    zoom: Option<f64>,
    /// name of file to output plan JSON to, if "-" is used we will write to stdout
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

pub fn annotate_command(
    config: Config,
    opts: AnnotateOpts,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut raw = String::new();
    if opts.input.to_string_lossy() == "-" {
        io::stdin().read_to_string(&mut raw)?;
    } else {
        File::open(&opts.input)?.read_to_string(&mut raw)?;
    }
    let itinerary: Itinerary = serde_json::from_str(&raw)?;

    let mut plan = build_plan(&itinerary);
    apply_zoom(&mut plan, opts.zoom.unwrap_or(config.default_zoom()));
    if plan.bounding_region.is_none() {
        warn!("itinerary has no drawable geometry, nothing to fit the view to");
    }

    let data = serde_json::to_vec_pretty(&plan)?;
    write_output(&data, opts.output)?;

    Ok(())
}
