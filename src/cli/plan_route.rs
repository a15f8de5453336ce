//! Define plan-route subcommand
use super::write_output;
use crate::config::Config;
use crate::overlay::{apply_zoom, build_plan};
use log::{info, warn};
use std::path::PathBuf;
use structopt::StructOpt;

/// Plan a journey between two stops and emit the map overlay plan
#[derive(Debug, StructOpt)]
pub struct PlanRouteOpts {
    /// id of the stop the journey starts from
    #[structopt(name = "ORIGIN")]
    origin: String,
    /// id of the stop the journey ends at
    #[structopt(name = "DESTINATION")]
    destination: String,
    /// zoom level to evaluate label visibility at, defaults to the configured value
    #[structopt(short, long)]
    zoom: Option<f64>,
    /// name of file to output plan JSON to, if "-" is used we will write to stdout
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

pub fn plan_route_command(
    config: Config,
    opts: PlanRouteOpts,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = config.get_routing_handler()?;
    let itinerary = router.plan_journey(&opts.origin, &opts.destination)?;
    info!(
        "planned a journey from {} to {} with {} segments",
        opts.origin,
        opts.destination,
        itinerary.segments.len()
    );

    let mut plan = build_plan(&itinerary);
    apply_zoom(&mut plan, opts.zoom.unwrap_or(config.default_zoom()));
    if plan.bounding_region.is_none() {
        warn!("itinerary has no drawable geometry, nothing to fit the view to");
    }

    let data = serde_json::to_vec_pretty(&plan)?;
    write_output(&data, opts.output)?;

    Ok(())
}
