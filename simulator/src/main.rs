use anyhow::Context;
use clap::{Parser, Subcommand};
use generator::points::{build_coordinates, covering_extent, GeneratorConfig};
use geopointcore::data::ColumnDef;
use geopointcore::geo::Extent;
use geopointcore::io::{self, testdata, world_file};
use geopointcore::LoggerConfig;
use serde::Serialize;
use session::config::{load_logger_config, SessionConfig};
use session::report::SessionReport;
use session::runner::SessionRunner;
use std::path::PathBuf;

mod generator;
mod session;

#[derive(Parser)]
#[command(author, version, about = "Headless driver for GeoPoint Logger")]
struct Args {
    /// Logger settings (YAML) for commands that read point data
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarise a shapefile: feature count, columns, extent
    Inspect {
        shapefile: PathBuf,
        /// Column whose values identify points for "go to"
        #[arg(long)]
        key_column: Option<String>,
        /// Number of attribute rows to print
        #[arg(long, default_value_t = 5)]
        rows: usize,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Locate and decode the world file of a georeferenced image
    WorldFile { image: PathBuf },
    /// Replay a scripted logging session from YAML
    Session {
        #[arg(long)]
        workflow: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write a sample points shapefile and a georeferenced test image
    CreateTestData {
        #[arg(long, default_value = "test_data")]
        out: PathBuf,
        #[arg(long, default_value_t = 5)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 400)]
        image_size: u32,
    },
}

#[derive(Serialize)]
struct InspectReport<'a> {
    shapefile: String,
    features: usize,
    columns: &'a [ColumnDef],
    extent: Option<Extent>,
    outside_expected_bounds: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let logger_config = match &args.config {
        Some(path) => load_logger_config(path)?,
        None => LoggerConfig::default(),
    };

    match args.command {
        Command::Inspect {
            shapefile,
            key_column,
            rows,
            json,
        } => {
            let key = key_column.or_else(|| logger_config.key_column.clone());
            let layer = io::load_point_layer(&shapefile, key.as_deref())
                .with_context(|| format!("loading {}", shapefile.display()))?;
            let outside = logger_config
                .expected_extent()
                .map(|bounds| layer.outside(&bounds).len())
                .unwrap_or(0);

            if json {
                let report = InspectReport {
                    shapefile: shapefile.display().to_string(),
                    features: layer.len(),
                    columns: layer.table().columns(),
                    extent: layer.extent(),
                    outside_expected_bounds: outside,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("{} -> {} features", shapefile.display(), layer.len());
            for column in layer.table().columns() {
                println!("  {:<12} {:?}({})", column.name, column.kind, column.width);
            }
            if let Some(extent) = layer.extent() {
                println!(
                    "extent x {:.3}..{:.3}, y {:.3}..{:.3}",
                    extent.min_x, extent.max_x, extent.min_y, extent.max_y
                );
            }
            if outside > 0 {
                println!("{} points lie outside the expected {} bounds", outside, logger_config.crs);
            }
            let header: Vec<&str> = layer.table().column_names().collect();
            println!("key | {}", header.join(" | "));
            for (feature, row) in layer.features().iter().zip(layer.table().rows()).take(rows) {
                let cells: Vec<String> = row.iter().map(|v| v.as_text()).collect();
                println!("{} | {}", feature.key, cells.join(" | "));
            }
        }
        Command::WorldFile { image } => {
            let world = world_file::find_world_file(&image)
                .with_context(|| format!("no world file found for {}", image.display()))?;
            let values = world_file::parse_world_file(&world)?;
            let transform = geopointcore::geo::GeoTransform::from_world_file(values);
            println!("world file {}", world.display());
            println!(
                "A={} D={} B={} E={} C={} F={}",
                values[0], values[1], values[2], values[3], values[4], values[5]
            );
            println!(
                "origin ({}, {}), pixel {} x {}, north-up {}",
                transform.origin_x,
                transform.origin_y,
                transform.pixel_width,
                transform.pixel_height,
                transform.is_north_up()
            );
            match io::load_image_layer(&image) {
                Ok(layer) => {
                    let b = layer.bounds();
                    println!(
                        "image {}x{} covers x {:.3}..{:.3}, y {:.3}..{:.3}",
                        layer.width(),
                        layer.height(),
                        b.min_x,
                        b.max_x,
                        b.min_y,
                        b.max_y
                    );
                }
                Err(err) => log::warn!("could not decode {}: {}", image.display(), err),
            }
        }
        Command::Session { workflow, json } => {
            let mut session = SessionConfig::load(&workflow)?;
            if args.config.is_some() {
                session.logger = logger_config;
            }
            let runner = SessionRunner::new(session.clone());
            let result = runner.execute()?;
            let report = SessionReport::new(&session.shapefile, &result);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for status in &report.statuses {
                    println!("{}", status);
                }
                println!("{}", report.summary_line());
            }
            if let Some(path) = &session.report {
                report.append_to(path)?;
            }
        }
        Command::CreateTestData {
            out,
            count,
            seed,
            image_size,
        } => {
            let config = GeneratorConfig {
                count,
                seed,
                image_size,
                ..Default::default()
            };
            let coords = build_coordinates(&config)?;
            let extent = covering_extent(&coords)?;
            let dataset = testdata::write_test_dataset(&out, &coords, &extent, config.image_size)
                .with_context(|| format!("writing test data to {}", out.display()))?;
            println!("points: {}", dataset.points.display());
            println!("image:  {}", dataset.image.display());
            println!("world:  {}", dataset.world_file.display());
        }
    }

    Ok(())
}
