use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};

use survey_core::{Config, OpenWeatherProvider, chart, cities, report, sample, survey};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citysurvey", version, about = "City weather survey CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Sample cities, fetch current weather, write the CSV and charts.
    Run {
        /// Number of random coordinates to draw.
        #[arg(long)]
        sample_size: Option<usize>,

        /// Directory for the CSV and chart images.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Seed for the coordinate sampler, for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Run {
                sample_size,
                output_dir,
                seed,
            } => run_pipeline(sample_size, output_dir, seed).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;
    config.api_key = Some(api_key);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn run_pipeline(
    sample_size: Option<usize>,
    output_dir: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(n) = sample_size {
        config.sample_size = n;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    let api_key = config.require_api_key()?.to_owned();

    let coords = match seed {
        Some(seed) => {
            sample::sample_coordinates(&mut StdRng::seed_from_u64(seed), config.sample_size)
        }
        None => sample::sample_coordinates(&mut rand::rng(), config.sample_size),
    };

    let index = cities::CityIndex::embedded()?;
    let candidates = cities::resolve_cities(&index, &coords);
    survey::report_city_count(candidates.len(), config.min_cities);

    let provider = OpenWeatherProvider::new(api_key, config.units.clone());
    let records = survey::run_survey(&provider, &candidates).await;

    let dataset = survey::assemble_dataset(records);
    survey::report_dataset_count(dataset.len(), config.min_cities);

    let csv_path = report::write_csv_file(&config.output_dir, &dataset)?;
    println!("Wrote {} rows to {}", dataset.len(), csv_path.display());

    let today = Local::now().date_naive();
    for path in chart::render_all(&dataset, today, &config.output_dir)? {
        println!("Wrote chart {}", path.display());
    }

    Ok(())
}
