use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rainfall_grid::{
    plot_map, BoundingBox, DateRange, Provider, RainfallGrid, RunConfig, DEFAULT_CELL_AREA_KM2,
    DEFAULT_CONCURRENCY, DEFAULT_MAP_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_TRACE_NAME, DEFAULT_ZOOM,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "rainfall-grid")]
#[command(about = "Split an area into equal cells, fetch historic rainfall per cell and map it")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Partition the area, fetch rainfall for every cell and write both tables
    Generate(GenerateArgs),
    /// Render the tables written by `generate` as an HTML map
    Plot(PlotArgs),
}

#[derive(Debug, clap::Args)]
struct GenerateArgs {
    /// Northern most latitude
    #[arg(long, allow_hyphen_values = true)]
    north_lat: f64,
    /// Eastern most longitude
    #[arg(long, allow_hyphen_values = true)]
    east_lon: f64,
    /// Southern most latitude
    #[arg(long, allow_hyphen_values = true)]
    south_lat: f64,
    /// Western most longitude
    #[arg(long, allow_hyphen_values = true)]
    west_lon: f64,
    /// Area of a single cell in km²
    #[arg(long, default_value_t = DEFAULT_CELL_AREA_KM2)]
    sq_km: f64,
    /// Weather data provider API key
    #[arg(long, env = "RAINFALL_GRID_API_KEY", hide_env_values = true)]
    api_key: String,
    /// First day to total rainfall from (YYYY-MM-DD)
    #[arg(long)]
    start_date: NaiveDate,
    /// Last day to total rainfall until (YYYY-MM-DD)
    #[arg(long)]
    end_date: NaiveDate,
    #[arg(long, value_enum, default_value_t = ProviderArg::WorldWeatherOnline)]
    provider: ProviderArg,
    /// Directory for grid_points.csv and actual_points.csv
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    /// Maximum number of provider requests in flight
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    /// Override the provider host
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Debug, clap::Args)]
struct PlotArgs {
    /// Directory holding grid_points.csv and actual_points.csv
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    input_dir: PathBuf,
    #[arg(long, default_value = DEFAULT_MAP_FILE)]
    output: PathBuf,
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    zoom: u8,
    /// Legend label of the rainfall markers
    #[arg(long, default_value = DEFAULT_TRACE_NAME)]
    title: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderArg {
    WorldWeatherOnline,
    VisualCrossing,
}

impl From<ProviderArg> for Provider {
    fn from(value: ProviderArg) -> Self {
        match value {
            ProviderArg::WorldWeatherOnline => Provider::WorldWeatherOnline,
            ProviderArg::VisualCrossing => Provider::VisualCrossing,
        }
    }
}

impl GenerateArgs {
    fn into_config(self) -> anyhow::Result<RunConfig> {
        let period = DateRange::new(self.start_date, self.end_date)?;
        Ok(RunConfig::builder()
            .bounding_box(BoundingBox::new(
                self.north_lat,
                self.east_lon,
                self.south_lat,
                self.west_lon,
            ))
            .period(period)
            .api_key(self.api_key)
            .sq_km(self.sq_km)
            .provider(self.provider.into())
            .output_dir(self.output_dir)
            .concurrency(self.concurrency)
            .request_timeout(Duration::from_secs(self.timeout_secs))
            .maybe_base_url(self.base_url)
            .build())
    }
}

async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = args.into_config()?;
    info!("Starting run with {:?}", config);
    let grid = RainfallGrid::new(config).context("failed to set up rainfall provider")?;
    let datasets = grid
        .generate_datasets()
        .await
        .context("failed to generate datasets")?;

    let unavailable = datasets.unavailable();
    if unavailable > 0 {
        println!(
            "{unavailable} of {} cells have no rainfall reading (status 'unavailable')",
            datasets.actual_points.len()
        );
    }
    println!(
        "Datasets generated successfully: {} and {}",
        datasets.paths.grid_points.display(),
        datasets.paths.actual_points.display()
    );
    Ok(())
}

fn plot(args: PlotArgs) -> anyhow::Result<()> {
    let written = plot_map()
        .input_dir(&args.input_dir)
        .output(&args.output)
        .zoom(args.zoom)
        .trace_name(&args.title)
        .call()
        .with_context(|| format!("failed to plot datasets in {}", args.input_dir.display()))?;
    println!("Map written to {}", written.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Commands::Generate(args) => generate(args).await,
        Commands::Plot(args) => plot(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_args_map_onto_config() {
        let cli = Cli::try_parse_from([
            "rainfall-grid",
            "generate",
            "--north-lat",
            "10",
            "--east-lon",
            "179",
            "--south-lat",
            "9",
            "--west-lon",
            "-179",
            "--api-key",
            "k",
            "--start-date",
            "2022-07-01",
            "--end-date",
            "2022-07-31",
            "--provider",
            "visual-crossing",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let config = args.into_config().unwrap();
        assert_eq!(config.bounding_box, BoundingBox::new(10.0, 179.0, 9.0, -179.0));
        assert_eq!(config.sq_km, DEFAULT_CELL_AREA_KM2);
        assert_eq!(config.provider, Provider::VisualCrossing);
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn inverted_dates_are_rejected() {
        let cli = Cli::try_parse_from([
            "rainfall-grid",
            "generate",
            "--north-lat",
            "19.5",
            "--east-lon",
            "73.5",
            "--south-lat",
            "18.5",
            "--west-lon",
            "72.5",
            "--api-key",
            "k",
            "--start-date",
            "2022-07-31",
            "--end-date",
            "2022-07-01",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert!(args.into_config().is_err());
    }
}
