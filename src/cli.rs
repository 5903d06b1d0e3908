use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};

use voi_chart::config::{ChartConfig, InputSource, Layout, Orientation};
use voi_chart::model::PriceRange;

/// Options Volume/OI chart generator: open interest change and level per
/// strike, with the max-pain strike overlaid.
#[derive(Parser)]
#[command(name = "voi-chart", version, about)]
pub struct Cli {
    /// Log at debug level
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the interactive HTML chart
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Panel content: combo (change bars + level line), change, or level
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,

        /// Price axis direction: vertical (price on y) or horizontal
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Leave out the max-pain overlay
        #[arg(long)]
        no_max_pain: bool,

        /// Output HTML path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Compute the max-pain strike and print it
    MaxPain {
        #[command(flatten)]
        input: InputArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Also print writer payout at every candidate strike
        #[arg(long)]
        curve: bool,
    },

    /// Validate a chart config JSON file
    Validate {
        /// Path to the config JSON file
        file: PathBuf,
    },

    /// Output the JSON schema for chart config files
    Schema,

    /// Output an example chart config to stdout
    Example {
        /// Which chart variant to show
        #[arg(long, value_enum, default_value = "combo")]
        layout: LayoutArg,
    },
}

/// Input selection and numeric parameters shared by `render` and `max-pain`.
/// Flags override the matching fields of `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Chart config JSON file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Single CSV export holding both Calls and Puts tables
    #[arg(long, conflicts_with_all = ["calls", "puts"])]
    pub combined: Option<PathBuf>,

    /// Call sheet CSV (use with --puts)
    #[arg(long, requires = "puts")]
    pub calls: Option<PathBuf>,

    /// Put sheet CSV (use with --calls)
    #[arg(long, requires = "calls")]
    pub puts: Option<PathBuf>,

    /// Contract label to chart, e.g. "OG DEC 25" (default: first in the export)
    #[arg(long)]
    pub contract: Option<String>,

    /// Subtracted from each strike to get the spot-equivalent price
    #[arg(long, allow_hyphen_values = true)]
    pub diff: Option<f64>,

    /// Lowest strike to load
    #[arg(long, requires = "strike_max")]
    pub strike_min: Option<f64>,

    /// Highest strike to load
    #[arg(long, requires = "strike_min")]
    pub strike_max: Option<f64>,

    /// Lowest spot-equivalent price to show
    #[arg(long, requires = "price_max")]
    pub price_min: Option<f64>,

    /// Highest spot-equivalent price to show
    #[arg(long, requires = "price_min")]
    pub price_max: Option<f64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LayoutArg {
    Combo,
    Change,
    Level,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Combo => Layout::Combo,
            LayoutArg::Change => Layout::Change,
            LayoutArg::Level => Layout::Level,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OrientationArg {
    Vertical,
    Horizontal,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Vertical => Orientation::Vertical,
            OrientationArg::Horizontal => Orientation::Horizontal,
        }
    }
}

impl InputArgs {
    /// Start from `--config` (if any) and apply flag overrides.
    pub fn resolve(&self) -> Result<ChartConfig> {
        let flag_input = match (&self.combined, &self.calls, &self.puts) {
            (Some(path), _, _) => Some(InputSource::Combined { path: path.clone() }),
            (None, Some(calls), Some(puts)) => Some(InputSource::Split {
                calls: calls.clone(),
                puts: puts.clone(),
            }),
            _ => None,
        };

        let mut config = match (&self.config, flag_input) {
            (Some(path), input) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                let mut config: ChartConfig = serde_json::from_str(&contents)
                    .with_context(|| format!("parsing config {}", path.display()))?;
                if let Some(input) = input {
                    config.input = input;
                }
                config
            }
            (None, Some(input)) => ChartConfig::new(input),
            (None, None) => bail!("No input given. Use --config, --combined, or --calls/--puts."),
        };

        if let Some(label) = &self.contract {
            config.contract_label = Some(label.clone());
        }
        if let Some(diff) = self.diff {
            config.future_spot_differential = diff;
        }
        if let (Some(min), Some(max)) = (self.strike_min, self.strike_max) {
            config.strike_range = Some(PriceRange::new(min, max));
        }
        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            config.price_display_range = Some(PriceRange::new(min, max));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_build_config() {
        let cli = Cli::parse_from([
            "voi-chart", "render", "--calls", "call.csv", "--puts", "put.csv", "--diff", "33",
            "--price-min", "3200", "--price-max", "4000", "--layout", "change",
        ]);
        let Command::Render { input, layout, .. } = cli.command else {
            panic!("expected render");
        };
        let cfg = input.resolve().unwrap();
        assert!(matches!(cfg.input, InputSource::Split { .. }));
        assert_eq!(cfg.future_spot_differential, 33.0);
        assert_eq!(cfg.price_display_range, Some(PriceRange::new(3200.0, 4000.0)));
        assert_eq!(Layout::from(layout.unwrap()), Layout::Change);
    }

    #[test]
    fn test_no_input_is_error() {
        assert!(InputArgs::default().resolve().is_err());
    }

    #[test]
    fn test_example_layout_defaults_to_combo() {
        let cli = Cli::parse_from(["voi-chart", "example"]);
        let Command::Example { layout } = cli.command else {
            panic!("expected example");
        };
        assert_eq!(Layout::from(layout), Layout::Combo);
    }
}
