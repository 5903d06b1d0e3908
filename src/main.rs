use clap::Parser;
use tracing::Level;

use voi_chart::{example, pipeline, schema, validate};

mod cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        cli::Command::Render {
            input,
            layout,
            orientation,
            no_max_pain,
            output,
        } => {
            let mut config = input.resolve()?;
            if let Some(layout) = layout {
                config.layout = layout.into();
            }
            if let Some(orientation) = orientation {
                config.orientation = orientation.into();
            }
            if no_max_pain {
                config.show_max_pain = false;
            }
            if let Some(output) = output {
                config.output = output;
            }
            pipeline::run_render(&config)
        }
        cli::Command::MaxPain { input, json, curve } => {
            pipeline::run_max_pain(&input.resolve()?, json, curve)
        }
        cli::Command::Validate { file } => validate::run(&file),
        cli::Command::Schema => schema::run(),
        cli::Command::Example { layout } => example::run(layout.into()),
    }
}
