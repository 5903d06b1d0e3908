use anyhow::{Context, Result};
use tracing::info;

use crate::config::ChartConfig;
use crate::loader;
use crate::max_pain::{self, MaxPain};
use crate::model::{OptionChain, OptionSide};
use crate::render::{self, Panel, RenderOptions};
use crate::report::{self, MaxPainReport, SideSummary};
use crate::series;
use crate::source;
use crate::validate;

/// Both cleaned sides of one contract.
#[derive(Debug, Clone)]
pub struct LoadedChains {
    pub contract: Option<String>,
    pub calls: OptionChain,
    pub puts: OptionChain,
}

impl LoadedChains {
    pub fn max_pain(&self) -> Option<MaxPain> {
        max_pain::compute_max_pain(&self.calls, &self.puts, None)
    }
}

/// Read the export and run both sides through the loader.
pub fn load_chains(config: &ChartConfig) -> Result<LoadedChains> {
    validate::validate(config).map_err(|errors| {
        anyhow::anyhow!("Invalid configuration:\n{}", validate::describe(&errors))
    })?;

    let tables = source::read(&config.input, &config.columns, config.contract_label.as_deref())
        .context("reading option tables")?;

    let calls = loader::load(&tables.calls, &config.columns, config.strike_range, OptionSide::Call);
    let puts = loader::load(&tables.puts, &config.columns, config.strike_range, OptionSide::Put);
    info!(
        contract = tables.contract.as_deref().unwrap_or("-"),
        calls = calls.len(),
        puts = puts.len(),
        "option chains loaded"
    );

    Ok(LoadedChains {
        contract: tables.contract,
        calls,
        puts,
    })
}

/// Entry point for the `render` command.
pub fn run_render(config: &ChartConfig) -> Result<()> {
    let chains = load_chains(config)?;
    let diff = config.future_spot_differential;

    let max_pain = if config.show_max_pain {
        chains.max_pain()
    } else {
        None
    };
    let marker = series::max_pain_price(max_pain.as_ref(), diff);
    if config.show_max_pain && marker.is_none() {
        info!("no strikes for max pain; overlay omitted");
    }

    let call_points = series::prepare(&chains.calls, diff, config.price_display_range);
    let put_points = series::prepare(&chains.puts, diff, config.price_display_range);

    let contract = chains.contract.as_deref();
    let panels = [
        Panel {
            side: OptionSide::Call,
            title: panel_title(contract, OptionSide::Call),
            points: &call_points,
        },
        Panel {
            side: OptionSide::Put,
            title: panel_title(contract, OptionSide::Put),
            points: &put_points,
        },
    ];
    let opts = RenderOptions {
        title: document_title(contract, config),
        layout: config.layout,
        orientation: config.orientation,
        max_pain_price: marker,
        generated_at: Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
    };

    let html = render::render_html(&panels, &opts)?;
    render::write_output(&html, &config.output)?;

    let summary = [
        SideSummary::new(&chains.calls, &call_points),
        SideSummary::new(&chains.puts, &put_points),
    ];
    let report = MaxPainReport {
        contract: chains.contract.clone(),
        future_spot_differential: diff,
        max_pain,
        spot_price: marker,
        curve: Vec::new(),
    };
    report::print_summary(contract, &summary, &report);
    println!("  Chart written to {}", config.output.display());
    Ok(())
}

/// Entry point for the `max-pain` command.
pub fn run_max_pain(config: &ChartConfig, json: bool, curve: bool) -> Result<()> {
    let chains = load_chains(config)?;
    let diff = config.future_spot_differential;
    let best = chains.max_pain();

    let report = MaxPainReport {
        contract: chains.contract.clone(),
        future_spot_differential: diff,
        max_pain: best,
        spot_price: series::max_pain_price(best.as_ref(), diff),
        curve: if curve {
            max_pain::pain_curve(&chains.calls, &chains.puts, None)
        } else {
            Vec::new()
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let summary = [
        SideSummary::new(&chains.calls, &series::prepare(&chains.calls, diff, None)),
        SideSummary::new(&chains.puts, &series::prepare(&chains.puts, diff, None)),
    ];
    report::print_summary(chains.contract.as_deref(), &summary, &report);
    if curve {
        report::print_pain_curve(&report.curve, best.as_ref());
    }
    Ok(())
}

fn panel_title(contract: Option<&str>, side: OptionSide) -> String {
    let kind = match side {
        OptionSide::Call => "Call options",
        OptionSide::Put => "Put options",
    };
    match contract {
        Some(c) => format!("{c} {kind}"),
        None => kind.to_string(),
    }
}

fn document_title(contract: Option<&str>, config: &ChartConfig) -> String {
    let what = match config.layout {
        crate::config::Layout::Combo => "open interest level and change",
        crate::config::Layout::Change => "open interest change",
        crate::config::Layout::Level => "open interest level",
    };
    let mut title = match contract {
        Some(c) => format!("{c}: {what}"),
        None => format!("Options {what}"),
    };
    if let Some(range) = config.price_display_range {
        title.push_str(&format!(" ({range})"));
    }
    title
}
