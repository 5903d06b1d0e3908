use crate::config::{ChartConfig, InputSource, Layout, Orientation};
use crate::model::{ColumnMap, PriceRange};

/// The gold-options setup the charts were first drawn for: COMEX strikes
/// sit 33 above spot, and the interesting band is 3200-4000.
pub fn example_config() -> ChartConfig {
    example_config_for(Layout::Combo)
}

/// Example for one page layout, carrying the band each chart used:
/// combo 3200-4000 (spot-adjusted, diff 33), change-only bars 3200-3700
/// and level-only bars 3150-3500 (both on raw strikes, no offset).
pub fn example_config_for(layout: Layout) -> ChartConfig {
    let (diff, range, orientation) = match layout {
        Layout::Combo => (33.0, PriceRange::new(3200.0, 4000.0), Orientation::Vertical),
        Layout::Change => (0.0, PriceRange::new(3200.0, 3700.0), Orientation::Horizontal),
        Layout::Level => (0.0, PriceRange::new(3150.0, 3500.0), Orientation::Horizontal),
    };
    ChartConfig {
        input: InputSource::Combined {
            path: "VoiDetailsForProduct.csv".into(),
        },
        columns: ColumnMap::default(),
        future_spot_differential: diff,
        strike_range: None,
        price_display_range: Some(range),
        contract_label: Some("OG DEC 25".to_string()),
        layout,
        orientation,
        show_max_pain: true,
        output: "voi_chart.html".into(),
    }
}

/// Print an example chart config JSON to stdout.
pub fn run(layout: Layout) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&example_config_for(layout))?);
    Ok(())
}
