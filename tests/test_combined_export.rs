use std::path::PathBuf;

use voi_chart::config::{ChartConfig, InputSource, Layout, Orientation};
use voi_chart::model::{ColumnMap, OptionSide, PriceRange};
use voi_chart::source::{self, SourceError};
use voi_chart::{loader, max_pain, pipeline};

// ── Helpers ─────────────────────────────────────────────────────────

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/voi_combined.csv")
}

fn combined() -> InputSource {
    InputSource::Combined { path: fixture() }
}

// ── Sheet scraping ──────────────────────────────────────────────────

#[test]
fn test_auto_detects_first_contract() {
    let tables = source::read(&combined(), &ColumnMap::default(), None).unwrap();
    assert_eq!(tables.contract.as_deref(), Some("OG DEC 25"));
    // TOTALS rows are not data.
    assert_eq!(tables.calls.len(), 4);
    assert_eq!(tables.puts.len(), 3);
}

#[test]
fn test_selects_requested_contract() {
    let tables = source::read(&combined(), &ColumnMap::default(), Some("og  jan 26")).unwrap();
    assert_eq!(tables.contract.as_deref(), Some("OG JAN 26"));
    assert_eq!(tables.calls.len(), 1);
    assert_eq!(tables.puts.len(), 1);
}

#[test]
fn test_unknown_contract_is_lookup_failure() {
    let err = source::read(&combined(), &ColumnMap::default(), Some("OG MAR 26")).unwrap_err();
    match err {
        SourceError::TableNotFound { side, contract } => {
            assert_eq!(side, OptionSide::Call);
            assert_eq!(contract, "OG MAR 26");
        }
        other => panic!("expected TableNotFound, got {other}"),
    }
}

#[test]
fn test_export_without_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "Gold Options,,\nTrade Date: 2025-10-17,,\n").unwrap();

    let err = source::read(&InputSource::Combined { path }, &ColumnMap::default(), None)
        .unwrap_err();
    assert!(matches!(err, SourceError::NoContracts { .. }));
}

#[test]
fn test_missing_put_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calls_only.csv");
    std::fs::write(
        &path,
        "OG DEC 25 Calls,,\nStrike,At Close,Change\n3200,10,1\nTOTALS,10,1\n",
    )
    .unwrap();

    let err = source::read(&InputSource::Combined { path }, &ColumnMap::default(), None)
        .unwrap_err();
    assert!(matches!(err, SourceError::TableNotFound { side: OptionSide::Put, .. }));
    assert_eq!(err.to_string(), "no Puts table found for contract OG DEC 25");
}

fn read_inline(name: &str, contents: &str) -> Result<source::RawTables, SourceError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    source::read(&InputSource::Combined { path }, &ColumnMap::default(), None)
}

#[test]
fn test_banner_line_is_not_a_contract() {
    let tables = read_inline(
        "banner.csv",
        "Gold Options Calls and Puts,,\n\
         Trade Date: 2025-10-17,,\n\
         OG DEC 25 Calls,,\n\
         Strike,At Close,Change\n\
         3200,10,1\n\
         TOTALS,10,1\n\
         OG DEC 25 Puts,,\n\
         Strike,At Close,Change\n\
         3200,20,-1\n\
         3250,5,2\n\
         TOTALS,25,1\n",
    )
    .unwrap();
    assert_eq!(tables.contract.as_deref(), Some("OG DEC 25"));
    assert_eq!(tables.calls.len(), 1);
    assert_eq!(tables.puts.len(), 2);
}

#[test]
fn test_table_ends_at_next_marker() {
    // No TOTALS line between the two tables.
    let tables = read_inline(
        "no_totals.csv",
        "OG DEC 25 Calls,,\n\
         Strike,At Close,Change\n\
         3200,10,1\n\
         OG DEC 25 Puts,,\n\
         Strike,At Close,Change\n\
         3200,20,-1\n\
         TOTALS,20,-1\n",
    )
    .unwrap();
    assert_eq!(tables.calls.len(), 1);
    assert_eq!(tables.puts.len(), 1);
}

#[test]
fn test_table_ends_at_end_of_file() {
    let tables = read_inline(
        "truncated.csv",
        "OG DEC 25 Calls,,\n\
         Strike,At Close,Change\n\
         3200,10,1\n\
         TOTALS,10,1\n\
         OG DEC 25 Puts,,\n\
         Strike,At Close,Change\n\
         3200,20,-1\n\
         3250,5,2\n",
    )
    .unwrap();
    assert_eq!(tables.calls.len(), 1);
    assert_eq!(tables.puts.len(), 2);
}

// ── Loader + max pain over the export ───────────────────────────────

#[test]
fn test_chains_and_max_pain_from_export() {
    let columns = ColumnMap::default();
    let tables = source::read(&combined(), &columns, None).unwrap();
    let calls = loader::load(&tables.calls, &columns, None, OptionSide::Call);
    let puts = loader::load(&tables.puts, &columns, None, OptionSide::Put);

    // The N/A row is dropped; thousands separators are stripped.
    assert_eq!(calls.len(), 3);
    assert_eq!(calls.rows()[0].open_interest_at_close, 1250.0);
    assert_eq!(calls.rows()[0].change_in_open_interest, 15.0);

    // 3200: puts pay 50*700 + 100*150 = 50_000
    // 3250: calls pay 50*1250, puts pay 50*150 = 70_000
    // 3300: calls pay 100*1250 + 50*980 = 174_000
    let mp = max_pain::compute_max_pain(&calls, &puts, None).unwrap();
    assert_eq!(mp.strike, 3200.0);
    assert_eq!(mp.total_loss, 50_000.0);
}

// ── Full pipeline ───────────────────────────────────────────────────

#[test]
fn test_render_writes_chart_with_max_pain() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out/chart.html");

    let mut config = ChartConfig::new(combined());
    config.future_spot_differential = 33.0;
    config.price_display_range = Some(PriceRange::new(3150.0, 3300.0));
    config.output = output.clone();

    pipeline::run_render(&config).unwrap();

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("OG DEC 25 Call options"));
    assert!(html.contains("OG DEC 25 Put options"));
    assert!(html.contains("Max pain: 3167"));
    assert!(html.contains("Plotly.newPlot('panel-1'"));
}

#[test]
fn test_render_without_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ChartConfig::new(combined());
    config.layout = Layout::Change;
    config.orientation = Orientation::Horizontal;
    config.show_max_pain = false;
    config.output = dir.path().join("change.html");

    pipeline::run_render(&config).unwrap();

    let html = std::fs::read_to_string(&config.output).unwrap();
    assert!(!html.contains("Max pain"));
}

#[test]
fn test_invalid_config_is_rejected_before_reading() {
    let mut config = ChartConfig::new(InputSource::Combined {
        path: "does/not/exist.csv".into(),
    });
    config.price_display_range = Some(PriceRange::new(4000.0, 3200.0));

    let err = pipeline::load_chains(&config).unwrap_err();
    assert!(err.to_string().contains("Invalid configuration"));
}

#[test]
fn test_split_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let calls = dir.path().join("call.csv");
    let puts = dir.path().join("put.csv");
    std::fs::write(&calls, "Strike,At Close,Change\n100,5,1\n110,10,-1\n").unwrap();
    std::fs::write(&puts, "Strike,At Close,Change\n100,8,0\n110,3,2\n").unwrap();

    let config = ChartConfig::new(InputSource::Split { calls, puts });
    let chains = pipeline::load_chains(&config).unwrap();
    assert_eq!(chains.contract, None);
    let mp = chains.max_pain().unwrap();
    assert_eq!(mp.strike, 100.0);
    assert_eq!(mp.total_loss, 30.0);
}
