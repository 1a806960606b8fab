use chart_panel::api::{ChartPanel, PanelConfig, PanelSnapshot, PanelView};
use chart_panel::core::{SeriesGenerator, TimeRange};
use chart_panel::platform::{FullscreenEventName, HeadlessFullscreenPlatform};
use chart_panel::render::{FrameRenderer, NullRenderer};
use chart_panel::telemetry::init_default_tracing;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

type HeadlessPanel = ChartPanel<FrameRenderer<NullRenderer>, HeadlessFullscreenPlatform, SeriesGenerator>;

#[derive(Debug)]
struct CliArgs {
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    seed: u64,
}

#[derive(Debug, Serialize)]
struct SnapshotReport {
    seed: u64,
    steps: Vec<SnapshotStep>,
    final_view: PanelView,
}

#[derive(Debug, Serialize)]
struct SnapshotStep {
    action: String,
    snapshot: PanelSnapshot,
    frames_rendered: usize,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = init_default_tracing();
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            PanelConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => PanelConfig::default(),
    };

    let mut panel = ChartPanel::headless(config, args.seed).map_err(|err| err.to_string())?;
    let mut steps = Vec::new();
    record(&mut panel, "mount", &mut steps)?;

    for range in TimeRange::ALL {
        panel.set_time_range(range).map_err(|err| err.to_string())?;
        record(&mut panel, &format!("set_time_range {range}"), &mut steps)?;
    }

    panel.toggle_comparison().map_err(|err| err.to_string())?;
    panel.pointer_move(420.0, 200.0);
    record(&mut panel, "toggle_comparison + hover", &mut steps)?;

    panel.request_fullscreen().map_err(|err| err.to_string())?;
    panel.platform_mut().dispatch_pending();
    record(&mut panel, "request_fullscreen", &mut steps)?;

    panel
        .platform_mut()
        .simulate_external_exit(FullscreenEventName::Webkit);
    panel.platform_mut().dispatch_pending();
    record(&mut panel, "external fullscreen exit", &mut steps)?;

    let report = SnapshotReport {
        seed: args.seed,
        steps,
        final_view: panel.view(),
    };
    let json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("failed to serialize report: {err}"))?;

    match &args.output {
        Some(path) => fs::write(path, json + "\n")
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn record(
    panel: &mut HeadlessPanel,
    action: &str,
    steps: &mut Vec<SnapshotStep>,
) -> Result<(), String> {
    panel.draw().map_err(|err| err.to_string())?;
    steps.push(SnapshotStep {
        action: action.to_owned(),
        snapshot: panel.snapshot(),
        frames_rendered: panel.renderer().backend().frames_rendered,
    });
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut config = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut seed = 42_u64;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --seed".to_owned())?;
                seed = value
                    .parse()
                    .map_err(|err| format!("invalid --seed `{value}`: {err}"))?;
            }
            _ => {
                return Err(
                    "usage: panel_snapshot [--config <path>] [--seed <u64>] [--output <path>]"
                        .to_owned(),
                );
            }
        }
    }

    Ok(CliArgs {
        config,
        output,
        seed,
    })
}
