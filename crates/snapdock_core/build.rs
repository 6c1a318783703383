use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DESKTOP_CONFIG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapZones {
    corner: f64,
    edge: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskbarGeometry {
    icon_size: f64,
    icon_margin: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Dimensions {
    width: f64,
    height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayoutOrder {
    desktop_order: Vec<u64>,
    taskbar_order: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowSeed {
    id: u64,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DesktopManifest {
    schema_version: u32,
    min_window_size: f64,
    max_window_size: Option<Dimensions>,
    snap_zones: SnapZones,
    taskbar: TaskbarGeometry,
    layout: LayoutOrder,
    windows: Vec<WindowSeed>,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("desktop.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: DesktopManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if manifest.schema_version != DESKTOP_CONFIG_SCHEMA_VERSION {
        panic!(
            "desktop config schema mismatch in {}: expected {} found {}",
            path.display(),
            DESKTOP_CONFIG_SCHEMA_VERSION,
            manifest.schema_version
        );
    }

    let json = serde_json::to_string_pretty(&manifest).expect("serialize desktop config");
    let generated = format!(
        "/// Build-time generated seed layout JSON.\n\
pub const DEFAULT_DESKTOP_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("desktop_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
