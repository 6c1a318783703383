//! Seed layout and tuning constants, compiled in from `desktop.toml`.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    DesktopState, DesktopWindow, Dimensions, Point, SlotToken, SnapZones, TaskbarGeometry,
    WindowId,
};

include!(concat!(env!("OUT_DIR"), "/desktop_config_generated.rs"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSeed {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOrder {
    pub desktop_order: Vec<u64>,
    pub taskbar_order: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopConfig {
    pub schema_version: u32,
    pub min_window_size: f64,
    #[serde(default)]
    pub max_window_size: Option<Dimensions>,
    pub snap_zones: SnapZones,
    pub taskbar: TaskbarGeometry,
    pub layout: LayoutOrder,
    pub windows: Vec<WindowSeed>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("desktop config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("window {0} is declared more than once")]
    DuplicateSeed(u64),
    #[error("window {0} is placed more than once")]
    DuplicatePlacement(u64),
    #[error("window {0} is placed but never declared")]
    UnknownWindow(u64),
    #[error("window {0} is declared but not placed on the desktop or taskbar")]
    UnplacedWindow(u64),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

impl DesktopConfig {
    /// The layout compiled in from `desktop.toml`.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_DESKTOP_CONFIG_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

impl DesktopState {
    /// Builds the initial placement state from a validated config.
    ///
    /// The viewport starts empty; the host reports the measured size once it is known.
    pub fn from_config(config: &DesktopConfig) -> Result<Self, ConfigError> {
        require_positive("min_window_size", config.min_window_size)?;
        require_positive("taskbar.icon_size", config.taskbar.icon_size)?;
        if config.taskbar.icon_margin < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "taskbar.icon_margin",
                value: config.taskbar.icon_margin,
            });
        }

        let mut windows = BTreeMap::new();
        for seed in &config.windows {
            require_positive("window width", seed.width)?;
            require_positive("window height", seed.height)?;
            let record = DesktopWindow {
                id: WindowId(seed.id),
                top_left: Point::new(seed.x, seed.y),
                dimensions: Dimensions::new(seed.width, seed.height),
                color: seed.color.clone(),
                animate_in_from: None,
            };
            if windows.insert(record.id, record).is_some() {
                return Err(ConfigError::DuplicateSeed(seed.id));
            }
        }

        let mut placed = HashSet::new();
        for id in config
            .layout
            .desktop_order
            .iter()
            .chain(&config.layout.taskbar_order)
        {
            if !windows.contains_key(&WindowId(*id)) {
                return Err(ConfigError::UnknownWindow(*id));
            }
            if !placed.insert(*id) {
                return Err(ConfigError::DuplicatePlacement(*id));
            }
        }
        if let Some(unplaced) = windows.keys().find(|id| !placed.contains(&id.0)) {
            return Err(ConfigError::UnplacedWindow(unplaced.0));
        }

        Ok(Self {
            windows,
            desktop_order: config
                .layout
                .desktop_order
                .iter()
                .copied()
                .map(WindowId)
                .collect(),
            taskbar_order: config
                .layout
                .taskbar_order
                .iter()
                .copied()
                .map(|id| SlotToken::Window(WindowId(id)))
                .collect(),
            taskbar: config.taskbar,
            snap_zones: config.snap_zones,
            min_window_size: config.min_window_size,
            max_window_size: config.max_window_size,
            ..Self::default()
        })
    }

    /// The compiled-in seed layout.
    pub fn seeded() -> Result<Self, ConfigError> {
        Self::from_config(&DesktopConfig::builtin()?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config() -> DesktopConfig {
        DesktopConfig::builtin().expect("builtin config parses")
    }

    #[test]
    fn builtin_layout_seeds_four_windows() {
        let state = DesktopState::seeded().expect("seeded state");
        assert_eq!(state.windows.len(), 4);
        assert_eq!(state.desktop_order, vec![WindowId(1), WindowId(2)]);
        assert_eq!(
            state.taskbar_order,
            vec![
                SlotToken::Window(WindowId(3)),
                SlotToken::Window(WindowId(4))
            ]
        );
        assert_eq!(state.min_window_size, 100.0);
        assert_eq!(state.snap_zones, SnapZones { corner: 30.0, edge: 15.0 });
        assert_eq!(state.taskbar, TaskbarGeometry::PRIMARY);
        assert_eq!(state.max_window_size, None);
        assert_eq!(state.viewport, Dimensions::default());
        assert_eq!(
            state.windows[&WindowId(1)].top_left,
            Point::new(100.0, 200.0)
        );
        assert_eq!(state.windows[&WindowId(4)].color, "#F0C996");
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn window_placed_twice_is_rejected() {
        let mut config = config();
        config.layout.taskbar_order.push(1);
        assert!(matches!(
            DesktopState::from_config(&config),
            Err(ConfigError::DuplicatePlacement(1))
        ));
    }

    #[test]
    fn undeclared_or_unplaced_windows_are_rejected() {
        let mut config = config();
        config.layout.desktop_order.push(9);
        assert!(matches!(
            DesktopState::from_config(&config),
            Err(ConfigError::UnknownWindow(9))
        ));

        let mut config = self::config();
        config.layout.taskbar_order.retain(|id| *id != 4);
        assert!(matches!(
            DesktopState::from_config(&config),
            Err(ConfigError::UnplacedWindow(4))
        ));
    }

    #[test]
    fn non_positive_sizes_are_rejected() {
        let mut config = config();
        config.min_window_size = 0.0;
        assert!(matches!(
            DesktopState::from_config(&config),
            Err(ConfigError::NonPositive {
                field: "min_window_size",
                ..
            })
        ));
    }

    #[test]
    fn max_window_size_is_optional_in_json() {
        let mut config = config();
        config.max_window_size = Some(Dimensions::new(800.0, 600.0));
        let raw = serde_json::to_string(&config).expect("serialize");
        let parsed = DesktopConfig::from_json(&raw).expect("parse");
        assert_eq!(parsed.max_window_size, Some(Dimensions::new(800.0, 600.0)));

        assert!(matches!(
            DesktopConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
