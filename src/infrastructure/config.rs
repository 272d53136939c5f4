// Console configuration loaded from config/console.toml
use crate::application::input_reducer::ReducerSettings;
use crate::application::plot::PlotSettings;
use crate::domain::gamepad::StickAxes;
use crate::domain::instruction::Instruction;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub status: StatusSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InputSettings {
    pub poll_interval_ms: u64,
    pub tolerance: f64,
    pub left_stick: StickAxes,
    pub right_stick: StickAxes,
    /// Button index to instruction name, e.g. `8 = "ABORT"`.
    pub buttons: BTreeMap<String, String>,
}

impl Default for InputSettings {
    fn default() -> Self {
        let defaults = ReducerSettings::default();
        let buttons = defaults
            .button_map
            .iter()
            .map(|(index, instruction)| (index.to_string(), instruction.as_str().to_string()))
            .collect();
        Self {
            poll_interval_ms: 100,
            tolerance: defaults.tolerance,
            left_stick: defaults.left,
            right_stick: defaults.right,
            buttons,
        }
    }
}

impl InputSettings {
    pub fn reducer_settings(&self) -> anyhow::Result<ReducerSettings> {
        let mut button_map = BTreeMap::new();
        for (index, name) in &self.buttons {
            let index: usize = index
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid button index in config: {index}"))?;
            let instruction: Instruction = name.parse()?;
            button_map.insert(index, instruction);
        }
        Ok(ReducerSettings {
            tolerance: self.tolerance,
            left: self.left_stick,
            right: self.right_stick,
            button_map,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapSettings {
    pub poll_interval_ms: u64,
    pub flush_interval_ms: u64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub max_range: f64,
    pub point_lifetime_ms: u64,
    pub point_radius: f64,
    pub snapshot_dir: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        let defaults = PlotSettings::default();
        Self {
            poll_interval_ms: 1000,
            flush_interval_ms: 100,
            canvas_width: defaults.canvas_width,
            canvas_height: defaults.canvas_height,
            max_range: defaults.max_range,
            point_lifetime_ms: defaults.point_lifetime.as_millis() as u64,
            point_radius: defaults.point_radius,
            snapshot_dir: "snapshots".to_string(),
        }
    }
}

impl MapSettings {
    pub fn plot_settings(&self) -> PlotSettings {
        PlotSettings {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            max_range: self.max_range,
            point_lifetime: Duration::from_millis(self.point_lifetime_ms),
            point_radius: self.point_radius,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StatusSettings {
    pub poll_interval_ms: u64,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
        }
    }
}

impl StatusSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

pub fn load_console_config() -> anyhow::Result<ConsoleConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/console").required(false))
        .add_source(config::Environment::with_prefix("ROVER").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reducer_settings() {
        let input = InputSettings::default();
        let settings = input.reducer_settings().unwrap();
        assert_eq!(settings.tolerance, 0.05);
        assert_eq!(settings.left.x, 0);
        assert_eq!(settings.left.y, 1);
        assert_eq!(settings.right.x, 2);
        assert_eq!(settings.right.y, 5);
        assert_eq!(settings.button_map.get(&8), Some(&Instruction::Abort));
        assert_eq!(settings.button_map.get(&9), Some(&Instruction::Reboot));
    }

    #[test]
    fn test_bad_button_name_is_rejected() {
        let mut input = InputSettings::default();
        input.buttons.insert("4".to_string(), "Launch".to_string());
        assert!(input.reducer_settings().is_err());
    }

    #[test]
    fn test_map_settings_convert_to_plot_settings() {
        let map = MapSettings::default();
        let plot = map.plot_settings();
        assert_eq!(plot.canvas_width, 500.0);
        assert_eq!(plot.max_range, 1000.0);
        assert_eq!(plot.point_lifetime, Duration::from_millis(5000));
    }
}
