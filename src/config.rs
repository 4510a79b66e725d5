use crate::handler::MovementRules;
use crate::input::KeyBindings;
use crate::render::TileColor;
use log::{info, warn};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub players: PlayersConfig,
    #[serde(default)]
    pub movement: MovementRules,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_board_width")]
    pub width: i32,
    #[serde(default = "default_board_height")]
    pub height: i32,
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_title")]
    pub title: String,
    #[serde(default = "default_screen_width")]
    pub screen_width: i32,
    #[serde(default = "default_screen_height")]
    pub screen_height: i32,
    #[serde(default)]
    pub origin_x: i32,
    #[serde(default)]
    pub origin_y: i32,
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_font_size")]
    pub font_size: u16,
    #[serde(default = "default_fps")]
    pub fps: u32,
}

#[derive(Debug, Deserialize)]
pub struct PlayersConfig {
    #[serde(default = "default_glyph")]
    pub glyph: char,
    #[serde(default = "default_colors")]
    pub colors: Vec<TileColor>,
}

#[derive(Debug, Deserialize)]
pub struct ControlsConfig {
    #[serde(default = "default_quit_key")]
    pub quit: String,
    #[serde(default = "default_copy_key")]
    pub copy_board: String,
    #[serde(default = "default_bindings")]
    pub players: Vec<KeyBindings>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_board_width() -> i32 { 80 }
fn default_board_height() -> i32 { 20 }
fn default_window_title() -> String { "WalkDemo".to_string() }
fn default_screen_width() -> i32 { 640 }
fn default_screen_height() -> i32 { 480 }
fn default_cols() -> i32 { 10 }
fn default_rows() -> i32 { 18 }
fn default_font_size() -> u16 { 18 }
fn default_fps() -> u32 { 30 }
fn default_glyph() -> char { '@' }
fn default_colors() -> Vec<TileColor> {
    vec![TileColor::Red, TileColor::Aqua, TileColor::Lime, TileColor::Yellow]
}
fn default_quit_key() -> String { "Q".to_string() }
fn default_copy_key() -> String { "F1".to_string() }
fn default_action_log_path() -> String { "action_log.json".to_string() }

fn bindings(keys: [&str; 8]) -> KeyBindings {
    let [up, down, left, right, start, run, speed_up, speed_down] = keys.map(str::to_string);
    KeyBindings {
        up,
        down,
        left,
        right,
        start,
        run: Some(run),
        speed_up: Some(speed_up),
        speed_down: Some(speed_down),
    }
}

fn default_bindings() -> Vec<KeyBindings> {
    vec![
        bindings(["Up", "Down", "Left", "Right", "Enter", "RightShift", "PageUp", "PageDown"]),
        bindings(["W", "S", "A", "D", "Tab", "LeftShift", "E", "R"]),
        bindings(["I", "K", "J", "L", "U", "O", "Key8", "Key9"]),
        bindings(["Kp8", "Kp2", "Kp4", "Kp6", "Kp5", "Kp0", "KpAdd", "KpSubtract"]),
    ]
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: default_board_width(),
            height: default_board_height(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_window_title(),
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            origin_x: 0,
            origin_y: 0,
            cols: default_cols(),
            rows: default_rows(),
            font_size: default_font_size(),
            fps: default_fps(),
        }
    }
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            glyph: default_glyph(),
            colors: default_colors(),
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            quit: default_quit_key(),
            copy_board: default_copy_key(),
            players: default_bindings(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_action_log: false,
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            window: WindowConfig::default(),
            players: PlayersConfig::default(),
            movement: MovementRules::default(),
            controls: ControlsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}; using default configuration", path, e);
                    Config::default()
                }
            },
            Err(_) => {
                info!("No {} found, using default configuration", path);
                Config::default()
            }
        }
    }
}
