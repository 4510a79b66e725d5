use arboard::Clipboard;
use log::{error, info, warn};
use macroquad::prelude::*;
use std::sync::OnceLock;
use std::time::Duration;
use walkdemo::config::Config;
use walkdemo::input::{InputSource, InputToken, KeyBindings, TokenSet};
use walkdemo::render::{GridWindow, Surface, TextSurface, Tile};
use walkdemo::{Coordinate, Flow, WalkDemo};

const CONFIG_PATH: &str = "config.toml";

static CONFIG: OnceLock<Config> = OnceLock::new();

fn config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load(CONFIG_PATH))
}

/// Map a configured key name to a macroquad key code
fn key_code(name: &str) -> Option<KeyCode> {
    let code = match name {
        "A" => KeyCode::A, "B" => KeyCode::B, "C" => KeyCode::C, "D" => KeyCode::D,
        "E" => KeyCode::E, "F" => KeyCode::F, "G" => KeyCode::G, "H" => KeyCode::H,
        "I" => KeyCode::I, "J" => KeyCode::J, "K" => KeyCode::K, "L" => KeyCode::L,
        "M" => KeyCode::M, "N" => KeyCode::N, "O" => KeyCode::O, "P" => KeyCode::P,
        "Q" => KeyCode::Q, "R" => KeyCode::R, "S" => KeyCode::S, "T" => KeyCode::T,
        "U" => KeyCode::U, "V" => KeyCode::V, "W" => KeyCode::W, "X" => KeyCode::X,
        "Y" => KeyCode::Y, "Z" => KeyCode::Z,
        "Key0" => KeyCode::Key0, "Key1" => KeyCode::Key1, "Key2" => KeyCode::Key2,
        "Key3" => KeyCode::Key3, "Key4" => KeyCode::Key4, "Key5" => KeyCode::Key5,
        "Key6" => KeyCode::Key6, "Key7" => KeyCode::Key7, "Key8" => KeyCode::Key8,
        "Key9" => KeyCode::Key9,
        "Kp0" => KeyCode::Kp0, "Kp1" => KeyCode::Kp1, "Kp2" => KeyCode::Kp2,
        "Kp3" => KeyCode::Kp3, "Kp4" => KeyCode::Kp4, "Kp5" => KeyCode::Kp5,
        "Kp6" => KeyCode::Kp6, "Kp7" => KeyCode::Kp7, "Kp8" => KeyCode::Kp8,
        "Kp9" => KeyCode::Kp9, "KpAdd" => KeyCode::KpAdd, "KpSubtract" => KeyCode::KpSubtract,
        "KpEnter" => KeyCode::KpEnter,
        "Up" => KeyCode::Up, "Down" => KeyCode::Down, "Left" => KeyCode::Left, "Right" => KeyCode::Right,
        "Enter" => KeyCode::Enter, "Tab" => KeyCode::Tab, "Space" => KeyCode::Space,
        "Escape" => KeyCode::Escape, "Backspace" => KeyCode::Backspace,
        "LeftShift" => KeyCode::LeftShift, "RightShift" => KeyCode::RightShift,
        "LeftControl" => KeyCode::LeftControl, "RightControl" => KeyCode::RightControl,
        "PageUp" => KeyCode::PageUp, "PageDown" => KeyCode::PageDown,
        "Home" => KeyCode::Home, "End" => KeyCode::End,
        "F1" => KeyCode::F1, "F2" => KeyCode::F2, "F3" => KeyCode::F3, "F4" => KeyCode::F4,
        "F5" => KeyCode::F5, "F6" => KeyCode::F6, "F7" => KeyCode::F7, "F8" => KeyCode::F8,
        _ => return None,
    };
    Some(code)
}

fn key_down(name: &str) -> bool {
    key_code(name).is_some_and(is_key_down)
}

fn check_bindings(config: &Config) {
    let mut names = vec![config.controls.quit.as_str(), config.controls.copy_board.as_str()];
    for b in &config.controls.players {
        names.extend([b.up.as_str(), b.down.as_str(), b.left.as_str(), b.right.as_str(), b.start.as_str()]);
        names.extend([&b.run, &b.speed_up, &b.speed_down].into_iter().flatten().map(String::as_str));
    }
    for name in names {
        if key_code(name).is_none() {
            warn!("Unknown key name '{}' in {}; it will never be pressed", name, CONFIG_PATH);
        }
    }
}

/// One player's key set on the shared keyboard
struct KeyboardController<'a> {
    bindings: &'a KeyBindings,
}

impl InputSource for KeyboardController<'_> {
    fn pressed_tokens(&self) -> TokenSet {
        self.bindings.tokens(key_down)
    }
}

/// Keys that act on the whole demo rather than a player
struct SystemKeys<'a> {
    quit: &'a str,
}

impl InputSource for SystemKeys<'_> {
    fn pressed_tokens(&self) -> TokenSet {
        let mut tokens = TokenSet::new();
        if key_down(self.quit) {
            tokens.insert(InputToken::Quit);
        }
        tokens
    }
}

/// Draws tiles as glyphs on the macroquad window
struct ScreenSurface {
    window: GridWindow,
    cell_size: f32,
    font_size: u16,
}

impl Surface for ScreenSurface {
    fn fill(&mut self) {
        clear_background(BLACK);
    }

    fn draw(&mut self, pos: Coordinate, tile: &Tile) {
        if let Some(cell) = self.window.to_window(pos) {
            let (r, g, b) = tile.color.rgb();
            draw_text(
                &tile.glyph.to_string(),
                cell.x as f32 * self.cell_size,
                (cell.y + 1) as f32 * self.cell_size,
                self.font_size as f32,
                Color::from_rgba(r, g, b, 255),
            );
        }
    }
}

fn copy_board_to_clipboard(demo: &WalkDemo) {
    let board = demo.registry();
    let window = GridWindow::new(Coordinate::new(0, 0), Coordinate::new(board.width, board.height));
    let mut text = TextSurface::new(window);
    demo.render(&mut text);

    match Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text.to_string()) {
                warn!("Failed to copy to clipboard: {}", e);
            } else {
                info!("Board layout copied to clipboard");
                // Keep clipboard alive for a moment so clipboard managers can capture it
                std::thread::sleep(Duration::from_millis(100));
            }
        }
        Err(e) => warn!("Failed to access clipboard: {}", e),
    }
}

fn quit(demo: &WalkDemo, config: &Config) -> ! {
    if demo.action_log().is_enabled() {
        info!("{}", demo.action_log().summary());
        match demo.action_log().save_to_file(&config.logging.action_log_path) {
            Ok(()) => info!("Action log saved to {}", config.logging.action_log_path),
            Err(e) => error!("Failed to save action log: {}", e),
        }
    }
    std::process::exit(0)
}

fn window_conf() -> Conf {
    env_logger::init();
    let window = &config().window;
    Conf {
        window_title: window.title.clone(),
        window_width: window.screen_width,
        window_height: window.screen_height,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config();
    check_bindings(config);

    let mut demo = WalkDemo::new(config);
    let mut screen = ScreenSurface {
        window: GridWindow::new(
            Coordinate::new(config.window.origin_x, config.window.origin_y),
            Coordinate::new(config.window.cols, config.window.rows),
        ),
        cell_size: config.window.font_size as f32,
        font_size: config.window.font_size,
    };

    let controllers: Vec<KeyboardController> = config
        .controls
        .players
        .iter()
        .map(|bindings| KeyboardController { bindings })
        .collect();
    let keyboard = SystemKeys { quit: &config.controls.quit };

    let step = 1.0 / config.window.fps.max(1) as f64;
    let mut last_update = f64::NEG_INFINITY;

    loop {
        let now = get_time();
        if now - last_update >= step {
            last_update = now;

            match demo.update(Duration::from_secs_f64(now), &controllers, &keyboard) {
                Ok(Flow::Quit) => quit(&demo, config),
                Ok(Flow::Continue) => {}
                Err(e) => error!("Frame update failed: {}", e),
            }
        }

        if key_code(&config.controls.copy_board).is_some_and(is_key_pressed) {
            copy_board_to_clipboard(&demo);
        }

        demo.render(&mut screen);
        next_frame().await
    }
}
