use std::path::Path;

use arboard::Clipboard;
use astar_demo::config::CONFIG_FILE;
use astar_demo::{Brush, CellKind, Config, CostModel, Demo, GridEdit, Outcome, SearchStatus};
use log::{error, info, warn};
use macroquad::prelude::*;
use macroquad::window::Conf;

const EMPTY_OUTLINE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

fn kind_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Empty => EMPTY_OUTLINE,
        CellKind::Wall => Color::from_rgba(255, 0, 0, 255),
        CellKind::Start => Color::from_rgba(255, 255, 255, 255),
        CellKind::End => Color::from_rgba(255, 255, 0, 255),
        CellKind::Frontier => Color::from_rgba(0, 0, 255, 255),
        CellKind::Visited => Color::from_rgba(238, 244, 66, 255),
        CellKind::FinalPath => Color::from_rgba(0, 255, 0, 255),
    }
}

/// Window state wrapped around the demo session
struct DemoWindow {
    demo: Demo,
    cell_size: f32,
    steps_per_frame: u32,
    background: Color,
    show_help: bool,
    status_line: String,
}

impl DemoWindow {
    fn new(config: &Config) -> Result<Self, astar_demo::GridError> {
        let demo = Demo::from_config(config)?;
        let [r, g, b] = config.visual.background;

        Ok(DemoWindow {
            demo,
            cell_size: config.grid.cell_size as f32,
            steps_per_frame: config.search.steps_per_frame,
            background: Color::from_rgba(r, g, b, 255),
            show_help: config.visual.show_help,
            status_line: "Press Enter to search".to_string(),
        })
    }

    /// Poll input for this frame. Returns false when the user asked to quit.
    fn handle_input(&mut self) -> bool {
        if is_key_pressed(KeyCode::Q) {
            return false;
        }

        let brush = if is_mouse_button_down(MouseButton::Left) {
            Some(Brush::Wall)
        } else if is_mouse_button_down(MouseButton::Right) {
            Some(Brush::Empty)
        } else {
            None
        };
        if let Some(brush) = brush {
            let (mouse_x, mouse_y) = mouse_position();
            let edit =
                GridEdit::from_pointer(mouse_x, mouse_y, self.cell_size, brush, self.demo.grid());
            if let Some(edit) = edit {
                if let Err(e) = self.demo.apply_edit(edit) {
                    warn!("edit rejected: {}", e);
                }
            }
        }

        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
            match self.demo.trigger_search() {
                Ok(true) => self.status_line = "Searching...".to_string(),
                Ok(false) => {}
                Err(e) => error!("cannot start search: {}", e),
            }
        }

        if is_key_pressed(KeyCode::R) {
            self.demo.reset();
            self.status_line = "Exploration reset".to_string();
        }

        if is_key_pressed(KeyCode::Escape) {
            self.demo.clear();
            self.status_line = "Walls cleared".to_string();
        }

        if is_key_pressed(KeyCode::M) && !self.demo.is_running() {
            let next = match self.demo.cost_model() {
                CostModel::FromStart => CostModel::Accumulated,
                CostModel::Accumulated => CostModel::FromStart,
            };
            self.demo.set_cost_model(next);
            self.status_line = format!("Cost model: {:?}", next);
        }

        if is_key_pressed(KeyCode::C) {
            self.copy_to_clipboard();
        }

        if is_key_pressed(KeyCode::V) {
            self.paste_from_clipboard();
        }

        if is_key_pressed(KeyCode::H) {
            self.show_help = !self.show_help;
        }

        true
    }

    fn update(&mut self) {
        if let Some(outcome) = self.demo.tick(self.steps_per_frame) {
            self.status_line = match outcome {
                Outcome::Succeeded { path } => format!("Path found: {} cells", path.len()),
                Outcome::Exhausted => "No path found".to_string(),
                Outcome::Cancelled => "Search cancelled".to_string(),
            };
        }
    }

    fn copy_to_clipboard(&mut self) {
        let layout = self.demo.layout_text();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&layout) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Grid layout copied to clipboard");
                    self.status_line = "Layout copied".to_string();
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => warn!("Failed to access clipboard: {}", e),
        }
    }

    fn paste_from_clipboard(&mut self) {
        let text = match Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read clipboard: {}", e);
                return;
            }
        };

        match self.demo.paste_walls(&text) {
            Ok(()) => self.status_line = "Layout pasted".to_string(),
            Err(e) => {
                warn!("Clipboard does not hold a usable layout: {}", e);
                self.status_line = format!("Paste failed: {}", e);
            }
        }
    }

    fn draw(&self) {
        clear_background(self.background);

        let grid = self.demo.grid();
        let size = self.cell_size;
        for cell in grid.cells() {
            let pos = cell.position();
            let px = pos.x as f32 * size;
            let py = pos.y as f32 * size;

            match cell.kind() {
                CellKind::Empty => draw_rectangle_lines(px, py, size, size, 1.0, EMPTY_OUTLINE),
                kind => draw_rectangle(px, py, size, size, kind_color(kind)),
            }
        }

        let status = match (self.demo.status(), self.demo.expansions()) {
            (SearchStatus::Running, Some(expansions)) => {
                format!("Searching... {} expanded", expansions)
            }
            _ => self.status_line.clone(),
        };
        draw_text(&status, 10.0, screen_height() - 10.0, 20.0, WHITE);

        if self.show_help {
            let help = [
                "Left mouse: paint wall",
                "Right mouse: erase wall",
                "Enter: search   R: reset   Esc: clear walls",
                "M: cost model   C: copy   V: paste",
                "H: toggle help   Q: quit",
            ];
            for (i, line) in help.iter().enumerate() {
                draw_text(line, 10.0, 20.0 + i as f32 * 18.0, 18.0, WHITE);
            }
        }
    }
}

fn init_logging() {
    // Default filter is "info" if RUST_LOG is not set.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

fn window_conf() -> Conf {
    init_logging();
    let config = Config::load_from(Path::new(CONFIG_FILE)).unwrap_or_default();

    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: config.grid.width_px,
        window_height: config.grid.height_px,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();
    let config = Config::load();

    let mut window = match DemoWindow::new(&config) {
        Ok(window) => window,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    loop {
        if !window.handle_input() {
            break;
        }
        window.update();
        window.draw();

        next_frame().await
    }
}
