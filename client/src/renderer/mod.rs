mod renderthing;

use std::sync::{Arc, Mutex, PoisonError};

use libautomata::{
    board::{CellState, BACKGROUND},
    pos::Position,
    rule::{Color, RuleKind},
};
use renderthing::{frame::RenderFrame, window::RendererWindowConfig, Renderer};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{Key, NamedKey},
};

use crate::{read_state, ticker, write_state, SharedState};

const BACKDROP_COLOR: Color = [10, 10, 10, 255];

/// Drawn for states the active rule doesn't define.
const UNDEFINED_COLOR: Color = [255, 0, 255, 255];

pub fn run(state_arc: SharedState) -> anyhow::Result<()> {
    let window_config = read_state(&state_arc).config.window.clone();

    let renderer_state = RendererState {
        global_state: state_arc,
        mouse_tile_pos: None,
        paint_state: None,
        tile_width: 0,
        tile_height: 0,
    };

    let renderer_state_arc = Arc::new(Mutex::new(renderer_state));
    let draw_state_arc = renderer_state_arc.clone();
    let event_state_arc = renderer_state_arc.clone();

    let renderer = Renderer::new(RendererWindowConfig {
        title: window_config.title,
        width: window_config.width,
        height: window_config.height,
        target_fps: window_config.target_fps,
        draw_callback: Box::new(move |frame| {
            let mut state = draw_state_arc
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            draw(&mut state, frame)
        }),
        event_callback: Some(Box::new(move |event| {
            let mut state = event_state_arc
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            on_event(&mut state, event);
        })),
    })?;

    renderer.run()
}

fn draw(state: &mut RendererState, mut frame: RenderFrame) -> Option<String> {
    let global_state = read_state(&state.global_state);
    let game = &global_state.game;
    let board = game.board();
    let rule = game.rule();

    let tile_width = (frame.width / board.width() as u32).max(1);
    let tile_height = (frame.height / board.height() as u32).max(1);
    state.tile_width = tile_width;
    state.tile_height = tile_height;

    const HALF_TILE_MARGIN: u32 = 1;

    frame.fill(BACKDROP_COLOR);

    for (tile_pos, &tile) in board.enumerate_tiles() {
        let tile_screen_x = tile_pos.x as u32 * tile_width;
        let tile_screen_y = tile_pos.y as u32 * tile_height;

        let color = rule.color_of(tile).unwrap_or(UNDEFINED_COLOR);

        frame.draw_square(
            tile_screen_x + HALF_TILE_MARGIN,
            tile_screen_y + HALF_TILE_MARGIN,
            tile_width.saturating_sub(HALF_TILE_MARGIN * 2).max(1),
            tile_height.saturating_sub(HALF_TILE_MARGIN * 2).max(1),
            color,
        );
    }

    let running = if global_state.is_running() {
        "running"
    } else {
        "paused"
    };

    Some(format!(
        "{} | {} | gen {} | brush {} | {running}",
        global_state.config.window.title,
        rule.name(),
        game.generation(),
        global_state.brush,
    ))
}

fn on_event(state: &mut RendererState, event: &WindowEvent) {
    let paint = match event {
        WindowEvent::MouseInput {
            state: mouse_state,
            button,
            ..
        } => {
            let target_state = match button {
                MouseButton::Left => Some(read_state(&state.global_state).brush),
                MouseButton::Right => Some(BACKGROUND),
                _ => None,
            };

            if let Some(target_state) = target_state {
                state.paint_state = mouse_state.is_pressed().then_some(target_state);
            }

            state.paint_state.is_some()
        }
        WindowEvent::CursorMoved { position, .. } => {
            let prev_tile_pos = state.mouse_tile_pos;
            state.mouse_tile_pos = state.tile_at(*position);

            state.paint_state.is_some() && prev_tile_pos != state.mouse_tile_pos
        }
        WindowEvent::KeyboardInput { event, .. } => {
            if event.state == ElementState::Pressed && !event.repeat {
                on_key(state, event);
            }
            false
        }
        _ => false,
    };

    if let (true, Some(mouse_tile_pos), Some(paint_state)) =
        (paint, state.mouse_tile_pos, state.paint_state)
    {
        paint_tile(&state.global_state, mouse_tile_pos, paint_state);
    }
}

fn paint_tile(state_arc: &SharedState, pos: Position, paint_state: CellState) {
    let mut global_state = write_state(state_arc);

    if global_state.is_running() {
        log::warn!("Ignoring paint while running, pause first");
        return;
    }

    if let Err(e) = global_state.game.paint(pos, paint_state) {
        log::debug!("{e}");
    }
}

fn on_key(state: &mut RendererState, event: &KeyEvent) {
    let state_arc = &state.global_state;

    if key_matches(event, "SPACE") {
        ticker::toggle(state_arc);
    } else if key_matches(event, "N") {
        let mut global_state = write_state(state_arc);
        if !global_state.is_running() {
            global_state.game.tick();
        }
    } else if key_matches(event, "R") {
        if let Err(e) = write_state(state_arc).randomize(None) {
            log::error!("{e:#}");
        }
    } else if key_matches(event, "C") {
        write_state(state_arc).game.clear();
    } else if key_matches(event, "B") {
        write_state(state_arc).cycle_brush();
    } else if let Some(rule) = rule_for_key(event) {
        log::info!("Switching to {}", rule.rule().name());
        write_state(state_arc).game.set_rule(rule);
    }
}

fn key_matches(event: &KeyEvent, target: &str) -> bool {
    match &event.logical_key {
        Key::Named(NamedKey::Space) => target.eq_ignore_ascii_case("SPACE"),
        Key::Character(text) => text.eq_ignore_ascii_case(target),
        _ => false,
    }
}

/// Digit keys pick rules in registry order, starting at 1.
fn rule_for_key(event: &KeyEvent) -> Option<RuleKind> {
    let Key::Character(text) = &event.logical_key else {
        return None;
    };

    let index = text.parse::<usize>().ok()?.checked_sub(1)?;
    RuleKind::all().nth(index)
}

struct RendererState {
    global_state: SharedState,
    mouse_tile_pos: Option<Position>,

    /// The state being painted while a mouse button is held.
    paint_state: Option<CellState>,

    /// Tile size of the last drawn frame, 0 until the first draw.
    tile_width: u32,
    tile_height: u32,
}

impl RendererState {
    /// The tile drawn under `position`, or `None` past the edges of the drawn board.
    fn tile_at(&self, position: PhysicalPosition<f64>) -> Option<Position> {
        if self.tile_width == 0 || self.tile_height == 0 || position.x < 0.0 || position.y < 0.0 {
            return None;
        }

        let tile_pos = Position {
            x: (position.x / self.tile_width as f64) as usize,
            y: (position.y / self.tile_height as f64) as usize,
        };

        read_state(&self.global_state)
            .game
            .board()
            .contains(tile_pos)
            .then_some(tile_pos)
    }
}
