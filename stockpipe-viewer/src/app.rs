//! Viewer state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::data_loader::ChartData;

pub struct App {
    pub data: ChartData,
    pub running: bool,
}

impl App {
    pub fn new(data: ChartData) -> Self {
        Self {
            data,
            running: true,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only handle key press events (Windows sends both Press and Release).
        if key.kind != KeyEventKind::Press {
            return;
        }
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.running = false;
        }
    }
}
