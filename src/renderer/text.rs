//! Character-grid renderer
//!
//! Used by the native headless build and handy when debugging the simulation.
//! One character covers 8×16 field units, so a brick is four characters wide.

use super::{Frame, Presenter};
use crate::consts::{BRICK_WIDTH, FIELD_HEIGHT, FIELD_WIDTH};
use crate::highscores::HighScores;
use crate::sim::GamePhase;

/// Field units per character
const CELL_WIDTH: f32 = 8.0;
const CELL_HEIGHT: f32 = 16.0;

/// One glyph per brick sprite variant
const BRICK_GLYPHS: &[u8; 8] = b"#%@&$*+X";

/// Renders frames to a string
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    /// Most recently drawn frame
    pub last_frame: String,
    /// Number of frames drawn
    pub frames_drawn: u64,
    /// Whether the name entry has been revealed
    pub name_entry_revealed: bool,
    /// Notices raised by the game, oldest first
    pub notices: Vec<String>,
    /// Most recent leaderboard shown
    pub leaderboard: Option<String>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a frame to text without recording it
    pub fn render(frame: &Frame<'_>) -> String {
        let columns = (FIELD_WIDTH / CELL_WIDTH) as usize;
        let rows = (FIELD_HEIGHT / CELL_HEIGHT) as usize;
        let mut grid = vec![vec![b' '; columns]; rows];
        let state = frame.state;

        let cell = |x: f32, y: f32| -> (usize, usize) {
            let col = (x / CELL_WIDTH).floor().clamp(0.0, (columns - 1) as f32) as usize;
            let row = (y / CELL_HEIGHT).floor().clamp(0.0, (rows - 1) as f32) as usize;
            (col, row)
        };

        let brick_cells = (BRICK_WIDTH / CELL_WIDTH) as usize;
        for (_, _, brick) in state.bricks.iter().filter(|(_, _, b)| b.is_active()) {
            let (col, row) = cell(brick.pos.x, brick.pos.y);
            let glyph = BRICK_GLYPHS[brick.variant as usize % BRICK_GLYPHS.len()];
            for c in col..(col + brick_cells).min(columns) {
                grid[row][c] = glyph;
            }
        }

        let paddle = &state.paddle;
        let (start, row) = cell(paddle.x, paddle.y);
        let (end, _) = cell(paddle.x + paddle.width - 1.0, paddle.y);
        for c in start..=end {
            grid[row][c] = b'=';
        }

        let (col, row) = cell(state.ball.pos.x, state.ball.pos.y);
        grid[row][col] = b'o';

        let mut out = format!("SCORE: {}", state.score);
        if let Some(fps) = frame.fps {
            out.push_str(&format!("  FPS: {fps}"));
        }
        out.push('\n');

        let border = format!("+{}+\n", "-".repeat(columns));
        out.push_str(&border);
        for line in &grid {
            out.push('|');
            out.push_str(&String::from_utf8_lossy(line));
            out.push_str("|\n");
        }
        out.push_str(&border);

        if state.phase == GamePhase::GameOver {
            out.push_str("GAME OVER\n");
        }
        out
    }

    /// Render a leaderboard as numbered lines
    pub fn render_high_scores(scores: &HighScores, score: u32) -> String {
        let mut out = format!("YOUR SCORE: {score}\n");
        if scores.is_empty() {
            out.push_str("No high scores yet\n");
        }
        for (i, entry) in scores.entries.iter().enumerate() {
            out.push_str(&format!("{:>2}. {:<16} {:>3}\n", i + 1, entry.name, entry.score));
        }
        out
    }
}

impl Presenter for TextRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        self.last_frame = Self::render(frame);
        self.frames_drawn += 1;
    }

    fn reveal_name_entry(&mut self) {
        self.name_entry_revealed = true;
    }

    fn notify(&mut self, message: &str) {
        log::warn!("{message}");
        self.notices.push(message.to_string());
    }

    fn show_high_scores(&mut self, scores: &HighScores, score: u32) {
        self.leaderboard = Some(Self::render_high_scores(scores, score));
    }
}
