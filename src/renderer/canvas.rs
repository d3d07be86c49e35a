//! Canvas 2D renderer (browser only)
//!
//! Draws from two sprite sheets already present in the page: `#sprite` holds
//! the paddle, `#bricks` holds one 32×16 brick per variant in a single row.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::{Frame, Presenter};
use crate::consts::{BRICK_HEIGHT, BRICK_WIDTH, FIELD_HEIGHT, FIELD_WIDTH};
use crate::highscores::HighScores;
use crate::sim::GamePhase;

/// Paddle location inside the `#sprite` sheet
const PADDLE_SPRITE_X: f64 = 29.0;
const PADDLE_SPRITE_Y: f64 = 174.0;

const TEXT_COLOR: &str = "#fff";
const HUD_FONT: &str = "20px Arial";

pub struct CanvasRenderer {
    document: Document,
    ctx: CanvasRenderingContext2d,
    sprite: HtmlImageElement,
    bricks: HtmlImageElement,
}

fn missing(what: &str) -> JsValue {
    JsValue::from_str(&format!("missing {what}"))
}

impl CanvasRenderer {
    /// Bind to the page. Every element is required.
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")?
            .ok_or_else(|| missing("canvas"))?
            .dyn_into()?;
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| missing("2d context"))?
            .dyn_into()?;

        let sprite: HtmlImageElement = document
            .get_element_by_id("sprite")
            .ok_or_else(|| missing("#sprite image"))?
            .dyn_into()?;
        let bricks: HtmlImageElement = document
            .get_element_by_id("bricks")
            .ok_or_else(|| missing("#bricks image"))?
            .dyn_into()?;

        Ok(Self {
            document: document.clone(),
            ctx,
            sprite,
            bricks,
        })
    }

    fn draw_bricks(&self, frame: &Frame<'_>) -> Result<(), JsValue> {
        let (w, h) = (BRICK_WIDTH as f64, BRICK_HEIGHT as f64);
        for (_, _, brick) in frame.state.bricks.iter().filter(|(_, _, b)| b.is_active()) {
            let clip_x = brick.variant as f64 * w;
            self.ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    &self.bricks,
                    clip_x,
                    0.0,
                    w,
                    h,
                    brick.pos.x as f64,
                    brick.pos.y as f64,
                    w,
                    h,
                )?;
        }
        Ok(())
    }

    fn draw_paddle(&self, frame: &Frame<'_>) -> Result<(), JsValue> {
        let paddle = &frame.state.paddle;
        let (w, h) = (paddle.width as f64, paddle.height as f64);
        self.ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                &self.sprite,
                PADDLE_SPRITE_X,
                PADDLE_SPRITE_Y,
                w,
                h,
                paddle.x as f64,
                paddle.y as f64,
                w,
                h,
            )
    }

    fn draw_ball(&self, frame: &Frame<'_>) -> Result<(), JsValue> {
        let ball = &frame.state.ball;
        self.ctx.begin_path();
        self.ctx.arc(
            ball.pos.x as f64,
            ball.pos.y as f64,
            ball.radius as f64,
            0.0,
            std::f64::consts::TAU,
        )?;
        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.fill();
        self.ctx.close_path();
        Ok(())
    }

    fn draw_hud(&self, frame: &Frame<'_>) -> Result<(), JsValue> {
        self.ctx.set_font(HUD_FONT);
        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx
            .fill_text(&format!("SCORE: {}", frame.state.score), 5.0, 50.0)?;
        if let Some(fps) = frame.fps {
            self.ctx.fill_text(&format!("FPS: {fps}"), 5.0, 30.0)?;
        }
        if frame.state.phase == GamePhase::GameOver {
            self.ctx
                .fill_text("GAME OVER", FIELD_WIDTH as f64 / 2.0 - 55.0, FIELD_HEIGHT as f64 / 2.0)?;
        }
        Ok(())
    }

    fn try_draw(&self, frame: &Frame<'_>) -> Result<(), JsValue> {
        self.ctx
            .clear_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
        self.draw_hud(frame)?;
        self.draw_ball(frame)?;
        self.draw_paddle(frame)?;
        self.draw_bricks(frame)?;
        Ok(())
    }

}

/// Toggle the `hidden` class on an element, if the page has it
pub fn set_hidden(document: &Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let classes = el.class_list();
        let _ = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
    }
}

impl Presenter for CanvasRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        if let Err(e) = self.try_draw(frame) {
            log::warn!("Render error: {:?}", e);
        }
    }

    fn reveal_name_entry(&mut self) {
        set_hidden(&self.document, "name-entry", false);
    }

    fn notify(&mut self, message: &str) {
        log::warn!("{message}");
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn show_high_scores(&mut self, scores: &HighScores, score: u32) {
        if let Some(el) = self.document.get_element_by_id("final-score") {
            el.set_text_content(Some(&score.to_string()));
        }
        let Some(list) = self.document.get_element_by_id("high-scores") else {
            return;
        };
        list.set_text_content(None);
        for entry in &scores.entries {
            if let Ok(item) = self.document.create_element("li") {
                item.set_text_content(Some(&format!("{} - {}", entry.name, entry.score)));
                let _ = list.append_child(&item);
            }
        }
        set_hidden(&self.document, "high-scores", false);
    }
}
