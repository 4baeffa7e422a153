use tui::style::Color;

use super::{
    error::Result,
    input::{NamedKey, UserInput},
    render::{parse_color, Position, Renderer, Side, TextStyle},
};

pub const PROMPT_PREFIX: &str = "> ";
pub const CURSOR_GLYPH: char = '_';
pub const PROMPT_COLOR: Color = Color::Rgb(0x14, 0x63, 0xa3);
pub const DEFAULT_COLOR: Color = Color::Rgb(0x14, 0x63, 0xa3);

/// Geometry of the console in renderer units.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub line_height: f32,
    pub line_offset: f32,
    pub margin: f32,
    pub font_size: f32,
    pub face: &'static str,
}

impl Metrics {
    /// pixel geometry of a 1280x720 graphics canvas.
    #[cfg(test)]
    pub const CANVAS: Metrics = Metrics {
        line_height: 40.0,
        line_offset: 16.0,
        margin: 16.0,
        font_size: 10.0,
        face: "Questrial",
    };

    /// one terminal row per line.
    pub const TERMINAL: Metrics = Metrics {
        line_height: 1.0,
        line_offset: 1.0,
        margin: 1.0,
        font_size: 1.0,
        face: "monospace",
    };
}

impl Default for Metrics {
    fn default() -> Self { Self::TERMINAL }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self { Self { width, height } }
}

impl From<(u16, u16)> for Viewport {
    fn from((width, height): (u16, u16)) -> Self { Self::new(width as f32, height as f32) }
}

/// one line of the log.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<H> {
    pub text: String,
    pub side: Side,
    pub color: Color,
    pub vertical_position: f32,
    pub handle: H,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub buffer: String,
    pub blink_phase: u64,
}

impl InputState {
    pub fn is_composing(&self) -> bool { !self.buffer.is_empty() }
}

/// Scrolling text console: an append-only log stacked upwards from the
/// bottom of the viewport, with the live input line pinned below the
/// newest entry.
pub struct ConsoleModel<R: Renderer> {
    renderer: R,
    metrics: Metrics,
    viewport: Viewport,
    input: Entry<R::Handle>,
    log: Vec<Entry<R::Handle>>,
    state: InputState,
    entry_offset: f32,
    scroll_accumulated: f32,
}

impl<R: Renderer> ConsoleModel<R> {
    pub fn new(mut renderer: R, viewport: Viewport, metrics: Metrics) -> Self {
        renderer.translate_layer(-metrics.line_offset);

        let entry_offset = metrics.line_offset - metrics.line_height / 2.0 + viewport.height;
        let position = Position::new(metrics.margin, entry_offset);
        let style = Self::style(&metrics, PROMPT_COLOR);
        let handle = renderer.create_text_entry(PROMPT_PREFIX, &style, Side::Left, position);

        let mut console = Self {
            renderer,
            metrics,
            viewport,
            input: Entry {
                text: PROMPT_PREFIX.to_owned(),
                side: Side::Left,
                color: PROMPT_COLOR,
                vertical_position: entry_offset,
                handle,
            },
            log: Vec::new(),
            state: InputState::default(),
            entry_offset,
            scroll_accumulated: 0.0,
        };

        // the input line takes up the first slot like any other entry
        console.advance();

        console
    }

    fn style(metrics: &Metrics, color: Color) -> TextStyle {
        TextStyle {
            face: metrics.face,
            color,
            bold: false,
            font_size: metrics.font_size,
        }
    }

    fn anchor_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.metrics.margin,
            Side::Right => self.viewport.width - self.metrics.margin,
            Side::Center => self.viewport.width / 2.0,
        }
    }

    fn scroll(&mut self, height: f32) {
        self.scroll_accumulated += height;
        self.renderer.translate_layer(-height);
    }

    /// moves the offset past the newest entry and re-pins the input line there.
    fn advance(&mut self) {
        self.entry_offset += self.metrics.line_height;

        self.input.vertical_position = self.entry_offset;
        let position = Position::new(self.anchor_x(self.input.side), self.entry_offset);
        self.renderer.move_entry(self.input.handle, position);

        self.scroll(self.metrics.line_height);
    }

    pub fn append_entry(&mut self, text: &str, side: Side, color: Color) -> R::Handle {
        let position = Position::new(self.anchor_x(side), self.entry_offset);
        let style = Self::style(&self.metrics, color);
        let handle = self
            .renderer
            .create_text_entry(text, &style, side, position);

        log::trace!("entry #{} at {:?}: {}", self.log.len(), position, text);

        self.log.push(Entry {
            text: text.to_owned(),
            side,
            color,
            vertical_position: self.entry_offset,
            handle,
        });
        self.advance();

        handle
    }

    /// Appends an entry described by strings, e.g. `log("hi", "right", "#1463A3")`.
    pub fn log(&mut self, text: &str, side: &str, color: &str) -> Result<R::Handle> {
        let side = side.parse()?;
        let color = parse_color(color)?;

        Ok(self.append_entry(text, side, color))
    }

    pub fn set_input_text(&mut self, text: &str) {
        self.input.text = format!("{}{}", PROMPT_PREFIX, text);
        self.renderer.update_text(self.input.handle, &self.input.text);
    }

    pub fn on_resize(&mut self, old: Viewport, new: Viewport) {
        self.scroll(old.height - new.height);
        self.viewport = new;
    }

    pub fn on_key_event(&mut self, produced: Option<char>, key: Option<NamedKey>) -> Option<UserInput> {
        if let Some(ch) = produced {
            self.state.buffer.push(ch);
            let buffer = self.state.buffer.clone();
            self.set_input_text(&buffer);
        }

        let mut committed = None;

        match key {
            Some(NamedKey::Enter) if self.state.is_composing() => {
                let line = std::mem::take(&mut self.state.buffer);

                committed = Some(match line.strip_prefix('/') {
                    Some(command) => UserInput::Command(command.to_owned()),
                    None => {
                        self.append_entry(&line, Side::Left, DEFAULT_COLOR);
                        UserInput::Message(line)
                    }
                });
            }

            Some(NamedKey::Backspace) => {
                self.state.buffer.pop();
            }

            _ => (),
        }

        let buffer = self.state.buffer.clone();
        self.set_input_text(&buffer);

        committed
    }

    pub fn on_tick(&mut self) {
        let mut shown = self.state.buffer.clone();
        if self.state.blink_phase % 2 == 0 {
            shown.push(CURSOR_GLYPH);
        }

        self.set_input_text(&shown);
        self.state.blink_phase += 1;
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[Entry<R::Handle>] { &self.log }

    #[cfg(test)]
    pub fn input(&self) -> &Entry<R::Handle> { &self.input }

    #[cfg(test)]
    pub fn buffer(&self) -> &str { &self.state.buffer }

    #[cfg(test)]
    pub fn input_state(&self) -> &InputState { &self.state }

    #[cfg(test)]
    pub fn entry_offset(&self) -> f32 { self.entry_offset }

    #[cfg(test)]
    pub fn scroll_accumulated(&self) -> f32 { self.scroll_accumulated }

    pub fn viewport(&self) -> Viewport { self.viewport }

    pub fn renderer(&self) -> &R { &self.renderer }

    pub fn renderer_mut(&mut self) -> &mut R { &mut self.renderer }
}
