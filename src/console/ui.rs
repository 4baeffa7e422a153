use std::io::Stdout;

use tui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::render::{Position, Renderer, Side, TextStyle};

pub type Backend = CrosstermBackend<Stdout>;

pub fn backend() -> Backend { CrosstermBackend::new(std::io::stdout()) }

#[derive(Debug, Clone)]
struct TextEntry {
    text: String,
    style: Style,
    alignment: Side,
    position: Position,
}

/// Terminal implementation of the console's drawing surface. Entries are
/// kept in content coordinates and projected through the layer
/// translation at render time.
#[derive(Debug, Clone, Default)]
pub struct TermRenderer {
    entries: Vec<TextEntry>,
    translation: f32,
    background: Option<Color>,
    dirty: bool,
}

impl TermRenderer {
    pub fn new(background: Option<Color>) -> Self {
        Self {
            background,
            dirty: true,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn text(&self, handle: usize) -> Option<&str> {
        self.entries.get(handle).map(|entry| entry.text.as_str())
    }

    #[cfg(test)]
    pub fn is_dirty(&self) -> bool { self.dirty }

    /// returns whether a redraw was pending and clears the flag.
    pub fn take_dirty(&mut self) -> bool { std::mem::replace(&mut self.dirty, false) }

    pub fn as_widget(&self) -> ConsoleWidget<'_> { ConsoleWidget { renderer: self } }

    /// row and column of an entry relative to the top left of an area of the given size,
    /// `None` when no part of it is visible.
    fn cell_of(&self, entry: &TextEntry, area: Rect) -> Option<(u16, i32)> {
        // text sits on the row above its baseline
        let row = (entry.position.y + self.translation).ceil() as i32 - 1;
        if row < 0 || row >= area.height as i32 {
            return None;
        }

        let width = entry.text.width() as i32;
        let x = entry.position.x.round() as i32;
        let column = match entry.alignment {
            Side::Left => x,
            Side::Right => x - width,
            Side::Center => x - width / 2,
        };

        if column >= area.width as i32 || column + width <= 0 {
            return None;
        }

        Some((row as u16, column))
    }
}

impl Renderer for TermRenderer {
    type Handle = usize;

    fn create_text_entry(
        &mut self,
        text: &str,
        style: &TextStyle,
        alignment: Side,
        position: Position,
    ) -> usize {
        let mut cell_style = Style::default().fg(style.color);
        if style.bold {
            cell_style = cell_style.add_modifier(Modifier::BOLD);
        }

        self.entries.push(TextEntry {
            text: text.to_owned(),
            style: cell_style,
            alignment,
            position,
        });
        self.dirty = true;

        self.entries.len() - 1
    }

    fn update_text(&mut self, handle: usize, text: &str) {
        if let Some(entry) = self.entries.get_mut(handle) {
            if entry.text != text {
                entry.text.clear();
                entry.text.push_str(text);
                self.dirty = true;
            }
        }
    }

    fn move_entry(&mut self, handle: usize, position: Position) {
        if let Some(entry) = self.entries.get_mut(handle) {
            entry.position = position;
            self.dirty = true;
        }
    }

    fn translate_layer(&mut self, dy: f32) {
        self.translation += dy;
        self.dirty = true;
    }
}

pub struct ConsoleWidget<'a> {
    renderer: &'a TermRenderer,
}

impl<'a> Widget for ConsoleWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(bg) = self.renderer.background {
            buf.set_style(area, Style::default().bg(bg));
        }

        for entry in &self.renderer.entries {
            let (row, column) = match self.renderer.cell_of(entry, area) {
                Some(cell) => cell,
                None => continue,
            };

            // clip whatever hangs off the left edge, a wide char cut in half is dropped
            let hidden = (-column).max(0) as usize;
            let mut cut = 0;
            let visible: String = entry
                .text
                .chars()
                .skip_while(|ch| {
                    let skip = cut < hidden;
                    if skip {
                        cut += ch.width().unwrap_or(0);
                    }
                    skip
                })
                .collect();
            let column = (column.max(0) as usize + cut.saturating_sub(hidden)) as u16;

            buf.set_stringn(
                area.x + column,
                area.y + row,
                visible,
                (area.width - column) as usize,
                entry.style,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::model::{ConsoleModel, Metrics, Viewport};

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.get(x, y).symbol.as_str())
            .collect::<String>()
    }

    fn draw(renderer: &TermRenderer, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        renderer.as_widget().render(area, &mut buf);
        buf
    }

    fn console(width: u16, height: u16) -> ConsoleModel<TermRenderer> {
        ConsoleModel::new(
            TermRenderer::new(None),
            Viewport::from((width, height)),
            Metrics::TERMINAL,
        )
    }

    #[test]
    fn prompt_sits_on_the_last_row() {
        let console = console(20, 4);
        let buf = draw(console.renderer(), 20, 4);

        assert_eq!(row(&buf, 3), " >                  ");
        assert_eq!(row(&buf, 2).trim(), "");
    }

    #[test]
    fn newest_entry_is_right_above_the_prompt() {
        let mut console = console(20, 4);
        console.append_entry("first", Side::Left, Color::Gray);
        console.append_entry("second", Side::Right, Color::Gray);
        console.append_entry("mid", Side::Center, Color::Gray);

        let buf = draw(console.renderer(), 20, 4);

        assert_eq!(row(&buf, 0), " first              ");
        assert_eq!(row(&buf, 1), "             second ");
        assert_eq!(row(&buf, 2), "         mid        ");
        assert_eq!(row(&buf, 3).trim_end(), " >");
    }

    #[test]
    fn old_entries_scroll_out_of_view() {
        let mut console = console(20, 3);
        for n in 0..5 {
            console.append_entry(&format!("line {}", n), Side::Left, Color::Gray);
        }

        let buf = draw(console.renderer(), 20, 3);

        assert_eq!(row(&buf, 0).trim(), "line 3");
        assert_eq!(row(&buf, 1).trim(), "line 4");
    }

    #[test]
    fn shrinking_keeps_the_prompt_at_the_bottom() {
        let mut console = console(20, 6);
        console.append_entry("hello", Side::Left, Color::Gray);

        console.on_resize(Viewport::from((20, 6)), Viewport::from((20, 3)));
        let buf = draw(console.renderer(), 20, 3);

        assert_eq!(row(&buf, 1).trim(), "hello");
        assert_eq!(row(&buf, 2).trim(), ">");
    }

    #[test]
    fn updates_mark_the_renderer_dirty_only_on_change() {
        let mut console = console(20, 3);
        assert!(console.renderer_mut().take_dirty());
        assert!(!console.renderer().is_dirty());

        console.set_input_text("");
        assert!(!console.renderer().is_dirty());

        console.set_input_text("x");
        assert!(console.renderer().is_dirty());
        assert_eq!(console.renderer().text(console.input().handle), Some("> x"));
    }

    #[test]
    fn text_hanging_off_the_left_edge_is_clipped() {
        let mut renderer = TermRenderer::new(None);
        let style = TextStyle {
            face: "monospace",
            color: Color::Gray,
            bold: false,
            font_size: 1.0,
        };
        renderer.create_text_entry("abcdef", &style, Side::Right, Position::new(3.0, 1.0));

        let buf = draw(&renderer, 5, 1);

        assert_eq!(row(&buf, 0), "def  ");
    }

    fn wide_entry(text: &str, alignment: Side, x: f32) -> TermRenderer {
        let mut renderer = TermRenderer::new(None);
        let style = TextStyle {
            face: "monospace",
            color: Color::Gray,
            bold: false,
            font_size: 1.0,
        };
        renderer.create_text_entry(text, &style, alignment, Position::new(x, 1.0));
        renderer
    }

    #[test]
    fn wide_characters_are_anchored_by_display_width() {
        let buf = draw(&wide_entry("日本", Side::Right, 5.0), 6, 1);

        assert_eq!(buf.get(1, 0).symbol, "日");
        assert_eq!(buf.get(3, 0).symbol, "本");

        let buf = draw(&wide_entry("日本", Side::Center, 3.0), 6, 1);

        assert_eq!(buf.get(1, 0).symbol, "日");
    }

    #[test]
    fn left_clip_counts_display_cells() {
        let buf = draw(&wide_entry("日本語", Side::Right, 4.0), 6, 1);

        assert_eq!(buf.get(0, 0).symbol, "本");
        assert_eq!(buf.get(2, 0).symbol, "語");

        // half of the first char hangs off the edge, so it is dropped whole
        let buf = draw(&wide_entry("日本語", Side::Left, -1.0), 6, 1);

        assert_eq!(buf.get(0, 0).symbol, " ");
        assert_eq!(buf.get(1, 0).symbol, "本");
        assert_eq!(buf.get(3, 0).symbol, "語");
    }
}
