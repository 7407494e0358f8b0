//! Display panel abstraction
//!
//! The panel interface is deliberately coarse: whole-line text output, full
//! fills, a status bar, and the editor's text region with its cursor glyph.
//! Pixel-level rendering is a driver concern and never crosses this boundary.
//!
//! The editor's rendering contract lives here in trait shape: the text region
//! is cleared and redrawn as one unit only when its content changed, while the
//! cursor glyph is drawn independently so blinking does not force a text
//! repaint.

use core_types::Rgb;

/// Display panel trait
///
/// All operations are infallible at this level; a panel that can fail should
/// degrade internally (drop the frame) rather than surface render errors into
/// session logic.
pub trait DisplayPanel {
    /// Fills the whole screen with a color
    fn fill(&mut self, color: Rgb);

    /// Writes one line of text to the output stream, no escaping
    fn print_line(&mut self, text: &str);

    /// Draws the status bar with the given message and background color
    fn status_bar(&mut self, text: &str, color: Rgb);

    /// Clears only the editor text region, leaving the rest of the screen
    fn clear_text_region(&mut self);

    /// Draws the editor buffer into the text region
    fn draw_text(&mut self, text: &str);

    /// Draws or hides the cursor-blink glyph
    fn draw_cursor(&mut self, visible: bool);

    /// Shows a modal prompt over the current content
    fn show_modal(&mut self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakePanel {
        lines: Vec<String>,
        fills: Vec<Rgb>,
    }

    impl DisplayPanel for FakePanel {
        fn fill(&mut self, color: Rgb) {
            self.fills.push(color);
        }

        fn print_line(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }

        fn status_bar(&mut self, _text: &str, _color: Rgb) {}
        fn clear_text_region(&mut self) {}
        fn draw_text(&mut self, _text: &str) {}
        fn draw_cursor(&mut self, _visible: bool) {}
        fn show_modal(&mut self, _text: &str) {}
    }

    #[test]
    fn test_panel_records_output() {
        let mut panel = FakePanel::default();
        panel.print_line("hello");
        panel.fill(Rgb::RED);

        assert_eq!(panel.lines, vec!["hello".to_string()]);
        assert_eq!(panel.fills, vec![Rgb::RED]);
    }
}
