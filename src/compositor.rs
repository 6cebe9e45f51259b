//! Frame assembly and the redraw cycle.
//!
//! The compositor owns the ordered render list and turns every widget's
//! rendered lines into one full frame per redraw. Stacked widgets become
//! successive blocks; adjacent columnar widgets whose declared widths fit
//! the compositor width are joined side-by-side as aligned columns. There
//! is no diffing — every frame is a complete redraw.

use crate::error::Result;
use crate::widget::{Layout, SharedWidget, Widget, WidgetId};
use crossterm::{cursor, queue, terminal};
use std::io::{self, Write};
use tracing::trace;

/// Default frame width in character cells
pub const DEFAULT_WIDTH: usize = 76;
/// Default outer margin applied on both sides of every line
pub const DEFAULT_MARGIN: usize = 2;

/// Owns the render list and drives full-frame redraws
pub struct Compositor {
    units: Vec<SharedWidget>,
    width: usize,
    margin: usize,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_MARGIN)
    }
}

impl Compositor {
    pub fn new(width: usize, margin: usize) -> Self {
        Self {
            units: Vec::new(),
            width,
            margin,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Append a widget to the render list, resolving its width against
    /// this compositor's width if it has none yet
    pub fn register(&mut self, widget: SharedWidget) {
        widget.borrow_mut().resolve_width(self.width);
        self.units.push(widget);
    }

    /// Remove a widget from the render list; unknown widgets are a no-op
    pub fn remove(&mut self, id: WidgetId) {
        self.units.retain(|unit| unit.borrow().id() != id);
    }

    /// Assemble the current frame.
    ///
    /// A columnar widget opens a run that greedily absorbs the following
    /// columnar widgets while their cumulative declared width stays within
    /// the compositor width; the run renders as one block of column-joined
    /// lines and ends at the first stacked widget or width overflow.
    pub fn compose_frame(&self) -> Result<String> {
        let pad = " ".repeat(self.margin);
        let mut frame = String::new();
        let mut index = 0;

        while index < self.units.len() {
            let layout = self.units[index].borrow().layout();
            match layout {
                Layout::Stacked => {
                    for line in self.units[index].borrow().rendered_lines()? {
                        frame.push_str(&format!("{pad}{line}{pad}\n"));
                    }
                    index += 1;
                }
                Layout::Columnar => {
                    let mut columns = vec![self.units[index].borrow().rendered_lines()?];
                    let mut total = self.unit_width(index);
                    let mut next = index + 1;
                    while next < self.units.len() {
                        if self.units[next].borrow().layout() != Layout::Columnar {
                            break;
                        }
                        let width = self.unit_width(next);
                        if total + width > self.width {
                            break;
                        }
                        total += width;
                        columns.push(self.units[next].borrow().rendered_lines()?);
                        next += 1;
                    }
                    for line in join_columns(&columns) {
                        frame.push_str(&format!("{pad}{line}{pad}\n"));
                    }
                    index = next;
                }
            }
        }
        Ok(frame)
    }

    /// Clear the screen, hide the cursor and write the full frame
    pub fn redraw(&self) -> Result<()> {
        let frame = self.compose_frame()?;
        trace!(bytes = frame.len(), "redrawing frame");
        let mut out = io::stdout();
        queue!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            cursor::Hide
        )?;
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Draw the initial scene before the first key arrives
    pub fn init_scene(&self) -> Result<()> {
        self.redraw()
    }

    fn unit_width(&self, index: usize) -> usize {
        self.units[index]
            .borrow()
            .declared_width()
            .unwrap_or(self.width)
    }
}

/// Join per-widget line columns row-wise, filling missing cells with
/// empty strings so shorter columns never shift their neighbors
pub(crate) fn join_columns(columns: &[Vec<String>]) -> Vec<String> {
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    (0..rows)
        .map(|row| {
            columns
                .iter()
                .map(|column| column.get(row).map(String::as_str).unwrap_or(""))
                .collect::<String>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{strip_codes, StyleSpec};
    use crate::widget::shared;
    use crate::widgets::{Label, OptionList};

    #[test]
    fn test_join_columns_pads_shorter_columns() {
        let columns = vec![
            vec!["a1".to_string(), "a2".to_string(), "a3".to_string()],
            vec!["b1".to_string()],
            vec!["c1".to_string(), "c2".to_string()],
        ];
        assert_eq!(join_columns(&columns), vec!["a1b1c1", "a2c2", "a3"]);
    }

    #[test]
    fn test_stacked_widgets_become_successive_blocks() {
        let mut compositor = Compositor::new(20, 1);
        compositor.register(shared(Label::new("top", StyleSpec::new().width(3))));
        compositor.register(shared(Label::new("bottom", StyleSpec::new().width(6))));

        let frame = compositor.compose_frame().unwrap();
        assert_eq!(frame, " top \n bottom \n");
    }

    #[test]
    fn test_columnar_run_joins_adjacent_widgets() {
        let mut compositor = Compositor::new(20, 0);
        let left = shared(
            OptionList::new(["one", "two"], StyleSpec::new().width(6))
                .with_layout(Layout::Columnar),
        );
        let right = shared(
            OptionList::new(["1.", "2."], StyleSpec::new().width(4)).with_layout(Layout::Columnar),
        );
        compositor.register(left);
        compositor.register(right);

        let frame = compositor.compose_frame().unwrap();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(strip_codes(lines[0]), "* one * 1.");
        assert_eq!(strip_codes(lines[1]), "  two   2.");
    }

    #[test]
    fn test_columnar_run_breaks_on_width_overflow() {
        let mut compositor = Compositor::new(10, 0);
        for _ in 0..2 {
            compositor.register(shared(
                OptionList::new(["aaaa"], StyleSpec::new().width(6)).with_layout(Layout::Columnar),
            ));
        }

        // 6 + 6 > 10, so the second widget starts a run of its own.
        let frame = compositor.compose_frame().unwrap();
        assert_eq!(frame.lines().count(), 2);
    }

    #[test]
    fn test_columnar_run_ends_at_stacked_widget() {
        let mut compositor = Compositor::new(20, 0);
        compositor.register(shared(
            OptionList::new(["a"], StyleSpec::new().width(4)).with_layout(Layout::Columnar),
        ));
        compositor.register(shared(Label::new("stop", StyleSpec::new().width(4))));
        compositor.register(shared(
            OptionList::new(["b"], StyleSpec::new().width(4)).with_layout(Layout::Columnar),
        ));

        let frame = compositor.compose_frame().unwrap();
        assert_eq!(frame.lines().count(), 3);
    }

    #[test]
    fn test_hidden_widget_contributes_no_lines_until_shown() {
        let mut compositor = Compositor::new(20, 0);
        let label = shared(Label::new("peek", StyleSpec::new().width(4)));
        compositor.register(label.clone());

        let before = compositor.compose_frame().unwrap();
        label.borrow_mut().hide();
        assert_eq!(compositor.compose_frame().unwrap(), "");
        label.borrow_mut().show();
        assert_eq!(compositor.compose_frame().unwrap(), before);
    }

    #[test]
    fn test_registration_resolves_width() {
        let mut compositor = Compositor::new(30, 0);
        let label = shared(Label::new("x", StyleSpec::new()));
        compositor.register(label.clone());
        assert_eq!(label.borrow().declared_width(), Some(30));
    }

    #[test]
    fn test_remove_widget_from_render_list() {
        let mut compositor = Compositor::new(20, 0);
        let label = shared(Label::new("gone", StyleSpec::new().width(4)));
        compositor.register(label.clone());
        compositor.remove(label.borrow().id());
        assert_eq!(compositor.compose_frame().unwrap(), "");
    }
}
