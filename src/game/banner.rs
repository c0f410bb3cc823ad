use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A pop-up announcing why the snake has stopped moving
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Banner {
    Paused,
    GameOver,
}

impl Banner {
    /// The size that should be used for the `Rect` passed to
    /// `Banner::render()`
    pub(super) const SIZE: Size = Size {
        width: 26,
        height: 4,
    };

    fn title(self) -> &'static str {
        match self {
            Banner::Paused => " PAUSED ",
            Banner::GameOver => " GAME OVER ! ",
        }
    }

    fn style(self) -> Style {
        match self {
            Banner::Paused => consts::PAUSED_STYLE,
            Banner::GameOver => consts::GAME_OVER_STYLE,
        }
    }

    fn action(self) -> &'static str {
        match self {
            Banner::Paused => "Resume",
            Banner::GameOver => "Play again",
        }
    }
}

impl Widget for Banner {
    /*
     * ┌──────── PAUSED ────────┐
     * │     Resume (space)     │
     * │        Quit (q)        │
     * └────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(self.title())
            .title_alignment(Alignment::Center)
            .title_style(self.style())
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        let lines = [
            Line::from_iter([
                Span::raw(format!("{} (", self.action())),
                Span::styled("space", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
            Line::from_iter([
                Span::raw("Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
        ];
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.centered().render(row, buf);
        }
    }
}
