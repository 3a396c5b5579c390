//! Panel rendering for accordion items.
//!
//! The accordion decides *what* each item looks like (open or not, focused
//! or not, how far its open/close transition has run) and hands that to a
//! [`PanelRenderer`] as [`PanelProps`].  The renderer decides how it looks.
//! [`DefaultPanel`] draws a one-line header with a chevron followed by the
//! item body, revealed row by row while a transition runs.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::{Duration, Instant};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One collapsible section: a header label and the body it reveals.
#[derive(Debug, Clone)]
pub struct AccordionItem {
    /// Text shown in the header line.
    pub label: String,
    /// Content shown while the item is open.
    pub body: Text<'static>,
}

impl AccordionItem {
    /// Create an item from a label and its body content.
    pub fn new(label: impl Into<String>, body: impl Into<Text<'static>>) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
        }
    }

    fn body_rows(&self) -> u16 {
        u16::try_from(self.body.height()).unwrap_or(u16::MAX)
    }
}

/// Which side of the header the icon sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconPosition {
    /// Icon before the label.
    #[default]
    Left,
    /// Icon flush against the right edge.
    Right,
}

/// Progress of an item's open/close animation.
///
/// A transition is *settled* until [`start`](Transition::start) is called,
/// then runs linearly for its duration.  Restarting a running transition
/// continues from the mirrored point, so reversing direction mid-way does
/// not jump.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    duration: Duration,
    started: Option<Instant>,
}

impl Transition {
    /// A settled transition with the given duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started: None,
        }
    }

    /// The configured duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Begin animating towards the item's new open state.
    pub fn start(&mut self, now: Instant) {
        if self.duration.is_zero() {
            self.started = None;
            return;
        }
        let remaining = 1.0 - self.progress(now);
        let rewind = self.duration.mul_f32(remaining);
        self.started = Some(now.checked_sub(rewind).unwrap_or(now));
    }

    /// Fraction of the transition completed at `now`, in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        match self.started {
            None => 1.0,
            Some(start) => {
                let elapsed = now.saturating_duration_since(start);
                (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
            }
        }
    }

    /// Whether the transition is still running at `now`.
    pub fn is_running(&self, now: Instant) -> bool {
        self.progress(now) < 1.0
    }

    /// How many of `rows` body rows are visible at `now`.
    pub fn revealed_rows(&self, rows: u16, opened: bool, now: Instant) -> u16 {
        let progress = self.progress(now);
        let shown = if opened { progress } else { 1.0 - progress };
        (f32::from(rows) * shown).ceil() as u16
    }
}

/// Everything a renderer needs to draw one item.
#[derive(Debug, Clone)]
pub struct PanelProps<'a> {
    /// `"{accordion id}-{index}"`.
    pub id: &'a str,
    /// Position of the item in the accordion.
    pub index: usize,
    /// Whether the item is open.
    pub opened: bool,
    /// Whether the item's header holds keyboard focus.
    pub focused: bool,
    /// The item's open/close animation.
    pub transition: &'a Transition,
    /// Time the frame is drawn at.
    pub now: Instant,
    /// Icon glyph for the closed state.
    pub icon: &'a str,
    /// Which side of the header the icon sits on.
    pub icon_position: IconPosition,
    /// Keep the closed icon even while open.
    pub disable_icon_rotation: bool,
    /// Styles to draw with.
    pub style: &'a AccordionStyle,
}

/// Draws accordion items.
pub trait PanelRenderer: Send {
    /// Rows needed to draw `item` with `props` at `width` columns.
    fn height(&self, item: &AccordionItem, props: &PanelProps<'_>, width: u16) -> u16;

    /// Draw `item` into `area`.
    fn render(&self, frame: &mut Frame, area: Rect, item: &AccordionItem, props: &PanelProps<'_>);
}

/// Visual style configuration for the accordion.
#[derive(Debug, Clone)]
pub struct AccordionStyle {
    /// Header of an unfocused item.
    pub header: Style,
    /// Header of the focused item.
    pub header_focused: Style,
    /// Extra style layered on the header of an open item.
    pub header_open: Style,
    /// The icon glyph.
    pub icon: Style,
    /// Body text.
    pub body: Style,
    /// Columns the body is indented by.
    pub body_indent: u16,
}

impl Default for AccordionStyle {
    fn default() -> Self {
        Self {
            header: Style::default(),
            header_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_open: Style::default().add_modifier(Modifier::BOLD),
            icon: Style::default().fg(Color::DarkGray),
            body: Style::default(),
            body_indent: 2,
        }
    }
}

/// Header line plus a progressively revealed body.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPanel;

impl DefaultPanel {
    fn header<'a>(item: &'a AccordionItem, props: &PanelProps<'a>, width: u16) -> Line<'a> {
        let icon = if props.opened && !props.disable_icon_rotation {
            rotated_icon(props.icon)
        } else {
            props.icon
        };
        let mut style = if props.focused {
            props.style.header_focused
        } else {
            props.style.header
        };
        if props.opened {
            style = style.patch(props.style.header_open);
        }

        let icon_width = icon.width() as u16;
        let label_room = width.saturating_sub(icon_width + 1);
        let label = truncate(&item.label, label_room);
        let icon_span = Span::styled(icon, props.style.icon);

        match props.icon_position {
            IconPosition::Left => Line::from(vec![
                icon_span,
                Span::raw(" "),
                Span::styled(label, style),
            ]),
            IconPosition::Right => {
                let gap = width.saturating_sub(label.width() as u16 + icon_width);
                Line::from(vec![
                    Span::styled(label, style),
                    Span::raw(" ".repeat(usize::from(gap))),
                    icon_span,
                ])
            }
        }
    }
}

impl PanelRenderer for DefaultPanel {
    fn height(&self, item: &AccordionItem, props: &PanelProps<'_>, _width: u16) -> u16 {
        1 + props
            .transition
            .revealed_rows(item.body_rows(), props.opened, props.now)
    }

    fn render(&self, frame: &mut Frame, area: Rect, item: &AccordionItem, props: &PanelProps<'_>) {
        if area.height == 0 {
            return;
        }
        let header_area = Rect { height: 1, ..area };
        frame.render_widget(
            Paragraph::new(Self::header(item, props, area.width)),
            header_area,
        );

        let indent = props.style.body_indent.min(area.width);
        let body_area = Rect {
            x: area.x + indent,
            y: area.y + 1,
            width: area.width - indent,
            height: area.height - 1,
        };
        if body_area.height > 0 {
            frame.render_widget(
                Paragraph::new(item.body.clone()).style(props.style.body),
                body_area,
            );
        }
    }
}

/// The glyph an icon turns into while its item is open.
pub fn rotated_icon(icon: &str) -> &str {
    match icon {
        "▸" => "▾",
        "▶" => "▼",
        "›" => "⌄",
        ">" => "v",
        "+" => "-",
        other => other,
    }
}

fn truncate(text: &str, width: u16) -> String {
    let width = usize::from(width);
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_transition_is_complete() {
        let t = Transition::new(Duration::from_millis(200));
        let now = Instant::now();
        assert_eq!(t.progress(now), 1.0);
        assert!(!t.is_running(now));
        assert_eq!(t.revealed_rows(4, true, now), 4);
        assert_eq!(t.revealed_rows(4, false, now), 0);
    }

    #[test]
    fn transition_reveals_proportionally() {
        let mut t = Transition::new(Duration::from_millis(200));
        let start = Instant::now();
        t.start(start);
        assert_eq!(t.revealed_rows(4, true, start), 0);
        let half = start + Duration::from_millis(100);
        assert!(t.is_running(half));
        assert_eq!(t.revealed_rows(4, true, half), 2);
        assert_eq!(t.revealed_rows(4, false, half), 2);
        let done = start + Duration::from_millis(250);
        assert_eq!(t.revealed_rows(4, true, done), 4);
        assert!(!t.is_running(done));
    }

    #[test]
    fn reversing_midway_continues_from_mirror() {
        let mut t = Transition::new(Duration::from_millis(200));
        let start = Instant::now();
        t.start(start);
        let quarter = start + Duration::from_millis(50);
        t.start(quarter);
        let p = t.progress(quarter);
        assert!((p - 0.75).abs() < 0.01, "progress was {p}");
    }

    #[test]
    fn zero_duration_never_runs() {
        let mut t = Transition::new(Duration::ZERO);
        let now = Instant::now();
        t.start(now);
        assert!(!t.is_running(now));
        assert_eq!(t.revealed_rows(3, true, now), 3);
    }

    #[test]
    fn icons_rotate() {
        assert_eq!(rotated_icon("▸"), "▾");
        assert_eq!(rotated_icon("+"), "-");
        assert_eq!(rotated_icon("★"), "★");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("Shipping", 20), "Shipping");
        assert_eq!(truncate("Shipping", 5), "Ship…");
        assert_eq!(truncate("Shipping", 0), "");
    }

    #[test]
    fn header_places_icon_on_requested_side() {
        let item = AccordionItem::new("Billing", "");
        let transition = Transition::new(Duration::ZERO);
        let style = AccordionStyle::default();
        let mut props = PanelProps {
            id: "a-0",
            index: 0,
            opened: true,
            focused: false,
            transition: &transition,
            now: Instant::now(),
            icon: "▸",
            icon_position: IconPosition::Left,
            disable_icon_rotation: false,
            style: &style,
        };
        let text =
            |line: Line| -> String { line.spans.iter().map(|s| s.content.as_ref()).collect() };

        assert_eq!(text(DefaultPanel::header(&item, &props, 12)), "▾ Billing");
        props.icon_position = IconPosition::Right;
        props.disable_icon_rotation = true;
        assert_eq!(text(DefaultPanel::header(&item, &props, 12)), "Billing    ▸");
    }
}
