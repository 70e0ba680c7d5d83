use aisles_core::{Cuisine, CuisineFilter, StoreRecord, ViewMode};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker as DotMarker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as GridLine};
use ratatui::widgets::{Block, BorderType, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use super::grid::{GridShape, CARD_HEIGHT};
use super::keys::InputMode;
use super::App;

const ACCENT: Color = Color::Rgb(234, 88, 12);
/// Spacing of the map's background grid, in projected pixels.
const GRID_SPACING: f64 = 50.0;
const MARKER_RADIUS: f64 = 7.0;
const SELECTED_MARKER_RADIUS: f64 = 11.0;
const SIDE_PANEL_WIDTH: u16 = 40;

pub(crate) fn cuisine_colour(cuisine: Cuisine) -> Color {
    match cuisine {
        Cuisine::Japanese => Color::Rgb(220, 38, 38),
        Cuisine::Chinese => Color::Rgb(202, 138, 4),
        Cuisine::Indian => Color::Rgb(234, 88, 12),
        Cuisine::Korean => Color::Rgb(219, 39, 119),
        Cuisine::Thai => Color::Rgb(22, 163, 74),
        Cuisine::Vietnamese => Color::Rgb(37, 99, 235),
    }
}

pub(crate) fn draw(frame: &mut Frame, app: &mut App) {
    let [header, filters, summary, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, app, header);
    draw_filters(frame, app, filters);

    let listing = app.controller.listing();
    let count = listing.len();
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" Found "),
            Span::styled(
                count.to_string(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::raw(if count == 1 { " store" } else { " stores" }),
        ])),
        summary,
    );

    if count == 0 {
        draw_empty(frame, body);
    } else {
        match app.controller.state().mode {
            ViewMode::Grid => draw_grid(frame, app, body),
            ViewMode::Map => draw_map(frame, app, body),
        }
    }

    draw_footer(frame, app, footer);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::bordered()
        .title(Line::styled(
            " Eastern Aisles ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tagline, toggle] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(14)]).areas(inner);
    frame.render_widget(
        Paragraph::new("Discover Asian Groceries Near You")
            .style(Style::default().fg(Color::Gray)),
        tagline,
    );

    let selected = match app.controller.state().mode {
        ViewMode::Grid => 0,
        ViewMode::Map => 1,
    };
    let tabs = Tabs::new(["List", "Map"])
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider("|");
    frame.render_widget(tabs, toggle);
}

fn draw_filters(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();
    let searching = app.input == InputMode::Search;

    let search_line = if state.query.search.is_empty() && !searching {
        Line::from(vec![
            Span::styled("Search: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                "stores, cuisine, or address... (press /)",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("Search: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(state.query.search.clone()),
            Span::styled(
                if searching { "▏" } else { "" },
                Style::default().fg(ACCENT),
            ),
        ])
    };

    let mut chips = vec![Span::styled(
        "Cuisine: ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for chip in CuisineFilter::chips() {
        let style = if chip == state.query.cuisine {
            Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        chips.push(Span::styled(format!(" {chip} "), style));
        chips.push(Span::raw(" "));
    }
    chips.push(Span::styled(
        "  Sort by: ",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    chips.push(Span::raw(state.query.sort.label()));

    let border = if searching { ACCENT } else { Color::DarkGray };
    frame.render_widget(
        Paragraph::new(vec![search_line, Line::from(chips)])
            .block(Block::bordered().border_style(Style::default().fg(border))),
        area,
    );
}

fn draw_empty(frame: &mut Frame, area: Rect) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::styled(
                "No Stores Found",
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                "Try adjusting your filters or search term",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .alignment(Alignment::Center),
        middle,
    );
}

fn draw_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let shape = GridShape::new(area.width, area.height, app.controller.listing().len());
    let first_row = app.scroll_for(shape);
    let cursor = app.cursor;
    let selection = app.controller.state().selection;
    let listing = app.controller.listing();

    let columns = u32::try_from(shape.columns).unwrap_or(1);
    let rows = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); shape.visible_rows])
        .split(area);

    for (slot, row_area) in rows.iter().enumerate() {
        let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns); shape.columns])
            .split(*row_area);
        for (column, card_area) in cells.iter().enumerate() {
            let index = (first_row + slot) * shape.columns + column;
            let Some(store) = listing.stores().get(index) else {
                return;
            };
            draw_card(
                frame,
                store,
                selection.is(store.id),
                index == cursor,
                *card_area,
            );
        }
    }
}

fn draw_card(frame: &mut Frame, store: &StoreRecord, selected: bool, focused: bool, area: Rect) {
    let (border_type, border_colour) = if selected {
        (BorderType::Thick, ACCENT)
    } else if focused {
        (BorderType::Rounded, Color::Yellow)
    } else {
        (BorderType::Rounded, Color::DarkGray)
    };

    let block = Block::bordered()
        .border_type(border_type)
        .border_style(Style::default().fg(border_colour))
        .title(Line::styled(
            format!(" {} Cuisine ", store.cuisine),
            Style::default()
                .fg(cuisine_colour(store.cuisine))
                .add_modifier(Modifier::BOLD),
        ))
        .title_top(
            Line::styled(
                format!(" ★ {:.1} ", store.rating),
                Style::default().fg(Color::Yellow),
            )
            .right_aligned(),
        );

    let mut lines = vec![
        Line::styled(
            store.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(store.description.clone(), Style::default().fg(Color::Gray)),
        Line::from(vec![
            Span::styled("Specialties: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(store.specialties.join(" · ")),
        ]),
        detail_line("Address", &store.address),
        detail_line("Phone", &store.phone),
        detail_line("Hours", &store.hours),
    ];
    if selected {
        lines.push(Line::from(vec![
            Span::styled(
                "[d] Get Directions",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("[o] View on Map", Style::default().fg(ACCENT)),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn detail_line(label: &'static str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<8}"), Style::default().fg(ACCENT)),
        Span::raw(value.to_string()),
    ])
}

fn draw_map(frame: &mut Frame, app: &App, area: Rect) {
    let [map_area, side] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)]).areas(area);

    let controller = &app.controller;
    let viewport = controller.viewport();
    let markers = controller.markers();
    let listing = controller.listing();
    let focused = listing.stores().get(app.cursor).map(|s| s.id);
    let region = controller.catalog().region().to_string();

    let canvas = Canvas::default()
        .block(
            Block::bordered()
                .title(" Map ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .marker(DotMarker::Braille)
        .x_bounds([0.0, viewport.width])
        .y_bounds([0.0, viewport.height])
        .paint(|ctx| {
            let steps = |limit: f64| {
                std::iter::successors(Some(0.0), |v| Some(v + GRID_SPACING))
                    .take_while(move |v| *v <= limit)
            };
            for x in steps(viewport.width) {
                ctx.draw(&GridLine {
                    x1: x,
                    y1: 0.0,
                    x2: x,
                    y2: viewport.height,
                    color: Color::Rgb(48, 48, 48),
                });
            }
            for y in steps(viewport.height) {
                ctx.draw(&GridLine {
                    x1: 0.0,
                    y1: y,
                    x2: viewport.width,
                    y2: y,
                    color: Color::Rgb(48, 48, 48),
                });
            }
            ctx.layer();

            ctx.print(
                GRID_SPACING / 4.0,
                viewport.height - GRID_SPACING / 4.0,
                Line::styled(region.clone(), Style::default().fg(Color::Gray)),
            );

            // Canvas y grows upwards; projected pixels grow downwards.
            for marker in &markers {
                let x = marker.pixel.x;
                let y = viewport.height - marker.pixel.y;
                let radius = if marker.selected {
                    SELECTED_MARKER_RADIUS
                } else {
                    MARKER_RADIUS
                };
                ctx.draw(&Circle {
                    x,
                    y,
                    radius,
                    color: cuisine_colour(marker.store.cuisine),
                });
                if marker.selected {
                    ctx.print(
                        x + radius,
                        y - radius,
                        Line::styled(
                            marker.store.name.clone(),
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        ),
                    );
                } else if focused == Some(marker.store.id) {
                    ctx.print(x, y, Line::styled("◆", Style::default().fg(Color::Yellow)));
                }
            }
        });
    frame.render_widget(canvas, map_area);

    let selected = controller.selected_store();
    let [legend_area, detail_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(if selected.is_some() { 12 } else { 0 }),
    ])
    .areas(side);

    let selection = controller.state().selection;
    let legend: Vec<Line> = listing
        .stores()
        .iter()
        .map(|store| {
            let pointer = if focused == Some(store.id) { "▶ " } else { "  " };
            let mut name_style = Style::default();
            if selection.is(store.id) {
                name_style = name_style.add_modifier(Modifier::BOLD).fg(ACCENT);
            }
            Line::from(vec![
                Span::styled(pointer, Style::default().fg(Color::Yellow)),
                Span::styled("● ", Style::default().fg(cuisine_colour(store.cuisine))),
                Span::styled(store.name.clone(), name_style),
                Span::styled(
                    format!("  ★ {:.1}", store.rating),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(legend).block(
            Block::bordered()
                .title(" Stores ")
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        legend_area,
    );

    if let Some(store) = selected {
        draw_details(frame, store, detail_area);
    }
}

fn draw_details(frame: &mut Frame, store: &StoreRecord, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                store.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                store.cuisine.as_str(),
                Style::default().fg(cuisine_colour(store.cuisine)),
            ),
            Span::styled(
                format!("  ★ {:.1}", store.rating),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::styled(store.description.clone(), Style::default().fg(Color::Gray)),
        detail_line("Address", &store.address),
        detail_line("Phone", &store.phone),
        detail_line("Hours", &store.hours),
        Line::styled(
            "[d] Get Directions",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().border_style(Style::default().fg(ACCENT))),
        area,
    );
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match (&app.status, app.input) {
        (Some(status), _) => Line::styled(status.clone(), Style::default().fg(Color::Yellow)),
        (None, InputMode::Search) => Line::styled(
            " type to search  ⌫ delete  ⏎/Esc done",
            Style::default().fg(Color::DarkGray),
        ),
        (None, InputMode::Normal) => Line::styled(
            " ↑↓ move  ⏎ select  / search  x clear  Tab cuisine  s sort  v view  d directions  o map  q quit",
            Style::default().fg(Color::DarkGray),
        ),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use aisles_core::{
        Catalog, Event, ProjectionSettings, ViewController, ViewState, Viewport,
    };
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::tui::keys::Action;

    fn app() -> App {
        App::new(ViewController::new(
            Catalog::seed().unwrap(),
            ViewState::default(),
            &ProjectionSettings::Fit { padding: 40.0 },
            Viewport {
                width: 800.0,
                height: 600.0,
            },
            "https://maps.example",
        ))
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn grid_shows_summary_and_cards() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("Found 6 stores"));
        assert!(text.contains("Dragon Market"));
        assert!(text.contains("Chinese Cuisine"));
    }

    #[test]
    fn grid_cards_show_full_store_details() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("4950 Lake Michigan Dr, Allendale, MI 49401"));
        assert!(text.contains("10390 48th Ave, Allendale, MI 49401"));
        assert!(text.contains("8 AM - 10 PM"));
        assert!(text.contains("Authentic Japanese groceries, fresh sushi, ramen supplies, mochi"));
    }

    #[test]
    fn empty_listing_renders_empty_state() {
        let mut app = app();
        app.handle(Action::Apply(Event::SetSearch(
            "nothing here".to_string(),
        )));
        let text = screen(&mut app);
        assert!(text.contains("No Stores Found"));
        assert!(text.contains("Try adjusting your filters or search term"));
    }

    #[test]
    fn selected_card_offers_actions() {
        let mut app = app();
        app.handle(Action::Apply(Event::Activate(3)));
        let text = screen(&mut app);
        assert!(text.contains("[d] Get Directions"));
        assert!(text.contains("[o] View on Map"));
    }

    #[test]
    fn map_view_shows_region_and_selected_details() {
        let mut app = app();
        app.handle(Action::Apply(Event::Activate(4)));
        app.handle(Action::Apply(Event::ViewOnMap));
        let text = screen(&mut app);
        assert!(text.contains("Allendale, MI"));
        assert!(text.contains("10440 48th Ave"));
    }
}
