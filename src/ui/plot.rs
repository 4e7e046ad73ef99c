use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, HLine, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::{self, SeriesColors};
use crate::data::aggregate::ContinentYear;
use crate::format;
use crate::geo::{self, Outline};
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Central panel – one chart per view
// ---------------------------------------------------------------------------

/// Render the current view in the central panel.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let Some(table) = state.table.as_ref() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Abra um arquivo para ver os dados  (Arquivo → Abrir…)");
        });
        return;
    };

    ui.heading(state.view.title());
    ui.add_space(8.0);

    match state.view {
        View::ContinentTotals => {
            let totals = state
                .totals_table()
                .map(|t| t.total_by_continent())
                .unwrap_or_default();
            category_bars(
                ui,
                "continent_totals",
                &totals,
                state.selected_continent.as_deref(),
                color::CONTINENT_HIGHLIGHT,
                None,
            );
        }
        View::ContinentTrend => {
            let grid = state
                .totals_table()
                .map(|t| t.total_by_year_and_continent())
                .unwrap_or_default();
            continent_trend(ui, &grid);
        }
        View::CauseOverYears => {
            let cause = state.selected_cause.as_deref();
            let series = match cause {
                Some(c) => table.total_by_year(Some(c)),
                None => Vec::new(),
            };
            let total = cause.map_or(0, |c| table.total_for_cause(c));
            headline(ui, "Total de mortes:", &format::thousands(total));
            cause_over_years(ui, &series);
        }
        View::YearTrend => {
            let series = state
                .totals_table()
                .map(|t| t.total_by_year(None))
                .unwrap_or_default();
            year_trend(ui, &series, state.selected_year);
        }
        View::CauseTotals => {
            let totals = table.total_by_cause();
            let all = table.all_causes().total_deaths();
            let selected = state.selected_cause.as_deref();
            let selected_total = selected.map_or(0, |c| table.total_for_cause(c));

            ui.label(RichText::new("Total de mortes").size(20.0).color(color::SUBTLE_TEXT));
            ui.horizontal(|ui: &mut Ui| {
                ui.label(
                    RichText::new(format::thousands(selected_total))
                        .size(30.0)
                        .strong()
                        .color(color::ACCENT),
                );
                ui.label(
                    RichText::new(format!("/{}", format::thousands(all)))
                        .size(30.0)
                        .strong()
                        .color(color::HEADLINE),
                );
            });
            category_bars(
                ui,
                "cause_totals",
                &totals,
                selected,
                color::ACCENT,
                selected.map(|_| selected_total),
            );
        }
        View::TopCountries => {
            let top = state
                .totals_table()
                .map(|t| t.top_n_countries(state.config.top_n))
                .unwrap_or_default();
            top_countries(ui, &top, state.outline());
        }
    }
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn headline(ui: &mut Ui, caption: &str, value: &str) {
    ui.label(RichText::new(caption).size(16.0).color(color::SUBTLE_TEXT));
    ui.label(RichText::new(value).size(30.0).strong().color(color::HEADLINE));
    ui.add_space(4.0);
}

fn no_data(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new("Sem dados").size(18.0).color(color::SUBTLE_TEXT));
    });
}

/// Label of the category sitting on an integer x position.
fn category_label(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 0.01 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn year_label(mark: GridMark) -> String {
    if mark.value.fract() == 0.0 {
        format!("{}", mark.value as i64)
    } else {
        String::new()
    }
}

fn deaths_label(mark: GridMark) -> String {
    format::abbreviate(mark.value.max(0.0) as u64)
}

// ---------------------------------------------------------------------------
// Bar charts (continent totals, cause totals)
// ---------------------------------------------------------------------------

/// One bar per key; the selected key gets `accent`, the rest are muted.
/// `reference` draws a dashed line across the whole chart at that value.
fn category_bars(
    ui: &mut Ui,
    id: &str,
    totals: &[(String, u64)],
    selected: Option<&str>,
    accent: Color32,
    reference: Option<u64>,
) {
    if totals.is_empty() {
        no_data(ui);
        return;
    }

    let labels: Vec<String> = totals.iter().map(|(k, _)| k.clone()).collect();
    let bars: Vec<Bar> = totals
        .iter()
        .enumerate()
        .map(|(i, (key, deaths))| {
            Bar::new(i as f64, *deaths as f64)
                .width(0.7)
                .name(format!("{key}: {}", format::thousands(*deaths)))
                .fill(color::highlight(key, selected, accent))
        })
        .collect();
    let right_edge = totals.len() as f64 - 0.5;

    Plot::new(id)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .y_axis_formatter(|mark, _range| deaths_label(mark))
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
            if let Some(value) = reference {
                plot_ui.hline(
                    HLine::new(value as f64)
                        .color(color::ACCENT)
                        .width(2.0)
                        .style(LineStyle::dashed_loose()),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(right_edge, value as f64),
                        RichText::new(format::thousands(value)).size(12.0),
                    )
                    .color(color::ACCENT)
                    .anchor(Align2::RIGHT_BOTTOM),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Line charts
// ---------------------------------------------------------------------------

/// One line per continent over the zero-filled grid.
fn continent_trend(ui: &mut Ui, grid: &[ContinentYear]) {
    if grid.is_empty() {
        no_data(ui);
        return;
    }

    let mut series: Vec<(&str, Vec<[f64; 2]>)> = Vec::new();
    for cell in grid {
        let point = [cell.year as f64, cell.deaths as f64];
        match series.last_mut() {
            Some((name, points)) if *name == cell.continent.as_str() => points.push(point),
            _ => series.push((cell.continent.as_str(), vec![point])),
        }
    }
    let colors = SeriesColors::new(series.iter().map(|(name, _)| *name));

    Plot::new("continent_trend")
        .legend(Legend::default())
        .x_axis_formatter(|mark, _range| year_label(mark))
        .y_axis_formatter(|mark, _range| deaths_label(mark))
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for (name, points) in series {
                plot_ui.line(
                    Line::new(points.into_iter().collect::<PlotPoints>())
                        .name(name)
                        .color(colors.color_for(name))
                        .width(2.0),
                );
            }
        });
}

/// Deaths of one cause per year, every point labelled.
fn cause_over_years(ui: &mut Ui, series: &[(i32, u64)]) {
    if series.is_empty() {
        no_data(ui);
        return;
    }

    let points: Vec<[f64; 2]> = series.iter().map(|&(y, d)| [y as f64, d as f64]).collect();

    Plot::new("cause_over_years")
        .x_axis_formatter(|mark, _range| year_label(mark))
        .show_axes([true, false])
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points.iter().copied().collect::<PlotPoints>())
                    .color(color::ACCENT)
                    .width(2.0)
                    .style(LineStyle::dashed_loose()),
            );
            plot_ui.points(
                Points::new(points.iter().copied().collect::<PlotPoints>())
                    .radius(6.5)
                    .color(color::ACCENT),
            );
            for &(year, deaths) in series {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(year as f64, deaths as f64),
                        RichText::new(format::abbreviate(deaths)).size(13.0),
                    )
                    .color(color::ACCENT)
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

/// Yearly totals, either every year labelled or only the selected one.
fn year_trend(ui: &mut Ui, series: &[(i32, u64)], selected: Option<i32>) {
    let total: u64 = series.iter().map(|(_, d)| d).sum();
    match selected {
        None => headline(ui, "Total de mortes:", &format::thousands(total)),
        Some(year) => {
            let in_year = series
                .iter()
                .find(|(y, _)| *y == year)
                .map_or(0, |(_, d)| *d);
            headline(
                ui,
                "Mortes selecionadas / Total:",
                &format!("{} / {}", format::thousands(in_year), format::thousands(total)),
            );
        }
    }

    if series.is_empty() {
        no_data(ui);
        return;
    }

    let labelled: Vec<(i32, u64)> = series
        .iter()
        .copied()
        .filter(|(y, _)| selected.map_or(true, |s| s == *y))
        .collect();

    Plot::new("year_trend")
        .x_axis_formatter(|mark, _range| year_label(mark))
        .show_axes([true, false])
        .show_grid(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(
                    series
                        .iter()
                        .map(|&(y, d)| [y as f64, d as f64])
                        .collect::<PlotPoints>(),
                )
                .color(color::ACCENT)
                .width(2.0)
                .style(LineStyle::dashed_loose()),
            );
            plot_ui.points(
                Points::new(
                    labelled
                        .iter()
                        .map(|&(y, d)| [y as f64, d as f64])
                        .collect::<PlotPoints>(),
                )
                .radius(6.5)
                .color(color::ACCENT),
            );
            for &(year, deaths) in &labelled {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(year as f64, deaths as f64),
                        RichText::new(format::millions(deaths)).size(12.0),
                    )
                    .color(color::ACCENT)
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Top countries: map + table
// ---------------------------------------------------------------------------

fn top_countries(ui: &mut Ui, top: &[(String, u64)], outline: Option<&Result<Outline, String>>) {
    if top.is_empty() {
        no_data(ui);
        return;
    }

    match outline {
        Some(Err(e)) => {
            ui.label(RichText::new(format!("Mapa indisponível: {e}")).color(Color32::RED));
        }
        Some(Ok(lines)) => country_map(ui, top, lines),
        None => country_map(ui, top, &[]),
    }

    ui.add_space(8.0);
    country_table(ui, top);
}

fn country_map(ui: &mut Ui, top: &[(String, u64)], outline: &[Vec<[f64; 2]>]) {
    let max = top.iter().map(|(_, d)| *d).max().unwrap_or(0).max(1) as f64;

    Plot::new("top_countries_map")
        .height(380.0)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-60.0)
        .include_y(85.0)
        .show_axes([false, false])
        .show_grid(false)
        .show(ui, |plot_ui| {
            for line in outline {
                plot_ui.line(
                    Line::new(line.iter().copied().collect::<PlotPoints>())
                        .color(Color32::from_gray(170))
                        .width(0.8),
                );
            }
            for (country, deaths) in top {
                let Some(place) = geo::place(country) else {
                    continue;
                };
                let radius = 4.0 + 18.0 * (*deaths as f64 / max).sqrt() as f32;
                plot_ui.points(
                    Points::new(PlotPoints::new(vec![[place.lon, place.lat]]))
                        .radius(radius)
                        .color(color::ACCENT.gamma_multiply(0.7))
                        .name(place.display),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(place.lon, place.lat),
                        RichText::new(format!("{}\n{}", place.display, format::abbreviate(*deaths)))
                            .size(11.0),
                    )
                    .color(color::HEADLINE)
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

fn country_table(ui: &mut Ui, top: &[(String, u64)]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(32.0))
        .column(Column::remainder())
        .column(Column::auto().at_least(100.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("País");
            });
            header.col(|ui| {
                ui.strong("Mortes");
            });
        })
        .body(|mut body| {
            for (rank, (country, deaths)) in top.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(format!("{}", rank + 1));
                    });
                    row.col(|ui| {
                        ui.label(geo::display_name(country));
                    });
                    row.col(|ui| {
                        ui.label(format::thousands(*deaths));
                    });
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_only_on_integer_positions() {
        let labels = vec!["AVC".to_string(), "Câncer".to_string()];
        assert_eq!(category_label(&labels, 0.0), "AVC");
        assert_eq!(category_label(&labels, 1.001), "Câncer");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }
}
