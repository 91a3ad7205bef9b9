use crate::types::{TrendPointRow, TrendSeries};
use crate::util::format_pct;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use svg::node::element::path::Data;
use svg::node::element::{Line, Path as SvgPath, Text};
use svg::Document;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

pub fn trend_rows(series: &TrendSeries) -> Vec<TrendPointRow> {
    series
        .labels
        .iter()
        .zip(&series.values)
        .map(|(label, value)| TrendPointRow {
            month: label.clone(),
            inflation: format!("{}%", format_pct(*value)),
        })
        .collect()
}

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 420.0;
const MARGIN: f64 = 60.0;

/// The trend chart file. Owned by the console session; each `draw` replaces
/// the previous chart and `release` removes it.
#[derive(Debug)]
pub struct TrendChart {
    path: PathBuf,
    drawn: bool,
}

impl TrendChart {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            drawn: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    pub fn draw(&mut self, title: &str, series: &TrendSeries) -> std::io::Result<()> {
        let document = render(title, series);
        svg::save(&self.path, &document)?;
        self.drawn = true;
        debug!(path = %self.path.display(), points = series.values.len(), "chart drawn");
        Ok(())
    }

    pub fn release(&mut self) -> std::io::Result<()> {
        if self.drawn {
            std::fs::remove_file(&self.path)?;
            self.drawn = false;
        }
        Ok(())
    }
}

fn render(title: &str, series: &TrendSeries) -> Document {
    let plot_w = WIDTH - 2.0 * MARGIN;
    let plot_h = HEIGHT - 2.0 * MARGIN;
    // y axis starts at zero unless a month had deflation
    let ymin = series.values.iter().copied().fold(0.0_f64, f64::min);
    let ymax = series.values.iter().copied().fold(1.0_f64, f64::max);
    let span = ymax - ymin;
    let step = if series.values.len() > 1 {
        plot_w / (series.values.len() - 1) as f64
    } else {
        0.0
    };
    let x_at = |i: usize| MARGIN + step * i as f64;
    let y_at = |v: f64| MARGIN + plot_h - (v - ymin) / span * plot_h;

    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
        .set("width", WIDTH)
        .set("height", HEIGHT)
        .add(
            Text::new()
                .set("x", MARGIN)
                .set("y", MARGIN / 2.0)
                .set("font-family", "sans-serif")
                .set("font-size", 16.0)
                .add(svg::node::Text::new(title)),
        )
        .add(
            Line::new()
                .set("x1", MARGIN)
                .set("y1", y_at(0.0))
                .set("x2", WIDTH - MARGIN)
                .set("y2", y_at(0.0))
                .set("stroke", "#999999")
                .set("stroke-width", 1.0),
        );

    let mut data = Data::new();
    for (i, v) in series.values.iter().enumerate() {
        let point = (x_at(i), y_at(*v));
        data = if i == 0 {
            data.move_to(point)
        } else {
            data.line_to(point)
        };
    }
    if !series.values.is_empty() {
        document = document.add(
            SvgPath::new()
                .set("fill", "none")
                .set("stroke", "#479b48")
                .set("stroke-width", 3.0)
                .set("d", data),
        );
    }

    for (i, (label, v)) in series.labels.iter().zip(&series.values).enumerate() {
        document = document
            .add(
                Text::new()
                    .set("x", x_at(i))
                    .set("y", HEIGHT - MARGIN / 2.0)
                    .set("font-family", "sans-serif")
                    .set("font-size", 10.0)
                    .set("text-anchor", "middle")
                    .add(svg::node::Text::new(label.as_str())),
            )
            .add(
                Text::new()
                    .set("x", x_at(i))
                    .set("y", y_at(*v) - 8.0)
                    .set("font-family", "sans-serif")
                    .set("font-size", 10.0)
                    .set("text-anchor", "middle")
                    .add(svg::node::Text::new(format!("{}%", format_pct(*v)))),
            );
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> TrendSeries {
        TrendSeries {
            labels: vec!["Diciembre '24".into(), "Enero '25".into(), "Febrero '25".into()],
            values: vec![2.7, 2.2, 2.4],
        }
    }

    #[test]
    fn chart_is_replaced_then_released() {
        let dir = tempfile::tempdir().unwrap();
        let mut chart = TrendChart::new(dir.path().join("trend.svg"));
        chart.draw("GBA", &series()).unwrap();
        let first = std::fs::read_to_string(chart.path()).unwrap();
        assert!(first.contains("Enero"));

        let mut shorter = series();
        shorter.labels.truncate(1);
        shorter.values.truncate(1);
        chart.draw("Cuyo", &shorter).unwrap();
        let second = std::fs::read_to_string(chart.path()).unwrap();
        assert!(second.contains("Cuyo"));
        assert!(!second.contains("Febrero"));

        chart.release().unwrap();
        assert!(!chart.is_drawn());
        assert!(!chart.path().exists());
    }

    #[test]
    fn trend_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.csv");
        write_csv(&path, &trend_rows(&series())).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Month,Inflation"));
        assert_eq!(lines.next(), Some("Diciembre '24,2.70%"));
    }
}
