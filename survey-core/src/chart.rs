use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use plotters::prelude::*;

use crate::model::WeatherRecord;

/// Plot-area background shared by all four charts.
const LIGHT_STEEL_BLUE: RGBColor = RGBColor(176, 196, 222);

/// Latitude axis, the same on every chart.
const X_RANGE: (f64, f64) = (-80.0, 100.0);

const CHART_SIZE: (u32, u32) = (800, 600);
const POINT_SIZE: u32 = 4;

/// Which weather metric a chart plots against latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    MaxTemp,
    Humidity,
    Cloudiness,
    WindSpeed,
}

impl Metric {
    pub fn title_label(self) -> &'static str {
        match self {
            Metric::MaxTemp => "Max Temperature",
            Metric::Humidity => "Humidity",
            Metric::Cloudiness => "Cloudiness",
            Metric::WindSpeed => "Wind Speed",
        }
    }

    fn value(self, record: &WeatherRecord) -> Option<f64> {
        match self {
            Metric::MaxTemp => record.max_temp,
            Metric::Humidity => record.humidity.map(f64::from),
            Metric::Cloudiness => record.cloudiness.map(f64::from),
            Metric::WindSpeed => record.wind_speed,
        }
    }
}

/// One chart definition. Axis ranges are fixed by design, never derived
/// from the data.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub metric: Metric,
    pub y_range: (f64, f64),
    pub y_label: &'static str,
    pub file_name: &'static str,
}

pub const CHART_SPECS: [ChartSpec; 4] = [
    ChartSpec {
        metric: Metric::MaxTemp,
        y_range: (-100.0, 150.0),
        y_label: "Max Temperature (F)",
        file_name: "Lat_vs_Temp.png",
    },
    ChartSpec {
        metric: Metric::Humidity,
        y_range: (-20.0, 120.0),
        y_label: "Humidity (%)",
        file_name: "Lat_vs_Humid.png",
    },
    ChartSpec {
        metric: Metric::Cloudiness,
        y_range: (-20.0, 120.0),
        y_label: "Cloudiness (%)",
        file_name: "Lat_vs_Cloud.png",
    },
    ChartSpec {
        metric: Metric::WindSpeed,
        y_range: (-5.0, 50.0),
        y_label: "Wind Speed (mph)",
        file_name: "Lat_vs_Wind.png",
    },
];

/// Latitude/metric pairs for one chart, skipping rows where either side
/// is unset.
fn scatter_points(metric: Metric, records: &[WeatherRecord]) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter_map(|r| Some((r.latitude?, metric.value(r)?)))
        .collect()
}

/// Render one scatter chart to `<dir>/<file_name>`. A write failure is
/// fatal for the run.
pub fn render_chart(
    spec: &ChartSpec,
    records: &[WeatherRecord],
    date: NaiveDate,
    dir: &Path,
) -> Result<PathBuf> {
    let path = dir.join(spec.file_name);
    let points = scatter_points(spec.metric, records);
    let title = format!(
        "City Latitude vs. {} ({})",
        spec.metric.title_label(),
        date.format("%m/%d/%y")
    );

    {
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)
            .with_context(|| format!("Failed to draw chart background: {}", path.display()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(55)
            .build_cartesian_2d(X_RANGE.0..X_RANGE.1, spec.y_range.0..spec.y_range.1)
            .with_context(|| format!("Failed to lay out chart: {}", path.display()))?;

        chart
            .plotting_area()
            .fill(&LIGHT_STEEL_BLUE)
            .with_context(|| format!("Failed to fill plot area: {}", path.display()))?;

        chart
            .configure_mesh()
            .x_desc("Latitude")
            .y_desc(spec.y_label)
            .bold_line_style(&WHITE)
            .light_line_style(WHITE.mix(0.4))
            .draw()
            .with_context(|| format!("Failed to draw chart grid: {}", path.display()))?;

        // Blue points with a black outline.
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), POINT_SIZE, BLUE.filled())),
            )
            .with_context(|| format!("Failed to draw chart points: {}", path.display()))?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), POINT_SIZE, BLACK.stroke_width(1))),
            )
            .with_context(|| format!("Failed to draw point outlines: {}", path.display()))?;

        root.present()
            .with_context(|| format!("Failed to write chart image: {}", path.display()))?;
    }

    Ok(path)
}

/// Render all four latitude charts into `dir`.
pub fn render_all(records: &[WeatherRecord], date: NaiveDate, dir: &Path) -> Result<Vec<PathBuf>> {
    CHART_SPECS
        .iter()
        .map(|spec| render_chart(spec, records, date, dir))
        .collect()
}
