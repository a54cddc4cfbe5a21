//! T-x-y chart rendering with `plotters`.
//!
//! Every render draws into an in-memory RGB frame ([`TxyFigure`]). When a
//! figure name is configured the same chart is also written to
//! `<figure_name>.png`, overwriting any previous file.

use crate::data::TxyData;
use crate::error::{DiagramError, DiagramResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::PathBuf;

pub const FIGURE_WIDTH: u32 = 1200;
pub const FIGURE_HEIGHT: u32 = 800;

/// Temperature axis used when there is nothing to plot [K].
const FALLBACK_TEMPERATURE_RANGE: (f64, f64) = (250.0, 400.0);

const BUBBLE_COLOR: RGBColor = RED;
const DEW_COLOR: RGBColor = BLUE;
const LINE_WIDTH: u32 = 2;

/// Options controlling how a diagram is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramOptions {
    /// Save to `<figure_name>.png` when present
    pub figure_name: Option<String>,
    pub print_legend: bool,
    /// Append the sweep pressure to the legend labels
    pub include_pressure: bool,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            figure_name: None,
            print_legend: true,
            include_pressure: false,
        }
    }
}

impl DiagramOptions {
    /// Path of the PNG file, if one is requested.
    pub fn figure_path(&self) -> Option<PathBuf> {
        self.figure_name
            .as_ref()
            .map(|name| PathBuf::from(format!("{name}.png")))
    }
}

/// Text drawn on a diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bubble: String,
    pub dew: String,
}

impl DiagramLabels {
    pub fn new(data: &TxyData, options: &DiagramOptions) -> Self {
        let (bubble, dew) = if options.include_pressure {
            let suffix = format!("P = {} {}", data.pressure, data.pressure_unit);
            (
                format!("Bubble Temp {suffix}"),
                format!("Dew Temp {suffix}"),
            )
        } else {
            ("Bubble Temp".to_string(), "Dew Temp".to_string())
        };

        Self {
            title: format!("T-x-y diagram {}-{}", data.component_1, data.component_2),
            x_label: format!("{} concentration (mol/mol)", data.component_1),
            y_label: format!("Temperature [{}]", data.temperature_unit),
            bubble,
            dew,
        }
    }
}

/// A rendered diagram.
#[derive(Debug, Clone)]
pub struct TxyFigure {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB pixels, `width * height * 3` bytes
    pub pixels: Vec<u8>,
    pub labels: DiagramLabels,
    /// PNG written by this render, if any
    pub saved_path: Option<PathBuf>,
}

/// Temperature axis bounds with a margin around the data.
pub fn temperature_axis(data: &TxyData) -> (f64, f64) {
    match data.temperature_range() {
        None => FALLBACK_TEMPERATURE_RANGE,
        Some((lo, hi)) => {
            let margin = (0.05 * (hi - lo)).max(1.0);
            (lo - margin, hi + margin)
        }
    }
}

fn draw_txy<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &TxyData,
    labels: &DiagramLabels,
    print_legend: bool,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    let (t_min, t_max) = temperature_axis(data);

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&labels.title, ("sans-serif", 40.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, t_min..t_max)?;

    chart
        .configure_mesh()
        .x_desc(&labels.x_label)
        .y_desc(&labels.y_label)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            data.bubble_curve(),
            BUBBLE_COLOR.stroke_width(LINE_WIDTH),
        ))?
        .label(&labels.bubble)
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], BUBBLE_COLOR.stroke_width(LINE_WIDTH))
        });

    chart
        .draw_series(LineSeries::new(
            data.dew_curve(),
            DEW_COLOR.stroke_width(LINE_WIDTH),
        ))?
        .label(&labels.dew)
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], DEW_COLOR.stroke_width(LINE_WIDTH))
        });

    if print_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn plot_error(err: Box<dyn Error>) -> DiagramError {
    DiagramError::Plot {
        message: err.to_string(),
    }
}

/// Render `data` into a frame and, if `options.figure_name` is set, a PNG.
pub fn build_txy_diagram(data: &TxyData, options: &DiagramOptions) -> DiagramResult<TxyFigure> {
    data.validate()?;
    let labels = DiagramLabels::new(data, options);

    let mut pixels = vec![0u8; (FIGURE_WIDTH * FIGURE_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (FIGURE_WIDTH, FIGURE_HEIGHT))
            .into_drawing_area();
        draw_txy(&root, data, &labels, options.print_legend).map_err(plot_error)?;
    }

    let saved_path = match options.figure_path() {
        Some(path) => {
            {
                let root =
                    BitMapBackend::new(&path, (FIGURE_WIDTH, FIGURE_HEIGHT)).into_drawing_area();
                draw_txy(&root, data, &labels, options.print_legend).map_err(plot_error)?;
            }
            tracing::info!(path = %path.display(), points = data.len(), "saved T-x-y diagram");
            Some(path)
        }
        None => None,
    };

    Ok(TxyFigure {
        width: FIGURE_WIDTH,
        height: FIGURE_HEIGHT,
        pixels,
        labels,
        saved_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TxyData {
        let mut data = TxyData::new("water", "ethanol", 101325.0, "Pa", "K");
        data.push_point(0.995, 372.5, 373.0);
        data.push_point(0.5, 355.0, 365.0);
        data.push_point(0.005, 351.6, 351.7);
        data
    }

    #[test]
    fn default_options() {
        let options = DiagramOptions::default();
        assert_eq!(options.figure_name, None);
        assert!(options.print_legend);
        assert!(!options.include_pressure);
        assert_eq!(options.figure_path(), None);
    }

    #[test]
    fn options_from_yaml() {
        let options: DiagramOptions = serde_yaml::from_str("figure_name: out/demo").unwrap();
        assert_eq!(options.figure_path(), Some(PathBuf::from("out/demo.png")));
        assert!(options.print_legend);

        let bad: Result<DiagramOptions, _> = serde_yaml::from_str("legend: false");
        assert!(bad.is_err());
    }

    #[test]
    fn labels_without_pressure() {
        let labels = DiagramLabels::new(&sample(), &DiagramOptions::default());
        assert_eq!(labels.title, "T-x-y diagram water-ethanol");
        assert_eq!(labels.x_label, "water concentration (mol/mol)");
        assert_eq!(labels.y_label, "Temperature [K]");
        assert_eq!(labels.bubble, "Bubble Temp");
        assert_eq!(labels.dew, "Dew Temp");
    }

    #[test]
    fn labels_with_pressure() {
        let options = DiagramOptions {
            include_pressure: true,
            ..DiagramOptions::default()
        };
        let labels = DiagramLabels::new(&sample(), &options);
        assert_eq!(labels.bubble, "Bubble Temp P = 101325 Pa");
        assert_eq!(labels.dew, "Dew Temp P = 101325 Pa");
    }

    #[test]
    fn axis_has_margin_and_fallback() {
        let (lo, hi) = temperature_axis(&sample());
        assert!(lo < 351.6 && hi > 373.0);

        let empty = TxyData::new("water", "ethanol", 101325.0, "Pa", "K");
        assert_eq!(temperature_axis(&empty), FALLBACK_TEMPERATURE_RANGE);

        let mut flat = TxyData::new("a", "b", 1.0, "Pa", "K");
        flat.push_point(0.5, 300.0, 300.0);
        let (lo, hi) = temperature_axis(&flat);
        assert!(lo < 300.0 && hi > 300.0);
    }
}
