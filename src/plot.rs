// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Throughput charts. Renders one or more [`Series`] as ops/sec over process
//! count, to PNG or SVG depending on the output file extension.

use crate::{Error, Series};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use std::path::Path;

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

const COLOURS: &[RGBColor] = &[
    hexcolour!(0xAA0000),
    hexcolour!(0x0000FF),
    hexcolour!(0x888888),
    hexcolour!(0x117733),
    hexcolour!(0x882255),
    hexcolour!(0x44AA99),
];

// (dash, gap) in pixels
const DENSE_DASH: (i32, i32) = (5, 1);
const MARKER_SIZE: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
}

struct Styled {
    series: Series,
    colour: RGBColor,
    marker: Option<Marker>,
    dashed: bool,
}

fn plot_error(e: impl std::fmt::Display) -> Error {
    Error::Plot(e.to_string())
}

pub struct Chart {
    caption: Option<String>,
    x_desc: String,
    y_desc: String,
    size: (u32, u32),
    x_start: u64,
    x_step: u64,
    series: Vec<Styled>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            caption: None,
            x_desc: "Number of processes".to_owned(),
            y_desc: "Operations per second".to_owned(),
            size: (1080, 720),
            x_start: 1,
            x_step: 1,
            series: Vec::new(),
        }
    }

    pub fn caption(&mut self, caption: impl AsRef<str>) -> &mut Self {
        self.caption = Some(caption.as_ref().to_owned());
        self
    }

    pub fn x_desc(&mut self, x_desc: impl AsRef<str>) -> &mut Self {
        self.x_desc = x_desc.as_ref().to_owned();
        self
    }

    pub fn y_desc(&mut self, y_desc: impl AsRef<str>) -> &mut Self {
        self.y_desc = y_desc.as_ref().to_owned();
        self
    }

    pub fn size(&mut self, size: (u32, u32)) -> &mut Self {
        self.size = size;
        self
    }

    /// First labelled process count.
    pub fn x_start(&mut self, x_start: u64) -> &mut Self {
        self.x_start = x_start;
        self
    }

    /// Distance between labelled process counts. Zero is treated as one.
    pub fn x_step(&mut self, x_step: u64) -> &mut Self {
        self.x_step = x_step.max(1);
        self
    }

    /// Adds a series drawn as a solid line with no markers.
    pub fn line(&mut self, series: Series) -> &mut Self {
        self.push(series, None, false)
    }

    /// Adds a series drawn densely dashed with a marker at each point.
    pub fn dashed(&mut self, series: Series, marker: Marker) -> &mut Self {
        self.push(series, Some(marker), true)
    }

    fn push(&mut self, series: Series, marker: Option<Marker>, dashed: bool) -> &mut Self {
        let colour = COLOURS[self.series.len() % COLOURS.len()];
        self.series.push(Styled {
            series,
            colour,
            marker,
            dashed,
        });
        self
    }

    fn max_procs(&self) -> u64 {
        self.series
            .iter()
            .map(|s| s.series.max_procs())
            .max()
            .unwrap_or(0)
    }

    fn max_ops(&self) -> u64 {
        self.series
            .iter()
            .map(|s| s.series.max_ops())
            .max()
            .unwrap_or(0)
    }

    fn x_range(&self) -> std::ops::Range<f64> {
        1.0..(self.max_procs().max(1) as f64 + 0.1)
    }

    fn y_range(&self) -> std::ops::Range<f64> {
        0.0..(self.max_ops() as f64 * 1.1).max(1.0)
    }

    /// First labelled process count, pulled down so a tree smaller than
    /// `x_start` still gets a label.
    fn first_tick(&self) -> u64 {
        self.x_start.min(self.max_procs().max(1))
    }

    fn x_ticks(&self) -> Vec<f64> {
        (self.first_tick()..=self.max_procs())
            .step_by(self.x_step as usize)
            .map(|x| x as f64)
            .collect()
    }

    /// Axis label for a mesh position: the process count when it lies on the
    /// tick grid, empty otherwise.
    fn x_label(&self, x: f64) -> String {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-6 || rounded < self.first_tick() as f64 {
            return String::new();
        }
        let procs = rounded as u64;
        if (procs - self.first_tick()) % self.x_step == 0 {
            procs.to_string()
        } else {
            String::new()
        }
    }

    /// Renders every added series to `path`. An `.svg` extension selects the
    /// vector backend, anything else produces a PNG.
    pub fn render(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        if self.series.is_empty() {
            return Err(Error::Plot("no series to draw".to_owned()));
        }

        let svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);

        debug!(
            "rendering {} series to {} ({}x{})",
            self.series.len(),
            path.display(),
            self.size.0,
            self.size.1
        );

        if svg {
            self.draw(SVGBackend::new(path, self.size).into_drawing_area())
        } else {
            self.draw(BitMapBackend::new(path, self.size).into_drawing_area())
        }
    }

    fn draw<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>) -> Result<(), Error> {
        root.fill(&WHITE).map_err(plot_error)?;

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 100)
            .set_label_area_size(LabelAreaPosition::Bottom, 60);
        if let Some(caption) = &self.caption {
            builder.caption(caption, ("sans-serif", 40));
        }

        let mut chart = builder
            .build_cartesian_2d(self.x_range(), self.y_range())
            .map_err(plot_error)?;

        chart
            .configure_mesh()
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            // one mesh position per process count; off-grid ones stay blank
            .x_labels(self.max_procs().max(1) as usize + 1)
            .x_label_formatter(&|x| self.x_label(*x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .x_label_style(("sans-serif", 20))
            .y_label_style(("sans-serif", 20))
            .draw()
            .map_err(plot_error)?;

        for styled in &self.series {
            let colour = styled.colour;
            let points: Vec<(f64, f64)> = styled
                .series
                .points()
                .iter()
                .map(|p| (p.procs as f64, p.ops as f64))
                .collect();

            let anno = if styled.dashed {
                chart
                    .draw_series(DashedLineSeries::new(
                        points.iter().copied(),
                        DENSE_DASH.0,
                        DENSE_DASH.1,
                        colour.stroke_width(2),
                    ))
                    .map_err(plot_error)?
            } else {
                chart
                    .draw_series(LineSeries::new(points.iter().copied(), colour.stroke_width(2)))
                    .map_err(plot_error)?
            };
            anno.label(styled.series.label())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2)));

            match styled.marker {
                Some(Marker::Circle) => {
                    chart
                        .draw_series(
                            points
                                .iter()
                                .map(|&p| Circle::new(p, MARKER_SIZE, colour.filled())),
                        )
                        .map_err(plot_error)?;
                }
                Some(Marker::Square) => {
                    chart
                        .draw_series(points.iter().map(|&p| {
                            EmptyElement::at(p)
                                + Rectangle::new(
                                    [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                                    colour.filled(),
                                )
                        }))
                        .map_err(plot_error)?;
                }
                None => {}
            }
        }

        if self.series.iter().any(|s| !s.series.label().is_empty()) {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(plot_error)?;
        }

        root.present().map_err(plot_error)?;

        Ok(())
    }
}
