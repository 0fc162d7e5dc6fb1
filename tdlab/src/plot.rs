//! Bar charts of aggregated results.
//!
//! Each chart has one bar per algorithm with an error bar of one standard
//! deviation, the algorithm name under its bar, a title and the value range
//! on the vertical axis.
use crate::aggregate::AggregateRow;
use anyhow::Result;
use image::{Rgb, RgbImage};
use log::info;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

mod font;
use font::{draw_text, fit, text_width, GLYPH_HEIGHT};

/// Width of a chart in pixels.
pub const WIDTH: u32 = 480;

/// Height of a chart in pixels.
pub const HEIGHT: u32 = 320;

const MARGIN: u32 = 32;

/// Left edge of the plot area; the vertical axis values sit left of it.
const LEFT: u32 = 64;

const TITLE_SCALE: u32 = 2;
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const ERROR_BAR: Rgb<u8> = Rgb([64, 64, 64]);

/// Bar colors, assigned to algorithms in sorted name order.
pub const PALETTE: [Rgb<u8>; 4] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
];

/// A labeled bar with its error.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Name drawn under the bar.
    pub label: String,

    /// Height of the bar.
    pub value: f64,

    /// Half length of the error bar.
    pub err: f64,
}

/// A bar chart whose vertical range always includes zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    title: String,
    bars: Vec<Bar>,
}

impl BarChart {
    /// Creates a chart from `(label, value, err)` triples. Missing errors are
    /// drawn as zero.
    pub fn new(
        title: impl Into<String>,
        bars: impl IntoIterator<Item = (String, f64, Option<f64>)>,
    ) -> Self {
        Self {
            title: title.into(),
            bars: bars
                .into_iter()
                .map(|(label, value, err)| Bar {
                    label,
                    value,
                    err: err.unwrap_or(0.0).abs(),
                })
                .collect(),
        }
    }

    /// The title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The bars.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Vertical range of the plot area.
    fn range(&self) -> (f64, f64) {
        let lo = self
            .bars
            .iter()
            .map(|b| b.value - b.err)
            .fold(0.0f64, f64::min);
        let hi = self
            .bars
            .iter()
            .map(|b| b.value + b.err)
            .fold(0.0f64, f64::max);
        if hi - lo > 0.0 {
            (lo, hi)
        } else {
            (lo, lo + 1.0)
        }
    }

    /// Pixel row of a value.
    fn row_of(&self, v: f64) -> u32 {
        let (lo, hi) = self.range();
        let top = MARGIN as f64;
        let bottom = (HEIGHT - MARGIN) as f64;
        let y = bottom - (v - lo) / (hi - lo) * (bottom - top);
        y.round().max(top).min(bottom) as u32
    }

    /// Pixel row of the zero baseline.
    pub fn baseline(&self) -> u32 {
        self.row_of(0.0)
    }

    /// Width of the horizontal slot of each bar.
    fn slot(&self) -> u32 {
        (WIDTH - LEFT - MARGIN) / self.bars.len().max(1) as u32
    }

    /// Horizontal pixel span `[x0, x1)` of the `i`-th bar.
    pub fn bar_span(&self, i: usize) -> (u32, u32) {
        let slot = self.slot();
        let x0 = LEFT + slot * i as u32 + slot / 4;
        (x0, x0 + (slot / 2).max(1))
    }

    /// Renders the chart.
    pub fn render(&self) -> RgbImage {
        let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

        for (i, bar) in self.bars.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let (x0, x1) = self.bar_span(i);
            let (y0, y1) = ordered(self.baseline(), self.row_of(bar.value));
            fill(&mut img, x0, x1, y0, y1 + 1, color);

            let xc = (x0 + x1) / 2;
            let (e0, e1) = ordered(self.row_of(bar.value - bar.err), self.row_of(bar.value + bar.err));
            fill(&mut img, xc, xc + 1, e0, e1 + 1, ERROR_BAR);
            let cap = (x1 - x0) / 4;
            fill(&mut img, xc - cap, xc + cap + 1, e0, e0 + 1, ERROR_BAR);
            fill(&mut img, xc - cap, xc + cap + 1, e1, e1 + 1, ERROR_BAR);
        }

        // Axes
        fill(&mut img, LEFT, WIDTH - MARGIN, self.baseline(), self.baseline() + 1, AXIS);
        fill(&mut img, LEFT, LEFT + 1, MARGIN, HEIGHT - MARGIN + 1, AXIS);

        self.draw_labels(&mut img);
        img
    }

    /// Draws the title, the vertical range and the bar labels.
    fn draw_labels(&self, img: &mut RgbImage) {
        let title = fit(&self.title, WIDTH, TITLE_SCALE);
        let x = (WIDTH - text_width(title, TITLE_SCALE)) / 2;
        draw_text(img, x, (MARGIN - GLYPH_HEIGHT * TITLE_SCALE) / 2, title, TITLE_SCALE, AXIS);

        let (lo, hi) = self.range();
        for v in [lo, hi] {
            let text = format!("{:.2}", v);
            let text = fit(&text, LEFT - 8, 1);
            let x = LEFT - 4 - text_width(text, 1);
            let y = self.row_of(v).saturating_sub(GLYPH_HEIGHT / 2);
            draw_text(img, x, y, text, 1, AXIS);
            fill(img, LEFT - 3, LEFT, self.row_of(v), self.row_of(v) + 1, AXIS);
        }

        let slot = self.slot();
        for (i, bar) in self.bars.iter().enumerate() {
            let label = fit(&bar.label, slot.saturating_sub(2), 1);
            let x = LEFT + slot * i as u32 + (slot - text_width(label, 1)) / 2;
            draw_text(img, x, HEIGHT - MARGIN + 8, label, 1, AXIS);
        }
    }

    /// Renders the chart into a PNG file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.render().save(path)?;
        Ok(())
    }
}

fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn fill(img: &mut RgbImage, x0: u32, x1: u32, y0: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

/// Writes `<env>_success_rate.png`, `<env>_eval_return.png` and
/// `<env>_episode_length.png` for every environment in `rows`.
///
/// Returns the paths of the written files.
pub fn create_plots(rows: &[AggregateRow], figures_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let figures_dir = figures_dir.as_ref();
    fs::create_dir_all(figures_dir)?;

    let mut by_env: BTreeMap<&str, Vec<&AggregateRow>> = BTreeMap::new();
    for row in rows.iter() {
        by_env.entry(row.env.as_str()).or_default().push(row);
    }

    let mut paths = Vec::new();
    for (env, mut group) in by_env.into_iter() {
        group.sort_by(|a, b| a.algorithm.cmp(&b.algorithm));
        let stem = env.replace(|c: char| c == '/' || c == '\\', "_");

        let metrics: [(&str, fn(&AggregateRow) -> (f64, Option<f64>)); 3] = [
            ("success_rate", |r: &AggregateRow| (r.mean_success, r.std_success)),
            ("eval_return", |r: &AggregateRow| (r.mean_eval_return, r.std_eval_return)),
            ("episode_length", |r: &AggregateRow| (r.mean_eval_length, r.std_eval_length)),
        ];
        let names: Vec<&str> = group.iter().map(|r| r.algorithm.as_str()).collect();
        for (metric, value_of) in metrics.iter() {
            let chart = BarChart::new(
                format!("{} {}", env, metric.replace('_', " ")),
                group.iter().map(|r| {
                    let (value, err) = value_of(r);
                    (r.algorithm.clone(), value, err)
                }),
            );
            let path = figures_dir.join(format!("{}_{}.png", stem, metric));
            chart.save(&path)?;
            info!("Saved {:?} (bars: {})", path, names.join(", "));
            paths.push(path);
        }
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(bars: &[(&str, f64, Option<f64>)]) -> BarChart {
        BarChart::new(
            "FrozenLake-v1 eval return",
            bars.iter().map(|&(l, v, e)| (l.to_string(), v, e)),
        )
    }

    /// Number of non-background pixels in `[x0, x1) x [y0, y1)`.
    fn ink(img: &RgbImage, x0: u32, x1: u32, y0: u32, y1: u32) -> usize {
        (y0..y1)
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .filter(|&(x, y)| *img.get_pixel(x, y) != BACKGROUND)
            .count()
    }

    #[test]
    fn test_positive_bars() {
        let chart = chart(&[("qlearning", 1.0, Some(0.0)), ("sarsa", 0.5, None)]);
        assert_eq!(chart.bars()[1].err, 0.0);
        let img = chart.render();
        assert_eq!(img.dimensions(), (WIDTH, HEIGHT));
        assert_eq!(chart.baseline(), HEIGHT - MARGIN);

        let (x0, x1) = chart.bar_span(1);
        let x = x0 + 1;
        assert!(x < x1);
        // Half height bar: filled just above the baseline, empty near the top.
        assert_eq!(*img.get_pixel(x, HEIGHT - MARGIN - 2), PALETTE[1]);
        assert_eq!(*img.get_pixel(x, MARGIN + 2), BACKGROUND);

        let (x0, _) = chart.bar_span(0);
        assert_eq!(*img.get_pixel(x0 + 1, MARGIN + 2), PALETTE[0]);
    }

    #[test]
    fn test_negative_bars_hang_below_baseline() {
        let chart = chart(&[("qlearning", -100.0, Some(10.0)), ("sarsa", -50.0, None)]);
        let img = chart.render();
        assert_eq!(chart.baseline(), MARGIN);

        let (x0, _) = chart.bar_span(1);
        assert_eq!(*img.get_pixel(x0 + 1, MARGIN + 2), PALETTE[1]);
        assert_eq!(*img.get_pixel(x0 + 1, HEIGHT - MARGIN - 2), BACKGROUND);
    }

    #[test]
    fn test_all_zero_chart() {
        let chart = chart(&[("qlearning", 0.0, None)]);
        assert_eq!(chart.range(), (0.0, 1.0));
        let img = chart.render();
        assert_eq!(*img.get_pixel(WIDTH / 2, chart.baseline()), AXIS);
    }

    #[test]
    fn test_labels_are_drawn() {
        let labeled = chart(&[("qlearning", 1.0, None), ("sarsa", 0.5, None)]);
        let img = labeled.render();
        assert_eq!(labeled.title(), "FrozenLake-v1 eval return");

        // Title above the plot area, values left of it, names under each bar.
        assert!(ink(&img, 0, WIDTH, 0, MARGIN) > 0);
        assert!(ink(&img, 0, LEFT - 4, MARGIN - 4, MARGIN + 4) > 0);
        assert!(ink(&img, 0, LEFT - 4, HEIGHT - MARGIN - 4, HEIGHT - MARGIN + 4) > 0);
        let slot = labeled.slot();
        // The longer name takes more ink.
        let under = |i: u32| {
            let x0 = LEFT + slot * i;
            ink(&img, x0, x0 + slot, HEIGHT - MARGIN + 2, HEIGHT)
        };
        assert!(under(1) > 0);
        assert!(under(0) > under(1));

        let unlabeled =
            BarChart::new("", vec![(String::new(), 1.0, None), (String::new(), 0.5, None)]).render();
        assert_eq!(ink(&unlabeled, 0, WIDTH, 0, MARGIN - 4), 0);
        assert_eq!(ink(&unlabeled, LEFT, WIDTH, HEIGHT - MARGIN + 2, HEIGHT), 0);
    }
}
