//! Measures how far `LinearHashMap` lookups have to probe as the table grows, before and
//! after erasing part of the keys, and renders the results as PNG charts.
#![allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]

use linprobe::LinearHashMap;
use plotters::prelude::*;
use rand::{Rng, seq::SliceRandom};

/// Number of keys inserted in each workload
const WORKLOAD_SIZES: [usize; 6] = [1_000, 5_000, 10_000, 50_000, 100_000, 500_000];
/// Share of the inserted keys erased before the second measurement, in percent
const ERASE_PERCENT: usize = 50;
/// Output image size in pixels
const IMAGE_SIZE: (u32, u32) = (1200, 800);

/// Probe statistics for one state of a map
#[derive(Debug, Clone, Copy, Default)]
struct ProbeStats {
    /// Mean number of slots examined per successful lookup
    average: f64,
    /// Largest number of slots examined by a successful lookup
    worst: usize,
}

/// A named line on a chart
struct Series {
    /// Legend label
    label: String,
    /// Line color
    color: RGBColor,
    /// One point per workload
    points: Vec<f64>,
}

/// Looks up every key and collects probe length statistics
fn measure(map: &LinearHashMap<u64, u64>, keys: &[u64]) -> ProbeStats {
    let lengths: Vec<usize> = keys.iter().filter_map(|key| map.probe_length(key)).collect();
    let worst = lengths.iter().copied().max().unwrap_or(0);
    let average = if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    };
    ProbeStats { average, worst }
}

/// Draws one line chart with a point per workload
fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    x_labels: &[String],
    series: &[Series],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";

    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series
        .iter()
        .flat_map(|s| s.points.iter())
        .fold(0.0, |max, &y| if y > max { y } else { max }) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..x_labels.len(), 0.0..max_y.max(1.0))?;

    chart
        .configure_mesh()
        .x_labels(x_labels.len())
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for line in series {
        let line_style = ShapeStyle::from(&line.color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(
                line.points.iter().enumerate().map(|(i, &y)| (i, y)),
                line_style,
            ))?
            .label(&line.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            line.points
                .iter()
                .enumerate()
                .map(|(i, &y)| Circle::new((i, y), 4, line.color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();

    let mut after_insert = Vec::with_capacity(WORKLOAD_SIZES.len());
    let mut after_erase = Vec::with_capacity(WORKLOAD_SIZES.len());

    for &size in &WORKLOAD_SIZES {
        let mut keys: Vec<u64> = (0..size).map(|_| rng.random()).collect();
        keys.shuffle(&mut rng);

        let mut map = LinearHashMap::new();
        for (i, &key) in keys.iter().enumerate() {
            map.insert(key, i as u64);
        }
        let inserted = measure(&map, &keys);

        let (erased, kept) = keys.split_at(size * ERASE_PERCENT / 100);
        for key in erased {
            map.remove(key);
        }
        let remaining = measure(&map, kept);

        println!(
            "{size} keys: capacity = {}, load = {:.3}, avg probes = {:.3} (worst {}), after erase = {:.3} (worst {})",
            map.capacity(),
            map.load_factor(),
            inserted.average,
            inserted.worst,
            remaining.average,
            remaining.worst,
        );

        after_insert.push(inserted);
        after_erase.push(remaining);
    }

    let x_labels: Vec<String> = WORKLOAD_SIZES.iter().map(ToString::to_string).collect();
    let insert_color = RGBColor(50, 90, 220);
    let erase_color = RGBColor(220, 50, 50);
    let erase_label = format!("After erasing {ERASE_PERCENT}%");

    draw_chart(
        "average_probe_length.png",
        "Average Probe Length",
        "Slots examined per lookup",
        &x_labels,
        &[
            Series {
                label: "After inserts".to_string(),
                color: insert_color,
                points: after_insert.iter().map(|s| s.average).collect(),
            },
            Series {
                label: erase_label.clone(),
                color: erase_color,
                points: after_erase.iter().map(|s| s.average).collect(),
            },
        ],
    )?;

    draw_chart(
        "worst_probe_length.png",
        "Worst-Case Probe Length",
        "Slots examined by the slowest lookup",
        &x_labels,
        &[
            Series {
                label: "After inserts".to_string(),
                color: insert_color,
                points: after_insert.iter().map(|s| s.worst as f64).collect(),
            },
            Series {
                label: erase_label,
                color: erase_color,
                points: after_erase.iter().map(|s| s.worst as f64).collect(),
            },
        ],
    )?;

    println!("Generated plot images: average_probe_length.png, worst_probe_length.png");

    Ok(())
}
