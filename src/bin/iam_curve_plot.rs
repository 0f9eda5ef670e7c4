//! Plot the incidence angle modifier curves of the reference collector
//!
//! Generates a PNG plot of the longitudinal and transversal IAM curves with
//! the calibration knots overlaid.
//!
//! Usage:
//! ```
//! cargo run --bin iam_curve_plot
//! ```

use collector_optics::optics::models::REFERENCE_COLLECTOR;
use plotters::prelude::*;

const OUTPUT_PATH: &str = "plots/iam_curves.png";
const TITLE: &str = "Incidence Angle Modifier Curves";
const SAMPLE_POINTS: usize = 200;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging from environment variables
    env_logger::init();

    println!("Generating IAM curves plot...");

    let model = &*REFERENCE_COLLECTOR;
    let (min_deg, max_deg) = model.longitudinal_domain_deg();

    // Sample angles for the curves
    let angles: Vec<f64> = (0..SAMPLE_POINTS)
        .map(|i| min_deg + (max_deg - min_deg) * i as f64 / (SAMPLE_POINTS as f64 - 1.0))
        .collect();
    let longitudinal = model.longitudinal_modifiers(&angles)?;
    let transversal = model.transversal_modifiers(&angles)?;

    // Create plots directory if it doesn't exist
    std::fs::create_dir_all("plots")?;

    let root = BitMapBackend::new(OUTPUT_PATH, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = transversal.iter().copied().fold(1.0f64, f64::max) * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(min_deg..max_deg, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_labels(10)
        .x_label_formatter(&|x| format!("{x:.0}"))
        .y_labels(11)
        .y_label_formatter(&|y| format!("{y:.1}"))
        .x_desc("Angle of Incidence (degrees)")
        .y_desc("Incidence Angle Modifier")
        .axis_desc_style(("sans-serif", 18))
        .draw()?;

    // Draw both axis curves
    for (name, series, color) in [
        ("Longitudinal", &longitudinal, BLUE),
        ("Transversal", &transversal, RED),
    ] {
        let points: Vec<(f64, f64)> = angles.iter().copied().zip(series.iter().copied()).collect();
        chart
            .draw_series(LineSeries::new(points, &color))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    // Overlay the calibration knots
    for (table, color) in [
        (model.longitudinal_table(), BLUE),
        (model.transversal_table(), RED),
    ] {
        chart.draw_series(
            table
                .angles_deg()
                .iter()
                .copied()
                .zip(table.modifiers().iter().copied())
                .map(|(angle, modifier)| Circle::new((angle, modifier), 3, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    println!("Plot saved to: {OUTPUT_PATH}");
    Ok(())
}
