//! Tabulate incidence angle modifiers of the reference collector
//!
//! Evaluates the reference calibration over an angle sweep and prints the
//! longitudinal, transversal, and combined directional modifiers.

use clap::Parser;
use collector_optics::angle_grid::AngleGrid;
use collector_optics::optics::models::REFERENCE_COLLECTOR;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tabulate incidence angle modifiers")]
struct Args {
    /// Angle sweep in degrees (start:stop:step)
    #[arg(long, default_value = "0:90:5")]
    angles: AngleGrid,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let model = &*REFERENCE_COLLECTOR;

    println!(
        "{:>7} {:>14} {:>13} {:>13}",
        "angle", "longitudinal", "transversal", "directional"
    );
    for angle in args.angles.to_vec() {
        let longitudinal = model.longitudinal_modifier(angle)?;
        let transversal = model.transversal_modifier(angle)?;
        let directional = model.directional_modifier(angle, angle)?;
        println!("{angle:>7.1} {longitudinal:>14.4} {transversal:>13.4} {directional:>13.4}");
    }

    Ok(())
}
