//! Render one composite from a saved thermal payload.
//!
//! Usage: snapshot <payload.json> <out.png> [background image]
use std::fs;
use std::process;

use swinetracklib::module::live::ThermalView;
use swinetracklib::module::thermal::ThermalPayload;
use swinetracklib::module::util::init::resource::init;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: {} <payload.json> <out.png> [background]", args[0]);
        process::exit(2);
    }
    if let Err(e) = snapshot(&args[1], &args[2], args.get(3).map(String::as_str)) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn snapshot(
    payload: &str,
    out: &str,
    background: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let property = init();
    let mut view = ThermalView::from_config(&property.conf);

    let grid = ThermalPayload::from_slice(&fs::read(payload)?)?.into_grid();
    match &grid {
        Some(grid) => {
            let stats = grid.stats();
            println!(
                "{}x{} min {} max {} avg {}",
                grid.width(),
                grid.height(),
                show(stats.min),
                show(stats.max),
                show(stats.avg)
            );
        }
        None => println!("payload has no samples"),
    }
    view.set_grid(grid);
    if let Some(path) = background {
        view.set_background(image::open(path)?);
    }
    view.render().save(out)?;
    Ok(())
}

fn show(v: Option<f64>) -> String {
    v.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".into())
}
