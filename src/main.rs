use mandi_toolkit::analysis::forecast::TrendModel;
use mandi_toolkit::config::Config;
use mandi_toolkit::data::loader::DataLoader;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load("config/forecast.yaml")?;

    // Data file path from the command line, falling back to the config.
    let data_path = env::args().nth(1).unwrap_or_else(|| config.data_path.clone());

    println!("Loading data from: {}", data_path);
    let (table, report) = DataLoader::load_and_clean(&data_path)?;
    println!(
        "Retained {} of {} rows ({} dropped during cleaning)",
        report.rows_retained,
        report.rows_read,
        report.rows_dropped()
    );

    let selection = &config.selection;
    if selection.is_unfiltered() {
        println!("\nNo selection applied; using the full table");
    } else {
        println!("\nSelection:");
        if let Some(year) = selection.year {
            println!("  year: {}", year);
        }
        if let Some(month) = selection.month {
            println!("  month: {}", month);
        }
        if let Some(market) = &selection.market {
            println!("  market: {}", market);
        }
        if let Some(commodity) = &selection.commodity {
            println!("  commodity: {}", commodity);
        }
    }

    let view = table.select(selection);
    println!("\nRows in view: {}", view.len());

    if let Some((first, last)) = view.date_range() {
        let mean_modal = view
            .records()
            .iter()
            .map(|r| r.modal_price)
            .sum::<f64>()
            / view.len() as f64;
        println!("Date range: {} to {}", first, last);
        println!("Mean modal price: {:.2}", mean_modal);
    }

    match TrendModel::fit(&view) {
        Ok(model) => {
            println!(
                "\nFitted trend: slope {:.4}/day, intercept {:.2} (epoch {})",
                model.slope(),
                model.intercept(),
                model.epoch()
            );
            let target = config.forecast.target_date;
            println!(
                "Predicted modal price on {}: {:.2}",
                target,
                model.predict(target)
            );
        }
        // Absence of a model is a normal, displayable state.
        Err(e) => println!("\nNo forecast available: {}", e),
    }

    Ok(())
}
