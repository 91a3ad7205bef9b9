// Console front end.
//
// - Option [1] resolves a province/city to its region and shows monthly,
//   year-over-year and year-to-date inflation plus the monthly trend.
// - Option [2] compares two salaries against the year-over-year figure shown.
// - Option [3] lists savings instruments by monthly rate.
mod calculator;
mod columns;
mod config;
mod error;
mod inflation;
mod loader;
mod normalize;
mod output;
mod purchasing;
mod rates;
mod region;
mod session;
mod trend;
mod types;
mod util;

use anyhow::Context;
use config::Config;
use loader::DirSource;
use output::TrendChart;
use region::{CitySelection, BUENOS_AIRES};
use session::{Published, ResultArea};
use std::io::{self, Write};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use types::HeadlineRow;

/// Everything one console session owns: where tables come from, what is on
/// screen and the chart file.
struct App {
    config: Config,
    source: DirSource,
    results: ResultArea,
    chart: TrendChart,
}

/// Print a label and read one trimmed line; `None` once stdin is closed.
fn read_line(label: &str) -> Option<String> {
    print!("{}: ", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn prompt(label: &str) -> String {
    read_line(label).unwrap_or_default()
}

fn handle_calculate(app: &mut App) {
    let province = prompt("Province");
    let city = if normalize::normalize(&province) == BUENOS_AIRES {
        match calculator::cities(&app.source, &province) {
            Ok(names) if !names.is_empty() => println!("Cities: {}\n", names.join(", ")),
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: {}\n", e);
                return;
            }
        }
        CitySelection::from_input(&prompt("City"))
    } else {
        CitySelection::WholeProvince
    };

    let request = app.results.begin();
    let outcome = calculator::calculate(
        &app.source,
        &province,
        &city,
        &app.config.category,
        app.config.trend_months,
    );
    match app.results.publish(request, outcome) {
        Ok(Published::Shown) => show_results(app),
        Ok(Published::Stale) => {}
        Err(e) => {
            error!(error = %e, "calculation failed");
            eprintln!("Error: {}\n", e);
        }
    }
}

fn show_results(app: &mut App) {
    let Some(shown) = app.results.displayed() else {
        return;
    };
    let report = &shown.report;
    let trend = &shown.trend;

    println!("\nInflation for region {} ({})\n", report.region, report.category);
    let mut rows = vec![
        HeadlineRow {
            figure: "Monthly".to_string(),
            period: report.month_label.clone(),
            percent: util::format_pct(report.monthly),
        },
        HeadlineRow {
            figure: "Year over year".to_string(),
            period: format!("12 months to {}", report.month_label),
            percent: util::format_pct(report.year_over_year),
        },
        HeadlineRow {
            figure: "Year to date".to_string(),
            period: report.year.to_string(),
            percent: util::format_pct(report.year_to_date),
        },
    ];
    if let Some(published) = report.published_monthly {
        rows.push(HeadlineRow {
            figure: "Published monthly".to_string(),
            period: report.month_label.clone(),
            percent: util::format_pct(published),
        });
    }
    output::preview_table_rows(&rows, rows.len());

    let points = output::trend_rows(trend);
    println!("Monthly inflation, last {} months\n", points.len());
    output::preview_table_rows(&points, points.len());

    let out = &app.config.out_dir;
    if let Err(e) = output::write_csv(&out.join("trend.csv"), &points) {
        eprintln!("Write error: {}", e);
    }
    if let Err(e) = output::write_json(&out.join("report.json"), report) {
        eprintln!("Write error: {}", e);
    }
    let title = format!("Inflación mensual: {}", report.region);
    match app.chart.draw(&title, trend) {
        Ok(()) => println!("(Chart saved to {})\n", app.chart.path().display()),
        Err(e) => eprintln!("Chart error: {}", e),
    }
}

fn handle_salary(app: &App) {
    let previous = util::parse_amount(&prompt("Salary a year ago"));
    let current = util::parse_amount(&prompt("Current salary"));
    let (Some(previous), Some(current)) = (previous, current) else {
        println!("Invalid amount. Please enter numbers such as 850000 or 850,000.\n");
        return;
    };
    match app.results.compare_salary(previous, current) {
        Ok(comparison) => {
            println!(
                "\n{} → {}",
                util::format_number(previous, 2),
                util::format_number(current, 2)
            );
            println!("{}\n", purchasing::describe(&comparison));
        }
        Err(e) => eprintln!("Error: {}\n", e),
    }
}

fn handle_rates(app: &App) {
    println!("Categories: todos, plazos_fijos, billeteras, otros_activos");
    let filter = match rates::RateFilter::from_id(&prompt("Category")) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}\n", e);
            return;
        }
    };
    match calculator::rate_table(&app.source, filter) {
        Ok(rows) => {
            let cards = rates::to_cards(&rows);
            println!();
            output::preview_table_rows(&cards, cards.len());
            info!(rows = cards.len(), "rate table shown");
        }
        Err(e) => eprintln!("Error: {}\n", e),
    }
}

fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env().context("reading INFLACION_* settings")?;
    std::fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("creating {}", config.out_dir.display()))?;
    info!(data = %config.data_dir.display(), out = %config.out_dir.display(), "startup");

    let mut app = App {
        source: DirSource::new(&config.data_dir),
        chart: TrendChart::new(config.out_dir.join("trend.svg")),
        results: ResultArea::new(),
        config,
    };

    loop {
        println!("Select an option:");
        println!("[1] Calculate inflation");
        println!("[2] Compare salary");
        println!("[3] Savings rates");
        println!("[4] Exit\n");
        let Some(choice) = read_line("Enter choice") else {
            println!();
            break;
        };
        match choice.as_str() {
            "1" => handle_calculate(&mut app),
            "2" => handle_salary(&app),
            "3" => handle_rates(&app),
            "4" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 1, 2, 3 or 4.\n"),
        }
    }

    app.chart.release().context("removing trend chart")?;
    Ok(())
}
