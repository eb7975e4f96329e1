//! One-shot diet analysis from the command line
//! Usage: cargo run --bin analyze_foods -- [--age 18-30|31-47] [--report out.pdf] [--charts-dir dir] <food>...

use std::path::PathBuf;
use std::process::ExitCode;

use pda::config::Config;
use pda::models::{AgeGroup, FoodList};
use pda::tools::{analysis, reports};

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    age_group: AgeGroup,
    report: Option<PathBuf>,
    charts_dir: Option<PathBuf>,
    foods: Vec<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--age" => {
                let value = args.next().ok_or("--age needs a value")?;
                parsed.age_group = AgeGroup::from_str(&value)
                    .ok_or_else(|| format!("Unknown age group '{}'. Use 18-30 or 31-47.", value))?;
            }
            "--report" => {
                parsed.report = Some(args.next().ok_or("--report needs a path")?.into());
            }
            "--charts-dir" => {
                parsed.charts_dir = Some(args.next().ok_or("--charts-dir needs a path")?.into());
            }
            _ => parsed.foods.push(arg),
        }
    }

    Ok(parsed)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let mut foods = FoodList::new();
    for food in &args.foods {
        if let Err(e) = foods.add(food) {
            eprintln!("{} ({})", e, food);
        }
    }

    let config = Config::from_env();
    let run = match analysis::analyze(&foods, args.age_group, &config) {
        Ok(run) => run,
        Err(e) => {
            for warning in e.warnings() {
                eprintln!("{}", warning.message);
            }
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", analysis::render_text(&run));

    if let Some(dir) = &args.charts_dir {
        match reports::save_charts(&run, dir) {
            Ok(files) => println!("Charts: {}, {}", files.macronutrients, files.micronutrients),
            Err(e) => {
                eprintln!("Chart generation failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(path) = &args.report {
        match reports::generate_diet_report(&run, &path.display().to_string()) {
            Ok(result) => println!("{}", result.message),
            Err(e) => {
                eprintln!("Report generation failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_foods_keep_their_order() {
        let parsed = parse_args(args(&["Banana", "--age", "31-47", "Cheddar cheese"])).unwrap();
        assert_eq!(parsed.foods, vec!["Banana", "Cheddar cheese"]);
        assert_eq!(parsed.age_group, AgeGroup::Age31To47);
        assert!(parsed.report.is_none());
    }

    #[test]
    fn test_output_paths() {
        let parsed = parse_args(args(&["--report", "out/diet.pdf", "--charts-dir", "charts", "Egg"])).unwrap();
        assert_eq!(parsed.report, Some(PathBuf::from("out/diet.pdf")));
        assert_eq!(parsed.charts_dir, Some(PathBuf::from("charts")));
    }

    #[test]
    fn test_bad_age_group() {
        assert!(parse_args(args(&["--age", "65"])).is_err());
        assert!(parse_args(args(&["--age"])).is_err());
    }
}
