mod logic;
mod render;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use ladder_game::PathResolver;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{
    LogicTester, ScenarioResult, SeedInfo, full_scenario_names, get_scenario, ladder_for,
    list_scenarios, resolve_seed_inputs,
};
use render::{render_diagram, render_permutation};
use util::{parse_rails, split_csv};

#[derive(Debug, Parser)]
#[command(name = "ladder-tester", version = "0.1.0")]
#[command(about = "Automated QA sweeps for the ladder game engine")]
struct Args {
    /// Scenarios to run (comma-separated, `all` for every sweep)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated numbers or session codes like 5-MAPLE42)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Rail counts to sweep (comma-separated, ranges like 1-10 allowed)
    #[arg(long, default_value = "1-10")]
    rails: String,

    /// Number of iterations per scenario and rail count
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print each seed's ladder and permutation before testing
    #[arg(long)]
    show: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let seed_tokens = split_csv(&args.seeds);
    let seed_infos = resolve_seed_inputs(&seed_tokens)?;
    let rails = parse_rails(&args.rails)?;

    if args.show {
        show_ladders(&mut stdout().lock(), &seed_infos, &rails)?;
    }

    let all_results = run_logic_scenarios(&args, &scenarios, &seed_infos, &rails);

    write_reports(&args, &all_results, start_time)?;

    if all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:15} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🪜 Ladder Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.contains(&"all".to_string()) {
        scenarios.retain(|s| s != "all");
        for name in full_scenario_names() {
            if !scenarios.iter().any(|s| s == name) {
                scenarios.push(name.to_string());
            }
        }
    }
    scenarios
}

fn show_ladders(out: &mut dyn Write, seeds: &[SeedInfo], rails: &[usize]) -> Result<()> {
    for seed in seeds {
        for rail_count in seed.rail_counts(rails) {
            writeln!(out, "Seed {} with {rail_count} rails", seed.label())?;
            match ladder_for(seed.seed, rail_count) {
                Ok(diagram) => {
                    write!(out, "{}", render_diagram(&diagram))?;
                    let permutation = PathResolver::resolve_all(&diagram)?;
                    write!(out, "{}", render_permutation(&permutation))?;
                }
                Err(err) => writeln!(out, "  {}", format!("{err:#}").red())?,
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn run_logic_scenarios(
    args: &Args,
    scenarios: &[String],
    seeds: &[SeedInfo],
    rails: &[usize],
) -> Vec<ScenarioResult> {
    let mut results: Vec<ScenarioResult> = Vec::new();

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let logic_tester = LogicTester::new(args.verbose);

    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            let scenario_results =
                logic_tester.run_scenario(&scenario, seeds, rails, args.iterations);
            results.extend(scenario_results);
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }

    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                logic::reports::generate_json_report(&mut output_target, results)?;
            }
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Ladder Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            let duration = start_time.elapsed();
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(&mut output_target, results, duration)?;
            }
        }
    }

    if args.report == "console" {
        let duration = start_time.elapsed();
        writeln!(&mut output_target)?;
        writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn base_args() -> Args {
        Args {
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            rails: "1-10".to_string(),
            iterations: 1,
            report: "json".to_string(),
            verbose: false,
            output: None,
            show: false,
        }
    }

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ladder-tester-{}-{name}", std::process::id()))
    }

    fn sample_result(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: "smoke".to_string(),
            seed: 1337,
            passed,
            iterations_run: 3,
            successful_iterations: if passed { 3 } else { 2 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["failure".to_string()]
            },
            average_duration: Duration::from_millis(10),
            performance_data: vec![Duration::from_millis(10)],
        }
    }

    #[test]
    fn expands_all_scenarios_keyword() {
        let expanded = expand_scenarios("smoke,all");
        assert_eq!(expanded.first().map(String::as_str), Some("smoke"));
        assert!(expanded.contains(&"bijection".to_string()));
        assert!(expanded.contains(&"session".to_string()));
        assert_eq!(expanded.iter().filter(|s| *s == "smoke").count(), 1);
    }

    #[test]
    fn expand_scenarios_without_all_preserves_order() {
        let expanded = expand_scenarios("descent,smoke");
        assert_eq!(expanded, vec!["descent".to_string(), "smoke".to_string()]);
    }

    #[test]
    fn run_logic_scenarios_skips_unknown_names() {
        let args = base_args();
        let seeds = vec![SeedInfo::from_numeric(42)];
        let results = run_logic_scenarios(
            &args,
            &["smoke".to_string(), "nope".to_string()],
            &seeds,
            &[2, 3],
        );
        assert_eq!(results.len(), 1);
        assert!(results[0].passed);
        assert_eq!(results[0].iterations_run, 2);
    }

    #[test]
    fn write_reports_emits_json_output() {
        let temp = temp_file("report.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert_eq!(content.trim(), "[]");
    }

    #[test]
    fn write_reports_emits_markdown_output() {
        let temp = temp_file("report.md");
        let args = Args {
            report: "markdown".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(false)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("### ❌ smoke"));
    }

    #[test]
    fn write_reports_console_has_total_time() {
        let temp = temp_file("report.txt");
        let args = Args {
            report: "console".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(true)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Total time"));
    }

    #[test]
    fn maybe_list_scenarios_writes_output() {
        let temp = temp_file("scenarios.txt");
        let args = Args {
            list_scenarios: true,
            output: Some(temp.clone()),
            ..base_args()
        };
        assert!(maybe_list_scenarios(&args).unwrap());
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Available scenarios"));
        assert!(content.contains("share-code"));
    }

    #[test]
    fn maybe_list_scenarios_is_noop_without_flag() {
        assert!(!maybe_list_scenarios(&base_args()).unwrap());
    }

    #[test]
    fn show_ladders_respects_pinned_codes() {
        let seeds = resolve_seed_inputs(&["3-MAPLE42".to_string()]).unwrap();
        let mut buffer = Vec::new();
        show_ladders(&mut buffer, &seeds, &[1, 2, 4]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("with 3 rails"));
        assert!(!text.contains("with 4 rails"));
        assert!(text.contains("rail 2 -> terminal"));
    }
}
