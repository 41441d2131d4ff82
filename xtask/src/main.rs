use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for circle-demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format check, clippy, build and every test
    Ci,
    /// Format check and clippy only
    Check,
    /// Run tests, optionally limited to some library modules
    Test {
        /// Library module to test (repeatable)
        #[arg(long, value_enum)]
        module: Vec<Module>,
        /// Also run doc tests
        #[arg(long)]
        doc: bool,
    },
    /// Run the circle benchmarks
    Bench {
        /// Only run benchmarks whose name contains this filter
        filter: Option<String>,
    },
    /// Open the demo window
    Run {
        /// Build in release mode
        #[arg(long)]
        release: bool,
        /// Log filter passed through RUST_LOG (e.g. "circle_demo=trace")
        #[arg(long)]
        log: Option<String>,
    },
}

/// Library modules with their own unit tests
#[derive(Clone, Copy, ValueEnum)]
enum Module {
    Session,
    Display,
    Debug,
    Guard,
}

impl Module {
    fn path(self) -> &'static str {
        match self {
            Module::Session => "session::",
            Module::Display => "display::",
            Module::Debug => "debug::",
            Module::Guard => "guard::",
        }
    }
}

/// One cargo invocation in a pipeline
struct Step {
    name: &'static str,
    args: &'static [&'static str],
}

const CHECK_STEPS: &[Step] = &[
    Step {
        name: "Format",
        args: &["fmt", "--all", "--", "--check"],
    },
    Step {
        name: "Clippy",
        args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    },
];

const CI_STEPS: &[Step] = &[
    Step {
        name: "Build",
        args: &["build", "--all-targets"],
    },
    Step {
        name: "Test",
        args: &["test", "--package", "circle-demo"],
    },
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => {
            let steps: Vec<&Step> = CHECK_STEPS.iter().chain(CI_STEPS).collect();
            run_pipeline("CI", &steps)
        }
        Commands::Check => run_pipeline("Checks", &CHECK_STEPS.iter().collect::<Vec<_>>()),
        Commands::Test { module, doc } => run_tests(&module, doc),
        Commands::Bench { filter } => {
            let mut cmd = cargo(&["bench", "--bench", "circle_bench"]);
            if let Some(filter) = filter {
                cmd.arg("--").arg(filter);
            }
            execute(&mut cmd)
        }
        Commands::Run { release, log } => run_demo(release, log.as_deref()),
    }
}

fn cargo(args: &[&str]) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(args);
    cmd
}

fn run_pipeline(title: &str, steps: &[&Step]) -> Result<()> {
    println!("{}", format!("=== {} ===", title).bold().blue());
    let start = Instant::now();

    for step in steps {
        println!("{} {}", "→".blue(), step.name.bold());
        if let Err(err) = execute(&mut cargo(step.args)) {
            println!("{} {} failed", "✗".red().bold(), step.name);
            return Err(err);
        }
    }

    println!(
        "\n{} {} passed in {:.2}s",
        "✓".green().bold(),
        title,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run_tests(modules: &[Module], doc: bool) -> Result<()> {
    if modules.is_empty() {
        execute(&mut cargo(&["test", "--package", "circle-demo"]))?;
    }

    let mut failed = Vec::new();
    for &module in modules {
        println!("{} {} tests", "→".blue(), module.path().bold());
        if execute(&mut cargo(&["test", "--lib", module.path()])).is_err() {
            failed.push(module.path());
        }
    }

    if doc && !modules.is_empty() {
        execute(&mut cargo(&["test", "--doc"]))?;
    }

    if !failed.is_empty() {
        anyhow::bail!("Tests failed in: {}", failed.join(", "));
    }
    Ok(())
}

fn run_demo(release: bool, log: Option<&str>) -> Result<()> {
    let mut cmd = cargo(&["run", "--bin", "circle-demo"]);
    if release {
        cmd.arg("--release");
    }
    if let Some(filter) = log {
        println!("{} RUST_LOG={}", "→".blue(), filter.cyan());
        cmd.env("RUST_LOG", filter);
    }

    let start = Instant::now();
    execute(&mut cmd)?;
    println!(
        "{} Demo closed after {:.2}s",
        "✓".green().bold(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn execute(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("Command failed with exit code: {}", status);
    }

    Ok(())
}
