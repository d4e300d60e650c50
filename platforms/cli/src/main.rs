use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use turmite::{
    analyze, encode, export_png, lint, Palette, ProgramLoader, ProgramManager, RuleTable,
    RunConfig, RunSummary, Turmite, TurmiteError, DEFAULT_GRID_SIZE, DEFAULT_SCALE, DEFAULT_STEPS,
};

/// Runs a turmite over a square grid and draws the result as a PNG.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  turmite --prog demos/langtons-ant.mite --steps 11000
  cat demos/rlr.mite | turmite -s 200 -o rlr.png
  turmite --builtin llrr")]
struct Cli {
    /// The turmite program file to execute. Read from stdin when omitted and piped.
    #[clap(short, long)]
    prog: Option<PathBuf>,

    /// Run a built-in program by name instead of a file
    #[clap(long, conflicts_with = "prog")]
    builtin: Option<String>,

    /// Edge length of the square grid
    #[clap(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    size: usize,

    /// Number of steps to simulate
    #[clap(short = 'n', long, default_value_t = DEFAULT_STEPS)]
    steps: usize,

    /// Pixels per grid cell in the output image
    #[clap(long, default_value_t = DEFAULT_SCALE)]
    scale: u32,

    /// Output image path
    #[clap(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Still draw the grid when the run fails part way
    #[clap(long)]
    render_partial: bool,

    /// List the built-in programs and exit
    #[clap(long)]
    list: bool,

    /// Print the rules in canonical form and exit
    #[clap(long)]
    print_rules: bool,

    /// Print a JSON summary of the run to stdout
    #[clap(long)]
    summary: bool,

    /// Enable debug logging
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "turmite=debug"
    } else {
        "turmite=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), TurmiteError> {
    if cli.list {
        for index in 0..ProgramManager::count() {
            let info = ProgramManager::get_program_info(index)?;
            println!(
                "{:<16} {} states, {} colors, {} rules",
                info.name, info.state_count, info.colors, info.rule_count
            );
        }
        return Ok(());
    }

    let rules = load_rules(cli)?;

    if cli.print_rules {
        print!("{}", encode(&rules));
        return Ok(());
    }

    let palette = Palette::default();
    analyze(&rules, &palette)?;
    for warning in lint(&rules) {
        warn!("{}", warning);
    }

    let config = RunConfig {
        size: cli.size,
        steps: cli.steps,
        scale: cli.scale,
    };
    let mut grid = config.new_grid()?;
    let mut machine = Turmite::new(Arc::new(rules), &grid);

    info!(
        size = config.size,
        steps = config.steps,
        rules = machine.rules().len(),
        "starting run"
    );

    let outcome = machine.run(&mut grid, config.steps);
    let summary = finish_run(outcome, cli.render_partial, || {
        export_png(&grid, &palette, config.scale, &cli.output)?;
        info!(path = %cli.output.display(), "image written");
        Ok(())
    })?;
    info!(
        steps = summary.steps,
        x = summary.position.0,
        y = summary.position.1,
        "run finished"
    );

    if cli.summary {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| TurmiteError::RenderError(e.to_string()))?;
        println!("{}", json);
    }

    Ok(())
}

/// Writes the image for a run and returns its summary.
///
/// A failed run is only drawn with `render_partial`. The run error always wins over
/// an export error, which is then only logged.
fn finish_run<F>(
    outcome: Result<RunSummary, TurmiteError>,
    render_partial: bool,
    export: F,
) -> Result<RunSummary, TurmiteError>
where
    F: FnOnce() -> Result<(), TurmiteError>,
{
    match outcome {
        Ok(summary) => {
            export()?;
            Ok(summary)
        }
        Err(e) => {
            if render_partial {
                if let Err(export_error) = export() {
                    warn!(error = %export_error, "partial image not written");
                }
            }
            Err(e)
        }
    }
}

/// Loads the rules from `--builtin`, `--prog`, or piped stdin, in that order.
fn load_rules(cli: &Cli) -> Result<RuleTable, TurmiteError> {
    if let Some(name) = &cli.builtin {
        return Ok(ProgramManager::get_program_by_name(name)?.rules);
    }

    if let Some(path) = &cli.prog {
        return ProgramLoader::load_program(path);
    }

    if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| TurmiteError::FileError(format!("Failed to read from stdin: {}", e)))?;
        return ProgramLoader::load_program_from_string(&buffer);
    }

    Err(TurmiteError::FileError(
        "Must supply a program with --prog, --builtin, or on stdin".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use turmite::Heading;

    fn summary() -> RunSummary {
        RunSummary {
            steps: 3,
            position: (1, 2),
            heading: Heading::East,
            state: 'a',
        }
    }

    fn left_grid() -> TurmiteError {
        TurmiteError::OutOfBounds { x: 2, y: -1, step: 2 }
    }

    fn write_failed() -> Result<(), TurmiteError> {
        Err(TurmiteError::FileError("Failed to write image".to_string()))
    }

    #[test]
    fn test_finish_run_exports_on_success() {
        let exported = Cell::new(false);
        let result = finish_run(Ok(summary()), false, || {
            exported.set(true);
            Ok(())
        });

        assert_eq!(result, Ok(summary()));
        assert!(exported.get());
    }

    #[test]
    fn test_finish_run_reports_export_failure_on_success() {
        let result = finish_run(Ok(summary()), false, write_failed);
        assert!(matches!(result, Err(TurmiteError::FileError(_))));
    }

    #[test]
    fn test_finish_run_skips_export_after_failure_by_default() {
        let exported = Cell::new(false);
        let result = finish_run(Err(left_grid()), false, || {
            exported.set(true);
            Ok(())
        });

        assert_eq!(result, Err(left_grid()));
        assert!(!exported.get());
    }

    #[test]
    fn test_finish_run_keeps_run_error_when_partial_export_fails() {
        let result = finish_run(Err(left_grid()), true, write_failed);
        assert_eq!(result, Err(left_grid()));
    }

    #[test]
    fn test_finish_run_partial_export() {
        let exported = Cell::new(false);
        let result = finish_run(Err(left_grid()), true, || {
            exported.set(true);
            Ok(())
        });

        assert_eq!(result, Err(left_grid()));
        assert!(exported.get());
    }
}
