use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use serde::Serialize;

use knapstep::algorithms::backtrack::Decision;
use knapstep::algorithms::fractional::{PlanEntry, Totals};
use knapstep::algorithms::zero_one::{FillStep, Transition};
use knapstep::history::HistoryMode;
use knapstep::model::{Inventory, RawItem};
use knapstep::{EngineConfig, KnapsackEngine, PlayTarget};

/// Walk the 0/1 and fractional knapsack algorithms step by step.
#[derive(Parser, Debug)]
#[command(name = "knapstep", version, about)]
struct Cli {
    /// Knapsack capacity.
    #[arg(long, default_value = "10")]
    capacity: String,

    /// Item as NAME:VALUE:WEIGHT (repeatable). Defaults to A:6:2 B:10:4 C:12:6.
    #[arg(long = "item", value_name = "NAME:VALUE:WEIGHT")]
    items: Vec<String>,

    /// Which algorithm(s) to walk.
    #[arg(long, value_enum, default_value_t = Mode::All)]
    mode: Mode,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Undo storage for the DP fill.
    #[arg(long, value_enum, default_value_t = HistoryArg::Snapshots)]
    history: HistoryArg,

    /// Step in real time through auto-play instead of as fast as possible.
    #[arg(long)]
    play: bool,

    /// Auto-play interval in milliseconds.
    #[arg(long, env = "KNAPSTEP_SPEED_MS", default_value_t = knapstep::autoplay::DEFAULT_SPEED_MS)]
    speed_ms: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Fill,
    Backtrack,
    Greedy,
    All,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum HistoryArg {
    Snapshots,
    Reversible,
}

impl From<HistoryArg> for HistoryMode {
    fn from(arg: HistoryArg) -> Self {
        match arg {
            HistoryArg::Snapshots => HistoryMode::Snapshots,
            HistoryArg::Reversible => HistoryMode::Reversible,
        }
    }
}

#[derive(Serialize, Default)]
struct Trace {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fill: Vec<FillStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<Vec<Vec<u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimum: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    decisions: Vec<Decision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chosen: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    greedy: Vec<PlanEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    greedy_totals: Option<Totals>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let inventory = if cli.items.is_empty() {
        let mut inv = Inventory::default();
        inv.set_capacity(cli.capacity.clone());
        inv
    } else {
        let items = cli.items.iter().map(String::as_str).map(parse_item).collect();
        Inventory::new(items, cli.capacity.clone())
    };
    let config = EngineConfig {
        speed_ms: cli.speed_ms,
        history: cli.history.into(),
    };
    let mut engine = KnapsackEngine::new(inventory, config);
    let text = matches!(cli.format, Format::Text);
    let mut trace = Trace::default();

    if text {
        print_inputs(&engine);
    }

    if matches!(cli.mode, Mode::Fill | Mode::Backtrack | Mode::All) {
        trace.fill = run_fill(&mut engine, cli.play, text);
        trace.table = Some(engine.fill().table().to_rows());
        trace.optimum = engine.fill().optimum();
    }

    if matches!(cli.mode, Mode::Backtrack | Mode::All) {
        match run_backtrack(&mut engine, cli.play, text) {
            Ok((decisions, chosen)) => {
                trace.decisions = decisions;
                trace.chosen = Some(chosen);
            }
            Err(err) => {
                eprintln!("knapstep: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    if matches!(cli.mode, Mode::Greedy | Mode::All) {
        trace.greedy = run_greedy(&mut engine, cli.play, text);
        trace.greedy_totals = Some(engine.greedy().totals());
    }

    if !text {
        match serde_json::to_string_pretty(&trace) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("knapstep: cannot encode trace: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

/// `NAME:VALUE:WEIGHT`; missing fields sanitize to blanks and zeros.
fn parse_item(spec: &str) -> RawItem {
    let mut parts = spec.splitn(3, ':');
    let name = parts.next().unwrap_or_default();
    let value = parts.next().unwrap_or_default();
    let weight = parts.next().unwrap_or_default();
    RawItem::new(name, value, weight)
}

fn print_inputs(engine: &KnapsackEngine) {
    println!("capacity: {}", engine.inventory().capacity());
    for (k, item) in engine.inventory().items().iter().enumerate() {
        println!(
            "  {:>2}. {:<12} value={:<6} weight={}",
            k + 1,
            item.name,
            item.value,
            item.weight
        );
    }
    println!();
}

/// Block until auto-play on `target` stops, sleeping between deadlines.
fn play_until_stopped(
    engine: &mut KnapsackEngine,
    target: PlayTarget,
    mut on_tick: impl FnMut(&KnapsackEngine),
) {
    if engine.start_autoplay(target, Instant::now()).is_err() {
        return;
    }
    while engine.is_playing() {
        let wait = engine
            .player()
            .until_next(Instant::now())
            .unwrap_or(Duration::ZERO);
        thread::sleep(wait);
        if engine.tick(Instant::now()) > 0 {
            on_tick(engine);
        }
    }
}

fn run_fill(engine: &mut KnapsackEngine, play: bool, text: bool) -> Vec<FillStep> {
    if text {
        println!("== 0/1 DP fill ({} cells)", engine.fill().total_steps());
    }
    let mut steps = Vec::new();
    if play {
        play_until_stopped(engine, PlayTarget::Fill, |e| {
            let fill = e.fill();
            while let Some(step) = fill.filled_step(steps.len()) {
                if text {
                    print_fill_step(&step, fill.total_steps());
                }
                steps.push(step);
            }
        });
    } else {
        while let Ok(step) = engine.step_forward() {
            if text {
                print_fill_step(&step, engine.fill().total_steps());
            }
            steps.push(step);
        }
    }
    if text {
        println!();
        for row in engine.fill().table().to_rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>4}")).collect();
            println!("{}", cells.join(""));
        }
        if let Some(best) = engine.fill().optimum() {
            println!("optimum dp[n][W] = {best}");
        }
        println!();
    }
    steps
}

fn print_fill_step(step: &FillStep, total: usize) {
    let explain = match step.transition {
        Transition::TooHeavy { up } => format!("too heavy, copy up = {up}"),
        Transition::Compare {
            skip,
            diag,
            take,
            took,
        } => format!(
            "skip = {skip} vs take = {diag} + v = {take} -> {}",
            if took { "take" } else { "skip" }
        ),
    };
    println!(
        "[{:>4}/{total}] dp[{}][{}] = {:<6} item #{}: {explain}",
        step.step + 1,
        step.cell.row,
        step.cell.col,
        step.value,
        step.item_index + 1
    );
}

fn run_backtrack(
    engine: &mut KnapsackEngine,
    play: bool,
    text: bool,
) -> Result<(Vec<Decision>, Vec<String>), knapstep::Refusal> {
    let decisions = engine.start_backtrack()?.sequence().to_vec();
    if text {
        println!("== backtracking ({} decisions)", decisions.len());
    }
    if play {
        play_until_stopped(engine, PlayTarget::Backtrack, |_| {});
    } else {
        while engine.backtrack_forward().is_ok() {}
    }
    if text {
        for d in &decisions {
            println!(
                "  row {:>3} at w={:<4} -> {}",
                d.row,
                d.capacity,
                if d.chosen { "take" } else { "skip" }
            );
        }
    }
    let chosen: Vec<String> = engine
        .backtrack()
        .map(|b| b.chosen_items().map(|it| it.name.clone()).collect())
        .unwrap_or_default();
    if text {
        if let Some(b) = engine.backtrack() {
            println!(
                "chosen: {{{}}} weight={} value={}",
                chosen.join(", "),
                b.chosen_weight(),
                b.chosen_value()
            );
        }
        println!();
    }
    Ok((decisions, chosen))
}

fn run_greedy(engine: &mut KnapsackEngine, play: bool, text: bool) -> Vec<PlanEntry> {
    if text {
        println!(
            "== fractional greedy ({} steps)",
            engine.greedy().plan().total_steps()
        );
    }
    if play {
        play_until_stopped(engine, PlayTarget::Greedy, |_| {});
    } else {
        while engine.greedy_forward().is_ok() {}
    }
    let entries = engine.greedy().plan().entries().to_vec();
    if text {
        for (row, e) in entries.iter().enumerate() {
            println!(
                "  {:>2}. {:<12} ratio={:<8.3} fraction={:<6.3} weight={:<8.2} value={:.2}",
                row + 1,
                e.name,
                e.ratio,
                e.fraction,
                e.taken_weight,
                e.taken_value
            );
        }
        let t = engine.greedy().totals();
        println!(
            "used {:.2} / {:.2}, remaining {:.2}, total value {:.2}",
            t.used_weight,
            engine.greedy().plan().capacity(),
            t.remaining,
            t.total_value
        );
    }
    entries
}
