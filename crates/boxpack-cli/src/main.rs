use anyhow::Result;
use boxpack_core::{
    InstanceParams, LocalSearchStats, Packer, PackingMonitor, PackingRequest, PackingResult,
    SelectionStrategy, Solution, TestInstance,
};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boxpack")]
#[command(about = "Rectangle Bin Packer - Estimate how many square boxes a set of rectangles needs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack rectangles from a request file
    Pack {
        /// Input file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the ordering strategy (area-desc, width-desc, height-desc)
        #[arg(short, long)]
        strategy: Option<SelectionStrategy>,

        /// Stop after the greedy pass
        #[arg(long)]
        no_local_search: bool,
    },

    /// Generate a reproducible random request file
    Generate {
        #[arg(long, default_value_t = 1)]
        instance_id: u32,

        /// Edge length of the square boxes
        #[arg(long)]
        box_length: u32,

        /// Number of rectangles
        #[arg(short = 'n', long)]
        count: u32,

        #[arg(long)]
        min_width: u32,

        #[arg(long)]
        max_width: u32,

        #[arg(long)]
        min_height: u32,

        #[arg(long)]
        max_height: u32,

        /// Random seed; derived from the other parameters when omitted
        #[arg(long)]
        seed: Option<u64>,

        /// Output request file (YAML or JSON)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run every strategy on one request and compare box counts
    Compare {
        /// Input file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pack {
            input,
            output,
            strategy,
            no_local_search,
        } => {
            pack_command(input, output, strategy, no_local_search)?;
        }
        Commands::Generate {
            instance_id,
            box_length,
            count,
            min_width,
            max_width,
            min_height,
            max_height,
            seed,
            output,
        } => {
            let params = InstanceParams {
                instance_id,
                box_length,
                num_rectangles: count,
                min_width,
                max_width,
                min_height,
                max_height,
                seed,
            };
            generate_command(params, output)?;
        }
        Commands::Compare { input } => {
            compare_command(input)?;
        }
    }

    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn load_request(input: &Path) -> Result<PackingRequest> {
    let content = std::fs::read_to_string(input)?;
    let request = if is_yaml(input) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(request)
}

/// Total quantity over all specs, summed wide so large quantities cannot overflow.
fn requested_rectangles(request: &PackingRequest) -> u64 {
    request
        .rectangles
        .iter()
        .map(|spec| u64::from(spec.quantity))
        .sum()
}

fn pack_command(
    input: PathBuf,
    output: Option<PathBuf>,
    strategy: Option<SelectionStrategy>,
    no_local_search: bool,
) -> Result<()> {
    println!("{}", "🔍 Loading input...".bright_blue());

    let mut request = load_request(&input)?;
    info!(path = %input.display(), specs = request.rectangles.len(), "loaded request");
    if no_local_search {
        request.local_search = false;
    }
    let strategy = strategy.unwrap_or(request.strategy);

    let rectangle_count = requested_rectangles(&request);
    println!(
        "  {} rectangles to pack",
        rectangle_count.to_string().bright_white().bold()
    );
    println!(
        "  Box size: {}",
        format!("{0}x{0}", request.edge_length).bright_white().bold()
    );
    println!();

    println!(
        "{}",
        format!("🚀 Running greedy ({strategy})...").bright_blue()
    );

    let packer = Packer::new(request)?;
    let result = packer.pack_with_monitor(strategy, &mut ProgressBar::new())?;

    println!();
    println!("{}", "✅ Packing complete!".bright_green().bold());
    println!();

    print_report(&result);

    // Save output
    let json = serde_json::to_string_pretty(&result)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved result to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn generate_command(params: InstanceParams, output: PathBuf) -> Result<()> {
    println!("{}", "🎲 Generating instance...".bright_blue());

    let instance = TestInstance::generate(params)?;
    println!("  {}", instance.to_string().bright_white());
    println!("  {}", instance.size_statistics());

    let request = instance.to_request(SelectionStrategy::default());
    let content = if is_yaml(&output) {
        serde_yaml::to_string(&request)?
    } else {
        serde_json::to_string_pretty(&request)?
    };
    std::fs::write(&output, content)?;

    println!();
    println!(
        "{} Saved request to {}",
        "✅".bright_green(),
        output.display().to_string().bright_white()
    );

    Ok(())
}

fn compare_command(input: PathBuf) -> Result<()> {
    let request = load_request(&input)?;
    let packer = Packer::new(request)?;

    println!("{}", "📊 Strategy comparison:".bright_yellow().bold());
    println!(
        "  {:<12} {:>8} {:>8} {:>8} {:>10}",
        "strategy", "greedy", "final", "bound", "waste %"
    );

    for strategy in SelectionStrategy::ALL {
        let result = packer.pack_with_monitor(strategy, &mut boxpack_core::NoOpMonitor)?;
        println!(
            "  {} {:>8} {} {:>8} {:>10.1}",
            format!("{:<12}", strategy).bright_white(),
            result.greedy_containers,
            format!("{:>8}", result.summary.total_containers)
                .bright_green()
                .bold(),
            result.summary.lower_bound,
            result.summary.waste_percentage
        );
    }

    Ok(())
}

fn print_report(result: &PackingResult) {
    println!("{}", "📊 Results:".bright_yellow().bold());
    println!(
        "  Number of boxes = {}",
        result
            .summary
            .total_containers
            .to_string()
            .bright_white()
            .bold()
    );

    for container in &result.containers {
        println!(
            "    • Box {} | Rectangles: {} | Used area: {}",
            container.index,
            container.rectangles.len(),
            container.used_area.to_string().bright_white()
        );
    }

    println!();
    println!(
        "  Greedy boxes: {}",
        result.greedy_containers.to_string().bright_white()
    );
    if let Some(stats) = &result.local_search {
        println!(
            "  Local search: {} passes, {} moves ({:?})",
            stats.passes, stats.moves, stats.outcome
        );
    }
    println!(
        "  Area lower bound: {}",
        result.summary.lower_bound.to_string().bright_white()
    );
    println!(
        "  Total waste: {:.1}%",
        result.summary.waste_percentage
    );
    println!("  Time: {} ms", result.computation_time_ms);
    println!();
}

/// Terminal progress bar written to stderr.
struct ProgressBar {
    started: Instant,
    width: usize,
}

impl ProgressBar {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            width: 30,
        }
    }

    fn draw(&self, filled: usize) {
        let bar: String = (0..self.width)
            .map(|i| if i < filled { '#' } else { '-' })
            .collect();
        let mut stderr = std::io::stderr();
        // Drawing is best effort and never fails the run
        let _ = write!(
            stderr,
            "\r[{}] {:.4}s",
            bar,
            self.started.elapsed().as_secs_f64()
        );
        let _ = stderr.flush();
    }

    fn clear(&self) {
        let _ = write!(std::io::stderr(), "\r{}\r", " ".repeat(self.width + 16));
    }
}

impl PackingMonitor for ProgressBar {
    fn name(&self) -> &str {
        "ProgressBar"
    }

    fn on_greedy_start(&mut self, _strategy: SelectionStrategy, _total: usize) {
        self.started = Instant::now();
    }

    fn on_item_placed(&mut self, processed: usize, total: usize, _containers: usize) {
        self.draw(self.width * processed / total.max(1));
    }

    fn on_greedy_end(&mut self, solution: &Solution) {
        self.clear();
        eprintln!("Greedy finished: {} boxes", solution.container_count());
        self.started = Instant::now();
    }

    fn on_pass_end(&mut self, pass: u64, _moved: bool, _containers: usize) {
        // No known total: animate instead
        if pass % 64 == 0 {
            self.draw((pass / 64) as usize % (self.width + 1));
        }
    }

    fn on_local_search_end(&mut self, solution: &Solution, stats: &LocalSearchStats) {
        self.clear();
        eprintln!(
            "Local search finished: {} boxes after {} passes",
            solution.container_count(),
            stats.passes
        );
    }
}
