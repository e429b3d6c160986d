use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollfx::{FrameQueue, MemoryPage, Page as _, ScrollController};

#[derive(Parser, Debug)]
#[command(name = "scrollfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one frame pass at a fixed scroll offset and dump the page state as JSON.
    Frame(FrameArgs),
    /// Drive the scheduler loop over a scroll ramp, printing writes per frame.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scroll offset to sample.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Final scroll offset of the ramp.
    #[arg(long)]
    to: f64,

    /// Number of simulated frames.
    #[arg(long, default_value_t = 60)]
    frames: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn read_page_json(path: &Path) -> anyhow::Result<MemoryPage> {
    let f = File::open(path).with_context(|| format!("open page '{}'", path.display()))?;
    let r = BufReader::new(f);
    let page: MemoryPage = serde_json::from_reader(r).with_context(|| "parse page JSON")?;
    Ok(page)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut page = read_page_json(&args.in_path)?;
    page.validate()?;

    let mut ctrl = ScrollController::new(&mut page, FrameQueue::new());
    page.set_scroll_y(args.scroll);
    ctrl.on_scroll(page.viewport().scroll_y);
    if ctrl.scheduler_mut().take() {
        ctrl.frame_pass(&mut page);
    }

    let json = serde_json::to_string_pretty(&page).with_context(|| "serialize page state")?;
    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut page = read_page_json(&args.in_path)?;
    page.validate()?;
    if args.frames == 0 {
        anyhow::bail!("--frames must be > 0");
    }

    let mut ctrl = ScrollController::new(&mut page, FrameQueue::new());
    let from = page.viewport().scroll_y;

    for i in 0..args.frames {
        // One simulated user scroll per frame along a linear ramp.
        let t = f64::from(i + 1) / f64::from(args.frames);
        let y = from + (args.to - from) * t;
        page.set_scroll_y(y);
        ctrl.on_scroll(page.viewport().scroll_y);

        if ctrl.scheduler_mut().take() {
            ctrl.frame_pass(&mut page);
            print_frame(i, &page);
        }
    }

    eprintln!("done: scroll_y={}", page.viewport().scroll_y);
    Ok(())
}

fn print_frame(i: u32, page: &MemoryPage) {
    let mut writes = Vec::new();
    for (id, style) in &page.applied {
        let name = page
            .elements
            .get(id.0 as usize)
            .map_or("?", |e| e.name.as_str());
        if let Some(t) = style.transform {
            writes.push(format!("{name}={t}"));
        }
        if let Some(o) = style.opacity {
            writes.push(format!("{name}.opacity={o}"));
        }
    }
    println!(
        "frame {i}: scroll_y={} {}",
        page.viewport.scroll_y,
        writes.join(" ")
    );
}
