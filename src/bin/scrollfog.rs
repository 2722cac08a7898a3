use std::{
    collections::BTreeMap,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "scrollfog", version)]
struct Cli {
    /// Log binding lifecycle events to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the styles of a preset reveal at one progress value.
    Sample(SampleArgs),
    /// Scroll a page description and print every style write as a JSON line.
    Simulate(SimulateArgs),
    /// Check a page description without running it.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[arg(long, value_enum, default_value_t = KindChoice::Section)]
    kind: KindChoice,

    /// Progress through the trigger window, clamped to [0, 1].
    #[arg(long)]
    progress: f64,

    /// Text used by the `text` kind.
    #[arg(long, default_value = "Quiet fog lifts")]
    text: String,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long, default_value_t = 0.0)]
    from: f64,

    #[arg(long)]
    to: f64,

    /// Scroll distance per simulated frame, in pixels.
    #[arg(long, default_value_t = 40.0)]
    step: f64,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    Plain,
    Section,
    Content,
    Image,
    Text,
}

const FRAME_SECONDS: f64 = 1.0 / 60.0;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_page_json(path: &Path) -> anyhow::Result<scrollfog::PageSpec> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open page '{}'", path.display()))?;
    let page = scrollfog::PageSpec::from_json(&s)
        .with_context(|| format!("load page '{}'", path.display()))?;
    Ok(page)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.progress.is_finite(), "progress must be finite");

    let presentation = match args.kind {
        KindChoice::Plain => scrollfog::Presentation::Plain,
        KindChoice::Section => scrollfog::Presentation::Section(Default::default()),
        KindChoice::Content => scrollfog::Presentation::Content(Default::default()),
        KindChoice::Image => scrollfog::Presentation::Image(Default::default()),
        KindChoice::Text => scrollfog::Presentation::Text(scrollfog::TextOptions::new(
            args.text,
            scrollfog::SplitMode::Words,
        )),
    };

    let mut doc = scrollfog::HeadlessDocument::new(800.0)?;
    let root = doc.root();
    let bounds = scrollfog::Rect::new(0.0, 1000.0, 1280.0, 1600.0);
    let target = doc.add_element(root, bounds);
    match &presentation {
        scrollfog::Presentation::Content(opts) => {
            for i in 0..3 {
                let y = bounds.y0 + f64::from(i) * 200.0;
                let child =
                    doc.add_element(target, scrollfog::Rect::new(0.0, y, 1280.0, y + 160.0));
                doc.mark(child, &opts.child_marker);
            }
        }
        scrollfog::Presentation::Image(_) => {
            doc.add_element(target, bounds);
        }
        _ => {}
    }

    let config = presentation.default_config();
    let mounted = presentation.mount(&mut doc, target)?;
    let plan = presentation.compile(target, &config, &mounted);
    let progress = scrollfog::Progress::new(args.progress);

    let tracks: Vec<_> = plan
        .tracks
        .iter()
        .zip(plan.sample(progress))
        .map(|(track, (node, style))| {
            let css: BTreeMap<_, _> = style.declarations().into_iter().collect();
            serde_json::json!({
                "role": track.role,
                "node": node,
                "style": style,
                "css": css,
            })
        })
        .collect();

    let out = serde_json::json!({
        "kind": presentation.name(),
        "progress": progress.get(),
        "timeline": plan.total,
        "tracks": tracks,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.step.is_finite() && args.step > 0.0,
        "step must be finite and > 0"
    );
    anyhow::ensure!(
        args.from.is_finite() && args.to.is_finite(),
        "scroll range must be finite"
    );

    let page = read_page_json(&args.in_path)?;
    let mut mounted = page.mount().context("mount page")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut emit = |scroll_y: f64, writes: Vec<scrollfog::StyleWrite>| -> anyhow::Result<()> {
        for w in writes {
            let line = serde_json::json!({
                "scroll_y": scroll_y,
                "node": w.node,
                "property": w.property,
                "value": w.value,
            });
            writeln!(out, "{line}")?;
        }
        Ok(())
    };

    emit(0.0, mounted.doc.take_writes())?;

    let direction = if args.to >= args.from { 1.0 } else { -1.0 };
    let distance = (args.to - args.from).abs();
    let steps = (distance / args.step).ceil() as u64;
    for i in 0..=steps {
        let y = args.from + direction * (i as f64 * args.step).min(distance);
        let now = i as f64 * FRAME_SECONDS;
        mounted.doc.scroll_and_pump(&mut mounted.stage, y, now);
        emit(y, mounted.doc.take_writes())?;
    }

    for (name, id, _) in &mounted.bindings {
        if let Some(b) = mounted.stage.binding(*id) {
            let s = b.stats();
            eprintln!(
                "{name}: {:?}, {} scroll events, {} frames applied, {} stale",
                b.lifecycle(),
                s.scroll_events,
                s.frames_applied,
                s.stale_frames
            );
        }
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let page = read_page_json(&args.in_path)?;
    page.mount().context("mount page")?;
    println!("ok: {} reveals", page.reveals.len());
    Ok(())
}
