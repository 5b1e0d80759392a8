use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use animapper::{
    Animapper, AnimapperConfig, FetchMode, FocusPolicy, FsLoader, LoadState, Page, WidgetId,
    data::canonical_candidates, render,
};

const HOST_MARKUP: &str = r#"<html><body><div id="animapper"/></body></html>"#;

#[derive(Parser, Debug)]
#[command(name = "animapper", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the enhanced SVG (attributes and classes applied).
    Annotate(AnnotateArgs),
    /// Print the classified elements as JSON.
    Inspect(InspectArgs),
    /// Rasterize the animation state after each tick to PNG files.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input SVG. Overrides the config file's `graphic`.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Input JSON data. Overrides the config file's `data`.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Widget config JSON; its locators are relative to the config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the focus policy.
    #[arg(long, value_enum)]
    focus_policy: Option<FocusPolicyChoice>,
}

#[derive(Parser, Debug)]
struct AnnotateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Number of 80 ms ticks to render after the initial state.
    #[arg(long, default_value_t = 8)]
    ticks: u32,

    /// Output directory for `frame_NNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Raster scale relative to the SVG's intrinsic size.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FocusPolicyChoice {
    Always,
    WithRecord,
}

impl From<FocusPolicyChoice> for FocusPolicy {
    fn from(c: FocusPolicyChoice) -> Self {
        match c {
            FocusPolicyChoice::Always => FocusPolicy::Always,
            FocusPolicyChoice::WithRecord => FocusPolicy::WithRecord,
        }
    }
}

#[derive(serde::Serialize)]
struct Report {
    graphic: String,
    data: String,
    interactive: Vec<InteractiveEntry>,
    animated: Vec<AnimatedEntry>,
}

#[derive(serde::Serialize)]
struct InteractiveEntry {
    id: String,
    key: Option<String>,
    title: Option<String>,
    focusable: bool,
}

#[derive(serde::Serialize)]
struct AnimatedEntry {
    id: String,
    frames: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Annotate(args) => cmd_annotate(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn absolute(path: &Path) -> anyhow::Result<String> {
    let abs = std::fs::canonicalize(path)
        .with_context(|| format!("resolve input path '{}'", path.display()))?;
    Ok(abs.to_string_lossy().into_owned())
}

fn build_config(input: &InputArgs) -> anyhow::Result<(AnimapperConfig, PathBuf)> {
    let (mut cfg, root) = match (&input.config, &input.svg, &input.data) {
        (Some(path), _, _) => {
            let cfg = AnimapperConfig::from_path(path)?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (cfg, root)
        }
        (None, Some(svg), Some(data)) => (
            AnimapperConfig::new(absolute(svg)?, absolute(data)?),
            PathBuf::from("."),
        ),
        _ => anyhow::bail!("either --config or both --svg and --data are required"),
    };
    if let Some(svg) = &input.svg {
        cfg.graphic = absolute(svg)?;
    }
    if let Some(data) = &input.data {
        cfg.data = absolute(data)?;
    }
    if let Some(policy) = input.focus_policy {
        cfg.focus_policy = policy.into();
    }
    cfg.fetch_mode = FetchMode::Blocking;
    Ok((cfg, root))
}

fn load(input: &InputArgs) -> anyhow::Result<(Page, WidgetId)> {
    let (cfg, root) = build_config(input)?;
    let mut page = Page::from_markup(HOST_MARKUP, FsLoader::new(root))?;
    let mount = page
        .document()
        .find_by_id(page.document().root(), "animapper")
        .context("host markup has no mount point")?;
    let id = page.attach(Animapper::new(cfg, mount))?;
    page.run_until_idle()?;

    let widget = page.widget(id).context("widget vanished after attach")?;
    if widget.state() != LoadState::Ready {
        anyhow::bail!(
            "initialization did not complete: {}",
            widget.last_error().unwrap_or("unknown failure")
        );
    }
    Ok((page, id))
}

fn cmd_annotate(args: AnnotateArgs) -> anyhow::Result<()> {
    let (page, id) = load(&args.input)?;
    let svg = render::snapshot_svg(&page, id)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, svg)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (page, id) = load(&args.input)?;
    let widget = page.widget(id).context("widget vanished after load")?;
    let doc = page.document();

    let interactive = widget
        .interactives()
        .iter()
        .map(|d| {
            let id = doc.element_id(d.element()).unwrap_or_default().to_owned();
            let (cleaned, head) = canonical_candidates(&id);
            let key = [cleaned, head]
                .into_iter()
                .find(|k| widget.records().contains_key(k));
            InteractiveEntry {
                key,
                title: d.data().and_then(|r| r.title()).map(str::to_owned),
                focusable: doc.attr(d.element(), "tabindex").is_some(),
                id,
            }
        })
        .collect();
    let animated = widget
        .animations()
        .iter()
        .map(|a| AnimatedEntry {
            id: doc.element_id(a.element()).unwrap_or_default().to_owned(),
            frames: a.frames().len(),
        })
        .collect();

    let report = Report {
        graphic: widget.config().graphic.clone(),
        data: widget.config().data.clone(),
        interactive,
        animated,
    };
    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &report).context("write report")?;
    println!();
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (mut page, id) = load(&args.input)?;
    let frames = render::render_ticks(&mut page, id, args.ticks, args.scale)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for (i, img) in frames.iter().enumerate() {
        let path = args.out_dir.join(format!("frame_{i:04}.png"));
        img.save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
    }

    eprintln!("wrote {} frames to {}", frames.len(), args.out_dir.display());
    Ok(())
}
