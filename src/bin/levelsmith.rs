use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "levelsmith", version)]
struct Cli {
    /// Log per-level progress.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write level scenes, levels.json and placeholder assets into a project.
    Generate(GenerateArgs),
    /// Print the scene of a single level to stdout.
    Scene(SceneArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Project directory to write into.
    #[arg(long)]
    out: PathBuf,

    /// Number of levels to synthesize when no config is given.
    #[arg(long, default_value_t = 3)]
    levels: usize,

    /// Level configuration JSON (`{"levels": [...]}`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Give synthesized levels an NPC.
    #[arg(long, default_value_t = false)]
    npc: bool,

    /// Level style.
    #[arg(long, value_enum, default_value_t = StyleChoice::TopDown)]
    style: StyleChoice,

    /// Seed for random and scatter layouts.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Custom player sprite (SVG).
    #[arg(long)]
    player_svg: Option<String>,

    /// Default NPC sprite (SVG) for levels without their own.
    #[arg(long)]
    npc_svg: Option<String>,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Level configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Level number (1-based).
    #[arg(long)]
    level: usize,

    /// Level style.
    #[arg(long, value_enum, default_value_t = StyleChoice::TopDown)]
    style: StyleChoice,

    /// Seed for random and scatter layouts.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    TopDown,
    Platformer,
}

impl From<StyleChoice> for levelsmith::GameStyle {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::TopDown => levelsmith::GameStyle::TopDown,
            StyleChoice::Platformer => levelsmith::GameStyle::Platformer,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Scene(args) => cmd_scene(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut opts = levelsmith::GenerateOptions::new(&args.out);
    opts.level_count = args.levels;
    opts.config_path = args.config;
    opts.include_npc = args.npc;
    opts.style = args.style.into();
    opts.seed = args.seed;
    opts.player_svg = args.player_svg;
    opts.npc_svg = args.npc_svg;

    let project = levelsmith::generate_project(&opts)
        .with_context(|| format!("generate project in '{}'", args.out.display()))?;

    for path in &project.scenes {
        eprintln!("wrote {}", path.display());
    }
    eprintln!("wrote {}", project.levels_json.display());
    Ok(())
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let set = levelsmith::load_level_set(&args.config)?
        .with_context(|| format!("read level config '{}'", args.config.display()))?;
    set.validate()?;

    let level = args
        .level
        .checked_sub(1)
        .and_then(|i| set.levels.get(i))
        .with_context(|| {
            format!(
                "level {} out of range (config has {})",
                args.level,
                set.levels.len()
            )
        })?;

    let doc = levelsmith::build_level_scene(
        level,
        args.level,
        args.style.into(),
        args.seed,
        &levelsmith::LayoutSettings::default(),
        &levelsmith::SceneProfile::default(),
    )?;
    print!("{}", levelsmith::render_scene(&doc)?);
    Ok(())
}
