use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "animecard", version)]
struct Cli {
    /// Log per-layer decisions and cache activity to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one card as a PNG.
    Render(RenderArgs),
    /// Print a category's default layout configuration as JSON.
    Preset(PresetArgs),
    /// Convert a `.ydk` deck list to JSON, or JSON back to `.ydk`.
    Deck(DeckArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Card JSON: one card, an array, or a `{"data": [...]}` API response.
    #[arg(long)]
    card: PathBuf,

    /// Which card of the input to render (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Asset root; frames, icons and proxied images are resolved under it.
    #[arg(long)]
    assets: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Layout configuration JSON; defaults to the card's category preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render the classic non-layered card instead.
    #[arg(long)]
    classic: bool,

    /// Device pixels per logical pixel.
    #[arg(long, default_value_t = 2.0)]
    pixel_ratio: f64,

    /// Directory searched for fonts before the system fonts.
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Print diagnostics about text font resolution (family name + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,

    /// Print the per-layer render report as JSON.
    #[arg(long)]
    report: bool,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    #[arg(long, value_enum, default_value_t = CategoryChoice::Monster)]
    category: CategoryChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CategoryChoice {
    Monster,
    Spell,
    Trap,
}

impl From<CategoryChoice> for animecard::CardCategory {
    fn from(c: CategoryChoice) -> Self {
        match c {
            CategoryChoice::Monster => Self::Monster,
            CategoryChoice::Spell => Self::Spell,
            CategoryChoice::Trap => Self::Trap,
        }
    }
}

#[derive(Parser, Debug)]
struct DeckArgs {
    /// Input deck: `.ydk` text, or JSON when it ends in `.json`.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Preset(args) => cmd_preset(args),
        Command::Deck(args) => cmd_deck(args),
    }
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cards = animecard::parse_cards_json(&read_text(&args.card, "card json")?)?;
    let card = cards.get(args.index).with_context(|| {
        format!(
            "card index {} out of range ({} cards in '{}')",
            args.index,
            cards.len(),
            args.card.display()
        )
    })?;

    let config = match &args.config {
        Some(path) => animecard::AnimeCardConfig::from_json_str(&read_text(path, "config")?)?,
        None => animecard::preset_for_card(card),
    };

    let settings = animecard::RenderSettings {
        pixel_ratio: args.pixel_ratio,
        font_dir: args.font_dir.clone(),
        ..animecard::RenderSettings::default()
    };
    let fetcher = animecard::FsFetcher::new(&args.assets);
    let mut renderer = animecard::CardRenderer::new(fetcher, settings);

    let canvas = if args.classic {
        pollster::block_on(renderer.render_classic_card(card))?
    } else {
        let (canvas, report) =
            pollster::block_on(renderer.render_card_with_report(card, &config))?;
        if args.report {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        canvas
    };

    if args.dump_fonts {
        eprintln!("text font diagnostics:");
        for (spec, font) in renderer.text_engine().loaded_fonts() {
            eprintln!("  {:?} bold={}:", spec.family, spec.bold);
            eprintln!("    family:      {}", font.family_name);
            eprintln!("    sha256:      {}", sha256_hex(&font.bytes));
        }
    }

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    canvas.save_png(&args.out)?;

    eprintln!(
        "wrote {} ({}x{}, suggested name {})",
        args.out.display(),
        canvas.width(),
        canvas.height(),
        animecard::download_file_name(card)
    );
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let config = animecard::preset_for_category(args.category.into());
    println!("{}", config.to_json_pretty()?);
    Ok(())
}

fn cmd_deck(args: DeckArgs) -> anyhow::Result<()> {
    let text = read_text(&args.in_path, "deck")?;
    let is_json = args
        .in_path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        let deck: animecard::Deck =
            serde_json::from_str(&text).with_context(|| "parse deck JSON")?;
        print!("{}", animecard::to_ydk(&deck));
    } else {
        let deck = animecard::parse_ydk(&text)?;
        println!("{}", serde_json::to_string_pretty(&deck)?);
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
