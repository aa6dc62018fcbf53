use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use poke_go::player::validate_player_names;
use poke_go::{
    start_match, Catalog, GameConfig, GreedyInput, InputSource, Leaderboard, PassInput, Player,
    RandomInput, RandomRoster, RosterSupplier,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Bot {
    /// Never picks a move
    Pass,
    /// Picks any move at random
    Random,
    /// Picks the move that looks best right now
    Greedy,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a Poke-Go match between two bots")]
struct Args {
    /// RON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "Red")]
    player_one: String,

    #[arg(long, default_value = "Blue")]
    player_two: String,

    #[arg(long, value_enum, default_value = "greedy")]
    bot_one: Bot,

    #[arg(long, value_enum, default_value = "random")]
    bot_two: Bot,

    /// Seed for rosters and bots, for repeatable matches
    #[arg(long)]
    seed: Option<u64>,

    /// Characters per player (overrides the config file)
    #[arg(long)]
    roster_size: Option<usize>,

    /// Seconds per tick (overrides the config file)
    #[arg(long)]
    tick: Option<f32>,

    /// Catalog RON file (overrides the config file)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Leaderboard JSON file to update (overrides the config file)
    #[arg(long)]
    leaderboard: Option<PathBuf>,

    /// Print the match report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn make_bot(kind: Bot, seed: Option<u64>) -> Box<dyn InputSource> {
    match (kind, seed) {
        (Bot::Pass, _) => Box::new(PassInput),
        (Bot::Random, Some(seed)) => Box::new(RandomInput::seeded(seed, 0.1)),
        (Bot::Random, None) => Box::new(RandomInput::new(0.1)),
        (Bot::Greedy, Some(seed)) => Box::new(GreedyInput::seeded(seed)),
        (Bot::Greedy, None) => Box::new(GreedyInput::new()),
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(size) = args.roster_size {
        config.roster_size = size;
    }
    if let Some(tick) = args.tick {
        config.tick_seconds = tick;
    }
    if args.catalog.is_some() {
        config.catalog = args.catalog.clone();
    }
    if args.leaderboard.is_some() {
        config.leaderboard = args.leaderboard.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&args)?;
    validate_player_names(&args.player_one, &args.player_two)?;

    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    info!(characters = catalog.character_count(), "Catalog loaded");

    let mut supplier = match args.seed {
        Some(seed) => RandomRoster::seeded(&catalog, seed),
        None => RandomRoster::new(&catalog),
    };
    let player_one = Player::new(
        args.player_one.trim(),
        supplier.supply(config.roster_size)?,
    )?;
    let player_two = Player::new(
        args.player_two.trim(),
        supplier.supply(config.roster_size)?,
    )?;

    let mut bot_one = make_bot(args.bot_one, args.seed.map(|s| s.wrapping_add(1)));
    let mut bot_two = make_bot(args.bot_two, args.seed.map(|s| s.wrapping_add(2)));

    let mut handle = start_match(player_one, player_two, config.timing);
    let outcome = handle.run_to_completion(
        [bot_one.as_mut(), bot_two.as_mut()],
        config.tick_seconds,
        config.max_ticks,
    )?;
    info!(?outcome, rounds = handle.round_number(), "Match finished");

    for event in handle.drain_events() {
        if let Some(line) = event.format(handle.context()) {
            println!("{}", line);
        }
    }

    let report = handle
        .report()
        .context("Match finished without a report")?;

    if let Some(path) = &config.leaderboard {
        let mut board = Leaderboard::load(path)?;
        handle.publish(&mut board);
        board.save(path)?;
        println!();
        print!("{}", board.render_table());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
