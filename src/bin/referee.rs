//! Referee Binary
//!
//! Plays one seeded game between four random bots and prints the result.
//!
//! Options: --seed, --max-turns, --hand-size, --jokers, --forfeit-on-cancel,
//! --return-unplayable, --events

use clap::Parser;
use tock_engine::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a seeded Tock game between bots", long_about = None)]
struct Args {
    /// Seed for the deck and every bot.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many turns (0 = unlimited).
    #[arg(long, default_value_t = 20_000)]
    max_turns: u32,

    #[arg(long, default_value_t = 5)]
    hand_size: usize,

    #[arg(long, default_value_t = 2)]
    jokers: usize,

    /// A cancelled selection forfeits the seat.
    #[arg(long)]
    forfeit_on_cancel: bool,

    /// Keep unplayable cards in hand instead of discarding them.
    #[arg(long)]
    return_unplayable: bool,

    /// Print every board event.
    #[arg(long)]
    events: bool,
}

/// Prints events to stdout.
struct Printer;

impl PresentationSink for Printer {
    fn on_event(&mut self, event: &BoardEvent) {
        println!("{}", event);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let policy = if args.return_unplayable {
        UnplayablePolicy::ReturnToHand
    } else {
        UnplayablePolicy::Discard
    };
    let config = GameConfig::default()
        .with_seed(args.seed)
        .with_max_turns(args.max_turns)
        .with_hand_size(args.hand_size)
        .with_jokers(args.jokers)
        .with_forfeit_on_cancel(args.forfeit_on_cancel)
        .with_unplayable_policy(policy);

    let mut seats: ColorMap<Box<dyn InputSource>> = ColorMap::new(|color| {
        Box::new(RandomBot::for_seat(args.seed, color)) as Box<dyn InputSource>
    });

    let outcome = Game::new(config).and_then(|mut game| {
        let result = if args.events {
            play_game(&mut game, &mut seats, &mut Printer)
        } else {
            play_game(&mut game, &mut seats, &mut NullSink)
        }?;
        Ok((result, game))
    });

    match outcome {
        Ok((GameResult::Winner(color), game)) => {
            println!("{} wins after {} turns", color, game.turn_number());
            for color in Color::all() {
                println!(
                    "  {:<6} finished {}",
                    color.to_string(),
                    game.board().finished_count(color)
                );
            }
        }
        Ok((GameResult::TurnLimit { turns }, _)) => {
            println!("no winner after {} turns", turns);
        }
        Err(e) => {
            eprintln!("game aborted: {}", e);
            std::process::exit(1);
        }
    }
}
