//! self-test - exercises the solver core against a deal and prints the
//! resulting trick bounds.
//!
//! Usage: self-test [--deal <serialized-deal>] [--play <serialized-play>]
//!                   [--par]
//!
//! With no `--deal`, solves a random deal (notrump, South declarer).

use clap::Parser;

use double_dummy_core::{
    analyze, makeable_tricks_matrix, player_letter, random_deal, suit_letter, Cache, CLUB,
    DIAMOND, EAST, HEART, NORTH, NOTRUMP, SOUTH, SPADE, WEST,
};
use double_dummy_core::serialize::{deserialize_deal, deserialize_play, serialize_deal};

#[derive(Parser)]
#[command(name = "self-test")]
#[command(about = "Smoke-test the double-dummy core against a deal")]
#[command(version)]
struct Args {
    /// Serialized deal (see the format documented on `serialize_deal`); a
    /// random notrump deal is used if omitted.
    #[arg(long)]
    deal: Option<String>,

    /// Serialized play so far (suit+rank pairs, e.g. "S2DA").
    #[arg(long)]
    play: Option<String>,

    /// Print the 4x5 makeable-tricks matrix instead of a single analysis.
    #[arg(long)]
    par: bool,
}

fn main() {
    let args = Args::parse();

    let deal = match &args.deal {
        Some(s) => deserialize_deal(1, s).unwrap_or_else(|e| {
            eprintln!("bad deal: {e}");
            std::process::exit(1);
        }),
        None => random_deal(1),
    };

    println!("deal: {}", serialize_deal(&deal));
    println!(
        "declarer {} trumps {}",
        player_letter(deal.declarer),
        suit_letter(deal.trumps)
    );

    if args.par {
        let matrix = makeable_tricks_matrix(&deal);
        println!("        NT  S  H  D  C");
        for (pl, row) in [NORTH, EAST, SOUTH, WEST].iter().zip(matrix.iter()) {
            print!("{}      ", player_letter(*pl));
            for &strain in &[NOTRUMP, SPADE, HEART, DIAMOND, CLUB] {
                let idx = [CLUB, DIAMOND, HEART, SPADE, NOTRUMP].iter().position(|&s| s == strain).unwrap();
                print!("{:3}", row[idx]);
            }
            println!();
        }
        return;
    }

    let plays = match &args.play {
        Some(s) => deserialize_play(s).unwrap_or_else(|e| {
            eprintln!("bad play: {e}");
            std::process::exit(1);
        }),
        None => Vec::new(),
    };

    let mut cache = Cache::new();
    let analysis = analyze(&deal, &plays, &mut cache, None, true);
    println!(
        "global bound: [{}, {})",
        analysis.global.low, analysis.global.high
    );
}
