//! Escrow Tic-Tac-Toe Demo
//!
//! Builds a game tree offline and plays a reference game through it,
//! checking that every selected transaction is pre-authorized by the one
//! before it. Nothing is submitted to a network.
//!
//! Usage: `escrow-tictactoe [BET] [CONFIG_JSON]`

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use escrow_tictactoe::{
    VERSION,
    core::hash::short_hex,
    setup, make_move, Account, Amount, GameConfig, Keypair, TransitionKind,
};

/// Player 1 opens in the centre and wins the left column on round 7.
const DEMO_GAME: [(u8, u8); 7] = [(1, 4), (2, 1), (3, 0), (4, 8), (5, 3), (6, 5), (7, 6)];

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Escrow Tic-Tac-Toe v{}", VERSION);

    let mut args = std::env::args().skip(1);
    let bet: Amount = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid bet {:?}", raw))?,
        None => Amount::ZERO,
    };
    let config = match args.next() {
        Some(path) => GameConfig::from_json_file(&path).with_context(|| format!("loading {}", path))?,
        None => GameConfig::from_env()?,
    };

    info!("Bet: {}", bet);

    demo_game(bet, config)
}

/// Set up a game between two throwaway accounts and play `DEMO_GAME`.
fn demo_game(bet: Amount, config: GameConfig) -> Result<()> {
    let keys = [Keypair::random(), Keypair::random()];
    let players = [
        Account::new(keys[0].account_id(), 1),
        Account::new(keys[1].account_id(), 1),
    ];
    for (i, player) in players.iter().enumerate() {
        info!("Player {}: {}", i, player.id);
    }

    let (mut board, mut setup_tx) = setup(players, bet, config)?;
    info!("Network: {}", board.table().network().passphrase());
    for player in &keys {
        setup_tx.sign(player);
    }
    info!(
        "Setup {} ({} operations, {} signatures, {} byte envelope)",
        hex::encode(setup_tx.hash()),
        setup_tx.operations().len(),
        setup_tx.signatures().len(),
        setup_tx.to_envelope_bytes()?.len()
    );

    let mut parent = setup_tx;
    for (round, position) in DEMO_GAME {
        let mut transition = make_move(&mut board, round, position)?;
        let tx = &mut transition.transaction;
        tx.sign(&keys[(round & 1) as usize]);

        if !parent.authorizes(&tx.hash()) {
            bail!("round {} transaction {} is not pre-authorized", round, short_hex(&tx.hash()));
        }

        let ops: Vec<&str> = tx.operations().iter().map(|op| op.kind()).collect();
        info!(
            "Round {}: player {} plays {} -> {:?} {} [{}] ({} games left, {} byte envelope)",
            round,
            round & 1,
            position,
            transition.kind,
            short_hex(&tx.hash()),
            ops.join(", "),
            transition.games,
            tx.to_envelope_bytes()?.len()
        );

        if transition.kind != TransitionKind::Interior {
            info!("Final board:\n{}", board.state());
            break;
        }
        parent = transition.transaction;
    }

    Ok(())
}
