//! Local single-player mode: the heuristic opponent plays O.
//!
//! No lobby, registry or network involvement; this drives the pure game
//! logic directly on stdin/stdout.

use anyhow::{Context, Result, bail};
use gridrow::{Game, GameStatus, Mark, choose_move};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Runs a line-based game loop until the game concludes.
///
/// The human plays X and enters board indices; the computer answers for
/// O after the configured thinking delay.
pub async fn run(width: usize, height: usize, delay: Duration) -> Result<()> {
    let mut game = Game::new(width, height)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "You are X on a {}x{} board. Enter a square index (0-{}).",
        width,
        height,
        width * height - 1
    );

    loop {
        println!("{}\n", game.board().display());

        match game.status() {
            GameStatus::Won(win) => {
                println!("{} wins with {:?}!", win.mark, win.line);
                return Ok(());
            }
            GameStatus::Draw => {
                println!("It's a draw!");
                return Ok(());
            }
            GameStatus::InProgress => {}
        }

        if game.to_move() == Mark::X {
            println!("Your move:");
            let Some(line) = lines.next_line().await? else {
                bail!("stdin closed before the game ended");
            };
            let index: usize = match line.trim().parse() {
                Ok(index) => index,
                Err(_) => {
                    println!("Enter a square index as a number.");
                    continue;
                }
            };
            if let Err(err) = game.place(index) {
                println!("{err}");
            }
        } else {
            tokio::time::sleep(delay).await;
            let Some(index) = choose_move(game.board(), Mark::O) else {
                bail!("no vacant square left for the computer");
            };
            debug!(index, "computer move");
            println!("Computer plays {index}.");
            game.place(index)
                .context("computer chose an invalid square")?;
        }
    }
}
