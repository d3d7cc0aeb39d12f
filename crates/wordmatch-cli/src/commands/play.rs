//! The `wordmatch play` command.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

use wordmatch_core::{Game, GameController, Phase};

use super::SourceOptions;
use crate::render;

/// One line of player input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    /// 1-based card position.
    Flip(usize),
    Restart,
    NextLevel,
    Quit,
    Empty,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let text = line.trim().to_lowercase();
        match text.as_str() {
            "" => Input::Empty,
            "q" | "quit" | "exit" => Input::Quit,
            "r" | "restart" | "retry" => Input::Restart,
            "n" | "next" => Input::NextLevel,
            _ => match text.parse::<usize>() {
                Ok(position) if position > 0 => Input::Flip(position),
                _ => Input::Unknown(line.trim().to_string()),
            },
        }
    }
}

fn show(game: &Game) {
    println!("{}", render::screen(game));
}

pub async fn execute(options: SourceOptions, level: u32, seed: Option<u64>) -> Result<()> {
    let (config, source) = options.load()?;
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::info!(provider = source.provider_name(), level, "starting game");
    let (controller, task) = GameController::spawn(source, level, config.timings(), rng);
    let mut updates = controller.subscribe();

    show(&controller.snapshot());
    let first = updates
        .wait_for(|game| game.phase() != Phase::Loading)
        .await
        .map(|game| game.clone())
        .context("game controller stopped")?;
    show(&first);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let game = updates.borrow_and_update().clone();
                show(&game);
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    finish(&controller).await?;
                    break;
                };

                match Input::parse(&line) {
                    Input::Empty => {}
                    Input::Quit => break,
                    Input::Flip(position) => {
                        let (flip, game) = controller.flip(position - 1).await?;
                        updates.borrow_and_update();
                        show(&game);
                        if let Some(note) = render::flip_feedback(flip.outcome, position) {
                            println!("{note}");
                        }
                    }
                    Input::Restart => {
                        let current = controller.snapshot();
                        if current.can_restart() {
                            println!("{}", render::loading(current.level()));
                        }
                        let game = controller.restart().await?;
                        updates.borrow_and_update();
                        show(&game);
                    }
                    Input::NextLevel => {
                        let current = controller.snapshot();
                        if let Some(next) = current.level().checked_add(1) {
                            if current.can_advance() {
                                println!("{}", render::loading(next));
                            }
                        }
                        let game = controller.next_level().await?;
                        updates.borrow_and_update();
                        show(&game);
                    }
                    Input::Unknown(text) => {
                        println!("Unknown input '{text}'. Enter a card number, r, n or q.");
                    }
                }
            }
        }
    }

    drop(controller);
    drop(updates);
    task.await.context("game controller panicked")?;
    Ok(())
}

/// At end of input, let a pending win resolve so the final screen is shown.
async fn finish(controller: &GameController) -> Result<()> {
    let current = controller.snapshot();
    if current.phase() == Phase::Playing && current.all_matched() {
        let game = controller.wait_for(|game| game.phase() != Phase::Playing).await?;
        show(&game);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Input::parse("q"), Input::Quit);
        assert_eq!(Input::parse(" R \n"), Input::Restart);
        assert_eq!(Input::parse("retry"), Input::Restart);
        assert_eq!(Input::parse("n"), Input::NextLevel);
        assert_eq!(Input::parse(""), Input::Empty);
    }

    #[test]
    fn parses_positions() {
        assert_eq!(Input::parse("7"), Input::Flip(7));
        assert_eq!(Input::parse(" 20 "), Input::Flip(20));
        assert_eq!(Input::parse("0"), Input::Unknown("0".into()));
        assert_eq!(Input::parse("-3"), Input::Unknown("-3".into()));
        assert_eq!(Input::parse("dog"), Input::Unknown("dog".into()));
    }
}
