//! Replay command handler.
//!
//! Looks a hand up in the game's JSONL history and prints it street by
//! street. The same renderer shows each hand's summary during play.

use std::io::Write;
use std::path::PathBuf;

use drawpoker_engine::logger::{HandRecord, Stage};

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_action_record, format_hand};
use crate::history::HistoryStore;
use crate::ui;

pub fn handle_replay_command(
    game_id: &str,
    hand_id: &str,
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources(config_path.as_deref())
        .map_err(|e| CliError::Config(e.to_string()))?;
    let store = HistoryStore::new(data_dir.unwrap_or(resolved.config.data_dir));

    let hands = store.load_hands(game_id)?;
    let record = hands
        .iter()
        .find(|h| h.hand_id == hand_id)
        .ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Hand {} not found in game {} ({} hand(s) recorded)",
                hand_id,
                game_id,
                hands.len()
            ))
        })?;
    render_hand(record, out, true)?;
    Ok(())
}

/// Prints a finished hand. `full` adds the dealt hands, the discarded cards
/// and the hands after the draw; without it only what the table saw is
/// shown: actions, draw counts, revealed hands and payouts.
pub(crate) fn render_hand(
    record: &HandRecord,
    out: &mut dyn Write,
    full: bool,
) -> std::io::Result<()> {
    let name = |id| record.player_name(id).unwrap_or("?");
    let dealer = record
        .players
        .get(record.dealer)
        .map(|p| p.name.as_str())
        .unwrap_or("?");

    writeln!(out, "\n=== Hand {} (game {}) ===", record.hand_id, record.game_id)?;
    writeln!(
        out,
        "Dealer: {}  Blinds: {}/{}",
        dealer, record.blinds.small, record.blinds.big
    )?;

    if full {
        ui::section(out, "seats")?;
        for seat in &record.players {
            writeln!(out, "  {}: {}", seat.name, seat.initial_stack)?;
        }
        ui::section(out, "dealt")?;
        for (id, cards) in &record.initial_hands {
            writeln!(out, "  {}: {}", name(*id), format_hand(cards))?;
        }
    }

    render_stage(record, Stage::Blinds, out)?;
    render_stage(record, Stage::PreExchange, out)?;

    if let Some(discards) = &record.discards {
        ui::section(out, "exchange")?;
        for (id, cards) in discards {
            if full && !cards.is_empty() {
                writeln!(
                    out,
                    "  {} exchanges {}",
                    name(*id),
                    format_hand(cards)
                )?;
            } else {
                writeln!(out, "  {} draws {}", name(*id), cards.len())?;
            }
        }
        if full && let Some(final_hands) = &record.final_hands {
            for (id, cards) in final_hands {
                writeln!(out, "  {} now holds {}", name(*id), format_hand(cards))?;
            }
        }
    }

    render_stage(record, Stage::PostExchange, out)?;

    if let Some(showdown) = &record.showdown {
        ui::section(out, "showdown")?;
        for entry in showdown {
            writeln!(
                out,
                "  {}: {} {}",
                name(entry.player_id),
                format_hand(&entry.hand),
                entry.rank
            )?;
        }
    }

    ui::section(out, "result")?;
    writeln!(out, "  Pot: {}", record.pot)?;
    for payout in &record.winners {
        writeln!(out, "  {} wins {}", name(payout.player_id), payout.amount)?;
    }
    for stack in &record.final_stacks {
        writeln!(out, "  {}: {}", stack.name, stack.final_stack)?;
    }
    Ok(())
}

fn render_stage(record: &HandRecord, stage: Stage, out: &mut dyn Write) -> std::io::Result<()> {
    let mut actions = record.actions.iter().filter(|a| a.stage == stage).peekable();
    if actions.peek().is_none() {
        return Ok(());
    }
    ui::section(out, stage.as_str())?;
    for action in actions {
        let who = record.player_name(action.player_id).unwrap_or("?");
        writeln!(out, "  {}", format_action_record(who, action))?;
    }
    Ok(())
}
