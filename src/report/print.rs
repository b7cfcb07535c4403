//! Renders a compiled [`Report`] to the terminal in the teacher's "label: colored value" style.

use colored::Colorize;

use crate::catalog::registry;
use crate::report::summary::Report;

pub fn print(report: &Report) {
    println!("{}", "combat outcome".bold());
    println!("  expected hp        : {:.2}", report.expected_hp.to_string().green());
    println!(
        "  delta hp range      : [{}, {}]  (5th {}, 95th {})",
        report.min_delta_hp,
        report.max_delta_hp,
        report.delta_hp_5th_percentile,
        report.delta_hp_95th_percentile
    );
    let death_probability = format!("{:.4}", report.death_probability);
    let death_probability = if report.death_probability > 0.0 { death_probability.red() } else { death_probability.green() };
    println!("  death probability   : {death_probability}");
    if report.death_probability > 0.0 {
        println!(
            "  enemy hp on death   : {:.2} (expected remaining, conditioned on death)",
            report.expected_remaining_enemy_hp_on_death
        );
    }
    println!("  expected turns      : {:.2}", report.expected_turns);

    println!("{}", "delta-hp distribution".bold());
    for (&delta, &mass) in &report.hp_change_distribution {
        if mass > crate::PROBABILITY_EPSILON {
            println!("  {delta:>5} : {:.4}", mass);
        }
    }

    println!("{}", "turn-count distribution".bold());
    for (&turn, &mass) in &report.turn_distribution {
        if mass > crate::PROBABILITY_EPSILON {
            println!("  turn {turn:>2} : {:.4}", mass);
        }
    }

    if !report.per_turn_play_frequency.is_empty() {
        println!("{}", "per-turn play frequency".bold());
        for (&(turn, card), &freq) in &report.per_turn_play_frequency {
            if freq > crate::PROBABILITY_EPSILON {
                println!("  turn {turn:>2}  {:<14} : {:.4}", registry::card(card).name, freq);
            }
        }
    }

    if !report.per_turn_draw_frequency.is_empty() {
        println!("{}", "per-turn expected draws".bold());
        for (&(turn, card), &freq) in &report.per_turn_draw_frequency {
            if freq > crate::PROBABILITY_EPSILON {
                println!("  turn {turn:>2}  {:<14} : {:.4}", registry::card(card).name, freq);
            }
        }
    }

    println!("{}", format!("{} nodes in the solved tree", report.node_count).dimmed());
}
