/// Output formatting: terminal table and JSON.
use anyhow::Result;
use arenarank_core::Leaderboard;
use serde::Serialize;

#[derive(Serialize)]
struct JsonOutput<'a> {
    category: Option<&'a str>,
    #[serde(flatten)]
    leaderboard: &'a Leaderboard,
}

/// Print the leaderboard as a formatted terminal table.
pub fn print_table(leaderboard: &Leaderboard, category: Option<&str>) {
    let name_width = leaderboard
        .entries
        .iter()
        .map(|e| e.competitor.len())
        .max()
        .unwrap_or(5)
        .max(5); // at least "Model"

    println!(
        " # | {:<name_width$} | Rating |   W |   L |   T | Win rate | Confidence",
        "Model"
    );
    println!(
        "---|-{}-|--------|-----|-----|-----|----------|-----------",
        "-".repeat(name_width)
    );

    for e in &leaderboard.entries {
        println!(
            "{:>2} | {:<name_width$} | {:>6} | {:>3} | {:>3} | {:>3} | {:>7.1}% | {:>10.2}",
            e.rank,
            e.competitor,
            e.rating,
            e.wins,
            e.losses,
            e.ties,
            e.win_rate * 100.0,
            e.confidence,
        );
    }

    println!(
        "\n{} models rated from {} matches{} ({} iterations, {})",
        leaderboard.entries.len(),
        leaderboard.total_matches,
        category.map(|c| format!(" in category \"{c}\"")).unwrap_or_default(),
        leaderboard.iterations,
        if leaderboard.converged { "converged" } else { "not converged" },
    );
}

/// Print the leaderboard as JSON.
pub fn print_json(leaderboard: &Leaderboard, category: Option<&str>) -> Result<()> {
    let output = JsonOutput { category, leaderboard };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
