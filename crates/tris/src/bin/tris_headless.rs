//! # TRIS Headless
//!
//! Plays scripted games against the simulated engine on two threads.
//!
//! Usage: `tris_headless [config.toml]`

use std::process::ExitCode;

use tris::{init_logging, run, HeadlessOptions, HeadlessReport, HostError};
use tris_bridge::BridgeConfig;

fn load_options() -> Result<HeadlessOptions, HostError> {
    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };
    Ok(HeadlessOptions {
        config,
        ..HeadlessOptions::default()
    })
}

fn print_summary(report: &HeadlessReport) {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                     TRIS HEADLESS SUMMARY                        ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!("┌─ SESSION ──────────────────────────────────────────────────────┐");
    println!("│ Games finished:     {}", report.games_finished);
    println!("│ Games restarted:    {}", report.games_restarted);
    println!("│ High score:         {}", report.high_score);
    if let Some(line) = &report.last_score_line {
        println!("│ Last game:          {line}");
    }
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();
    println!("┌─ RENDER LOOP ──────────────────────────────────────────────────┐");
    println!("│ Ticks:              {}", report.render.ticks);
    println!("│ Changed frames:     {}", report.render.changed_frames);
    println!("│ Tasks forwarded:    {}", report.render.tasks_forwarded);
    println!("│ Geometry applied:   {}", report.render.geometry_applied);
    println!("│ Over budget:        {}", report.render.frames_over_budget);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();
    println!("┌─ UI REFRESH ───────────────────────────────────────────────────┐");
    println!("│ Runs:               {}", report.refresh.runs);
    println!("│ Status updates:     {}", report.refresh.status_updates);
    println!("│ Failures:           {}", report.refresh.failures);
    println!("└──────────────────────────────────────────────────────────────────┘");
}

fn main() -> ExitCode {
    init_logging();

    match load_options().and_then(run) {
        Ok(report) => {
            print_summary(&report);
            if report.completed {
                ExitCode::SUCCESS
            } else {
                tracing::error!("session did not finish all games");
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "headless session failed");
            ExitCode::FAILURE
        }
    }
}
