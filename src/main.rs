//! Talent calculator CLI - interactive point allocator.
//!
//! Usage:
//!   talent-cli                           # REPL with the last used class
//!   talent-cli -c mage                   # start on a specific class
//!   talent-cli -e "add fireball; show"   # run commands and exit
//!   talent-cli --data-dir ./data         # explicit class data directory

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use talent_calc::character::CharacterBuild;
use talent_calc::config::AppConfig;
use talent_calc::loader::ClassLoader;
use talent_calc::spell_state::SpellCommand;
use talent_calc::talent_state::TalentCommand;

#[derive(Parser)]
#[command(name = "talent-cli")]
#[command(about = "Allocate talent and spell points for a class build")]
struct Cli {
    /// Class data directory (contains classes/<id>/...)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Class to start with (defaults to the last used class)
    #[arg(short, long)]
    class: Option<String>,

    /// Execute a semicolon-separated command list and exit
    #[arg(short = 'e', long)]
    exec: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load();

    let data_dir = cli
        .data_dir
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from("data"));
    let loader = ClassLoader::new(data_dir);

    let class_id = cli.class.unwrap_or_else(|| config.last_class.clone());
    let mut build = CharacterBuild::new(loader.load_class(&class_id));
    if class_id != config.last_class {
        config.last_class = class_id;
        config.save();
    }

    if let Some(script) = cli.exec {
        for command in script.split(';') {
            let command = command.trim();
            if !command.is_empty() {
                handle_line(command, &mut build, &loader, &mut config);
            }
        }
        return;
    }

    run_repl(&mut build, &loader, &mut config);
}

// ── REPL ────────────────────────────────────────────────────────────

fn run_repl(build: &mut CharacterBuild, loader: &ClassLoader, config: &mut AppConfig) {
    println!("Talent calculator - class: {}", build.info().name);
    println!("Type 'help' for commands. Use .exit to quit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if !handle_line(line, build, loader, config) {
            break;
        }
    }
}

/// Handle one input line. Returns false to exit the loop.
fn handle_line(
    line: &str,
    build: &mut CharacterBuild,
    loader: &ClassLoader,
    config: &mut AppConfig,
) -> bool {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return true;
    };
    let arg = parts.next();

    match (command, arg) {
        (".exit" | ".quit" | ".q", _) => return false,
        ("help", _) => print_help(),
        ("classes", _) => {
            for id in loader.list_classes() {
                let info = loader.load_metadata(&id);
                println!("  {:<12} {}", id, info.name);
            }
        }
        ("class", Some(id)) => {
            build.switch_class(loader.load_class(id));
            config.last_class = id.to_string();
            config.save();
            println!("Switched to {} (all points reset)", build.info().name);
        }
        ("add", Some(id)) => {
            talent_command(build, TalentCommand::AddPoint(id.to_string()));
        }
        ("remove", Some(id)) => {
            talent_command(build, TalentCommand::RemovePoint(id.to_string()));
        }
        ("reset", Some(id)) => {
            talent_command(build, TalentCommand::Reset(id.to_string()));
        }
        ("reset-all", _) => {
            talent_command(build, TalentCommand::ResetAll);
        }
        ("spell", Some(id)) => {
            spell_command(build, SpellCommand::AddRank(id.to_string()));
        }
        ("spell-reset", Some(id)) => {
            spell_command(build, SpellCommand::Reset(id.to_string()));
        }
        ("spells-reset-all", _) => {
            spell_command(build, SpellCommand::ResetAll);
        }
        ("show", _) => {
            print_summary(build);
            print_talents(build);
        }
        ("spells", _) => {
            print_summary(build);
            print_spells(build);
        }
        ("class" | "add" | "remove" | "reset" | "spell" | "spell-reset", None) => {
            eprintln!("Usage: {} <id>", command);
        }
        _ => eprintln!("Unknown command: {} (try 'help')", line),
    }
    true
}

fn print_help() {
    println!("  classes                list available classes");
    println!("  class <id>             switch class (resets all points)");
    println!("  add <id>               spend a talent point");
    println!("  remove <id>            withdraw a talent point");
    println!("  reset <id>             reset a talent and its dependents");
    println!("  reset-all              reset the whole tree");
    println!("  spell <id>             buy the next rank of a spell");
    println!("  spell-reset <id>       reset a spell to rank 0");
    println!("  spells-reset-all       reset all spells");
    println!("  show                   talent tree overview");
    println!("  spells                 spell list overview");
    println!("  .exit                  quit");
}

/// Run a talent command; report when the engine rejected it as a no-op.
fn talent_command(build: &mut CharacterBuild, command: TalentCommand) {
    let before = build.talent_state().clone();
    build.talent_command(&command);
    if *build.talent_state() == before {
        println!("(no change)");
    } else {
        print_summary(build);
    }
}

fn spell_command(build: &mut CharacterBuild, command: SpellCommand) {
    let before = build.spell_state().clone();
    build.spell_command(&command);
    if *build.spell_state() == before {
        println!("(no change)");
    } else {
        print_summary(build);
    }
}

// ── Display ─────────────────────────────────────────────────────────

fn print_summary(build: &CharacterBuild) {
    let tree = build.talent_engine().tree();
    let talents = build.talent_state();
    let list = build.spell_engine().list();
    let spells = build.spell_state();
    println!(
        "{}: talents {}/{} (tier {}/{}), spells {}/{}",
        build.info().name,
        talents.total_points_spent,
        tree.max_points,
        talents.tier_unlocked,
        tree.total_tiers,
        spells.total_points_spent,
        list.max_points
    );
}

fn print_talents(build: &CharacterBuild) {
    let tree = build.talent_engine().tree();
    let state = build.talent_state();
    for tier in 1..=tree.total_tiers {
        let locked = if tier > state.tier_unlocked {
            " (locked)"
        } else {
            ""
        };
        println!("Tier {}{}", tier, locked);
        for node in tree.nodes.iter().filter(|n| n.tier == tier) {
            let points = state.points_in(&node.id);
            let marker = if points >= node.max_points {
                '*'
            } else if build.is_talent_available(&node.id) {
                '+'
            } else {
                '-'
            };
            println!(
                "  {} {:<16} {}/{} {}",
                marker, node.id, points, node.max_points, node.name
            );
        }
    }
}

fn print_spells(build: &CharacterBuild) {
    let list = build.spell_engine().list();
    let state = build.spell_state();
    for group in list.grouped() {
        if group.points_required == 0 {
            println!("Base spells");
        } else {
            println!("Unlocked at {} talent points", group.points_required);
        }
        for spell in group.spells {
            let rank = state.rank_of(&spell.id);
            let marker = if build.is_spell_available(&spell.id) {
                '+'
            } else {
                '-'
            };
            println!(
                "  {} {:<16} rank {}/{} {}",
                marker,
                spell.id,
                rank,
                spell.ranks.len(),
                spell.name
            );
        }
    }
}
