use chrono::Local;
use ecoquest::activities::{ECO_CARDS, PHOTO_TASKS};
use ecoquest::auth::StaticAuthenticator;
use ecoquest::core::{EcoConfig, EcoError, EcoResult};
use ecoquest::daily::DailyState;
use ecoquest::ledger::{JsonFileStore, Ledger};
use ecoquest::maze::{Direction, MazeKind, MoveEvent};
use ecoquest::session::Session;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

type CliSession<'l> = Session<'l, JsonFileStore>;

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let mut data_dir: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("ecoquest {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("EcoQuest - eco challenges, mazes and a shared leaderboard\n");
                println!("Usage: ecoquest [--data-dir DIR]\n");
                println!("Options:");
                println!("  --data-dir DIR  Store progress and uploads in DIR (default ~/.ecoquest)");
                println!("  --version       Show version information");
                println!("  --help          Show this help message");
                std::process::exit(0);
            }
            "--data-dir" => match args.get(i + 1) {
                Some(dir) => {
                    data_dir = Some(PathBuf::from(dir));
                    i += 1;
                }
                None => {
                    eprintln!("--data-dir needs a directory");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'ecoquest --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match data_dir {
        Some(dir) => EcoConfig::load_from(&dir),
        None => EcoConfig::load_default()?,
    };
    config.save_if_missing(&config.data_dir()?)?;
    let ledger = Ledger::open(&config)?;
    let auth = StaticAuthenticator::demo();

    run(&ledger, &auth, &config)
}

fn run(
    ledger: &Ledger<JsonFileStore>,
    auth: &StaticAuthenticator,
    config: &EcoConfig,
) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    let mut session: Option<CliSession<'_>> = None;

    println!("🌿 Welcome to EcoQuest! Type 'help' for commands.");
    println!("Log in with: login <username> <password>");

    while let Some(line) = prompt(&mut input, "> ")? {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };

        match command {
            "quit" | "exit" => break,
            "help" => print_commands(),
            "users" => match ledger.profiles() {
                Ok(names) if names.is_empty() => println!("No profiles yet."),
                Ok(names) => println!("Profiles: {}", names.join(", ")),
                Err(e) => println!("❌ {}", e),
            },
            "login" => match args {
                [username, password] => {
                    let today = Local::now().date_naive();
                    match Session::login(ledger, auth, config, username, password, today) {
                        Ok(s) => {
                            println!(
                                "Welcome {} 🌿  Points: {}  Streak: {}",
                                username,
                                s.profile().points,
                                s.profile().streak
                            );
                            session = Some(s);
                        }
                        Err(EcoError::Auth) => println!(
                            "Invalid credentials. Known accounts: {}",
                            auth.usernames().join(", ")
                        ),
                        Err(e) => println!("❌ {}", e),
                    }
                }
                _ => println!("Usage: login <username> <password>"),
            },
            _ => match session.as_mut() {
                Some(s) => {
                    if let Err(e) = dispatch(s, command, args, &mut input) {
                        println!("❌ {}", e);
                    }
                }
                None => println!("Please log in first."),
            },
        }
    }

    println!("Goodbye! 🌍");
    Ok(())
}

fn prompt<I>(input: &mut I, text: &str) -> io::Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{}", text);
    io::stdout().flush()?;
    input.next().transpose()
}

fn ask<I>(input: &mut I, text: &str) -> EcoResult<String>
where
    I: Iterator<Item = io::Result<String>>,
{
    Ok(prompt(input, text)?.unwrap_or_default())
}

fn read_proof(path: &str) -> EcoResult<Vec<u8>> {
    fs::read(path).map_err(|e| EcoError::InvalidInput(format!("cannot read {}: {}", path, e)))
}

fn print_commands() {
    println!("Commands:");
    println!("  login <user> <password>  Start a session");
    println!("  status                   Points, streak and rank");
    println!("  daily [photo]            Show or complete today's challenge");
    println!("  card [name|number]       List or tap a quick eco card");
    println!("  task [name|number photo] List or complete a photo task");
    println!("  maze [up|down|left|right|show|reset]");
    println!("  water [up|down|left|right|show|reset]");
    println!("  quiz | crossword | recycle | spin | fact");
    println!("  board                    Leaderboard");
    println!("  users                    Every stored profile");
    println!("  reset                    Reset your progress");
    println!("  quit");
}

fn dispatch<I>(
    session: &mut CliSession<'_>,
    command: &str,
    args: &[&str],
    input: &mut I,
) -> EcoResult<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let today = Local::now().date_naive();

    match command {
        "status" => {
            let profile = session.profile();
            println!(
                "User: {}  Points: {}  Streak: {}  Rank: {}",
                profile.username,
                profile.points,
                profile.streak,
                profile.title()
            );
            if !profile.completed_tasks.is_empty() {
                println!("Tasks done: {}", profile.completed_tasks.join(", "));
            }
        }
        "daily" => match args.first() {
            None => {
                if session.daily_state() == DailyState::Completed {
                    println!("✅ You've already completed today's challenge. Come back tomorrow!");
                } else {
                    println!("Today's Challenge: {}", session.daily_challenge(today));
                    println!("Complete it with: daily <photo-file>");
                }
            }
            Some(path) => {
                let bytes = read_proof(path)?;
                let outcome = session.submit_daily(&bytes, today)?;
                println!(
                    "Daily challenge completed! +{} points",
                    outcome.reward.points_gained
                );
                println!("{}", session.motivation());
            }
        },
        "card" => {
            if args.is_empty() {
                for (n, card) in ECO_CARDS.iter().enumerate() {
                    println!("  {}. {} (+{})", n + 1, card.title, card.points);
                }
            } else {
                let reward = session.tap_card(&args.join(" "))?;
                println!(
                    "+{} points (total {})  {}",
                    reward.points_gained,
                    reward.total_points,
                    session.motivation()
                );
            }
        }
        "task" => match args {
            [name @ .., path] if !name.is_empty() => {
                let bytes = read_proof(path)?;
                let outcome = session.complete_task(&name.join(" "), &bytes)?;
                println!("Task completed! +{} points", outcome.reward.points_gained);
                println!("{}", session.motivation());
            }
            _ => {
                for (n, task) in PHOTO_TASKS.iter().enumerate() {
                    let mark = if session.profile().has_completed(task.name) {
                        "✅"
                    } else {
                        "  "
                    };
                    println!("{} {}. {}: {}", mark, n + 1, task.name, task.description);
                }
                println!("Complete one with: task <name|number> <photo-file>");
            }
        },
        "maze" | "water" => {
            let kind = if command == "maze" {
                MazeKind::Land
            } else {
                MazeKind::Water
            };
            match args.first().copied() {
                None | Some("show") => {}
                Some("reset") => session.reset_world(kind),
                Some(word) => {
                    let direction = Direction::parse(word).ok_or_else(|| {
                        EcoError::InvalidInput(format!("unknown direction '{}'", word))
                    })?;
                    let result = session.move_agent(kind, direction)?;
                    match result.step.event {
                        MoveEvent::Blocked => println!("🚫 Blocked!"),
                        MoveEvent::Moved => {}
                        MoveEvent::Collected(item) => {
                            println!("Collected {}! +{} points", item, result.step.points)
                        }
                        MoveEvent::ReachedGoal => {
                            println!("🎉 {} finished! +{} points", kind.name(), result.step.points)
                        }
                    }
                }
            }
            let world = session.world(kind);
            println!("{}", world.render());
            println!("Items left: {}", world.items_remaining());
        }
        "quiz" => {
            let questions = session.quiz_round()?;
            let mut answers = Vec::with_capacity(questions.len());
            for (n, question) in questions.iter().enumerate() {
                println!("{}. {}", n + 1, question.prompt);
                for (k, option) in question.options.iter().enumerate() {
                    println!("   {}) {}", k + 1, option);
                }
                answers.push(ask(input, "answer: ")?);
            }
            let outcome = session.submit_quiz(&answers)?;
            for (question, answer) in questions.iter().zip(&answers) {
                if question.is_correct(answer) {
                    println!("✅ {}", question.answer);
                } else {
                    println!("❌ Wrong. Correct: {}", question.answer);
                }
            }
            println!(
                "{}/{} correct, +{} points",
                outcome.score.correct, outcome.score.total, outcome.reward.points_gained
            );
        }
        "crossword" => {
            let clues = session.crossword_round()?;
            let mut answers = Vec::with_capacity(clues.len());
            for clue in &clues {
                answers.push(ask(input, &format!("Clue: {} > ", clue.clue))?);
            }
            let outcome = session.submit_crossword(&answers)?;
            if outcome.score.solved() {
                println!("🎉 All correct! +{} points", outcome.reward.points_gained);
            } else {
                println!(
                    "You got {}/{} correct. Try again!",
                    outcome.score.correct, outcome.score.total
                );
            }
        }
        "recycle" => {
            let scenario = session.recycling_round();
            println!("{}", scenario.situation);
            for (k, choice) in scenario.choices.iter().enumerate() {
                println!("   {}) {}", k + 1, choice);
            }
            let response = ask(input, "choose: ")?;
            let outcome = session.submit_recycling(&response)?;
            if outcome.reward.points_gained > 0 {
                println!("✅ Good choice! +{} points", outcome.reward.points_gained);
            } else {
                println!("❌ Not the best choice.");
            }
        }
        "spin" => {
            let outcome = session.spin(today)?;
            println!("🎡 Result: {}", outcome.prize.label);
            if outcome.reward.points_gained > 0 {
                println!("Total points: {}", outcome.reward.total_points);
            }
        }
        "fact" => println!("💡 Daily Eco Fact: {}", session.fact(today)?),
        "board" => {
            let ranking = session.leaderboard()?;
            if ranking.is_empty() {
                println!("No scores yet, be the first!");
            }
            for entry in ranking.iter() {
                println!(
                    "{:>3}. {:<16} {:>6}  {}",
                    entry.position, entry.username, entry.points, entry.title
                );
            }
        }
        "reset" => {
            let answer = ask(input, "Reset all progress? Type 'yes' to confirm: ")?;
            if answer.trim() == "yes" {
                session.reset_progress()?;
                println!("Progress reset for user.");
            } else {
                println!("Cancelled.");
            }
        }
        other => println!("Unknown command '{}'. Type 'help'.", other),
    }
    Ok(())
}
