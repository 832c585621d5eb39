use std::io::{self, Write};

use perfect_color_core::config::ConfigError;
use perfect_color_core::{
    log_result, log_round, progress_line, render_share_card, run_session, share_caption,
    PresentationAdapter, ResultStore, Rgb, RoundAction, RoundLogEntry, RoundPresentation,
    SessionConfig, SessionController, SessionOutcome, SessionResultEntry, SvPlane,
    DEFAULT_PLANE_SIZE,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let store = ResultStore::new("out/results.json");

    // A hex argument skips the picker for the first session only.
    let mut preset = std::env::args().nth(1);

    loop {
        let initial = match preset.take() {
            Some(hex) => Rgb::from_hex(&hex)?,
            None => pick_initial_color()?,
        };
        println!("Starting from {} {}", swatch(initial), initial.to_hex());

        let mut session = SessionController::new(config.clone());
        session.select_initial(initial);

        let mut adapter = TerminalAdapter;
        match run_session(&mut session, &mut adapter)? {
            SessionOutcome::Finished(color) => {
                println!();
                println!("Your perfect color: {} {}", swatch(color), color.to_hex());
                println!("{}", share_caption(color));

                if let Err(err) = store.save_last_color(color) {
                    eprintln!("could not persist the result: {err}");
                }
                match render_share_card(color, "out/perfect_color.png") {
                    Ok(()) => println!("Share card written to out/perfect_color.png"),
                    Err(err) => eprintln!("share card rendering failed: {err}"),
                }

                let entry = SessionResultEntry::new(
                    color.to_hex(),
                    session.round_index(),
                    session.predicted_total_rounds(),
                    session.config().max_rounds,
                );
                if let Err(err) = log_result(&entry) {
                    eprintln!("journal write failed: {err}");
                }
                return Ok(());
            }
            SessionOutcome::BackedOut => {
                println!("Back at the start; pick a new color.");
            }
        }
    }
}

fn load_config() -> Result<SessionConfig, ConfigError> {
    SessionConfig::load_from_file("config/session.toml").or_else(|err| {
        eprintln!("Falling back to default config: {err}");
        Ok(SessionConfig::default())
    })
}

/// Hue prompt plus a saturation/value plane the user picks a point from.
fn pick_initial_color() -> Result<Rgb, Box<dyn std::error::Error>> {
    let hue = loop {
        let line = prompt_line("Hue in degrees [0-360): ")?;
        match line.trim().parse::<f32>() {
            Ok(value) => break value,
            Err(_) => println!("Enter a number, e.g. 210."),
        }
    };

    let plane = SvPlane::new(hue, DEFAULT_PLANE_SIZE);
    plane.to_png("out/sv_plane.png")?;
    println!("Saturation/value plane written to out/sv_plane.png");
    println!("x runs left to right (saturation), y top to bottom (darkness).");

    let limit = plane.size() - 1;
    loop {
        let line = prompt_line(&format!("Pick a point as `x y` (0-{limit} 0-{limit}): "))?;
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(x), Some(y)) => match (x.parse::<usize>(), y.parse::<usize>()) {
                (Ok(x), Ok(y)) => return Ok(plane.color_at(x, y)),
                _ => println!("Coordinates must be numbers."),
            },
            _ => println!("Give two numbers separated by a space."),
        }
    }
}

struct TerminalAdapter;

impl PresentationAdapter for TerminalAdapter {
    fn present_options(&mut self, presentation: &RoundPresentation) -> anyhow::Result<RoundAction> {
        for (index, option) in presentation.options.iter().enumerate() {
            println!(
                "  [{}] {} {}  ({})",
                index + 1,
                swatch(option.color),
                option.color.to_hex(),
                option.label
            );
        }
        loop {
            let line = prompt_line("Choose 1-3, or b to go back: ")?;
            match line.trim() {
                "b" | "back" => return Ok(RoundAction::Back),
                text => match text.parse::<usize>() {
                    Ok(number) if (1..=3).contains(&number) => {
                        let index = number - 1;
                        if let Some(entry) = RoundLogEntry::from_choice(presentation, index) {
                            if let Err(err) = log_round(&entry) {
                                eprintln!("journal write failed: {err}");
                            }
                        }
                        return Ok(RoundAction::Choose(index));
                    }
                    _ => println!("Please answer 1, 2, 3 or b."),
                },
            }
        }
    }

    fn render_progress(&mut self, round_index: usize, predicted_total_rounds: usize) -> anyhow::Result<()> {
        println!();
        println!("{}", progress_line(round_index, predicted_total_rounds));
        Ok(())
    }
}

fn prompt_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

/// 24-bit ANSI background block previewing `color` inline.
fn swatch(color: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m    \x1b[0m", color.r, color.g, color.b)
}
