use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::warn;

use kana_lookup::{
    InkCanvas, JsonStatsStore, Mode, Point, Recognizer, SessionController, Stroke, Submission, Surface,
    TemplateLibrary, KANA_SYMBOLS,
};

#[derive(Parser, Debug)]
#[command(name = "cli_demo")]
struct Cli {
    /// Baked template library, as written by template_bake
    #[arg(long, default_value = "./data/kana_templates.bin")]
    library: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replays recorded drawings and counts correct top guesses
    Eval {
        inputs: PathBuf,
        #[arg(long, default_value_t = 1)]
        iters: usize,
    },
    /// Classifies PNG drawings
    Classify {
        images: Vec<PathBuf>,
        #[arg(long, default_value = "mixed")]
        mode: String,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Runs a scripted drill, answering each prompt with a recorded drawing
    Drill {
        inputs: PathBuf,
        #[arg(long, default_value = "hiragana")]
        mode: String,
        #[arg(long, default_value_t = 20)]
        rounds: usize,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value = "./data/kana_stats.json")]
        stats: PathBuf,
    },
}

// One recorded drawing: the intended glyph and its strokes in canvas pixels
#[derive(Serialize, Deserialize)]
struct Input {
    char: String,
    width: u32,
    height: u32,
    strokes: Vec<Vec<[f32; 2]>>,
}

fn read_inputs(path: &Path) -> Result<Vec<Input>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut res: Vec<Input> = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        res.push(serde_json::from_str(&line)?);
    }
    Ok(res)
}

fn get_strokes(input: &Input) -> Vec<Stroke> {
    input
        .strokes
        .iter()
        .map(|points| Stroke {
            points: points.iter().map(|pt| Point { x: pt[0], y: pt[1] }).collect(),
        })
        .collect()
}

fn render_input(input: &Input) -> Result<InkCanvas> {
    let mut canvas = InkCanvas::new(input.width, input.height)?;
    for stroke in get_strokes(input) {
        canvas.draw_stroke(&stroke);
    }
    Ok(canvas)
}

fn input_glyph(input: &Input) -> Option<char> {
    input.char.chars().next()
}

fn parse_mode(mode: &str) -> Result<Mode> {
    match Mode::parse(mode) {
        Some(mode) => Ok(mode),
        None => bail!("unknown mode {:?}", mode),
    }
}

fn load_recognizer(path: &Path) -> Result<Recognizer> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let library = TemplateLibrary::from_bytes(&bytes)?;
    Ok(Recognizer::from_library(library)?)
}

fn eval(recognizer: &Recognizer, inputs: &Path, iters: usize) -> Result<()> {
    println!("Loading evaluation data.");
    let inputs = read_inputs(inputs)?;
    let canvases: Vec<InkCanvas> = inputs.iter().map(render_input).collect::<Result<_>>()?;
    println!("Loaded {} inputs; starting {} cycles of evaluation.", inputs.len(), iters);
    let start = Instant::now();
    let mut guessed = 0;
    for _ in 0..iters {
        for (input, canvas) in inputs.iter().zip(&canvases) {
            let best = recognizer.lookup(canvas.raster(), &KANA_SYMBOLS, Mode::Mixed, 1)?;
            if !best.is_empty() && Some(best[0].glyph) == input_glyph(input) {
                guessed += 1;
            }
        }
    }
    println!("Finished in {:?}. Correct guesses: {} of {}.", start.elapsed(), guessed, inputs.len() * iters);
    Ok(())
}

fn classify(recognizer: &Recognizer, images: &[PathBuf], mode: Mode, limit: usize) -> Result<()> {
    for path in images {
        let raster = image::open(path).with_context(|| format!("decoding {}", path.display()))?.to_rgba8();
        let matches = recognizer.lookup(&raster, &KANA_SYMBOLS, mode, limit.max(1))?;
        let ranked: Vec<String> = matches.iter().map(|m| format!("{} {:.3}", m.glyph, m.score)).collect();
        println!("{}: {}", path.display(), ranked.join(", "));
    }
    Ok(())
}

fn drill(recognizer: Recognizer, inputs: &Path, mode: Mode, rounds: usize, seed: u64, stats: &Path) -> Result<()> {
    let mut by_glyph: HashMap<char, Input> = HashMap::new();
    for input in read_inputs(inputs)? {
        if let Some(glyph) = input_glyph(&input) {
            by_glyph.entry(glyph).or_insert(input);
        }
    }
    if let Some(parent) = stats.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = JsonStatsStore::open(stats);
    let mut controller = SessionController::with_seed(KANA_SYMBOLS.to_vec(), recognizer, store, seed);
    let mut canvas = InkCanvas::new(300, 300)?;
    let mut state = controller.start(mode)?;

    for _ in 0..rounds {
        let prompt = *state.prompt();
        match by_glyph.get(&prompt.kana) {
            Some(input) => {
                canvas.resize(input.width, input.height)?;
                for stroke in get_strokes(input) {
                    canvas.draw_stroke(&stroke);
                }
            }
            None => warn!(glyph = %prompt.kana, "no recorded drawing; submitting a blank canvas"),
        }
        let (next, submission) = controller.submit(&state, &canvas)?;
        state = next;
        println!("[{}] {}", prompt.romaji, state.feedback());
        state = match submission {
            Submission::Graded(_) => controller.on_enter(&state, &mut canvas)?.0,
            // Ungraded prompts are skipped in a scripted run
            _ => controller.next_prompt(&state, &mut canvas)?,
        };
    }

    println!(
        "Asked {}, correct {}, incorrect {}. Weakest: {}",
        state.asked(),
        state.correct(),
        state.incorrect(),
        controller.stats().stats().weakest_preview()
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();
    let recognizer = load_recognizer(&cli.library)?;
    match cli.command {
        Command::Eval { inputs, iters } => eval(&recognizer, &inputs, iters),
        Command::Classify { images, mode, limit } => classify(&recognizer, &images, parse_mode(&mode)?, limit),
        Command::Drill {
            inputs,
            mode,
            rounds,
            seed,
            stats,
        } => drill(recognizer, &inputs, parse_mode(&mode)?, rounds, seed, &stats),
    }
}
