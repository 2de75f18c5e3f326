use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use labyrinth_input::{InputState, Key};
use labyrinth_kernel::{
    CameraState, EmitOptions, Labyrinth, LabyrinthConfig, MotionConfig, SeedPolicy,
};
use labyrinth_render::{RenderScene, RenderView, Renderer, TextRenderer};
use labyrinth_tools::MazeInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "labyrinth-cli", about = "Generate and inspect labyrinths without a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grid and the start cell
    Print {
        #[command(flatten)]
        maze: MazeArgs,
    },
    /// Summarize cell, quad and buffer counts
    Inspect {
        #[command(flatten)]
        maze: MazeArgs,
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Hold keys for a number of frames and show where the camera ends up
    Walk {
        #[command(flatten)]
        maze: MazeArgs,
        /// Number of frames to integrate
        #[arg(long, default_value_t = 60)]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value_t = 1.0 / 60.0)]
        delta: f32,
        /// Keys held for the whole walk
        #[arg(long, value_enum, value_delimiter = ',')]
        keys: Vec<HeldKey>,
        /// Turning speed in degrees per second
        #[arg(long)]
        angular_speed: Option<f32>,
        /// Walking speed in world units per second
        #[arg(long)]
        movement_speed: Option<f32>,
        /// Use the slower walking speed of the first tuning
        #[arg(long)]
        legacy_speeds: bool,
    },
}

#[derive(Args)]
struct MazeArgs {
    /// Seed from the clock instead of the fixed seed
    #[arg(action = ArgAction::Set, default_value_t = false)]
    random_seed: bool,
    /// Grid rows, border included
    #[arg(default_value_t = 10)]
    rows: usize,
    /// Grid columns, border included
    #[arg(default_value_t = 10)]
    columns: usize,
    /// Explicit seed; overrides random_seed
    #[arg(long)]
    seed: Option<u64>,
    /// Also emit roof quads
    #[arg(long)]
    roof: bool,
}

impl MazeArgs {
    fn config(&self) -> LabyrinthConfig {
        LabyrinthConfig {
            rows: self.rows,
            columns: self.columns,
            seed: self
                .seed
                .map_or(SeedPolicy::from_random_flag(self.random_seed), SeedPolicy::Explicit),
        }
    }

    fn emit_options(&self) -> EmitOptions {
        EmitOptions { roof: self.roof }
    }

    /// Construct and fill. A degenerate maze is reported but not an error here.
    fn generate(&self) -> anyhow::Result<Labyrinth> {
        let mut labyrinth =
            Labyrinth::from_config(&self.config()).context("invalid labyrinth configuration")?;
        if let Err(e) = labyrinth.fill_randomly() {
            tracing::warn!("{e}");
        }
        Ok(labyrinth)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum HeldKey {
    Left,
    Right,
    Up,
    Down,
}

impl From<HeldKey> for Key {
    fn from(key: HeldKey) -> Self {
        match key {
            HeldKey::Left => Key::Left,
            HeldKey::Right => Key::Right,
            HeldKey::Up => Key::Up,
            HeldKey::Down => Key::Down,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Print { maze } => {
            let labyrinth = maze.generate()?;
            labyrinth.print();
            match labyrinth.start_cell() {
                Some(start) => println!("start: {start}  seed: {}", labyrinth.seed()),
                None => println!("start: none  seed: {}", labyrinth.seed()),
            }
        }
        Commands::Inspect { maze, json } => {
            let labyrinth = maze.generate()?;
            let summary = MazeInspector::summary(&labyrinth);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }
        }
        Commands::Walk {
            maze,
            frames,
            delta,
            keys,
            angular_speed,
            movement_speed,
            legacy_speeds,
        } => {
            let labyrinth = maze.generate()?;
            let scene = RenderScene::from_labyrinth(&labyrinth, maze.emit_options())
                .context("cannot walk a labyrinth without a start cell; try another seed")?;

            let mut motion = if legacy_speeds {
                MotionConfig::legacy()
            } else {
                MotionConfig::default()
            };
            if let Some(speed) = angular_speed {
                motion.angular_speed = speed;
            }
            if let Some(speed) = movement_speed {
                motion.movement_speed = speed;
            }

            let mut input = InputState::new();
            for key in keys {
                input.apply(key.into(), true);
            }

            let mut camera = CameraState::at(scene.spawn);
            for _ in 0..frames {
                camera.step(input.snapshot(), delta, &motion);
            }
            tracing::debug!(frames, delta, "walk finished");

            print!(
                "{}",
                TextRenderer::new().render(&scene, &RenderView::from(&camera))
            );
        }
    }

    Ok(())
}
