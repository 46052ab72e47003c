use clap::{Args, Parser, Subcommand};
use codec::json::{read_mapping, read_routes, write_routes};
use dotenv::dotenv;
use env_logger::Env;
use geometry::Subdivision;
use log::info;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use std::path::PathBuf;

use streetnav::choice::{EasyConfig, StandardConfig};
use streetnav::consolidate::{ConsolidationMode, Consolidator};
use streetnav::graph::augment::{DEFAULT_MIN_GAP, DEFAULT_SPACING};
use streetnav::graph::{Augmenter, Conflict, Graph};
use streetnav::pipeline::{DEFAULT_CHECKPOINT_EVERY, Runner, Stage};
use streetnav::stages::path::{DEFAULT_CORNER_EPSILON, DEFAULT_DENSIFY_SPACING, DEFAULT_SMOOTH_WINDOW};
use streetnav::stages::stats::DEFAULT_PAIR_WARNING;
use streetnav::stages::*;
use streetnav::turn::config::{DEFAULT_FORWARD_THRESHOLD, DEFAULT_RIGHT_BAND};
use streetnav::turn::{Classification, TurnConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Seed of the random source used by selectors.
    /// A random seed is drawn and logged when unset.
    #[arg(long, global = true, env = "STREETNAV_SEED")]
    seed: Option<u64>,

    /// Routes processed between two rewrites of the output.
    #[arg(long, global = true, env = "STREETNAV_CHECKPOINT_EVERY", default_value_t = DEFAULT_CHECKPOINT_EVERY)]
    checkpoint_every: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Io {
    /// JSON array of input routes.
    #[arg(long)]
    input: PathBuf,

    /// JSON array of output routes, resumed from when present.
    #[arg(long)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct GraphFiles {
    #[arg(long, env = "STREETNAV_NODES")]
    nodes: PathBuf,

    #[arg(long, env = "STREETNAV_LINKS")]
    links: PathBuf,

    /// Handling of duplicate nodes and colliding links.
    #[arg(long, default_value_t = Conflict::Overwrite)]
    conflict: Conflict,
}

impl GraphFiles {
    fn load(&self) -> streetnav::Result<Graph> {
        Ok(Graph::load_with(&self.nodes, &self.links, self.conflict)?)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the interior vertices of every route.
    Turns {
        #[command(flatten)]
        io: Io,

        #[arg(long, default_value_t = Classification::Binary)]
        classification: Classification,

        #[arg(long, default_value_t = DEFAULT_FORWARD_THRESHOLD)]
        forward_threshold: f64,

        #[arg(long, default_value_t = *DEFAULT_RIGHT_BAND.start())]
        right_min: f64,

        #[arg(long, default_value_t = *DEFAULT_RIGHT_BAND.end())]
        right_max: f64,
    },

    /// Interpolate waypoints into the wide steps of every route.
    Densify {
        #[command(flatten)]
        io: Io,

        #[arg(long, default_value_t = DEFAULT_DENSIFY_SPACING)]
        spacing: f64,

        #[arg(long, default_value_t = Subdivision::Ceil)]
        subdivision: Subdivision,
    },

    /// Bridge the wide steps of every route with synthetic graph nodes.
    Augment {
        #[command(flatten)]
        io: Io,

        #[command(flatten)]
        graph: GraphFiles,

        #[arg(long)]
        nodes_out: PathBuf,

        #[arg(long)]
        links_out: PathBuf,

        #[arg(long, default_value_t = DEFAULT_SPACING)]
        spacing: f64,

        #[arg(long, default_value_t = DEFAULT_MIN_GAP)]
        min_gap: f64,
    },

    /// Merge panoramas sharing a canonical identifier, rewriting the graph and routes.
    Consolidate {
        #[command(flatten)]
        io: Io,

        #[command(flatten)]
        graph: GraphFiles,

        /// JSON object of original to canonical panorama identifiers.
        #[arg(long)]
        mapping: PathBuf,

        #[arg(long, default_value_t = ConsolidationMode::Graph)]
        mode: ConsolidationMode,

        #[arg(long)]
        nodes_out: PathBuf,

        #[arg(long)]
        links_out: PathBuf,
    },

    /// Collapse consecutive repeated waypoints.
    Dedup {
        #[command(flatten)]
        io: Io,
    },

    /// Place multiple-choice positions upon every route.
    Choices {
        #[command(flatten)]
        io: Io,

        #[command(subcommand)]
        selector: SelectorCommand,
    },

    /// Store along-path distances of waypoints and choices.
    Distances {
        #[command(flatten)]
        io: Io,
    },

    /// Store the significant corners of every route.
    Corners {
        #[command(flatten)]
        io: Io,

        #[arg(long, default_value_t = DEFAULT_CORNER_EPSILON)]
        epsilon: f64,
    },

    /// Smooth the headings of every route.
    Smooth {
        #[command(flatten)]
        io: Io,

        #[arg(long, default_value_t = DEFAULT_SMOOTH_WINDOW)]
        window: usize,
    },

    /// Print turn statistics, and step distances when given a graph.
    Stats {
        #[arg(long)]
        input: PathBuf,

        #[arg(long, requires = "links")]
        nodes: Option<PathBuf>,

        #[arg(long, requires = "nodes")]
        links: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_PAIR_WARNING)]
        warning: f64,
    },
}

#[derive(Subcommand, Debug)]
enum SelectorCommand {
    /// Three on-path choices ending near the destination.
    Standard {
        #[arg(long, default_value_t = streetnav::choice::standard::DEFAULT_MIN_PATH_LEN)]
        min_path_len: usize,
    },

    /// Choices spread between turns, completed off the path.
    Easy {
        #[arg(long, default_value_t = streetnav::choice::easy::DEFAULT_POSITIONS)]
        positions: usize,

        #[arg(long, default_value_t = streetnav::choice::easy::DEFAULT_MIN_DISTANCE)]
        min_distance: f64,

        #[arg(long, default_value_t = streetnav::choice::easy::DEFAULT_MAX_OFFPATH_ATTEMPTS)]
        max_attempts: usize,
    },
}

impl From<SelectorCommand> for Selector {
    fn from(value: SelectorCommand) -> Self {
        match value {
            SelectorCommand::Standard { min_path_len } => Selector::Standard(StandardConfig {
                min_path_len,
                ..StandardConfig::default()
            }),
            SelectorCommand::Easy {
                positions,
                min_distance,
                max_attempts,
            } => Selector::Easy(EasyConfig {
                num_positions: positions,
                min_distance_m: min_distance,
                max_offpath_attempts: max_attempts,
            }),
        }
    }
}

fn run<S: Stage>(runner: &Runner, mut stage: S, io: &Io) -> anyhow::Result<()> {
    runner.run(&mut stage, &io.input, &io.output)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let runner = Runner::new(cli.checkpoint_every)?;

    match cli.command {
        Command::Turns {
            io,
            classification,
            forward_threshold,
            right_min,
            right_max,
        } => {
            let config = TurnConfig {
                classification,
                forward_threshold,
                right_band: right_min..=right_max,
            };

            run(&runner, TurnStage::new(config), &io)
        }
        Command::Densify {
            io,
            spacing,
            subdivision,
        } => run(
            &runner,
            DensifyStage::new(DensifyConfig {
                spacing,
                subdivision,
            }),
            &io,
        ),
        Command::Augment {
            io,
            graph,
            nodes_out,
            links_out,
            spacing,
            min_gap,
        } => {
            let augmenter = Augmenter::new(graph.load()?, spacing, min_gap);
            run(&runner, AugmentStage::new(augmenter, nodes_out, links_out), &io)
        }
        Command::Consolidate {
            io,
            graph,
            mapping,
            mode,
            nodes_out,
            links_out,
        } => {
            let old = graph.load()?;
            let mapping = read_mapping(&mapping)?;
            let routes = read_routes(&io.input)?;

            let consolidation = Consolidator::new(&mapping).run(&old, routes, mode);
            consolidation.graph.write(&nodes_out, &links_out)?;
            write_routes(&io.output, &consolidation.routes)?;
            Ok(())
        }
        Command::Dedup { io } => run(&runner, DedupStage, &io),
        Command::Choices { io, selector } => {
            let seed = cli.seed.unwrap_or_else(rand::random);
            info!("Selecting choices with seed {seed}");

            let stage = ChoiceStage::new(selector.into(), XorShiftRng::seed_from_u64(seed));
            run(&runner, stage, &io)
        }
        Command::Distances { io } => run(&runner, DistanceStage, &io),
        Command::Corners { io, epsilon } => {
            run(&runner, CornerStage::new(CornerConfig { epsilon }), &io)
        }
        Command::Smooth { io, window } => {
            run(&runner, SmoothStage::new(SmoothConfig { window }), &io)
        }
        Command::Stats {
            input,
            nodes,
            links,
            warning,
        } => {
            let routes = read_routes(&input)?;

            match turn_stats(&routes) {
                Some(stats) => println!("{stats}"),
                None => println!("No routes in {}", input.display()),
            }

            if let (Some(nodes), Some(links)) = (nodes, links) {
                let graph = Graph::load(&nodes, &links)?;
                match pair_distance_stats(&routes, &graph, warning) {
                    Some(stats) => println!("{stats}"),
                    None => println!("No valid distances found across all routes"),
                }
            }

            Ok(())
        }
    }
}
