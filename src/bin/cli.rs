//! craftlink CLI Client
//!
//! Command-line interface for sending single commands to a game server.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use craftlink::{
    BlockDescriptor, BlockGrid, Client, ClientConfig, GameMode, Location, Position,
    Region, Rotation, Selector, TimeAction, Weather,
};
use serde_json::{json, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// craftlink CLI
#[derive(Parser, Debug)]
#[command(name = "craftlink-cli")]
#[command(about = "Send remote commands to a game server")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, env = "CRAFTLINK_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "65535")]
    port: u16,

    /// Authentication token
    #[arg(short, long, env = "CRAFTLINK_TOKEN", default_value = "")]
    token: String,

    /// Per-call timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Place a block
    Setblock {
        #[arg(allow_hyphen_values = true)]
        x: i64,
        #[arg(allow_hyphen_values = true)]
        y: i64,
        #[arg(allow_hyphen_values = true)]
        z: i64,
        block: String,

        /// Block state property as key=value (repeatable)
        #[arg(short, long = "state", value_parser = parse_key_value)]
        states: Vec<(String, String)>,

        /// Extra block data as a JSON object
        #[arg(long, value_parser = parse_json)]
        nbt: Option<Value>,
    },

    /// Get the block at a position
    Getblock {
        #[arg(allow_hyphen_values = true)]
        x: i64,
        #[arg(allow_hyphen_values = true)]
        y: i64,
        #[arg(allow_hyphen_values = true)]
        z: i64,
    },

    /// Fill a region with one block type
    Fill {
        #[command(flatten)]
        region: RegionArgs,
        block: String,
    },

    /// Print a player's position
    Getpos { username: String },

    /// Teleport a player
    Teleport {
        username: String,
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
        #[arg(allow_hyphen_values = true)]
        z: f64,
        #[arg(long, requires = "pitch", allow_hyphen_values = true)]
        yaw: Option<f32>,
        #[arg(long, requires = "yaw", allow_hyphen_values = true)]
        pitch: Option<f32>,
    },

    /// Change a player's game mode
    Gamemode { username: String, mode: ModeArg },

    /// Query or change the world time
    Time {
        #[command(subcommand)]
        action: TimeCmd,
    },

    /// Change the weather
    Weather {
        condition: WeatherArg,
        /// Duration in seconds
        #[arg(allow_hyphen_values = true)]
        duration: Option<i64>,
    },

    /// Give items to a player
    Give {
        username: String,
        item: String,
        #[arg(default_value = "1", allow_hyphen_values = true)]
        amount: i64,
    },

    /// Spawn an entity
    Summon {
        entity_type: String,
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
        #[arg(allow_hyphen_values = true)]
        z: f64,
    },

    /// Remove entities: `all`, `player:<name>` or an entity type
    Kill { selector: String },

    /// Copy a region to a destination
    Clone {
        #[command(flatten)]
        region: RegionArgs,
        #[arg(allow_hyphen_values = true)]
        dest_x: i64,
        #[arg(allow_hyphen_values = true)]
        dest_y: i64,
        #[arg(allow_hyphen_values = true)]
        dest_z: i64,
    },

    /// Place a grid read from a JSON file of nested [x][y][z] cells
    Edit {
        #[arg(allow_hyphen_values = true)]
        x: i64,
        #[arg(allow_hyphen_values = true)]
        y: i64,
        #[arg(allow_hyphen_values = true)]
        z: i64,
        #[arg(value_name = "FILE", value_parser = read_grid_file)]
        grid: BlockGrid,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Survival => GameMode::Survival,
            ModeArg::Creative => GameMode::Creative,
            ModeArg::Adventure => GameMode::Adventure,
            ModeArg::Spectator => GameMode::Spectator,
        }
    }
}

/// Two corners of a cuboid
#[derive(clap::Args, Debug)]
struct RegionArgs {
    #[arg(allow_hyphen_values = true)]
    x1: i64,
    #[arg(allow_hyphen_values = true)]
    y1: i64,
    #[arg(allow_hyphen_values = true)]
    z1: i64,
    #[arg(allow_hyphen_values = true)]
    x2: i64,
    #[arg(allow_hyphen_values = true)]
    y2: i64,
    #[arg(allow_hyphen_values = true)]
    z2: i64,
}

impl From<RegionArgs> for Region {
    fn from(r: RegionArgs) -> Self {
        Region::new((r.x1, r.y1, r.z1), (r.x2, r.y2, r.z2))
    }
}

#[derive(Subcommand, Debug)]
enum TimeCmd {
    /// Set the time of day in ticks
    Set {
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Advance the time by a number of ticks
    Add {
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Print the current time
    Query,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum WeatherArg {
    Clear,
    Rain,
    Thunder,
}

impl From<WeatherArg> for Weather {
    fn from(condition: WeatherArg) -> Self {
        match condition {
            WeatherArg::Clear => Weather::Clear,
            WeatherArg::Rain => Weather::Rain,
            WeatherArg::Thunder => Weather::Thunder,
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

/// Load an edit grid at argument parsing, so file errors are reported as
/// usage errors rather than client failures
fn read_grid_file(path: &str) -> Result<BlockGrid, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    let payload: Value =
        serde_json::from_str(&text).map_err(|e| format!("{} is not valid JSON: {}", path, e))?;
    BlockGrid::from_payload(&payload).map_err(|e| e.to_string())
}

fn run(client: &Client, command: Commands) -> craftlink::Result<Value> {
    let result = match command {
        Commands::Setblock {
            x,
            y,
            z,
            block,
            states,
            nbt,
        } => {
            let mut desc = BlockDescriptor::new(block);
            for (key, value) in states {
                desc = desc.with_state(key, value);
            }
            if let Some(nbt) = nbt {
                desc = desc.with_nbt(nbt);
            }
            json!(client.place(Position::new(x, y, z), desc)?)
        }
        Commands::Getblock { x, y, z } => json!(client.get_block(x, y, z)?),
        Commands::Fill { region, block } => json!(client.fill(region.into(), &block)?),
        Commands::Getpos { username } => {
            let pos: [i64; 3] = client.get_pos(&username)?.into();
            json!(pos)
        }
        Commands::Teleport {
            username,
            x,
            y,
            z,
            yaw,
            pitch,
        } => {
            let rotation = yaw.zip(pitch).map(|(yaw, pitch)| Rotation::new(yaw, pitch));
            json!(client.teleport(&username, Location::new(x, y, z), rotation)?)
        }
        Commands::Gamemode { username, mode } => json!(client.gamemode(&username, mode.into())?),
        Commands::Time { action } => {
            let action = match action {
                TimeCmd::Set { value } => TimeAction::Set(value),
                TimeCmd::Add { value } => TimeAction::Add(value),
                TimeCmd::Query => TimeAction::Query,
            };
            json!(client.time(action)?)
        }
        Commands::Weather { condition, duration } => {
            json!(client.weather(condition.into(), duration)?)
        }
        Commands::Give {
            username,
            item,
            amount,
        } => json!(client.give(&username, &item, amount)?),
        Commands::Summon { entity_type, x, y, z } => {
            json!(client.summon(&entity_type, Location::new(x, y, z))?)
        }
        Commands::Kill { selector } => json!(client.kill(&Selector::from(selector.as_str()))?),
        Commands::Clone {
            region,
            dest_x,
            dest_y,
            dest_z,
        } => json!(client.clone_region(region.into(), Position::new(dest_x, dest_y, dest_z))?),
        Commands::Edit { x, y, z, grid } => json!(client.edit(Position::new(x, y, z), &grid)?),
    };
    Ok(result)
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,craftlink=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = ClientConfig::builder()
        .host(&args.host)
        .port(args.port)
        .token(&args.token)
        .timeout(Duration::from_millis(args.timeout_ms))
        .build();
    let client = Client::new(config);

    tracing::debug!("craftlink-cli v{} -> {}", craftlink::VERSION, client.config().addr());

    match run(&client, args.command) {
        Ok(result) => {
            println!("{}", result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
