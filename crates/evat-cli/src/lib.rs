pub mod cli;
pub mod manifest;

pub use cli::{
    build_cli_command, Cli, Commands, DriversArgs, ForecastArgs, OutputFormat, ReadinessArgs,
    TrendArgs,
};
