use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::types::{DEFAULT_PORT, DEFAULT_RECIPES_FILE};

#[derive(Parser, Debug, Clone)]
#[command(name = "recipebox")]
#[command(about = "Serve a JSON file of recipes over HTTP")]
#[command(version)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "RECIPEBOX_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "RECIPEBOX_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Recipes file, relative to the working directory unless absolute
    #[arg(long, env = "RECIPEBOX_FILE", default_value = DEFAULT_RECIPES_FILE)]
    pub recipes_file: PathBuf,

    /// Serialize creates behind an in-process lock
    #[arg(long, env = "RECIPEBOX_SERIALIZE_WRITES")]
    pub serialize_writes: bool,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
