//! CLI type definitions.

use clap::{Parser, Subcommand};

use super::commands::{call::CallArgs, operations::OperationsArgs};

#[derive(Parser)]
#[command(name = "spec-client")]
#[command(about = "Call API operations described by an OpenAPI/Swagger document", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved spec URL and CSRF cookie source
    SpecUrl,

    /// List the operations declared by the spec
    Operations(OperationsArgs),

    /// Invoke an operation by id
    Call(CallArgs),
}
