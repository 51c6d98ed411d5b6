use clap::Parser;

/// The run itself takes no options; the parser only provides --help and
/// --version.
#[derive(Parser, Debug)]
#[command(name = "fetchcount", version)]
#[command(about = "Count occurrences of \"go\" across a fixed set of web pages", long_about = None)]
pub struct Cli {}
