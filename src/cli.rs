use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "metascope")]
#[command(about = "A CLI SEO meta tag analyzer", long_about = None)]
pub struct Cli {
    /// One or more page URLs to analyze
    #[arg(value_name = "URL", required = true, num_args = 1..)]
    pub urls: Vec<String>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub output: String,

    /// Save report to file
    #[arg(short, long)]
    pub save: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[arg(short, long, default_value_t = 30)]
    pub timeout: u64,

    /// Print every extracted tag for each page
    #[arg(long)]
    pub show_tags: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long)]
    pub config: Option<String>,
}
