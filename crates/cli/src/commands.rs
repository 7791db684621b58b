use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a filter request against a collection schema
    Plan {
        #[arg(long, help = "Schema file path (JSON)")]
        schema: String,

        #[arg(long, help = "Filter request file path (JSON)")]
        request: String,

        #[arg(long, help = "Settings file path (JSON)")]
        settings: Option<String>,

        #[arg(
            long,
            help = "If specified, writes the compiled query to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Rewrite a single-document selector into backend form
    Normalize {
        #[arg(long, help = "Selector as a JSON object")]
        selector: String,
    },
}
