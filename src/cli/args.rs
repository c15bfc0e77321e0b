use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "packbrowser",
    version,
    about = "texture pack catalog browser",
    long_about = "Packbrowser loads a texture pack catalog (a JSON array of packs) and lets you search it, narrow it with facets and page through the result.\n\nExamples:\n  packbrowser -s data/data.json -q \"faithful by:alice\"\n  packbrowser -s https://packs.example/data.json -r 32x -F yes -p 2\n  packbrowser -s data/data.json -i my-pack -f html -o my-pack.html\n  packbrowser -s data/data.json -I\n\nTip: Use --config to persist the catalog source and default facets."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv, -vvv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered view to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'f',
        long = "fmt",
        visible_alias = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format: text, json or html (inferred from --output when omitted)."
    )]
    pub format: Option<String>,

    #[arg(
        short = 's',
        long = "src",
        visible_alias = "source",
        value_name = "FILE|URL",
        help_heading = "Input",
        help = "Catalog location: a JSON file or an http(s) URL (defaults to data/data.json)."
    )]
    pub source: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.packbrowser/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "Input",
        help = "HTTP timeout when fetching a remote catalog."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'q',
        long = "q",
        visible_alias = "query",
        value_name = "TEXT",
        allow_hyphen_values = true,
        help_heading = "Filters",
        help = "Free-text search on pack names; a by:<creator> token filters by creator."
    )]
    pub query: Option<String>,

    #[arg(
        short = 'r',
        long = "res",
        visible_alias = "resolution",
        value_name = "TIER",
        help_heading = "Filters",
        help = "Only packs offered in this resolution (\"all\" for any)."
    )]
    pub resolution: Option<String>,

    #[arg(
        short = 't',
        long = "typ",
        visible_alias = "type",
        value_name = "TYPE",
        help_heading = "Filters",
        help = "Only packs of this lowercase type (\"all\" for any)."
    )]
    pub pack_type: Option<String>,

    #[arg(
        short = 'F',
        long = "ft",
        visible_alias = "featured",
        value_name = "VALUE",
        help_heading = "Filters",
        help = "Any value other than \"all\" shows featured packs only."
    )]
    pub featured: Option<String>,

    #[arg(
        short = 'L',
        long = "lf",
        visible_alias = "list-facets",
        help_heading = "Filters",
        help = "List the resolutions and types present in the catalog and exit."
    )]
    pub list_facets: bool,

    #[arg(
        short = 'p',
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "Paging",
        help = "Page to show (1-based); falls back to 1 when past the end."
    )]
    pub page: Option<usize>,

    #[arg(
        short = 'P',
        long = "ps",
        visible_alias = "page-size",
        value_name = "N",
        help_heading = "Paging",
        help = "Packs per page (default 10)."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'i',
        long = "inf",
        visible_alias = "info",
        value_name = "ID",
        help_heading = "View",
        help = "Show the detail view of one pack instead of a page of cards."
    )]
    pub info: Option<String>,

    #[arg(
        short = 'I',
        long = "it",
        visible_alias = "interactive",
        help_heading = "View",
        help = "Browse interactively: read commands from stdin, one per line."
    )]
    pub interactive: bool,
}
