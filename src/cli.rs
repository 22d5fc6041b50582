use clap::Parser;

pub const BIN_NAME: &str = "tlumacz";

/// Flags and input recognised on the command line
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, disable_help_flag = true, disable_version_flag = true)]
struct RawArgs {
    #[arg(short = 'h', long = "help")]
    help: bool,

    #[arg(short = 'v', long = "version")]
    version: bool,

    #[arg(long = "detect-lang")]
    detect_lang: bool,

    #[arg(long = "config", value_name = "PATH")]
    config: Option<String>,

    #[arg(long = "source", value_name = "CODE")]
    source: Option<String>,

    #[arg(long = "target", value_name = "CODE")]
    target: Option<String>,

    #[arg(value_name = "TEXT")]
    text: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    pub show_help: bool,
    pub show_version: bool,
    pub detect_only: bool,
    /// Last non-flag argument, if any
    pub text: Option<String>,
    pub config_path: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
}

/// Parse process arguments, excluding the program name.
pub fn parse_args<I, T>(args: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let argv = std::iter::once(BIN_NAME.to_string()).chain(args.into_iter().map(Into::into));
    let raw = RawArgs::try_parse_from(argv)?;

    Ok(ParsedArgs {
        show_help: raw.help,
        show_version: raw.version,
        detect_only: raw.detect_lang,
        text: raw.text.into_iter().last(),
        config_path: raw.config,
        source_language: raw.source,
        target_language: raw.target,
    })
}

pub fn usage() -> String {
    format!(
        "Usage: {bin} [OPTIONS] \"<TEXT>\"

Detects the language of TEXT and translates it: Polish text to English,
anything else to Polish.

Options:
  -h, --help           Show this help and exit
  -v, --version        Show version information and exit
      --detect-lang    Only detect the language, do not translate
      --config <PATH>  Read configuration from PATH
      --source <CODE>  Source language code (default: pl)
      --target <CODE>  Target language code (default: en)

Credentials are taken from GOOGLE_TRANSLATE_API_KEY, GOOGLE_CLOUD_ACCESS_TOKEN
or the active gcloud session.",
        bin = BIN_NAME
    )
}

pub fn version_banner() -> String {
    format!(
        "{} {}\nCopyright (c) {} contributors",
        BIN_NAME,
        env!("CARGO_PKG_VERSION"),
        BIN_NAME
    )
}
