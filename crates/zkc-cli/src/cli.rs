use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "zkc",
    about = "zkcert: zero-knowledge certificates and their Merkle registry",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the empty-leaf value
    EmptyLeaf(EmptyLeafArgs),
    /// Generate a provider key pair
    Keygen,
    /// Sign a content hash bound to a holder commitment
    Sign(SignArgs),
    /// Build a certificate from field-list content
    Issue(IssueArgs),
    /// Build a tree from leaf values and print an inclusion proof
    Prove(ProveArgs),
}

#[derive(Args)]
pub struct EmptyLeafArgs {
    /// Derive from this seed instead of the registry default
    #[arg(long)]
    pub seed: Option<String>,
}

#[derive(Args)]
pub struct SignArgs {
    /// Provider private key, 64 hex characters
    #[arg(long)]
    pub key: String,
    #[arg(long)]
    pub content_hash: String,
    #[arg(long)]
    pub commitment: String,
}

#[derive(Args)]
pub struct IssueArgs {
    /// JSON file with `{"standard": ..., "fields": [...]}`
    #[arg(long)]
    pub content: PathBuf,
    /// Provider private key, 64 hex characters
    #[arg(long)]
    pub key: String,
    #[arg(long)]
    pub commitment: String,
    #[arg(long, allow_negative_numbers = true)]
    pub salt: i64,
    /// Expiration as unix seconds
    #[arg(long)]
    pub expires: i64,
}

#[derive(Args)]
pub struct ProveArgs {
    /// JSON file with a list of decimal leaf values
    #[arg(long)]
    pub leaves: PathBuf,
    #[arg(long)]
    pub index: usize,
    /// Overrides the configured tree depth (16 when neither is set)
    #[arg(long)]
    pub depth: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prove_with_depth() {
        let cli = Cli::try_parse_from([
            "zkc", "prove", "--leaves", "leaves.json", "--index", "3", "--depth", "4",
        ])
        .unwrap();
        match cli.command {
            Command::Prove(args) => {
                assert_eq!(args.index, 3);
                assert_eq!(args.depth, Some(4));
                assert_eq!(args.leaves, PathBuf::from("leaves.json"));
            }
            _ => panic!("expected prove"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "zkc", "keygen", "--verbose", "--format", "json", "--config", "zkc.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("zkc.toml")));
    }

    #[test]
    fn issue_accepts_negative_salt_argument() {
        let cli = Cli::try_parse_from([
            "zkc", "issue", "--content", "c.json", "--key", "00", "--commitment", "1",
            "--salt", "-5", "--expires", "100",
        ])
        .unwrap();
        match cli.command {
            Command::Issue(args) => assert_eq!(args.salt, -5),
            _ => panic!("expected issue"),
        }
    }

    #[test]
    fn sign_requires_all_arguments() {
        assert!(Cli::try_parse_from(["zkc", "sign", "--key", "00"]).is_err());
    }
}
