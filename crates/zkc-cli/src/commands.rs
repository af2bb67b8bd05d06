use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;
use zkc_cert::{Certificate, Content, FieldListContent, ProviderData};
use zkc_crypto::{empty_leaf_value, empty_leaf_value_for_seed, sign_certificate, PrivateKey};
use zkc_merkle::{Proof, TreeConfig};
use zkc_types::{FieldElement, Timestamp};

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let format = cli.format;
    debug!(depth = config.tree.depth, ?format, "loaded configuration");
    match cli.command {
        Command::EmptyLeaf(args) => cmd_empty_leaf(args, format),
        Command::Keygen => cmd_keygen(format),
        Command::Sign(args) => cmd_sign(args),
        Command::Issue(args) => cmd_issue(args),
        Command::Prove(args) => cmd_prove(args, &config, format),
    }
}

fn cmd_empty_leaf(args: EmptyLeafArgs, format: OutputFormat) -> anyhow::Result<()> {
    let value = match &args.seed {
        Some(seed) => empty_leaf_value_for_seed(seed.as_bytes()),
        None => empty_leaf_value(),
    };
    match format {
        OutputFormat::Json => print_json(&value),
        OutputFormat::Text => {
            println!("{}", value.to_string().cyan());
            Ok(())
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyPairOutput {
    private_key: String,
    ax: FieldElement,
    bx: FieldElement,
}

fn cmd_keygen(format: OutputFormat) -> anyhow::Result<()> {
    let key = PrivateKey::generate();
    let public = key.public();
    let output = KeyPairOutput {
        private_key: key.to_hex(),
        ax: *public.x(),
        bx: *public.y(),
    };
    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Text => {
            println!("{} Generated provider key", "✓".green().bold());
            println!("  Private key: {}", output.private_key.yellow());
            println!("  Public key x: {}", output.ax.to_string().cyan());
            println!("  Public key y: {}", output.bx.to_string().cyan());
            Ok(())
        }
    }
}

fn cmd_sign(args: SignArgs) -> anyhow::Result<()> {
    let key = PrivateKey::from_hex(&args.key).context("parse provider key")?;
    let content_hash = parse_field(&args.content_hash, "content hash")?;
    let commitment = parse_field(&args.commitment, "holder commitment")?;

    let signature = sign_certificate(&key, &content_hash, &commitment)?;
    print_json(&ProviderData::new(key.public(), signature))
}

fn cmd_issue(args: IssueArgs) -> anyhow::Result<()> {
    let content: FieldListContent = read_json(&args.content)?;
    let key = PrivateKey::from_hex(&args.key).context("parse provider key")?;
    let commitment = parse_field(&args.commitment, "holder commitment")?;
    let expires = Timestamp::from_unix(args.expires)?;

    let content_hash = content.hash().context("hash certificate content")?;
    let signature = sign_certificate(&key, &content_hash, &commitment)?;
    let certificate = Certificate::new(
        commitment,
        content,
        &key.public(),
        &signature,
        args.salt,
        expires,
    )?;
    print_json(&certificate)
}

#[derive(Serialize)]
struct ProveOutput {
    root: FieldElement,
    proof: Proof,
}

fn cmd_prove(args: ProveArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let leaves: Vec<FieldElement> = read_json(&args.leaves)?;
    let tree_config = resolve_tree_config(args.depth, config);

    let mut tree = tree_config.build_empty()?;
    for (index, leaf) in leaves.iter().enumerate() {
        tree.set_leaf(index, *leaf)?;
    }
    let output = ProveOutput {
        root: tree.root().0,
        proof: tree.proof(args.index)?,
    };

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Text => {
            println!(
                "Tree depth {}, {} leaves, {} set",
                tree.depth().to_string().bold(),
                tree.leaves_count(),
                leaves.len()
            );
            println!("  Root: {}", output.root.to_string().cyan());
            println!("  Leaf {}: indices {:#b}", args.index, output.proof.indices);
            for (level, sibling) in output.proof.siblings().iter().enumerate() {
                println!("  [{level}] {}", sibling.value());
            }
            Ok(())
        }
    }
}

fn resolve_tree_config(depth: Option<usize>, config: &CliConfig) -> TreeConfig {
    match depth {
        Some(depth) => TreeConfig::with_depth(depth),
        None => config.tree.clone(),
    }
}

fn parse_field(text: &str, what: &str) -> anyhow::Result<FieldElement> {
    FieldElement::parse_decimal(text).with_context(|| format!("parse {what}"))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("decode {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
