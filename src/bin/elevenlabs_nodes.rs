//! elevenlabs-nodes: run the ElevenLabs nodes from a terminal.
//!
//! Usage:
//!   elevenlabs-nodes nodes                                  Print node descriptors as JSON
//!   elevenlabs-nodes query-voice --seed <n> [filters]       Pick a shared voice
//!   elevenlabs-nodes synthesize --voice-id <id> <text>      Synthesize speech to WAV

use anyhow::{anyhow, bail, Context};
use elevenlabs_nodes::nodes::{NodeRegistry, TTS_NODE, VOICE_QUERY_NODE};
use elevenlabs_nodes::{ClientConfig, ElevenLabsClient};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const FACET_FLAGS: &[(&str, &str)] = &[
    ("--category", "category"),
    ("--gender", "gender"),
    ("--age", "age"),
    ("--language", "language"),
    ("--locale", "locale"),
    ("--use-case", "use_cases"),
    ("--descriptive", "descriptive"),
];

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "nodes" => cmd_nodes(&args[2..]),
        "query-voice" => cmd_query_voice(&args[2..]).await,
        "synthesize" => cmd_synthesize(&args[2..]).await,
        "version" | "--version" | "-V" => {
            println!("elevenlabs-nodes {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"elevenlabs-nodes: ElevenLabs voice query and TTS nodes

USAGE:
    elevenlabs-nodes <COMMAND> [OPTIONS]

COMMANDS:
    nodes                                   Print node descriptors as JSON
    query-voice --seed <n> [FILTERS]        Pick one shared voice and print its id
        --category <c> --gender <g> --age <a> --language <l>
        --locale <l> --use-case <u> --descriptive <d> --page-size <n>
    synthesize --voice-id <id> [--model <m>] [--out <file.wav>] <text>
                                            Synthesize text and write a WAV file
    version                                 Show version information
    help                                    Show this help message

COMMON OPTIONS:
    --api-key <key>                         Credential (default: $ELEVENLABS_API_KEY)
    --config <file.yaml>                    Client configuration file

ENVIRONMENT:
    ELEVENLABS_API_KEY                      Provider credential
    ELEVENLABS_BASE_URL                     API base URL override
    ELEVENLABS_HTTP_TIMEOUT_SECS            Per-attempt request timeout
    RUST_LOG                                Log filter (default: info)"#
    );
}

/// Value following `flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Arguments that are neither flags nor flag values.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
            continue;
        }
        if arg.starts_with("--") {
            skip = true;
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

fn api_key(args: &[String]) -> String {
    flag_value(args, "--api-key")
        .map(String::from)
        .or_else(|| std::env::var("ELEVENLABS_API_KEY").ok())
        .unwrap_or_default()
}

fn registry(args: &[String]) -> anyhow::Result<NodeRegistry> {
    let config = match flag_value(args, "--config") {
        Some(path) => ClientConfig::from_yaml_file(path)
            .with_context(|| format!("loading {path}"))?
            .with_env_overrides(),
        None => ClientConfig::from_env(),
    };
    let client = ElevenLabsClient::builder().config(config).build()?;
    Ok(NodeRegistry::standard(&client))
}

fn cmd_nodes(args: &[String]) -> anyhow::Result<()> {
    let registry = registry(args)?;
    println!("{}", serde_json::to_string_pretty(&registry.descriptors())?);
    Ok(())
}

async fn cmd_query_voice(args: &[String]) -> anyhow::Result<()> {
    let seed: u64 = flag_value(args, "--seed")
        .ok_or_else(|| anyhow!("--seed is required"))?
        .parse()
        .context("--seed must be a non-negative integer")?;

    let mut inputs = Map::new();
    inputs.insert("api_key".into(), Value::String(api_key(args)));
    inputs.insert("seed".into(), Value::from(seed));
    for (flag, input) in FACET_FLAGS {
        if let Some(v) = flag_value(args, flag) {
            inputs.insert((*input).into(), Value::String(v.to_string()));
        }
    }
    if let Some(n) = flag_value(args, "--page-size") {
        let n: u64 = n.parse().context("--page-size must be an integer")?;
        inputs.insert("page_size".into(), Value::from(n));
    }

    let outputs = registry(args)?.execute(VOICE_QUERY_NODE, &inputs).await?;
    let voice_id = outputs
        .first()
        .and_then(|o| o.as_str())
        .ok_or_else(|| anyhow!("voice query returned no voice_id"))?;
    println!("{voice_id}");
    Ok(())
}

async fn cmd_synthesize(args: &[String]) -> anyhow::Result<()> {
    let text = positional(args).join(" ");
    if text.trim().is_empty() {
        bail!("text to synthesize is required");
    }
    let voice_id = flag_value(args, "--voice-id").ok_or_else(|| anyhow!("--voice-id is required"))?;
    let out = PathBuf::from(flag_value(args, "--out").unwrap_or("speech.wav"));

    let mut inputs = Map::new();
    inputs.insert("text".into(), Value::String(text));
    inputs.insert("voice_id".into(), Value::String(voice_id.to_string()));
    if let Some(model) = flag_value(args, "--model") {
        inputs.insert("model_id".into(), Value::String(model.to_string()));
    }
    inputs.insert("api_key".into(), Value::String(api_key(args)));

    let outputs = registry(args)?.execute(TTS_NODE, &inputs).await?;
    let audio = outputs
        .first()
        .and_then(|o| o.as_audio())
        .ok_or_else(|| anyhow!("synthesis returned no audio"))?;
    audio
        .save_wav(&out)
        .with_context(|| format!("writing {}", out.display()))?;
    println!(
        "{} ({} samples @ {} Hz, {:.2}s)",
        out.display(),
        audio.num_samples(),
        audio.sample_rate(),
        audio.duration_secs()
    );
    Ok(())
}
