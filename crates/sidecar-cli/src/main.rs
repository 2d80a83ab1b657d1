use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use sidecar_core::{
    run_feed, Dashboard, DashboardHandle, FeedSummary, LineStreamSource, PayloadSource,
    PollingSource, SidecarConfig,
};
use sidecar_model::{find_template, invalid_payload, templates, Payload, FULL_JSON, SAMPLE_JSON};
use sidecar_validation::parse_and_validate;
use std::io::{ErrorKind, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufReader, DuplexStream};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod report;

fn cli() -> Command {
    Command::new("sidecar")
        .version(sidecar_core::VERSION)
        .about("Side-Car roadmap contract validator and progress viewer")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a payload against sidecar_roadmap_v1")
                .arg(input_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("progress")
                .about("Print roadmap and phase progress for a valid payload")
                .arg(input_arg())
                .arg(
                    Arg::new("client-view")
                        .long("client-view")
                        .action(ArgAction::SetTrue)
                        .help("Show only deliverables in phase counts and up next"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("sample")
                .about("Print a bundled dataset")
                .arg(
                    Arg::new("full")
                        .long("full")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("invalid")
                        .help("The larger dataset with deliverables"),
                )
                .arg(
                    Arg::new("invalid")
                        .long("invalid")
                        .action(ArgAction::SetTrue)
                        .help("A payload that fails validation"),
                ),
        )
        .subcommand(
            Command::new("templates")
                .about("List phase templates")
                .arg(
                    Arg::new("show")
                        .long("show")
                        .value_name("ID")
                        .help("Print the instantiated phases of one template"),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Poll a payload file and adopt each valid revision")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Payload file to poll"),
                )
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .value_parser(value_parser!(u64).range(1..))
                        .help("Override the configured poll interval"),
                ),
        )
        .subcommand(
            Command::new("stream").about("Read one JSON payload per line from stdin"),
        )
}

fn input_arg() -> Arg {
    Arg::new("input")
        .default_value("-")
        .help("Payload file, or - for stdin")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn load_config(matches: &ArgMatches) -> Result<SidecarConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => SidecarConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(SidecarConfig::default()),
    }
}

fn init_tracing(default_filter: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_input(args: &ArgMatches) -> Result<String> {
    let input = args.get_one::<String>("input").map_or("-", String::as_str);
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read payload from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read payload {input}"))
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn validate_command(args: &ArgMatches) -> Result<ExitCode> {
    let checked = parse_and_validate(&read_input(args)?);
    let result = &checked.result;

    if args.get_flag("json") {
        print_json(result)?;
    } else {
        print!("{}", report::render_issues(result));
        if result.is_renderable() {
            println!("ok ({} warnings)", result.warnings.len());
        }
    }
    Ok(exit_code(result.is_renderable()))
}

fn progress_command(args: &ArgMatches, config: SidecarConfig) -> Result<ExitCode> {
    let config = if args.get_flag("client-view") {
        config.with_client_view(true)
    } else {
        config
    };

    let checked = parse_and_validate(&read_input(args)?);
    if !checked.result.is_renderable() {
        eprint!("{}", report::render_issues(&checked.result));
        return Ok(ExitCode::FAILURE);
    }
    let value = checked.renderable_value().context("validated payload missing")?;
    let payload = Payload::from_value(value).context("failed to convert validated payload")?;

    let reports = report::build(&payload, &config);
    if args.get_flag("json") {
        print_json(&reports)?;
    } else {
        print!("{}", report::render_text(&reports));
    }
    Ok(ExitCode::SUCCESS)
}

fn sample_command(args: &ArgMatches) -> Result<ExitCode> {
    if args.get_flag("full") {
        print!("{FULL_JSON}");
    } else if args.get_flag("invalid") {
        print_json(&invalid_payload())?;
    } else {
        print!("{SAMPLE_JSON}");
    }
    Ok(ExitCode::SUCCESS)
}

fn templates_command(args: &ArgMatches) -> Result<ExitCode> {
    if let Some(id) = args.get_one::<String>("show") {
        let template = find_template(id)?;
        print_json(&template.instantiate())?;
        return Ok(ExitCode::SUCCESS);
    }
    for template in templates() {
        println!(
            "{:<22} {} {} ({} phases)",
            template.id,
            template.emoji,
            template.name,
            template.phases.len()
        );
        println!("{:<22} {}", "", template.description);
    }
    Ok(ExitCode::SUCCESS)
}

const PIPE_CAPACITY: usize = 64 * 1024;

/// Bridge a blocking reader into the runtime through a plain thread
///
/// The thread is detached, so a read that never returns does not hold up
/// runtime shutdown. EOF or a read error closes the pipe.
fn pipe_blocking_reader<R: Read + Send + 'static>(mut reader: R) -> BufReader<DuplexStream> {
    let (mut writer, pipe) = tokio::io::duplex(PIPE_CAPACITY);
    let runtime = tokio::runtime::Handle::current();
    std::thread::spawn(move || {
        let mut buf = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "input read failed");
                    break;
                }
            };
            if runtime.block_on(writer.write_all(&buf[..n])).is_err() {
                break;
            }
        }
    });
    BufReader::new(pipe)
}

/// Run a feed until the source ends or Ctrl-C
async fn follow<S: PayloadSource>(source: S, config: SidecarConfig) -> Result<ExitCode> {
    let handle = DashboardHandle::new(Dashboard::new(config)?);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    let summary: FeedSummary = run_feed(source, &handle, shutdown_rx).await;
    println!(
        "received {}, adopted {}, rejected {}",
        summary.received, summary.adopted, summary.rejected
    );

    let dashboard = handle.read();
    let reports = report::build(dashboard.payload(), dashboard.config());
    print!("{}", report::render_text(&reports));
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    init_tracing(&config.log_filter, matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("validate", args)) => validate_command(args),
        Some(("progress", args)) => progress_command(args, config),
        Some(("sample", args)) => sample_command(args),
        Some(("templates", args)) => templates_command(args),
        Some(("watch", args)) => {
            let path = args
                .get_one::<PathBuf>("file")
                .context("missing payload file")?;
            let interval = args
                .get_one::<u64>("interval-ms")
                .map_or_else(|| config.feed.poll_interval(), |ms| Duration::from_millis(*ms));
            tracing::info!(path = %path.display(), ?interval, "watching payload file");
            follow(PollingSource::new(path, interval), config).await
        }
        Some(("stream", _)) => {
            let stdin = pipe_blocking_reader(std::io::stdin());
            follow(LineStreamSource::new(stdin), config).await
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}
