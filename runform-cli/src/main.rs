use std::fs;
use std::io::{self, Read};
use std::path::Path;

use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::{Report, Result, WrapErr, bail, eyre};
use serde_json::Value;
use tracing::debug;

use runform::{
    ControllerOptions, CreateRunController, CreateRunError, DocumentFormat, Effect, EntryField,
    FormCommand, ListKind, LookupError, OutputDestination, OutputOptions, PipelineLookup,
    PipelineSchema, RunClient, RunPayload, SubmissionOutcome, TimeoutKind, ValidationResult,
    build_payload, emit, parse_document_str, pipeline_schema_from_value, render_manifest,
    to_document,
};

#[derive(Debug, Parser)]
#[command(
    name = "runform",
    version,
    about = "Assemble, preview and submit pipeline runs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the run document the form would submit
    Preview {
        #[command(flatten)]
        form: FormArgs,
        /// Output format (json or yaml)
        #[arg(long = "format", value_name = "FORMAT")]
        format: Option<DocumentFormat>,
        /// Print the raw request payload instead of the run manifest
        #[arg(long = "payload")]
        payload: bool,
        /// Emit compact JSON rather than pretty formatting
        #[arg(long = "no-pretty")]
        no_pretty: bool,
        /// Output destinations ("-" writes to stdout). Accepts multiple values per flag use.
        #[arg(
            short = 'o',
            long = "output",
            value_name = "DEST",
            num_args = 1..,
            action = ArgAction::Append
        )]
        outputs: Vec<String>,
        /// Overwrite output files even if they already exist
        #[arg(long = "force", alias = "yes")]
        force: bool,
    },
    /// Validate the form and report every offending field
    Validate {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Run the full submission against a stdout client
    Submit {
        #[command(flatten)]
        form: FormArgs,
        /// Print the payload instead of sending it anywhere
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
}

#[derive(Debug, Args)]
struct FormArgs {
    /// Pipeline definition: file path, inline payload, or "-" for stdin
    #[arg(short = 'p', long = "pipeline", value_name = "SPEC")]
    pipeline: String,

    /// Query string seeding the form, e.g. "namespace=dev&pipelineName=build"
    #[arg(long = "url", value_name = "QUERY", default_value = "")]
    url: String,

    #[arg(short = 'n', long = "namespace", value_name = "NAME")]
    namespace: Option<String>,

    /// Pipeline name; defaults to the URL, then to the definition's metadata.name
    #[arg(long = "name", value_name = "NAME")]
    name: Option<String>,

    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_pair)]
    params: Vec<(String, String)>,

    #[arg(long = "resource", value_name = "KEY=VALUE", value_parser = parse_pair)]
    resources: Vec<(String, String)>,

    #[arg(short = 'l', long = "label", value_name = "KEY=VALUE", value_parser = parse_pair)]
    labels: Vec<(String, String)>,

    #[arg(long = "node-selector", value_name = "KEY=VALUE", value_parser = parse_pair)]
    node_selector: Vec<(String, String)>,

    #[arg(long = "run-name", value_name = "NAME")]
    run_name: Option<String>,

    #[arg(long = "service-account", value_name = "NAME")]
    service_account: Option<String>,

    /// Create the run in a pending state
    #[arg(long = "pending")]
    pending: bool,

    #[arg(long = "timeout-pipeline", value_name = "DURATION")]
    timeout_pipeline: Option<String>,

    #[arg(long = "timeout-tasks", value_name = "DURATION")]
    timeout_tasks: Option<String>,

    #[arg(long = "timeout-finally", value_name = "DURATION")]
    timeout_finally: Option<String>,
}

/// Serves the one definition loaded from the command line.
struct DefinitionLookup(PipelineSchema);

#[async_trait::async_trait]
impl PipelineLookup for DefinitionLookup {
    async fn get_pipeline(&self, _: &str, _: &str) -> Result<PipelineSchema, LookupError> {
        Ok(self.0.clone())
    }
}

struct StdoutClient;

#[async_trait::async_trait]
impl RunClient for StdoutClient {
    async fn create_run(&self, payload: &RunPayload) -> Result<(), CreateRunError> {
        let text = serde_json::to_string_pretty(payload)
            .map_err(|err| CreateRunError::Transport(err.to_string()))?;
        println!("{text}");
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Preview {
            form,
            format,
            payload,
            no_pretty,
            outputs,
            force,
        } => {
            let controller = build_controller(&form).await?;
            let document = if payload {
                to_document(controller.state())
            } else {
                render_manifest(
                    &build_payload(controller.state()),
                    &controller.options().api_version,
                )
            };
            let destinations = outputs
                .iter()
                .map(|raw| OutputDestination::parse(raw))
                .collect::<Result<Vec<_>, _>>()
                .map_err(Report::msg)?;
            let options = match format {
                Some(format) => OutputOptions::new(format).with_destinations(destinations),
                None => OutputOptions::inferred(destinations, DocumentFormat::default()),
            }
            .with_pretty(!no_pretty)
            .with_overwrite(force);
            emit(&document, &options).map_err(Report::msg)?;
        }
        Command::Validate { form } => {
            let mut controller = build_controller(&form).await?;
            match controller.begin_submit() {
                Ok(_) => println!("valid"),
                Err(blocked) => {
                    print_issues(&controller.state().validation);
                    return Err(eyre!(blocked));
                }
            }
        }
        Command::Submit { form, dry_run } => {
            if !dry_run {
                bail!("no cluster client is configured; pass --dry-run");
            }
            let mut controller = build_controller(&form).await?;
            match controller.submit(&StdoutClient).await {
                Ok(SubmissionOutcome::Navigate(target)) => println!("navigate: {target}"),
                Ok(SubmissionOutcome::Failed(message)) => bail!(message),
                Err(blocked) => {
                    print_issues(&controller.state().validation);
                    return Err(eyre!(blocked));
                }
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

async fn build_controller(form: &FormArgs) -> Result<CreateRunController> {
    let definition = load_value(&form.pipeline, "pipeline")?;
    let schema = pipeline_schema_from_value(&definition).map_err(Report::msg)?;
    let lookup = DefinitionLookup(schema);

    let (mut controller, mut effects) =
        CreateRunController::mount(&form.url, ControllerOptions::default());
    let url_pipeline = Some(controller.state().pipeline_ref.clone()).filter(|n| !n.is_empty());
    if let Some(namespace) = &form.namespace {
        effects.extend(controller.dispatch(FormCommand::SetNamespace(namespace.clone())));
    }
    let name = form
        .name
        .clone()
        .or(url_pipeline)
        .or_else(|| {
            definition
                .pointer("/metadata/name")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .ok_or_else(|| eyre!("pipeline name unknown; pass --name"))?;
    effects.extend(controller.dispatch(FormCommand::SetPipelineRef(name)));

    for effect in effects {
        match effect {
            Effect::FetchSchema(request) => {
                controller.load_schema(request, &lookup).await;
            }
            Effect::ReplaceUrl(query) => debug!(%query, "url updated"),
            other => debug!(?other, "ignoring effect"),
        }
    }

    for (name, value) in &form.params {
        controller.dispatch(FormCommand::SetParam {
            name: name.clone(),
            value: value.clone(),
        });
    }
    for (name, value) in &form.resources {
        controller.dispatch(FormCommand::SetResource {
            name: name.clone(),
            value: value.clone(),
        });
    }
    fill_list(&mut controller, ListKind::Labels, &form.labels);
    fill_list(&mut controller, ListKind::NodeSelector, &form.node_selector);

    if let Some(run_name) = &form.run_name {
        controller.dispatch(FormCommand::SetRunName(run_name.clone()));
    }
    if let Some(account) = &form.service_account {
        controller.dispatch(FormCommand::SetServiceAccount(account.clone()));
    }
    controller.dispatch(FormCommand::SetPendingStatus(form.pending));
    for (kind, value) in [
        (TimeoutKind::Pipeline, &form.timeout_pipeline),
        (TimeoutKind::Tasks, &form.timeout_tasks),
        (TimeoutKind::Finally, &form.timeout_finally),
    ] {
        if let Some(value) = value {
            controller.dispatch(FormCommand::SetTimeout(kind, value.clone()));
        }
    }
    Ok(controller)
}

fn fill_list(controller: &mut CreateRunController, list: ListKind, pairs: &[(String, String)]) {
    for (key, value) in pairs {
        controller.dispatch(FormCommand::AddEntry(list));
        let index = controller.state().list(list).len() - 1;
        for (field, text) in [(EntryField::Key, key), (EntryField::Value, value)] {
            controller.dispatch(FormCommand::ChangeEntry {
                list,
                index,
                field,
                value: text.clone(),
            });
        }
    }
}

fn print_issues(result: &ValidationResult) {
    let checks = [
        ("namespace", result.valid_namespace),
        ("pipeline", result.valid_pipeline_ref),
        ("resources", result.valid_resources),
        ("params", result.valid_params),
        ("run name", result.valid_pipeline_run_name),
    ];
    for (label, valid) in checks {
        if !valid {
            eprintln!("invalid {label}");
        }
    }
    for flag in result.invalid_labels.keys() {
        eprintln!("invalid label {flag}");
    }
    for flag in result.invalid_node_selector.keys() {
        eprintln!("invalid node selector {flag}");
    }
}

fn parse_pair(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

fn load_value(spec: &str, label: &str) -> Result<Value> {
    if spec == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("failed to read from stdin")?;
        return parse_contents(&buffer, DocumentFormat::Json, label);
    }

    let path = Path::new(spec);
    match fs::read_to_string(path) {
        Ok(contents) => parse_contents(&contents, format_from_extension(path), label),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            parse_contents(spec, DocumentFormat::Json, &format!("inline {label}"))
        }
        Err(err) => {
            Err(Report::new(err).wrap_err(format!("failed to read file {}", path.display())))
        }
    }
}

fn format_from_extension(path: &Path) -> DocumentFormat {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
        .unwrap_or(DocumentFormat::Json)
}

fn parse_contents(contents: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    match parse_document_str(contents, format) {
        Ok(value) => Ok(value),
        Err(primary) => {
            #[cfg(feature = "yaml")]
            if format != DocumentFormat::Yaml
                && let Ok(value) = parse_document_str(contents, DocumentFormat::Yaml)
            {
                return Ok(value);
            }
            Err(Report::msg(format!("failed to parse {label}: {primary}")))
        }
    }
}
