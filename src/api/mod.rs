use axum::{
    Router,
    body::Bytes,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{ComplianceReport, RecordFields, RuleEngine};
use crate::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "complisense",
    about = "Check a financial household record against MoneySense guidelines",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log filter when RUST_LOG is unset, e.g. debug or complisense=trace"
    )]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the evaluation API over HTTP
    Serve(ServeArgs),
    /// Evaluate one record given as a JSON object and print the report
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    #[arg(long, help = "JSON file with the record fields; reads stdin when omitted")]
    input: Option<PathBuf>,
    #[arg(long, help = "Pretty-print the report")]
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub async fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level).map_err(|e| e.to_string())?;

    match cli.command {
        Command::Serve(args) => run_http_server(SocketAddr::new(args.host, args.port))
            .await
            .map_err(|e| format!("server error: {e}")),
        Command::Evaluate(args) => {
            let output = evaluate_command(&args, &RuleEngine::default())?;
            println!("{output}");
            Ok(())
        }
    }
}

fn evaluate_command(args: &EvaluateArgs, engine: &RuleEngine) -> Result<String, String> {
    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("--input {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            buf
        }
    };
    let report = evaluate_json(engine, raw.as_bytes())?;
    let encoded = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    encoded.map_err(|e| format!("failed to encode report: {e}"))
}

fn record_fields_from_json(raw: &[u8]) -> Result<RecordFields, String> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(RecordFields::default());
    }
    serde_json::from_slice::<RecordFields>(raw).map_err(|e| format!("Invalid record JSON: {e}"))
}

fn evaluate_json(engine: &RuleEngine, raw: &[u8]) -> Result<ComplianceReport, String> {
    let fields = record_fields_from_json(raw)?;
    Ok(engine.evaluate_fields(&fields))
}

pub fn router(engine: RuleEngine) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/api/guidelines", get(guidelines_handler))
        .route(
            "/api/evaluate",
            get(evaluate_get_handler).post(evaluate_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(engine)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let app = router(RuleEngine::default());

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "compliance API listening");

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn guidelines_handler(State(engine): State<RuleEngine>) -> Response {
    json_response(StatusCode::OK, *engine.thresholds())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn evaluate_get_handler(
    State(engine): State<RuleEngine>,
    Query(fields): Query<RecordFields>,
) -> Response {
    report_response(engine.evaluate_fields(&fields))
}

async fn evaluate_post_handler(State(engine): State<RuleEngine>, body: Bytes) -> Response {
    match evaluate_json(&engine, &body) {
        Ok(report) => report_response(report),
        Err(msg) => {
            warn!(error = %msg, "rejected evaluation request");
            error_response(StatusCode::BAD_REQUEST, &msg)
        }
    }
}

fn report_response(report: ComplianceReport) -> Response {
    info!(score = report.score, status = ?report.status, "evaluation complete");
    json_response(StatusCode::OK, report)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
