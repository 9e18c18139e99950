use std::process::ExitCode;

use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info};
use uuid::Uuid;

use common::utils::logging::{init_logging, LogFormat, DEFAULT_FILTER};
use configs::AppConfig;
use dispatcher::{drain_outstanding, present, CallInfo, Dispatcher, Operation, Output, Presenter};
use service::errors::ErrorKind;
use service::{ops, Services};

/// Prints outcomes to stdout; logs stay on stderr.
struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn on_success(&mut self, call: &CallInfo, output: &Output) {
        println!("[{} {}] ok in {} ms", call.operation, call.handle.short(), call.elapsed.as_millis());
        match serde_json::to_string_pretty(output) {
            Ok(json) => println!("{json}"),
            Err(e) => println!("(could not render result: {e})"),
        }
        println!("> ready");
    }

    fn on_error(&mut self, call: &CallInfo, kind: ErrorKind, message: &str) {
        let label = match kind {
            ErrorKind::NotFound => "not found",
            ErrorKind::ConnectionInterrupted => "connection interrupted",
            ErrorKind::Validation => "invalid input",
            ErrorKind::NotConfirmed => "not confirmed",
            ErrorKind::Conflict => "refused",
        };
        println!("[{} {}] {label}: {message}", call.operation, call.handle.short());
        println!("> ready, you may retry");
    }
}

fn print_help() {
    println!("commands: <operation> [args...] [yes] | cancel <handle> | pending | help | quit");
    println!("operations: {}", ops::ALL.join(", "));
    println!("mutating operations need a trailing 'yes' to confirm");
    println!("update-site values: '_' is a space, '\\_' a literal underscore (name=Uffizi_Gallery)");
}

enum Control {
    Continue,
    Dispatched,
    Quit,
}

fn handle_line(dispatcher: &Dispatcher, line: &str) -> Control {
    let line = line.trim();
    let mut words = line.split_whitespace();
    match words.next() {
        None => {}
        Some("quit" | "exit") => return Control::Quit,
        Some("help") => print_help(),
        Some("pending") => {
            let calls = dispatcher.in_flight();
            if calls.is_empty() {
                println!("no calls in flight");
            }
            for (name, handle) in calls {
                println!("{} {name}", handle.short());
            }
        }
        Some("cancel") => match words.next().and_then(|p| dispatcher.find_call(p)) {
            Some(handle) => match dispatcher.cancel(handle) {
                Ok(()) => println!("cancel requested for {}", handle.short()),
                Err(e) => println!("{e}"),
            },
            None => println!("no call in flight with that handle"),
        },
        Some(_) => match line.parse::<Operation>().and_then(|op| dispatcher.invoke(op)) {
            Ok(handle) => {
                println!("dispatched {} (watchdog {}s)", handle.short(), dispatcher.timeout().as_secs());
                return Control::Dispatched;
            }
            Err(e) => println!("{e}"),
        },
    }
    Control::Continue
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let services = Services::from_config(&cfg.facade);
    let (dispatcher, mut completions) = Dispatcher::new(services, &cfg.dispatch);
    let mut presenter = ConsolePresenter;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    // dispatched calls whose completion has not been presented yet
    let mut outstanding = 0usize;

    print_help();
    loop {
        tokio::select! {
            Some(done) = completions.recv() => {
                present(&mut presenter, &done);
                outstanding = outstanding.saturating_sub(1);
            }
            line = lines.next_line() => match line? {
                Some(line) => match handle_line(&dispatcher, &line) {
                    Control::Continue => {}
                    Control::Dispatched => outstanding += 1,
                    Control::Quit => break,
                },
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "console", event = "shutdown_signal", abandoned = outstanding, "received Ctrl+C, shutting down");
                return Ok(());
            }
        }
    }

    // input is closed; every dispatched call still gets its outcome shown
    if outstanding > 0 {
        println!("waiting for {outstanding} call(s) in flight");
        tokio::select! {
            n = drain_outstanding(&mut completions, &mut presenter, outstanding) => {
                debug!(service = "console", event = "drained", presented = n, "in-flight calls settled");
            }
            _ = tokio::signal::ctrl_c() => {
                info!(service = "console", event = "shutdown_signal", "received Ctrl+C while draining, shutting down");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // 提前加载 .env，使得 RUST_LOG / CONFIG_PATH 生效
    dotenv().ok();

    let cfg = match AppConfig::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            init_logging(LogFormat::Compact, DEFAULT_FILTER);
            error!(service = "console", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    init_logging(
        LogFormat::from_name(&cfg.logging.format),
        cfg.logging.filter.as_deref().unwrap_or(DEFAULT_FILTER),
    );

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "console", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "console", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "console",
        event = "start",
        %service_id,
        pid,
        version,
        failure_probability = cfg.facade.failure_probability,
        timeout_secs = cfg.dispatch.timeout_secs,
        "console starting"
    );

    match rt.block_on(run(cfg)) {
        Ok(()) => {
            info!(service = "console", event = "stop", %service_id, pid, "console stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "console", event = "run_failed", error = %e, "console loop failed");
            ExitCode::FAILURE
        }
    }
}
