use tokio::io::{AsyncBufReadExt, BufReader};

use axum_todo_rpc::{
    client::{RpcClient, TodoApi},
    telemetry::{self, LogFormat},
    view::TodoView,
};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

const HELP: &str = "commands: add <title> | toggle <id> | edit <id> | draft <text> | save | cancel | delete <id> | list | help | quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv::dotenv().ok();
    let log_format = match std::env::var("LOG_FORMAT") {
        Ok(raw) => raw.parse::<LogFormat>()?,
        Err(_) => LogFormat::Pretty,
    };
    telemetry::init_tracing(log_format)?;

    let api_url = std::env::var("TODO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let mut view = TodoView::new(RpcClient::new(&api_url));
    view.mount().await;

    println!("{}", view.render());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let (command, arg) = match line.trim().split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{HELP}");
                continue;
            }
            "list" => {}
            "add" => {
                view.set_new_title(arg);
                view.submit_new_todo().await;
            }
            "draft" => view.set_draft(arg),
            "save" => view.save_edit().await,
            "cancel" => view.cancel_edit(),
            "toggle" | "edit" | "delete" => {
                let Some(id) = parse_id(arg) else {
                    println!("expected a numeric id, got {arg:?}");
                    continue;
                };
                dispatch(&mut view, command, id).await;
            }
            other => {
                println!("unknown command {other:?}");
                println!("{HELP}");
                continue;
            }
        }

        println!("{}", view.render());
    }

    Ok(())
}

async fn dispatch<A: TodoApi>(view: &mut TodoView<A>, command: &str, id: i64) {
    match command {
        "toggle" => view.toggle_complete(id).await,
        "edit" => {
            if !view.start_edit(id) {
                println!("no todo with id {id}");
            }
        }
        "delete" => view.delete_todo(id).await,
        _ => {}
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim_start_matches('#').parse().ok()
}
