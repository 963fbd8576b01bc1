//! Terminal chat — `sarthi chat`.
//!
//! Same submit flow as the web page: one POST per line, bot replies printed
//! as they arrive, failures shown as `!!` notices. The prompt carries the
//! live clock.

use sarthi_backend::HttpBackend;
use sarthi_chat::{render::render_line, ChatView, Clock, SubmitOutcome};
use sarthi_core::config::{ChatEndpoint, SarthiConfig};
use sarthi_core::Role;
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// How long a send may run before the typing line is shown.
const TYPING_DELAY: Duration = Duration::from_millis(300);

pub async fn run(config: SarthiConfig, direct: bool) -> anyhow::Result<()> {
    let endpoint = if direct {
        ChatEndpoint::Direct
    } else {
        config.chat.endpoint
    };
    let url = config.chat_url(endpoint);
    let backend = HttpBackend::new(url.clone(), config.upstream.timeout())?;

    let clock = Clock::spawn();
    let mut view = ChatView::new();

    println!("--- AMC Sarthi ---");
    println!("Sending to: {}", url);
    println!("Type /exit to quit.");
    println!("------------------");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n[{}] You> ", clock.current());
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        if matches!(line.trim(), "/exit" | "/quit") {
            break;
        }

        let before = view.transcript().len();
        let outcome = submit_with_indicator(&mut view, &backend, &line).await;

        for msg in view.transcript().since(before) {
            if msg.role == Role::Bot {
                println!("{}", render_line(msg));
            }
        }
        if let Some(notice) = outcome.notice {
            println!("!! {notice}");
        }
    }

    println!("{} message(s) this session.", view.transcript().len());
    Ok(())
}

/// Submit, printing a typing line if the backend is slow to answer.
async fn submit_with_indicator(
    view: &mut ChatView,
    backend: &HttpBackend,
    input: &str,
) -> SubmitOutcome {
    let typing = view.typing();
    let submit = view.submit(backend, input);
    tokio::pin!(submit);

    tokio::select! {
        outcome = &mut submit => outcome,
        _ = tokio::time::sleep(TYPING_DELAY) => {
            if typing.is_active() {
                println!("Typing...");
            }
            submit.await
        }
    }
}
