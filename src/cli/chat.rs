use std::io::Write;
use std::sync::{Arc, RwLock};

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::core::{AppConfig, db::async_db};
use crate::gemini::{ChatError, GeminiClient};
use crate::session::{ChatSession, ExchangeEvent, MessageKind, run_exchange};
use crate::store::CredentialStore;

pub async fn run() -> Result<()> {
    let mut rl = DefaultEditor::new().expect("Editor failed");

    let config = AppConfig::default();
    let db = async_db(&config.db_path).await?;
    let store = CredentialStore::new(db);
    let client = GeminiClient::new(store.clone(), &config);
    let session = Arc::new(RwLock::new(ChatSession::new()));

    // Replay the seeded transcript so the terminal opens the same way
    // the browser UI does. Choice buttons become plain suggestions.
    for msg in session
        .read()
        .expect("Unable to read shared session")
        .messages()
    {
        match msg.kind {
            MessageKind::Text => {
                if let Some(text) = &msg.text {
                    println!("{}\n", text);
                }
            }
            MessageKind::ChoiceSet => {
                if let Some(options) = &msg.options {
                    for option in options {
                        println!("- {}", option.label);
                    }
                    println!();
                }
            }
        }
    }

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if !store.exists().await {
                    println!("{}", ChatError::NoCredential);
                    continue;
                }

                let start = {
                    let mut session = session.write().expect("Unable to write shared session");
                    session.begin_user_turn(&line)
                };
                let Some(start) = start else {
                    continue;
                };

                let (tx, mut rx) = mpsc::unbounded_channel::<ExchangeEvent>();
                let printer = tokio::spawn(async move {
                    while let Some(event) = rx.recv().await {
                        match event {
                            ExchangeEvent::Delta { text } => {
                                print!("{}", text);
                                std::io::stdout().flush().expect("Failed to flush stdout");
                            }
                            ExchangeEvent::Done => println!("\n"),
                            ExchangeEvent::Error { message } => println!("Error: {}", message),
                        }
                    }
                });

                run_exchange(Arc::clone(&session), client.clone(), start, tx).await;
                printer.await?;
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    // The summary is regenerated in the background as the
    // conversation grows. Show the last one on the way out.
    if let Some(summary) = session
        .read()
        .expect("Unable to read shared session")
        .summary()
    {
        println!("\n--- Conversation summary ---\n{}", summary);
    }

    Ok(())
}
