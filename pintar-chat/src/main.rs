//! Interactive terminal chat for pintar.

use std::io::{self, Write};
use std::sync::Arc;

use pintar_chat::providers::GeminiClient;
use pintar_chat::session::ChatSession;
use pintar_core::{Config, Style, load_dotenv};
use pintar_knowledge::HttpEmbedder;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();
    let config = Config::load()?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.settings.logging.level.as_str().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Configuration loaded (model: {})", config.model());

    let embedder = Arc::new(HttpEmbedder::new(&config.knowledge())?);
    let generator = GeminiClient::new(config.google_api_key(), config.model());

    let mut session = ChatSession::new(Box::new(generator), embedder, &config.settings);

    println!("Chatbot Pintar (model: {})", config.model());
    println!("Ketik pesan Anda, atau /help untuk daftar perintah.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix('/') {
            if !handle_command(&mut session, command).await {
                break;
            }
            continue;
        }

        match session.turn(input).await {
            Ok(output) => {
                println!("\n{}\n", output.reply);
                if !output.suggestions.is_empty() {
                    println!("Saran tindak lanjut:");
                    for suggestion in &output.suggestions {
                        println!("- {suggestion}");
                    }
                    println!();
                }
            }
            Err(err) => {
                eprintln!("Gagal menjawab: {err}");
            }
        }
    }

    println!("Sampai jumpa!");
    Ok(())
}

/// Handle a slash command. Returns false when the REPL should exit.
async fn handle_command(session: &mut ChatSession, command: &str) -> bool {
    let mut parts = command.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("");
    let arg = parts.next().unwrap_or("").trim();

    match name {
        "quit" | "exit" => return false,
        "clear" => {
            session.clear();
            println!("Riwayat percakapan dihapus.");
        }
        "domain" => match session.set_domain(arg).await {
            Ok(()) => {
                let active = if session.domain().is_empty() {
                    "(umum)"
                } else {
                    session.domain()
                };
                println!("Domain aktif: {active}");
            }
            Err(err) => eprintln!("Gagal memuat domain: {err}"),
        },
        "style" => match arg.parse::<Style>() {
            Ok(style) => {
                session.set_style(style);
                println!("Gaya bahasa: {style}");
            }
            Err(err) => eprintln!("{err}"),
        },
        "help" => print_help(),
        _ => println!("Perintah tidak dikenal: /{name} (coba /help)"),
    }

    true
}

fn print_help() {
    println!("Perintah:");
    println!("  /domain <nama>   Ganti domain (edukasi, gizi, travel, produktivitas; kosongkan untuk umum)");
    println!("  /style <gaya>    Ganti gaya bahasa (formal atau santai)");
    println!("  /clear           Hapus riwayat percakapan");
    println!("  /help            Tampilkan bantuan ini");
    println!("  /quit            Keluar");
}
