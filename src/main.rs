//! Interactive stand-in for the browser event layer: reads clicked text from
//! stdin, prints what the caption popup would show.
//! Commands: `:lang <from> <to>`, `:stats`, `:metrics`, `:reset`, `:quit`.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use subgloss::config::{is_supported_language, Config};
use subgloss::metrics::MetricsRegistry;
use subgloss::prefs::{LanguagePair, PrefsStore};
use subgloss::translate::{Coordinator, MyMemoryClient, TranslationBackend};
use subgloss::RequestDispatcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subgloss=info".parse().expect("static filter parses")),
        )
        .with_target(true)
        .init();

    let config = Config::default();
    let prefs = Arc::new(PrefsStore::load(
        "subgloss-prefs.json",
        LanguagePair::new(&config.default_from_lang, &config.default_to_lang),
    ));

    let backend: Arc<dyn TranslationBackend> = Arc::new(MyMemoryClient::new(config.api_url.clone())?);
    let metrics = Arc::new(MetricsRegistry::new());
    let coordinator = Arc::new(Coordinator::new(
        backend,
        config.min_request_interval,
        Arc::clone(&metrics),
    ));
    let dispatcher = RequestDispatcher::new(
        Arc::clone(&coordinator),
        Arc::clone(&prefs),
        config.max_text_length,
        Arc::clone(&metrics),
    );

    info!("subgloss ready, type a word or :quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            [] => continue,
            [":quit"] => break,
            [":reset"] => {
                coordinator.reset();
                println!("cache and inflight tables cleared");
            }
            [":stats"] => {
                let stats = coordinator.stats();
                println!(
                    "cache_size={} inflight_count={}",
                    stats.cache_size, stats.inflight_count
                );
            }
            [":metrics"] => {
                for (name, summary) in metrics.summary() {
                    println!(
                        "{name}: p50={}us p95={}us p99={}us n={}",
                        summary.p50_us, summary.p95_us, summary.p99_us, summary.count
                    );
                }
            }
            &[":lang", from, to] => {
                if !is_supported_language(from) || !is_supported_language(to) {
                    println!("(unknown language code)");
                    continue;
                }
                match prefs.set(from, to) {
                    Ok(()) => println!("language pair set to {from} → {to}"),
                    Err(e) => println!("(could not save preferences: {e})"),
                }
            }
            _ => {
                let popup = dispatcher.handle_click(&line).await;
                println!("{}", popup.body);
            }
        }
    }

    Ok(())
}
