use anyhow::Context;
use chrono::FixedOffset;
use clap::{Args, Parser, Subcommand};
use nr_core::{Engine, RuleSet, SearchRequest, SortMode};
use nr_search::{FixtureSource, NaverConfig, NaverSource, NewsSource};
use nr_web::logging::{init_logging, parse_level};
use nr_web::{AppState, Clock};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Keyword-ranked news search over the Naver News API", long_about = None)]
pub struct Cli {
    /// Rule document (JSON). The built-in customs rules are used when omitted.
    #[arg(long, env = "NR_RULES", global = true)]
    rules: Option<PathBuf>,
    /// Override the rule document's recency window, in whole days
    #[arg(long, env = "NR_WINDOW_DAYS", global = true)]
    window_days: Option<u32>,
    /// Fixed UTC offset, in hours, that counts as local time (host time zone otherwise)
    #[arg(long, env = "NR_UTC_OFFSET_HOURS", global = true, allow_hyphen_values = true)]
    utc_offset_hours: Option<i32>,
    #[arg(long, env = "NR_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct SourceArgs {
    #[arg(long, env = "NAVER_CLIENT_ID", hide_env_values = true)]
    client_id: Option<String>,
    #[arg(long, env = "NAVER_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,
    #[arg(long, env = "NAVER_API_URL")]
    api_url: Option<String>,
    #[arg(long, env = "NR_HTTP_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,
    /// Replay a saved provider response instead of calling the API
    #[arg(long)]
    fixture: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the search endpoint over HTTP
    Serve {
        #[arg(long, env = "NR_BIND", default_value = "0.0.0.0:8888")]
        bind: SocketAddr,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Run one search and print the response envelope
    Search {
        #[arg(long)]
        query: Option<String>,
        /// Number of provider results to scan (1-100)
        #[arg(long)]
        display: Option<u32>,
        /// `date` or `sim`
        #[arg(long)]
        sort: Option<String>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Score a single title/description pair
    Score {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Print the effective rule document
    Rules,
}

fn load_rules(cli: &Cli) -> anyhow::Result<RuleSet> {
    let rules = RuleSet::load(cli.rules.as_deref()).with_context(|| match &cli.rules {
        Some(path) => format!("Failed to load rules from {}", path.display()),
        None => "Failed to load built-in rules".to_string(),
    })?;
    Ok(match cli.window_days {
        Some(days) => rules.with_window_days(days),
        None => rules,
    })
}

fn clock_for(offset_hours: Option<i32>) -> anyhow::Result<Clock> {
    match offset_hours {
        None => Ok(Clock::Local),
        Some(hours) => hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(Clock::Offset)
            .ok_or_else(|| anyhow::anyhow!("Invalid UTC offset: {} hours", hours)),
    }
}

fn create_source(args: &SourceArgs) -> anyhow::Result<Arc<dyn NewsSource>> {
    if let Some(path) = &args.fixture {
        let source = FixtureSource::from_path(path)
            .with_context(|| format!("Failed to load fixture {}", path.display()))?;
        return Ok(Arc::new(source));
    }

    let mut config = NaverConfig::new(
        args.client_id.clone().unwrap_or_default(),
        args.client_secret.clone().unwrap_or_default(),
    )?
    .with_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(url) = &args.api_url {
        config = config.with_endpoint(url)?;
    }
    Ok(Arc::new(NaverSource::new(config)?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(parse_level(&cli.log_level).unwrap_or(Level::INFO));

    let rules = load_rules(&cli)?;
    let clock = clock_for(cli.utc_offset_hours)?;
    let engine = Engine::new(Arc::new(rules));

    match cli.command {
        Commands::Serve { bind, source } => {
            let source = create_source(&source)?;
            info!(
                "🦗 Using {} with a {}-day recency window",
                source.name(),
                engine.rules().recency_window_days
            );
            let app = nr_web::create_app(AppState::new(source, engine).with_clock(clock)).await;
            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("Failed to bind {}", bind))?;
            info!("🚀 Listening on {}", bind);
            axum::serve(listener, app).await?;
        }
        Commands::Search {
            query,
            display,
            sort,
            source,
        } => {
            let sort = sort.as_deref().map(SortMode::parse).transpose()?;
            let request = SearchRequest::resolve(
                query.as_deref(),
                display,
                sort,
                &engine.rules().search_query,
            )?;
            let state = AppState::new(create_source(&source)?, engine).with_clock(clock);
            let envelope = nr_web::handlers::run_search(&state, &request).await?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Commands::Score { title, description } => {
            let verdict = engine.judge(&title, &description);
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        }
        Commands::Rules => {
            println!("{}", serde_json::to_string_pretty(engine.rules())?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_args() {
        let cli = Cli::try_parse_from([
            "nr", "search", "--query", "세관", "--display", "50", "--sort", "sim", "--window-days", "1",
        ])
        .unwrap();
        assert_eq!(cli.window_days, Some(1));
        match cli.command {
            Commands::Search { query, display, sort, .. } => {
                assert_eq!(query.as_deref(), Some("세관"));
                assert_eq!(display, Some(50));
                assert_eq!(sort.as_deref(), Some("sim"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_window_override_applies() {
        let cli = Cli::try_parse_from(["nr", "rules", "--window-days", "1"]).unwrap();
        assert_eq!(load_rules(&cli).unwrap().recency_window_days, 1);
    }

    #[test]
    fn test_clock_offsets() {
        assert!(matches!(clock_for(None).unwrap(), Clock::Local));
        match clock_for(Some(9)).unwrap() {
            Clock::Offset(offset) => assert_eq!(offset.local_minus_utc(), 9 * 3600),
            other => panic!("unexpected clock: {:?}", other),
        }
        assert!(matches!(clock_for(Some(-5)).unwrap(), Clock::Offset(_)));
        assert!(clock_for(Some(48)).is_err());
    }

    #[test]
    fn test_live_source_requires_credentials() {
        let args = SourceArgs {
            client_id: None,
            client_secret: None,
            api_url: None,
            timeout_secs: 10,
            fixture: None,
        };
        assert!(create_source(&args).is_err());
    }

    #[test]
    fn test_live_source_takes_flags() {
        let cli = Cli::try_parse_from([
            "nr", "search", "--client-id", "id", "--client-secret", "secret", "--api-url", "not a url",
        ])
        .unwrap();
        let Commands::Search { source, .. } = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(source.client_id.as_deref(), Some("id"));
        assert!(create_source(&source).is_err());

        let ok = SourceArgs {
            api_url: Some("http://127.0.0.1:9/v1/search/news.json".to_string()),
            ..source
        };
        assert_eq!(create_source(&ok).unwrap().name(), "Naver News");
    }
}
