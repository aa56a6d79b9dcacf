//! libraries.io CLI binary.
//!
//! A command-line interface for the libraries.io search and subscription API.

use clap::Parser;
use librariesio::cli::{
    parse_arguments, search_query, Cli, Command, PagingArgs, SubscriptionCommand,
};
use librariesio::output::{render, render_subscriptions, to_json};
use librariesio::{Response, Search, Session, SessionBuilder, Subscribe, API_URL_ENV};
use std::process::ExitCode;

/// Opt-in switch for diagnostics on stderr; filtering follows `RUST_LOG`.
const LOG_ENV: &str = "LIBRARIES_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::var_os(LOG_ENV).is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    let session = match build_session(cli.api_key.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Check the {API_URL_ENV} environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(session, cli.command, cli.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ librariesio::LibrariesError::MissingApiKey { .. }) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Pass --api-key or set LIBRARIES_API_KEY");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_session(api_key: Option<&str>) -> librariesio::Result<Session> {
    let mut builder = SessionBuilder::from_env();
    if let Some(key) = api_key {
        builder = builder.api_key(key);
    }
    builder.build()
}

async fn run(session: Session, command: Command, json: bool) -> librariesio::Result<()> {
    match command {
        Command::Search {
            operation,
            args,
            q,
            sort,
            filters,
            paging,
        } => {
            let search = Search::with_session(session);
            let arguments = parse_arguments(&args)?;
            let query = search_query(q, sort, &filters);

            let response = if paging.all {
                let pages = search.pages(operation, arguments, query, paging.options())?;
                Response::Collection(pages.collect_items().await?)
            } else {
                search
                    .call(operation, arguments, query, paging.options())
                    .await?
                    .into_result()?
            };

            print_response(&response, json, |r| render(operation, r));
        }
        Command::Subscriptions { action } => {
            handle_subscriptions(Subscribe::with_session(session), action, json).await?;
        }
    }
    Ok(())
}

async fn handle_subscriptions(
    subscribe: Subscribe,
    action: SubscriptionCommand,
    json: bool,
) -> librariesio::Result<()> {
    let response = match action {
        SubscriptionCommand::List { paging } => list_subscriptions(&subscribe, &paging).await?,
        SubscriptionCommand::Add {
            platform,
            project,
            include_prerelease,
        } => {
            subscribe
                .subscribe(&platform, &project, include_prerelease)
                .await?
                .into_result()?
        }
        SubscriptionCommand::Update {
            platform,
            project,
            include_prerelease,
        } => {
            subscribe
                .update_subscription(&platform, &project, include_prerelease)
                .await?
                .into_result()?
        }
        SubscriptionCommand::Remove { platform, project } => {
            subscribe.unsubscribe(&platform, &project).await?.into_result()?
        }
        SubscriptionCommand::Check { platform, project } => {
            let subscribed = subscribe.check_if_subscribed(&platform, &project).await?;
            if json {
                println!("{}", serde_json::json!({ "subscribed": subscribed }));
            } else if subscribed {
                println!("Subscribed to {platform}/{project}");
            } else {
                println!("Not subscribed to {platform}/{project}");
            }
            return Ok(());
        }
    };

    print_response(&response, json, render_subscriptions);
    Ok(())
}

async fn list_subscriptions(
    subscribe: &Subscribe,
    paging: &PagingArgs,
) -> librariesio::Result<Response> {
    if paging.all {
        let pages = subscribe.user_subscriptions_pages(paging.options())?;
        Ok(Response::Collection(pages.collect_items().await?))
    } else {
        subscribe
            .user_subscriptions(paging.options())
            .await?
            .into_result()
    }
}

fn print_response<F>(response: &Response, json: bool, pretty: F)
where
    F: Fn(&Response) -> String,
{
    if json {
        println!("{}", to_json(&response.clone().into_value()));
    } else {
        println!("{}", pretty(response));
    }
}
