//! CLI argument parsing tests.

use clap::Parser;
use librariesio::cli::{parse_arguments, search_query, Cli, Command, FilterArg, SubscriptionCommand};
use librariesio::{ArgKey, SearchFilter, SearchOperation, SearchSort};

#[test]
fn test_cli_parses_search_with_arguments() {
    let cli = Cli::parse_from([
        "librariesio",
        "search",
        "project-dependencies",
        "platform=npm",
        "project=base62",
        "version=2.0.1",
    ]);

    assert!(!cli.json);
    match cli.command {
        Command::Search { operation, args, .. } => {
            assert_eq!(operation, SearchOperation::ProjectDependencies);
            let arguments = parse_arguments(&args).unwrap();
            assert_eq!(arguments.get(ArgKey::Platform), Some("npm"));
            assert_eq!(arguments.get(ArgKey::Version), Some("2.0.1"));
        }
        _ => panic!("Expected Search command"),
    }
}

#[test]
fn test_cli_parses_project_search_flags() {
    let cli = Cli::parse_from([
        "librariesio",
        "--json",
        "search",
        "project-search",
        "--q",
        "grunt",
        "--sort",
        "stars",
        "--filter",
        "licenses=MIT",
        "--filter",
        "platforms=NPM",
        "--per-page",
        "50",
        "--all",
    ]);

    assert!(cli.json);
    match cli.command {
        Command::Search {
            operation,
            q,
            sort,
            filters,
            paging,
            ..
        } => {
            assert_eq!(operation, SearchOperation::ProjectSearch);
            assert_eq!(sort, Some(SearchSort::Stars));
            assert!(paging.all);
            assert_eq!(paging.options().per_page, Some(50));

            let query = search_query(q, sort, &filters);
            assert_eq!(query.q.as_deref(), Some("grunt"));
            assert_eq!(query.filters.len(), 2);
            assert!(query.filters[&SearchFilter::Licenses].contains("MIT"));
        }
        _ => panic!("Expected Search command"),
    }
}

#[test]
fn test_cli_rejects_unknown_operation() {
    let result = Cli::try_parse_from(["librariesio", "search", "project-popularity"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_malformed_filter() {
    let result = Cli::try_parse_from([
        "librariesio",
        "search",
        "project-search",
        "--filter",
        "MIT",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_subscription_add() {
    let cli = Cli::parse_from([
        "librariesio",
        "subscriptions",
        "add",
        "npm",
        "base62",
        "--include-prerelease",
    ]);

    match cli.command {
        Command::Subscriptions {
            action:
                SubscriptionCommand::Add {
                    platform,
                    project,
                    include_prerelease,
                },
        } => {
            assert_eq!(platform, "npm");
            assert_eq!(project, "base62");
            assert!(include_prerelease);
        }
        _ => panic!("Expected subscriptions add"),
    }
}

#[test]
fn test_cli_parses_subscription_list_paging() {
    let cli = Cli::parse_from(["librariesio", "subscriptions", "list", "--page", "3"]);

    match cli.command {
        Command::Subscriptions {
            action: SubscriptionCommand::List { paging },
        } => {
            assert_eq!(paging.page, Some(3));
            assert!(!paging.all);
        }
        _ => panic!("Expected subscriptions list"),
    }
}

#[test]
fn test_cli_api_key_flag() {
    let cli = Cli::parse_from(["librariesio", "--api-key", "abc", "search", "platforms"]);
    assert_eq!(cli.api_key.as_deref(), Some("abc"));
}

#[test]
fn test_filter_arg_parse() {
    let filter: FilterArg = "keywords=http".parse().unwrap();
    assert_eq!(filter.filter, SearchFilter::Keywords);
    assert_eq!(filter.value, "http");

    assert!("colour=red".parse::<FilterArg>().is_err());
}

#[test]
fn test_parse_arguments_rejects_unknown_key() {
    let args = vec!["flavour=sweet".to_string()];
    assert!(parse_arguments(&args).is_err());
}
