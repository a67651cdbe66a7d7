//! DirectLink CLI
//!
//! CLI tool for resolving redirector URLs and inspecting the rule registry.

use std::fs;

use clap::{Parser, Subcommand};
use serde::Serialize;

use dl_core::{builtin_registry, normalize_host, resolve, subscriptions, Request};

mod check;
mod logging;
mod perf_budget;

#[derive(Parser)]
#[command(name = "dl-cli")]
#[command(about = "DirectLink redirect resolver and registry tools")]
struct Cli {
    /// Log resolution steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve redirector URLs to their destinations
    Resolve {
        /// URLs to resolve
        urls: Vec<String>,

        /// File with one URL per line
        #[arg(short, long)]
        input: Option<String>,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the request-filter match patterns
    Subscriptions {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered hosts and their rules
    Sites {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the registry key a host folds onto
    Normalize {
        /// Hosts to normalize
        #[arg(required = true)]
        hosts: Vec<String>,
    },

    /// Validate the built-in registry
    Check,

    /// Check resolve latency against budget
    Perf {
        /// Iterations over the sample URL set
        #[arg(short = 'n', long, default_value_t = 2000)]
        iterations: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Resolve { urls, input, json } => cmd_resolve(urls, input.as_deref(), json),
        Commands::Subscriptions { json } => cmd_subscriptions(json),
        Commands::Sites { json } => cmd_sites(json),
        Commands::Normalize { hosts } => cmd_normalize(&hosts),
        Commands::Check => check::run_check(),
        Commands::Perf { iterations } => {
            perf_budget::run_perf_budget(perf_budget::PerfBudgetOptions { iterations })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Resolution {
    url: String,
    redirect_url: Option<String>,
    error: Option<String>,
}

fn resolve_one(url: &str) -> Resolution {
    match resolve(&Request::new(url)) {
        Ok(redirect) => Resolution {
            url: url.to_string(),
            redirect_url: redirect.map(|r| r.redirect_url),
            error: None,
        },
        Err(e) => {
            tracing::warn!("{}", e);
            Resolution {
                url: url.to_string(),
                redirect_url: None,
                error: Some(e.to_string()),
            }
        }
    }
}

fn read_url_list(path: &str) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
    Ok(parse_url_list(&content))
}

fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn cmd_resolve(mut urls: Vec<String>, input: Option<&str>, json: bool) -> Result<(), String> {
    if let Some(path) = input {
        urls.extend(read_url_list(path)?);
    }
    if urls.is_empty() {
        return Err("No URLs specified".to_string());
    }

    let resolutions: Vec<Resolution> = urls.iter().map(|url| resolve_one(url)).collect();
    let failed = resolutions.iter().filter(|r| r.error.is_some()).count();

    if json {
        let out = serde_json::to_string_pretty(&resolutions)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        println!("{}", out);
    } else {
        for r in &resolutions {
            match (&r.redirect_url, &r.error) {
                (Some(redirect), _) => println!("{} -> {}", r.url, redirect),
                (None, Some(error)) => println!("{} !! {}", r.url, error),
                (None, None) => println!("{} (no redirect)", r.url),
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} URL(s) could not be parsed", failed, resolutions.len()));
    }
    Ok(())
}

fn cmd_subscriptions(json: bool) -> Result<(), String> {
    let subs = subscriptions();
    if json {
        let out = serde_json::to_string_pretty(subs)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        println!("{}", out);
    } else {
        for pattern in subs {
            println!("{}", pattern);
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct SiteView<'a> {
    host: &'a str,
    rules: Vec<RuleView<'a>>,
}

#[derive(Debug, Serialize)]
struct RuleView<'a> {
    path: &'a str,
    extractor: String,
}

fn site_views() -> Vec<SiteView<'static>> {
    builtin_registry()
        .sites()
        .iter()
        .map(|site| SiteView {
            host: site.host(),
            rules: site
                .rules()
                .iter()
                .map(|rule| RuleView {
                    path: rule.path(),
                    extractor: rule.extractor().to_string(),
                })
                .collect(),
        })
        .collect()
}

fn cmd_sites(json: bool) -> Result<(), String> {
    let views = site_views();
    if json {
        let out = serde_json::to_string_pretty(&views)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        println!("{}", out);
        return Ok(());
    }

    for site in &views {
        println!("{}", site.host);
        for rule in &site.rules {
            println!("  {:<28} {}", rule.path, rule.extractor);
        }
    }
    println!();
    println!("{} sites", views.len());
    Ok(())
}

fn cmd_normalize(hosts: &[String]) -> Result<(), String> {
    let registry = builtin_registry();
    for host in hosts {
        let key = normalize_host(host);
        let status = if registry.get(&key).is_some() { "registered" } else { "unregistered" };
        println!("{} -> {} ({})", host, key, status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_list() {
        let content = "# sample\nhttps://a.test/\n\n  https://b.test/  \n";
        assert_eq!(parse_url_list(content), vec!["https://a.test/", "https://b.test/"]);
    }

    #[test]
    fn test_resolve_one() {
        let hit = resolve_one("https://vk.com/away.php?to=https://example.com");
        assert_eq!(hit.redirect_url.as_deref(), Some("https://example.com"));
        assert!(hit.error.is_none());

        let bad = resolve_one("::");
        assert!(bad.redirect_url.is_none());
        assert!(bad.error.is_some());
    }

    #[test]
    fn test_resolution_json_shape() {
        let json = serde_json::to_value(resolve_one("https://exit.sc/?url=https://example.com")).unwrap();
        assert_eq!(json["redirectUrl"], "https://example.com");
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_site_views_cover_registry() {
        let views = site_views();
        assert_eq!(views.len(), builtin_registry().sites().len());
        let disqus = views.iter().find(|v| v.host == "disq.us").unwrap();
        assert_eq!(disqus.rules[0].extractor, "strip-colon(param(url))");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["dl-cli", "-v", "resolve", "https://a.test/", "--json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Resolve { json: true, .. }));
    }
}
