//! Terminal rendering of engine outcomes.
//!
//! All user-facing strings live here; the core only produces structured
//! outcomes.

use colored::Colorize;
use overland_core::{CountrySummary, NoRouteReason, RouteOutcome};

pub fn pending(from: &str, to: &str) {
    println!(
        "Calculating shortest routes from {} to {}…",
        from.bold(),
        to.bold()
    );
}

pub fn outcome(outcome: &RouteOutcome) {
    match outcome {
        RouteOutcome::Routes {
            routes,
            fetch_count,
        } => {
            println!("{}", "Result".green().bold());
            for route in routes {
                println!("  {route}");
            }
            request_count(*fetch_count);
        }
        RouteOutcome::NoRoute {
            reason,
            fetch_count,
        } => {
            println!("{}", message_for(*reason).yellow());
            request_count(*fetch_count);
        }
    }
}

pub fn catalog(countries: &[CountrySummary]) {
    for country in countries {
        println!(
            "{}  {:<36} {:>10.0} km²",
            country.code.as_str().cyan(),
            country.name,
            country.area
        );
    }
    println!("{} countries", countries.len());
}

fn message_for(reason: NoRouteReason) -> &'static str {
    match reason {
        NoRouteReason::SameCountry => "You are already there!",
        NoRouteReason::Island => "One or both countries are islands, no land route is possible.",
        NoRouteReason::Unreachable => "The route is too long or does not exist.",
        NoRouteReason::TooManyRoutes => "Too many equally short routes to report.",
    }
}

fn request_count(fetch_count: u64) {
    if fetch_count > 0 {
        println!("Count of requests: {fetch_count}");
    }
}
